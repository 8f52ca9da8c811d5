use std::time::Duration;

use reqwest::{Client, Url};
use standard_error::{Interpolate, StandardError};

use crate::{conf::Settings, prelude::Result};

/// Handle on the remote submission service: one pooled reqwest client plus the base endpoint
/// every route is joined onto.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    pub http: Client,
    pub base_url: Url,
}

impl RemoteClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))
            .map_err(|e| StandardError::new("ERR-CONF-001").interpolate_err(e.to_string()))?;
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| StandardError::new("ERR-HTTP-000").interpolate_err(e.to_string()))?;
        Ok(RemoteClient { http, base_url })
    }

    pub fn from_settings(s: &Settings) -> Result<Self> {
        let timeout = match s.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        Self::new(&s.base_url, timeout)
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| StandardError::new("ERR-CONF-001").interpolate_err(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::RemoteClient;

    #[test]
    fn test_endpoint_joins_onto_base() {
        let client = RemoteClient::new("http://localhost:4000/", None).unwrap();
        assert_eq!(
            client.endpoint("/data").unwrap().as_str(),
            "http://localhost:4000/data"
        );
        assert_eq!(
            client.endpoint("data/42").unwrap().as_str(),
            "http://localhost:4000/data/42"
        );
    }

    #[test]
    fn test_base_with_path_prefix() {
        let client = RemoteClient::new("http://localhost:4000/api", None).unwrap();
        assert_eq!(
            client.endpoint("upload").unwrap().as_str(),
            "http://localhost:4000/api/upload"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(RemoteClient::new("not a url", None).is_err());
    }
}
