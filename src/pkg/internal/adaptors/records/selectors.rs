use standard_error::{Interpolate, StandardError};

use crate::{
    pkg::internal::{adaptors::records::spec::RecordPage, client::RemoteClient},
    prelude::Result,
};

pub struct RecordSelector<'a> {
    client: &'a RemoteClient,
}

impl<'a> RecordSelector<'a> {
    pub fn new(client: &'a RemoteClient) -> Self {
        RecordSelector { client }
    }

    pub async fn get_page(&self, page: u32) -> Result<RecordPage> {
        let url = self.client.endpoint("data")?;
        tracing::debug!("fetching page {} from {}", page, &url);
        let response = self
            .client
            .http
            .get(url)
            .query(&[("page", page)])
            .send()
            .await
            .map_err(|e| StandardError::new("ERR-HTTP-001").interpolate_err(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(StandardError::new("ERR-HTTP-002").interpolate_err(status.to_string()));
        }
        let page: RecordPage = response
            .json()
            .await
            .map_err(|e| StandardError::new("ERR-HTTP-003").interpolate_err(e.to_string()))?;
        tracing::debug!(
            "received {} records, {} pages total",
            page.data.len(),
            page.total_pages
        );
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use tracing_test::traced_test;

    use super::RecordSelector;
    use crate::{pkg::internal::client::RemoteClient, prelude::Result};

    #[traced_test]
    #[tokio::test]
    async fn test_get_page() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/data")
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":[{"id":11,"name":"ada","file":{"type":"Buffer","data":[1]}}],"totalPages":4}"#)
            .expect(1)
            .create_async()
            .await;
        let client = RemoteClient::new(&server.url(), None)?;
        let page = RecordSelector::new(&client).get_page(2).await?;
        mock.assert_async().await;
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].name, "ada");
        Ok(())
    }

    #[traced_test]
    #[tokio::test]
    async fn test_server_error_is_err() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/data")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;
        let client = RemoteClient::new(&server.url(), None)?;
        assert!(RecordSelector::new(&client).get_page(1).await.is_err());
        Ok(())
    }

    #[traced_test]
    #[tokio::test]
    async fn test_malformed_body_is_err() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/data")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;
        let client = RemoteClient::new(&server.url(), None)?;
        assert!(RecordSelector::new(&client).get_page(1).await.is_err());
        Ok(())
    }
}
