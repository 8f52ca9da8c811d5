use reqwest::multipart::{Form, Part};
use standard_error::{Interpolate, StandardError};

use crate::{
    pkg::internal::{
        adaptors::records::spec::{ErrorResponse, RecordId, UploadOutcome},
        client::RemoteClient,
        picker::SelectedFile,
    },
    prelude::Result,
};

/// What gets posted to `/upload`.
pub struct CreateRecordData<'a> {
    pub name: &'a str,
    pub password: &'a str,
    pub resume: Option<&'a SelectedFile>,
}

pub struct RecordMutator<'a> {
    client: &'a RemoteClient,
}

impl<'a> RecordMutator<'a> {
    pub fn new(client: &'a RemoteClient) -> Self {
        RecordMutator { client }
    }

    pub async fn upload(&self, input: CreateRecordData<'_>) -> Result<UploadOutcome> {
        let mut form = Form::new()
            .text("name", input.name.to_string())
            .text("password", input.password.to_string());
        // with nothing picked the part is left out and the service decides
        if let Some(file) = input.resume {
            let part = Part::bytes(file.data.clone())
                .file_name(file.file_name.clone())
                .mime_str(file.mime_type)
                .map_err(|e| StandardError::new("ERR-HTTP-001").interpolate_err(e.to_string()))?;
            form = form.part("resume", part);
        }
        let url = self.client.endpoint("upload")?;
        tracing::debug!("uploading resume for {} to {}", input.name, &url);
        let response = self
            .client
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| StandardError::new("ERR-HTTP-001").interpolate_err(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| StandardError::new("ERR-HTTP-003").interpolate_err(e.to_string()))?;
        if status.is_success() {
            let value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
            return Ok(UploadOutcome::Accepted(value));
        }
        let error = match serde_json::from_slice::<ErrorResponse>(&body) {
            Ok(res) => res.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("upload rejected")
                .to_string(),
        };
        tracing::debug!("upload rejected with {}: {}", status, &error);
        Ok(UploadOutcome::Rejected {
            status: status.as_u16(),
            error,
        })
    }

    pub async fn delete(&self, id: &RecordId) -> Result<()> {
        let url = self.client.endpoint(&format!("data/{}", id))?;
        tracing::debug!("deleting record {}", id);
        let response = self
            .client
            .http
            .delete(url)
            .send()
            .await
            .map_err(|e| StandardError::new("ERR-HTTP-001").interpolate_err(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(StandardError::new("ERR-HTTP-002").interpolate_err(status.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;
    use tracing_test::traced_test;

    use super::{CreateRecordData, RecordMutator};
    use crate::{
        pkg::internal::{
            adaptors::records::spec::{RecordId, UploadOutcome},
            client::RemoteClient,
            picker::SelectedFile,
        },
        prelude::Result,
    };

    fn resume() -> SelectedFile {
        SelectedFile::from_bytes("cv.pdf", b"%PDF-1.4 test".to_vec())
    }

    #[traced_test]
    #[tokio::test]
    async fn test_upload_sends_multipart() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/upload")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data".into()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="name""#.into()),
                Matcher::Regex(r#"name="password""#.into()),
                Matcher::Regex(r#"name="resume"; filename="cv.pdf""#.into()),
                Matcher::Regex("application/pdf".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"message":"ok"}"#)
            .expect(1)
            .create_async()
            .await;
        let client = RemoteClient::new(&server.url(), None)?;
        let file = resume();
        let outcome = RecordMutator::new(&client)
            .upload(CreateRecordData {
                name: "ada",
                password: "hunter2",
                resume: Some(&file),
            })
            .await?;
        mock.assert_async().await;
        assert_eq!(outcome, UploadOutcome::Accepted(json!({"message": "ok"})));
        Ok(())
    }

    #[traced_test]
    #[tokio::test]
    async fn test_upload_rejection_carries_error_field() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/upload")
            .with_status(400)
            .with_body(r#"{"error":"Duplicate resume detected"}"#)
            .create_async()
            .await;
        let client = RemoteClient::new(&server.url(), None)?;
        let file = resume();
        let outcome = RecordMutator::new(&client)
            .upload(CreateRecordData {
                name: "ada",
                password: "hunter2",
                resume: Some(&file),
            })
            .await?;
        assert!(outcome.is_duplicate());
        Ok(())
    }

    #[traced_test]
    #[tokio::test]
    async fn test_upload_rejection_without_json() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/upload")
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;
        let client = RemoteClient::new(&server.url(), None)?;
        let outcome = RecordMutator::new(&client)
            .upload(CreateRecordData {
                name: "ada",
                password: "",
                resume: None,
            })
            .await?;
        assert_eq!(
            outcome,
            UploadOutcome::Rejected {
                status: 502,
                error: "Bad Gateway".into()
            }
        );
        Ok(())
    }

    #[traced_test]
    #[tokio::test]
    async fn test_delete() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let ok = server
            .mock("DELETE", "/data/9")
            .with_status(200)
            .expect(1)
            .create_async()
            .await;
        server
            .mock("DELETE", "/data/10")
            .with_status(404)
            .create_async()
            .await;
        let client = RemoteClient::new(&server.url(), None)?;
        RecordMutator::new(&client).delete(&RecordId::from("9")).await?;
        ok.assert_async().await;
        assert!(RecordMutator::new(&client)
            .delete(&RecordId::from("10"))
            .await
            .is_err());
        Ok(())
    }
}
