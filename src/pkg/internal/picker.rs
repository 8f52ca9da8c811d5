use std::path::Path;

use standard_error::{Interpolate, StandardError};

use crate::prelude::Result;

pub const PDF_MIME: &str = "application/pdf";

/// A file the user picked for upload. The picker only offers PDF documents; nothing else
/// about the file is inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub data: Vec<u8>,
}

impl SelectedFile {
    pub fn from_bytes(file_name: &str, data: Vec<u8>) -> Self {
        SelectedFile {
            file_name: file_name.to_string(),
            mime_type: PDF_MIME,
            data,
        }
    }

    pub async fn pick(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !accepts(path) {
            return Err(StandardError::new("ERR-FILE-002").interpolate_err(path.display().to_string()));
        }
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| StandardError::new("ERR-FILE-001").interpolate_err(e.to_string()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume.pdf");
        tracing::debug!("picked {} ({} bytes)", file_name, data.len());
        Ok(Self::from_bytes(file_name, data))
    }
}

/// Mirrors an `accept="application/pdf"` file input: decided by extension alone.
pub fn accepts(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
