use std::path::{Path, PathBuf};

use standard_error::{Interpolate, StandardError};
use tokio::io::AsyncWriteExt;

use crate::prelude::Result;

/// Writes `bytes` to `dir/file_name`, replacing any earlier download of the same name.
pub async fn save_bytes(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| StandardError::new("ERR-FILE-003").interpolate_err(e.to_string()))?;
    let target = dir.join(file_name);
    let mut file = tokio::fs::File::create(&target)
        .await
        .map_err(|e| StandardError::new("ERR-FILE-003").interpolate_err(e.to_string()))?;
    file.write_all(bytes)
        .await
        .map_err(|e| StandardError::new("ERR-FILE-003").interpolate_err(e.to_string()))?;
    file.flush()
        .await
        .map_err(|e| StandardError::new("ERR-FILE-003").interpolate_err(e.to_string()))?;
    tracing::debug!("wrote {} bytes to {}", bytes.len(), target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::save_bytes;
    use crate::prelude::Result;

    #[tokio::test]
    async fn test_save_overwrites() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let first = save_bytes(dir.path(), "resume.pdf", b"first").await?;
        let second = save_bytes(dir.path(), "resume.pdf", b"second").await?;
        assert_eq!(first, second);
        assert_eq!(std::fs::read(&second).unwrap(), b"second");
        Ok(())
    }

    #[tokio::test]
    async fn test_save_creates_dir() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let path = save_bytes(&nested, "resume.pdf", b"x").await?;
        assert!(path.starts_with(&nested));
        Ok(())
    }
}
