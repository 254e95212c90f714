//! # Upload Staging
//!
//! Uploaded files are written to a uniquely named file in the upload
//! directory, handed to the media provider by path, and removed again
//! whether or not the provider call succeeded.

use cellestial_core::GatewayResult;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// A file staged on local disk for the duration of one request
#[derive(Debug)]
pub struct StagedUpload {
    path: PathBuf,
    size: usize,
}

impl StagedUpload {
    /// Write `bytes` to a fresh file under `dir`, creating `dir` if needed
    pub async fn write(dir: &Path, bytes: &[u8]) -> GatewayResult<Self> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(Uuid::new_v4().simple().to_string());
        tokio::fs::write(&path, bytes).await?;

        debug!("Staged {} bytes at {}", bytes.len(), path.display());

        Ok(Self {
            path,
            size: bytes.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Best-effort removal; failures are logged and swallowed.
    pub async fn remove(self) {
        match tokio::fs::try_exists(&self.path).await {
            Ok(true) => {
                if let Err(e) = tokio::fs::remove_file(&self.path).await {
                    warn!("Failed to remove staged upload {}: {}", self.path.display(), e);
                }
            }
            Ok(false) => debug!("Staged upload already gone: {}", self.path.display()),
            Err(e) => warn!("Cannot stat staged upload {}: {}", self.path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("uploads");

        let staged = StagedUpload::write(&nested, b"avatar").await.unwrap();
        let path = staged.path().to_path_buf();

        assert!(path.starts_with(&nested));
        assert_eq!(staged.size(), 6);
        assert_eq!(std::fs::read(&path).unwrap(), b"avatar");

        staged.remove().await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_unique_names() {
        let dir = tempfile::tempdir().unwrap();
        let a = StagedUpload::write(dir.path(), b"a").await.unwrap();
        let b = StagedUpload::write(dir.path(), b"b").await.unwrap();
        assert_ne!(a.path(), b.path());
        a.remove().await;
        b.remove().await;
    }

    #[tokio::test]
    async fn test_remove_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let staged = StagedUpload::write(dir.path(), b"x").await.unwrap();
        std::fs::remove_file(staged.path()).unwrap();
        staged.remove().await;
    }
}
