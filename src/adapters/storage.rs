use std::fs;
use std::path::PathBuf;

use crate::domain::ports::Storage;
use crate::utils::error::Result;

/// Filesystem-backed storage rooted at the configured output directory.
/// Relative paths are resolved against the root; parent directories are
/// created on write.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        Ok(fs::read(self.root.join(path))?)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.root.join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(fs::write(full_path, data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage
            .write_file("nested/chart.png", b"png-bytes")
            .await
            .unwrap();

        let read_back = storage.read_file("nested/chart.png").await.unwrap();
        assert_eq!(read_back, b"png-bytes");
    }

    #[tokio::test]
    async fn test_read_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        assert!(storage.read_file("absent.docx").await.is_err());
    }
}
