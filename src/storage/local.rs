//! Local filesystem feed storage.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! └── exposiciones-reina-sofia.xml   # Latest generated feed
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::storage::FeedSink;

/// Writes feed documents into a directory.
#[derive(Debug, Clone)]
pub struct LocalFeedStorage {
    root_dir: PathBuf,
}

impl LocalFeedStorage {
    /// Create a new LocalFeedStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a file name.
    fn path(&self, file_name: &str) -> PathBuf {
        self.root_dir.join(file_name)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path(file_name);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(path)
    }
}

#[async_trait]
impl FeedSink for LocalFeedStorage {
    async fn write_feed(&self, file_name: &str, document: &str) -> Result<String> {
        let path = self.write_bytes(file_name, document.as_bytes()).await?;
        log::debug!("Wrote {} bytes to {}", document.len(), path.display());
        Ok(path.display().to_string())
    }
}
