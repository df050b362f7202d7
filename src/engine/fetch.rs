use std::path::{Path, PathBuf};

use crate::foundation::error::{LayerfxError, LayerfxResult};

/// Resolves an asset source into raw bytes.
#[async_trait::async_trait]
pub trait AssetFetcher: Send + Sync {
    /// Fetch the bytes behind `source`.
    async fn fetch(&self, source: &str) -> LayerfxResult<Vec<u8>>;
}

/// Fetches assets from disk. Relative sources resolve against `root`.
#[derive(Clone, Debug)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    /// Create a fetcher rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory relative sources resolve against.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait::async_trait]
impl AssetFetcher for FsFetcher {
    async fn fetch(&self, source: &str) -> LayerfxResult<Vec<u8>> {
        let p = Path::new(source);
        let path = if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.root.join(p)
        };
        tokio::fs::read(&path).await.map_err(|e| {
            LayerfxError::asset(format!("read '{}': {e}", path.display()))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/fetch.rs"]
mod tests;
