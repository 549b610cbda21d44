use std::future::Future;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::errors::LoadError;

/// Asynchronous byte source for model assets.
pub trait AssetReader: Send + Sync {
    fn read_bytes(&self, uri: &str) -> impl Future<Output = Result<Vec<u8>, LoadError>> + Send;
}

/// Reads assets from a directory on the local file system.
#[derive(Debug, Clone)]
pub struct FileAssetReader {
    root_path: PathBuf,
}

impl FileAssetReader {
    /// `path` may be the asset directory or a file inside it.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let root_path = if path.is_file() {
            path.parent().unwrap_or(Path::new(".")).to_path_buf()
        } else {
            path.to_path_buf()
        };
        Self { root_path }
    }

    #[inline]
    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Resolves `uri` against the root. A leading `/` means "root of the
    /// asset directory", not the file system root.
    #[must_use]
    pub fn resolve(&self, uri: &str) -> PathBuf {
        self.root_path.join(uri.trim_start_matches('/'))
    }
}

impl AssetReader for FileAssetReader {
    async fn read_bytes(&self, uri: &str) -> Result<Vec<u8>, LoadError> {
        let path = self.resolve(uri);
        tokio::fs::read(&path)
            .await
            .map_err(|e| LoadError::new(uri, format!("{}: {e}", path.display())))
    }
}

/// Serves assets from memory (embedded data, tests).
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetReader {
    entries: FxHashMap<String, Vec<u8>>,
}

impl MemoryAssetReader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, uri: &str, bytes: impl Into<Vec<u8>>) {
        self.entries
            .insert(uri.trim_start_matches('/').to_string(), bytes.into());
    }

    #[must_use]
    pub fn with(mut self, uri: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(uri, bytes);
        self
    }
}

impl AssetReader for MemoryAssetReader {
    async fn read_bytes(&self, uri: &str) -> Result<Vec<u8>, LoadError> {
        self.entries
            .get(uri.trim_start_matches('/'))
            .cloned()
            .ok_or_else(|| LoadError::new(uri, "asset not found"))
    }
}
