use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use crate::output::ensure_output_dir;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cannot create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Destination for recovered files.
#[async_trait::async_trait]
pub trait AssetStore: Send + Sync {
    /// Create `dir` and any missing ancestors. Succeeds if it already exists.
    async fn ensure_dir(&self, dir: &Path) -> Result<(), StoreError>;
    /// Write `bytes` to `path`, replacing existing content.
    async fn write_file(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError>;
}

/// Writes to the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStore;

#[async_trait::async_trait]
impl AssetStore for FsStore {
    async fn ensure_dir(&self, dir: &Path) -> Result<(), StoreError> {
        ensure_output_dir(dir).await.map_err(|source| StoreError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })
    }

    async fn write_file(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        tokio::fs::write(path, bytes).await.map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Default)]
struct MemoryTree {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, Vec<u8>>,
}

/// In-memory store – useful for testing.
///
/// Mirrors the filesystem rules that matter here: a file cannot be written into a
/// directory that was never created, and a directory cannot replace a file.
#[derive(Default, Clone)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemoryTree>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, path: &Path) -> Option<Vec<u8>> {
        self.inner.read().await.files.get(path).cloned()
    }

    /// All written paths in sorted order.
    pub async fn paths(&self) -> Vec<PathBuf> {
        self.inner.read().await.files.keys().cloned().collect()
    }
}

#[async_trait::async_trait]
impl AssetStore for MemoryStore {
    async fn ensure_dir(&self, dir: &Path) -> Result<(), StoreError> {
        let mut tree = self.inner.write().await;
        for ancestor in dir.ancestors() {
            if tree.files.contains_key(ancestor) {
                return Err(StoreError::CreateDir {
                    path: dir.to_path_buf(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::AlreadyExists,
                        format!("{} is a file", ancestor.display()),
                    ),
                });
            }
        }
        for ancestor in dir.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            tree.dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    async fn write_file(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        let mut tree = self.inner.write().await;
        let parent_missing = path
            .parent()
            .map_or(false, |p| !p.as_os_str().is_empty() && !tree.dirs.contains(p));
        if parent_missing || tree.dirs.contains(path) {
            return Err(StoreError::Write {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "parent directory missing or path is a directory"),
            });
        }
        tree.files.insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }
}
