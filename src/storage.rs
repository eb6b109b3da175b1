use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

/// Failures reported by a page store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("no page document at {0}")]
    NotFound(String),

    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Read-only store of build output, keyed by store-relative paths.
pub trait Storage {
    fn read(&self, path: &str) -> Result<Vec<u8>, StorageError>;
}

/// Filesystem store rooted at a build-output directory.
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsStorage { root: root.into() }
    }

    /// Keys are relative and must stay under the root.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let rel = Path::new(path);
        if rel.is_absolute() || rel.components().any(|c| matches!(c, Component::ParentDir)) {
            return None;
        }
        Some(self.root.join(rel))
    }
}

impl Storage for FsStorage {
    fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let Some(full) = self.resolve(path) else {
            return Err(StorageError::NotFound(path.to_string()));
        };
        debug!("reading page document: {}", full.display());
        match fs::read(&full) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(StorageError::Io {
                path: path.to_string(),
                source: e,
            }),
        }
    }
}
