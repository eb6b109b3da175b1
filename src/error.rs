use crate::storage::StorageError;

/// Failures surfaced by the indexing pipeline.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("storage root is not configured (set FJSON_STORAGE_ROOT or pass --storage)")]
    StorageNotConfigured,

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("malformed page document {path}: {reason}")]
    Malformed { path: String, reason: String },
}

impl IndexError {
    /// Per-page failures a batch run skips instead of aborting on.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            IndexError::Malformed { .. } | IndexError::Storage(StorageError::NotFound(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skippable_classification() {
        assert!(IndexError::Malformed {
            path: "a.fjson".into(),
            reason: "bad".into()
        }
        .is_skippable());
        assert!(IndexError::Storage(StorageError::NotFound("a.fjson".into())).is_skippable());
        assert!(!IndexError::StorageNotConfigured.is_skippable());
        assert!(!IndexError::Storage(StorageError::Io {
            path: "a.fjson".into(),
            source: std::io::Error::other("disk"),
        })
        .is_skippable());
    }
}
