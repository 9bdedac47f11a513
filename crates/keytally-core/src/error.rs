//! Error types for the tally store and key sources.

use std::path::PathBuf;

/// Failure while writing the tally to disk.
///
/// Loading never produces a `StoreError`; an unreadable file is reported as a
/// [`LoadOutcome`](crate::store::LoadOutcome) and the store starts empty.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to {operation} {}: {source}", path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize tally: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io { operation, path: path.into(), source }
    }
}

/// Failure reported by a [`KeySource`](crate::source::KeySource) while
/// waiting for the next event.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("key source I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("key source produced an unusable event: {0}")]
    Malformed(String),
}
