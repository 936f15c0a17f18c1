//! Error types for study-core.

use thiserror::Error;

/// Result type alias using SchedulerError.
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Errors surfaced by the scheduler.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("invalid performance grade: {0:?} (expected easy, medium or hard)")]
    InvalidPerformance(String),

    #[error("record store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

impl SchedulerError {
    /// Wrap a backend error from a record store.
    pub fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store(Box::new(err))
    }
}
