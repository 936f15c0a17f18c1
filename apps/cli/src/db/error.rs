//! Database error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("unsupported schema version {found} (expected {expected})")]
    SchemaVersion { found: i32, expected: i32 },
}
