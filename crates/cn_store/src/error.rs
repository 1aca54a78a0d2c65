use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    /// Surfaced by the caller when a backend operation exceeds its deadline;
    /// the store itself never blocks indefinitely on behalf of a caller.
    #[error("Store operation timed out")]
    Timeout,

    #[error("Migration error: {0}")]
    Migration(String),
}
