//! Year progress error types.

use crate::services::SyncState;
use thiserror::Error;

/// Errors that can occur while preparing year progress data.
#[derive(Debug, Error)]
pub enum YearProgressError {
    /// Activity history is not fully synchronized yet.
    #[error("Not synced. Sync state is: {0}")]
    NotSynchronized(SyncState),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A stored preference could not be parsed.
    #[error("Malformed preference '{key}': {reason}")]
    MalformedPreference { key: String, reason: String },

    /// Preference or preset storage failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A data provider failed.
    #[error("Provider error: {0}")]
    Provider(String),
}

/// Result type for year progress operations.
pub type YearProgressResult<T> = Result<T, YearProgressError>;
