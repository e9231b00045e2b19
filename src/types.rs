//! Shared error types for the portal API

use thiserror::Error;

/// Top-level error type for the portal API
#[derive(Debug, Error)]
pub enum PortalError {
    /// Document store (MongoDB) failure - fatal for the request
    #[error("database error: {0}")]
    Database(String),

    /// Challenge ledger (SQLite) failure - recovered with an empty contribution
    #[error("challenge ledger error: {0}")]
    Ledger(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PortalError>;
