//! Error types for the momentum tracker.
//!
//! The variants mirror how a failure propagates through an update cycle:
//! per-symbol problems are absorbed and surface only as missing ranks, while
//! the whole-cycle failures below abort before anything is persisted.

use thiserror::Error;

/// The main error type for momentum tracker operations.
#[derive(Debug, Error)]
pub enum MomoError {
    /// The price provider failed or returned no usable prices.
    ///
    /// The cycle aborts and the history store is left untouched.
    #[error("Price provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Not enough price history for the requested computation.
    #[error("Insufficient history: {0}")]
    InsufficientHistory(String),

    /// The durable history file could not be read or is malformed.
    ///
    /// Fatal. The file is never rewritten after this error.
    #[error("History store corrupt: {0}")]
    StoreCorrupt(String),

    /// Another update cycle currently holds the history store.
    #[error("History store is locked by another cycle: {0}")]
    Locked(String),

    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error when a date is out of range or invalid.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Error in the tracker configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MomoError {
    /// Whether the error means the cycle could not obtain prices.
    #[must_use]
    pub const fn is_provider_unavailable(&self) -> bool {
        matches!(self, Self::ProviderUnavailable(_))
    }
}

/// A specialized Result type for momentum tracker operations.
pub type Result<T> = std::result::Result<T, MomoError>;
