//! Error types for HotelDB
//!
//! Provides a unified error type for all table operations.

use thiserror::Error;

/// Result type alias using HotelError
pub type Result<T> = std::result::Result<T, HotelError>;

/// Unified error type for HotelDB operations
#[derive(Debug, Error)]
pub enum HotelError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Table Errors
    // -------------------------------------------------------------------------
    #[error("Record with ID {0} already exists")]
    DuplicateKey(i32),

    #[error("Record with ID {0} not found")]
    NotFound(i32),

    #[error("Memory allocation failed")]
    AllocationFailure,

    // -------------------------------------------------------------------------
    // Persistence Errors
    // -------------------------------------------------------------------------
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Snapshot writer is no longer running")]
    WriterClosed,

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl HotelError {
    /// Whether this error leaves the table untouched and is safe to report and retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            HotelError::DuplicateKey(_)
                | HotelError::NotFound(_)
                | HotelError::InvalidInput(_)
                | HotelError::UnknownTable(_)
        )
    }
}

impl From<std::collections::TryReserveError> for HotelError {
    fn from(_: std::collections::TryReserveError) -> Self {
        HotelError::AllocationFailure
    }
}
