//! Error types for the overlay system.

use thiserror::Error;

/// Result type for overlay operations
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Errors that can occur in overlay operations
#[derive(Error, Debug)]
pub enum OverlayError {
    /// Settings backend failed to read or write the saved UI state
    #[error("Settings store failed: {reason}")]
    Settings { reason: String },

    /// Underlying IO error from a file-backed settings store
    #[error("IO operation failed")]
    Io(#[from] std::io::Error),
}

impl OverlayError {
    /// Create a settings store error
    pub fn settings(reason: impl Into<String>) -> Self {
        OverlayError::Settings {
            reason: reason.into(),
        }
    }
}
