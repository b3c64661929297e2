//! Error types for OneDrive provider

use bridge_traits::error::BridgeError;
use thiserror::Error;

/// OneDrive provider errors
#[derive(Error, Debug)]
pub enum OneDriveError {
    /// Graph API returned a non-success status
    #[error("OneDrive API error (status {status_code}): {message}")]
    ApiError { status_code: u16, message: String },

    /// No usable access token, or the API rejected it
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Graph API throttled the request
    #[error("Throttled, retry after {retry_after_seconds} seconds")]
    Throttled { retry_after_seconds: u64 },

    /// Failed to parse API response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Bridge error (transport, host capability)
    #[error(transparent)]
    BridgeError(#[from] BridgeError),
}

/// Result type for OneDrive operations
pub type Result<T> = std::result::Result<T, OneDriveError>;

impl OneDriveError {
    /// HTTP status behind this error, if the API produced one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            OneDriveError::ApiError { status_code, .. } => Some(*status_code),
            OneDriveError::Throttled { .. } => Some(429),
            _ => None,
        }
    }
}

impl From<OneDriveError> for BridgeError {
    fn from(error: OneDriveError) -> Self {
        match error {
            OneDriveError::ApiError {
                status_code,
                message,
            } => BridgeError::OperationFailed(format!(
                "API error (status {}): {}",
                status_code, message
            )),
            OneDriveError::AuthenticationFailed(msg) => {
                BridgeError::OperationFailed(format!("Authentication failed: {}", msg))
            }
            OneDriveError::Throttled {
                retry_after_seconds,
            } => BridgeError::OperationFailed(format!(
                "Throttled, retry after {} seconds",
                retry_after_seconds
            )),
            OneDriveError::ParseError(msg) => {
                BridgeError::OperationFailed(format!("Parse error: {}", msg))
            }
            OneDriveError::BridgeError(e) => e,
        }
    }
}
