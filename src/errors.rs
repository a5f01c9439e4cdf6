use thiserror::Error;

use crate::client::transport::TransportError;
use crate::form::validate::ValidationError;

/// Error type for crate-level failures: configuration, HTTP client and
/// runtime setup.
#[derive(Debug, Error)]
pub enum ChurnError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Runtime error: {0}")]
    Runtime(String),
    #[error("Input error: {0}")]
    Input(String),
}

/// Reasons a submission stops before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("submission cancelled")]
    Aborted,
}
