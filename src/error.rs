use std::io;

use thiserror::Error;

/// Failure reading or writing persisted scores or settings.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("stored data is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure emitting a sound.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio output unavailable: {0}")]
    Output(#[from] io::Error),
}

/// Top-level error for the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
