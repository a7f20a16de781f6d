//! Application-wide error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("credential resolution failed: {0}")]
    Resolve(String),

    #[error("artifact error: {0}")]
    Artifact(String),

    #[error("client error: {0}")]
    Client(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
