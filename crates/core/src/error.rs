// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
///
/// Raised while settling the run's configuration, before any request.
/// Per-probe failures are `domain::ProbeError` and never surface as `AppError`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
