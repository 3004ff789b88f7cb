// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid byte range: {0}")]
    InvalidRange(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
