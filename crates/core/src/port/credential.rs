// Credential Source Port

use crate::domain::AccessToken;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialError {
    /// Token file absent or unreadable; fatal before any probe runs
    #[error("Missing credential: cannot read token file {}: {source}", .path.display())]
    Missing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where the access token comes from
pub trait CredentialSource: Send + Sync {
    /// Load the token, trimmed, without further validation
    fn load(&self) -> Result<AccessToken, CredentialError>;
}

/// Token known up front (CLI flag, URL query, tests)
pub struct StaticCredential(AccessToken);

impl StaticCredential {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(AccessToken::new(raw))
    }
}

impl CredentialSource for StaticCredential {
    fn load(&self) -> Result<AccessToken, CredentialError> {
        Ok(self.0.clone())
    }
}
