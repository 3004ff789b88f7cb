// Token resolution: --token, then ?token= on the URL, then the token file

use crate::endpoint::Endpoint;
use nbprobe_core::domain::AccessToken;
use nbprobe_core::port::{CredentialError, CredentialSource, StaticCredential};
use nbprobe_infra_system::FileCredentialSource;
use std::path::Path;
use tracing::info;

/// Pick the credential source for this run
///
/// Explicit and URL tokens win when non-blank; otherwise the token file is
/// read, and a missing file is fatal.
pub fn source_for(
    explicit: Option<&str>,
    endpoint: &Endpoint,
    token_file: &Path,
) -> Box<dyn CredentialSource> {
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return Box::new(StaticCredential::new(token));
    }
    if let Some(token) = &endpoint.url_token {
        return Box::new(StaticCredential::new(token));
    }
    Box::new(FileCredentialSource::new(token_file))
}

pub fn resolve(
    explicit: Option<&str>,
    endpoint: &Endpoint,
    token_file: &Path,
) -> Result<AccessToken, CredentialError> {
    let token = source_for(explicit, endpoint, token_file).load()?;
    info!(token = %token, "Using access token");
    Ok(token)
}
