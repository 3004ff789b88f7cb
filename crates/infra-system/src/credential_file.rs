// Token file credential source
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use nbprobe_core::domain::AccessToken;
use nbprobe_core::port::{CredentialError, CredentialSource};

/// Reads the access token the notebook server wrote at launch
///
/// The whole file is read as text and trimmed. An empty token is passed
/// through; the server rejects it on first use.
pub struct FileCredentialSource {
    path: PathBuf,
}

impl FileCredentialSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialSource for FileCredentialSource {
    fn load(&self) -> Result<AccessToken, CredentialError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| CredentialError::Missing {
            path: self.path.clone(),
            source,
        })?;

        let token = AccessToken::new(contents);
        debug!(path = %self.path.display(), token = %token, "Token loaded");

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_round_trip_trims_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".secret");
        fs::write(&path, "  9d2f0c7e5b1a44e8\n\n").unwrap();

        let token = FileCredentialSource::new(&path).load().unwrap();
        assert_eq!(token.expose(), "9d2f0c7e5b1a44e8");
    }

    #[test]
    fn test_exact_content_without_whitespace() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "abc123").unwrap();

        let token = FileCredentialSource::new(file.path()).load().unwrap();
        assert_eq!(token.expose(), "abc123");
    }

    #[test]
    fn test_empty_file_passes_through() {
        let file = tempfile::NamedTempFile::new().unwrap();

        let token = FileCredentialSource::new(file.path()).load().unwrap();
        assert!(token.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist");

        let err = FileCredentialSource::new(&path).load().unwrap_err();
        match &err {
            CredentialError::Missing { path: reported, source } => {
                assert_eq!(reported, &path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
        }
        assert!(err.to_string().contains("does-not-exist"));
    }

    #[test]
    fn test_directory_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileCredentialSource::new(dir.path()).load().is_err());
    }
}
