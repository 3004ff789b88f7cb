// HTTP Transport Port
// Abstraction over the authenticated client talking to the notebook server

use crate::domain::ByteRange;
use async_trait::async_trait;
use thiserror::Error;

/// Response as received, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// `Content-Range` header, when the server sent one
    pub content_range: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_range: None,
            body: body.into(),
        }
    }
}

/// Transport-level failures (connection refused, timeout, bad URL)
///
/// The server is expected to be running before probing starts, so these are
/// fatal to the whole run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Transport error: {0}")]
    Other(String),
}

/// Probe transport trait
///
/// Implementations attach the access token to every request.
///
/// Implementations:
/// - NotebookHttpClient: reqwest client (nbprobe-infra-http)
/// - mocks::StaticTransport: canned responses for tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProbeTransport: Send + Sync {
    /// Issue one GET for `path` (relative to the base URL)
    ///
    /// # Arguments
    /// * `path` - Route path without leading slash (e.g. `api/kernels`)
    /// * `range` - Optional byte range sent as a `Range` header
    ///
    /// # Errors
    /// Only transport failures; any HTTP status is returned as `Ok`.
    async fn get(&self, path: &str, range: Option<ByteRange>)
        -> Result<RawResponse, TransportError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Transport answering from a fixed path -> response table
    ///
    /// Unknown paths get `404`. Every request path is recorded in order.
    #[derive(Default)]
    pub struct StaticTransport {
        responses: HashMap<String, RawResponse>,
        unreachable: Option<String>,
        requests: Mutex<Vec<String>>,
    }

    impl StaticTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_response(mut self, path: impl Into<String>, response: RawResponse) -> Self {
            self.responses.insert(path.into(), response);
            self
        }

        pub fn with_json(self, path: impl Into<String>, body: &serde_json::Value) -> Self {
            self.with_response(path, RawResponse::new(200, body.to_string()))
        }

        /// Fail with a connection error when `path` is requested
        pub fn unreachable_at(mut self, path: impl Into<String>) -> Self {
            self.unreachable = Some(path.into());
            self
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProbeTransport for StaticTransport {
        async fn get(
            &self,
            path: &str,
            _range: Option<ByteRange>,
        ) -> Result<RawResponse, TransportError> {
            self.requests.lock().unwrap().push(path.to_string());

            if self.unreachable.as_deref() == Some(path) {
                return Err(TransportError::Connection(format!(
                    "connection refused: {}",
                    path
                )));
            }

            Ok(self
                .responses
                .get(path)
                .cloned()
                .unwrap_or_else(|| RawResponse::new(404, r#"{"message": "Not Found"}"#)))
        }
    }
}
