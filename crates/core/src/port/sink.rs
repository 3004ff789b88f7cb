// Probe Sink Port
// Persistence of successfully parsed probe payloads

use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Destination for parsed probe payloads
pub trait ProbeSink: Send + Sync {
    /// Persist `payload` under `label`, replacing any earlier output
    ///
    /// # Returns
    /// Location the payload was written to
    fn persist(&self, label: &str, payload: &Value) -> Result<PathBuf, SinkError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// Sink keeping payloads in memory, in write order
    #[derive(Default)]
    pub struct MemorySink {
        written: Mutex<Vec<(String, Value)>>,
        reject: Option<String>,
    }

    impl MemorySink {
        pub fn new() -> Self {
            Self::default()
        }

        /// Fail every write for `label`
        pub fn rejecting(label: impl Into<String>) -> Self {
            Self {
                written: Mutex::default(),
                reject: Some(label.into()),
            }
        }

        pub fn written(&self) -> Vec<(String, Value)> {
            self.written.lock().unwrap().clone()
        }

        pub fn labels(&self) -> Vec<String> {
            self.written().into_iter().map(|(label, _)| label).collect()
        }
    }

    impl ProbeSink for MemorySink {
        fn persist(&self, label: &str, payload: &Value) -> Result<PathBuf, SinkError> {
            let path = PathBuf::from(format!("memory/{}.json", label));
            if self.reject.as_deref() == Some(label) {
                return Err(SinkError::Io {
                    path,
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                });
            }
            self.written
                .lock()
                .unwrap()
                .push((label.to_string(), payload.clone()));
            Ok(path)
        }
    }
}
