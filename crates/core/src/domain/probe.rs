// Probe Result Domain Model

use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Outcome of classifying one HTTP response
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeResult {
    /// Success status with a parseable JSON body
    Json(Value),
    /// Success status, but the body is not JSON
    MalformedJson { error: String },
    /// Status outside the 2xx range
    UnsuccessfulStatus { status: u16 },
}

impl ProbeResult {
    /// Classify a raw response
    ///
    /// Only 2xx bodies are parsed; anything else is reported by status alone.
    pub fn classify(status: u16, body: &[u8]) -> Self {
        if !(200..300).contains(&status) {
            return ProbeResult::UnsuccessfulStatus { status };
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(value) => ProbeResult::Json(value),
            Err(e) => ProbeResult::MalformedJson {
                error: e.to_string(),
            },
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, ProbeResult::Json(_))
    }
}

/// Per-probe failure (non-fatal, the remaining probes still run)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("{label}: JSON decode error: {message}")]
    MalformedResponse { label: String, message: String },

    #[error("{label}: Error: {status}")]
    UnsuccessfulStatus { label: String, status: u16 },

    #[error("{label}: failed to save response: {message}")]
    Persist { label: String, message: String },
}

impl ProbeError {
    pub fn label(&self) -> &str {
        match self {
            ProbeError::MalformedResponse { label, .. }
            | ProbeError::UnsuccessfulStatus { label, .. }
            | ProbeError::Persist { label, .. } => label,
        }
    }
}

/// What happened to one probe after its result was consumed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    Saved(PathBuf),
    Failed(ProbeError),
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disposition::Saved(path) => write!(f, "saved {}", path.display()),
            Disposition::Failed(ProbeError::MalformedResponse { message, .. }) => {
                write!(f, "JSON decode error: {}", message)
            }
            Disposition::Failed(ProbeError::UnsuccessfulStatus { status, .. }) => {
                write!(f, "HTTP {}", status)
            }
            Disposition::Failed(ProbeError::Persist { message, .. }) => {
                write!(f, "save failed: {}", message)
            }
        }
    }
}

/// Per-route record returned by the probe driver, in route order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub label: String,
    pub disposition: Disposition,
}

impl ProbeOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self.disposition, Disposition::Saved(_))
    }

    pub fn error(&self) -> Option<&ProbeError> {
        match &self.disposition {
            Disposition::Failed(e) => Some(e),
            Disposition::Saved(_) => None,
        }
    }
}

/// Response to a byte-range probe, surfaced for inspection only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSample {
    pub status: u16,
    pub content_range: Option<String>,
    pub body: String,
}

impl RangeSample {
    /// `206 Partial Content`, i.e. the server honored the range
    pub fn is_partial(&self) -> bool {
        self.status == 206
    }
}
