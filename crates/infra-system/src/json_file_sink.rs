// JSON file sink
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use nbprobe_core::port::{ProbeSink, SinkError};

/// Writes each payload to `{dir}/{label}.json`
///
/// Output is pretty-printed with 2-space indentation and no trailing newline,
/// so the same payload always produces the same bytes.
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output path for a label
    pub fn path_for(&self, label: &str) -> PathBuf {
        self.dir.join(format!("{}.json", label))
    }
}

impl ProbeSink for JsonFileSink {
    fn persist(&self, label: &str, payload: &Value) -> Result<PathBuf, SinkError> {
        fs::create_dir_all(&self.dir).map_err(|source| SinkError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.path_for(label);
        let rendered = serde_json::to_string_pretty(payload)?;
        fs::write(&path, rendered.as_bytes()).map_err(|source| SinkError::Io {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), bytes = rendered.len(), "Payload written");

        Ok(path)
    }
}
