// Byte Range Domain Model

use super::error::{DomainError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Inclusive byte range, as used by the HTTP `Range` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    start: u64,
    end: u64,
}

impl ByteRange {
    /// Create an inclusive range `start..=end`
    pub fn new(start: u64, end: u64) -> Result<Self> {
        if end < start {
            return Err(DomainError::InvalidRange(format!(
                "end {} is before start {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// Range covering the first `len` bytes of a resource
    ///
    /// `ByteRange::first(2)` is `bytes=0-1`.
    pub fn first(len: u64) -> Result<Self> {
        if len == 0 {
            return Err(DomainError::InvalidRange(
                "length must be at least 1".to_string(),
            ));
        }
        Self::new(0, len - 1)
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Number of bytes covered
    pub fn byte_count(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Value for the `Range` request header
    pub fn header_value(&self) -> String {
        format!("bytes={}-{}", self.start, self.end)
    }
}

impl Default for ByteRange {
    /// First two bytes (`bytes=0-1`)
    fn default() -> Self {
        Self { start: 0, end: 1 }
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for ByteRange {
    type Err = DomainError;

    /// Accepts `start-end` with an optional `bytes=` prefix
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let text = text.strip_prefix("bytes=").unwrap_or(text);

        let (start, end) = text
            .split_once('-')
            .ok_or_else(|| DomainError::InvalidRange(format!("expected start-end, got '{}'", s)))?;

        let parse = |part: &str| {
            part.trim()
                .parse::<u64>()
                .map_err(|_| DomainError::InvalidRange(format!("'{}' is not a byte offset", part)))
        };

        Self::new(parse(start)?, parse(end)?)
    }
}

impl Serialize for ByteRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ByteRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
