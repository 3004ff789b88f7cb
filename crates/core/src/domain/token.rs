// Access Token Domain Model

use std::fmt;

/// Number of leading characters left visible when a token is displayed
const VISIBLE_PREFIX: usize = 4;

/// Opaque bearer credential issued by the notebook server on each launch
///
/// Built by trimming surrounding whitespace from raw text. No other
/// validation happens here; a bad token is rejected by the server on first use.
/// `Display` and `Debug` only show the first four characters.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    /// Full token value, for attaching to requests
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Token with everything after the first few characters replaced by `****`
    pub fn masked(&self) -> String {
        let prefix: String = self.0.chars().take(VISIBLE_PREFIX).collect();
        format!("{prefix}****")
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&self.masked()).finish()
    }
}
