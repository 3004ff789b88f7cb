// Probe Configuration
// Replaces module-level globals with one explicit struct

use crate::domain::{default_routes, ProbeRoute, RangeProbe};
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8888/";
pub const DEFAULT_TOKEN_FILE: &str = ".secret";
pub const DEFAULT_OUTPUT_DIR: &str = "samples";

/// How the access token is attached to requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    /// `?token=<value>` on every request
    #[default]
    Query,
    /// `Authorization: token <value>` on every request
    Header,
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthScheme::Query => write!(f, "query"),
            AuthScheme::Header => write!(f, "header"),
        }
    }
}

impl FromStr for AuthScheme {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "query" => Ok(AuthScheme::Query),
            "header" => Ok(AuthScheme::Header),
            other => Err(AppError::Config(format!(
                "unknown auth scheme '{}', expected 'query' or 'header'",
                other
            ))),
        }
    }
}

/// Everything a probe run needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Server base URL; request paths are resolved against it
    pub base_url: String,
    pub token_file: PathBuf,
    pub output_dir: PathBuf,
    pub auth: AuthScheme,
    /// Probed in order
    pub routes: Vec<ProbeRoute>,
    /// `None` disables the byte-range diagnostic
    pub range_probe: Option<RangeProbe>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            auth: AuthScheme::default(),
            routes: default_routes(),
            range_probe: Some(RangeProbe::default()),
        }
    }
}

impl ProbeConfig {
    /// Check the fields the run cannot start without
    pub fn validate(&self) -> Result<()> {
        let scheme_ok =
            self.base_url.starts_with("http://") || self.base_url.starts_with("https://");
        if !scheme_ok {
            return Err(AppError::Config(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(AppError::Config("output_dir must not be empty".to_string()));
        }

        if let Some(route) = self.routes.iter().find(|r| r.path.contains("://")) {
            return Err(AppError::Config(format!(
                "route '{}' must be relative to base_url",
                route.path
            )));
        }

        // One file per route: two routes sharing a label would overwrite each other
        let mut labels = HashSet::new();
        for route in &self.routes {
            let label = route.label();
            if !labels.insert(label.clone()) {
                return Err(AppError::Config(format!(
                    "route '{}' reuses output label '{}'",
                    route.path, label
                )));
            }
        }

        Ok(())
    }
}
