// Probe Route Domain Model

use super::range::ByteRange;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used when a route has no path segments left after filtering
const ROOT_LABEL: &str = "__root";

/// Separator placed between path segments in a label
const SEGMENT_SEPARATOR: &str = "__";

/// Resource names probed under `api/`, in probe order
pub const API_RESOURCES: [&str; 7] = [
    "sessions",
    "kernels",
    "contents",
    "terminals",
    "kernelspecs",
    "status",
    "me",
];

/// HTTP method of a probe (GET only, probes never mutate the server)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HttpMethod {
    #[default]
    Get,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
        }
    }
}

/// One API route to probe
///
/// `path` is relative to the server base URL (`api/kernels`, not
/// `/api/kernels`); a leading slash is tolerated and stripped when the
/// request URL is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeRoute {
    #[serde(default)]
    pub method: HttpMethod,
    pub path: String,
    /// Explicit output label, overriding the derived one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ProbeRoute {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Path without any leading slash
    pub fn relative_path(&self) -> &str {
        self.path.trim_start_matches('/')
    }

    /// Filesystem-safe name for this probe's output
    pub fn label(&self) -> String {
        match &self.label {
            Some(label) => sanitize_segment(label),
            None => derive_label(self.method, &self.path),
        }
    }
}

/// Derive a filesystem-safe label from method and route path
///
/// Empty and `api` segments are dropped, the rest are sanitized and joined
/// with `__`:
/// - `api/` -> `[GET]__root`
/// - `lab/api/workspaces` -> `[GET]lab__workspaces`
/// - `api/kernels` -> `[GET]kernels`
pub fn derive_label(method: HttpMethod, path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<String> = path
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != "api")
        .map(sanitize_segment)
        .collect();

    let body = if segments.is_empty() {
        ROOT_LABEL.to_string()
    } else {
        segments.join(SEGMENT_SEPARATOR)
    };

    format!("[{}]{}", method, body)
}

fn sanitize_segment(segment: &str) -> String {
    segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Default ordered probe list: server root, lab workspaces, then each API resource
pub fn default_routes() -> Vec<ProbeRoute> {
    let mut routes = vec![ProbeRoute::get("api/"), ProbeRoute::get("lab/api/workspaces")];
    routes.extend(
        API_RESOURCES
            .iter()
            .map(|name| ProbeRoute::get(format!("api/{}", name))),
    );
    routes
}

/// Static file fetched with a `Range` header for inspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeProbe {
    pub path: String,
    pub range: ByteRange,
}

impl RangeProbe {
    pub fn new(path: impl Into<String>, range: ByteRange) -> Self {
        Self {
            path: path.into(),
            range,
        }
    }

    pub fn relative_path(&self) -> &str {
        self.path.trim_start_matches('/')
    }
}

impl Default for RangeProbe {
    fn default() -> Self {
        Self {
            path: "files/hello.txt".to_string(),
            range: ByteRange::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_label() {
        assert_eq!(derive_label(HttpMethod::Get, "api/"), "[GET]__root");
        assert_eq!(derive_label(HttpMethod::Get, "/api/"), "[GET]__root");
        assert_eq!(derive_label(HttpMethod::Get, ""), "[GET]__root");
    }

    #[test]
    fn test_nested_label_drops_api_segments() {
        assert_eq!(
            derive_label(HttpMethod::Get, "lab/api/workspaces"),
            "[GET]lab__workspaces"
        );
        assert_eq!(derive_label(HttpMethod::Get, "api/kernels"), "[GET]kernels");
    }

    #[test]
    fn test_label_sanitizes_unsafe_characters() {
        assert_eq!(
            derive_label(HttpMethod::Get, "api/contents/my notebook:1.ipynb"),
            "[GET]contents__my_notebook_1.ipynb"
        );
        assert_eq!(derive_label(HttpMethod::Get, "api/contents?type=file"), "[GET]contents");
        assert_eq!(derive_label(HttpMethod::Get, "api/contents/a[1]"), "[GET]contents__a_1_");
    }

    #[test]
    fn test_explicit_label_is_sanitized() {
        let route = ProbeRoute::get("api/status").with_label("server/status");
        assert_eq!(route.label(), "server_status");

        let route = ProbeRoute::get("api/status").with_label("[GET]status");
        assert_eq!(route.label(), "_GET_status");
    }

    #[test]
    fn test_default_routes_order() {
        let labels: Vec<String> = default_routes().iter().map(ProbeRoute::label).collect();
        assert_eq!(
            labels,
            vec![
                "[GET]__root",
                "[GET]lab__workspaces",
                "[GET]sessions",
                "[GET]kernels",
                "[GET]contents",
                "[GET]terminals",
                "[GET]kernelspecs",
                "[GET]status",
                "[GET]me",
            ]
        );
    }

    #[test]
    fn test_route_deserializes_with_default_method() {
        let route: ProbeRoute = serde_json::from_str(r#"{"path": "api/kernels"}"#).unwrap();
        assert_eq!(route, ProbeRoute::get("api/kernels"));
    }

    #[test]
    fn test_default_range_probe() {
        let probe = RangeProbe::default();
        assert_eq!(probe.relative_path(), "files/hello.txt");
        assert_eq!(probe.range.header_value(), "bytes=0-1");
    }
}
