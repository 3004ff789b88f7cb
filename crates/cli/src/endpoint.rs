// Endpoint normalization
// Accepts whatever URL the user copied from the browser or server log

use reqwest::Url;

/// Front-end routes that never belong to the API base path
const FRONTEND_ROUTES: [&str; 6] = ["lab", "tree", "notebooks", "voila", "retro", "console"];

/// Normalized server base URL plus any token found in its query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub base_url: Url,
    pub url_token: Option<String>,
}

impl Endpoint {
    /// Parse and normalize a server URL
    ///
    /// - `?token=` is extracted and the query string dropped
    /// - path segments from the first front-end route onward are dropped
    /// - the base path always ends with `/`
    ///
    /// `http://host:8888/user/a/lab/tree/x.ipynb?token=t` becomes
    /// `http://host:8888/user/a/` with token `t`.
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let url = Url::parse(raw).map_err(|e| anyhow::anyhow!("invalid server URL '{}': {}", raw, e))?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            anyhow::bail!("invalid server URL '{}': not an http(s) base URL", raw);
        }

        let url_token = extract_token(&url);

        let mut base_url = url.clone();
        base_url.set_query(None);
        base_url.set_fragment(None);
        base_url.set_path(&base_path(url.path()));

        Ok(Self {
            base_url,
            url_token,
        })
    }
}

fn extract_token(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.trim().to_string())
        .filter(|token| !token.is_empty())
}

fn base_path(path: &str) -> String {
    let kept: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .take_while(|segment| !FRONTEND_ROUTES.contains(segment))
        .collect();

    if kept.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", kept.join("/"))
    }
}
