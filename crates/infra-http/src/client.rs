//! Notebook server HTTP client

use async_trait::async_trait;
use nbprobe_core::domain::{AccessToken, ByteRange};
use nbprobe_core::port::{ProbeTransport, RawResponse, TransportError};
use nbprobe_core::AuthScheme;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_RANGE, RANGE};
use reqwest::{Client, RequestBuilder, Url};
use tracing::debug;

/// Query parameter carrying the token under `AuthScheme::Query`
const TOKEN_PARAM: &str = "token";

/// Notebook server client
///
/// Holds a single reusable reqwest client and attaches the access token to
/// every request. No timeout is configured beyond reqwest's defaults.
///
/// # Example
///
/// ```no_run
/// # use nbprobe_core::{domain::AccessToken, AuthScheme};
/// # use nbprobe_infra_http::NotebookHttpClient;
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = NotebookHttpClient::new(
///     "http://localhost:8888/",
///     AccessToken::new("9d2f0c7e5b1a44e8"),
///     AuthScheme::Query,
/// )?;
/// assert_eq!(client.base_url().as_str(), "http://localhost:8888/");
/// # Ok(())
/// # }
/// ```
pub struct NotebookHttpClient {
    client: Client,
    base_url: Url,
    token: AccessToken,
    auth: AuthScheme,
}

impl NotebookHttpClient {
    /// Create a client for the server at `base_url`
    ///
    /// # Arguments
    ///
    /// * `base_url` - Server root (e.g., `http://localhost:8888/`); a missing
    ///   trailing slash is added
    /// * `token` - Access token attached to every request
    /// * `auth` - Query parameter or `Authorization` header
    pub fn new(
        base_url: impl AsRef<str>,
        token: AccessToken,
        auth: AuthScheme,
    ) -> Result<Self, TransportError> {
        Self::from_client(base_url, Client::new(), token, auth)
    }

    pub fn from_client(
        base_url: impl AsRef<str>,
        client: Client,
        token: AccessToken,
        auth: AuthScheme,
    ) -> Result<Self, TransportError> {
        let base_url = parse_base_url(base_url.as_ref())?;
        Ok(Self {
            client,
            base_url,
            token,
            auth,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a route path against the base URL, adding the token query
    /// parameter when that scheme is in use
    pub fn build_url(&self, path: &str) -> Result<Url, TransportError> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", path, e)))?;

        if self.auth == AuthScheme::Query {
            url.query_pairs_mut()
                .append_pair(TOKEN_PARAM, self.token.expose());
        }

        Ok(url)
    }

    fn request(&self, path: &str, range: Option<ByteRange>) -> Result<RequestBuilder, TransportError> {
        let url = self.build_url(path)?;
        let mut request = self.client.get(url);

        if self.auth == AuthScheme::Header {
            request = request.header(AUTHORIZATION, self.auth_header()?);
        }
        if let Some(range) = range {
            request = request.header(RANGE, range.header_value());
        }

        Ok(request)
    }

    fn auth_header(&self) -> Result<HeaderValue, TransportError> {
        let mut value = HeaderValue::from_str(&format!("token {}", self.token.expose()))
            .map_err(|_| TransportError::Other("token is not a valid header value".to_string()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

#[async_trait]
impl ProbeTransport for NotebookHttpClient {
    async fn get(
        &self,
        path: &str,
        range: Option<ByteRange>,
    ) -> Result<RawResponse, TransportError> {
        let request = self.request(path, range)?;

        debug!(path = %path, range = ?range.map(|r| r.header_value()), "GET");

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let content_range = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        Ok(RawResponse {
            status,
            content_range,
            body: body.to_vec(),
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, TransportError> {
    let mut url =
        Url::parse(raw).map_err(|e| TransportError::InvalidUrl(format!("{}: {}", raw, e)))?;

    if url.cannot_be_a_base() {
        return Err(TransportError::InvalidUrl(format!("{}: not a base URL", raw)));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    // Strip the URL so the token query parameter never reaches logs
    let e = e.without_url();
    if e.is_timeout() {
        TransportError::Timeout(e.to_string())
    } else if e.is_connect() {
        TransportError::Connection(e.to_string())
    } else {
        TransportError::Other(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str, auth: AuthScheme) -> NotebookHttpClient {
        NotebookHttpClient::new(base, AccessToken::new("s3cr3t"), auth).unwrap()
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let c = client("http://localhost:8888/jupyter", AuthScheme::Query);
        assert_eq!(c.base_url().as_str(), "http://localhost:8888/jupyter/");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = NotebookHttpClient::new("not a url", AccessToken::new("t"), AuthScheme::Query)
            .err()
            .unwrap();
        assert!(matches!(err, TransportError::InvalidUrl(_)));
    }

    #[test]
    fn test_query_token_appended() {
        let c = client("http://localhost:8888/", AuthScheme::Query);
        let url = c.build_url("api/kernels").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8888/api/kernels?token=s3cr3t");
    }

    #[test]
    fn test_leading_slash_stays_under_base_path() {
        let c = client("http://localhost:8888/user/alice/", AuthScheme::Query);
        let url = c.build_url("/api/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8888/user/alice/api/?token=s3cr3t");
    }

    #[test]
    fn test_existing_query_is_kept() {
        let c = client("http://localhost:8888/", AuthScheme::Query);
        let url = c.build_url("api/contents?content=0").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8888/api/contents?content=0&token=s3cr3t"
        );
    }

    #[test]
    fn test_header_scheme_leaves_url_clean() {
        let c = client("http://localhost:8888/", AuthScheme::Header);
        let url = c.build_url("api/status").unwrap();
        assert_eq!(url.query(), None);

        let header = c.auth_header().unwrap();
        assert!(header.is_sensitive());
        assert_eq!(header.to_str().unwrap(), "token s3cr3t");
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Port 9 (discard) is not expected to have an HTTP listener
        let c = client("http://127.0.0.1:9/", AuthScheme::Query);
        let err = c.get("api/", None).await.unwrap_err();
        assert!(matches!(
            err,
            TransportError::Connection(_) | TransportError::Other(_)
        ));
    }
}
