//! nbprobe HTTP adapter
//!
//! Token-authenticated reqwest client for a notebook server's REST API,
//! implementing [`nbprobe_core::port::ProbeTransport`].
//!
//! # Example
//!
//! ```no_run
//! use nbprobe_core::domain::AccessToken;
//! use nbprobe_core::port::ProbeTransport;
//! use nbprobe_core::AuthScheme;
//! use nbprobe_infra_http::NotebookHttpClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let token = AccessToken::new("9d2f0c7e5b1a44e8");
//!     let client = NotebookHttpClient::new("http://localhost:8888/", token, AuthScheme::Query)?;
//!
//!     let response = client.get("api/status", None).await?;
//!     println!("status: {}", response.status);
//!
//!     Ok(())
//! }
//! ```

mod client;

pub use client::NotebookHttpClient;
