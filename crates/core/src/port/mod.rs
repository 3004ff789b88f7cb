// Port Layer - Interfaces for external dependencies

pub mod credential;
pub mod sink;
pub mod transport;

// Re-exports
pub use credential::{CredentialError, CredentialSource, StaticCredential};
pub use sink::{ProbeSink, SinkError};
pub use transport::{ProbeTransport, RawResponse, TransportError};
