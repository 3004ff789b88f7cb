// Domain Layer - Pure probe model

pub mod error;
pub mod probe;
pub mod range;
pub mod route;
pub mod token;

// Re-exports
pub use error::DomainError;
pub use probe::{Disposition, ProbeError, ProbeOutcome, ProbeResult, RangeSample};
pub use range::ByteRange;
pub use route::{default_routes, derive_label, HttpMethod, ProbeRoute, RangeProbe, API_RESOURCES};
pub use token::AccessToken;
