// nbprobe Core - Probe Domain Logic & Ports
// NO infrastructure dependencies (Hexagonal Architecture)

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;

pub use config::{AuthScheme, ProbeConfig};
pub use error::{AppError, Result};
