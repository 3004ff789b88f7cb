// Application Layer - Use Cases

pub mod probe_runner;

// Re-exports
pub use probe_runner::{probe, ProbeRunner, RunReport};
