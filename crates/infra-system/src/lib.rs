// nbprobe Infrastructure - Filesystem Adapters
// Implements: CredentialSource, ProbeSink

pub mod credential_file;
pub mod json_file_sink;

pub use credential_file::FileCredentialSource;
pub use json_file_sink::JsonFileSink;
