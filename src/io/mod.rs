/// Command-line parsing and inbox processing
pub mod cli;
/// Constants shared across the crate
pub mod configuration;
/// Error types and path context
pub mod error;
/// tracing-subscriber setup
pub mod logging;
/// Directory-backed chat transport
pub mod mailbox;
/// Batch progress display
pub mod progress;
