/// Chat request handling
pub mod handler;
/// Liveness HTTP endpoint
pub mod health;
/// Single-request conversion pipeline
pub mod pipeline;
/// Chat transport trait and message types
pub mod transport;
