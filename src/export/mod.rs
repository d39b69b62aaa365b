//! Everything between an acquired pattern and files on disk

/// Encoder fan-out with per-format failure isolation
pub mod batch;
/// Trait seam to the external codec library
pub mod codec;
/// Denylist handling and deterministic target selection
pub mod formats;
