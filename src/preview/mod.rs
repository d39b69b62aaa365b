//! Stitch preview rendering

/// Plot geometry, markers and bitmap text
pub mod canvas;
/// Full preview composition and PNG output
pub mod render;
/// Color-block segmentation
pub mod segments;
