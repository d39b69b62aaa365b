//! Embroidery file conversion bot
//!
//! Reads an uploaded design through a pluggable codec (falling back to the
//! fixed `EMB1` layout), exports it to every compatible format, renders a
//! colored stitch preview, and delivers everything as one zip archive over a
//! pluggable chat transport.

#![forbid(unsafe_code)]

/// Deflate archive assembly for conversion outputs
pub mod archive;
/// Codec seam, target format selection and batch export
pub mod export;
/// Command-line front end, configuration, errors, logging and progress
pub mod io;
/// Stitch model, fixed-layout reader and acquisition
pub mod pattern;
/// Stitch segmentation and preview rasterization
pub mod preview;
/// Request handling, conversion pipeline, transport seam and liveness
pub mod service;

pub use io::error::{ConverterError, DecodeError, Result};
