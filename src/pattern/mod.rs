/// Codec first, fixed layout second
pub mod acquisition;
/// `EMB1` binary reader
pub mod fallback;
/// Stitch events and patterns
pub mod stitch;
