//! Primary-then-fallback pattern acquisition

use crate::export::codec::Codec;
use crate::io::error::DecodeError;
use crate::pattern::fallback::decode_fallback;
use crate::pattern::stitch::StitchPattern;
use tracing::{debug, warn};

/// Obtain a stitch pattern from raw bytes
///
/// The codec is tried first. Only when it reports a failure, or yields a
/// pattern without stitches, is the `EMB1` reader attempted.
///
/// # Errors
///
/// Returns [`DecodeError::Exhausted`] carrying both failures when neither
/// path produces a pattern
pub fn acquire<C: Codec + ?Sized>(
    codec: &C,
    bytes: &[u8],
    extension: &str,
) -> Result<StitchPattern, DecodeError> {
    let primary = match codec.decode(bytes, extension) {
        Ok(pattern) if !pattern.is_empty() => {
            debug!(extension, stitches = pattern.len(), "Codec decoded pattern");
            return Ok(pattern);
        }
        Ok(_) => DecodeError::EmptyPattern,
        Err(error) => error,
    };

    warn!(extension, error = %primary, "Codec failed, trying fixed-layout reader");

    decode_fallback(bytes)
        .inspect(|pattern| debug!(stitches = pattern.len(), "Fallback decoded pattern"))
        .map_err(|fallback| DecodeError::Exhausted {
            primary: Box::new(primary),
            fallback: Box::new(fallback),
        })
}
