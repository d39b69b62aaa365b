//! Seam to the external embroidery codec library

use crate::io::error::{ConverterError, DecodeError, Result};
use crate::pattern::stitch::StitchPattern;

/// Multi-format embroidery reader and writer
///
/// Implementations wrap a codec library. The conversion pipeline only ever
/// talks to the library through this trait.
pub trait Codec {
    /// Read a pattern from raw file bytes
    ///
    /// `extension` is the lowercase source extension without the dot.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] when the bytes cannot be read as `extension`
    fn decode(&self, bytes: &[u8], extension: &str) -> std::result::Result<StitchPattern, DecodeError>;

    /// Write `pattern` in the format named by `extension`
    ///
    /// # Errors
    ///
    /// Returns [`ConverterError::Encode`] when the encoder fails
    fn encode(&self, pattern: &StitchPattern, extension: &str) -> Result<Vec<u8>>;

    /// Extensions the library can write, in no particular order
    fn supported_extensions(&self) -> Vec<String>;
}

/// Codec used when no codec library is linked
///
/// Every decode falls through to the fixed-layout reader and no export
/// format is offered, so requests produce a preview-only archive.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableCodec;

impl Codec for UnavailableCodec {
    fn decode(&self, _bytes: &[u8], extension: &str) -> std::result::Result<StitchPattern, DecodeError> {
        Err(DecodeError::Unsupported {
            extension: extension.to_string(),
        })
    }

    fn encode(&self, _pattern: &StitchPattern, extension: &str) -> Result<Vec<u8>> {
        Err(ConverterError::Encode {
            extension: extension.to_string(),
            reason: "no codec library available".to_string(),
        })
    }

    fn supported_extensions(&self) -> Vec<String> {
        Vec::new()
    }
}

impl<C: Codec + ?Sized> Codec for &C {
    fn decode(&self, bytes: &[u8], extension: &str) -> std::result::Result<StitchPattern, DecodeError> {
        (**self).decode(bytes, extension)
    }

    fn encode(&self, pattern: &StitchPattern, extension: &str) -> Result<Vec<u8>> {
        (**self).encode(pattern, extension)
    }

    fn supported_extensions(&self) -> Vec<String> {
        (**self).supported_extensions()
    }
}
