//! Reader for the fixed `EMB1` binary layout
//!
//! ```text
//! bytes 0..4   magic "EMB1"
//! bytes 4..8   u32 LE stitch count N
//! N x 4 bytes  i16 LE x, i16 LE y
//! ```

use crate::io::configuration::{FALLBACK_HEADER_LEN, FALLBACK_MAGIC, FALLBACK_RECORD_LEN};
use crate::io::error::DecodeError;
use crate::pattern::stitch::StitchPattern;

/// Decode an `EMB1` buffer into untagged absolute stitches
///
/// Bytes past the declared records are ignored.
///
/// # Errors
///
/// Returns an error if:
/// - The buffer does not start with the `EMB1` magic
/// - The header is shorter than eight bytes
/// - Fewer complete records follow than the header declares
pub fn decode_fallback(bytes: &[u8]) -> Result<StitchPattern, DecodeError> {
    let magic = bytes.get(..FALLBACK_MAGIC.len()).unwrap_or(bytes);
    if magic != FALLBACK_MAGIC {
        return Err(DecodeError::BadMagic {
            found: magic.to_vec(),
        });
    }

    let count_bytes: [u8; 4] = bytes
        .get(FALLBACK_MAGIC.len()..FALLBACK_HEADER_LEN)
        .and_then(|slice| slice.try_into().ok())
        .ok_or(DecodeError::TruncatedHeader {
            length: bytes.len(),
        })?;
    let declared = u32::from_le_bytes(count_bytes);

    let body = bytes.get(FALLBACK_HEADER_LEN..).unwrap_or_default();
    let available = body.len() / FALLBACK_RECORD_LEN;
    if available < declared as usize {
        return Err(DecodeError::TruncatedRecords {
            declared,
            available: available as u32,
        });
    }

    let mut pattern = StitchPattern::with_capacity(declared as usize);
    for record in body.chunks_exact(FALLBACK_RECORD_LEN).take(declared as usize) {
        let (x, y) = split_record(record);
        pattern.add_stitch_absolute(f64::from(x), f64::from(y));
    }

    Ok(pattern)
}

// Records come from chunks_exact, so the length always matches
fn split_record(record: &[u8]) -> (i16, i16) {
    let mut raw = [0u8; FALLBACK_RECORD_LEN];
    raw.copy_from_slice(record);
    let [x0, x1, y0, y1] = raw;
    (i16::from_le_bytes([x0, x1]), i16::from_le_bytes([y0, y1]))
}
