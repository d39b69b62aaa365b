//! Splits a stitch sequence into single-color polylines

use crate::pattern::stitch::StitchPattern;

/// Named display color for one thread block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    /// Human-readable name
    pub name: &'static str,
    /// sRGB components
    pub rgb: [u8; 3],
}

impl PaletteColor {
    /// Create a palette entry
    pub const fn new(name: &'static str, rgb: [u8; 3]) -> Self {
        Self { name, rgb }
    }
}

// Used only if a caller hands in an empty palette
const FALLBACK_COLOR: PaletteColor = PaletteColor::new("black", [0, 0, 0]);

/// Points drawn as one polyline in one color
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSegment {
    /// Plot-space points, y already flipped
    pub points: Vec<(f64, f64)>,
    /// Assigned thread color
    pub color: PaletteColor,
}

/// Group stitches into color blocks
///
/// Every color change closes the current block and advances the palette,
/// wrapping after the last color. Other events contribute `(x, -y)` since
/// embroidery y grows downward. Empty blocks are dropped.
pub fn segment_stitches(pattern: &StitchPattern, palette: &[PaletteColor]) -> Vec<PreviewSegment> {
    let color_at = |index: usize| {
        palette
            .get(index % palette.len().max(1))
            .copied()
            .unwrap_or(FALLBACK_COLOR)
    };

    let mut segments = Vec::new();
    let mut current = Vec::new();
    let mut color_index = 0;

    for stitch in pattern.stitches() {
        if stitch.is_color_change() {
            if !current.is_empty() {
                segments.push(PreviewSegment {
                    points: std::mem::take(&mut current),
                    color: color_at(color_index),
                });
            }
            color_index = (color_index + 1) % palette.len().max(1);
        } else {
            current.push((stitch.x, -stitch.y));
        }
    }

    if !current.is_empty() {
        segments.push(PreviewSegment {
            points: current,
            color: color_at(color_index),
        });
    }

    segments
}

/// Axis-aligned extent of all segment points as `(min_x, min_y, max_x, max_y)`
pub fn bounds(segments: &[PreviewSegment]) -> Option<(f64, f64, f64, f64)> {
    segments
        .iter()
        .flat_map(|segment| segment.points.iter())
        .fold(None, |acc, &(x, y)| {
            Some(match acc {
                None => (x, y, x, y),
                Some((min_x, min_y, max_x, max_y)) => {
                    (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
                }
            })
        })
}
