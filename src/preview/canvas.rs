//! Plot geometry, markers and bitmap text for preview images

use crate::io::configuration::{
    PLOT_MARGIN_BOTTOM, PLOT_MARGIN_LEFT, PLOT_MARGIN_RIGHT, PLOT_MARGIN_TOP, PLOT_PADDING,
};
use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

/// Glyph cell edge in font pixels
const GLYPH_SIZE: u32 = 8;

/// Pixel rectangle that holds the plotted design
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotArea {
    /// Left edge in pixels
    pub left: u32,
    /// Top edge in pixels
    pub top: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl PlotArea {
    /// Area left after reserving the configured margins on a square canvas
    pub const fn for_canvas(size: u32) -> Self {
        Self {
            left: PLOT_MARGIN_LEFT,
            top: PLOT_MARGIN_TOP,
            width: size.saturating_sub(PLOT_MARGIN_LEFT + PLOT_MARGIN_RIGHT),
            height: size.saturating_sub(PLOT_MARGIN_TOP + PLOT_MARGIN_BOTTOM),
        }
    }

    /// Pixel center of the area
    pub fn center(&self) -> (f64, f64) {
        (
            f64::from(self.left) + f64::from(self.width) / 2.0,
            f64::from(self.top) + f64::from(self.height) / 2.0,
        )
    }

    /// Draw the frame around the area
    pub fn draw_frame(&self, img: &mut RgbImage, color: Rgb<u8>) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let rect = Rect::at(self.left as i32, self.top as i32).of_size(self.width, self.height);
        draw_hollow_rect_mut(img, rect, color);
    }
}

/// Equal-aspect mapping from plot coordinates to pixels
///
/// One scale factor serves both axes so designs are not stretched. Plot y
/// grows upward, pixel y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    data_center: (f64, f64),
    pixel_center: (f64, f64),
    scale: f64,
}

impl Viewport {
    /// Fit `(min_x, min_y, max_x, max_y)` inside `area` with padding
    pub fn fit(bounds: (f64, f64, f64, f64), area: PlotArea) -> Self {
        let (min_x, min_y, max_x, max_y) = bounds;
        // Degenerate spans (single point, straight line) still get a finite scale
        let span_x = (max_x - min_x).max(1.0);
        let span_y = (max_y - min_y).max(1.0);
        let usable_w = f64::from(area.width.saturating_sub(2 * PLOT_PADDING).max(1));
        let usable_h = f64::from(area.height.saturating_sub(2 * PLOT_PADDING).max(1));

        Self {
            data_center: ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0),
            pixel_center: area.center(),
            scale: (usable_w / span_x).min(usable_h / span_y),
        }
    }

    /// Pixels per device unit, identical on both axes
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Map a plot point to pixel coordinates
    pub fn to_pixel(&self, point: (f64, f64)) -> (f32, f32) {
        let x = self.pixel_center.0 + (point.0 - self.data_center.0) * self.scale;
        let y = self.pixel_center.1 - (point.1 - self.data_center.1) * self.scale;
        (x as f32, y as f32)
    }
}

/// Draw a polyline through `points` with a one pixel stroke
pub fn draw_polyline(img: &mut RgbImage, points: &[(f32, f32)], color: Rgb<u8>) {
    if let [only] = points {
        draw_line_segment_mut(img, *only, *only, color);
        return;
    }
    for pair in points.windows(2) {
        if let [start, end] = pair {
            draw_line_segment_mut(img, *start, *end, color);
        }
    }
}

/// Filled circle marking where sewing starts
pub fn draw_start_marker(img: &mut RgbImage, at: (f32, f32), radius: i32, color: Rgb<u8>) {
    let center = (at.0.round() as i32, at.1.round() as i32);
    draw_filled_circle_mut(img, center, radius, color);
}

/// Diagonal cross marking where sewing ends
pub fn draw_end_marker(img: &mut RgbImage, at: (f32, f32), half_width: i32, color: Rgb<u8>) {
    let r = half_width as f32;
    // Three parallel strokes per diagonal give the cross some weight
    for offset in [-1.0_f32, 0.0, 1.0] {
        draw_line_segment_mut(
            img,
            (at.0 - r + offset, at.1 - r),
            (at.0 + r + offset, at.1 + r),
            color,
        );
        draw_line_segment_mut(
            img,
            (at.0 - r + offset, at.1 + r),
            (at.0 + r + offset, at.1 - r),
            color,
        );
    }
}

/// Reading direction for bitmap text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    /// Left to right
    Horizontal,
    /// Bottom to top, rotated a quarter turn counter-clockwise
    Vertical,
}

/// Length of `text` along its reading direction in pixels
pub fn text_extent(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * GLYPH_SIZE * scale
}

/// Draw `text` from the 8x8 bitmap font
///
/// `origin` is the top-left corner of the text box as it appears on the
/// image. Pixels falling outside the image are clipped; characters without
/// a glyph are left blank.
pub fn draw_text(
    img: &mut RgbImage,
    text: &str,
    origin: (u32, u32),
    scale: u32,
    color: Rgb<u8>,
    direction: TextDirection,
) {
    let cell = GLYPH_SIZE * scale;
    let extent = text_extent(text, scale);

    for (index, ch) in text.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(ch) else {
            continue;
        };
        let advance = index as u32 * cell;

        for (gy, row) in glyph.iter().enumerate() {
            for gx in 0..GLYPH_SIZE {
                if row & (1 << gx) == 0 {
                    continue;
                }
                let (gx, gy) = (gx * scale, gy as u32 * scale);
                let (px, py) = match direction {
                    TextDirection::Horizontal => (origin.0 + advance + gx, origin.1 + gy),
                    TextDirection::Vertical => (
                        origin.0 + gy,
                        (origin.1 + extent).saturating_sub(advance + gx + scale),
                    ),
                };
                fill_block(img, (px, py), scale, color);
            }
        }
    }
}

fn fill_block(img: &mut RgbImage, at: (u32, u32), size: u32, color: Rgb<u8>) {
    for dy in 0..size {
        for dx in 0..size {
            if let Some(pixel) = img.get_pixel_mut_checked(at.0 + dx, at.1 + dy) {
                *pixel = color;
            }
        }
    }
}
