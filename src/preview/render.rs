//! Rasterizes stitch segments into a PNG preview

use crate::io::configuration::{
    BACKGROUND_COLOR, END_MARKER_COLOR, INK_COLOR, MARKER_RADIUS, PREVIEW_PALETTE, PREVIEW_SIZE,
    PREVIEW_TITLE, START_MARKER_COLOR, TEXT_SCALE, X_AXIS_LABEL, Y_AXIS_LABEL,
};
use crate::io::error::{ConverterError, Result, WithPath};
use crate::pattern::stitch::StitchPattern;
use crate::preview::canvas::{
    PlotArea, TextDirection, Viewport, draw_end_marker, draw_polyline, draw_start_marker,
    draw_text, text_extent,
};
use crate::preview::segments::{PreviewSegment, bounds, segment_stitches};
use image::{Rgb, RgbImage};
use std::path::Path;
use tracing::info;

/// Draw segments onto a fresh square canvas
///
/// Segments without points are ignored. With no points at all the result is
/// the framed, labelled, empty plot.
pub fn rasterize(segments: &[PreviewSegment]) -> RgbImage {
    let mut img = RgbImage::from_pixel(PREVIEW_SIZE, PREVIEW_SIZE, Rgb(BACKGROUND_COLOR));
    let area = PlotArea::for_canvas(PREVIEW_SIZE);
    let ink = Rgb(INK_COLOR);

    area.draw_frame(&mut img, ink);
    draw_captions(&mut img, area, ink);

    let Some(extent) = bounds(segments) else {
        return img;
    };
    let viewport = Viewport::fit(extent, area);

    for segment in segments {
        let pixels: Vec<(f32, f32)> = segment
            .points
            .iter()
            .map(|&point| viewport.to_pixel(point))
            .collect();
        draw_polyline(&mut img, &pixels, Rgb(segment.color.rgb));
    }

    if let Some(&start) = segments.first().and_then(|s| s.points.first()) {
        draw_start_marker(
            &mut img,
            viewport.to_pixel(start),
            MARKER_RADIUS,
            Rgb(START_MARKER_COLOR),
        );
    }
    if let Some(&end) = segments.last().and_then(|s| s.points.last()) {
        draw_end_marker(
            &mut img,
            viewport.to_pixel(end),
            MARKER_RADIUS,
            Rgb(END_MARKER_COLOR),
        );
    }

    draw_legend(&mut img, area, ink);

    img
}

fn draw_captions(img: &mut RgbImage, area: PlotArea, ink: Rgb<u8>) {
    let title_scale = TEXT_SCALE + 1;
    let title_width = text_extent(PREVIEW_TITLE, title_scale);
    let title_x = (area.left + area.width / 2).saturating_sub(title_width / 2);
    let title_y = area.top.saturating_sub(8 * title_scale + 16);
    draw_text(
        img,
        PREVIEW_TITLE,
        (title_x, title_y),
        title_scale,
        ink,
        TextDirection::Horizontal,
    );

    let x_label_width = text_extent(X_AXIS_LABEL, TEXT_SCALE);
    let x_label_x = (area.left + area.width / 2).saturating_sub(x_label_width / 2);
    let x_label_y = area.top + area.height + 8 * TEXT_SCALE + 8;
    draw_text(
        img,
        X_AXIS_LABEL,
        (x_label_x, x_label_y),
        TEXT_SCALE,
        ink,
        TextDirection::Horizontal,
    );

    let y_label_height = text_extent(Y_AXIS_LABEL, TEXT_SCALE);
    let y_label_x = area.left.saturating_sub(8 * TEXT_SCALE + 24);
    let y_label_y = (area.top + area.height / 2).saturating_sub(y_label_height / 2);
    draw_text(
        img,
        Y_AXIS_LABEL,
        (y_label_x, y_label_y),
        TEXT_SCALE,
        ink,
        TextDirection::Vertical,
    );
}

// Start/End key in the top-right corner of the plot
fn draw_legend(img: &mut RgbImage, area: PlotArea, ink: Rgb<u8>) {
    let row_height = 8 * TEXT_SCALE + 8;
    let label_width = text_extent("Start", TEXT_SCALE);
    let text_x = (area.left + area.width).saturating_sub(label_width + 12);
    let marker_x = text_x.saturating_sub(MARKER_RADIUS as u32 * 2 + 6) as f32;
    let first_row = area.top + 12;

    let start_y = first_row as f32 + (8 * TEXT_SCALE) as f32 / 2.0;
    draw_start_marker(img, (marker_x, start_y), MARKER_RADIUS, Rgb(START_MARKER_COLOR));
    draw_text(img, "Start", (text_x, first_row), TEXT_SCALE, ink, TextDirection::Horizontal);

    let second_row = first_row + row_height;
    let end_y = second_row as f32 + (8 * TEXT_SCALE) as f32 / 2.0;
    draw_end_marker(img, (marker_x, end_y), MARKER_RADIUS, Rgb(END_MARKER_COLOR));
    draw_text(img, "End", (text_x, second_row), TEXT_SCALE, ink, TextDirection::Horizontal);
}

/// Render the colored preview of `pattern` to a PNG at `output_path`
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or saved
pub fn render_preview(pattern: &StitchPattern, output_path: &Path) -> Result<()> {
    let segments = segment_stitches(pattern, &PREVIEW_PALETTE);
    let img = rasterize(&segments);

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
    }

    img.save(output_path)
        .map_err(|e| ConverterError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    info!(path = %output_path.display(), segments = segments.len(), "Preview saved");
    Ok(())
}
