//! Tests for color-block segmentation

#[cfg(test)]
mod tests {
    use stitchbox::io::configuration::PREVIEW_PALETTE;
    use stitchbox::pattern::stitch::{Stitch, StitchCommand, StitchPattern};
    use stitchbox::preview::segments::{PaletteColor, PreviewSegment, bounds, segment_stitches};

    fn color_change() -> Stitch {
        Stitch::with_command(0.0, 0.0, StitchCommand::ColorChange)
    }

    fn names(segments: &[PreviewSegment]) -> Vec<&'static str> {
        segments.iter().map(|s| s.color.name).collect()
    }

    // Tests a color change splits blocks and y is flipped
    // Verified by keeping embroidery y orientation
    #[test]
    fn test_split_on_color_change() {
        let pattern: StitchPattern = [
            Stitch::absolute(0.0, 0.0),
            Stitch::absolute(10.0, 10.0),
            color_change(),
            Stitch::absolute(20.0, 20.0),
        ]
        .into_iter()
        .collect();

        let segments = segment_stitches(&pattern, &PREVIEW_PALETTE);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].points, vec![(0.0, 0.0), (10.0, -10.0)]);
        assert_eq!(segments[1].points, vec![(20.0, -20.0)]);
        assert_eq!(names(&segments), ["blue", "green"]);
    }

    // Tests non-color commands still contribute their position
    // Verified by dropping jumps and trims from the polyline
    #[test]
    fn test_other_commands_are_points() {
        let pattern: StitchPattern = [
            Stitch::absolute(1.0, 1.0),
            Stitch::with_command(2.0, 2.0, StitchCommand::Jump),
            Stitch::with_command(2.0, 2.0, StitchCommand::Trim),
            Stitch::with_command(2.0, 2.0, StitchCommand::End),
        ]
        .into_iter()
        .collect();

        let segments = segment_stitches(&pattern, &PREVIEW_PALETTE);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].points.len(), 4);
    }

    // Tests empty blocks are dropped but still consume a color
    // Verified by reusing the color of the skipped block
    #[test]
    fn test_empty_blocks_skipped() {
        let pattern: StitchPattern = [
            color_change(),
            Stitch::absolute(1.0, 1.0),
            color_change(),
            color_change(),
            Stitch::absolute(2.0, 2.0),
            color_change(),
        ]
        .into_iter()
        .collect();

        let segments = segment_stitches(&pattern, &PREVIEW_PALETTE);
        assert_eq!(names(&segments), ["green", "orange"]);
    }

    // Tests the palette wraps after its last color
    // Verified by clamping to the last color
    #[test]
    fn test_palette_wraps() {
        let mut pattern = StitchPattern::new();
        for i in 0..=PREVIEW_PALETTE.len() {
            pattern.add_stitch_absolute(i as f64, 0.0);
            pattern.push(color_change());
        }

        let segments = segment_stitches(&pattern, &PREVIEW_PALETTE);
        assert_eq!(segments.len(), PREVIEW_PALETTE.len() + 1);
        assert_eq!(segments[PREVIEW_PALETTE.len()].color, PREVIEW_PALETTE[0]);
        assert_eq!(segments[6].color.name, "cyan");
    }

    // Tests an empty palette falls back to one color instead of panicking
    // Verified by indexing modulo zero
    #[test]
    fn test_empty_palette() {
        let pattern: StitchPattern = [Stitch::absolute(0.0, 0.0), color_change(), Stitch::absolute(1.0, 1.0)]
            .into_iter()
            .collect();
        let segments = segment_stitches(&pattern, &[]);
        assert_eq!(segments.len(), 2);
        assert!(segments.iter().all(|s| s.color.rgb == [0, 0, 0]));
    }

    // Tests an empty pattern yields nothing to draw
    // Verified by emitting one empty segment
    #[test]
    fn test_empty_pattern() {
        let segments = segment_stitches(&StitchPattern::new(), &PREVIEW_PALETTE);
        assert!(segments.is_empty());
        assert_eq!(bounds(&segments), None);
    }

    // Tests bounds cover every segment
    // Verified by measuring only the first segment
    #[test]
    fn test_bounds() {
        let red = PaletteColor::new("red", [255, 0, 0]);
        let segments = [
            PreviewSegment {
                points: vec![(10.0, -20.0), (3.0, 4.0)],
                color: red,
            },
            PreviewSegment {
                points: vec![(-5.0, -15.0)],
                color: red,
            },
        ];
        assert_eq!(bounds(&segments), Some((-5.0, -20.0, 10.0, 4.0)));
    }
}
