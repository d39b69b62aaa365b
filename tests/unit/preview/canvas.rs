//! Tests for plot geometry and bitmap drawing

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use stitchbox::preview::canvas::{
        PlotArea, TextDirection, Viewport, draw_end_marker, draw_polyline, draw_start_marker,
        draw_text, text_extent,
    };

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const INK: Rgb<u8> = Rgb([0, 0, 0]);

    fn inked(img: &RgbImage) -> Vec<(u32, u32)> {
        img.enumerate_pixels()
            .filter(|(_, _, p)| **p != WHITE)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    // Tests the plot area honors the margins
    // Verified by subtracting only one margin per axis
    #[test]
    fn test_plot_area() {
        let area = PlotArea::for_canvas(1000);
        assert_eq!(
            area,
            PlotArea {
                left: 80,
                top: 70,
                width: 880,
                height: 860,
            }
        );
        assert_eq!(area.center(), (520.0, 500.0));
        assert_eq!(PlotArea::for_canvas(10).width, 0);
    }

    // Tests the viewport keeps one scale for both axes and flips y
    // Verified by scaling axes independently
    #[test]
    fn test_viewport_equal_aspect() {
        let viewport = Viewport::fit((0.0, 0.0, 82.0, 41.0), PlotArea::for_canvas(1000));
        assert_eq!(viewport.scale(), 840.0 / 82.0);

        let (cx, cy) = viewport.to_pixel((41.0, 20.5));
        assert_eq!((cx, cy), (520.0, 500.0));

        let (_, top) = viewport.to_pixel((41.0, 41.0));
        let (_, bottom) = viewport.to_pixel((41.0, 0.0));
        assert!(top < bottom);
    }

    // Tests the bounds land inside the padded area
    // Verified by ignoring the padding
    #[test]
    fn test_viewport_fits_bounds() {
        let viewport = Viewport::fit((0.0, 0.0, 82.0, 82.0), PlotArea::for_canvas(1000));
        assert_eq!(viewport.scale(), 10.0);
        assert_eq!(viewport.to_pixel((0.0, 0.0)), (110.0, 910.0));
        assert_eq!(viewport.to_pixel((82.0, 82.0)), (930.0, 90.0));
    }

    // Tests a single point still gets a finite, centered mapping
    // Verified by dividing by the zero span
    #[test]
    fn test_viewport_degenerate() {
        let viewport = Viewport::fit((5.0, 5.0, 5.0, 5.0), PlotArea::for_canvas(1000));
        assert!(viewport.scale().is_finite());
        assert_eq!(viewport.to_pixel((5.0, 5.0)), (520.0, 500.0));
    }

    // Tests polylines ink their vertices, even a lone point
    // Verified by skipping single-point polylines
    #[test]
    fn test_polyline() {
        let mut img = RgbImage::from_pixel(20, 20, WHITE);
        draw_polyline(&mut img, &[(2.0, 2.0), (2.0, 10.0), (12.0, 10.0)], INK);
        assert_eq!(*img.get_pixel(2, 6), INK);
        assert_eq!(*img.get_pixel(8, 10), INK);
        assert_eq!(*img.get_pixel(15, 15), WHITE);

        let mut dot = RgbImage::from_pixel(5, 5, WHITE);
        draw_polyline(&mut dot, &[(3.0, 3.0)], INK);
        assert_eq!(inked(&dot), vec![(3, 3)]);
    }

    // Tests markers are centered on their anchor
    // Verified by offsetting the marker by its radius
    #[test]
    fn test_markers() {
        let green = Rgb([0, 128, 0]);
        let red = Rgb([255, 0, 0]);
        let mut img = RgbImage::from_pixel(40, 40, WHITE);

        draw_start_marker(&mut img, (10.0, 10.0), 4, green);
        draw_end_marker(&mut img, (30.0, 30.0), 4, red);

        assert_eq!(*img.get_pixel(10, 10), green);
        assert_eq!(*img.get_pixel(13, 10), green);
        assert_eq!(*img.get_pixel(30, 30), red);
        assert_eq!(*img.get_pixel(26, 26), red);
        assert_eq!(*img.get_pixel(30, 26), WHITE);
    }

    // Tests text stays inside its box in both directions
    // Verified by drawing vertical text left to right
    #[test]
    fn test_text_box() {
        assert_eq!(text_extent("Start", 2), 80);

        let mut img = RgbImage::from_pixel(100, 100, WHITE);
        draw_text(&mut img, "Hi", (10, 20), 2, INK, TextDirection::Horizontal);
        let pixels = inked(&img);
        assert!(!pixels.is_empty());
        assert!(
            pixels
                .iter()
                .all(|&(x, y)| (10..42).contains(&x) && (20..36).contains(&y))
        );

        let mut img = RgbImage::from_pixel(100, 100, WHITE);
        draw_text(&mut img, "Hi", (10, 20), 2, INK, TextDirection::Vertical);
        let pixels = inked(&img);
        assert!(!pixels.is_empty());
        assert!(
            pixels
                .iter()
                .all(|&(x, y)| (10..26).contains(&x) && (20..52).contains(&y))
        );
    }

    // Tests text running off the image is clipped rather than panicking
    // Verified by writing pixels without bounds checks
    #[test]
    fn test_text_clipped() {
        let mut img = RgbImage::from_pixel(12, 12, WHITE);
        draw_text(&mut img, "Embroidery", (4, 4), 3, INK, TextDirection::Horizontal);
        draw_text(&mut img, "\u{2603}", (0, 0), 1, INK, TextDirection::Vertical);
        assert!(!inked(&img).is_empty());
    }
}
