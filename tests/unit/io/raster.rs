//! Tests for raster rendering of strands onto RGBA canvases

#[cfg(test)]
mod tests {
    use image::Rgba;
    use std::iter;
    use strandweave::StrandError;
    use strandweave::algorithm::config::YarnStyle;
    use strandweave::io::raster::render_raster;
    use strandweave::io::svg::RenderOptions;
    use strandweave::spatial::Peg;

    const WHITE: RenderOptions = RenderOptions {
        background: Some((255, 255, 255)),
        scale: 1.0,
    };

    /// Two pegs spanning row 5 of a 10x10 canvas
    fn row_pegs() -> [Peg; 2] {
        [Peg::new(0, 0.0, 5.0), Peg::new(1, 9.0, 5.0)]
    }

    // Tests an empty path yields a canvas of the background color
    // Verified by leaving the canvas transparent
    #[test]
    fn test_background_fill() {
        let image = render_raster(iter::empty(), 6, 4, &YarnStyle::default(), &WHITE)
            .unwrap_or_else(|error| panic!("Render failed: {error}"));
        assert_eq!(image.dimensions(), (6, 4));
        assert!(image.pixels().all(|pixel| *pixel == Rgba([255, 255, 255, 255])));
    }

    // Tests an opaque strand replaces the pixels it covers and nothing else
    // Verified by drawing strands one row too low
    #[test]
    fn test_opaque_strand() {
        let [a, b] = row_pegs();
        let yarn = YarnStyle::new(1.0, 1.0, (0, 0, 0));
        let image = render_raster([(&a, &b)], 10, 10, &yarn, &WHITE)
            .unwrap_or_else(|error| panic!("Render failed: {error}"));

        assert_eq!(*image.get_pixel(3, 5), Rgba([0, 0, 0, 255]));
        assert_eq!(*image.get_pixel(3, 4), Rgba([255, 255, 255, 255]));
        assert_eq!(*image.get_pixel(3, 6), Rgba([255, 255, 255, 255]));
    }

    // Tests overlapping translucent strands darken further
    // Verified by overwriting pixels instead of compositing
    #[test]
    fn test_overlap_darkens() {
        let [a, b] = row_pegs();
        let yarn = YarnStyle::new(1.0, 0.5, (0, 0, 0));

        let single = render_raster([(&a, &b)], 10, 10, &yarn, &WHITE)
            .unwrap_or_else(|error| panic!("Render failed: {error}"));
        let double = render_raster([(&a, &b), (&b, &a)], 10, 10, &yarn, &WHITE)
            .unwrap_or_else(|error| panic!("Render failed: {error}"));

        assert_eq!(*single.get_pixel(4, 5), Rgba([128, 128, 128, 255]));
        assert_eq!(*double.get_pixel(4, 5), Rgba([64, 64, 64, 255]));
    }

    // Tests transparent canvases keep the yarn color with partial alpha
    // Verified by compositing onto black instead of nothing
    #[test]
    fn test_transparent_background() {
        let [a, b] = row_pegs();
        let yarn = YarnStyle::new(1.0, 0.5, (255, 0, 0));
        let options = RenderOptions {
            background: None,
            scale: 1.0,
        };
        let image = render_raster([(&a, &b)], 10, 10, &yarn, &options)
            .unwrap_or_else(|error| panic!("Render failed: {error}"));

        assert_eq!(*image.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*image.get_pixel(5, 5), Rgba([255, 0, 0, 128]));
    }

    // Tests the scale factor resizes the canvas and moves the strands with it
    // Verified by scaling the canvas but not the peg coordinates
    #[test]
    fn test_scale() {
        let [a, b] = row_pegs();
        let yarn = YarnStyle::new(1.0, 1.0, (0, 0, 0));
        let options = RenderOptions {
            background: Some((255, 255, 255)),
            scale: 2.0,
        };
        let image = render_raster([(&a, &b)], 10, 10, &yarn, &options)
            .unwrap_or_else(|error| panic!("Render failed: {error}"));

        assert_eq!(image.dimensions(), (20, 20));
        assert_eq!(*image.get_pixel(8, 10), Rgba([0, 0, 0, 255]));
        assert_eq!(*image.get_pixel(8, 5), Rgba([255, 255, 255, 255]));
    }

    // Tests invalid options and yarns are rejected before drawing
    // Verified by skipping validation
    #[test]
    fn test_invalid_inputs() {
        let options = RenderOptions {
            background: None,
            scale: 0.0,
        };
        assert!(matches!(
            render_raster(iter::empty(), 4, 4, &YarnStyle::default(), &options),
            Err(StrandError::InvalidParameter { .. })
        ));

        let yarn = YarnStyle::new(0.0, 1.0, (0, 0, 0));
        assert!(matches!(
            render_raster(iter::empty(), 4, 4, &yarn, &WHITE),
            Err(StrandError::InvalidParameter { .. })
        ));
    }
}
