//! Tests for image decoding, darkness normalization and start peg averaging

#[cfg(test)]
mod tests {
    use image::{GrayImage, ImageFormat, Luma, Rgba, RgbaImage};
    use ndarray::Array2;
    use std::io::Cursor;
    use strandweave::StrandError;
    use strandweave::analysis::darkness::DarknessField;

    fn encode_png(image: &RgbaImage) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, ImageFormat::Png)
            .unwrap_or_else(|error| panic!("Failed to encode test image: {error}"));
        bytes.into_inner()
    }

    // Tests black maps to 1 and white to 0
    // Verified by using luma directly as darkness
    #[test]
    fn test_from_luma_normalization() {
        let mut image = GrayImage::from_pixel(2, 1, Luma([255]));
        image.put_pixel(0, 0, Luma([0]));

        let field = DarknessField::from_luma(&image)
            .unwrap_or_else(|error| panic!("Failed to convert: {error}"));
        assert_eq!(field.width(), 2);
        assert_eq!(field.height(), 1);
        assert_eq!(field.get(0, 0), Some(1.0));
        assert_eq!(field.get(1, 0), Some(0.0));
    }

    // Tests decoding an encoded PNG and treating transparent pixels as white
    // Verified by skipping the transparency pass
    #[test]
    fn test_from_encoded_transparency() {
        let mut image = RgbaImage::from_pixel(3, 2, Rgba([0, 0, 0, 255]));
        image.put_pixel(1, 1, Rgba([0, 0, 0, 0]));

        let field = DarknessField::from_encoded(&encode_png(&image))
            .unwrap_or_else(|error| panic!("Failed to decode: {error}"));
        assert_eq!(field.width(), 3);
        assert_eq!(field.height(), 2);
        assert_eq!(field.get(0, 0), Some(1.0));
        assert_eq!(field.get(1, 1), Some(0.0));
    }

    // Tests darkness measured toward a colored yarn
    // Verified by projecting onto the yarn color instead of its complement
    #[test]
    fn test_from_encoded_projected() {
        let mut image = RgbaImage::from_pixel(3, 1, Rgba([255, 255, 255, 255]));
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([0, 0, 255, 255]));

        let field = DarknessField::from_encoded_projected(&encode_png(&image), (255, 0, 0))
            .unwrap_or_else(|error| panic!("Failed to decode: {error}"));
        assert_eq!(field.get(0, 0), Some(1.0));
        assert!(field.get(1, 0).is_some_and(|value| (value - 0.5).abs() < 1e-6));
        assert_eq!(field.get(2, 0), Some(0.0));
    }

    // Tests white yarn falls back to plain luminance
    // Verified by dividing by a zero norm
    #[test]
    fn test_projected_white_yarn() {
        let mut image = RgbaImage::from_pixel(2, 1, Rgba([255, 255, 255, 255]));
        image.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        let bytes = encode_png(&image);

        let projected = DarknessField::from_encoded_projected(&bytes, (255, 255, 255))
            .unwrap_or_else(|error| panic!("Failed to decode: {error}"));
        let plain =
            DarknessField::from_encoded(&bytes).unwrap_or_else(|error| panic!("{error}"));
        assert_eq!(projected.data(), plain.data());
    }

    // Tests garbage buffers are reported as decode errors
    // Verified by mapping decode failures to an empty field
    #[test]
    fn test_from_encoded_invalid() {
        let result = DarknessField::from_encoded(b"definitely not an image");
        assert!(matches!(result, Err(StrandError::ImageDecode { .. })));
    }

    // Tests empty images are rejected
    // Verified by removing the size check
    #[test]
    fn test_zero_sized_image() {
        let result = DarknessField::from_luma(&GrayImage::new(0, 4));
        assert!(matches!(result, Err(StrandError::InvalidParameter { .. })));

        let result = DarknessField::from_array(Array2::zeros((3, 0)));
        assert!(matches!(result, Err(StrandError::InvalidParameter { .. })));
    }

    // Tests raw arrays are clamped into [0, 1]
    // Verified by storing values unchanged
    #[test]
    fn test_from_array_clamps() {
        let data = Array2::from_shape_vec((1, 3), vec![-1.0, 0.5, 7.0])
            .unwrap_or_else(|error| panic!("Bad shape: {error}"));
        let field =
            DarknessField::from_array(data).unwrap_or_else(|error| panic!("Rejected: {error}"));
        assert_eq!(field.get(0, 0), Some(0.0));
        assert_eq!(field.get(1, 0), Some(0.5));
        assert_eq!(field.get(2, 0), Some(1.0));
        assert!((field.total() - 1.5).abs() < 1e-9);
    }

    // Tests disc averages ignore pixels outside the image
    // Verified by counting out-of-bounds pixels as zero
    #[test]
    fn test_mean_around() {
        let mut data = Array2::zeros((5, 5));
        data[(0, 0)] = 1.0;
        let field =
            DarknessField::from_array(data).unwrap_or_else(|error| panic!("Rejected: {error}"));

        // Radius 1 at the corner covers (0,0), (1,0) and (0,1)
        assert!((field.mean_around(0.0, 0.0, 1) - 1.0 / 3.0).abs() < 1e-9);
        assert!((field.mean_around(0.0, 0.0, 0) - 1.0).abs() < 1e-9);
        assert!(field.mean_around(4.0, 4.0, 1).abs() < 1e-12);
        assert!(field.mean_around(-10.0, -10.0, 1).abs() < 1e-12);
    }

    // Tests the initial residual equals the darkness field
    // Verified by starting the residual at zero
    #[test]
    fn test_residual_matches_darkness() {
        let data = Array2::from_shape_fn((4, 6), |(y, x)| (x + y) as f32 / 10.0);
        let field =
            DarknessField::from_array(data).unwrap_or_else(|error| panic!("Rejected: {error}"));
        let residual = field.residual();

        assert_eq!(residual.width(), 6);
        assert_eq!(residual.height(), 4);
        for y in 0..4 {
            for x in 0..6 {
                assert_eq!(residual.get(x, y), field.get(x, y));
            }
        }
    }
}
