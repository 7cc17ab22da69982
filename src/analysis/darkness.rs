//! Image decoding into a normalized darkness field

use crate::analysis::residual::ResidualField;
use crate::io::error::{Result, invalid_parameter};
use image::{DynamicImage, GrayImage};
use log::debug;
use ndarray::Array2;

/// Per-pixel ink requirement of a target image
///
/// Values lie in `[0, 1]`: 0 for white source pixels, 1 for black ones. Stored as
/// `(height, width)` so rows are contiguous.
#[derive(Clone, Debug)]
pub struct DarknessField {
    data: Array2<f32>,
}

impl DarknessField {
    /// Decode an encoded raster buffer, guessing the format from its content
    ///
    /// Fully transparent pixels are treated as white before conversion to luma.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The buffer is not an image in a supported encoding
    /// - The decoded image has no pixels
    pub fn from_encoded(bytes: &[u8]) -> Result<Self> {
        Self::from_luma(&decode_opaque(bytes)?.into_luma8())
    }

    /// Decode an encoded raster buffer and measure darkness toward a yarn color
    ///
    /// Every pixel is projected onto the segment from white to `color`: white is
    /// 0, the yarn color is 1, and colors unlike the yarn fall in between. A white
    /// yarn has no direction to project on, so luma darkness is used instead.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The buffer is not an image in a supported encoding
    /// - The decoded image has no pixels
    pub fn from_encoded_projected(bytes: &[u8], color: (u8, u8, u8)) -> Result<Self> {
        let image = decode_opaque(bytes)?;
        let (r, g, b) = color;
        let direction = [255 - r, 255 - g, 255 - b].map(u32::from);
        let norm: u32 = direction.iter().map(|d| d * d).sum();
        if norm == 0 {
            return Self::from_luma(&image.into_luma8());
        }

        let image = image.into_rgb8();
        let data = Array2::from_shape_fn(
            (image.height() as usize, image.width() as usize),
            |(y, x)| {
                let pixel = image.get_pixel(x as u32, y as u32).0;
                let offset: u32 = pixel
                    .iter()
                    .zip(&direction)
                    .map(|(&channel, d)| u32::from(255 - channel) * d)
                    .sum();
                offset as f32 / norm as f32
            },
        );
        Self::from_array(data)
    }

    /// Convert an 8-bit grayscale image, darker pixels need more ink
    ///
    /// # Errors
    ///
    /// Returns an error if the image has no pixels
    pub fn from_luma(image: &GrayImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(invalid_parameter(
                "image",
                &format!("{width}x{height}"),
                &"image has no pixels",
            ));
        }

        let data = Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
            let luma = image.get_pixel(x as u32, y as u32).0[0];
            1.0 - f32::from(luma) / 255.0
        });

        Ok(Self { data })
    }

    /// Wrap raw darkness values, clamping them into `[0, 1]`
    ///
    /// # Errors
    ///
    /// Returns an error if the array has no elements
    pub fn from_array(mut data: Array2<f32>) -> Result<Self> {
        let (height, width) = data.dim();
        if width == 0 || height == 0 {
            return Err(invalid_parameter(
                "image",
                &format!("{width}x{height}"),
                &"image has no pixels",
            ));
        }
        data.mapv_inplace(|value| if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) });
        Ok(Self { data })
    }

    /// Image width in pixels
    pub fn width(&self) -> u32 {
        self.data.ncols() as u32
    }

    /// Image height in pixels
    pub fn height(&self) -> u32 {
        self.data.nrows() as u32
    }

    /// Darkness at a pixel, `None` outside the image
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        self.data.get((y as usize, x as usize)).copied()
    }

    /// Underlying `(height, width)` array
    pub const fn data(&self) -> &Array2<f32> {
        &self.data
    }

    /// Sum of darkness over the whole image
    pub fn total(&self) -> f64 {
        self.data.iter().map(|&value| f64::from(value)).sum()
    }

    /// Mean darkness of the pixels within `radius` of a point
    ///
    /// Pixels outside the image are ignored; a disc entirely outside gives 0.
    pub fn mean_around(&self, x: f64, y: f64, radius: u32) -> f64 {
        let cx = x.round() as i64;
        let cy = y.round() as i64;
        let radius = i64::from(radius);

        let mut sum = 0.0;
        let mut count = 0_u32;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
                let (px, py) = (cx + dx, cy + dy);
                if px < 0 || py < 0 {
                    continue;
                }
                if let Some(value) = self.data.get((py as usize, px as usize)) {
                    sum += f64::from(*value);
                    count += 1;
                }
            }
        }

        if count == 0 { 0.0 } else { sum / f64::from(count) }
    }

    /// Initial residual field: the canvas starts blank, so all darkness remains
    pub fn residual(&self) -> ResidualField {
        ResidualField::from_rows(
            self.width(),
            self.data.rows().into_iter().map(|row| row.to_vec()).collect(),
        )
    }
}

/// Decode a buffer, replacing fully transparent pixels with white
fn decode_opaque(bytes: &[u8]) -> Result<DynamicImage> {
    let decoded = image::load_from_memory(bytes)?;
    debug!(
        "Decoded {}x{} image ({:?})",
        decoded.width(),
        decoded.height(),
        decoded.color()
    );

    let mut rgba = decoded.into_rgba8();
    for pixel in rgba.pixels_mut() {
        if pixel.0[3] == 0 {
            pixel.0 = [255, 255, 255, 255];
        }
    }
    Ok(DynamicImage::ImageRgba8(rgba))
}
