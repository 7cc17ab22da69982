//! Raster rendering of strand paths

use crate::algorithm::config::YarnStyle;
use crate::algorithm::coverage::StrandCoverage;
use crate::io::error::Result;
use crate::io::svg::RenderOptions;
use crate::math::geometry::Point;
use crate::spatial::Peg;
use image::{Rgba, RgbaImage};
use ndarray::Array2;

/// Straight RGBA in `[0, 1]` per channel
type Pixel = [f32; 4];

/// Render strands into an RGBA image
///
/// Each strand is rasterized with the same coverage rule the search scores with,
/// at the display width, and composited source-over with the yarn opacity. The
/// canvas is the image size times `options.scale`, at least one pixel per side.
///
/// # Errors
///
/// Returns an error if the render options or the yarn are invalid
pub fn render_raster<'a>(
    strands: impl IntoIterator<Item = (&'a Peg, &'a Peg)>,
    width: u32,
    height: u32,
    yarn: &YarnStyle,
    options: &RenderOptions,
) -> Result<RgbaImage> {
    options.validate()?;
    yarn.validate("display_yarn")?;

    let scale = options.scale;
    let canvas_width = scaled_dimension(width, scale);
    let canvas_height = scaled_dimension(height, scale);
    let background = options
        .background
        .map_or([0.0; 4], |color| with_alpha(color, 1.0));
    let mut canvas = Array2::from_elem((canvas_height as usize, canvas_width as usize), background);

    let ink = with_alpha(yarn.color, yarn.opacity as f32);
    for (start, end) in strands {
        let coverage = StrandCoverage::rasterize(
            Point::new(start.x * scale, start.y * scale),
            Point::new(end.x * scale, end.y * scale),
            yarn.width * scale,
            canvas_width,
            canvas_height,
        );
        for (x, y) in coverage.pixels() {
            if let Some(pixel) = canvas.get_mut((y as usize, x as usize)) {
                *pixel = over(ink, *pixel);
            }
        }
    }

    Ok(RgbaImage::from_fn(canvas_width, canvas_height, |x, y| {
        let pixel = canvas
            .get((y as usize, x as usize))
            .copied()
            .unwrap_or_default();
        Rgba(pixel.map(to_channel))
    }))
}

fn scaled_dimension(size: u32, scale: f64) -> u32 {
    (f64::from(size) * scale).round().max(1.0) as u32
}

fn with_alpha((r, g, b): (u8, u8, u8), alpha: f32) -> Pixel {
    [
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        alpha,
    ]
}

/// Source-over compositing of `source` onto `destination`
fn over(source: Pixel, destination: Pixel) -> Pixel {
    let [sr, sg, sb, sa] = source;
    let [dr, dg, db, da] = destination;
    let alpha = da.mul_add(1.0 - sa, sa);
    if alpha <= 0.0 {
        return [0.0; 4];
    }
    let blend = |s: f32, d: f32| (d * da).mul_add(1.0 - sa, s * sa) / alpha;
    [blend(sr, dr), blend(sg, dg), blend(sb, db), alpha]
}

fn to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
