//! SVG rendering of strand paths

use crate::algorithm::config::YarnStyle;
use crate::io::configuration::DEFAULT_BACKGROUND;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::Peg;
use serde::{Deserialize, Serialize};
use svg::Document;
use svg::node::element::{Group, Line, Rectangle};

/// Document level rendering choices
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Background fill, `None` leaves the document transparent
    pub background: Option<(u8, u8, u8)>,
    /// Factor applied to the image size and all coordinates
    pub scale: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            background: Some(DEFAULT_BACKGROUND),
            scale: 1.0,
        }
    }
}

impl RenderOptions {
    /// Check the scale factor
    ///
    /// # Errors
    ///
    /// Returns an error if the scale is not a positive finite number
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(invalid_parameter(
                "scale",
                &self.scale,
                &"scale must be a positive number",
            ));
        }
        Ok(())
    }
}

/// Render the strands joining consecutive pegs of `path` as a standalone SVG
///
/// Strands are separate `<line>` elements sharing the stroke of their group, so
/// overlapping strands build up density like real yarn. Fewer than two pegs give
/// a document without strands.
///
/// # Errors
///
/// Returns an error if the render options or the yarn are invalid
pub fn render_svg(
    path: &[Peg],
    width: u32,
    height: u32,
    yarn: &YarnStyle,
    options: &RenderOptions,
) -> Result<String> {
    options.validate()?;
    yarn.validate("display_yarn")?;

    let scale = options.scale;
    let scaled_width = format_number(f64::from(width) * scale);
    let scaled_height = format_number(f64::from(height) * scale);

    let mut document = Document::new()
        .set("width", scaled_width.clone())
        .set("height", scaled_height.clone())
        .set("viewBox", format!("0 0 {scaled_width} {scaled_height}"));

    if let Some(background) = options.background {
        document = document.add(
            Rectangle::new()
                .set("x", "0")
                .set("y", "0")
                .set("width", scaled_width)
                .set("height", scaled_height)
                .set("fill", rgb(background)),
        );
    }

    if path.len() >= 2 {
        let group = path.windows(2).fold(
            Group::new()
                .set("fill", "none")
                .set("stroke", rgb(yarn.color))
                .set("stroke-width", format_number(yarn.width * scale))
                .set("stroke-opacity", format_number(yarn.opacity))
                .set("stroke-linecap", "round"),
            |group, pair| match pair {
                [start, end] => group.add(
                    Line::new()
                        .set("x1", format_number(start.x * scale))
                        .set("y1", format_number(start.y * scale))
                        .set("x2", format_number(end.x * scale))
                        .set("y2", format_number(end.y * scale)),
                ),
                _ => group,
            },
        );
        document = document.add(group);
    }

    Ok(document.to_string())
}

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("rgb({r}, {g}, {b})")
}

/// Shortest decimal form with at most three fractional digits
fn format_number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    // Avoid printing "-0"
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{rounded}")
}
