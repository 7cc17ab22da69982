//! Computed strand paths, their JSON form and rendering

use crate::algorithm::config::YarnStyle;
use crate::io::error::{Result, StrandError, WithPath, invalid_parameter};
use crate::io::raster::render_raster;
use crate::io::svg::{RenderOptions, render_svg};
use crate::spatial::Peg;
use image::{DynamicImage, ImageFormat, RgbaImage};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Ordered pegs of a computed path together with the image it was fitted to
///
/// Consecutive pegs are joined by one strand each. Saving a blueprint keeps the
/// result without the search, so it can be rendered again with other yarns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    /// Pegs in the order the yarn visits them
    pub peg_order: Vec<Peg>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Residual removed by the path during the search
    pub score: f64,
}

impl Blueprint {
    /// Resolve peg indices of a path against its layout
    ///
    /// Indices outside the layout are skipped.
    pub fn from_path(path: &[usize], pegs: &[Peg], width: u32, height: u32, score: f64) -> Self {
        Self {
            peg_order: path.iter().filter_map(|&i| pegs.get(i)).copied().collect(),
            width,
            height,
            score,
        }
    }

    /// Number of strands in the path
    pub const fn strand_count(&self) -> usize {
        self.peg_order.len().saturating_sub(1)
    }

    /// Consecutive peg pairs, one per strand
    pub fn strands(&self) -> impl Iterator<Item = (&Peg, &Peg)> + '_ {
        self.peg_order
            .windows(2)
            .filter_map(|pair| match pair {
                [start, end] => Some((start, end)),
                _ => None,
            })
    }

    /// Render the path as SVG
    ///
    /// # Errors
    ///
    /// Returns an error if the yarn or render options are invalid
    pub fn render_svg(&self, yarn: &YarnStyle, options: &RenderOptions) -> Result<String> {
        render_svg(&self.peg_order, self.width, self.height, yarn, options)
    }

    /// Render the path and write the SVG document to `path`
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or the file cannot be written
    pub fn write_svg(&self, path: &Path, yarn: &YarnStyle, options: &RenderOptions) -> Result<()> {
        let document = self.render_svg(yarn, options)?;
        fs::write(path, document).with_path(path, "write svg")?;
        debug!("Wrote {} strands to {}", self.strand_count(), path.display());
        Ok(())
    }

    /// Render the path as an RGBA image
    ///
    /// # Errors
    ///
    /// Returns an error if the yarn or render options are invalid
    pub fn render_image(&self, yarn: &YarnStyle, options: &RenderOptions) -> Result<RgbaImage> {
        render_raster(self.strands(), self.width, self.height, yarn, options)
    }

    /// Render the path to `path`, choosing the format from its extension
    ///
    /// `.svg` writes a vector document. Any raster format the `image` crate can
    /// encode is rendered with [`Blueprint::render_image`]; formats other than PNG
    /// drop the alpha channel.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path has no extension or names an unknown format
    /// - The yarn or render options are invalid
    /// - The file cannot be encoded or written
    pub fn render(&self, path: &Path, yarn: &YarnStyle, options: &RenderOptions) -> Result<()> {
        let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
            return Err(invalid_parameter(
                "output",
                &path.display(),
                &"output path needs a file extension",
            ));
        };
        if extension.eq_ignore_ascii_case("svg") {
            return self.write_svg(path, yarn, options);
        }

        let format = ImageFormat::from_extension(extension).ok_or_else(|| {
            invalid_parameter(
                "output",
                &path.display(),
                &format!("unknown output format '{extension}'"),
            )
        })?;
        let image = self.render_image(yarn, options)?;
        let written = if format == ImageFormat::Png {
            image.save_with_format(path, format)
        } else {
            DynamicImage::ImageRgba8(image)
                .to_rgb8()
                .save_with_format(path, format)
        };
        written.map_err(|source| StrandError::ImageEncode {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            "Rendered {} strands to {} ({format:?})",
            self.strand_count(),
            path.display()
        );
        Ok(())
    }

    /// Save the blueprint as JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|source| {
            StrandError::Serialization {
                path: path.to_path_buf(),
                source,
            }
        })?;
        fs::write(path, json).with_path(path, "write blueprint")
    }

    /// Load a blueprint saved with [`Blueprint::to_file`]
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid blueprint
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).with_path(path, "read blueprint")?;
        serde_json::from_str(&json).map_err(|source| StrandError::Serialization {
            path: path.to_path_buf(),
            source,
        })
    }
}
