//! Command-line interface for turning images into string art

use crate::algorithm::config::{EarlyStopConfig, PathConfig, ScoreMode, YarnStyle};
use crate::algorithm::executor::{BeamSearch, StopReason};
use crate::analysis::darkness::DarknessField;
use crate::io::blueprint::Blueprint;
use crate::io::configuration::{
    BLUEPRINT_SUFFIX, DEFAULT_BACKGROUND, DEFAULT_BEAM_WIDTH, DEFAULT_DISPLAY_OPACITY,
    DEFAULT_DISPLAY_WIDTH, DEFAULT_EARLY_STOP_PATIENCE, DEFAULT_ITERATIONS, DEFAULT_PEG_COUNT,
    DEFAULT_PEG_MARGIN, DEFAULT_SCORING_OPACITY, DEFAULT_SCORING_WIDTH, DEFAULT_SEED,
    DEFAULT_SKIP_PEG_WITHIN, DEFAULT_START_PEG_RADIUS, OUTPUT_SUFFIX, SUPPORTED_EXTENSIONS,
};
use crate::io::error::{Result, WithPath, invalid_parameter};
use crate::io::pegs::{load_pegs, save_pegs};
use crate::io::progress::ProgressManager;
use crate::io::svg::RenderOptions;
use crate::spatial::layout::{circle_coords, rectangle_coords};
use crate::spatial::peg::{Peg, jitter_pegs, pegs_from_coords};
use clap::{ArgAction, Parser, ValueEnum};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Shape the generated peg layout follows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum PegShape {
    /// Pegs around the largest circle fitting the image
    #[default]
    Circle,
    /// Pegs along the image border
    Rectangle,
}

/// Format of the rendered output
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Vector document
    #[default]
    Svg,
    /// Raster image with alpha
    Png,
    /// Raster image without alpha
    Jpg,
}

impl OutputFormat {
    /// File extension written for this format
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpg => "jpg",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "strandweave")]
#[command(
    author,
    version,
    about = "Generate string art from images with a beam-searched strand path"
)]
/// Command-line arguments for the string art generator
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input image, blueprint JSON file or directory of images to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible peg jitter
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Maximum number of strands
    #[arg(short, long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,

    /// Number of path hypotheses kept per iteration (1 = greedy)
    #[arg(short, long, default_value_t = DEFAULT_BEAM_WIDTH)]
    pub beam_width: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Shape of the generated peg layout
    #[arg(long, value_enum, default_value_t = PegShape::Circle)]
    pub peg_shape: PegShape,

    /// Number of pegs in the generated layout
    #[arg(short, long, default_value_t = DEFAULT_PEG_COUNT)]
    pub pegs: usize,

    /// Gap between the layout and the image edge, as a fraction of the image size
    #[arg(long, default_value_t = DEFAULT_PEG_MARGIN)]
    pub peg_margin: f64,

    /// Randomly offset each peg by up to this many pixels
    #[arg(long, default_value_t = 0.0)]
    pub peg_jitter: f64,

    /// Don't connect pegs closer than this many pixels
    #[arg(long, default_value_t = DEFAULT_SKIP_PEG_WITHIN)]
    pub skip_within: u32,

    /// Radius used to pick the darkest starting pegs (0 = start anywhere)
    #[arg(long, default_value_t = DEFAULT_START_PEG_RADIUS)]
    pub start_radius: u32,

    /// Stroke width simulated while searching
    #[arg(long, default_value_t = DEFAULT_SCORING_WIDTH)]
    pub scoring_width: f64,

    /// Opacity simulated while searching
    #[arg(long, default_value_t = DEFAULT_SCORING_OPACITY)]
    pub scoring_opacity: f64,

    /// Stroke width of the rendered strands
    #[arg(long, default_value_t = DEFAULT_DISPLAY_WIDTH)]
    pub yarn_width: f64,

    /// Opacity of the rendered strands
    #[arg(long, default_value_t = DEFAULT_DISPLAY_OPACITY)]
    pub yarn_opacity: f64,

    /// Color of the rendered strands as "R,G,B"
    #[arg(long, value_parser = parse_rgb, default_value = "0,0,0")]
    pub yarn_color: (u8, u8, u8),

    /// Measure darkness toward the yarn color instead of black
    #[arg(long)]
    pub project_to_yarn_color: bool,

    /// Stop when the best improvement stays below this value
    #[arg(long)]
    pub early_stop_threshold: Option<f64>,

    /// Consecutive stalled iterations tolerated before stopping
    #[arg(long, default_value_t = DEFAULT_EARLY_STOP_PATIENCE)]
    pub early_stop_patience: u32,

    /// How candidate strands are ranked
    #[arg(long, value_enum, default_value_t = ScoreMode::Total)]
    pub score_mode: ScoreMode,

    /// Scale factor of the output
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,

    /// Format of the rendered output (<input>_strands.<format>)
    #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
    pub output_format: OutputFormat,

    /// Leave the background transparent
    #[arg(short, long)]
    pub transparent: bool,

    /// Write the peg layout used to this JSON file
    #[arg(long, value_name = "FILE")]
    pub save_pegs: Option<PathBuf>,

    /// Read the peg layout from this JSON file instead of generating one
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with_all = ["peg_shape", "pegs", "peg_margin", "peg_jitter"]
    )]
    pub load_pegs: Option<PathBuf>,

    /// Also write the computed path as JSON (<input>_blueprint.json)
    #[arg(long)]
    pub blueprint: bool,
}

/// Parse a color given as "R,G,B" or "R G B"
///
/// # Errors
///
/// Returns an error unless the value holds exactly three integers in `0..=255`
pub fn parse_rgb(value: &str) -> std::result::Result<(u8, u8, u8), String> {
    let channels = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u8>()
                .map_err(|err| format!("invalid color channel '{part}': {err}"))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    match channels.as_slice() {
        &[r, g, b] => Ok((r, g, b)),
        _ => Err(format!("expected three color channels, got '{value}'")),
    }
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Search configuration described by the flags
    pub const fn path_config(&self) -> PathConfig {
        PathConfig {
            iterations: self.iterations,
            yarn: YarnStyle::new(self.scoring_width, self.scoring_opacity, self.yarn_color),
            early_stop: EarlyStopConfig {
                loss_threshold: self.early_stop_threshold,
                patience: self.early_stop_patience,
            },
            start_peg_radius: self.start_radius,
            skip_peg_within: self.skip_within,
            beam_width: self.beam_width,
            score_mode: self.score_mode,
            progress_bar: false,
        }
    }

    /// Yarn the output is drawn with
    pub const fn display_yarn(&self) -> YarnStyle {
        YarnStyle::new(self.yarn_width, self.yarn_opacity, self.yarn_color)
    }

    /// Canvas options of the output
    pub const fn render_options(&self) -> RenderOptions {
        RenderOptions {
            background: if self.transparent {
                None
            } else {
                Some(DEFAULT_BACKGROUND)
            },
            scale: self.scale,
        }
    }

    /// Check every option before any image is processed
    ///
    /// # Errors
    ///
    /// Returns an error if any search, yarn, layout or output option is out of range
    pub fn validate(&self) -> Result<()> {
        self.path_config().validate()?;
        self.display_yarn().validate("yarn")?;
        self.render_options().validate()?;
        if !(0.0..0.5).contains(&self.peg_margin) {
            return Err(invalid_parameter(
                "peg_margin",
                &self.peg_margin,
                &"margin must lie in [0, 0.5)",
            ));
        }
        if !self.peg_jitter.is_finite() || self.peg_jitter < 0.0 {
            return Err(invalid_parameter(
                "peg_jitter",
                &self.peg_jitter,
                &"jitter must be a non-negative number",
            ));
        }
        Ok(())
    }

    /// Peg layout for an image of the given size
    ///
    /// # Errors
    ///
    /// Returns an error if a peg file was requested and cannot be loaded
    pub fn peg_layout(&self, width: u32, height: u32) -> Result<Vec<Peg>> {
        if let Some(ref path) = self.load_pegs {
            return load_pegs(path);
        }

        let max_x = f64::from(width.saturating_sub(1));
        let max_y = f64::from(height.saturating_sub(1));
        let coords = match self.peg_shape {
            PegShape::Circle => {
                let diameter = max_x.min(max_y);
                circle_coords(
                    (max_x / 2.0, max_y / 2.0),
                    diameter * (0.5 - self.peg_margin),
                    self.pegs,
                )
            }
            PegShape::Rectangle => {
                let (inset_x, inset_y) = (max_x * self.peg_margin, max_y * self.peg_margin);
                rectangle_coords(
                    (inset_x, inset_y),
                    2.0f64.mul_add(-inset_x, max_x),
                    2.0f64.mul_add(-inset_y, max_y),
                    self.pegs,
                )
            }
        };

        let pegs = pegs_from_coords(coords);
        if pegs.is_empty() {
            warn!("Peg layout is empty, {} pegs requested", self.pegs);
        }
        Ok(jitter_pegs(&pegs, self.peg_jitter, self.seed))
    }
}

/// Orchestrates batch processing of images with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if option validation, target validation or file processing fails
    pub fn process(&mut self) -> Result<()> {
        self.cli.validate()?;
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if is_supported_image(target) || is_blueprint_file(target) {
                if self.should_process_file(target) {
                    Ok(vec![target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &format!(
                        "file must be a blueprint json or one of: {}",
                        SUPPORTED_EXTENSIONS.join(", ")
                    ),
                ))
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in fs::read_dir(target).with_path(target, "read directory")? {
                let path = entry.with_path(target, "read directory entry")?.path();
                if is_supported_image(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"target must be an image file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = self.get_output_path(input_path);
        if output_path.exists() {
            info!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();
        let output_path = self.get_output_path(input_path);

        let (blueprint, stop_reason) = if is_blueprint_file(input_path) {
            let blueprint = Blueprint::from_file(input_path)?;
            if let Some(ref mut pm) = self.progress_manager {
                pm.start_file(index, input_path, blueprint.strand_count());
            }
            (blueprint, None)
        } else {
            let (blueprint, stop_reason) = self.compute_file(input_path, index)?;
            if self.cli.blueprint {
                blueprint.to_file(&Self::get_blueprint_path(input_path))?;
            }
            (blueprint, stop_reason)
        };

        blueprint.render(
            &output_path,
            &self.cli.display_yarn(),
            &self.cli.render_options(),
        )?;

        info!(
            "{}: {} strands, {:?}, {:.1}s",
            input_path.display(),
            blueprint.strand_count(),
            stop_reason,
            start_time.elapsed().as_secs_f64()
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, blueprint.strand_count(), start_time.elapsed());
        }

        Ok(())
    }

    /// Search a strand path for one image
    fn compute_file(
        &mut self,
        input_path: &Path,
        index: usize,
    ) -> Result<(Blueprint, Option<StopReason>)> {
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, self.cli.iterations);
        }

        let bytes = fs::read(input_path).with_path(input_path, "read image")?;
        let field = if self.cli.project_to_yarn_color {
            DarknessField::from_encoded_projected(&bytes, self.cli.yarn_color)?
        } else {
            DarknessField::from_encoded(&bytes)?
        };
        let pegs = self.cli.peg_layout(field.width(), field.height())?;
        if let Some(ref path) = self.cli.save_pegs {
            save_pegs(path, &pegs)?;
        }

        let mut search = BeamSearch::new(&field, &pegs, self.cli.path_config())?;
        while search.step() {
            if let Some(ref mut pm) = self.progress_manager {
                pm.update_iteration(index, search.iteration());
            }
        }

        let result = search.result();
        let blueprint = Blueprint::from_path(
            &result.path,
            search.pegs(),
            field.width(),
            field.height(),
            result.score,
        );
        Ok((blueprint, result.stop_reason))
    }

    fn get_output_path(&self, input_path: &Path) -> PathBuf {
        sibling_path(
            input_path,
            OUTPUT_SUFFIX,
            self.cli.output_format.extension(),
        )
    }

    fn get_blueprint_path(input_path: &Path) -> PathBuf {
        sibling_path(input_path, BLUEPRINT_SUFFIX, "json")
    }
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

fn is_blueprint_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// `<dir>/<stem><suffix>.<extension>` next to the input
fn sibling_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}
