// THEORY:
// Pipeline settings are layered the same way every run: built-in defaults, then
// an optional TOML file, then `LINE_GRID_*` environment variables, and finally
// whatever the command line overrides. Missing keys fall back to the defaults
// through `#[serde(default)]` on `PipelineConfig`.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use line_grid::{HeadingConvention, PipelineConfig};
use std::path::Path;

pub const ENV_PREFIX: &str = "LINE_GRID";

/// Loads the pipeline configuration from an optional file plus the environment.
pub fn load(path: Option<&Path>) -> Result<PipelineConfig> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path).required(true));
    }
    let settings = builder
        .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()
        .context("failed to read pipeline settings")?;

    settings
        .try_deserialize()
        .context("failed to parse pipeline settings")
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Heading {
    Negated,
    Principal,
    TowardTop,
}

impl From<Heading> for HeadingConvention {
    fn from(heading: Heading) -> Self {
        match heading {
            Heading::Negated => HeadingConvention::Negated,
            Heading::Principal => HeadingConvention::Principal,
            Heading::TowardTop => HeadingConvention::TowardTop,
        }
    }
}

/// Command-line overrides, applied on top of the file and environment.
#[derive(Debug, Clone, Default, Args)]
pub struct Overrides {
    /// Width of the working canvas.
    #[arg(long)]
    pub canvas_width: Option<u32>,

    /// Height of the working canvas.
    #[arg(long)]
    pub canvas_height: Option<u32>,

    /// Gaussian kernel side (odd).
    #[arg(long)]
    pub blur_kernel_size: Option<u32>,

    /// Intensities strictly below this become foreground.
    #[arg(long)]
    pub cutoff: Option<u8>,

    /// Side N of the N x N occupancy grid.
    #[arg(long)]
    pub grid_dimension: Option<u32>,

    /// Half-length of the drawn guide line.
    #[arg(long)]
    pub line_length: Option<f64>,

    /// Sign convention of the fitted direction.
    #[arg(long, value_enum)]
    pub heading: Option<Heading>,

    /// Side of the rendered grid image.
    #[arg(long)]
    pub grid_view_size: Option<u32>,
}

impl Overrides {
    pub fn apply(&self, config: &mut PipelineConfig) {
        if let Some(v) = self.canvas_width {
            config.canvas_width = v;
        }
        if let Some(v) = self.canvas_height {
            config.canvas_height = v;
        }
        if let Some(v) = self.blur_kernel_size {
            config.blur_kernel_size = v;
        }
        if let Some(v) = self.cutoff {
            config.intensity_cutoff = v;
        }
        if let Some(v) = self.grid_dimension {
            config.grid_dimension = v;
        }
        if let Some(v) = self.line_length {
            config.overlay_line_length = v;
        }
        if let Some(v) = self.heading {
            config.heading = v.into();
        }
        if let Some(v) = self.grid_view_size {
            config.grid_view_size = v;
        }
    }
}
