// THEORY:
// Every tunable number of the pipeline lives here instead of inline in the
// stages. Stages receive the individual values they need, never the whole
// struct, so each stage stays a plain function of its inputs and can be
// exercised in isolation by the tests.

use crate::error::{LineGridError, Result};
use serde::{Deserialize, Serialize};

/// Which of the two opposite unit vectors along the fitted axis is reported.
///
/// A total-least-squares fit only determines an axis; the sign is a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingConvention {
    /// The principal axis with `vx >= 0`, then negated, giving `vx <= 0`.
    /// This is the behavior the line follower was originally tuned against.
    #[default]
    Negated,
    /// The principal axis as fitted, `vx >= 0`.
    Principal,
    /// Points up the image (`vy <= 0`). Horizontal lines resolve to `vx >= 0`.
    TowardTop,
}

/// Largest accepted grid side.
pub const MAX_GRID_DIMENSION: u32 = 4096;

/// Configuration for the `LinePipeline`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Width of the working canvas every frame is resized to.
    pub canvas_width: u32,
    /// Height of the working canvas every frame is resized to.
    pub canvas_height: u32,
    /// Side of the Gaussian smoothing kernel. Must be odd; 1 disables smoothing.
    pub blur_kernel_size: u32,
    /// Pixels with intensity strictly below this value become foreground.
    pub intensity_cutoff: u8,
    /// Side length N of the N x N occupancy grid.
    pub grid_dimension: u32,
    /// Distance from the anchor to each overlay endpoint, in canvas pixels.
    pub overlay_line_length: f64,
    pub heading: HeadingConvention,
    /// Side of the square grid visualization, in pixels.
    pub grid_view_size: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            blur_kernel_size: 5,
            intensity_cutoff: 70,
            grid_dimension: 50,
            overlay_line_length: 60.0,
            heading: HeadingConvention::Negated,
            grid_view_size: 900,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(LineGridError::InvalidConfig(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.blur_kernel_size == 0 || self.blur_kernel_size % 2 == 0 {
            return Err(LineGridError::InvalidConfig(format!(
                "blur kernel size must be odd, got {}",
                self.blur_kernel_size
            )));
        }
        if self.grid_dimension == 0 || self.grid_dimension > MAX_GRID_DIMENSION {
            return Err(LineGridError::InvalidConfig(format!(
                "grid dimension must be between 1 and {MAX_GRID_DIMENSION}, got {}",
                self.grid_dimension
            )));
        }
        if !self.overlay_line_length.is_finite() || self.overlay_line_length < 0.0 {
            return Err(LineGridError::InvalidConfig(format!(
                "overlay line length must be finite and non-negative, got {}",
                self.overlay_line_length
            )));
        }
        if self.grid_view_size < self.grid_dimension {
            return Err(LineGridError::InvalidConfig(format!(
                "grid view of {} px cannot show {} cells per side",
                self.grid_view_size, self.grid_dimension
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn even_kernel_is_rejected() {
        let config = PipelineConfig {
            blur_kernel_size: 4,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LineGridError::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_grid_is_rejected() {
        let config = PipelineConfig {
            grid_dimension: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let config = PipelineConfig {
            grid_dimension: 70_000,
            grid_view_size: 70_000,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LineGridError::InvalidConfig(_))
        ));

        let largest = PipelineConfig {
            grid_dimension: MAX_GRID_DIMENSION,
            grid_view_size: MAX_GRID_DIMENSION,
            ..Default::default()
        };
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{ "intensity_cutoff": 90, "heading": "toward_top" }"#)
                .expect("config should parse");
        assert_eq!(config.intensity_cutoff, 90);
        assert_eq!(config.heading, HeadingConvention::TowardTop);
        assert_eq!(config.grid_dimension, 50);
        assert_eq!(config.canvas_width, 800);
    }
}
