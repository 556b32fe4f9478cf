// THEORY:
// The `pipeline` module is the top-level API of the perception engine. It wires
// the stages in `core_modules` into a single call that takes one frame and
// returns everything derived from it: the occupancy grid (the product), plus the
// contours, the dominant region and the fitted heading for anyone who wants to
// look at how the grid came about.
//
// The pipeline is stateless across frames. `generate_report` takes `&self`,
// every intermediate buffer is local to the call, and two calls with the same
// frame produce identical reports.

use crate::config::PipelineConfig;
use crate::core_modules::contour::{Contour, Point};
use crate::core_modules::contour_extractor::contour_extractor;
use crate::core_modules::dominant_region::select_dominant;
use crate::core_modules::grid_quantizer::quantize;
use crate::core_modules::line_fitter::fit_line;
use crate::core_modules::mask_refiner::refine_mask;
use crate::core_modules::preprocessor::preprocess;
use crate::core_modules::segmenter::segment;
use crate::error::Result;
use crate::frame::Frame;
use image::RgbImage;
use log::debug;

// Re-export key data structures for the public API.
pub use crate::config::HeadingConvention;
pub use crate::core_modules::grid_quantizer::{CellState, OccupancyGrid};
pub use crate::core_modules::line_fitter::FittedLine;

/// Everything the pipeline derived from one frame.
#[derive(Debug, Clone)]
pub struct FrameReport {
    /// The occupancy grid built from the refined mask.
    pub grid: OccupancyGrid,
    /// Every external contour, in extraction order.
    pub contours: Vec<Contour>,
    /// Index into `contours` of the region taken as the guide line.
    pub dominant: Option<usize>,
    /// The fitted guide line. Absent when there is no dominant region or it is degenerate.
    pub line: Option<FittedLine>,
    /// Overlay endpoints of the fitted line, `(behind, ahead)`.
    pub segment: Option<(Point, Point)>,
    /// The frame resampled to canvas size.
    pub canvas: RgbImage,
}

impl FrameReport {
    pub fn dominant_contour(&self) -> Option<&Contour> {
        self.dominant.and_then(|i| self.contours.get(i))
    }

    pub fn line_detected(&self) -> bool {
        self.line.is_some()
    }
}

/// The main, top-level struct for the perception engine.
#[derive(Debug, Clone)]
pub struct LinePipeline {
    config: PipelineConfig,
}

impl LinePipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs every stage on one frame.
    pub fn generate_report(&self, frame: &Frame) -> FrameReport {
        let config = &self.config;

        // Stage 1: Preprocessing
        let prepared = preprocess(
            frame.as_image(),
            config.canvas_width,
            config.canvas_height,
            config.blur_kernel_size,
        );

        // Stage 2: Segmentation
        let mask = segment(&prepared.intensity, config.intensity_cutoff);

        // Stage 3: Contour extraction
        let contours = contour_extractor::find_external_contours(&mask);

        // Stages 4-6: Dominant region, refinement, line fit
        let (mask, dominant, line) = match select_dominant(&contours) {
            Some(region) => {
                debug!(
                    "dominant region {} of {}: area {:.1}, {} boundary points",
                    region.index,
                    contours.len(),
                    region.area,
                    region.contour.len()
                );
                let refined = refine_mask(&mask, region.contour);
                let line = fit_line(region.contour, config.heading);
                if line.is_none() {
                    debug!("dominant region is degenerate, skipping line fit");
                }
                (refined, Some(region.index), line)
            }
            None => {
                debug!("no contours in frame");
                (mask, None, None)
            }
        };

        // Stage 7: Quantization
        let grid = quantize(&mask, config.grid_dimension);

        let overlay_segment = line.map(|l| l.endpoints(config.overlay_line_length));
        if let Some(l) = &line {
            debug!(
                "line dir ({:.3}, {:.3}) heading {:.1} deg at ({:.1}, {:.1}), {} occupied cells",
                l.vx,
                l.vy,
                l.angle_degrees(),
                l.x0,
                l.y0,
                grid.occupied_count()
            );
        }

        FrameReport {
            grid,
            contours,
            dominant,
            line,
            segment: overlay_segment,
            canvas: prepared.canvas,
        }
    }
}
