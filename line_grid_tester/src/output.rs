// THEORY:
// Everything the tester writes to disk for one frame: the annotated canvas,
// the rendered occupancy grid and, when asked for, one JSON line carrying the
// grid and the fitted line so downstream tools can consume the numbers
// without decoding images.

use image::ImageEncoder;
use image::RgbImage;
use line_grid::core_modules::contour::Point;
use line_grid::overlay::{draw_overlay, render_grid};
use line_grid::{FittedLine, FrameReport, OccupancyGrid};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const GRIDS_FILE: &str = "grids.jsonl";

/// Writes an RGB image as PNG.
pub fn save_png(path: &Path, image: &RgbImage) -> Result<(), image::error::ImageError> {
    let output = BufWriter::new(File::create(path)?);
    let encoder = image::codecs::png::PngEncoder::new(output);

    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgb8,
    )?;

    Ok(())
}

/// One line of `grids.jsonl`.
#[derive(Debug, Serialize)]
struct GridRecord<'a> {
    frame: u64,
    grid: &'a OccupancyGrid,
    line: Option<FittedLine>,
    heading_degrees: Option<f64>,
    segment: Option<(Point, Point)>,
    contours: usize,
}

pub struct OutputWriter {
    dir: PathBuf,
    grid_view_size: u32,
    grids: Option<BufWriter<File>>,
}

impl OutputWriter {
    pub fn create(dir: &Path, grid_view_size: u32, emit_grids: bool) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let grids = if emit_grids {
            Some(BufWriter::new(File::create(dir.join(GRIDS_FILE))?))
        } else {
            None
        };
        Ok(Self {
            dir: dir.to_path_buf(),
            grid_view_size,
            grids,
        })
    }

    pub fn write(&mut self, index: u64, report: &FrameReport) -> line_grid::Result<()> {
        save_png(
            &self.dir.join(format!("overlay_{index:06}.png")),
            &draw_overlay(report),
        )?;
        save_png(
            &self.dir.join(format!("grid_{index:06}.png")),
            &render_grid(&report.grid, self.grid_view_size),
        )?;

        if let Some(grids) = self.grids.as_mut() {
            let record = GridRecord {
                frame: index,
                grid: &report.grid,
                line: report.line,
                heading_degrees: report.line.map(|l| l.angle_degrees()),
                segment: report.segment,
                contours: report.contours.len(),
            };
            serde_json::to_writer(&mut *grids, &record).map_err(io::Error::from)?;
            grids.write_all(b"\n")?;
        }
        Ok(())
    }

    pub fn finish(self) -> io::Result<()> {
        if let Some(mut grids) = self.grids {
            grids.flush()?;
        }
        Ok(())
    }
}
