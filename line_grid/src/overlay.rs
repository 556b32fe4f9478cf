// THEORY:
// Operator-facing rendering. Nothing here feeds back into the pipeline; these
// functions only turn a `FrameReport` into pictures a human can check at a
// glance: the canvas with traced contours and the fitted heading on top, and a
// block view of the occupancy grid.

use crate::core_modules::contour::{Contour, Point};
use crate::core_modules::grid_quantizer::{CellState, OccupancyGrid};
use crate::pipeline::FrameReport;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

pub const CONTOUR_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const LINE_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
pub const FREE_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
pub const OCCUPIED_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
pub const GRID_LINE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

const CONTOUR_THICKNESS: i32 = 2;
const LINE_THICKNESS: i32 = 3;

/// The canvas with every external contour outlined and the fitted segment drawn.
pub fn draw_overlay(report: &FrameReport) -> RgbImage {
    let mut canvas = report.canvas.clone();
    for contour in &report.contours {
        draw_contour(&mut canvas, contour, CONTOUR_THICKNESS, CONTOUR_COLOR);
    }
    if let Some((back, ahead)) = report.segment {
        draw_thick_segment(&mut canvas, back, ahead, LINE_THICKNESS, LINE_COLOR);
    }
    canvas
}

/// A square block view of the grid, `size` pixels per side, with cell outlines.
pub fn render_grid(grid: &OccupancyGrid, size: u32) -> RgbImage {
    let n = grid.dimension().max(1);
    let mut view = RgbImage::from_fn(size, size, |x, y| {
        let col = (x as u64 * n as u64 / size as u64) as u32;
        let row = (y as u64 * n as u64 / size as u64) as u32;
        match grid.get(row, col) {
            Some(CellState::Occupied) => OCCUPIED_COLOR,
            _ => FREE_COLOR,
        }
    });

    let cell = size / n;
    if cell > 0 {
        for row in 0..n {
            for col in 0..n {
                let rect = Rect::at((col * cell) as i32, (row * cell) as i32).of_size(cell + 1, cell + 1);
                draw_hollow_rect_mut(&mut view, rect, GRID_LINE_COLOR);
            }
        }
    }
    view
}

fn draw_contour(canvas: &mut RgbImage, contour: &Contour, thickness: i32, color: Rgb<u8>) {
    let points = &contour.points;
    match points.len() {
        0 => {}
        1 => draw_thick_segment(canvas, points[0], points[0], thickness, color),
        n => {
            for i in 0..n {
                draw_thick_segment(canvas, points[i], points[(i + 1) % n], thickness, color);
            }
        }
    }
}

fn draw_thick_segment(canvas: &mut RgbImage, a: Point, b: Point, thickness: i32, color: Rgb<u8>) {
    let lo = -(thickness - 1) / 2;
    let hi = thickness / 2;
    for dy in lo..=hi {
        for dx in lo..=hi {
            draw_line_segment_mut(
                canvas,
                ((a.x + dx) as f32, (a.y + dy) as f32),
                ((b.x + dx) as f32, (b.y + dy) as f32),
                color,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::frame::Frame;
    use crate::pipeline::LinePipeline;
    use image::GrayImage;

    #[test]
    fn grid_view_colors_cells() {
        let mut mask = GrayImage::new(4, 4);
        mask.put_pixel(0, 0, image::Luma([255]));
        let grid = crate::core_modules::grid_quantizer::quantize(&mask, 2);
        let view = render_grid(&grid, 100);
        assert_eq!(view.dimensions(), (100, 100));
        assert_eq!(*view.get_pixel(25, 25), OCCUPIED_COLOR);
        assert_eq!(*view.get_pixel(75, 75), FREE_COLOR);
        assert_eq!(*view.get_pixel(0, 10), GRID_LINE_COLOR);
        assert_eq!(*view.get_pixel(50, 30), GRID_LINE_COLOR);
    }

    #[test]
    fn overlay_marks_line_and_contour() {
        let mut image = RgbImage::from_pixel(200, 150, Rgb([230, 230, 230]));
        for y in 20..130 {
            for x in 90..110 {
                image.put_pixel(x, y, Rgb([10, 10, 10]));
            }
        }
        let config = PipelineConfig {
            canvas_width: 200,
            canvas_height: 150,
            grid_dimension: 10,
            grid_view_size: 100,
            ..Default::default()
        };
        let pipeline = LinePipeline::new(config).expect("valid config");
        let report = pipeline.generate_report(&Frame::new(image));
        let overlay = draw_overlay(&report);
        assert_eq!(overlay.dimensions(), (200, 150));
        assert!(overlay.pixels().any(|p| *p == CONTOUR_COLOR));
        let (back, ahead) = report.segment.expect("line fitted");
        let mid = Point::new((back.x + ahead.x) / 2, (back.y + ahead.y) / 2);
        assert_eq!(*overlay.get_pixel(mid.x as u32, mid.y as u32), LINE_COLOR);
    }

    #[test]
    fn blank_report_overlay_is_the_canvas() {
        let image = RgbImage::from_pixel(40, 30, Rgb([250, 250, 250]));
        let config = PipelineConfig {
            canvas_width: 40,
            canvas_height: 30,
            grid_dimension: 5,
            grid_view_size: 50,
            ..Default::default()
        };
        let pipeline = LinePipeline::new(config).expect("valid config");
        let report = pipeline.generate_report(&Frame::new(image));
        assert_eq!(draw_overlay(&report), report.canvas);
    }
}
