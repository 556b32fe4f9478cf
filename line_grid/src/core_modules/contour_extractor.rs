// THEORY:
// The `ContourExtractor` is the spatial grouping layer. It turns the flat
// foreground mask into a list of discrete regions, each summarized by the
// closed chain of pixels along its outer edge.
//
// Algorithm:
// 1.  **Border following**: Suzuki-Abe border following (via `imageproc`)
//     walks every border in the mask, outer edges and hole edges alike, and
//     records the nesting between them.
// 2.  **External only**: a guide line is a solid stroke, so holes carry no
//     information and neither does anything nested inside a hole. Only outer
//     borders with no parent border are kept.
// 3.  **Ordering**: borders are discovered in raster order of their first
//     pixel (top-to-bottom, then left-to-right). That order is deterministic
//     for a given mask and is the order the dominant-region tie-break uses.
// 4.  **Stateless Utility**: no memory of previous frames.

use crate::core_modules::contour::{Contour, Point};
use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};

pub mod contour_extractor {
    use super::*;

    /// Traces the outer boundary of every top-level connected foreground region.
    pub fn find_external_contours(mask: &GrayImage) -> Vec<Contour> {
        find_contours::<i32>(mask)
            .into_iter()
            .filter(|traced| traced.border_type == BorderType::Outer && traced.parent.is_none())
            .map(|traced| {
                let mut points: Vec<Point> = traced
                    .points
                    .into_iter()
                    .map(|p| Point::new(p.x, p.y))
                    .collect();
                strip_closing_point(&mut points);
                Contour::new(points)
            })
            .filter(|contour| !contour.is_empty())
            .collect()
    }

    /// Removes a trailing copy of the start point so every contour is an open chain
    /// that is implicitly closed.
    fn strip_closing_point(points: &mut Vec<Point>) {
        while points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
    }
}
