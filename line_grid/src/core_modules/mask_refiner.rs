// THEORY:
// Thresholding keeps every dark blob, but only the guide line should reach the
// occupancy grid. The refiner paints the dominant contour as a filled polygon
// and keeps only the foreground pixels that land inside it. The polygon fill
// also stamps every boundary pixel, because the traced boundary pixels are
// themselves foreground and must survive the intersection.

use crate::core_modules::contour::Contour;
use crate::core_modules::segmenter::{BACKGROUND, FOREGROUND};
use image::{GrayImage, Luma};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point as PolyPoint;

/// Rasterizes the filled interior of `contour` (boundary included) at the given size.
pub fn fill_contour(contour: &Contour, width: u32, height: u32) -> GrayImage {
    let mut filled = GrayImage::new(width, height);
    let mut polygon: Vec<PolyPoint<i32>> = contour
        .points
        .iter()
        .map(|p| PolyPoint::new(p.x, p.y))
        .collect();
    // draw_polygon_mut rejects an explicitly closed polygon.
    while polygon.len() > 1 && polygon.first() == polygon.last() {
        polygon.pop();
    }
    if polygon.len() >= 3 {
        draw_polygon_mut(&mut filled, &polygon, Luma([FOREGROUND]));
    }
    for p in &contour.points {
        if p.x >= 0 && p.y >= 0 && (p.x as u32) < width && (p.y as u32) < height {
            filled.put_pixel(p.x as u32, p.y as u32, Luma([FOREGROUND]));
        }
    }
    filled
}

/// Keeps only the foreground of `mask` that lies inside the filled `dominant` contour.
pub fn refine_mask(mask: &GrayImage, dominant: &Contour) -> GrayImage {
    let (width, height) = mask.dimensions();
    let filled = fill_contour(dominant, width, height);
    GrayImage::from_fn(width, height, |x, y| {
        let keep = mask.get_pixel(x, y).0[0] == FOREGROUND
            && filled.get_pixel(x, y).0[0] == FOREGROUND;
        Luma([if keep { FOREGROUND } else { BACKGROUND }])
    })
}
