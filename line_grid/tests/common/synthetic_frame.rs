use image::{Rgb, RgbImage};
use line_grid::Frame;

pub const BRIGHT: Rgb<u8> = Rgb([235, 235, 235]);
pub const DARK: Rgb<u8> = Rgb([5, 5, 5]);

/// A uniformly bright frame.
pub fn blank(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, BRIGHT)
}

/// Paints `[x0, x1) x [y0, y1)` dark.
pub fn paint_rect(image: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32) {
    for y in y0..y1.min(image.height()) {
        for x in x0..x1.min(image.width()) {
            image.put_pixel(x, y, DARK);
        }
    }
}

/// Paints a dark stroke of the given half-width along the segment from `a` to `b`.
pub fn paint_stroke(image: &mut RgbImage, a: (f64, f64), b: (f64, f64), half_width: f64) {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = dx * dx + dy * dy;
    for y in 0..image.height() {
        for x in 0..image.width() {
            let (px, py) = (x as f64 - a.0, y as f64 - a.1);
            let t = ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0);
            let (ex, ey) = (px - t * dx, py - t * dy);
            if ex * ex + ey * ey <= half_width * half_width {
                image.put_pixel(x, y, DARK);
            }
        }
    }
}

pub fn frame(image: RgbImage) -> Frame {
    Frame::new(image)
}
