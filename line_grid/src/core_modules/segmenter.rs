// THEORY:
// The `Segmenter` makes the one hard decision of the pipeline: which pixels are
// "line" and which are "floor". The guide line is darker than its surroundings,
// so the threshold is inverted: dark pixels become the active value (255) that
// contour tracing follows. The cutoff is fixed per pipeline; there is no
// adaptive or per-frame threshold.

use image::{GrayImage, Luma};

pub const FOREGROUND: u8 = 255;
pub const BACKGROUND: u8 = 0;

/// Inverse binary threshold: `intensity < cutoff` becomes foreground.
pub fn segment(intensity: &GrayImage, cutoff: u8) -> GrayImage {
    imageproc::map::map_colors(intensity, |p| {
        if p.0[0] < cutoff {
            Luma([FOREGROUND])
        } else {
            Luma([BACKGROUND])
        }
    })
}

/// Number of foreground pixels in a mask.
pub fn foreground_count(mask: &GrayImage) -> usize {
    mask.pixels().filter(|p| p.0[0] == FOREGROUND).count()
}
