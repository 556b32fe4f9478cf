// THEORY:
// The `Preprocessor` normalizes whatever the camera delivers into the one
// representation the rest of the pipeline reasons about: a fixed-size,
// single-channel, lightly smoothed intensity image.
//
// 1.  **Fixed canvas**: every frame is resampled to the same canvas, so all
//     pixel-space constants downstream (overlay length, grid cell size) mean the
//     same thing regardless of the source resolution.
// 2.  **Luminance**: colour is collapsed with Rec. 601 luma weights. A dark tape
//     line is dark in every channel, so brightness alone carries the signal.
// 3.  **Smoothing**: a small Gaussian removes isolated dark specks (dust, torn
//     tape) before thresholding turns them into spurious foreground. The
//     kernel has exactly the configured number of taps per axis.
// 4.  **Empty frames**: a frame with no pixels carries no evidence of a line,
//     so it maps to a canvas that is background everywhere.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, RgbImage};
use imageproc::filter::separable_filter_equal;

/// Intensity that no cutoff can classify as foreground.
const EMPTY_INTENSITY: u8 = u8::MAX;

/// Output of the preprocessing stage.
#[derive(Debug, Clone)]
pub struct Preprocessed {
    /// The frame resampled to canvas size, kept for overlay rendering.
    pub canvas: RgbImage,
    /// Smoothed single-channel intensity at canvas size.
    pub intensity: GrayImage,
}

pub fn preprocess(
    frame: &RgbImage,
    canvas_width: u32,
    canvas_height: u32,
    blur_kernel_size: u32,
) -> Preprocessed {
    if frame.width() == 0 || frame.height() == 0 {
        return Preprocessed {
            canvas: RgbImage::new(canvas_width, canvas_height),
            intensity: GrayImage::from_pixel(canvas_width, canvas_height, Luma([EMPTY_INTENSITY])),
        };
    }

    let canvas = if frame.dimensions() == (canvas_width, canvas_height) {
        frame.clone()
    } else {
        imageops::resize(frame, canvas_width, canvas_height, FilterType::Triangle)
    };
    let gray = luminance(&canvas);
    let intensity = match gaussian_kernel(blur_kernel_size) {
        Some(kernel) => separable_filter_equal(&gray, &kernel),
        None => gray,
    };
    Preprocessed { canvas, intensity }
}

/// Rec. 601 luma, rounded to the nearest integer.
pub fn luminance(image: &RgbImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        let luma = 0.299_f64 * r as f64 + 0.587_f64 * g as f64 + 0.114_f64 * b as f64;
        Luma([luma.round().clamp(0.0, 255.0) as u8])
    })
}

/// Sigma for a square Gaussian kernel of side `size`, the same rule OpenCV
/// applies when only the kernel size is given. `None` means no smoothing.
pub fn kernel_sigma(size: u32) -> Option<f32> {
    if size <= 1 {
        return None;
    }
    Some(0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8)
}

/// Normalized 1-D Gaussian with `size` taps, centred on the middle tap.
pub fn gaussian_kernel(size: u32) -> Option<Vec<f32>> {
    let sigma = kernel_sigma(size)?;
    let radius = (size / 2) as f32;
    let weights: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - radius;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let total: f32 = weights.iter().sum();
    Some(weights.into_iter().map(|w| w / total).collect())
}
