// THEORY:
// `Frame` is the "dumb" container at the bottom of the stack: one captured
// image, three 8-bit channels, nothing else. It is produced by a frame source,
// owned by exactly one pipeline invocation, and dropped when that invocation
// returns. Raw capture backends hand us interleaved byte buffers, so the
// constructors validate the length before anything downstream indexes into it.

use crate::error::{LineGridError, Result};
use image::{DynamicImage, RgbImage};

const RGB_CHANNELS: u32 = 3;
const RGBA_CHANNELS: u32 = 4;

/// A single captured RGB image.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    image: RgbImage,
}

impl Frame {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    /// Wraps an interleaved `RGBRGB...` buffer. Zero-area buffers are rejected.
    pub fn from_rgb_bytes(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self> {
        let expected = (width as usize) * (height as usize) * RGB_CHANNELS as usize;
        let got = bytes.len();
        let empty = width == 0 || height == 0;
        match RgbImage::from_raw(width, height, bytes) {
            Some(image) if !empty && got == expected => Ok(Self::new(image)),
            _ => Err(LineGridError::FrameSize {
                width,
                height,
                channels: RGB_CHANNELS,
                expected,
                got,
            }),
        }
    }

    /// Converts an interleaved `RGBARGBA...` buffer, discarding alpha.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let expected = (width as usize) * (height as usize) * RGBA_CHANNELS as usize;
        if width == 0 || height == 0 || bytes.len() != expected {
            return Err(LineGridError::FrameSize {
                width,
                height,
                channels: RGBA_CHANNELS,
                expected,
                got: bytes.len(),
            });
        }
        let rgb: Vec<u8> = bytes
            .chunks_exact(RGBA_CHANNELS as usize)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        Self::from_rgb_bytes(width, height, rgb)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.image
    }
}

impl From<RgbImage> for Frame {
    fn from(image: RgbImage) -> Self {
        Self::new(image)
    }
}

impl From<DynamicImage> for Frame {
    fn from(image: DynamicImage) -> Self {
        Self::new(image.into_rgb8())
    }
}
