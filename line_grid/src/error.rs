use thiserror::Error;

/// Failures surfaced by the library. Per-frame processing itself never fails;
/// these cover construction, frame ingestion and frame sources.
#[derive(Error, Debug)]
pub enum LineGridError {
    #[error("Frame buffer has {got} bytes, expected {expected} for {width}x{height} with {channels} channels")]
    FrameSize {
        width: u32,
        height: u32,
        channels: u32,
        expected: usize,
        got: usize,
    },

    #[error("Invalid pipeline configuration: {0}")]
    InvalidConfig(String),

    #[error("Image codec failure: {0}")]
    Image(#[from] image::ImageError),

    #[error("Frame source I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("Frame source failed: {0}")]
    Source(String),
}

pub type Result<T> = std::result::Result<T, LineGridError>;
