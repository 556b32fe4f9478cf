// THEORY:
// Concrete frame sources for the tester. The library only knows the
// `FrameSource` trait; decoding stills or video is the binary's business.
// A directory of stills is always available. Video files go through OpenCV,
// which is an optional native dependency gated behind the `video` feature.

use anyhow::{Context, Result, bail};
use line_grid::{Frame, FrameSource};
use log::debug;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "webp"];

/// Picks a source for `input`: a directory of stills, or a video file.
pub fn open(input: &Path) -> Result<Box<dyn FrameSource + Send>> {
    if input.is_dir() {
        return Ok(Box::new(ImageDirSource::open(input)?));
    }
    open_video(input)
}

#[cfg(feature = "video")]
fn open_video(input: &Path) -> Result<Box<dyn FrameSource + Send>> {
    Ok(Box::new(video::VideoSource::open(input)?))
}

#[cfg(not(feature = "video"))]
fn open_video(input: &Path) -> Result<Box<dyn FrameSource + Send>> {
    bail!(
        "{} is not a directory; video input needs the `video` feature",
        input.display()
    )
}

/// Still images from one directory, in file-name order.
#[derive(Debug)]
pub struct ImageDirSource {
    paths: VecDeque<PathBuf>,
}

impl ImageDirSource {
    pub fn open(dir: &Path) -> Result<Self> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).with_context(|| format!("cannot read {}", dir.display()))? {
            let path = entry?.path();
            if path.is_file() && is_image(&path) {
                paths.push(path);
            }
        }
        if paths.is_empty() {
            bail!("no images found in {}", dir.display());
        }
        paths.sort();
        debug!("{} images queued from {}", paths.len(), dir.display());
        Ok(Self {
            paths: paths.into(),
        })
    }

    pub fn remaining(&self) -> usize {
        self.paths.len()
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

impl FrameSource for ImageDirSource {
    fn next_frame(&mut self) -> line_grid::Result<Option<Frame>> {
        let Some(path) = self.paths.pop_front() else {
            return Ok(None);
        };
        debug!("decoding {}", path.display());
        let image = image::open(&path)?;
        Ok(Some(Frame::from(image)))
    }
}

#[cfg(feature = "video")]
pub mod video {
    use anyhow::{Result, bail};
    use line_grid::{Frame, FrameSource, LineGridError};
    use opencv::{
        core::Mat,
        imgproc,
        prelude::*,
        videoio::{self, VideoCapture},
    };
    use std::path::Path;

    fn source_error(err: opencv::Error) -> LineGridError {
        LineGridError::Source(err.to_string())
    }

    /// Frames decoded from a video file by OpenCV.
    pub struct VideoSource {
        capture: VideoCapture,
        raw: Mat,
    }

    impl VideoSource {
        pub fn open(path: &Path) -> Result<Self> {
            let capture = VideoCapture::from_file(&path.to_string_lossy(), videoio::CAP_ANY)?;
            if !capture.is_opened()? {
                bail!("cannot open video {}", path.display());
            }
            Ok(Self {
                capture,
                raw: Mat::default(),
            })
        }
    }

    impl FrameSource for VideoSource {
        fn next_frame(&mut self) -> line_grid::Result<Option<Frame>> {
            let got = self.capture.read(&mut self.raw).map_err(source_error)?;
            if !got || self.raw.empty() {
                return Ok(None);
            }

            // OpenCV decodes to BGR.
            let mut rgb = Mat::default();
            imgproc::cvt_color(&self.raw, &mut rgb, imgproc::COLOR_BGR2RGB, 0)
                .map_err(source_error)?;
            let size = rgb.size().map_err(source_error)?;
            let bytes = rgb.data_bytes().map_err(source_error)?.to_vec();
            Frame::from_rgb_bytes(size.width as u32, size.height as u32, bytes).map(Some)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("line_grid_{name}_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn directory_frames_come_in_name_order() {
        let dir = scratch_dir("dir_source");
        for (name, shade) in [("b.png", 20u8), ("a.png", 10), ("c.png", 30)] {
            RgbImage::from_pixel(4, 3, Rgb([shade; 3]))
                .save(dir.join(name))
                .unwrap();
        }
        fs::write(dir.join("notes.txt"), "not a frame").unwrap();

        let mut source = ImageDirSource::open(&dir).unwrap();
        assert_eq!(source.remaining(), 3);
        let mut shades = Vec::new();
        while let Some(frame) = source.next_frame().unwrap() {
            assert_eq!((frame.width(), frame.height()), (4, 3));
            shades.push(frame.as_image().get_pixel(0, 0)[0]);
        }
        assert_eq!(shades, vec![10, 20, 30]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn empty_directory_is_rejected() {
        let dir = scratch_dir("empty_source");
        assert!(ImageDirSource::open(&dir).is_err());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn extensions_match_case_insensitively() {
        assert!(is_image(Path::new("frame_001.PNG")));
        assert!(is_image(Path::new("frame.jpeg")));
        assert!(!is_image(Path::new("frame.json")));
        assert!(!is_image(Path::new("frame")));
    }
}
