// THEORY:
// Frame acquisition sits outside the perception core, but the loop that pulls
// frames through the pipeline does not. `FrameSource` is the seam: anything
// that can hand out frames one at a time (a video decoder, a camera, a folder
// of stills, a test vector) implements it, and `run_frames` drives it.
//
// The loop is strictly frame-at-a-time. A frame is pulled, processed to
// completion and handed to the caller before the stop signal is consulted, so
// a stop request never interrupts a stage mid-way and the last frame's output
// is always delivered.

use crate::error::Result;
use crate::frame::Frame;
use crate::pipeline::{FrameReport, LinePipeline};
use log::info;
use std::collections::VecDeque;

/// A synchronous, pull-based supplier of frames.
pub trait FrameSource {
    /// The next frame, or `Ok(None)` once the sequence is exhausted.
    fn next_frame(&mut self) -> Result<Option<Frame>>;
}

/// Why `run_frames` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndOfStream,
    StopRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames_processed: u64,
    pub frames_with_line: u64,
    pub reason: StopReason,
}

/// Pulls every frame from `source` through `pipeline`, handing each report to `on_report`.
///
/// `should_stop` is polled once per iteration, after the frame's report has
/// been delivered. Errors from the source or from `on_report` abort the run.
pub fn run_frames<S, F, R>(
    source: &mut S,
    pipeline: &LinePipeline,
    mut should_stop: F,
    mut on_report: R,
) -> Result<RunSummary>
where
    S: FrameSource + ?Sized,
    F: FnMut() -> bool,
    R: FnMut(u64, FrameReport) -> Result<()>,
{
    let mut frames_processed = 0u64;
    let mut frames_with_line = 0u64;

    let reason = loop {
        let Some(frame) = source.next_frame()? else {
            break StopReason::EndOfStream;
        };

        let report = pipeline.generate_report(&frame);
        if report.line_detected() {
            frames_with_line += 1;
        }
        on_report(frames_processed, report)?;
        frames_processed += 1;

        if should_stop() {
            break StopReason::StopRequested;
        }
    };

    info!(
        "processed {} frames ({} with a guide line), {:?}",
        frames_processed, frames_with_line, reason
    );
    Ok(RunSummary {
        frames_processed,
        frames_with_line,
        reason,
    })
}

/// An in-memory frame sequence.
#[derive(Debug, Default)]
pub struct FrameQueue {
    frames: VecDeque<Frame>,
}

impl FrameQueue {
    pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FrameSource for FrameQueue {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        Ok(self.frames.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::error::LineGridError;
    use image::{Rgb, RgbImage};

    fn small_pipeline() -> LinePipeline {
        LinePipeline::new(PipelineConfig {
            canvas_width: 40,
            canvas_height: 30,
            grid_dimension: 5,
            grid_view_size: 50,
            ..Default::default()
        })
        .expect("valid config")
    }

    fn blank() -> Frame {
        Frame::new(RgbImage::from_pixel(40, 30, Rgb([200, 200, 200])))
    }

    #[test]
    fn runs_until_end_of_stream() {
        let mut queue = FrameQueue::new(vec![blank(), blank(), blank()]);
        let mut seen = Vec::new();
        let summary = run_frames(&mut queue, &small_pipeline(), || false, |i, _| {
            seen.push(i);
            Ok(())
        })
        .expect("run succeeds");
        assert_eq!(summary.frames_processed, 3);
        assert_eq!(summary.reason, StopReason::EndOfStream);
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn empty_source_is_not_an_error() {
        let mut queue = FrameQueue::default();
        let summary = run_frames(&mut queue, &small_pipeline(), || false, |_, _| Ok(()))
            .expect("run succeeds");
        assert_eq!(summary.frames_processed, 0);
        assert_eq!(summary.reason, StopReason::EndOfStream);
    }

    #[test]
    fn stop_is_honored_after_current_frame() {
        let mut queue = FrameQueue::new(vec![blank(), blank(), blank()]);
        let mut delivered = 0;
        let summary = run_frames(&mut queue, &small_pipeline(), || true, |_, _| {
            delivered += 1;
            Ok(())
        })
        .expect("run succeeds");
        assert_eq!(delivered, 1);
        assert_eq!(summary.frames_processed, 1);
        assert_eq!(summary.reason, StopReason::StopRequested);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn sink_errors_abort_the_run() {
        let mut queue = FrameQueue::new(vec![blank(), blank()]);
        let result = run_frames(&mut queue, &small_pipeline(), || false, |_, _| {
            Err(LineGridError::Source("disk full".to_string()))
        });
        assert!(matches!(result, Err(LineGridError::Source(_))));
        assert_eq!(queue.len(), 1);
    }
}
