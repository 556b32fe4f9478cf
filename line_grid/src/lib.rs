// THEORY:
// This file is the main entry point for the `line_grid` library crate.
//
// The primary goal is to export the `LinePipeline` and its associated data
// structures (`PipelineConfig`, `FrameReport`, `OccupancyGrid`, etc.) as the
// high-level interface for the perception engine. The individual stages live in
// `core_modules` and stay public so they can be tested and reused on their own.

pub mod config;
pub mod core_modules;
pub mod error;
pub mod frame;
pub mod overlay;
pub mod pipeline;
pub mod source;

pub use config::{HeadingConvention, PipelineConfig};
pub use error::{LineGridError, Result};
pub use frame::Frame;
pub use pipeline::{CellState, FittedLine, FrameReport, LinePipeline, OccupancyGrid};
pub use source::{FrameQueue, FrameSource, RunSummary, StopReason, run_frames};
