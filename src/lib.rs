//! Scuba Pic Fix - library crate.
//!
//! Per-channel color correction of RGBA images: manual scale factors,
//! gray-world auto balance, and the render pipeline that keeps the
//! displayed frame in sync with both. Used by the desktop editor and
//! the `fix_colors` command-line tool.

pub mod buffer;
pub mod color;
pub mod config;
pub mod error;
pub mod image_io;
pub mod pipeline;

pub use buffer::{Channel, PixelBuffer};
pub use color::ScaleFactors;
pub use error::EditError;
pub use pipeline::{FrameSink, NullSink, RenderPipeline};
