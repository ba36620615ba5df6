//! Core types for tomographic center-of-rotation estimation.
//!
//! This crate is intentionally small. It owns the frame and sinogram
//! containers handed between a pipeline runtime and its plugins, the
//! non-finite sanitization step, and the logger helpers. It does *not*
//! know how frames are stored on disk or how a dataset is chunked.

mod frame;
mod kind;
mod logger;
mod phantom;
mod sinogram;

pub use frame::{Frame, FrameError, FrameSource, VecFrameSource};
pub use kind::{DataRole, FrameKind};
pub use phantom::{parallel_beam_sinogram, Blob};
pub use sinogram::{sanitize, Sinogram, SinogramView};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
