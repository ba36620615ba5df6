//! Frames as handed out by a pipeline runtime.
//!
//! A frame is an n-dimensional block cut from a larger dataset. Plugins that
//! work on sinograms squeeze away the singleton axes the runtime leaves in
//! place and reject anything that does not collapse to a non-empty 2-D array.

use std::collections::VecDeque;

use crate::{Sinogram, SinogramView};

/// Errors produced while validating or supplying frames.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    #[error("invalid frame shape {shape:?} (expected a non-empty 2-D array after squeezing)")]
    InvalidFrameShape { shape: Vec<usize> },

    #[error("invalid frame buffer length (expected {expected} values, got {got})")]
    InvalidBufferLength { expected: usize, got: usize },

    #[error("frame source failed: {0}")]
    Source(String),
}

/// Row-major `f64` block with an explicit shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    shape: Vec<usize>,
    data: Vec<f64>,
}

impl Frame {
    /// Wrap `data` with the given shape, checking that the lengths agree.
    pub fn new(shape: Vec<usize>, data: Vec<f64>) -> Result<Self, FrameError> {
        let Some(expected) = shape.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d)) else {
            return Err(FrameError::InvalidFrameShape { shape });
        };
        if data.len() != expected {
            return Err(FrameError::InvalidBufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Drop every axis of length 1 and view the rest as a sinogram.
    ///
    /// Fails unless exactly two axes remain and both are non-empty. A frame
    /// with a zero-length axis fails even if it has other singleton axes.
    pub fn squeeze(&self) -> Result<SinogramView<'_>, FrameError> {
        let invalid = || FrameError::InvalidFrameShape {
            shape: self.shape.clone(),
        };
        if self.shape.contains(&0) {
            return Err(invalid());
        }
        let kept: Vec<usize> = self.shape.iter().copied().filter(|&d| d != 1).collect();
        let &[rows, cols] = kept.as_slice() else {
            return Err(invalid());
        };
        Ok(SinogramView {
            rows,
            cols,
            data: &self.data,
        })
    }
}

impl From<Sinogram> for Frame {
    fn from(sino: Sinogram) -> Self {
        Self {
            shape: vec![sino.rows, sino.cols],
            data: sino.data,
        }
    }
}

/// Supplier of frames, one at a time.
///
/// How the frames are cut from the underlying dataset, loaded and batched
/// is the implementor's business.
pub trait FrameSource {
    /// Total number of frames, when known up front.
    fn frame_count(&self) -> Option<usize> {
        None
    }

    /// Next frame, `None` once the source is exhausted.
    fn next_frame(&mut self) -> Option<Result<Frame, FrameError>>;
}

/// In-memory frame source, mostly useful for tests and small datasets.
#[derive(Clone, Debug, Default)]
pub struct VecFrameSource {
    frames: VecDeque<Frame>,
}

impl VecFrameSource {
    pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl FrameSource for VecFrameSource {
    fn frame_count(&self) -> Option<usize> {
        Some(self.frames.len())
    }

    fn next_frame(&mut self) -> Option<Result<Frame, FrameError>> {
        self.frames.pop_front().map(Ok)
    }
}
