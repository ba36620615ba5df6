//! Feeding frames from a [`FrameSource`] through a [`FrameProcessor`].

use serde::{Deserialize, Serialize};
use tomo_centering_core::FrameSource;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::processor::{FrameProcessor, ProcessError, ResultRecord};

/// What to do when a frame fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnFrameError {
    /// Stop and return the error.
    #[default]
    Abort,
    /// Record the error in the report and continue with the next frame.
    Skip,
}

/// Errors that stop a dispatch run.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    #[error("plugin `{plugin}` accepts no frames per call")]
    ZeroFramesPerCall { plugin: String },
    #[error("frame {index}: {source}")]
    Frame {
        index: usize,
        #[source]
        source: ProcessError,
    },
}

/// Outcome of one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameOutcome {
    pub index: usize,
    #[serde(default)]
    pub record: Option<ResultRecord>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Per-frame results of a dispatch run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DispatchReport {
    pub plugin: String,
    pub frames: Vec<FrameOutcome>,
}

impl DispatchReport {
    /// Centers of rotation of the successful frames, in frame order.
    pub fn centers(&self) -> Vec<f64> {
        self.frames
            .iter()
            .filter_map(|f| f.record.map(|r| r.center_of_rotation))
            .collect()
    }

    pub fn failed(&self) -> usize {
        self.frames.iter().filter(|f| f.error.is_some()).count()
    }
}

/// Pull every frame from `source` and hand it to `processor`, one at a time.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(processor, source), fields(plugin = processor.name()))
)]
pub fn dispatch(
    processor: &dyn FrameProcessor,
    source: &mut dyn FrameSource,
    on_error: OnFrameError,
) -> Result<DispatchReport, DispatchError> {
    if processor.max_frames_per_call() == 0 {
        return Err(DispatchError::ZeroFramesPerCall {
            plugin: processor.name().to_string(),
        });
    }

    let mut report = DispatchReport {
        plugin: processor.name().to_string(),
        frames: Vec::with_capacity(source.frame_count().unwrap_or(0)),
    };

    let mut index = 0usize;
    while let Some(next) = source.next_frame() {
        let result = next
            .map_err(ProcessError::from)
            .and_then(|frame| processor.process_frame(&frame));
        match result {
            Ok(record) => {
                log::info!(
                    "{} frame {index}: center_of_rotation={:.3}",
                    report.plugin,
                    record.center_of_rotation
                );
                report.frames.push(FrameOutcome {
                    index,
                    record: Some(record),
                    error: None,
                });
            }
            Err(err) if on_error == OnFrameError::Skip => {
                log::warn!("{} frame {index} skipped: {err}", report.plugin);
                report.frames.push(FrameOutcome {
                    index,
                    record: None,
                    error: Some(err.to_string()),
                });
            }
            Err(err) => return Err(DispatchError::Frame { index, source: err }),
        }
        index += 1;
    }

    Ok(report)
}
