use serde::{Deserialize, Serialize};
use tomo_centering_core::{DataRole, Frame, FrameError, FrameKind};
use tomo_centering_vo::{CenterSearchError, CitationInfo};

/// Output of one processed frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Rotation axis position along the detector columns, pixel-edge coordinates.
    pub center_of_rotation: f64,
}

/// Errors returned by [`FrameProcessor::process_frame`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ProcessError {
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error(transparent)]
    Search(#[from] CenterSearchError),
}

/// Contract between a pipeline runtime and a single-frame plugin.
///
/// The runtime asks the plugin which frames it wants, cuts them from the
/// dataset and calls [`FrameProcessor::process_frame`] once per frame.
/// Implementations hold no per-frame state, so distinct frames may be
/// processed concurrently.
pub trait FrameProcessor: Send + Sync {
    /// Registry name of the plugin.
    fn name(&self) -> &str;

    fn required_frame_kind(&self) -> FrameKind;

    /// Maximum number of frames handed over per call.
    fn max_frames_per_call(&self) -> usize;

    fn required_data_role(&self) -> DataRole;

    fn process_frame(&self, frame: &Frame) -> Result<ResultRecord, ProcessError>;

    /// Publication describing the method, if any.
    fn citation(&self) -> Option<CitationInfo> {
        None
    }
}
