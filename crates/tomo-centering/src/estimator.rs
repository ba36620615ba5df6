use std::sync::Arc;

use tomo_centering_core::{DataRole, Frame, FrameKind};
use tomo_centering_vo::{
    vo_2014_citation, CenterSearch, CenterSearchError, CitationInfo, MaskCache, SearchTrace,
    VoCenteringParams,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::processor::{FrameProcessor, ProcessError, ResultRecord};

/// Registry name of [`CenterOfRotationEstimator`].
pub const VO_CENTERING: &str = "VoCentering";

/// Per-sinogram center-of-rotation estimator.
#[derive(Debug, Default)]
pub struct CenterOfRotationEstimator {
    search: CenterSearch,
}

impl CenterOfRotationEstimator {
    pub fn new(params: VoCenteringParams) -> Result<Self, CenterSearchError> {
        Ok(Self {
            search: CenterSearch::new(params)?,
        })
    }

    /// Share a mask cache with other estimator instances.
    pub fn with_mask_cache(self, masks: Arc<MaskCache>) -> Self {
        Self {
            search: self.search.with_mask_cache(masks),
        }
    }

    #[inline]
    pub fn params(&self) -> &VoCenteringParams {
        self.search.params()
    }

    /// Run the search on `frame` and return the per-iteration trace with the result.
    pub fn process_frame_traced(
        &self,
        frame: &Frame,
    ) -> Result<(ResultRecord, SearchTrace), ProcessError> {
        let sino = frame.squeeze()?;
        let trace = self.search.find_shift_traced(&sino)?;
        let record = ResultRecord {
            center_of_rotation: sino.cols as f64 / 2.0 - trace.shift,
        };
        Ok((record, trace))
    }
}

impl FrameProcessor for CenterOfRotationEstimator {
    fn name(&self) -> &str {
        VO_CENTERING
    }

    fn required_frame_kind(&self) -> FrameKind {
        FrameKind::Sinogram
    }

    fn max_frames_per_call(&self) -> usize {
        1
    }

    fn required_data_role(&self) -> DataRole {
        DataRole::CorrectedProjection
    }

    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, frame), fields(shape = ?frame.shape()))
    )]
    fn process_frame(&self, frame: &Frame) -> Result<ResultRecord, ProcessError> {
        let (record, trace) = self.process_frame_traced(frame)?;
        log::debug!(
            "center of rotation {:.3} after {} iterations",
            record.center_of_rotation,
            trace.iterations.len()
        );
        Ok(record)
    }

    fn citation(&self) -> Option<CitationInfo> {
        Some(vo_2014_citation())
    }
}
