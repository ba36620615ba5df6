use serde::{Deserialize, Serialize};

/// Invalid estimator configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParamsError {
    #[error("pixel_step must be finite and > 0 (got {0})")]
    InvalidPixelStep(f64),
    #[error("precision must be finite and > 0 (got {0})")]
    InvalidPrecision(f64),
}

/// Tunables of the Vo center-of-rotation search.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoCenteringParams {
    /// Half-width decrement of the mask band per frequency row pair.
    pub pixel_step: f64,
    /// Refinement stops once the candidate step is at or below this, in pixels.
    pub precision: f64,
}

impl Default for VoCenteringParams {
    fn default() -> Self {
        Self {
            pixel_step: 0.5,
            precision: 0.01,
        }
    }
}

impl VoCenteringParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !self.pixel_step.is_finite() || self.pixel_step <= 0.0 {
            return Err(ParamsError::InvalidPixelStep(self.pixel_step));
        }
        if !self.precision.is_finite() || self.precision <= 0.0 {
            return Err(ParamsError::InvalidPrecision(self.precision));
        }
        Ok(())
    }
}
