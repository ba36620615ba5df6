//! Coarse-to-fine search for the shift that minimizes the symmetry score.
//!
//! Starting from a zero shift and a half-span of a quarter of the frame
//! width, each iteration scores an evenly spaced candidate grid, keeps the
//! best candidate, and zooms in by a factor ten until the grid step falls
//! to the configured precision.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tomo_centering_core::{sanitize, SinogramView};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::mask::MaskCache;
use crate::params::{ParamsError, VoCenteringParams};
use crate::scorer::SymmetryScorer;
use crate::spline::SplineRows;

/// Errors returned by [`CenterSearch`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CenterSearchError {
    #[error("sinogram has invalid shape {rows}x{cols}")]
    InvalidShape { rows: usize, cols: usize },
    #[error("degenerate search: no candidates for width={width}, step={step}")]
    DegenerateSearch { width: f64, step: f64 },
    #[error("every candidate scored NaN for width={width}, step={step}")]
    NonFiniteScores { width: f64, step: f64 },
    #[error("scorer planned for {expected:?} was handed a {got:?} mask")]
    ScorerShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
    #[error(transparent)]
    Params(#[from] ParamsError),
}

/// Current estimate, half-span and grid step of the search.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    pub point: f64,
    pub width: f64,
    pub step: f64,
}

impl SearchState {
    /// Initial state for a frame with `cols` detector columns.
    pub fn initial(cols: usize) -> Self {
        let width = (cols / 4) as f64;
        Self {
            point: 0.0,
            width,
            step: width / 10.0,
        }
    }

    /// Candidate shifts `point - width + k * step` below `point + width`.
    ///
    /// Empty when `width` or `step` is not a positive finite number.
    pub fn candidates(&self) -> Vec<f64> {
        let start = self.point - self.width;
        let stop = self.point + self.width;
        if !(self.width > 0.0 && self.step > 0.0 && start.is_finite() && stop.is_finite()) {
            return Vec::new();
        }
        let n = ((stop - start) / self.step).ceil();
        if !n.is_finite() || n <= 0.0 {
            return Vec::new();
        }
        (0..n as usize)
            .map(|k| start + k as f64 * self.step)
            .collect()
    }

    /// State after picking `best`: the grid shrinks tenfold around it.
    pub fn refine(&self, best: f64) -> Self {
        Self {
            point: best,
            width: self.step,
            step: self.step / 10.0,
        }
    }
}

/// One completed refinement iteration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchIteration {
    /// State the candidate grid was built from.
    pub state: SearchState,
    pub candidates: usize,
    pub best_shift: f64,
    pub best_score: f64,
}

/// Result of a traced search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchTrace {
    pub shift: f64,
    pub iterations: Vec<SearchIteration>,
}

/// Coarse-to-fine shift search driven by [`SymmetryScorer`].
#[derive(Debug, Default)]
pub struct CenterSearch {
    params: VoCenteringParams,
    masks: Arc<MaskCache>,
}

impl CenterSearch {
    pub fn new(params: VoCenteringParams) -> Result<Self, CenterSearchError> {
        params.validate()?;
        Ok(Self {
            params,
            masks: Arc::new(MaskCache::new()),
        })
    }

    /// Share a mask cache with other searches (e.g. one per worker thread).
    pub fn with_mask_cache(mut self, masks: Arc<MaskCache>) -> Self {
        self.masks = masks;
        self
    }

    #[inline]
    pub fn params(&self) -> &VoCenteringParams {
        &self.params
    }

    #[inline]
    pub fn mask_cache(&self) -> &Arc<MaskCache> {
        &self.masks
    }

    /// Shift that best centers the rotation axis of `sino`.
    pub fn find_shift(&self, sino: &SinogramView<'_>) -> Result<f64, CenterSearchError> {
        Ok(self.find_shift_traced(sino)?.shift)
    }

    /// Like [`CenterSearch::find_shift`], also returning every iteration.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, sino), fields(rows = sino.rows, cols = sino.cols))
    )]
    pub fn find_shift_traced(
        &self,
        sino: &SinogramView<'_>,
    ) -> Result<SearchTrace, CenterSearchError> {
        if sino.rows == 0 || sino.cols == 0 {
            return Err(CenterSearchError::InvalidShape {
                rows: sino.rows,
                cols: sino.cols,
            });
        }

        let mut state = SearchState::initial(sino.cols);
        if state.candidates().is_empty() {
            return Err(CenterSearchError::DegenerateSearch {
                width: state.width,
                step: state.step,
            });
        }

        let non_finite = sino.count_non_finite();
        if non_finite > 0 {
            log::debug!("replacing {non_finite} non-finite sinogram values");
        }
        let clean = sanitize(sino);
        let spline = SplineRows::new(&clean.view());
        let mask = self
            .masks
            .get_or_build(sino.rows, sino.cols, self.params.pixel_step);
        let scorer = SymmetryScorer::new(sino.rows, sino.cols);

        let mut iterations = Vec::new();
        while state.step > self.params.precision {
            let candidates = state.candidates();
            let best = best_candidate(&candidates, |shift| {
                scorer
                    .score_spline(shift, &spline, &mask)
                    .ok_or(CenterSearchError::ScorerShapeMismatch {
                        expected: scorer.shape(),
                        got: mask.shape(),
                    })
            })?;
            let Some((best_shift, best_score)) = best else {
                return Err(CenterSearchError::NonFiniteScores {
                    width: state.width,
                    step: state.step,
                });
            };

            log::debug!(
                "iteration {}: width={:.4} step={:.4} candidates={} best_shift={:.4} score={:.6e}",
                iterations.len(),
                state.width,
                state.step,
                candidates.len(),
                best_shift,
                best_score
            );
            iterations.push(SearchIteration {
                state,
                candidates: candidates.len(),
                best_shift,
                best_score,
            });
            state = state.refine(best_shift);
        }

        Ok(SearchTrace {
            shift: state.point,
            iterations,
        })
    }
}

/// Lowest-index candidate with the smallest `|score|`; NaN scores are skipped.
///
/// `Ok(None)` when every candidate scored NaN.
fn best_candidate<E>(
    candidates: &[f64],
    mut score: impl FnMut(f64) -> Result<f64, E>,
) -> Result<Option<(f64, f64)>, E> {
    let mut best: Option<(f64, f64)> = None;
    for &shift in candidates {
        let value = score(shift)?.abs();
        if value.is_nan() {
            continue;
        }
        if best.map_or(true, |(_, b)| value < b) {
            best = Some((shift, value));
        }
    }
    Ok(best)
}

/// Run a default-parameter search on `sino`.
pub fn find_shift(sino: &SinogramView<'_>) -> Result<f64, CenterSearchError> {
    CenterSearch::default().find_shift(sino)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tomo_centering_core::Sinogram;

    #[test]
    fn initial_state_uses_integer_quarter_width() {
        assert_eq!(
            SearchState::initial(200),
            SearchState {
                point: 0.0,
                width: 50.0,
                step: 5.0
            }
        );
        assert_eq!(SearchState::initial(203).width, 50.0);
        assert_eq!(SearchState::initial(3).width, 0.0);
    }

    #[test]
    fn candidates_follow_arange_semantics() {
        let state = SearchState::initial(200);
        let c = state.candidates();
        assert_eq!(c.len(), 20);
        assert_eq!(c[0], -50.0);
        assert_eq!(c[10], 0.0);
        assert_eq!(*c.last().expect("non-empty"), 45.0);

        let fine = SearchState {
            point: 0.0,
            width: 0.5,
            step: 0.05,
        };
        let c = fine.candidates();
        assert_eq!(c.len(), 20);
        assert_eq!(c[10], 0.0);
    }

    #[test]
    fn candidates_empty_for_collapsed_state() {
        for (width, step) in [(0.0, 0.0), (-1.0, 0.1), (1.0, 0.0), (f64::NAN, 0.1)] {
            let state = SearchState {
                point: 0.0,
                width,
                step,
            };
            assert!(state.candidates().is_empty(), "width={width} step={step}");
        }
    }

    #[test]
    fn refinement_shrinks_geometrically() {
        let sino = Sinogram::from_fn(16, 64, |r, c| {
            let x = c as f64 - 30.0 - 4.0 * (r as f64 * 0.2).cos();
            (-x * x / 8.0).exp()
        });
        let trace = CenterSearch::default()
            .find_shift_traced(&sino.view())
            .expect("search");
        // width 16, step 1.6 -> 0.16 -> 0.016 -> stop
        assert_eq!(trace.iterations.len(), 3);
        for pair in trace.iterations.windows(2) {
            let (a, b) = (pair[0].state, pair[1].state);
            assert_eq!(b.width, a.step);
            assert_eq!(b.step, a.step / 10.0);
            assert!(b.width < a.width && b.step < a.step);
            assert_eq!(b.point, pair[0].best_shift);
        }
        assert_eq!(trace.shift, trace.iterations[2].best_shift);
    }

    #[test]
    fn best_candidate_prefers_lowest_index_on_ties() {
        let scores = [3.0, -1.0, 2.0, 1.0];
        let best = best_candidate(&[-2.0, -1.0, 0.0, 1.0], |shift| {
            Ok::<_, ()>(scores[(shift + 2.0) as usize])
        });
        assert_eq!(best, Ok(Some((-1.0, 1.0))));
    }

    #[test]
    fn best_candidate_skips_nan_scores() {
        let best = best_candidate(&[0.0, 1.0, 2.0], |shift| {
            Ok::<_, ()>(if shift == 1.0 { 0.5 } else { f64::NAN })
        });
        assert_eq!(best, Ok(Some((1.0, 0.5))));

        let all_nan = best_candidate(&[0.0, 1.0], |_| Ok::<_, ()>(f64::NAN));
        assert_eq!(all_nan, Ok(None));
    }

    #[test]
    fn mismatched_mask_is_an_error_not_a_skip() {
        let sino = Sinogram::from_fn(6, 16, |r, c| (r + c) as f64);
        let spline = SplineRows::new(&sino.view());
        let scorer = SymmetryScorer::new(6, 16);
        let wrong = crate::mask::build_mask(5, 16, 0.5);
        let candidates = SearchState::initial(16).candidates();

        let result = best_candidate(&candidates, |shift| {
            scorer
                .score_spline(shift, &spline, &wrong)
                .ok_or(CenterSearchError::ScorerShapeMismatch {
                    expected: scorer.shape(),
                    got: wrong.shape(),
                })
        });
        assert_eq!(
            result,
            Err(CenterSearchError::ScorerShapeMismatch {
                expected: (6, 16),
                got: (10, 16),
            })
        );
    }

    #[test]
    fn narrow_frame_is_degenerate() {
        let sino = Sinogram::from_fn(4, 3, |_, c| c as f64);
        // width = 3 / 4 = 0: there is nothing to scan
        assert_eq!(
            find_shift(&sino.view()),
            Err(CenterSearchError::DegenerateSearch {
                width: 0.0,
                step: 0.0
            })
        );
    }

    #[test]
    fn degenerate_check_runs_before_scoring() {
        let search = CenterSearch::default();
        let sino = Sinogram::from_fn(8, 2, |_, _| 1.0);
        assert!(matches!(
            search.find_shift(&sino.view()),
            Err(CenterSearchError::DegenerateSearch { .. })
        ));
        assert!(search.mask_cache().is_empty());
    }

    #[test]
    fn empty_sinogram_is_rejected() {
        let sino = Sinogram {
            rows: 0,
            cols: 10,
            data: Vec::new(),
        };
        assert_eq!(
            find_shift(&sino.view()),
            Err(CenterSearchError::InvalidShape { rows: 0, cols: 10 })
        );
    }

    #[test]
    fn search_is_deterministic() {
        let sino = Sinogram::from_fn(20, 48, |r, c| ((r * 3 + c * 5) % 11) as f64);
        let a = find_shift(&sino.view()).expect("search");
        let b = find_shift(&sino.view()).expect("search");
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
