//! Center-of-rotation estimation from a single sinogram (Vo et al., 2014).
//!
//! ## Quickstart
//!
//! ```
//! use tomo_centering_core::Sinogram;
//! use tomo_centering_vo::{CenterSearch, VoCenteringParams};
//!
//! let sino = Sinogram::from_fn(32, 64, |r, c| {
//!     let x = c as f64 - 31.5 - 6.0 * (r as f64 * std::f64::consts::PI / 32.0).cos();
//!     (-x * x / 4.0).exp()
//! });
//! let search = CenterSearch::new(VoCenteringParams::default()).unwrap();
//! let shift = search.find_shift(&sino.view()).unwrap();
//! println!("center of rotation: {}", sino.cols as f64 / 2.0 - shift);
//! ```
//!
//! Algorithm:
//! 1. Replace non-finite values and precompute periodic spline coefficients per row.
//! 2. Build (or fetch from cache) the double-wedge frequency mask for the frame shape.
//! 3. For each candidate shift: shift rows, stack with the column-reversed copy,
//!    2-D FFT, fftshift, sum magnitudes under the mask.
//! 4. Keep the candidate with the smallest score, shrink the grid tenfold, repeat
//!    until the grid step reaches the precision floor.

mod citation;
mod mask;
mod params;
mod scorer;
mod search;
mod spline;

pub use citation::{vo_2014_citation, CitationInfo};
pub use mask::{build_mask, Mask, MaskCache};
pub use params::{ParamsError, VoCenteringParams};
pub use scorer::{score, SymmetryScorer};
pub use search::{
    find_shift, CenterSearch, CenterSearchError, SearchIteration, SearchState, SearchTrace,
};
pub use spline::SplineRows;
