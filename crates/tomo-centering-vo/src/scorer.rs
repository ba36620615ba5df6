//! Masked spectral symmetry score.
//!
//! For a candidate shift the sinogram is shifted horizontally (periodic
//! cubic spline), stacked on top of its column-reversed copy to form a
//! 0..360 degree sinogram, and transformed with a 2-D FFT. The score is the
//! sum of spectrum magnitudes inside the mask after fftshift. A shift that
//! puts the rotation axis in the middle of the frame makes the stacked
//! sinogram consistent and minimizes the score.

use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use tomo_centering_core::{sanitize, SinogramView};

use crate::mask::Mask;
use crate::spline::SplineRows;

/// Scores candidate shifts for sinograms of one fixed shape.
///
/// Holds the FFT plans for the `(2 * rows, cols)` stacked frame so a
/// search can score many candidates without re-planning.
pub struct SymmetryScorer {
    rows: usize,
    cols: usize,
    row_fft: Arc<dyn Fft<f64>>,
    col_fft: Arc<dyn Fft<f64>>,
    scratch_len: usize,
}

impl std::fmt::Debug for SymmetryScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymmetryScorer")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .finish_non_exhaustive()
    }
}

impl SymmetryScorer {
    /// Plan the transforms for sinograms of `rows x cols`.
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut planner = FftPlanner::new();
        let row_fft = planner.plan_fft_forward(cols);
        let col_fft = planner.plan_fft_forward(2 * rows);
        let scratch_len = row_fft
            .get_inplace_scratch_len()
            .max(col_fft.get_inplace_scratch_len());
        Self {
            rows,
            cols,
            row_fft,
            col_fft,
            scratch_len,
        }
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Score `shift` for `sino`.
    ///
    /// Non-finite input values are replaced first (see [`sanitize`]).
    /// Returns `None` when the sinogram or mask shape does not match the
    /// shape this scorer was planned for.
    pub fn score(&self, shift: f64, sino: &SinogramView<'_>, mask: &Mask) -> Option<f64> {
        if (sino.rows, sino.cols) != self.shape() {
            return None;
        }
        let clean = sanitize(sino);
        let spline = SplineRows::new(&clean.view());
        self.score_spline(shift, &spline, mask)
    }

    /// Score `shift` on precomputed spline coefficients of a sanitized sinogram.
    pub fn score_spline(&self, shift: f64, spline: &SplineRows, mask: &Mask) -> Option<f64> {
        let (rows, cols) = self.shape();
        let height = 2 * rows;
        if (spline.rows, spline.cols) != (rows, cols) || mask.shape() != (height, cols) {
            return None;
        }
        if rows == 0 || cols == 0 {
            return Some(0.0);
        }

        // stacked frame: shifted rows on top, column-reversed copies below
        let mut frame = vec![Complex::new(0.0, 0.0); height * cols];
        let mut line = vec![0.0; cols];
        for r in 0..rows {
            spline.shift_row_into(r, shift, &mut line);
            let top = r * cols;
            let bottom = (rows + r) * cols;
            for (c, &v) in line.iter().enumerate() {
                frame[top + c] = Complex::new(v, 0.0);
                frame[bottom + cols - 1 - c] = Complex::new(v, 0.0);
            }
        }

        let mut scratch = vec![Complex::new(0.0, 0.0); self.scratch_len];
        self.row_fft
            .process_with_scratch(&mut frame, &mut scratch[..self.row_fft.get_inplace_scratch_len()]);

        // column transforms on a transposed copy
        let mut columns = vec![Complex::new(0.0, 0.0); height * cols];
        for r in 0..height {
            for c in 0..cols {
                columns[c * height + r] = frame[r * cols + c];
            }
        }
        self.col_fft.process_with_scratch(
            &mut columns,
            &mut scratch[..self.col_fft.get_inplace_scratch_len()],
        );

        // fftshift: shifted[i] = spectrum[(i + n - n/2) % n] on both axes
        let row_off = height - height / 2;
        let col_off = cols - cols / 2;
        let mut total = 0.0;
        for i in 0..height {
            let fr = (i + row_off) % height;
            for j in 0..cols {
                if mask.get(i, j) {
                    let fc = (j + col_off) % cols;
                    total += columns[fc * height + fr].norm();
                }
            }
        }
        Some(total)
    }
}

/// One-shot convenience: plan, sanitize and score a single candidate.
pub fn score(shift: f64, sino: &SinogramView<'_>, mask: &Mask) -> Option<f64> {
    SymmetryScorer::new(sino.rows, sino.cols).score(shift, sino, mask)
}
