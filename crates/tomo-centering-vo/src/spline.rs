//! Periodic cubic B-spline interpolation along sinogram rows.
//!
//! Each row is treated as one period of an infinite signal. The spline
//! coefficients are computed once per sinogram; a horizontal shift then
//! only costs a four-tap filter per output sample.

use tomo_centering_core::SinogramView;

/// Pole of the cubic B-spline prefilter, `sqrt(3) - 2`.
const POLE: f64 = -0.267_949_192_431_122_7;

/// Row-wise cubic spline coefficients of a sinogram.
#[derive(Clone, Debug)]
pub struct SplineRows {
    pub rows: usize,
    pub cols: usize,
    coeffs: Vec<f64>,
}

impl SplineRows {
    pub fn new(src: &SinogramView<'_>) -> Self {
        let mut coeffs = Vec::with_capacity(src.rows * src.cols);
        for r in 0..src.rows {
            let start = coeffs.len();
            coeffs.extend_from_slice(src.row(r));
            prefilter_periodic(&mut coeffs[start..]);
        }
        Self {
            rows: src.rows,
            cols: src.cols,
            coeffs,
        }
    }

    /// Write row `row` shifted right by `shift` pixels into `out`.
    ///
    /// `out[j]` samples the input at `j - shift`, wrapping around the row.
    pub fn shift_row_into(&self, row: usize, shift: f64, out: &mut [f64]) {
        let n = self.cols;
        debug_assert_eq!(out.len(), n);
        let c = &self.coeffs[row * n..(row + 1) * n];
        let (offset, w) = shift_weights(shift);
        let n_i = n as i64;
        for (j, o) in out.iter_mut().enumerate() {
            let base = j as i64 + offset - 1;
            let mut acc = 0.0;
            for (m, wm) in w.iter().enumerate() {
                acc += wm * c[(base + m as i64).rem_euclid(n_i) as usize];
            }
            *o = acc;
        }
    }
}

/// Integer offset and the four B-spline weights for sampling at `j - shift`.
fn shift_weights(shift: f64) -> (i64, [f64; 4]) {
    let x = -shift;
    let fl = x.floor();
    let t = x - fl;
    let u = 1.0 - t;
    let w = [
        u * u * u / 6.0,
        2.0 / 3.0 - t * t + 0.5 * t * t * t,
        2.0 / 3.0 - u * u + 0.5 * u * u * u,
        t * t * t / 6.0,
    ];
    (fl as i64, w)
}

/// In-place periodic cubic B-spline prefilter (causal + anti-causal pass).
fn prefilter_periodic(s: &mut [f64]) {
    let n = s.len();
    if n == 0 {
        return;
    }
    let z = POLE;
    let zn = z.powi(n as i32);

    // causal init: sum_k z^k s[-k mod n] / (1 - z^n)
    let mut acc = s[0];
    let mut zk = z;
    for k in 1..n {
        if zk == 0.0 {
            break;
        }
        acc += zk * s[n - k];
        zk *= z;
    }
    s[0] = acc / (1.0 - zn);
    for k in 1..n {
        s[k] += z * s[k - 1];
    }

    // anti-causal init: -z / (1 - z^n) * sum_j z^j c+[(n - 1 + j) mod n]
    let mut acc = s[n - 1];
    let mut zj = z;
    for j in 1..n {
        if zj == 0.0 {
            break;
        }
        acc += zj * s[j - 1];
        zj *= z;
    }
    s[n - 1] = -z / (1.0 - zn) * acc;
    for k in (0..n - 1).rev() {
        s[k] = z * (s[k + 1] - s[k]);
    }

    for v in s.iter_mut() {
        *v *= 6.0;
    }
}
