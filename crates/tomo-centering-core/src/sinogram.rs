/// Borrowed row-major sinogram: one row per projection angle, one column per detector pixel.
#[derive(Clone, Copy, Debug)]
pub struct SinogramView<'a> {
    pub rows: usize,
    pub cols: usize,
    pub data: &'a [f64], // row-major, len = rows*cols
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sinogram {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f64>,
}

impl<'a> SinogramView<'a> {
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn row(&self, row: usize) -> &'a [f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Number of entries that are NaN or infinite.
    pub fn count_non_finite(&self) -> usize {
        self.data.iter().filter(|v| !v.is_finite()).count()
    }
}

impl Sinogram {
    /// Build a sinogram by evaluating `f(row, col)` for every cell.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    #[inline]
    pub fn view(&self) -> SinogramView<'_> {
        SinogramView {
            rows: self.rows,
            cols: self.cols,
            data: &self.data,
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}

#[inline]
fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// Return a copy of `src` with every NaN and `±inf` replaced by `0`.
///
/// Large finite stand-ins such as `±f64::MAX` would overflow the spline
/// prefilter and the FFT, so non-finite readings are simply zeroed.
pub fn sanitize(src: &SinogramView<'_>) -> Sinogram {
    Sinogram {
        rows: src.rows,
        cols: src.cols,
        data: src.data.iter().copied().map(finite_or_zero).collect(),
    }
}
