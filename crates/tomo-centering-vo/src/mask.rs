//! Frequency-domain weighting mask.
//!
//! The mask lives on the fft-shifted spectrum of the doubled (0..360 degree)
//! sinogram, so row `rows` is the zero vertical frequency and the mask is
//! mirrored about it. Close to that row only a narrow band of low
//! horizontal frequencies is selected; the band widens by `2 * pixel_step`
//! columns per row until whole rows are selected. The selected double wedge
//! is where a consistent sinogram carries almost no energy.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Boolean mask of shape `(2 * rows, cols)`, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<bool>,
}

impl Mask {
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn count_selected(&self) -> usize {
        self.data.iter().filter(|&&m| m).count()
    }

    fn fill_row(&mut self, row: usize, start: usize, end: usize) {
        let base = row * self.cols;
        self.data[base + start..base + end].fill(true);
    }
}

/// Build the mask for a sinogram of `rows x cols`.
///
/// Returns an empty `(0, 0)` mask when either dimension is zero.
pub fn build_mask(rows: usize, cols: usize, pixel_step: f64) -> Mask {
    if rows == 0 || cols == 0 {
        return Mask {
            rows: 0,
            cols: 0,
            data: Vec::new(),
        };
    }

    let height = 2 * rows;
    let mut mask = Mask {
        rows: height,
        cols,
        data: vec![false; height * cols],
    };

    let mut count = (cols / 2) as f64;
    for i in (0..=rows).rev() {
        let mirror = (height - i) % height;
        if count < 0.0 {
            mask.fill_row(i, 0, cols);
            mask.fill_row(mirror, 0, cols);
        } else {
            let start = count.floor() as usize;
            let end = cols.saturating_sub((count + 1.0).floor() as usize);
            if end > start {
                mask.fill_row(i, start, end);
                mask.fill_row(mirror, start, end);
            }
        }
        count -= pixel_step;
    }
    mask
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct MaskKey {
    rows: usize,
    cols: usize,
    pixel_step_bits: u64,
}

/// Per-shape mask cache, safe to share between threads.
///
/// Lookups take a read lock. A miss builds the mask outside the lock; if two
/// threads race on the same shape the first insert wins and both observe an
/// equal mask.
#[derive(Debug, Default)]
pub struct MaskCache {
    masks: RwLock<HashMap<MaskKey, Arc<Mask>>>,
}

impl MaskCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(&self, rows: usize, cols: usize, pixel_step: f64) -> Arc<Mask> {
        let key = MaskKey {
            rows,
            cols,
            pixel_step_bits: pixel_step.to_bits(),
        };
        if let Some(mask) = self
            .masks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Arc::clone(mask);
        }

        let built = Arc::new(build_mask(rows, cols, pixel_step));
        log::debug!(
            "built {}x{} mask ({} selected cells)",
            built.rows,
            built.cols,
            built.count_selected()
        );
        let mut masks = self.masks.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(masks.entry(key).or_insert(built))
    }

    pub fn len(&self) -> usize {
        self.masks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_span(mask: &Mask, row: usize) -> Option<(usize, usize)> {
        let first = (0..mask.cols).find(|&c| mask.get(row, c))?;
        let last = (0..mask.cols).rev().find(|&c| mask.get(row, c))?;
        Some((first, last + 1))
    }

    #[test]
    fn shape_is_doubled_height() {
        for (r, c) in [(1, 1), (3, 8), (180, 200), (7, 33)] {
            let mask = build_mask(r, c, 0.5);
            assert_eq!(mask.shape(), (2 * r, c));
            assert_eq!(mask.data.len(), 2 * r * c);
        }
    }

    #[test]
    fn mirrored_about_zero_frequency_row() {
        for (r, c) in [(4, 10), (180, 200), (9, 31), (50, 8)] {
            let mask = build_mask(r, c, 0.5);
            let h = mask.rows;
            for i in 0..h {
                let mirror = (h - i) % h;
                for col in 0..c {
                    assert_eq!(mask.get(i, col), mask.get(mirror, col), "row {i} col {col}");
                }
            }
        }
    }

    #[test]
    fn band_widens_away_from_zero_frequency() {
        let mask = build_mask(180, 200, 0.5);
        // zero-frequency row: count = 100, range [100, 99) is empty
        assert_eq!(row_span(&mask, 180), None);
        // count = 99.5 -> [99, 100)
        assert_eq!(row_span(&mask, 179), Some((99, 100)));
        // count = 99.0 -> [99, 100)
        assert_eq!(row_span(&mask, 178), Some((99, 100)));
        // count = 98.5 -> [98, 101)
        assert_eq!(row_span(&mask, 177), Some((98, 101)));
        // count = 100 - 0.5 * 180 = 10 at row 0
        assert_eq!(row_span(&mask, 0), Some((10, 189)));
    }

    #[test]
    fn whole_rows_once_count_goes_negative() {
        // cols = 4: count hits -0.5 on the fifth row from the center
        let mask = build_mask(6, 4, 0.5);
        for col in 0..4 {
            assert!(mask.get(1, col));
            assert!(mask.get(11, col));
            assert!(mask.get(0, col));
        }
        assert_eq!(row_span(&mask, 6), None);
    }

    #[test]
    fn empty_shape_gives_empty_mask() {
        assert_eq!(build_mask(0, 10, 0.5).shape(), (0, 0));
        assert_eq!(build_mask(10, 0, 0.5).shape(), (0, 0));
    }

    #[test]
    fn cache_reuses_masks_per_shape() {
        let cache = MaskCache::new();
        let a = cache.get_or_build(10, 20, 0.5);
        let b = cache.get_or_build(10, 20, 0.5);
        assert!(Arc::ptr_eq(&a, &b));
        let c = cache.get_or_build(10, 20, 1.0);
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(cache.len(), 2);
        assert_eq!(*a, build_mask(10, 20, 0.5));
    }

    #[test]
    fn racing_threads_share_the_first_inserted_mask() {
        let cache = MaskCache::new();
        let (a, b) = std::thread::scope(|scope| {
            let first = scope.spawn(|| cache.get_or_build(45, 64, 0.5));
            let second = scope.spawn(|| cache.get_or_build(45, 64, 0.5));
            (
                first.join().expect("first thread"),
                second.join().expect("second thread"),
            )
        });
        assert_eq!(*a, *b);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
        assert!(Arc::ptr_eq(&a, &cache.get_or_build(45, 64, 0.5)));
    }
}
