//! Synthetic parallel-beam sinograms.
//!
//! Used to build test and benchmark inputs with a known rotation axis.

use serde::{Deserialize, Serialize};

use crate::Sinogram;

/// Isotropic Gaussian blob in object coordinates, relative to the rotation axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Blob {
    pub x: f64,
    pub y: f64,
    pub sigma: f64,
    pub amplitude: f64,
}

/// Project `blobs` over `rows` angles evenly spaced in `[0, pi)`.
///
/// `center` is the rotation axis in pixel-edge coordinates: pixel `j`
/// covers `[j, j + 1)`, so `cols / 2` is the middle of the detector.
pub fn parallel_beam_sinogram(rows: usize, cols: usize, center: f64, blobs: &[Blob]) -> Sinogram {
    let axis = center - 0.5; // pixel-index coordinates
    Sinogram::from_fn(rows, cols, |r, c| {
        let theta = std::f64::consts::PI * r as f64 / rows as f64;
        let (sin_t, cos_t) = theta.sin_cos();
        blobs
            .iter()
            .map(|b| {
                let pos = axis + b.x * cos_t + b.y * sin_t;
                let d = c as f64 - pos;
                b.amplitude * (-0.5 * d * d / (b.sigma * b.sigma)).exp()
            })
            .sum()
    })
}
