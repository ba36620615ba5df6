use serde::{Deserialize, Serialize};

/// Shape semantics of the frames a plugin consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameKind {
    /// 2-D slice with one row per projection angle and one column per detector pixel.
    Sinogram,
    /// 2-D detector image taken at a single angle.
    Projection,
    /// Full reconstructed or raw 3-D block.
    Volume,
}

/// Processing stage of the dataset a plugin reads from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataRole {
    /// Raw detector counts, before flat/dark correction.
    Raw,
    /// Flat/dark corrected projection data.
    CorrectedProjection,
    /// Reconstructed volume.
    Volume,
}
