//! Pipeline-facing crate for tomographic center-of-rotation estimation.
//!
//! This crate provides:
//! - the [`FrameProcessor`] contract a pipeline runtime uses to query a
//!   plugin's frame requirements and feed it one frame at a time,
//! - [`CenterOfRotationEstimator`], the Vo et al. estimator behind that contract,
//! - an explicit [`PluginRegistry`] mapping plugin names to factories,
//! - [`dispatch`], which drains a [`core::FrameSource`] through a plugin,
//! - JSON helpers for stage configs and dispatch reports.
//!
//! ## Quickstart
//!
//! ```
//! use tomo_centering::core::{parallel_beam_sinogram, Blob, Frame, VecFrameSource};
//! use tomo_centering::{dispatch, OnFrameError, PluginRegistry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let blob = Blob { x: 6.0, y: -4.0, sigma: 1.5, amplitude: 1.0 };
//! let frame = Frame::from(parallel_beam_sinogram(45, 64, 31.0, &[blob]));
//!
//! let registry = PluginRegistry::with_builtin();
//! let plugin = registry.create("VoCentering", &serde_json::Value::Null)?;
//! let mut source = VecFrameSource::new([frame]);
//! let report = dispatch(plugin.as_ref(), &mut source, OnFrameError::Abort)?;
//! println!("centers: {:?}", report.centers());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `tomo_centering::core`: frames, sinograms, frame sources, logger.
//! - `tomo_centering::vo`: mask, scorer and coarse-to-fine search.

pub use tomo_centering_core as core;
pub use tomo_centering_vo as vo;

mod dispatch;
mod estimator;
mod io;
mod processor;
mod registry;

pub use dispatch::{dispatch, DispatchError, DispatchReport, FrameOutcome, OnFrameError};
pub use estimator::{CenterOfRotationEstimator, VO_CENTERING};
pub use io::{IoError, PluginConfig};
pub use processor::{FrameProcessor, ProcessError, ResultRecord};
pub use registry::{PluginEntry, PluginFactory, PluginRegistry, RegistryError};

pub use tomo_centering_core::{DataRole, Frame, FrameKind};
pub use tomo_centering_vo::{CitationInfo, VoCenteringParams};
