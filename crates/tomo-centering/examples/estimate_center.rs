//! Estimate the center of rotation of a synthetic sinogram stack.
//!
//! Usage: `estimate_center [true_center] [config.json]`

use log::LevelFilter;
use tomo_centering::core::{init_with_level, parallel_beam_sinogram, Blob, Frame, VecFrameSource};
use tomo_centering::{dispatch, PluginConfig, PluginRegistry, VO_CENTERING};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_with_level(LevelFilter::Info)?;

    let mut args = std::env::args().skip(1);
    let true_center: f64 = match args.next() {
        Some(raw) => raw.parse()?,
        None => 101.0,
    };
    let cfg = match args.next() {
        Some(path) => PluginConfig::load_json(path)?,
        None => PluginConfig::new(VO_CENTERING),
    };

    let blobs = [
        Blob {
            x: 18.0,
            y: -6.0,
            sigma: 2.0,
            amplitude: 1.0,
        },
        Blob {
            x: -25.0,
            y: 14.0,
            sigma: 3.0,
            amplitude: 0.7,
        },
    ];
    let frames: Vec<Frame> = (0..4)
        .map(|_| Frame::from(parallel_beam_sinogram(180, 200, true_center, &blobs)))
        .collect();

    let registry = PluginRegistry::with_builtin();
    let plugin = cfg.build(&registry)?;
    if let Some(cite) = plugin.citation() {
        println!("{}\n{}", cite.description, cite.doi);
    }

    let mut source = VecFrameSource::new(frames);
    let report = dispatch(plugin.as_ref(), &mut source, cfg.on_error)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
