//! remote_probe - Connect to a remote camera stream and report what the
//! pipeline would see.
//!
//! Prints the parsed endpoint, the frame geometry, and the advertised video
//! modes, then pulls a few frames.

use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;

use remote_vision_source::{
    CameraConfiguration, InvalidConfiguration, RemoteVisionSource, VisionSource,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Probe a remote camera stream through the vision source interface"
)]
struct Args {
    /// Camera configuration file (JSON or TOML).
    #[arg(long, env = "REMOTE_CAMERA_CONFIG", conflicts_with = "path")]
    config: Option<PathBuf>,

    /// Camera path, e.g. tcp://10.0.0.5:5555/cam0 or stub://1280x720/cam0.
    #[arg(long)]
    path: Option<String>,

    /// Diagonal field of view in degrees (with --path).
    #[arg(long, default_value = "70.0")]
    fov: f64,

    /// Number of frames to pull after connecting.
    #[arg(long, default_value = "5")]
    frames: u32,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let cfg = match (&args.config, &args.path) {
        (Some(path), _) => CameraConfiguration::load(path)?,
        (None, Some(path)) => {
            let cfg = CameraConfiguration::new(path.clone(), args.fov);
            cfg.validate()?;
            cfg
        }
        (None, None) => return Err(anyhow!("either --config or --path is required")),
    };

    let source: RemoteVisionSource = match RemoteVisionSource::new(cfg) {
        Ok(source) => source,
        Err(err) => {
            if let Some(invalid) = err.downcast_ref::<InvalidConfiguration>() {
                log::error!(
                    "refusing camera '{}': expected {}",
                    invalid.path,
                    invalid.expected
                );
            }
            return Err(err);
        }
    };

    let endpoint = source.endpoint();
    println!("address: {}", endpoint.address);
    println!("topic:   {}", endpoint.topic);
    println!("vendor:  {}", source.is_vendor_camera());

    let settables = source.settables();
    let props = settables.frame_static_properties();
    println!(
        "frame:   {}x{} fov={:.1} hfov={:.1} vfov={:.1} calibrated={}",
        props.image_width,
        props.image_height,
        props.fov,
        props.horizontal_fov,
        props.vertical_fov,
        props.calibration.is_some()
    );
    for (index, mode) in settables.all_video_modes() {
        println!("mode[{}]: {}", index, mode);
    }

    let provider = source.frame_provider();
    for _ in 0..args.frames {
        let frame = provider.get()?;
        log::info!(
            "frame #{} {}x{} ({} bytes)",
            frame.sequence,
            frame.width(),
            frame.height(),
            frame.pixels().len()
        );
    }
    let stats = source.remote().stats();
    log::info!(
        "{} frames produced by {}",
        stats.frames_produced,
        stats.endpoint
    );

    Ok(())
}
