//! Remote (network-streamed) frame source.
//!
//! A remote source subscribes to one topic on a publisher address and keeps
//! the latest decoded frame available to the pipeline.
//!
//! `RemoteFrameSource` is the seam the vision source facade builds against;
//! `RemoteFrameProvider` is the implementation shipped with this crate.
//! It selects a backend from the address scheme:
//! - `stub://` - in-process synthetic stream (tests, demos)
//!
//! Any other transport is refused at connect time.

use anyhow::{anyhow, bail, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::config::CameraCalibration;
use crate::endpoint::Endpoint;
use crate::frame::{Frame, FrameProvider, FrameStaticProperties};

/// Highest frame rate any remote source is driven at.
pub const MAX_FPS: u32 = 30;

const DEFAULT_WIDTH: u32 = 640;
const DEFAULT_HEIGHT: u32 = 480;
/// Largest synthetic frame handed out (8K BGR fits).
const MAX_SYNTHETIC_FRAME_BYTES: usize = 128 * 1024 * 1024;

/// Everything a remote source needs to subscribe to a stream.
#[derive(Clone, Debug)]
pub struct RemoteStreamParams {
    pub endpoint: Endpoint,
    /// Diagonal field of view in degrees.
    pub fov: f64,
    pub max_fps: u32,
    pub calibration: Option<CameraCalibration>,
}

/// A frame provider that can be built from stream parameters.
///
/// `connect` may block until the transport is up; there is no timeout at
/// this layer.
pub trait RemoteFrameSource: FrameProvider + Sized {
    fn connect(params: RemoteStreamParams) -> Result<Self>;
}

/// Frame provider for remote camera streams.
pub struct RemoteFrameProvider {
    name: String,
    backend: RemoteBackend,
}

enum RemoteBackend {
    Synthetic(SyntheticStream),
}

impl RemoteFrameSource for RemoteFrameProvider {
    fn connect(params: RemoteStreamParams) -> Result<Self> {
        if params.endpoint.topic.is_empty() {
            bail!(
                "remote stream '{}' has an empty topic",
                params.endpoint.address
            );
        }
        let name = params.endpoint.to_string();
        let backend = match params.endpoint.scheme() {
            Some("stub") => RemoteBackend::Synthetic(SyntheticStream::new(params)?),
            Some(other) => bail!("unsupported remote transport '{}' for {}", other, name),
            None => bail!(
                "remote stream address '{}' has no transport scheme",
                params.endpoint.address
            ),
        };
        Ok(Self { name, backend })
    }
}

impl RemoteFrameProvider {
    /// Frame statistics.
    pub fn stats(&self) -> RemoteStats {
        match &self.backend {
            RemoteBackend::Synthetic(stream) => RemoteStats {
                frames_produced: stream.frame_count.load(Ordering::Relaxed),
                endpoint: self.name.clone(),
            },
        }
    }
}

impl FrameProvider for RemoteFrameProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self) -> Result<Frame> {
        match &self.backend {
            RemoteBackend::Synthetic(stream) => Ok(stream.next_frame()),
        }
    }

    fn is_connected(&self) -> bool {
        match &self.backend {
            RemoteBackend::Synthetic(_) => true,
        }
    }
}

/// Statistics for a remote source.
#[derive(Clone, Debug)]
pub struct RemoteStats {
    pub frames_produced: u64,
    pub endpoint: String,
}

// ----------------------------------------------------------------------------
// Synthetic stream (stub://) for tests
// ----------------------------------------------------------------------------

/// Publishes generated BGR frames.
///
/// Resolution comes from a `stub://WIDTHxHEIGHT` address, then from the
/// calibration, then defaults to 640x480.
struct SyntheticStream {
    properties: Arc<FrameStaticProperties>,
    frame_len: usize,
    frame_count: AtomicU64,
}

impl SyntheticStream {
    fn new(params: RemoteStreamParams) -> Result<Self> {
        let (width, height) = match parse_resolution(params.endpoint.authority())? {
            Some(dims) => dims,
            None => params
                .calibration
                .as_ref()
                .map(|cal| (cal.resolution.width, cal.resolution.height))
                .unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT)),
        };
        let properties = FrameStaticProperties::new(width, height, params.fov, params.calibration);
        let frame_len = properties.bgr_frame_len()?;
        if frame_len > MAX_SYNTHETIC_FRAME_BYTES {
            bail!(
                "synthetic stream resolution {}x{} exceeds {} bytes per frame",
                width,
                height,
                MAX_SYNTHETIC_FRAME_BYTES
            );
        }
        log::info!(
            "RemoteFrameProvider: subscribed to '{}' at {} ({}x{} synthetic, max {} fps)",
            params.endpoint.topic,
            params.endpoint.address,
            width,
            height,
            params.max_fps
        );
        Ok(Self {
            properties: Arc::new(properties),
            frame_len,
            frame_count: AtomicU64::new(0),
        })
    }

    fn next_frame(&self) -> Frame {
        let sequence = self.frame_count.fetch_add(1, Ordering::Relaxed) + 1;
        let mut pixels = vec![0u8; self.frame_len];
        for (i, px) in pixels.iter_mut().enumerate() {
            *px = ((i as u64).wrapping_add(sequence) % 256) as u8;
        }
        Frame::new(sequence, Arc::clone(&self.properties), pixels)
    }
}

/// `1280x720` → `Some((1280, 720))`. Authorities that are not a resolution
/// (`localhost:5555`) yield `None`; a zero dimension is an error.
fn parse_resolution(authority: &str) -> Result<Option<(u32, u32)>> {
    let Some((w, h)) = authority.split_once('x') else {
        return Ok(None);
    };
    let (Ok(width), Ok(height)) = (w.parse::<u32>(), h.parse::<u32>()) else {
        return Ok(None);
    };
    if width == 0 || height == 0 {
        return Err(anyhow!(
            "synthetic stream resolution must be non-zero, got {}",
            authority
        ));
    }
    Ok(Some((width, height)))
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
