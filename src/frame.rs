//! Frames and the static geometry that travels with them.
//!
//! - `FrameStaticProperties`: resolution, field of view and calibration of a
//!   stream, plus the pinhole geometry derived from them.
//! - `Frame`: one BGR image tagged with its static properties.
//! - `FrameProvider`: anything the pipeline can pull frames from.

use anyhow::{anyhow, Result};
use std::sync::Arc;
use std::time::Instant;

use crate::config::CameraCalibration;

/// Bytes per pixel of the BGR frames produced by providers in this crate.
pub const BGR_CHANNELS: usize = 3;

/// Geometry of every frame a provider yields until its resolution changes.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameStaticProperties {
    pub image_width: u32,
    pub image_height: u32,
    /// Diagonal field of view in degrees.
    pub fov: f64,
    pub calibration: Option<CameraCalibration>,
    pub image_area: f64,
    pub center_x: f64,
    pub center_y: f64,
    /// Horizontal field of view in degrees.
    pub horizontal_fov: f64,
    /// Vertical field of view in degrees.
    pub vertical_fov: f64,
    pub horizontal_focal_length: f64,
    pub vertical_focal_length: f64,
}

impl FrameStaticProperties {
    /// Derive frame geometry.
    ///
    /// A calibration only contributes when it was captured at this exact
    /// resolution and carries a full camera matrix; otherwise the diagonal
    /// FOV is split across the axes by aspect ratio.
    pub fn new(
        image_width: u32,
        image_height: u32,
        fov: f64,
        calibration: Option<CameraCalibration>,
    ) -> Self {
        let w = image_width as f64;
        let h = image_height as f64;

        let intrinsics = calibration
            .as_ref()
            .filter(|cal| {
                cal.resolution.width == image_width && cal.resolution.height == image_height
            })
            .and_then(CameraCalibration::intrinsics);

        let (center_x, center_y, fx, fy) = match intrinsics {
            Some(k) => (k.cx, k.cy, k.fx, k.fy),
            None => {
                let diagonal = fov.to_radians();
                let diagonal_px = w.hypot(h);
                let half_tan = (diagonal / 2.0).tan();
                let h_view = (half_tan * (w / diagonal_px)).atan() * 2.0;
                let v_view = (half_tan * (h / diagonal_px)).atan() * 2.0;
                (
                    w / 2.0 - 0.5,
                    h / 2.0 - 0.5,
                    w / (2.0 * (h_view / 2.0).tan()),
                    h / (2.0 * (v_view / 2.0).tan()),
                )
            }
        };

        Self {
            image_width,
            image_height,
            fov,
            calibration,
            image_area: w * h,
            center_x,
            center_y,
            horizontal_fov: (2.0 * (w / (2.0 * fx)).atan()).to_degrees(),
            vertical_fov: (2.0 * (h / (2.0 * fy)).atan()).to_degrees(),
            horizontal_focal_length: fx,
            vertical_focal_length: fy,
        }
    }

    /// Size in bytes of one BGR frame at this resolution.
    pub fn bgr_frame_len(&self) -> Result<usize> {
        (self.image_width as usize)
            .checked_mul(self.image_height as usize)
            .and_then(|v| v.checked_mul(BGR_CHANNELS))
            .ok_or_else(|| anyhow!("frame dimensions overflow"))
    }
}

/// One decoded BGR frame.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Monotonically increasing per provider, starting at 1.
    pub sequence: u64,
    pub static_properties: Arc<FrameStaticProperties>,
    pub captured_at: Instant,
    pixels: Vec<u8>,
}

impl Frame {
    pub fn new(
        sequence: u64,
        static_properties: Arc<FrameStaticProperties>,
        pixels: Vec<u8>,
    ) -> Self {
        Self {
            sequence,
            static_properties,
            captured_at: Instant::now(),
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.static_properties.image_width
    }

    pub fn height(&self) -> u32 {
        self.static_properties.image_height
    }

    /// Interleaved BGR pixel data, row-major, no padding.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Source of frames consumed by the vision pipeline.
///
/// Providers own their transport. `get` returns the latest frame and may be
/// called from any pipeline thread.
pub trait FrameProvider: Send + Sync {
    /// Human-readable identifier used in logs.
    fn name(&self) -> &str;

    /// Latest available frame.
    fn get(&self) -> Result<Frame>;

    /// Whether the provider currently has a live stream.
    fn is_connected(&self) -> bool;
}
