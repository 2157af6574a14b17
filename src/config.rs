use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_FOV_DEG: f64 = 70.0;

/// Kind of camera a configuration describes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraType {
    UsbCamera,
    Vendor,
    #[default]
    RemoteStream,
}

/// Sensor resolution a calibration was captured at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

/// Intrinsic calibration for one resolution.
///
/// Contents are not validated here; the remote source and the pipeline decide
/// what to make of them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraCalibration {
    pub resolution: Resolution,
    /// Row-major 3x3 camera matrix.
    #[serde(default)]
    pub camera_intrinsics: Vec<f64>,
    #[serde(default)]
    pub dist_coeffs: Vec<f64>,
}

/// Pinhole parameters read out of a camera matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intrinsics {
    pub fx: f64,
    pub fy: f64,
    pub cx: f64,
    pub cy: f64,
}

impl CameraCalibration {
    /// Focal lengths and principal point, if the matrix has all nine entries.
    pub fn intrinsics(&self) -> Option<Intrinsics> {
        let k = self.camera_intrinsics.as_slice();
        if k.len() != 9 {
            return None;
        }
        Some(Intrinsics {
            fx: k[0],
            fy: k[4],
            cx: k[2],
            cy: k[5],
        })
    }
}

/// Per-camera configuration owned by the configuration subsystem.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraConfiguration {
    #[serde(default)]
    pub unique_name: String,
    #[serde(default)]
    pub nickname: String,
    /// `{transport}://{address}/{topic}` for remote streams.
    pub path: String,
    /// Diagonal field of view in degrees.
    #[serde(default = "default_fov", alias = "FOV")]
    pub fov: f64,
    #[serde(default)]
    pub calibrations: Vec<CameraCalibration>,
    #[serde(default)]
    pub camera_type: CameraType,
}

fn default_fov() -> f64 {
    DEFAULT_FOV_DEG
}

impl CameraConfiguration {
    pub fn new(path: impl Into<String>, fov: f64) -> Self {
        let path = path.into();
        Self {
            unique_name: path.clone(),
            nickname: path.clone(),
            path,
            fov,
            calibrations: Vec::new(),
            camera_type: CameraType::RemoteStream,
        }
    }

    pub fn with_calibration(mut self, calibration: CameraCalibration) -> Self {
        self.calibrations.push(calibration);
        self
    }

    /// Load a configuration file, then apply `REMOTE_CAMERA_*` overrides.
    ///
    /// `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let mut cfg = read_config_file(path)?;
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// First calibration, if any. An empty list means "uncalibrated".
    pub fn primary_calibration(&self) -> Option<&CameraCalibration> {
        self.calibrations.first()
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(path) = std::env::var("REMOTE_CAMERA_PATH") {
            if !path.trim().is_empty() {
                self.path = path;
            }
        }
        if let Ok(fov) = std::env::var("REMOTE_CAMERA_FOV") {
            if !fov.trim().is_empty() {
                self.fov = fov
                    .trim()
                    .parse()
                    .map_err(|_| anyhow!("REMOTE_CAMERA_FOV must be a number of degrees"))?;
            }
        }
        Ok(())
    }

    /// Reject configurations no source could be built from.
    ///
    /// The path is only checked for presence; its shape is the endpoint
    /// parser's concern.
    pub fn validate(&self) -> Result<()> {
        if self.path.trim().is_empty() {
            return Err(anyhow!("camera path must not be empty"));
        }
        if !self.fov.is_finite() || self.fov <= 0.0 {
            return Err(anyhow!(
                "camera fov must be a positive number of degrees, got {}",
                self.fov
            ));
        }
        Ok(())
    }
}

fn read_config_file(path: &Path) -> Result<CameraConfiguration> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read camera config {}: {}", path.display(), e))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let cfg = if is_json {
        serde_json::from_str(&raw)
            .map_err(|e| anyhow!("invalid camera config {}: {}", path.display(), e))?
    } else {
        toml::from_str(&raw)
            .map_err(|e| anyhow!("invalid camera config {}: {}", path.display(), e))?
    };
    Ok(cfg)
}
