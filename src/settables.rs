//! Settable camera parameters.
//!
//! `VisionSourceSettables` is the single interface the pipeline uses to tune
//! any source. Every implementation spells out what each control does for
//! its source, including when that is nothing at all.

use anyhow::Result;
use std::collections::BTreeMap;

use crate::config::CameraConfiguration;
use crate::frame::FrameStaticProperties;
use crate::ingest::remote::MAX_FPS;
use crate::video_mode::{PixelFormat, VideoMode, VideoModeSet};

/// Camera controls shared by every vision source.
///
/// Control methods return `Result` so hardware-backed sources can report
/// driver failures. Sources without a given control accept the call and
/// return `Ok(())`; they never reject it, so pipeline code needs no
/// per-source branches.
pub trait VisionSourceSettables: Send + Sync {
    fn configuration(&self) -> &CameraConfiguration;

    /// Geometry the settables were derived from.
    fn frame_static_properties(&self) -> &FrameStaticProperties;

    fn current_video_mode(&self) -> VideoMode;

    fn video_mode_set(&self) -> &VideoModeSet;

    /// Index-keyed collection of every mode the source offers.
    fn all_video_modes(&self) -> BTreeMap<usize, VideoMode> {
        self.video_mode_set().as_map()
    }

    fn set_video_mode(&mut self, mode: VideoMode) -> Result<()>;

    /// Manual exposure, in the source's native units.
    fn set_exposure(&mut self, exposure: f64) -> Result<()>;

    fn set_auto_exposure(&mut self, enabled: bool) -> Result<()>;

    fn set_brightness(&mut self, brightness: i32) -> Result<()>;

    fn set_gain(&mut self, gain: i32) -> Result<()>;
}

/// Settables for a network-streamed camera.
///
/// The remote end decides resolution and exposure, so this advertises the one
/// mode observed on the stream and ignores every control. Fields are written
/// once in `new`.
#[derive(Clone, Debug)]
pub struct RemoteSourceSettables {
    configuration: CameraConfiguration,
    frame_static_properties: FrameStaticProperties,
    video_mode: VideoMode,
    video_modes: VideoModeSet,
}

impl RemoteSourceSettables {
    pub fn new(
        configuration: CameraConfiguration,
        frame_static_properties: FrameStaticProperties,
    ) -> Self {
        let video_mode = VideoMode::new(
            PixelFormat::Bgr,
            frame_static_properties.image_width,
            frame_static_properties.image_height,
            MAX_FPS,
        );
        Self {
            configuration,
            frame_static_properties,
            video_mode,
            video_modes: VideoModeSet::Fixed(video_mode),
        }
    }
}

impl VisionSourceSettables for RemoteSourceSettables {
    fn configuration(&self) -> &CameraConfiguration {
        &self.configuration
    }

    fn frame_static_properties(&self) -> &FrameStaticProperties {
        &self.frame_static_properties
    }

    fn current_video_mode(&self) -> VideoMode {
        self.video_mode
    }

    fn video_mode_set(&self) -> &VideoModeSet {
        &self.video_modes
    }

    fn set_video_mode(&mut self, mode: VideoMode) -> Result<()> {
        if mode != self.video_mode {
            log::debug!(
                "{}: ignoring video mode {} (stream is fixed at {})",
                self.configuration.nickname,
                mode,
                self.video_mode
            );
        }
        Ok(())
    }

    fn set_exposure(&mut self, exposure: f64) -> Result<()> {
        log::trace!("{}: ignoring exposure {}", self.configuration.nickname, exposure);
        Ok(())
    }

    fn set_auto_exposure(&mut self, enabled: bool) -> Result<()> {
        log::trace!("{}: ignoring auto exposure {}", self.configuration.nickname, enabled);
        Ok(())
    }

    fn set_brightness(&mut self, brightness: i32) -> Result<()> {
        log::trace!("{}: ignoring brightness {}", self.configuration.nickname, brightness);
        Ok(())
    }

    fn set_gain(&mut self, gain: i32) -> Result<()> {
        log::trace!("{}: ignoring gain {}", self.configuration.nickname, gain);
        Ok(())
    }
}
