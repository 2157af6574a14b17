//! Vision sources: a frame provider paired with its settable parameters.
//!
//! The pipeline handles every camera through `VisionSource`, whether it is
//! plugged in locally, driven through a vendor integration, or streamed over
//! the network.

use anyhow::{Context, Result};

use crate::config::CameraConfiguration;
use crate::endpoint::Endpoint;
use crate::frame::FrameProvider;
use crate::ingest::remote::{RemoteFrameProvider, RemoteFrameSource, RemoteStreamParams, MAX_FPS};
use crate::settables::{RemoteSourceSettables, VisionSourceSettables};

/// Where a source's frames come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// Directly attached camera with driver-level controls.
    Local,
    /// Camera integrated through manufacturer-specific tooling.
    Vendor,
    /// Network stream; no controls reach the camera.
    Remote,
}

/// A camera as seen by the vision pipeline.
pub trait VisionSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    fn configuration(&self) -> &CameraConfiguration;

    fn frame_provider(&self) -> &dyn FrameProvider;

    fn settables(&self) -> &dyn VisionSourceSettables;

    fn settables_mut(&mut self) -> &mut dyn VisionSourceSettables;

    /// True only for vendor-integrated cameras; gates vendor-specific
    /// configuration paths.
    fn is_vendor_camera(&self) -> bool;
}

/// Vision source backed by a remote frame stream.
///
/// Everything is fixed at construction: the endpoint parsed from the
/// configured path, the connected provider, and settables derived from the
/// first frame's static properties.
pub struct RemoteVisionSource<R: RemoteFrameSource = RemoteFrameProvider> {
    endpoint: Endpoint,
    frame_provider: R,
    settables: RemoteSourceSettables,
}

impl<R: RemoteFrameSource> RemoteVisionSource<R> {
    /// Build a source from a camera configuration.
    ///
    /// Fails with [`InvalidConfiguration`](crate::InvalidConfiguration) when
    /// the path has no `/`; errors from connecting or reading the first frame
    /// are passed through.
    pub fn new(configuration: CameraConfiguration) -> Result<Self> {
        let calibration = configuration.primary_calibration().cloned();
        let endpoint = Endpoint::parse(&configuration.path)?;

        let frame_provider = R::connect(RemoteStreamParams {
            endpoint: endpoint.clone(),
            fov: configuration.fov,
            max_fps: MAX_FPS,
            calibration,
        })?;

        let snapshot = frame_provider
            .get()
            .with_context(|| format!("read initial frame from {}", endpoint))?
            .static_properties;
        let settables = RemoteSourceSettables::new(configuration, (*snapshot).clone());

        log::info!(
            "RemoteVisionSource: {} ready at {}",
            endpoint,
            settables.current_video_mode()
        );

        Ok(Self {
            endpoint,
            frame_provider,
            settables,
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Concrete provider, for callers that need more than `FrameProvider`.
    pub fn remote(&self) -> &R {
        &self.frame_provider
    }
}

impl<R: RemoteFrameSource> VisionSource for RemoteVisionSource<R> {
    fn kind(&self) -> SourceKind {
        SourceKind::Remote
    }

    fn configuration(&self) -> &CameraConfiguration {
        self.settables.configuration()
    }

    fn frame_provider(&self) -> &dyn FrameProvider {
        &self.frame_provider
    }

    fn settables(&self) -> &dyn VisionSourceSettables {
        &self.settables
    }

    fn settables_mut(&mut self) -> &mut dyn VisionSourceSettables {
        &mut self.settables
    }

    fn is_vendor_camera(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CameraCalibration, Resolution};
    use crate::error::InvalidConfiguration;
    use crate::frame::{Frame, FrameStaticProperties};
    use crate::video_mode::{PixelFormat, VideoMode};
    use anyhow::bail;
    use std::sync::Arc;

    /// Records what it was connected with and serves fixed-size frames.
    struct RecordingSource {
        params: RemoteStreamParams,
        properties: Arc<FrameStaticProperties>,
    }

    impl RemoteFrameSource for RecordingSource {
        fn connect(params: RemoteStreamParams) -> Result<Self> {
            let properties = Arc::new(FrameStaticProperties::new(
                1920,
                1080,
                params.fov,
                params.calibration.clone(),
            ));
            Ok(Self { params, properties })
        }
    }

    impl FrameProvider for RecordingSource {
        fn name(&self) -> &str {
            "recording"
        }

        fn get(&self) -> Result<Frame> {
            Ok(Frame::new(1, self.properties.clone(), Vec::new()))
        }

        fn is_connected(&self) -> bool {
            true
        }
    }

    struct UnreachableSource;

    impl RemoteFrameSource for UnreachableSource {
        fn connect(params: RemoteStreamParams) -> Result<Self> {
            bail!("connection refused: {}", params.endpoint.address)
        }
    }

    impl FrameProvider for UnreachableSource {
        fn name(&self) -> &str {
            "unreachable"
        }

        fn get(&self) -> Result<Frame> {
            bail!("not connected")
        }

        fn is_connected(&self) -> bool {
            false
        }
    }

    fn calibration(width: u32, height: u32) -> CameraCalibration {
        CameraCalibration {
            resolution: Resolution { width, height },
            camera_intrinsics: vec![],
            dist_coeffs: vec![],
        }
    }

    #[test]
    fn passes_parsed_endpoint_and_first_calibration() -> Result<()> {
        let cfg = CameraConfiguration::new("tcp://10.0.0.5:5555/cam0", 75.0)
            .with_calibration(calibration(1920, 1080))
            .with_calibration(calibration(640, 480));
        let source = RemoteVisionSource::<RecordingSource>::new(cfg)?;

        let params = &source.remote().params;
        assert_eq!(params.endpoint.address, "tcp://10.0.0.5:5555");
        assert_eq!(params.endpoint.topic, "cam0");
        assert_eq!(params.fov, 75.0);
        assert_eq!(params.max_fps, MAX_FPS);
        assert_eq!(
            params.calibration.as_ref().map(|c| c.resolution.width),
            Some(1920)
        );
        assert_eq!(source.endpoint(), &params.endpoint);
        Ok(())
    }

    #[test]
    fn settables_follow_provider_snapshot() -> Result<()> {
        let cfg = CameraConfiguration::new("tcp://host/a/b", 70.0);
        let source = RemoteVisionSource::<RecordingSource>::new(cfg)?;
        assert_eq!(source.endpoint().address, "tcp://host/a");
        assert_eq!(
            source.settables().current_video_mode(),
            VideoMode::new(PixelFormat::Bgr, 1920, 1080, MAX_FPS)
        );
        assert_eq!(source.kind(), SourceKind::Remote);
        assert!(!source.is_vendor_camera());
        Ok(())
    }

    #[test]
    fn empty_calibrations_mean_no_calibration() -> Result<()> {
        let cfg = CameraConfiguration::new("tcp://host:5555/cam0", 70.0);
        let source = RemoteVisionSource::<RecordingSource>::new(cfg)?;
        assert!(source.remote().params.calibration.is_none());
        assert!(source
            .settables()
            .frame_static_properties()
            .calibration
            .is_none());
        Ok(())
    }

    #[test]
    fn malformed_path_fails_before_connecting() {
        let cfg = CameraConfiguration::new("noseparatorhere", 70.0);
        let err = RemoteVisionSource::<UnreachableSource>::new(cfg)
            .err()
            .unwrap();
        let invalid = err.downcast_ref::<InvalidConfiguration>().unwrap();
        assert_eq!(invalid.path, "noseparatorhere");
    }

    #[test]
    fn connect_failure_propagates() {
        let cfg = CameraConfiguration::new("tcp://10.0.0.9:5555/cam0", 70.0);
        let err = RemoteVisionSource::<UnreachableSource>::new(cfg)
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "connection refused: tcp://10.0.0.9:5555");
        assert!(err.downcast_ref::<InvalidConfiguration>().is_none());
    }
}
