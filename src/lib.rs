//! Remote vision source.
//!
//! Lets the vision pipeline treat a network-streamed camera exactly like a
//! locally attached one.
//!
//! # Architecture
//!
//! A camera configuration carries a path of the form
//! `{transport}://{address}/{topic}`. Building a [`RemoteVisionSource`]:
//!
//! 1. Picks the first calibration of the configuration, if any.
//! 2. Splits the path at its last `/` into address and topic ([`Endpoint`]).
//! 3. Connects a [`RemoteFrameSource`] to that address and topic.
//! 4. Snapshots the first frame's static properties and derives
//!    [`RemoteSourceSettables`] from them: one fixed BGR video mode, and
//!    camera controls that are accepted and ignored.
//!
//! # Module Structure
//!
//! - `config`: camera configuration and calibration records
//! - `endpoint`: path parsing
//! - `frame`: frames, static geometry, `FrameProvider`
//! - `video_mode`: pixel formats and video modes
//! - `settables`: the settable-parameters interface and the remote shim
//! - `ingest`: frame sources (remote streams)
//! - `source`: the `VisionSource` facade

pub mod config;
pub mod endpoint;
pub mod error;
pub mod frame;
pub mod ingest;
pub mod settables;
pub mod source;
pub mod video_mode;

pub use config::{CameraCalibration, CameraConfiguration, CameraType, Intrinsics, Resolution};
pub use endpoint::Endpoint;
pub use error::{InvalidConfiguration, EXPECTED_PATH_FORMAT};
pub use frame::{Frame, FrameProvider, FrameStaticProperties};
pub use ingest::{RemoteFrameProvider, RemoteFrameSource, RemoteStats, RemoteStreamParams, MAX_FPS};
pub use settables::{RemoteSourceSettables, VisionSourceSettables};
pub use source::{RemoteVisionSource, SourceKind, VisionSource};
pub use video_mode::{PixelFormat, VideoMode, VideoModeSet};
