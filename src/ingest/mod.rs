//! Frame ingestion sources.
//!
//! - Remote streams (network cameras publishing on a topic)
//!
//! Sources hand out `Frame`s through the `FrameProvider` trait and own their
//! transport for as long as they live.

pub mod remote;

pub use remote::{RemoteFrameProvider, RemoteFrameSource, RemoteStats, RemoteStreamParams, MAX_FPS};
