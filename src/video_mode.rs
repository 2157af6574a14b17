use std::collections::BTreeMap;
use std::fmt;

/// Pixel layout of a video mode.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 8-bit 3-channel blue/green/red.
    Bgr,
    Mjpeg,
    Yuyv,
    Rgb565,
    Gray,
}

/// Resolution, pixel format and frame rate a camera can run at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VideoMode {
    pub pixel_format: PixelFormat,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl VideoMode {
    pub fn new(pixel_format: PixelFormat, width: u32, height: u32, fps: u32) -> Self {
        Self {
            pixel_format,
            width,
            height,
            fps,
        }
    }
}

impl fmt::Display for VideoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} {:?} @ {} fps",
            self.width, self.height, self.pixel_format, self.fps
        )
    }
}

/// Video modes a source offers.
///
/// Sources that cannot switch modes say so with `Fixed` instead of handing out
/// a collection that happens to have one entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VideoModeSet {
    Fixed(VideoMode),
    Configurable(BTreeMap<usize, VideoMode>),
}

impl VideoModeSet {
    pub fn is_fixed(&self) -> bool {
        matches!(self, VideoModeSet::Fixed(_))
    }

    /// Index-keyed view; a fixed set is `{0: mode}`.
    pub fn as_map(&self) -> BTreeMap<usize, VideoMode> {
        match self {
            VideoModeSet::Fixed(mode) => BTreeMap::from([(0, *mode)]),
            VideoModeSet::Configurable(modes) => modes.clone(),
        }
    }

    pub fn get(&self, index: usize) -> Option<VideoMode> {
        match self {
            VideoModeSet::Fixed(mode) => (index == 0).then_some(*mode),
            VideoModeSet::Configurable(modes) => modes.get(&index).copied(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            VideoModeSet::Fixed(_) => 1,
            VideoModeSet::Configurable(modes) => modes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
