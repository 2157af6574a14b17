use thiserror::Error;

/// Format every remote camera path is expected to follow.
pub const EXPECTED_PATH_FORMAT: &str = "{transport}://{address}/{topic}";

/// Raised while building a remote source from a camera configuration.
///
/// Fatal to construction: no partially built source is ever returned. It is
/// carried inside `anyhow::Error` by the facade, so callers recover it with
/// `err.downcast_ref::<InvalidConfiguration>()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("remote camera path is malformed: expected '{expected}' but received '{path}'")]
pub struct InvalidConfiguration {
    pub path: String,
    pub expected: &'static str,
}

impl InvalidConfiguration {
    pub(crate) fn malformed_path(path: &str) -> Self {
        Self {
            path: path.to_string(),
            expected: EXPECTED_PATH_FORMAT,
        }
    }
}
