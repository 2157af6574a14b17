//! Endpoint parsing for remote camera paths.
//!
//! A remote camera path looks like `tcp://10.0.0.5:5555/cam0`. The address may
//! itself contain separators (the scheme's `//`, or nested path segments), so
//! the split always happens at the LAST `/`.

use std::fmt;

use crate::error::InvalidConfiguration;

/// Connection address and topic derived from a camera path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub address: String,
    pub topic: String,
}

impl Endpoint {
    /// Split `path` into address and topic at the last `/`.
    ///
    /// A trailing `/` yields an empty topic; that is left for the remote
    /// source to judge.
    pub fn parse(path: &str) -> Result<Self, InvalidConfiguration> {
        let idx = path
            .rfind('/')
            .ok_or_else(|| InvalidConfiguration::malformed_path(path))?;
        Ok(Self {
            address: path[..idx].to_string(),
            topic: path[idx + 1..].to_string(),
        })
    }

    /// Transport scheme of the address (`tcp` in `tcp://host:port`), if any.
    pub fn scheme(&self) -> Option<&str> {
        self.address.split_once("://").map(|(scheme, _)| scheme)
    }

    /// Address with the `scheme://` prefix removed.
    pub fn authority(&self) -> &str {
        self.address
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.address)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.topic)
    }
}
