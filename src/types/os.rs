//! OS family tags keying the private-data envelope.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{OS_TAG_POSIX, OS_TAG_WINDOWS};

/// Operating system family a private-data payload was captured under.
///
/// Serialized as its numeric wire id. Ids this build does not know are kept
/// as `Other` so they pass through capture and transport untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum OsTag {
    Windows,
    Posix,
    Other(u32),
}

impl OsTag {
    /// Tag of the operating system this process runs on.
    #[must_use]
    pub const fn local() -> Self {
        if cfg!(windows) {
            OsTag::Windows
        } else {
            OsTag::Posix
        }
    }

    #[must_use]
    pub const fn wire_id(self) -> u32 {
        match self {
            OsTag::Windows => OS_TAG_WINDOWS,
            OsTag::Posix => OS_TAG_POSIX,
            OsTag::Other(id) => id,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OsTag::Windows => "windows",
            OsTag::Posix => "posix",
            OsTag::Other(_) => "other",
        }
    }
}

impl From<u32> for OsTag {
    fn from(id: u32) -> Self {
        match id {
            OS_TAG_WINDOWS => OsTag::Windows,
            OS_TAG_POSIX => OsTag::Posix,
            other => OsTag::Other(other),
        }
    }
}

impl From<OsTag> for u32 {
    fn from(tag: OsTag) -> Self {
        tag.wire_id()
    }
}

impl fmt::Display for OsTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsTag::Other(id) => write!(f, "os#{id}"),
            known => f.write_str(known.as_str()),
        }
    }
}
