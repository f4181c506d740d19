//! Data-only types for ownership of a filesystem path.
//! Centralized under `crate::types` for cross-layer reuse.
use serde::Serialize;

/// Numeric owner and group of a path as reported by stat.
///
/// On Windows these carry no meaning and are reported as zero; the Windows
/// Getter reads the owner SID from the security descriptor instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OwnershipInfo {
    /// User ID of the owner
    pub uid: u32,
    /// Group ID of the owner
    pub gid: u32,
}

impl OwnershipInfo {
    #[must_use]
    pub const fn new(uid: u32, gid: u32) -> Self {
        Self { uid, gid }
    }
}

/// What a replay did to the local file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "applied", rename_all = "snake_case")]
pub enum ReplayOutcome {
    /// The record carried no payload for the local OS; ownership left alone.
    NoData,
    /// POSIX ownership was set to these ids.
    Posix { uid: u32, gid: u32 },
    /// Windows owner was set to `sid`. `matched_name` is the account name that
    /// resolved locally, or `None` when the captured SID was used as is.
    Windows {
        sid: String,
        matched_name: Option<String>,
    },
}

impl ReplayOutcome {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        !matches!(self, ReplayOutcome::NoData)
    }
}
