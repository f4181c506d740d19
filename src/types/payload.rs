//! OS-specific ownership payloads stored in the private-data envelope.
use serde::{Deserialize, Serialize};

/// Ownership captured on a POSIX host. Names are empty when they did not
/// resolve at capture time; the numeric ids are always present.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosixOsData {
    pub owner_uid: u32,
    #[serde(default)]
    pub owner_name: String,
    pub group_id: u32,
    #[serde(default)]
    pub group_name: String,
}

/// Ownership captured on a Windows host.
///
/// `owner_name` may be domain qualified (`DOMAIN\user`). When
/// `owner_is_group` is set the owner is a group account, e.g.
/// `BUILTIN\Administrators`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowsOsData {
    #[serde(default)]
    pub owner_sid: String,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub owner_is_group: bool,
}
