//! Seams over the operating system's identity services.
//!
//! The Getters and Setters never call the OS account databases directly;
//! they go through these traits (wrapped in name caches), which keeps the
//! cross-OS mapping logic testable with in-memory stubs.
#[cfg(unix)]
pub mod system;

use crate::types::errors::LookupError;

/// User and group database of a POSIX host.
pub trait PosixIdentityService: Send + Sync {
    fn user_name(&self, uid: u32) -> Result<String, LookupError>;
    fn group_name(&self, gid: u32) -> Result<String, LookupError>;
    fn uid_by_name(&self, name: &str) -> Result<u32, LookupError>;
    fn gid_by_name(&self, name: &str) -> Result<u32, LookupError>;
}

/// Account database of a Windows host.
///
/// Names are returned domain qualified (`DOMAIN\account`). The user and group
/// namespaces are distinct: asking for a user by a group's SID fails.
pub trait WindowsIdentityService: Send + Sync {
    fn user_name_by_sid(&self, sid: &str) -> Result<String, LookupError>;
    fn group_name_by_sid(&self, sid: &str) -> Result<String, LookupError>;
    fn user_sid_by_name(&self, name: &str) -> Result<String, LookupError>;
    fn group_sid_by_name(&self, name: &str) -> Result<String, LookupError>;
}
