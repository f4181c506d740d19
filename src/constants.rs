//! Shared crate-wide constants for ownsync.
//!
//! Centralizes magic values and default labels used across modules.
//! Adjusting these here will propagate through the crate.

use std::time::Duration;

/// How long a successful name resolution stays valid in a `NameCache`.
pub const POSITIVE_NAME_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// How long a failed name resolution stays valid in a `NameCache`.
/// Kept short so a transient identity-service failure is retried soon.
pub const NEGATIVE_NAME_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Separator between the domain (or workstation) and account in Windows
/// account names, e.g. `WORKGROUP\bob`.
pub const DOMAIN_SEPARATOR: char = '\\';

/// Wire id of the Windows OS tag in the private-data envelope.
pub const OS_TAG_WINDOWS: u32 = 1;

/// Wire id of the POSIX OS tag in the private-data envelope.
pub const OS_TAG_POSIX: u32 = 2;

/// Subsystem label stamped on every emitted fact.
pub const FACTS_SUBSYSTEM: &str = "ownsync";
