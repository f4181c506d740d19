use std::time::Duration;

use crate::constants::{NEGATIVE_NAME_CACHE_TTL, POSITIVE_NAME_CACHE_TTL};

/// How a POSIX Setter picks the ids it applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PosixIdMapping {
    /// Apply the captured numeric uid/gid. Right when both hosts share one
    /// directory service.
    #[default]
    Numeric,
    /// Resolve the captured names to local ids first; an id whose name does
    /// not resolve falls back to the captured number.
    ByName,
}

/// Validity windows for every name cache a handler owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheTtls {
    pub positive: Duration,
    pub negative: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            positive: POSITIVE_NAME_CACHE_TTL,
            negative: NEGATIVE_NAME_CACHE_TTL,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CapturePolicy {
    pub enabled: bool,
}

impl Default for CapturePolicy {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Clone, Debug)]
pub struct ReplayPolicy {
    pub enabled: bool,
    pub posix_ids: PosixIdMapping,
    /// Retry a `DOMAIN\name` that does not resolve as the bare `name`.
    pub windows_bare_name_fallback: bool,
}

impl Default for ReplayPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            posix_ids: PosixIdMapping::Numeric,
            windows_bare_name_fallback: true,
        }
    }
}
