pub mod fs;

use std::path::Path;

use crate::types::{errors::Result, safepath::SafePath, OwnershipInfo};

/// Stat side of the scanner: reports who owns a path.
pub trait OwnershipOracle: Send + Sync {
    /// Get ownership information for the specified path.
    /// # Errors
    /// Returns an error if ownership information cannot be determined.
    fn owner_of(&self, path: &SafePath) -> Result<OwnershipInfo>;
}

/// Applies POSIX ownership to a freshly written path without following a
/// final symlink.
pub trait OwnershipWriter: Send + Sync {
    /// # Errors
    /// Returns an `Io` error when the ownership change is refused.
    fn set_owner(&self, path: &Path, uid: u32, gid: u32) -> Result<()>;
}

/// Reads and writes the owner recorded in a file's security descriptor.
///
/// SIDs travel as their string form (`S-1-5-21-...`).
pub trait SecurityDescriptorAccess: Send + Sync {
    /// Open `path` for reading and return the owner SID.
    /// # Errors
    /// Any failure opening the file or querying its security information.
    fn owner_sid(&self, path: &Path) -> Result<String>;

    /// Replace the owner of `path` with `sid`.
    /// # Errors
    /// Returns an `Io` error if the SID is malformed or the change is refused.
    fn set_owner_sid(&self, path: &Path, sid: &str) -> Result<()>;
}
