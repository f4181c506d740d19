//! Per-OS capture (Getter) and replay (Setter) of ownership private data.
//!
//! Each OS family has one handler type implementing both traits and owning
//! its name caches:
//! - `posix`: numeric uid/gid plus best-effort user and group names.
//! - `windows`: owner SID plus best-effort account name, replayed through a
//!   name-first fallback chain.
//!
//! [`OsDataHandler`] is the closed set of handlers; pick one per process with
//! [`OsDataHandler::for_local_os`] and share it across workers.
use std::path::Path;

pub mod posix;
pub mod windows;

pub use posix::PosixOwnership;
pub use windows::WindowsOwnership;

use crate::policy::Policy;
use crate::types::errors::Result;
use crate::types::{FileRecord, OsTag, OwnershipInfo, PrivateData, ReplayOutcome};

pub trait OsDataGetter: Send + Sync {
    /// Capture ownership of the scanned file `cur`.
    ///
    /// Returns an envelope holding only the entry for this handler's OS. The
    /// caller merges it into the record; entries for other OSes are never
    /// touched here.
    ///
    /// # Errors
    /// I/O failures reaching the file or its security information, and
    /// encoding failures. Name lookup failures are not errors.
    fn get_os_data(&self, cur: &FileRecord, stat: &OwnershipInfo) -> Result<PrivateData>;
}

pub trait OsDataSetter: Send + Sync {
    /// Apply the ownership captured in `file` to the local `path`.
    ///
    /// A record without an entry for this handler's OS yields
    /// `ReplayOutcome::NoData`.
    ///
    /// # Errors
    /// The entry does not decode, or the ownership change is refused.
    fn set_os_data(&self, file: &FileRecord, path: &Path) -> Result<ReplayOutcome>;
}

#[derive(Debug)]
pub enum OsDataHandler {
    Posix(PosixOwnership),
    Windows(WindowsOwnership),
}

impl OsDataHandler {
    /// Native handler for the running OS.
    ///
    /// `root` is the folder root record names are relative to; the Windows
    /// handler opens files under it to read their security descriptors.
    ///
    /// # Errors
    /// Returns an `Unsupported` error on platforms that are neither Unix nor
    /// Windows.
    pub fn for_local_os(root: &Path, policy: &Policy) -> Result<Self> {
        #[cfg(unix)]
        {
            let _ = root;
            Ok(Self::Posix(PosixOwnership::native(policy)))
        }
        #[cfg(windows)]
        {
            Ok(Self::Windows(WindowsOwnership::native(root, policy)))
        }
        #[cfg(not(any(unix, windows)))]
        {
            let _ = (root, policy);
            Err(crate::types::errors::Error {
                kind: crate::types::errors::ErrorKind::Unsupported,
                msg: "no ownership handler for this platform".into(),
            })
        }
    }

    #[must_use]
    pub const fn os_tag(&self) -> OsTag {
        match self {
            OsDataHandler::Posix(_) => OsTag::Posix,
            OsDataHandler::Windows(_) => OsTag::Windows,
        }
    }
}

impl OsDataGetter for OsDataHandler {
    fn get_os_data(&self, cur: &FileRecord, stat: &OwnershipInfo) -> Result<PrivateData> {
        match self {
            OsDataHandler::Posix(h) => h.get_os_data(cur, stat),
            OsDataHandler::Windows(h) => h.get_os_data(cur, stat),
        }
    }
}

impl OsDataSetter for OsDataHandler {
    fn set_os_data(&self, file: &FileRecord, path: &Path) -> Result<ReplayOutcome> {
        match self {
            OsDataHandler::Posix(h) => h.set_os_data(file, path),
            OsDataHandler::Windows(h) => h.set_os_data(file, path),
        }
    }
}

impl From<PosixOwnership> for OsDataHandler {
    fn from(h: PosixOwnership) -> Self {
        OsDataHandler::Posix(h)
    }
}

impl From<WindowsOwnership> for OsDataHandler {
    fn from(h: WindowsOwnership) -> Self {
        OsDataHandler::Windows(h)
    }
}
