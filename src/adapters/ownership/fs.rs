// Default ownership adapters backed by OS metadata and fchownat (Unix-only)

use std::path::Path;

use crate::adapters::{OwnershipOracle, OwnershipWriter};
use crate::types::errors::{Error, ErrorKind, Result};
use crate::types::safepath::SafePath;
use crate::types::OwnershipInfo;

#[derive(Copy, Clone, Debug, Default)]
pub struct FsOwnershipOracle;

impl OwnershipOracle for FsOwnershipOracle {
    fn owner_of(&self, path: &SafePath) -> Result<OwnershipInfo> {
        let md = std::fs::symlink_metadata(path.as_path())
            .map_err(|e| Error::io(format!("metadata {}: {e}", path.as_path().display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::MetadataExt;
            Ok(OwnershipInfo::new(md.uid(), md.gid()))
        }
        #[cfg(not(unix))]
        {
            let _ = md;
            Ok(OwnershipInfo::default())
        }
    }
}

/// Sets numeric ownership without following a final symlink
/// (`fchownat` relative to the parent directory, `AT_SYMLINK_NOFOLLOW`).
#[derive(Copy, Clone, Debug, Default)]
pub struct LchownWriter;

impl OwnershipWriter for LchownWriter {
    fn set_owner(&self, path: &Path, uid: u32, gid: u32) -> Result<()> {
        #[cfg(unix)]
        {
            use nix::fcntl::AtFlags;
            use nix::unistd::{fchownat, Gid, Uid};

            let leaf = path.file_name().ok_or_else(|| Error {
                kind: ErrorKind::InvalidPath,
                msg: format!("no file name in {}", path.display()),
            })?;
            let parent = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            let dir = std::fs::File::open(parent)
                .map_err(|e| Error::io(format!("open {}: {e}", parent.display())))?;
            fchownat(
                &dir,
                leaf,
                Some(Uid::from_raw(uid)),
                Some(Gid::from_raw(gid)),
                AtFlags::AT_SYMLINK_NOFOLLOW,
            )
            .map_err(|e| Error::io(format!("fchownat {} to {uid}:{gid}: {e}", path.display())))
        }
        #[cfg(not(unix))]
        {
            let _ = (path, uid, gid);
            Err(Error {
                kind: ErrorKind::Unsupported,
                msg: "numeric ownership is not supported on this platform".into(),
            })
        }
    }
}
