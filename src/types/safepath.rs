use std::path::{Component, Path, PathBuf};

use super::errors::{Error, ErrorKind, Result};

/// A path confined to a folder root.
///
/// This is the rooting capability the Windows Getter needs to turn a file
/// record's logical name into a native path it can open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SafePath {
    /// The folder root this path is relative to
    root: PathBuf,
    /// The relative path component
    rel: PathBuf,
}

impl SafePath {
    /// Creates a new SafePath from a root and candidate path.
    ///
    /// The candidate must stay within `root` and may not contain `..`.
    ///
    /// # Errors
    /// Returns an `InvalidPath` error if `root` is relative or the candidate
    /// escapes it.
    pub fn from_rooted(root: &Path, candidate: &Path) -> Result<Self> {
        if !root.is_absolute() {
            return Err(invalid("root must be absolute"));
        }
        let effective = if candidate.is_absolute() {
            match candidate.strip_prefix(root) {
                Ok(p) => p.to_path_buf(),
                Err(_) => return Err(invalid("path escapes root")),
            }
        } else {
            candidate.to_path_buf()
        };

        let mut rel = PathBuf::new();
        for seg in effective.components() {
            match seg {
                Component::CurDir => {}
                Component::Normal(p) => rel.push(p),
                Component::ParentDir => return Err(invalid("dotdot")),
                _ => return Err(invalid("unsupported component")),
            }
        }
        if rel.as_os_str().is_empty() {
            return Err(invalid("path names the root itself"));
        }
        Ok(SafePath {
            root: root.to_path_buf(),
            rel,
        })
    }

    /// Roots a file record's logical name (always `/` separated) under `root`.
    ///
    /// # Errors
    /// Same as [`SafePath::from_rooted`]; absolute logical names are rejected.
    pub fn from_record_name(root: &Path, name: &str) -> Result<Self> {
        if name.starts_with('/') {
            return Err(invalid("record name must be relative"));
        }
        let native: PathBuf = name.split('/').filter(|s| !s.is_empty()).collect();
        Self::from_rooted(root, &native)
    }

    /// Returns the full native path.
    pub fn as_path(&self) -> PathBuf {
        self.root.join(&self.rel)
    }

    /// Returns a reference to the relative path component.
    pub fn rel(&self) -> &Path {
        &self.rel
    }
}

fn invalid(msg: &str) -> Error {
    Error {
        kind: ErrorKind::InvalidPath,
        msg: msg.into(),
    }
}
