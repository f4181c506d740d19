#![cfg_attr(not(windows), forbid(unsafe_code))]
#![cfg_attr(windows, deny(unsafe_code))]
//! ownsync: capture and replay file ownership across operating systems.
//!
//! A file synchronized from a POSIX host to a Windows host (or back) cannot
//! reuse its numeric UID/GID or SID. Instead the sending host captures the
//! owner *identity* into an OS-tagged private-data envelope on the file
//! record, and the receiving host resolves an equivalent local identity when
//! it writes the file.
//!
//! Layout:
//! - `cache`: TTL-bounded memoizing resolver for identity lookups.
//! - `osdata`: per-OS Getter/Setter (`PosixOwnership`, `WindowsOwnership`).
//! - `types`: envelope, payloads, outcomes and errors.
//! - `adapters`: seams over the OS identity services and ownership syscalls.
//! - `api`: the `OwnershipSync` facade emitting facts for every operation.
//!
//! Only the Win32 adapters use `unsafe`; everything else forbids it.

pub mod adapters;
pub mod api;
pub mod cache;
pub mod constants;
pub mod logging;
pub mod osdata;
pub mod policy;
pub mod types;

pub use api::*;
