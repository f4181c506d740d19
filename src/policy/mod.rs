//! Policy configuration for capture and replay.
//!
//! Consumers construct a [`Policy`](crate::policy::Policy) via `Default` or a
//! preset (`by_name_preset`, `disabled`) and customize fields before building
//! an [`OsDataHandler`](crate::osdata::OsDataHandler) and the
//! [`OwnershipSync`](crate::OwnershipSync) facade.
//!
//! Submodules:
//! - `config`: policy struct and presets
//! - `types`: grouped policy sections

pub mod config;
pub mod types;

pub use config::Policy;
pub use types::{CacheTtls, CapturePolicy, PosixIdMapping, ReplayPolicy};
