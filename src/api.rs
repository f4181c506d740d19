// Facade for API module; delegates to submodules under src/api/

use std::path::Path;

use crate::adapters::{FsOwnershipOracle, OwnershipOracle};
use crate::logging::{AuditSink, FactsEmitter};
use crate::osdata::OsDataHandler;
use crate::policy::Policy;
use crate::types::{FileRecord, OsTag, OwnershipInfo, ReplayOutcome};

mod capture;
pub mod errors;
mod replay;

pub use errors::{id_str, ApiError, ErrorId};

/// Entry point for a sync engine: captures ownership into file records at
/// scan time and replays it onto files as they are written.
///
/// Construct once per process and share it across workers; all methods take
/// `&self`.
pub struct OwnershipSync<E: FactsEmitter, A: AuditSink> {
    facts: E,
    audit: A,
    policy: Policy,
    handler: OsDataHandler,
    oracle: Box<dyn OwnershipOracle>,
}

impl<E: FactsEmitter, A: AuditSink> OwnershipSync<E, A> {
    pub fn new(facts: E, audit: A, policy: Policy, handler: OsDataHandler) -> Self {
        Self {
            facts,
            audit,
            policy,
            handler,
            oracle: Box::new(FsOwnershipOracle),
        }
    }

    /// Build with the native handler for the running OS.
    ///
    /// # Errors
    /// Returns `ApiError::Unsupported` on platforms without a handler.
    pub fn for_local_os(facts: E, audit: A, policy: Policy, root: &Path) -> Result<Self, ApiError> {
        let handler = OsDataHandler::for_local_os(root, &policy).map_err(ApiError::from_capture)?;
        Ok(Self::new(facts, audit, policy, handler))
    }

    pub fn with_ownership_oracle(mut self, oracle: Box<dyn OwnershipOracle>) -> Self {
        self.oracle = oracle;
        self
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn handler(&self) -> &OsDataHandler {
        &self.handler
    }

    pub fn os_tag(&self) -> OsTag {
        self.handler.os_tag()
    }

    /// Capture ownership of a scanned file into `record.private_data`,
    /// replacing only the entry for the local OS.
    ///
    /// # Errors
    /// Capture I/O or encoding failures. The record is left unchanged.
    pub fn capture(&self, record: &mut FileRecord, stat: &OwnershipInfo) -> Result<(), ApiError> {
        capture::run(self, record, stat)
    }

    /// Like [`capture`](Self::capture), reading the stat result for
    /// `record.name` under `root` through the configured `OwnershipOracle`.
    ///
    /// # Errors
    /// Invalid record name, stat failure, or capture failure.
    pub fn capture_path(&self, record: &mut FileRecord, root: &Path) -> Result<(), ApiError> {
        capture::run_rooted(self, record, root)
    }

    /// Replay the ownership carried by `record` onto the local `path`.
    ///
    /// Errors are reported to the caller and as a `replay` failure fact; a
    /// sync engine should record them and carry on with the file.
    ///
    /// # Errors
    /// Undecodable private data, or the ownership change was refused.
    pub fn replay(&self, record: &FileRecord, path: &Path) -> Result<ReplayOutcome, ApiError> {
        replay::run(self, record, path)
    }
}
