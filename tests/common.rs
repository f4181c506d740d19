//! Shared test helpers for the ownsync integration tests.
#![allow(dead_code)]

use log::Level;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use ownsync::adapters::{
    OwnershipWriter, PosixIdentityService, SecurityDescriptorAccess, WindowsIdentityService,
};
use ownsync::logging::{AuditSink, FactsEmitter};
use ownsync::types::errors::{Error, ErrorKind, LookupError, Result};

/// A simple in-memory emitter to capture facts during tests.
#[derive(Clone, Default, Debug)]
pub struct TestEmitter {
    pub events: Arc<Mutex<Vec<(String, String, String, Value)>>>,
}

impl FactsEmitter for TestEmitter {
    fn emit(&self, subsystem: &str, event: &str, decision: &str, fields: Value) {
        self.events
            .lock()
            .unwrap()
            .push((subsystem.into(), event.into(), decision.into(), fields));
    }
}

impl TestEmitter {
    /// `(event, decision)` pairs in emission order.
    pub fn decisions(&self) -> Vec<(String, String)> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(_, e, d, _)| (e.clone(), d.clone()))
            .collect()
    }
}

/// A no-op audit sink for tests.
#[derive(Clone, Default)]
pub struct TestAudit;

impl AuditSink for TestAudit {
    fn log(&self, _level: Level, _msg: &str) {}
}

/// In-memory passwd/group database.
#[derive(Default)]
pub struct MapUserDb {
    pub users: HashMap<u32, String>,
    pub groups: HashMap<u32, String>,
}

impl MapUserDb {
    pub fn with(users: &[(u32, &str)], groups: &[(u32, &str)]) -> Self {
        Self {
            users: users.iter().map(|(id, n)| (*id, n.to_string())).collect(),
            groups: groups.iter().map(|(id, n)| (*id, n.to_string())).collect(),
        }
    }
}

fn id_of(map: &HashMap<u32, String>, name: &str) -> Option<u32> {
    map.iter().find(|(_, n)| n.as_str() == name).map(|(id, _)| *id)
}

impl PosixIdentityService for MapUserDb {
    fn user_name(&self, uid: u32) -> std::result::Result<String, LookupError> {
        self.users
            .get(&uid)
            .cloned()
            .ok_or_else(|| LookupError::not_found("user", uid))
    }
    fn group_name(&self, gid: u32) -> std::result::Result<String, LookupError> {
        self.groups
            .get(&gid)
            .cloned()
            .ok_or_else(|| LookupError::not_found("group", gid))
    }
    fn uid_by_name(&self, name: &str) -> std::result::Result<u32, LookupError> {
        id_of(&self.users, name).ok_or_else(|| LookupError::not_found("user", name))
    }
    fn gid_by_name(&self, name: &str) -> std::result::Result<u32, LookupError> {
        id_of(&self.groups, name).ok_or_else(|| LookupError::not_found("group", name))
    }
}

/// Records every chown instead of performing it.
#[derive(Default)]
pub struct RecordingWriter {
    pub calls: Mutex<Vec<(PathBuf, u32, u32)>>,
}

impl OwnershipWriter for RecordingWriter {
    fn set_owner(&self, path: &Path, uid: u32, gid: u32) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_path_buf(), uid, gid));
        Ok(())
    }
}

/// In-memory Windows account database keyed by qualified name.
#[derive(Default)]
pub struct MapAccounts {
    pub users: HashMap<String, String>,
    pub groups: HashMap<String, String>,
}

impl MapAccounts {
    pub fn with(users: &[(&str, &str)], groups: &[(&str, &str)]) -> Self {
        Self {
            users: users.iter().map(|(n, s)| (n.to_string(), s.to_string())).collect(),
            groups: groups.iter().map(|(n, s)| (n.to_string(), s.to_string())).collect(),
        }
    }
}

fn name_of(map: &HashMap<String, String>, sid: &str) -> Option<String> {
    map.iter().find(|(_, s)| s.as_str() == sid).map(|(n, _)| n.clone())
}

impl WindowsIdentityService for MapAccounts {
    fn user_name_by_sid(&self, sid: &str) -> std::result::Result<String, LookupError> {
        name_of(&self.users, sid).ok_or_else(|| LookupError::not_found("user", sid))
    }
    fn group_name_by_sid(&self, sid: &str) -> std::result::Result<String, LookupError> {
        name_of(&self.groups, sid).ok_or_else(|| LookupError::not_found("group", sid))
    }
    fn user_sid_by_name(&self, name: &str) -> std::result::Result<String, LookupError> {
        self.users
            .get(name)
            .cloned()
            .ok_or_else(|| LookupError::not_found("user", name))
    }
    fn group_sid_by_name(&self, name: &str) -> std::result::Result<String, LookupError> {
        self.groups
            .get(name)
            .cloned()
            .ok_or_else(|| LookupError::not_found("group", name))
    }
}

/// Security descriptors held in memory, keyed by full path.
#[derive(Default)]
pub struct MapSecurity {
    pub owners: Mutex<HashMap<PathBuf, String>>,
}

impl MapSecurity {
    pub fn owner(&self, path: &Path) -> Option<String> {
        self.owners.lock().unwrap().get(path).cloned()
    }
}

impl SecurityDescriptorAccess for MapSecurity {
    fn owner_sid(&self, path: &Path) -> Result<String> {
        self.owner(path).ok_or_else(|| Error {
            kind: ErrorKind::Io,
            msg: format!("open {}: not found", path.display()),
        })
    }

    fn set_owner_sid(&self, path: &Path, sid: &str) -> Result<()> {
        self.owners
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), sid.to_string());
        Ok(())
    }
}

/// Create a temporary root directory for record names.
pub fn with_temp_root() -> tempfile::TempDir {
    tempfile::tempdir().expect("tempdir")
}
