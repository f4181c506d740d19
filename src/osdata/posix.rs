//! POSIX ownership: numeric uid/gid are authoritative, names are cosmetic.
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use log::debug;

use super::{OsDataGetter, OsDataSetter};
use crate::adapters::{OwnershipWriter, PosixIdentityService};
use crate::cache::NameCache;
use crate::policy::{Policy, PosixIdMapping};
use crate::types::envelope::encode_payload;
use crate::types::errors::Result;
use crate::types::{FileRecord, OsTag, OwnershipInfo, PosixOsData, PrivateData, ReplayOutcome};

pub struct PosixOwnership {
    identity: Arc<dyn PosixIdentityService>,
    writer: Arc<dyn OwnershipWriter>,
    mapping: PosixIdMapping,
    // id -> name, used on capture
    users: NameCache<u32>,
    groups: NameCache<u32>,
    // name -> id, used on replay by name
    uids: NameCache<String, u32>,
    gids: NameCache<String, u32>,
}

impl PosixOwnership {
    #[must_use]
    pub fn new(
        identity: Arc<dyn PosixIdentityService>,
        writer: Arc<dyn OwnershipWriter>,
        policy: &Policy,
    ) -> Self {
        let ttls = policy.cache;
        Self {
            identity,
            writer,
            mapping: policy.replay.posix_ids,
            users: NameCache::with_ttls(ttls.positive, ttls.negative),
            groups: NameCache::with_ttls(ttls.positive, ttls.negative),
            uids: NameCache::with_ttls(ttls.positive, ttls.negative),
            gids: NameCache::with_ttls(ttls.positive, ttls.negative),
        }
    }

    /// Handler backed by the system user/group databases and `lchown`.
    #[cfg(unix)]
    #[must_use]
    pub fn native(policy: &Policy) -> Self {
        Self::new(
            Arc::new(crate::adapters::SystemUserDb),
            Arc::new(crate::adapters::LchownWriter),
            policy,
        )
    }

    fn owner_name(&self, uid: u32) -> String {
        self.users
            .get_or_populate(&uid, |uid| self.identity.user_name(*uid))
            .unwrap_or_else(|e| {
                debug!("ownsync: no name for uid {uid}: {e}");
                String::new()
            })
    }

    fn group_name(&self, gid: u32) -> String {
        self.groups
            .get_or_populate(&gid, |gid| self.identity.group_name(*gid))
            .unwrap_or_else(|e| {
                debug!("ownsync: no name for gid {gid}: {e}");
                String::new()
            })
    }

    fn local_ids(&self, pd: &PosixOsData) -> (u32, u32) {
        match self.mapping {
            PosixIdMapping::Numeric => (pd.owner_uid, pd.group_id),
            PosixIdMapping::ByName => {
                let uid = if pd.owner_name.is_empty() {
                    pd.owner_uid
                } else {
                    self.uids
                        .get_or_populate(pd.owner_name.as_str(), |n| self.identity.uid_by_name(n))
                        .unwrap_or(pd.owner_uid)
                };
                let gid = if pd.group_name.is_empty() {
                    pd.group_id
                } else {
                    self.gids
                        .get_or_populate(pd.group_name.as_str(), |n| self.identity.gid_by_name(n))
                        .unwrap_or(pd.group_id)
                };
                (uid, gid)
            }
        }
    }
}

impl fmt::Debug for PosixOwnership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PosixOwnership")
            .field("mapping", &self.mapping)
            .field("users", &self.users)
            .field("groups", &self.groups)
            .finish_non_exhaustive()
    }
}

impl OsDataGetter for PosixOwnership {
    fn get_os_data(&self, _cur: &FileRecord, stat: &OwnershipInfo) -> Result<PrivateData> {
        // Name lookup errors are swallowed; an empty name is a valid outcome.
        let pd = PosixOsData {
            owner_uid: stat.uid,
            owner_name: self.owner_name(stat.uid),
            group_id: stat.gid,
            group_name: self.group_name(stat.gid),
        };
        let bytes = encode_payload(OsTag::Posix, &pd)?;
        Ok(PrivateData::single(OsTag::Posix, bytes))
    }
}

impl OsDataSetter for PosixOwnership {
    fn set_os_data(&self, file: &FileRecord, path: &Path) -> Result<ReplayOutcome> {
        let Some(pd) = file.load_os_data::<PosixOsData>(OsTag::Posix)? else {
            return Ok(ReplayOutcome::NoData);
        };
        let (uid, gid) = self.local_ids(&pd);
        debug!(
            "ownsync: {} owner {}({}) group {}({}) -> {uid}:{gid}",
            path.display(),
            pd.owner_name,
            pd.owner_uid,
            pd.group_name,
            pd.group_id
        );
        self.writer.set_owner(path, uid, gid)?;
        Ok(ReplayOutcome::Posix { uid, gid })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::errors::{Error, ErrorKind, LookupError};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubDb {
        users: HashMap<u32, &'static str>,
        groups: HashMap<u32, &'static str>,
        lookups: AtomicUsize,
    }

    impl PosixIdentityService for StubDb {
        fn user_name(&self, uid: u32) -> std::result::Result<String, LookupError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.users
                .get(&uid)
                .map(|s| s.to_string())
                .ok_or_else(|| LookupError::not_found("user", uid))
        }
        fn group_name(&self, gid: u32) -> std::result::Result<String, LookupError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.groups
                .get(&gid)
                .map(|s| s.to_string())
                .ok_or_else(|| LookupError::not_found("group", gid))
        }
        fn uid_by_name(&self, name: &str) -> std::result::Result<u32, LookupError> {
            self.users
                .iter()
                .find(|(_, n)| **n == name)
                .map(|(id, _)| *id)
                .ok_or_else(|| LookupError::not_found("user", name))
        }
        fn gid_by_name(&self, name: &str) -> std::result::Result<u32, LookupError> {
            self.groups
                .iter()
                .find(|(_, n)| **n == name)
                .map(|(id, _)| *id)
                .ok_or_else(|| LookupError::not_found("group", name))
        }
    }

    #[derive(Default)]
    struct RecordingWriter {
        calls: Mutex<Vec<(PathBuf, u32, u32)>>,
        refuse: bool,
    }

    impl OwnershipWriter for RecordingWriter {
        fn set_owner(&self, path: &Path, uid: u32, gid: u32) -> Result<()> {
            if self.refuse {
                return Err(Error {
                    kind: ErrorKind::Io,
                    msg: "EPERM".into(),
                });
            }
            self.calls
                .lock()
                .unwrap()
                .push((path.to_path_buf(), uid, gid));
            Ok(())
        }
    }

    fn db() -> Arc<StubDb> {
        Arc::new(StubDb {
            users: HashMap::from([(1000, "alice"), (1001, "bob")]),
            groups: HashMap::from([(1000, "staff"), (2000, "wheel")]),
            lookups: AtomicUsize::new(0),
        })
    }

    fn captured(handler: &PosixOwnership, uid: u32, gid: u32) -> FileRecord {
        let mut rec = FileRecord::new("a.txt");
        let pd = handler
            .get_os_data(&rec, &OwnershipInfo::new(uid, gid))
            .unwrap();
        rec.private_data.merge(pd);
        rec
    }

    #[test]
    fn capture_resolves_group_in_group_namespace() {
        let h = PosixOwnership::new(db(), Arc::new(RecordingWriter::default()), &Policy::default());
        let rec = captured(&h, 1000, 1000);
        let pd: PosixOsData = rec.load_os_data(OsTag::Posix).unwrap().unwrap();
        assert_eq!(
            pd,
            PosixOsData {
                owner_uid: 1000,
                owner_name: "alice".into(),
                group_id: 1000,
                group_name: "staff".into(),
            }
        );
    }

    #[test]
    fn capture_keeps_ids_when_names_are_unknown() {
        let h = PosixOwnership::new(db(), Arc::new(RecordingWriter::default()), &Policy::default());
        let rec = captured(&h, 4242, 4343);
        let pd: PosixOsData = rec.load_os_data(OsTag::Posix).unwrap().unwrap();
        assert_eq!(pd.owner_uid, 4242);
        assert_eq!(pd.group_id, 4343);
        assert!(pd.owner_name.is_empty());
        assert!(pd.group_name.is_empty());
    }

    #[test]
    fn repeated_capture_hits_the_cache() {
        let ids = db();
        let h = PosixOwnership::new(
            ids.clone(),
            Arc::new(RecordingWriter::default()),
            &Policy::default(),
        );
        for _ in 0..10 {
            captured(&h, 1000, 1000);
            captured(&h, 4242, 4242);
        }
        assert_eq!(ids.lookups.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn replay_applies_numeric_ids() {
        let writer = Arc::new(RecordingWriter::default());
        let h = PosixOwnership::new(db(), writer.clone(), &Policy::default());
        let rec = captured(&h, 1001, 2000);
        let out = h.set_os_data(&rec, Path::new("/dst/a.txt")).unwrap();
        assert_eq!(out, ReplayOutcome::Posix { uid: 1001, gid: 2000 });
        assert_eq!(
            writer.calls.lock().unwrap().as_slice(),
            &[(PathBuf::from("/dst/a.txt"), 1001, 2000)]
        );
    }

    #[test]
    fn replay_by_name_maps_to_local_ids() {
        let mut rec = FileRecord::new("a.txt");
        rec.store_os_data(
            OsTag::Posix,
            &PosixOsData {
                owner_uid: 501,
                owner_name: "bob".into(),
                group_id: 20,
                group_name: "ghost".into(),
            },
        )
        .unwrap();
        let writer = Arc::new(RecordingWriter::default());
        let h = PosixOwnership::new(db(), writer.clone(), &Policy::by_name_preset());
        let out = h.set_os_data(&rec, Path::new("/dst/a.txt")).unwrap();
        // bob resolves locally; the unknown group keeps its captured id.
        assert_eq!(out, ReplayOutcome::Posix { uid: 1001, gid: 20 });
    }

    #[test]
    fn replay_without_posix_entry_is_noop() {
        let writer = Arc::new(RecordingWriter::default());
        let h = PosixOwnership::new(db(), writer.clone(), &Policy::default());
        let mut rec = FileRecord::new("a.txt");
        rec.private_data.set(OsTag::Windows, b"{}".to_vec());
        let out = h.set_os_data(&rec, Path::new("/dst/a.txt")).unwrap();
        assert_eq!(out, ReplayOutcome::NoData);
        assert!(writer.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn refused_chown_is_reported() {
        let writer = Arc::new(RecordingWriter {
            refuse: true,
            ..Default::default()
        });
        let h = PosixOwnership::new(db(), writer, &Policy::default());
        let rec = captured(&h, 1000, 1000);
        let err = h.set_os_data(&rec, Path::new("/dst/a.txt")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Io);
    }
}
