//! Windows ownership: owner SID plus the account name it resolved to.
//!
//! Replay prefers the captured *name* over the captured SID, since a SID of a
//! local account means nothing on another machine while the same account
//! name often exists on both. Resolution order, first success wins:
//!
//! 1. the captured name verbatim (`WORKGROUP\bob`, or a plain local name);
//! 2. the bare account after the domain separator (`bob`), for hosts whose
//!    workstation names differ;
//! 3. the captured SID as is.
//!
//! Names flagged as groups are looked up in the group namespace instead.
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};

use super::{OsDataGetter, OsDataSetter};
use crate::adapters::{SecurityDescriptorAccess, WindowsIdentityService};
use crate::cache::NameCache;
use crate::constants::DOMAIN_SEPARATOR;
use crate::policy::Policy;
use crate::types::envelope::encode_payload;
use crate::types::errors::Result;
use crate::types::{
    FileRecord, OsTag, OwnershipInfo, PrivateData, ReplayOutcome, SafePath, WindowsOsData,
};

pub struct WindowsOwnership {
    root: PathBuf,
    identity: Arc<dyn WindowsIdentityService>,
    security: Arc<dyn SecurityDescriptorAccess>,
    bare_name_fallback: bool,
    // sid -> name, used on capture
    users: NameCache<String>,
    groups: NameCache<String>,
    // name -> sid, used on replay
    user_sids: NameCache<String>,
    group_sids: NameCache<String>,
}

impl WindowsOwnership {
    #[must_use]
    pub fn new(
        root: impl Into<PathBuf>,
        identity: Arc<dyn WindowsIdentityService>,
        security: Arc<dyn SecurityDescriptorAccess>,
        policy: &Policy,
    ) -> Self {
        let ttls = policy.cache;
        Self {
            root: root.into(),
            identity,
            security,
            bare_name_fallback: policy.replay.windows_bare_name_fallback,
            users: NameCache::with_ttls(ttls.positive, ttls.negative),
            groups: NameCache::with_ttls(ttls.positive, ttls.negative),
            user_sids: NameCache::with_ttls(ttls.positive, ttls.negative),
            group_sids: NameCache::with_ttls(ttls.positive, ttls.negative),
        }
    }

    /// Handler backed by the Win32 account database and security APIs.
    #[cfg(windows)]
    #[must_use]
    pub fn native(root: &Path, policy: &Policy) -> Self {
        Self::new(
            root,
            Arc::new(crate::adapters::Win32Accounts),
            Arc::new(crate::adapters::Win32Security),
            policy,
        )
    }

    /// Names to try, in order, for a captured account name.
    fn candidates<'a>(&self, name: &'a str) -> Vec<&'a str> {
        let mut out = vec![name];
        if self.bare_name_fallback {
            if let Some((_, bare)) = name.rsplit_once(DOMAIN_SEPARATOR) {
                if !bare.is_empty() {
                    out.push(bare);
                }
            }
        }
        out
    }

    /// Local SID for the captured name, with the candidate that matched.
    fn resolve_local(&self, pd: &WindowsOsData) -> Option<(String, String)> {
        if pd.owner_name.is_empty() {
            return None;
        }
        for candidate in self.candidates(&pd.owner_name) {
            let found = if pd.owner_is_group {
                self.group_sids
                    .get_or_populate(candidate, |n| self.identity.group_sid_by_name(n))
            } else {
                self.user_sids
                    .get_or_populate(candidate, |n| self.identity.user_sid_by_name(n))
            };
            match found {
                Ok(sid) => return Some((sid, candidate.to_string())),
                Err(e) => debug!("ownsync: {candidate:?} does not resolve locally: {e}"),
            }
        }
        None
    }
}

impl fmt::Debug for WindowsOwnership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowsOwnership")
            .field("root", &self.root)
            .field("bare_name_fallback", &self.bare_name_fallback)
            .field("users", &self.users)
            .field("groups", &self.groups)
            .finish_non_exhaustive()
    }
}

impl OsDataGetter for WindowsOwnership {
    fn get_os_data(&self, cur: &FileRecord, _stat: &OwnershipInfo) -> Result<PrivateData> {
        let path = SafePath::from_record_name(&self.root, &cur.name)?.as_path();
        let owner_sid = self.security.owner_sid(&path).map_err(|e| {
            info!("ownsync: no owner for {}: {e}", path.display());
            e
        })?;

        let mut pd = WindowsOsData {
            owner_sid: owner_sid.clone(),
            ..WindowsOsData::default()
        };
        match self
            .users
            .get_or_populate(owner_sid.as_str(), |sid| self.identity.user_name_by_sid(sid))
        {
            Ok(name) => pd.owner_name = name,
            Err(user_err) => match self
                .groups
                .get_or_populate(owner_sid.as_str(), |sid| self.identity.group_name_by_sid(sid))
            {
                Ok(name) => {
                    pd.owner_name = name;
                    pd.owner_is_group = true;
                }
                Err(group_err) => {
                    debug!(
                        "ownsync: owner {owner_sid} of {} has no name ({user_err}; {group_err})",
                        path.display()
                    );
                }
            },
        }

        let bytes = encode_payload(OsTag::Windows, &pd)?;
        Ok(PrivateData::single(OsTag::Windows, bytes))
    }
}

impl OsDataSetter for WindowsOwnership {
    fn set_os_data(&self, file: &FileRecord, path: &Path) -> Result<ReplayOutcome> {
        let Some(pd) = file.load_os_data::<WindowsOsData>(OsTag::Windows)? else {
            return Ok(ReplayOutcome::NoData);
        };

        let (sid, matched_name) = match self.resolve_local(&pd) {
            Some((sid, name)) => (sid, Some(name)),
            None => (pd.owner_sid.clone(), None),
        };
        if sid.is_empty() {
            debug!("ownsync: {} carries neither owner name nor SID", file.name);
            return Ok(ReplayOutcome::NoData);
        }

        debug!(
            "ownsync: {} owner {:?} -> {sid} (matched {matched_name:?})",
            path.display(),
            pd.owner_name
        );
        self.security.set_owner_sid(path, &sid)?;
        Ok(ReplayOutcome::Windows { sid, matched_name })
    }
}
