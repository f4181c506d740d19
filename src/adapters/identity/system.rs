// Default PosixIdentityService backed by the system passwd/group databases
// (getpwuid_r and friends via nix, so NSS modules such as LDAP are honoured).

use nix::unistd::{Gid, Group, Uid, User};

use super::PosixIdentityService;
use crate::types::errors::LookupError;

#[derive(Copy, Clone, Debug, Default)]
pub struct SystemUserDb;

fn unavailable(e: nix::Error) -> LookupError {
    LookupError::Unavailable(e.to_string())
}

impl PosixIdentityService for SystemUserDb {
    fn user_name(&self, uid: u32) -> Result<String, LookupError> {
        User::from_uid(Uid::from_raw(uid))
            .map_err(unavailable)?
            .map(|u| u.name)
            .ok_or_else(|| LookupError::not_found("user", uid))
    }

    fn group_name(&self, gid: u32) -> Result<String, LookupError> {
        Group::from_gid(Gid::from_raw(gid))
            .map_err(unavailable)?
            .map(|g| g.name)
            .ok_or_else(|| LookupError::not_found("group", gid))
    }

    fn uid_by_name(&self, name: &str) -> Result<u32, LookupError> {
        User::from_name(name)
            .map_err(unavailable)?
            .map(|u| u.uid.as_raw())
            .ok_or_else(|| LookupError::not_found("user", name))
    }

    fn gid_by_name(&self, name: &str) -> Result<u32, LookupError> {
        Group::from_name(name)
            .map_err(unavailable)?
            .map(|g| g.gid.as_raw())
            .ok_or_else(|| LookupError::not_found("group", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_resolves_both_ways() {
        let db = SystemUserDb;
        let name = db.user_name(0).unwrap();
        assert_eq!(db.uid_by_name(&name).unwrap(), 0);
    }

    #[test]
    fn unknown_name_is_not_found() {
        let err = SystemUserDb
            .uid_by_name("ownsync-no-such-user-zz")
            .unwrap_err();
        assert!(matches!(err, LookupError::NotFound { namespace: "user", .. }));
    }
}
