//! Native Windows adapters: security descriptor owner access and the
//! account database (`LookupAccountSidW` / `LookupAccountNameW`).
//!
//! All FFI lives here; the rest of the crate works with SID strings.
use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;
use std::path::Path;
use std::ptr;

use windows_sys::Win32::Foundation::{
    CloseHandle, GetLastError, LocalFree, ERROR_INSUFFICIENT_BUFFER, ERROR_NONE_MAPPED,
    ERROR_SUCCESS, INVALID_HANDLE_VALUE,
};
use windows_sys::Win32::Security::Authorization::{
    ConvertSidToStringSidW, ConvertStringSidToSidW, GetSecurityInfo, SetNamedSecurityInfoW,
    SE_FILE_OBJECT,
};
use windows_sys::Win32::Security::{
    LookupAccountNameW, LookupAccountSidW, SidTypeAlias, SidTypeGroup, SidTypeUser,
    SidTypeWellKnownGroup, OWNER_SECURITY_INFORMATION, PSECURITY_DESCRIPTOR, PSID,
    SID_NAME_USE,
};
use windows_sys::Win32::Storage::FileSystem::{
    CreateFileW, FILE_FLAG_BACKUP_SEMANTICS, FILE_SHARE_DELETE, FILE_SHARE_READ,
    FILE_SHARE_WRITE, OPEN_EXISTING, READ_CONTROL,
};

use crate::adapters::{SecurityDescriptorAccess, WindowsIdentityService};
use crate::constants::DOMAIN_SEPARATOR;
use crate::types::errors::{Error, LookupError, Result};

fn wide(s: &OsStr) -> Vec<u16> {
    s.encode_wide().chain(std::iter::once(0)).collect()
}

fn from_wide(buf: &[u16]) -> String {
    let end = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..end])
}

fn last_error() -> std::io::Error {
    std::io::Error::last_os_error()
}

/// Owns a SID allocated by `ConvertStringSidToSidW`.
struct LocalSid(PSID);

impl LocalSid {
    fn parse(sid: &str) -> std::io::Result<Self> {
        let w = wide(OsStr::new(sid));
        let mut out: PSID = ptr::null_mut();
        let ok = unsafe { ConvertStringSidToSidW(w.as_ptr(), &mut out) };
        if ok == 0 {
            return Err(last_error());
        }
        Ok(Self(out))
    }
}

impl Drop for LocalSid {
    fn drop(&mut self) {
        unsafe {
            LocalFree(self.0 as _);
        }
    }
}

fn sid_to_string(sid: PSID) -> std::io::Result<String> {
    let mut out: *mut u16 = ptr::null_mut();
    let ok = unsafe { ConvertSidToStringSidW(sid, &mut out) };
    if ok == 0 {
        return Err(last_error());
    }
    let s = unsafe {
        let mut len = 0usize;
        while *out.add(len) != 0 {
            len += 1;
        }
        String::from_utf16_lossy(std::slice::from_raw_parts(out, len))
    };
    unsafe {
        LocalFree(out as _);
    }
    Ok(s)
}

/// Security descriptor access through `GetSecurityInfo`/`SetNamedSecurityInfoW`.
#[derive(Copy, Clone, Debug, Default)]
pub struct Win32Security;

impl SecurityDescriptorAccess for Win32Security {
    fn owner_sid(&self, path: &Path) -> Result<String> {
        let w = wide(path.as_os_str());
        let handle = unsafe {
            CreateFileW(
                w.as_ptr(),
                READ_CONTROL,
                FILE_SHARE_READ | FILE_SHARE_WRITE | FILE_SHARE_DELETE,
                ptr::null(),
                OPEN_EXISTING,
                FILE_FLAG_BACKUP_SEMANTICS,
                0 as _,
            )
        };
        if handle == INVALID_HANDLE_VALUE {
            return Err(Error::io(format!("open {}: {}", path.display(), last_error())));
        }

        let mut owner: PSID = ptr::null_mut();
        let mut sd: PSECURITY_DESCRIPTOR = ptr::null_mut();
        let rc = unsafe {
            GetSecurityInfo(
                handle,
                SE_FILE_OBJECT,
                OWNER_SECURITY_INFORMATION,
                &mut owner,
                ptr::null_mut(),
                ptr::null_mut(),
                ptr::null_mut(),
                &mut sd,
            )
        };
        unsafe {
            CloseHandle(handle);
        }
        if rc != ERROR_SUCCESS {
            return Err(Error::io(format!(
                "security info for {}: {}",
                path.display(),
                std::io::Error::from_raw_os_error(rc as i32)
            )));
        }

        // `owner` points into `sd`; convert before releasing it.
        let sid = sid_to_string(owner);
        unsafe {
            LocalFree(sd as _);
        }
        sid.map_err(|e| Error::io(format!("owner of {}: {e}", path.display())))
    }

    fn set_owner_sid(&self, path: &Path, sid: &str) -> Result<()> {
        let owner = LocalSid::parse(sid).map_err(|e| Error::io(format!("parse sid {sid}: {e}")))?;
        let mut w = wide(path.as_os_str());
        let rc = unsafe {
            SetNamedSecurityInfoW(
                w.as_mut_ptr() as _,
                SE_FILE_OBJECT,
                OWNER_SECURITY_INFORMATION,
                owner.0,
                ptr::null_mut(),
                ptr::null(),
                ptr::null(),
            )
        };
        if rc != ERROR_SUCCESS {
            return Err(Error::io(format!(
                "set owner of {} to {sid}: {}",
                path.display(),
                std::io::Error::from_raw_os_error(rc as i32)
            )));
        }
        Ok(())
    }
}

/// Local account database.
#[derive(Copy, Clone, Debug, Default)]
pub struct Win32Accounts;

fn is_user(kind: SID_NAME_USE) -> bool {
    kind == SidTypeUser
}

fn is_group(kind: SID_NAME_USE) -> bool {
    kind == SidTypeGroup || kind == SidTypeWellKnownGroup || kind == SidTypeAlias
}

fn lookup_error(namespace: &'static str, key: &str, code: u32) -> LookupError {
    if code == ERROR_NONE_MAPPED {
        LookupError::not_found(namespace, key)
    } else {
        LookupError::Unavailable(std::io::Error::from_raw_os_error(code as i32).to_string())
    }
}

/// Resolve a SID to `DOMAIN\name` and its account type.
fn account_by_sid(sid: &str) -> std::result::Result<(String, SID_NAME_USE), LookupError> {
    let parsed = LocalSid::parse(sid).map_err(|_| LookupError::not_found("sid", sid))?;
    let mut name = vec![0u16; 256];
    let mut domain = vec![0u16; 256];
    loop {
        let mut name_len = name.len() as u32;
        let mut domain_len = domain.len() as u32;
        let mut kind: SID_NAME_USE = 0;
        let ok = unsafe {
            LookupAccountSidW(
                ptr::null(),
                parsed.0,
                name.as_mut_ptr(),
                &mut name_len,
                domain.as_mut_ptr(),
                &mut domain_len,
                &mut kind,
            )
        };
        if ok != 0 {
            let account = from_wide(&name);
            let dom = from_wide(&domain);
            let full = if dom.is_empty() {
                account
            } else {
                format!("{dom}{DOMAIN_SEPARATOR}{account}")
            };
            return Ok((full, kind));
        }
        let code = unsafe { GetLastError() };
        if code != ERROR_INSUFFICIENT_BUFFER {
            return Err(lookup_error("sid", sid, code));
        }
        name.resize(name_len as usize + 1, 0);
        domain.resize(domain_len as usize + 1, 0);
    }
}

/// Resolve an account name to its SID string and account type.
fn account_by_name(name: &str) -> std::result::Result<(String, SID_NAME_USE), LookupError> {
    let w = wide(OsStr::new(name));
    let mut sid = vec![0u8; 68];
    let mut domain = vec![0u16; 256];
    loop {
        let mut sid_len = sid.len() as u32;
        let mut domain_len = domain.len() as u32;
        let mut kind: SID_NAME_USE = 0;
        let ok = unsafe {
            LookupAccountNameW(
                ptr::null(),
                w.as_ptr(),
                sid.as_mut_ptr().cast(),
                &mut sid_len,
                domain.as_mut_ptr(),
                &mut domain_len,
                &mut kind,
            )
        };
        if ok != 0 {
            let s = sid_to_string(sid.as_mut_ptr().cast())
                .map_err(|e| LookupError::Unavailable(e.to_string()))?;
            return Ok((s, kind));
        }
        let code = unsafe { GetLastError() };
        if code != ERROR_INSUFFICIENT_BUFFER {
            return Err(lookup_error("account", name, code));
        }
        sid.resize(sid_len as usize, 0);
        domain.resize(domain_len as usize + 1, 0);
    }
}

impl WindowsIdentityService for Win32Accounts {
    fn user_name_by_sid(&self, sid: &str) -> std::result::Result<String, LookupError> {
        match account_by_sid(sid)? {
            (name, kind) if is_user(kind) => Ok(name),
            _ => Err(LookupError::not_found("user", sid)),
        }
    }

    fn group_name_by_sid(&self, sid: &str) -> std::result::Result<String, LookupError> {
        match account_by_sid(sid)? {
            (name, kind) if is_group(kind) => Ok(name),
            _ => Err(LookupError::not_found("group", sid)),
        }
    }

    fn user_sid_by_name(&self, name: &str) -> std::result::Result<String, LookupError> {
        match account_by_name(name)? {
            (sid, kind) if is_user(kind) => Ok(sid),
            _ => Err(LookupError::not_found("user", name)),
        }
    }

    fn group_sid_by_name(&self, name: &str) -> std::result::Result<String, LookupError> {
        match account_by_name(name)? {
            (sid, kind) if is_group(kind) => Ok(sid),
            _ => Err(LookupError::not_found("group", name)),
        }
    }
}
