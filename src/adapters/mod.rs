pub mod identity;
pub mod ownership;
#[cfg(windows)]
#[allow(unsafe_code)]
pub mod win32;

pub use identity::*;
#[cfg(unix)]
pub use identity::system::SystemUserDb;
pub use ownership::fs::{FsOwnershipOracle, LchownWriter};
pub use ownership::*;
#[cfg(windows)]
pub use win32::{Win32Accounts, Win32Security};
