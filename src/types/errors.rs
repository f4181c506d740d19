//! Error types used across ownsync.
use thiserror::Error;

/// High-level error categories for type-level operations and adapters.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("invalid path")]
    InvalidPath,
    #[error("io error")]
    Io,
    #[error("encoding error")]
    Encoding,
    #[error("unsupported")]
    Unsupported,
}

/// Structured error with a kind and human message.
#[derive(Debug, Error)]
#[error("{kind:?}: {msg}")]
pub struct Error {
    pub kind: ErrorKind,
    pub msg: String,
}

impl Error {
    pub(crate) fn io(msg: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Io,
            msg: msg.into(),
        }
    }

    pub(crate) fn encoding(msg: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Encoding,
            msg: msg.into(),
        }
    }
}

/// Convenient alias for results returning a `types::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a single identity-service lookup.
///
/// Cloneable so the name cache can hand the same error back to every caller
/// while the negative entry is live.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no {namespace} entry for {key}")]
    NotFound { namespace: &'static str, key: String },
    #[error("identity service unavailable: {0}")]
    Unavailable(String),
}

impl LookupError {
    pub fn not_found(namespace: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            namespace,
            key: key.to_string(),
        }
    }
}
