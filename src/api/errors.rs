use thiserror::Error;

use crate::types::errors::{Error, ErrorKind};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("capture failed: {0}")]
    CaptureFailed(String),
    #[error("replay failed: {0}")]
    ReplayFailed(String),
    #[error("invalid path: {0}")]
    InvalidPath(String),
    #[error("undecodable private data: {0}")]
    Decode(String),
    #[error("unsupported: {0}")]
    Unsupported(String),
}

impl ApiError {
    /// Classify an error raised while capturing ownership.
    #[must_use]
    pub fn from_capture(e: Error) -> Self {
        match e.kind {
            ErrorKind::InvalidPath => ApiError::InvalidPath(e.msg),
            ErrorKind::Unsupported => ApiError::Unsupported(e.msg),
            ErrorKind::Io | ErrorKind::Encoding => ApiError::CaptureFailed(e.msg),
        }
    }

    /// Classify an error raised while replaying ownership.
    #[must_use]
    pub fn from_replay(e: Error) -> Self {
        match e.kind {
            ErrorKind::InvalidPath => ApiError::InvalidPath(e.msg),
            ErrorKind::Unsupported => ApiError::Unsupported(e.msg),
            ErrorKind::Encoding => ApiError::Decode(e.msg),
            ErrorKind::Io => ApiError::ReplayFailed(e.msg),
        }
    }

    #[must_use]
    pub const fn id(&self) -> ErrorId {
        match self {
            ApiError::CaptureFailed(_) => ErrorId::E_CAPTURE,
            ApiError::ReplayFailed(_) => ErrorId::E_REPLAY,
            ApiError::InvalidPath(_) => ErrorId::E_PATH,
            ApiError::Decode(_) => ErrorId::E_DECODE,
            ApiError::Unsupported(_) => ErrorId::E_UNSUPPORTED,
        }
    }
}

// Stable identifiers emitted as `error_id` in facts.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorId {
    E_CAPTURE,
    E_REPLAY,
    E_PATH,
    E_DECODE,
    E_UNSUPPORTED,
}

#[must_use]
pub const fn id_str(id: ErrorId) -> &'static str {
    match id {
        ErrorId::E_CAPTURE => "E_CAPTURE",
        ErrorId::E_REPLAY => "E_REPLAY",
        ErrorId::E_PATH => "E_PATH",
        ErrorId::E_DECODE => "E_DECODE",
        ErrorId::E_UNSUPPORTED => "E_UNSUPPORTED",
    }
}
