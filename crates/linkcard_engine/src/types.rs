use std::fmt;
use std::path::PathBuf;

use crate::clipboard::ClipboardError;

pub type RequestId = u64;
pub type ImageHandle = u64;
pub type CopyId = u64;

/// JSON body of `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub url: String,
    pub style: String,
    pub custom_title: String,
    pub custom_description: String,
}

/// A successful generator answer before it is placed in the image store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResponse {
    pub bytes: bytes::Bytes,
    pub content_type: String,
    /// Decoded `X-Page-Title`; `None` when absent or not valid base64 UTF-8.
    pub page_title: Option<String>,
    pub page_description: Option<String>,
}

/// A generated card held by the engine and addressed by `handle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub handle: ImageHandle,
    pub content_type: String,
    pub byte_len: u64,
    pub page_title: Option<String>,
    pub page_description: Option<String>,
}

#[derive(Debug)]
pub enum EngineEvent {
    GenerationCompleted {
        request_id: RequestId,
        result: Result<GeneratedImage, GenerateError>,
    },
    CopyCompleted {
        copy_id: CopyId,
        result: Result<(), ClipboardError>,
    },
    /// The copy-status reset scheduled for `copy_id` fired without being replaced.
    CopyResetDue { copy_id: CopyId },
    SaveCompleted {
        handle: ImageHandle,
        result: Result<PathBuf, String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct GenerateError {
    pub kind: FailureKind,
    pub message: String,
}

impl GenerateError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    /// Non-2xx with a structured `{error}` payload; `error` is `None` when
    /// the payload could not be read or carried no message.
    Server { status: u16, error: Option<String> },
    /// Non-2xx with an opaque body.
    HttpStatus(u16),
    WrongContentType { content_type: Option<String> },
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
    /// The generation task itself died before producing a result.
    Internal,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid generator endpoint"),
            FailureKind::Server { status, .. } => write!(f, "server error (status {status})"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::WrongContentType { content_type } => match content_type {
                Some(ct) => write!(f, "wrong content type {ct}"),
                None => write!(f, "missing content type"),
            },
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Internal => write!(f, "internal engine failure"),
        }
    }
}
