//! Categorised failures of a backend call.
//!
//! Every request in this crate ends in either a value or an [`ApiError`];
//! nothing panics or escapes as an unhandled error. Callers turn the error
//! into a toast with [`ApiError::user_message`].

use reqwest::StatusCode;
use thiserror::Error;

/// Coarse category, used by the UI to pick the message and retry affordance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The server answered with a non-2xx status.
    ServerError,
    /// The request left but no answer came back.
    NoResponse,
    /// The request could not be built, or the answer could not be read.
    ClientError,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("server responded {status}: {message}")]
    Server { status: u16, message: String },
    #[error("no response from server: {0}")]
    NoResponse(String),
    #[error("request failed: {0}")]
    Client(String),
}

impl ApiError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Server { .. } => ErrorCategory::ServerError,
            ApiError::NoResponse(_) => ErrorCategory::NoResponse,
            ApiError::Client(_) => ErrorCategory::ClientError,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            ApiError::Server { message, .. } => message,
            ApiError::NoResponse(detail) | ApiError::Client(detail) => detail,
        }
    }

    /// HTTP status for server errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the backend rejected the token.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED.as_u16())
    }

    /// Text shown to the user in a toast.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message, .. } => message.clone(),
            ApiError::NoResponse(_) => {
                "Tidak dapat terhubung ke server. Periksa koneksi Anda lalu coba lagi.".to_string()
            }
            ApiError::Client(_) => "Terjadi kesalahan pada aplikasi. Silakan coba lagi.".to_string(),
        }
    }

    /// Map a transport-level failure from `reqwest`.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ApiError::Client(err.to_string())
        } else if err.is_decode() {
            ApiError::Client(format!("invalid response body: {err}"))
        } else {
            ApiError::NoResponse(err.to_string())
        }
    }

    /// Build a server error from a non-2xx status and its raw body.
    pub(crate) fn from_response(status: StatusCode, body: &str) -> Self {
        let message = server_message(body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
        });
        ApiError::Server {
            status: status.as_u16(),
            message,
        }
    }
}

/// The `error` or `message` field of a JSON error body.
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
