//! Clients for the hosted backend: password auth (GoTrue) and object storage.
//!
//! Both are reached over plain REST with the project's `apikey` header.
//! Each collaborator sits behind a trait so handlers can be exercised
//! without a live project.

pub mod auth;
pub mod storage;

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The service answered but refused the call. `message` is passed on verbatim.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("request to {0} failed: {1}")]
    Transport(String, String),
    #[error("unexpected response from {0}: {1}")]
    Decode(String, String),
}

impl RemoteError {
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The error body shapes GoTrue and Storage have used over time.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    error_description: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

/// Turn a non-2xx response into [`RemoteError::Rejected`], keeping the
/// service's own message when it sent one.
pub(crate) async fn rejection(response: reqwest::Response) -> RemoteError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
    let message = body
        .msg
        .or(body.error_description)
        .or(body.message)
        .or(body.error)
        .unwrap_or_else(|| format!("HTTP {status}"));

    RemoteError::Rejected {
        status: status.as_u16(),
        message,
    }
}
