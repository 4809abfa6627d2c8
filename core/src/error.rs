//! Error types for the protobuf HTTP client.
//!
//! # Design
//! Only failures that leave the caller without a usable answer are errors.
//! A non-success status is an ordinary outcome and comes back as data
//! (`Outcome::Rejected` or the raw `HttpResponse`), never through this type.

use thiserror::Error;

use crate::http::HttpMethod;

/// Boxed error produced by a `Transport`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by `ProtoClient` operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response was received. `source` is the transport's own error,
    /// e.g. a `ureq::Error` for connection refused or a timeout.
    #[error("{method} {url}: transport failed: {source}")]
    Transport {
        method: HttpMethod,
        url: String,
        #[source]
        source: BoxError,
    },

    /// The response status was accepted but the body is not a valid
    /// encoding of the requested message type.
    #[error("{method} {url}: body is not a valid {message}: {source}")]
    Decode {
        method: HttpMethod,
        url: String,
        message: &'static str,
        #[source]
        source: prost::DecodeError,
    },
}

impl ClientError {
    pub fn method(&self) -> HttpMethod {
        match self {
            ClientError::Transport { method, .. } | ClientError::Decode { method, .. } => *method,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            ClientError::Transport { url, .. } | ClientError::Decode { url, .. } => url,
        }
    }
}
