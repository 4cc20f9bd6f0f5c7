use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Printable description of an outgoing request with secrets redacted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestInfo {
    pub method: &'static str,
    pub url: String,
}

impl RequestInfo {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: "GET",
            url: url.into(),
        }
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: "POST",
            url: url.into(),
        }
    }
}

impl fmt::Display for RequestInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// A failed provider call. Every variant carries the request it belongs to.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered with a non-success status.
    #[error("provider returned status {status}")]
    Status {
        status: u16,
        headers: Vec<(String, String)>,
        body: String,
        request: RequestInfo,
    },

    /// The provider answered but the body could not be decoded.
    #[error("failed to decode provider response: {message}")]
    Decode {
        status: u16,
        body: String,
        message: String,
        request: RequestInfo,
    },

    /// The request went out but no response came back.
    #[error("no response from provider: {message}")]
    NoResponse {
        message: String,
        request: RequestInfo,
    },

    /// The request could not be built or sent.
    #[error("failed to set up request: {message}")]
    Request {
        message: String,
        request: RequestInfo,
    },

    /// The provider flagged the lookup as having no result.
    #[error("{message}")]
    NotFound {
        message: String,
        request: RequestInfo,
    },
}

impl ProviderError {
    pub fn request(&self) -> &RequestInfo {
        match self {
            ProviderError::Status { request, .. }
            | ProviderError::Decode { request, .. }
            | ProviderError::NoResponse { request, .. }
            | ProviderError::Request { request, .. }
            | ProviderError::NotFound { request, .. } => request,
        }
    }

    pub(crate) fn missing_credential(variable: &str, request: RequestInfo) -> Self {
        ProviderError::Request {
            message: format!("{variable} is not set; add it to the environment or .env"),
            request,
        }
    }

    /// Split a transport failure into setup errors and unanswered requests.
    /// The URL is stripped from the message; `request` carries the redacted one.
    pub(crate) fn from_transport(err: reqwest::Error, request: RequestInfo) -> Self {
        let err = err.without_url();
        if err.is_builder() {
            ProviderError::Request {
                message: err.to_string(),
                request,
            }
        } else {
            ProviderError::NoResponse {
                message: transport_message(&err),
                request,
            }
        }
    }
}

fn transport_message(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        return format!("request timed out: {err}");
    }
    if err.is_connect() {
        return format!("connection failed: {err}");
    }
    err.to_string()
}

/// Failures while reading the replay file.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read replay file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("replay file {} holds no command", path.display())]
    Empty { path: PathBuf },

    #[error("replay file {} names `{command}`, which is not a lookup command", path.display())]
    NotALookup { path: PathBuf, command: String },
}
