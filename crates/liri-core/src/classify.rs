//! Shared rendering of failed provider calls.

use std::fmt;

use crate::error::ProviderError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The provider answered with an error status or an unreadable body.
    ServerResponded,
    /// The request went out and nothing came back.
    NoResponse,
    /// The request never left.
    RequestSetup,
    /// The provider flagged the lookup as a miss.
    NotFound,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::ServerResponded => "server_responded",
            ErrorCategory::NoResponse => "no_response",
            ErrorCategory::RequestSetup => "request_setup",
            ErrorCategory::NotFound => "not_found",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn category(err: &ProviderError) -> ErrorCategory {
    match err {
        ProviderError::Status { .. } | ProviderError::Decode { .. } => {
            ErrorCategory::ServerResponded
        }
        ProviderError::NoResponse { .. } => ErrorCategory::NoResponse,
        ProviderError::Request { .. } => ErrorCategory::RequestSetup,
        ProviderError::NotFound { .. } => ErrorCategory::NotFound,
    }
}

/// Render a failure as console lines and emit a matching diagnostic.
pub fn report(err: &ProviderError) -> Vec<String> {
    let category = category(err);
    tracing::warn!(
        category = %category,
        request = %err.request(),
        error = %err,
        "provider call failed"
    );

    let mut lines = Vec::new();
    match err {
        ProviderError::Status {
            status,
            headers,
            body,
            ..
        } => {
            lines.push(rule("Data"));
            lines.extend(body_lines(body));
            lines.push(rule("Status"));
            lines.push(status.to_string());
            lines.push(rule("Headers"));
            lines.extend(headers.iter().map(|(name, value)| format!("{name}: {value}")));
        }
        ProviderError::Decode {
            status,
            body,
            message,
            ..
        } => {
            lines.push(rule("Data"));
            lines.extend(body_lines(body));
            lines.push(rule("Status"));
            lines.push(status.to_string());
            lines.push(format!("Error {message}"));
        }
        ProviderError::NoResponse { message, .. } => {
            lines.push(rule("No Response"));
            lines.push(message.clone());
        }
        ProviderError::Request { message, .. } => {
            lines.push(format!("Error {message}"));
        }
        ProviderError::NotFound { message, .. } => {
            lines.push(message.clone());
        }
    }
    lines.push(format!("Request: {}", err.request()));
    lines
}

fn rule(label: &str) -> String {
    format!("---------------{label}---------------")
}

fn body_lines(body: &str) -> Vec<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return vec!["(empty body)".to_string()];
    }
    trimmed.lines().map(str::to_string).collect()
}
