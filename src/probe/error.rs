// src/probe/error.rs
// =============================================================================
// Everything that can go wrong while probing a URL.
//
// Two groups of failures:
// - Input errors: the URL itself is unusable (bad syntax, wrong scheme,
//   no host). These are caller bugs and always propagate.
// - Transport errors: the URL was fine but nothing answered (timeout, DNS,
//   refused connection, TLS handshake). These mean "unreachable".
//
// Rust concepts:
// - thiserror: derives std::error::Error and Display from attributes
// - Error source chains: walking .source() to find the root cause
// =============================================================================

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unsupported scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),

    #[error("URL '{0}' has no host")]
    MissingHost(String),

    #[error("request timed out")]
    Timeout,

    #[error("could not resolve hostname: {0}")]
    Dns(String),

    #[error("connection refused")]
    ConnectionRefused,

    #[error("TLS handshake failed: {0}")]
    Tls(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),
}

/// Payload-free classification of a probe failure, as it appears in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    InvalidUrl,
    UnsupportedScheme,
    MissingHost,
    Timeout,
    Dns,
    ConnectionRefused,
    Tls,
    Connect,
    Request,
}

impl FailureKind {
    /// The URL itself was unusable, as opposed to the endpoint not answering.
    pub fn is_input_error(self) -> bool {
        matches!(
            self,
            FailureKind::InvalidUrl | FailureKind::UnsupportedScheme | FailureKind::MissingHost
        )
    }
}

impl ProbeError {
    /// True when the URL was valid but the endpoint could not be reached.
    pub fn is_transport(&self) -> bool {
        !self.kind().is_input_error()
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ProbeError::InvalidUrl { .. } => FailureKind::InvalidUrl,
            ProbeError::UnsupportedScheme(_) => FailureKind::UnsupportedScheme,
            ProbeError::MissingHost(_) => FailureKind::MissingHost,
            ProbeError::Timeout => FailureKind::Timeout,
            ProbeError::Dns(_) => FailureKind::Dns,
            ProbeError::ConnectionRefused => FailureKind::ConnectionRefused,
            ProbeError::Tls(_) => FailureKind::Tls,
            ProbeError::Connect(_) => FailureKind::Connect,
            ProbeError::Request(_) => FailureKind::Request,
        }
    }
}

impl From<reqwest::Error> for ProbeError {
    // reqwest's own message embeds the request URL, so only its sources are
    // inspected. io::ErrorKind decides where it can; text is the fallback for
    // resolver and TLS failures, which have no typed kind at this level.
    fn from(error: reqwest::Error) -> Self {
        let message = error.to_string();

        if error.is_timeout() {
            return ProbeError::Timeout;
        }

        match root_io_kind(&error) {
            Some(std::io::ErrorKind::ConnectionRefused) => return ProbeError::ConnectionRefused,
            Some(std::io::ErrorKind::TimedOut) => return ProbeError::Timeout,
            _ => {}
        }

        let causes = source_text(&error);

        if causes.contains("connection refused") {
            ProbeError::ConnectionRefused
        } else if causes.contains("dns error")
            || causes.contains("failed to lookup")
            || causes.contains("name or service not known")
        {
            ProbeError::Dns(message)
        } else if causes.contains("certificate")
            || causes.contains("tls")
            || causes.contains("handshake")
            || causes.contains("corrupt message")
        {
            ProbeError::Tls(message)
        } else if error.is_connect() {
            ProbeError::Connect(message)
        } else {
            ProbeError::Request(message)
        }
    }
}

// Lowercased text of the source chain, excluding the top-level error
fn source_text(error: &(dyn StdError + 'static)) -> String {
    let mut text = String::new();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str(&cause.to_string().to_lowercase());
        text.push('\n');
        source = cause.source();
    }
    text
}

fn root_io_kind(error: &(dyn StdError + 'static)) -> Option<std::io::ErrorKind> {
    let mut source = error.source();
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            return Some(io.kind());
        }
        source = cause.source();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_not_transport() {
        assert!(!ProbeError::MissingHost("http://".to_string()).is_transport());
        assert!(!ProbeError::UnsupportedScheme("ftp".to_string()).is_transport());
        assert!(ProbeError::Timeout.is_transport());
        assert!(ProbeError::ConnectionRefused.is_transport());
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ProbeError::ConnectionRefused.kind()).unwrap();
        assert_eq!(json, "\"connection_refused\"");
    }
}
