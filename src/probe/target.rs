// src/probe/target.rs
// =============================================================================
// Parses a URL string into the pieces a HEAD probe needs:
// scheme, host, optional port, and the request path.
//
// Parsing never touches the caller's string; it borrows a &str and builds
// a fresh ProbeTarget. Deriving the http/https variant of a target also
// returns a new value.
//
// Rust concepts:
// - FromStr: lets callers write "https://example.com".parse::<ProbeTarget>()
// - Display: canonical string form of the target
// =============================================================================

use super::error::ProbeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A URL reduced to what a reachability probe connects to and requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    pub scheme: Scheme,
    pub host: String,
    /// Only set when it differs from the scheme's default port
    pub port: Option<u16>,
    /// Request path, always starting with '/', query string included
    pub path: String,
}

impl ProbeTarget {
    pub fn parse(input: &str) -> Result<Self, ProbeError> {
        let trimmed = input.trim();

        let url = Url::parse(trimmed).map_err(|e| match e {
            url::ParseError::EmptyHost => ProbeError::MissingHost(trimmed.to_string()),
            other => ProbeError::InvalidUrl {
                url: trimmed.to_string(),
                reason: other.to_string(),
            },
        })?;

        let scheme = match url.scheme() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            other => return Err(ProbeError::UnsupportedScheme(other.to_string())),
        };

        let host = match url.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => return Err(ProbeError::MissingHost(trimmed.to_string())),
        };

        // Url already drops a port equal to the scheme default
        let port = url.port();

        let mut path = if url.path().is_empty() {
            "/".to_string()
        } else {
            url.path().to_string()
        };
        if let Some(query) = url.query() {
            path.push('?');
            path.push_str(query);
        }

        Ok(ProbeTarget {
            scheme,
            host,
            port,
            path,
        })
    }

    /// `host` or `host:port` when a non-default port was given.
    pub fn authority(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        }
    }

    /// Port the connection will actually use.
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.scheme.default_port())
    }

    /// Same host and path under another scheme. An explicit port is dropped
    /// since it belonged to the old scheme.
    pub fn with_scheme(&self, scheme: Scheme) -> ProbeTarget {
        if scheme == self.scheme {
            return self.clone();
        }
        ProbeTarget {
            scheme,
            host: self.host.clone(),
            port: None,
            path: self.path.clone(),
        }
    }

    pub fn to_url(&self) -> Result<Url, ProbeError> {
        let text = self.to_string();
        Url::parse(&text).map_err(|e| ProbeError::InvalidUrl {
            url: text,
            reason: e.to_string(),
        })
    }
}

impl FromStr for ProbeTarget {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProbeTarget::parse(s)
    }
}

impl fmt::Display for ProbeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}{}", self.scheme, self.authority(), self.path)
    }
}
