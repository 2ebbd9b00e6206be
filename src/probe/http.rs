// src/probe/http.rs
// =============================================================================
// Checks whether a URL answers an HTTP HEAD request.
//
// Key functionality:
// - One HEAD request per URL (lightweight, no body download)
// - ANY response counts as reachable, whatever its status code
// - Redirects are not followed: a 3xx is already an answer
// - Transport failures (timeout, DNS, refused, TLS) mean "unreachable"
// - Many URLs can be probed concurrently with a concurrency cap
//
// Rust concepts:
// - async/await: For network I/O
// - Result<T, E>: Input errors propagate, transport errors become `false`
// - Streams: For processing many items concurrently
// =============================================================================

use super::error::{FailureKind, ProbeError};
use super::target::ProbeTarget;
use futures::stream::{self, StreamExt}; // StreamExt gives us .buffer_unordered()
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Knobs for the HTTP client behind a Prober.
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub timeout: Duration,
    pub user_agent: String,
    pub max_concurrency: usize,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        ProbeSettings {
            timeout: Duration::from_secs(10),
            user_agent: format!("cyberapp/{}", env!("CARGO_PKG_VERSION")),
            max_concurrency: 50,
        }
    }
}

/// The outcome of probing one URL, ready to print or serialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeReport {
    /// The URL as the caller gave it
    pub url: String,
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub elapsed_ms: u64,
}

/// Sends HEAD requests through one shared client (connection pooling).
#[derive(Debug, Clone)]
pub struct Prober {
    client: Client,
    settings: ProbeSettings,
}

impl Prober {
    pub fn new(settings: ProbeSettings) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .connect_timeout(settings.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(settings.user_agent.clone())
            .build()?;

        Ok(Prober { client, settings })
    }

    /// Sends one HEAD request. Any response is `Ok` with its status; only a
    /// transport failure is an error.
    #[instrument(skip_all, fields(target = %target))]
    pub async fn check(&self, target: &ProbeTarget) -> Result<StatusCode, ProbeError> {
        let url = target.to_url()?;
        let response = self.client.head(url).send().await?;
        let status = response.status();
        debug!(
            port = target.effective_port(),
            status = status.as_u16(),
            "probe got a response"
        );
        Ok(status)
    }

    /// True if the endpoint answered at all, false if it could not be reached.
    ///
    /// An unusable URL (bad syntax, wrong scheme, no host) is an `Err`, never
    /// `Ok(false)`.
    pub async fn check_url(&self, url: &str) -> Result<bool, ProbeError> {
        let target = ProbeTarget::parse(url)?;
        match self.check(&target).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_transport() => {
                debug!(url, kind = ?e.kind(), error = %e, "endpoint unreachable");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Probes a URL and reports everything that was learned. Never fails:
    /// input errors show up as an unreachable report with a failure kind.
    pub async fn probe(&self, url: &str) -> ProbeReport {
        let started = Instant::now();

        let outcome = match ProbeTarget::parse(url) {
            Ok(target) => self.check(&target).await,
            Err(e) => Err(e),
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(status) => ProbeReport {
                url: url.to_string(),
                reachable: true,
                status_code: Some(status.as_u16()),
                failure: None,
                message: Some(format!("HTTP {}", status.as_u16())),
                elapsed_ms,
            },
            Err(e) => ProbeReport {
                url: url.to_string(),
                reachable: false,
                status_code: None,
                failure: Some(e.kind()),
                message: Some(e.to_string()),
                elapsed_ms,
            },
        }
    }

    /// Probes every URL concurrently, returning reports in input order.
    pub async fn probe_all(&self, urls: Vec<String>) -> Vec<ProbeReport> {
        let limit = self.settings.max_concurrency.max(1);

        let futures = urls.into_iter().enumerate().map(|(index, url)| async move {
            let report = self.probe(&url).await;
            (index, report)
        });

        // buffer_unordered yields in completion order
        let mut indexed: Vec<(usize, ProbeReport)> =
            stream::iter(futures).buffer_unordered(limit).collect().await;
        indexed.sort_by_key(|(index, _)| *index);
        indexed.into_iter().map(|(_, report)| report).collect()
    }
}
