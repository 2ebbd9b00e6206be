// src/probe/advice.rs
// =============================================================================
// Answers "should this site be loaded over https, http, or both?"
//
// How it works:
// 1. Parse the URL once
// 2. Build its https and http variants (same host and path)
// 3. Probe both at the same time
// 4. Turn the two booleans into a verdict and human-readable lines
// =============================================================================

use super::error::ProbeError;
use super::http::Prober;
use super::target::{ProbeTarget, Scheme};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    HttpsAndHttp,
    HttpsOnly,
    HttpOnly,
    Unreachable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemeAdvice {
    pub https_url: String,
    pub http_url: String,
    pub https: bool,
    pub http: bool,
}

impl SchemeAdvice {
    pub fn verdict(&self) -> Verdict {
        match (self.https, self.http) {
            (true, true) => Verdict::HttpsAndHttp,
            (true, false) => Verdict::HttpsOnly,
            (false, true) => Verdict::HttpOnly,
            (false, false) => Verdict::Unreachable,
        }
    }

    pub fn messages(&self) -> Vec<&'static str> {
        let mut lines = Vec::new();
        if self.https {
            lines.push("Nice, you can load it with https");
        } else if self.http {
            lines.push("https didn't load, but you can use http");
        }
        if self.http {
            lines.push("Nice, it does load with http too");
        }
        if lines.is_empty() {
            lines.push("Neither https nor http loaded");
        }
        lines
    }
}

/// Probes the https and http variants of `url` concurrently.
pub async fn advise(prober: &Prober, url: &str) -> Result<SchemeAdvice, ProbeError> {
    let target = ProbeTarget::parse(url)?;
    // An explicit port is not carried over to the other scheme
    let https_target = target.with_scheme(Scheme::Https);
    let http_target = target.with_scheme(Scheme::Http);

    let https_url = https_target.to_string();
    let http_url = http_target.to_string();

    let (https, http) = tokio::join!(prober.check_url(&https_url), prober.check_url(&http_url));

    let advice = SchemeAdvice {
        https: https?,
        http: http?,
        https_url,
        http_url,
    };

    info!(url, verdict = ?advice.verdict(), "scheme advice ready");
    Ok(advice)
}
