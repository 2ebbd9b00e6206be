// src/probe/mod.rs
// =============================================================================
// URL reachability probing.
//
// Submodules:
// - target: Parses a URL into scheme, host, port and path
// - error: Failure taxonomy (input errors vs transport errors)
// - http: Sends HEAD requests and reports whether anything answered
// - advice: Compares the https and http variants of a URL
// =============================================================================

mod advice;
mod error;
mod http;
mod target;

pub use advice::{advise, Verdict};
pub use error::{FailureKind, ProbeError};
pub use http::{ProbeReport, ProbeSettings, Prober};
pub use target::ProbeTarget;

#[cfg(test)]
pub(crate) use http::test_support;
