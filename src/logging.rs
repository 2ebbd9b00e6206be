// src/logging.rs
// =============================================================================
// Sets up tracing output.
//
// Logs go to stderr so that stdout carries only results (tables or JSON).
// RUST_LOG, when set, overrides the level from the CLI or config file.
// =============================================================================

use tracing_subscriber::EnvFilter;

pub fn init_logging(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
