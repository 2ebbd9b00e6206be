// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
// Global flags (config file, log level) come before the subcommand.
// Flags that also exist in the config file override it when given.
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cyberapp",
    version,
    about = "Serve the questions page and check whether URLs answer over HTTP/HTTPS",
    long_about = "cyberapp serves a small page listing the latest questions and can probe \
                  URLs with HEAD requests, either from the command line or through its \
                  /probe endpoint."
)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level or filter directive (e.g. "debug", "cyberapp=trace").
    /// RUST_LOG takes precedence when set.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a HEAD request to each URL and report whether it answered
    ///
    /// Example: cyberapp probe https://httpbin.org http://httpbin.org
    Probe {
        /// One or more URLs (http:// or https://)
        #[arg(required = true)]
        urls: Vec<String>,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,

        /// Per-request timeout in seconds (overrides the config file)
        #[arg(long)]
        timeout_secs: Option<u64>,
    },

    /// Check whether a site loads over https, http, or both
    ///
    /// Example: cyberapp advise http://httpbin.org
    Advise {
        url: String,

        /// Output the advice as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the web server
    Serve {
        /// Address to listen on (overrides the config file)
        #[arg(long)]
        bind: Option<String>,

        /// JSON file with the questions (overrides the config file)
        #[arg(long)]
        questions: Option<PathBuf>,

        /// Probe this URL once at startup and log the advice
        #[arg(long)]
        startup_probe: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_probe_with_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "cyberapp",
            "probe",
            "http://a.example",
            "https://b.example",
            "--json",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command {
            Commands::Probe { urls, json, timeout_secs } => {
                assert_eq!(urls.len(), 2);
                assert!(json);
                assert_eq!(timeout_secs, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_probe_requires_a_url() {
        assert!(Cli::try_parse_from(["cyberapp", "probe"]).is_err());
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from([
            "cyberapp",
            "--config",
            "cyberapp.toml",
            "serve",
            "--bind",
            "0.0.0.0:9000",
            "--startup-probe",
            "http://httpbin.org",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("cyberapp.toml")));
        match cli.command {
            Commands::Serve { bind, questions, startup_probe } => {
                assert_eq!(bind.as_deref(), Some("0.0.0.0:9000"));
                assert!(questions.is_none());
                assert_eq!(startup_probe.as_deref(), Some("http://httpbin.org"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
