// src/main.rs
// =============================================================================
// This is the entry point of our application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load the config file (if any) and apply flag overrides
// 3. Start logging
// 4. Dispatch to the appropriate subcommand handler
// 5. Exit with proper code (0 = all reachable, 1 = something unreachable,
//    2 = error)
// =============================================================================

mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - TOML config + defaults
mod logging; // src/logging.rs - tracing setup
mod probe; // src/probe/ - URL reachability probing
mod questions; // src/questions/ - question data access
mod web; // src/web/ - HTTP server

use anyhow::{Context, Result};
use clap::Parser; // Parser trait enables the parse() method
use cli::{Cli, Commands};
use config::AppConfig;
use probe::{advise, ProbeReport, Prober};
use questions::InMemoryQuestions;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = everything probed was reachable (or the server exited cleanly)
//   Ok(1) = at least one URL was unreachable
//   Ok(2) = at least one URL was unusable
//   Err   = unexpected error
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    logging::init_logging(&config.log_level);

    match cli.command {
        Commands::Probe { urls, json, timeout_secs } => {
            if let Some(secs) = timeout_secs {
                config.probe.timeout_secs = secs;
            }
            config.validate()?;
            handle_probe(&config, urls, json).await
        }
        Commands::Advise { url, json } => {
            handle_advise(&config, &url, json).await
        }
        Commands::Serve { bind, questions, startup_probe } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            if let Some(path) = questions {
                config.questions.file = Some(path);
            }
            config.validate()?;
            handle_serve(&config, startup_probe).await
        }
    }
}

fn build_prober(config: &AppConfig) -> Result<Prober> {
    Prober::new(config.probe_settings()).context("building HTTP client")
}

// Handles the 'probe' subcommand
async fn handle_probe(config: &AppConfig, urls: Vec<String>, json: bool) -> Result<i32> {
    let prober = build_prober(config)?;

    if !json {
        println!("🌐 Probing {} URL(s)...\n", urls.len());
    }

    let reports = prober.probe_all(urls).await;

    print_results(&reports, json)?;

    let unusable = reports
        .iter()
        .any(|r| r.failure.map_or(false, |kind| kind.is_input_error()));
    let unreachable = reports.iter().any(|r| !r.reachable);

    Ok(if unusable {
        2
    } else if unreachable {
        1
    } else {
        0
    })
}

// Handles the 'advise' subcommand
async fn handle_advise(config: &AppConfig, url: &str, json: bool) -> Result<i32> {
    let prober = build_prober(config)?;

    let advice = advise(&prober, url)
        .await
        .with_context(|| format!("checking schemes for {}", url))?;

    if json {
        let output = serde_json::json!({
            "https_url": advice.https_url,
            "http_url": advice.http_url,
            "https": advice.https,
            "http": advice.http,
            "verdict": advice.verdict(),
            "messages": advice.messages(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for line in advice.messages() {
            println!("{}", line);
        }
    }

    Ok(if advice.https || advice.http { 0 } else { 1 })
}

// Handles the 'serve' subcommand
async fn handle_serve(config: &AppConfig, startup_probe: Option<String>) -> Result<i32> {
    let prober = Arc::new(build_prober(config)?);

    let questions = match &config.questions.file {
        Some(path) => InMemoryQuestions::from_json_file(path)?,
        None => {
            tracing::info!("no questions file configured");
            InMemoryQuestions::default()
        }
    };

    if questions.is_empty() {
        tracing::warn!("question list is empty");
    } else {
        tracing::info!(count = questions.len(), "questions ready");
    }

    if let Some(url) = startup_probe {
        run_startup_probe(&prober, &url).await;
    }

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    let state = web::AppState {
        prober,
        questions: Arc::new(questions),
        latest_limit: config.questions.latest_limit,
    };

    web::serve(listener, state).await.context("serving HTTP")?;
    Ok(0)
}

// Failures here are logged and never stop the server from starting
async fn run_startup_probe(prober: &Prober, url: &str) {
    match advise(prober, url).await {
        Ok(advice) => {
            for line in advice.messages() {
                tracing::info!(url, "{}", line);
            }
        }
        Err(e) => tracing::warn!(url, error = %e, "startup probe skipped"),
    }
}

// Prints the results either as a table or JSON
fn print_results(reports: &[ProbeReport], json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(reports)?;
        println!("{}", json_output);
    } else {
        print_table(reports);
    }
    Ok(())
}

// Prints results as a human-readable table in the terminal
fn print_table(reports: &[ProbeReport]) {
    println!("{:<60} {:<15} {:<10} {:<30}", "URL", "STATUS", "TIME", "MESSAGE");
    println!("{}", "=".repeat(115));

    for report in reports {
        let message = report.message.as_deref().unwrap_or("");

        // Truncate URL if too long for display
        let url_display = if report.url.chars().count() > 57 {
            let head: String = report.url.chars().take(57).collect();
            format!("{}...", head)
        } else {
            report.url.clone()
        };

        let elapsed = format_elapsed(Duration::from_millis(report.elapsed_ms));

        println!(
            "{:<60} {:<15} {:<10} {:<30}",
            url_display,
            format_status(report),
            elapsed,
            message
        );
    }

    println!();

    let reachable = reports.iter().filter(|r| r.reachable).count();

    println!("📊 Summary:");
    println!("   ✅ Reachable: {}", reachable);
    println!("   ❌ Unreachable: {}", reports.len() - reachable);
    println!("   📋 Total: {}", reports.len());
}

fn format_status(report: &ProbeReport) -> String {
    use probe::FailureKind;

    match (report.reachable, report.failure) {
        (true, _) => "✅ REACHABLE".to_string(),
        (false, Some(FailureKind::Timeout)) => "⏱️  TIMEOUT".to_string(),
        (false, Some(FailureKind::Dns)) => "🌐 DNS ERROR".to_string(),
        (false, Some(FailureKind::Tls)) => "🔒 TLS ERROR".to_string(),
        (false, Some(FailureKind::ConnectionRefused)) => "🚫 REFUSED".to_string(),
        (false, Some(kind)) if kind.is_input_error() => "⚠️  BAD URL".to_string(),
        (false, _) => "❌ UNREACHABLE".to_string(),
    }
}

fn format_elapsed(elapsed: Duration) -> String {
    if elapsed.as_secs() >= 1 {
        format!("{:.1}s", elapsed.as_secs_f64())
    } else {
        format!("{}ms", elapsed.as_millis())
    }
}
