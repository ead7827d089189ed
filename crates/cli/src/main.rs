//! httpcheck CLI - Deployment HTTP GET health check
//!
//! Exit codes: 0 all good, 1 at least one alert, 2 configuration or transport failure.

mod report;
mod settings;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use httpcheck_core::application::{ProbeMode, ProbeService, ProbeTask};
use httpcheck_core::domain::ProbeOutcome;
use httpcheck_infra_system::{ReqwestTransport, XPathExtractor};
use settings::{OutputFormat, ProbeArgs, Settings};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "httpcheck")]
#[command(about = "Deployment HTTP GET health check", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dry run: build the uri that would be requested
    Verify(ProbeArgs),

    /// GET the uri and classify the response
    Execute(ProbeArgs),
}

fn init_tracing() {
    let log_format = std::env::var("HTTPCHECK_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("httpcheck=info"));

    // stdout carries the report, logs go to stderr
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}

async fn run(command: Commands) -> Result<ProbeOutcome> {
    let (mode, args) = match command {
        Commands::Verify(args) => (ProbeMode::Verify, args),
        Commands::Execute(args) => (ProbeMode::Execute, args),
    };

    let settings = Settings::resolve(args)?;
    let config = settings.probe_config()?;

    let transport = match settings.timeout_secs {
        Some(secs) => ReqwestTransport::with_timeout(Duration::from_secs(secs))
            .context("Failed to create HTTP client")?,
        None => ReqwestTransport::new(),
    };
    let service = ProbeService::new(Arc::new(transport), Arc::new(XPathExtractor::new()));

    let outcome = service.run(config.clone(), mode).await?;

    let rendered = match settings.format() {
        OutputFormat::Table => report::render_table(ProbeTask::NAME, mode, &outcome),
        OutputFormat::Json => report::render_json(ProbeTask::NAME, mode, &config, &outcome)?,
    };
    println!("{}", rendered);

    Ok(outcome)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    info!("httpcheck v{}", VERSION);

    match run(cli.command).await {
        Ok(outcome) if outcome.has_alerts() => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::from(2)
        }
    }
}
