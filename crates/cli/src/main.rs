//! nbprobe - token-authenticated probe runner for notebook server REST APIs
//!
//! Reads the server's access token, GETs a fixed list of API routes, saves
//! every JSON response to its own file and prints a byte-range sample.

mod credentials;
mod endpoint;
mod logging;
mod report;
mod settings;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nbprobe_core::application::ProbeRunner;
use nbprobe_core::ProbeConfig;
use nbprobe_infra_http::NotebookHttpClient;
use nbprobe_infra_system::JsonFileSink;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::endpoint::Endpoint;
use crate::settings::Overrides;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "nbprobe")]
#[command(about = "Probe a notebook server's REST API and save JSON samples", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Settings file (default: ./nbprobe.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Access token (takes precedence over the URL and the token file)
    #[arg(long, env = "NBPROBE_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    overrides: Overrides,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every probe, then the byte-range probe (default)
    Run,

    /// Show the configured routes and their output files
    Routes,

    /// Run only the byte-range probe
    Range,
}

struct Session {
    config: ProbeConfig,
    runner: ProbeRunner,
}

/// Wire adapters into a runner; fails before any request if the token is missing
fn connect(token: Option<&str>, config: ProbeConfig) -> Result<Session> {
    let endpoint = Endpoint::parse(&config.base_url)?;
    let token = credentials::resolve(token, &endpoint, &config.token_file)?;

    info!(
        base_url = %endpoint.base_url,
        auth = %config.auth,
        output_dir = %config.output_dir.display(),
        "Connecting to notebook server"
    );

    let transport = NotebookHttpClient::new(endpoint.base_url.as_str(), token, config.auth)
        .context("Failed to create HTTP client")?;
    let sink = JsonFileSink::new(&config.output_dir);
    let runner = ProbeRunner::new(Arc::new(transport), Arc::new(sink));

    Ok(Session { config, runner })
}

async fn run_range(session: &Session) -> Result<()> {
    if let Some(probe) = &session.config.range_probe {
        let sample = session
            .runner
            .range_probe(probe)
            .await
            .context("Range probe aborted: is the server running?")?;
        report::print_range_sample(probe, &sample);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose).context("Failed to initialize logging")?;
    info!("nbprobe v{} starting...", VERSION);

    let config = settings::load(cli.config.as_deref(), &cli.overrides)?;
    execute(&cli, config).await
}

async fn execute(cli: &Cli, config: ProbeConfig) -> Result<()> {
    match cli.command.as_ref().unwrap_or(&Commands::Run) {
        Commands::Run => {
            let session = connect(cli.token.as_deref(), config)?;
            let report = session
                .runner
                .run(&session.config.routes)
                .await
                .context("Probe run aborted: is the server running?")?;

            report::print_report(&report);
            run_range(&session).await?;
        }

        Commands::Routes => {
            println!("{}", report::route_table(&config.routes));
            println!();
            println!("  Output dir: {}", config.output_dir.display());
        }

        Commands::Range => {
            let session = connect(cli.token.as_deref(), config)?;
            run_range(&session).await?;
        }
    }

    Ok(())
}
