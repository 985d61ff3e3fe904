//! Earthquake report server entry point.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use quake_feed::api::{create_router, AppState};
use quake_feed::config::Config;
use quake_feed::metrics;
use quake_feed::quake::{EarthquakeService, FeedSource};
use quake_feed::utils::shutdown_signal;

/// Earthquake report server.
#[derive(Parser, Debug)]
#[command(name = "quake-feed")]
#[command(about = "Serve recent CWA earthquake reports to a browser client")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Load the feed once and print it as JSON.
    Fetch {
        /// API token (overrides API_TOKEN).
        #[arg(long)]
        token: Option<String>,

        /// Maximum number of reports (overrides the source's limit).
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging; configuration errors are reported once logging is up
    let directives = Config::load()
        .map(|config| config.log_filter(args.verbose))
        .unwrap_or_else(|_| Config::default().log_filter(args.verbose));
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::Fetch { token, limit }) => cmd_fetch(token, limit).await,
        Some(Command::Serve { port }) => cmd_serve(port.or(args.port)).await,
        None => cmd_serve(args.port).await,
    }
}

/// Load and validate configuration.
fn load_config() -> anyhow::Result<Config> {
    let config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    Ok(config)
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("QUAKE FEED - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Source: {}", config.source());
    match config.masked_token() {
        Some(token) => println!("  API Token: {}", token),
        None => println!("  API Token: not set (serving sample data)"),
    }
    println!("  Upstream URL: {}", config.upstream_url);
    println!("  Upstream Timeout: {}ms", config.upstream_timeout_ms);
    println!("  Limit: {} reports", config.limit());
    println!("  Sample Data: {}", config.sample_data_path);
    println!("  Static Dir: {}", config.static_dir);
    println!("  Port: {}", config.port);
    println!("  Metrics: {}", if config.metrics_enabled { "Enabled" } else { "Disabled" });
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Load the feed once and print it.
async fn cmd_fetch(token: Option<String>, limit: Option<usize>) -> anyhow::Result<()> {
    let mut config = load_config()?;

    if token.is_some() {
        config.api_token = token;
    }
    if let Some(limit) = limit {
        config.api_limit = limit;
        config.sample_limit = limit;
    }

    let service = EarthquakeService::new(config)?;
    let feed = service.load_feed().await?;

    println!("{}", serde_json::to_string_pretty(&feed)?);
    Ok(())
}

/// Run the HTTP server until shutdown.
async fn cmd_serve(port_override: Option<u16>) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let mut config = load_config()?;

    if let Some(port) = port_override {
        config.port = port;
    }

    info!("Configuration loaded successfully");
    match config.source() {
        FeedSource::Api => info!("Source: CWA API ({} reports)", config.api_limit),
        FeedSource::Sample => warn!(
            "API_TOKEN not set, serving {} ({} reports)",
            config.sample_data_path, config.sample_limit
        ),
    }

    let port = config.port;
    let metrics_enabled = config.metrics_enabled;

    let mut app_state = AppState::new(EarthquakeService::new(config)?);
    if metrics_enabled {
        app_state = app_state.with_metrics(metrics::install_recorder()?);
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("Server running at http://localhost:{}", port);

    axum::serve(listener, create_router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
