use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dealfeed::cache::DealsCache;
use dealfeed::config::Config;
use dealfeed::fetcher::StoreFetcher;
use dealfeed::scheduler::RefreshScheduler;
use dealfeed::server::ApiServer;

#[derive(Parser)]
#[command(
    name = "dealfeed",
    version,
    about = "Steam storefront deals poller with an in-memory cache and HTTP API",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the refresh loop and HTTP server
    Serve {
        /// Configuration file (TOML); defaults to environment variables
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override listen host
        #[arg(long)]
        host: Option<String>,

        /// Override listen port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Fetch the feed once and print the snapshot as JSON
    Fetch {
        /// Configuration file (TOML); defaults to environment variables
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(long, default_value = "false")]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    match cli.command {
        Commands::Serve { config, host, port } => {
            let mut config = load_config(config)?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await?;
        }

        Commands::Fetch { config, pretty } => {
            let config = load_config(config)?;
            fetch(config, pretty).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(&path)?,
        None => Config::from_env()?,
    };
    config.validate()?;
    Ok(config)
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("dealfeed=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("dealfeed=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    Ok(())
}

async fn serve(config: Config) -> Result<()> {
    tracing::info!(
        endpoint = %config.upstream.endpoint,
        refresh_interval_secs = config.upstream.refresh_interval_secs,
        addr = %config.server.listen_addr(),
        "Starting dealfeed"
    );

    let cache = Arc::new(DealsCache::new());
    let fetcher = StoreFetcher::new(&config.upstream).context("Failed to create fetcher")?;
    let scheduler = RefreshScheduler::new(fetcher, cache.clone(), config.refresh_interval());

    // Fill the cache once before serving any traffic, then hand the
    // scheduler off to its background loop.
    scheduler.refresh_once().await;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler_handle = tokio::spawn(scheduler.run(shutdown_rx));

    let server = ApiServer::new(config.server.clone(), cache);
    server
        .start_with_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

    let _ = shutdown_tx.send(true);
    let _ = scheduler_handle.await;

    Ok(())
}

async fn fetch(config: Config, pretty: bool) -> Result<()> {
    let cache = DealsCache::new();
    let fetcher = StoreFetcher::new(&config.upstream).context("Failed to create fetcher")?;

    let count = fetcher
        .refresh(&cache)
        .await
        .context("Failed to fetch deals feed")?;
    tracing::info!(count, "Fetched deals feed");

    let snapshot = cache.read().await;
    let output = if pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{output}");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
