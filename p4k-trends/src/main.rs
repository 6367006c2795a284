//! p4k-trends (Genre Trends) - Pitchfork review trends by genre
//!
//! Loads the review summary table once, then serves a web page where a genre
//! dropdown drives two charts: AOTY points and the Best New Music proportion
//! over the years.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use p4k_common::config::{CliOverrides, DashboardConfig};
use p4k_common::dataset::load_dataset;
use p4k_trends::{build_router, AppState};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for p4k-trends
#[derive(Parser, Debug)]
#[command(name = "p4k-trends")]
#[command(about = "Pitchfork genre trends dashboard")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "P4K_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind
    #[arg(long)]
    bind_address: Option<String>,

    /// Review CSV: file path or http(s) URL
    #[arg(short, long)]
    data_source: Option<String>,

    /// Genre selected when the page loads
    #[arg(long)]
    default_genre: Option<String>,

    /// Log filter directive (overridden by RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

impl From<Args> for CliOverrides {
    fn from(args: Args) -> Self {
        Self {
            config_path: args.config,
            port: args.port,
            bind_address: args.bind_address,
            data_source: args.data_source,
            default_genre: args.default_genre,
            log_level: args.log_level,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli: CliOverrides = Args::parse().into();

    // Log level lives in the config, so resolve it before tracing starts
    let config = DashboardConfig::resolve(&cli).context("Failed to load configuration")?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("Invalid log level '{}'", config.log_level))?,
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build identification first, before the dataset download can stall
    info!(
        "Starting p4k-trends v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match &config.config_file {
        Some(path) => info!("Config file: {}", path.display()),
        None => warn!("No config file found, using compiled defaults"),
    }
    info!("Data source: {}", config.data_source);

    // Without data there is nothing to render
    let dataset = match load_dataset(&config.data_source, config.fetch_timeout).await {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("Failed to load dataset from {}: {}", config.data_source, e);
            return Err(e).context("Failed to load dataset");
        }
    };
    info!(
        "✓ Loaded {} rows across {} genres",
        dataset.len(),
        dataset.genres().len()
    );

    if !dataset.contains_genre(&config.default_genre) {
        warn!(
            "Default genre '{}' is not in the dataset; the page will preselect '{}'",
            config.default_genre,
            dataset.genres().first().map(String::as_str).unwrap_or("")
        );
    }

    for chart in &config.charts {
        if !dataset.indicators().contains(&chart.indicator.as_str()) {
            warn!(
                "Chart '{}' plots indicator '{}', which no row carries",
                chart.id, chart.indicator
            );
        }
    }

    let addr = config.listen_address();
    let state = AppState::new(dataset, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("p4k-trends listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
