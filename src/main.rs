use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use newsbrief::config::Config;
use newsbrief::storage::SourceStore;
use newsbrief::util::build_client;
use newsbrief::web::{create_app, AppState};

#[derive(Parser, Debug)]
#[command(
    name = "newsbrief",
    about = "Web RSS reader with article summaries and sentiment"
)]
struct Args {
    /// Config file (TOML); missing file means defaults
    #[arg(long, value_name = "FILE", default_value = "newsbrief.toml")]
    config: PathBuf,

    /// Address to listen on, overrides `bind_address`
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,

    /// Sources file, overrides `sources_file`
    #[arg(long, value_name = "FILE")]
    sources: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = Config::load(&args.config)
        .with_context(|| format!("Failed to load config from '{}'", args.config.display()))?;
    if let Some(bind) = args.bind {
        config.bind_address = bind;
    }
    if let Some(sources) = args.sources {
        config.sources_file = sources;
    }

    let store = SourceStore::open(&config.sources_file)
        .await
        .with_context(|| {
            format!(
                "Failed to read sources file '{}'",
                config.sources_file.display()
            )
        })?;
    let source_count = store.sources().await.len();
    if source_count == 0 {
        tracing::warn!(
            path = %store.path().display(),
            "No feed sources configured; add some at /add_source"
        );
    }

    let client = build_client().context("Failed to build HTTP client")?;

    let bind_address = config.bind_address.clone();
    let app = create_app(AppState::new(store, client, config));

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_address))?;
    tracing::info!(address = %bind_address, sources = source_count, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
