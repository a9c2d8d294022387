use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marquee_config::{Config, ConfigLoad, ConfigLoader};
use marquee_core::{BatchedAggregator, Listing, NavigationQuery, TmdbClient};
use marquee_model::ImageBase;
use marquee_server::{AppState, create_app, handlers::movie_handlers};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "marquee-server")]
#[command(about = "Browse the TMDB movie catalog over a small JSON API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Path to marquee.toml (overrides MARQUEE_CONFIG and default locations)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// .env file to load instead of `.env.local` and `.env`
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT", global = true)]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST", global = true)]
    host: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Aggregate popular pages once and print one browse page as JSON
    Snapshot(SnapshotArgs),
}

#[derive(ClapArgs, Debug, Clone)]
struct SnapshotArgs {
    /// Number of popular pages to aggregate
    #[arg(long)]
    pages: Option<u32>,

    /// Browse page to print
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Letter filter; empty for all
    #[arg(long, default_value = "")]
    filter: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();
    let config = load_runtime_config(&cli.serve)?;

    match cli.command {
        Some(Command::Snapshot(args)) => run_snapshot(config, args).await,
        Some(Command::Serve) | None => run_server(config).await,
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Override via RUST_LOG.
                    "info,marquee_core=info,tower_http=warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<Config> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = &args.env_file {
        loader = loader.with_env_file(path);
    }

    let ConfigLoad {
        mut config,
        warnings,
    } = loader.load().context("failed to load configuration")?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = &config.metadata.config_path {
        info!(path = %path.display(), "configuration file loaded");
    }

    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => {
                warn!(message = %warning.message, "configuration warning")
            }
        }
    }

    info!(
        tmdb.base_url = %config.tmdb.base_url,
        aggregation.batch_size = config.aggregation.batch_size,
        aggregation.inter_batch_delay_ms =
            config.aggregation.inter_batch_delay.as_millis() as u64,
        catalog.popular_pages = config.catalog.popular_pages,
        browse.page_size = config.browse.page_size,
        "catalog configuration in effect"
    );

    Ok(config)
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    let addr = config
        .server
        .socket_addr()
        .context("invalid server host/port")?;
    let app = create_app(AppState::from_config(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "marquee server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

async fn run_snapshot(config: Config, args: SnapshotArgs) -> anyhow::Result<()> {
    let client = TmdbClient::with_base_url(
        config.tmdb.api_key.clone(),
        config.tmdb.base_url.clone(),
    )
    .with_language(config.tmdb.language.clone());
    let pages = args.pages.unwrap_or(config.catalog.popular_pages);

    let aggregate = BatchedAggregator::new(
        Arc::new(client),
        config.aggregation.clone(),
    )
    .aggregate(
        Listing::Popular,
        config.catalog.popular_start_page,
        pages,
    )
    .await;

    if !aggregate.failed_pages.is_empty() {
        warn!(failed_pages = ?aggregate.failed_pages, "some pages could not be loaded");
    }

    let mut query = NavigationQuery::new();
    query.set("page", args.page.to_string());
    query.set("filter", args.filter);

    let response = movie_handlers::browse_response(
        &aggregate.movies,
        &query,
        config.browse.page_size,
        &ImageBase::new(config.tmdb.image_base_url.clone()),
    );

    let rendered = serde_json::to_string_pretty(&response)
        .context("failed to render snapshot")?;
    println!("{rendered}");
    Ok(())
}
