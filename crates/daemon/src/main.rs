use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use taskboard_daemon::{config::DEFAULT_FEED_PATH, router, AppState, DaemonConfig};
use tokio::signal;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "taskboard-daemon", version, about = "Serves the agent task feed over HTTP")]
struct Cli {
    /// Where the HTTP API will listen, e.g. 127.0.0.1:3000
    #[arg(long, default_value = "127.0.0.1:3000")]
    listen: SocketAddr,

    /// Project root. Relative feed paths are resolved against it.
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Newline-delimited JSON task feed written by the agent runtime.
    #[arg(long, default_value = DEFAULT_FEED_PATH)]
    feed_path: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_target(false)
        .with_max_level(Level::INFO)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = DaemonConfig::new(cli.listen, cli.project_root, &cli.feed_path);

    info!("starting daemon with config: {:?}", config);
    if !config.feed_path.exists() {
        warn!(feed = %config.feed_path.display(), "feed file does not exist yet; requests will fail until it is written");
    }

    let app = router(AppState::new(config.feed_reader()));

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("bind {}", config.listen))?;
    info!("listening on http://{}", config.listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    info!("shutdown requested");
}
