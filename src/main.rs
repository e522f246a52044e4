use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use emoji_mirror::{
    catalog::CatalogClient, config::Config, scheduler::RefreshScheduler, storage::AssetStorage,
    sync::SyncService, web::WebServer,
};

#[derive(Parser)]
#[command(name = "emoji-mirror")]
#[command(version)]
#[command(about = "Mirrors a remote item-emoji catalog and serves the images")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("emoji_mirror={}", cli.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting emoji mirror v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load_from_file(&cli.config)?;
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }

    let storage = AssetStorage::new(config.storage.output_dir.clone());
    storage.ensure_dir().await?;
    info!("Serving images from {:?}", storage.output_dir());

    let client = CatalogClient::new(&config.upstream)?;
    let sync = SyncService::new(client, storage.clone());
    let scheduler = RefreshScheduler::new(&config.scheduler, sync);

    // Startup cycle plus daily refreshes run alongside the server; the
    // lookup path only ever reads the filesystem, so neither waits on
    // the other.
    tokio::spawn(scheduler.run());

    let server = WebServer::new(&config.web, storage)?;
    server.serve().await
}
