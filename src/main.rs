use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use staticd::config::{load_config, validate_config, ConfigError, ServerConfig};
use staticd::lifecycle::signals;
use staticd::Server;

#[derive(Parser)]
#[command(name = "staticd")]
#[command(about = "Multi-threaded HTTP/1.0 static file server", long_about = None)]
struct Cli {
    /// Directory to serve files from.
    serve_dir: PathBuf,

    /// TCP port to listen on.
    port: u16,

    /// Optional TOML config file for tuning knobs.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of worker tasks.
    #[arg(long)]
    workers: Option<usize>,

    /// Override the connection queue capacity.
    #[arg(long)]
    queue_capacity: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Wrong argument count exits non-zero here, before any core component
    // is constructed.
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "staticd=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("staticd v0.1.0 starting");

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    // Positional arguments and explicit flags win over the file.
    config.serve_dir = cli.serve_dir;
    config.port = cli.port;
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }
    if let Some(capacity) = cli.queue_capacity {
        config.queue_capacity = capacity;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::info!(
        serve_dir = %config.serve_dir.display(),
        bind_address = %config.bind_addr(),
        workers = config.workers,
        queue_capacity = config.queue_capacity,
        "Configuration loaded"
    );

    let server = Server::bind(config).await?;

    // Route the interrupt to the one point of control that drives shutdown.
    signals::spawn_interrupt_listener(server.shutdown_handle());

    server.run().await?;

    Ok(())
}
