//! leadvault server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the
//! JSON-file lead store, and serves the intake API over HTTP.
//!
//! Every configuration key can be overridden from the environment with a
//! `LEADVAULT_` prefix, e.g. `LEADVAULT_PORT=8080`.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use leadvault_api::{AppState, ServerConfig};
use leadvault_core::intake::IntakeService;
use leadvault_store_file::FileStore;

#[derive(Parser)]
#[command(author, version, about = "leadvault intake server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("LEADVAULT"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // The store file and its directory are created lazily on first append.
  let store = Arc::new(FileStore::new(server_cfg.data_path.clone()));
  let intake =
    Arc::new(IntakeService::with_policy(store.clone(), server_cfg.durability));

  let state = AppState {
    intake,
    store,
    analytics_enabled: server_cfg.analytics_enabled,
  };

  let app = leadvault_api::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
