//! prospect-web server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), layers
//! `PROSPECTS_*` environment variables over it, and serves the prospect list
//! over HTTP.
//!
//! ```
//! cargo run -p prospect-web --bin server -- --config config.toml
//! PROSPECTS_SHEET__SHEET_NAME=Leads cargo run -p prospect-web --bin server
//! cargo run -p prospect-web --bin server -- --memory
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use prospect_core::store::SheetStore;
use prospect_sheets::{GoogleSheet, MemorySheet};
use prospect_web::{AppState, ServerConfig};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Prospect list web front-end")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Keep the sheet in process memory instead of Google Sheets. Contents are
  /// lost on exit.
  #[arg(long)]
  memory: bool,
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
    .add_source(
      config::Environment::with_prefix("PROSPECTS")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true),
    )
    .build()
    .context("failed to read config file")?;

  let mut server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in the credentials path.
  server_cfg.sheet.credentials_path = expand_tilde(&server_cfg.sheet.credentials_path);

  if cli.memory {
    tracing::warn!("serving from an in-memory sheet; nothing is persisted");
    serve(MemorySheet::new(), server_cfg).await
  } else {
    tracing::info!(
      sheet = %server_cfg.sheet.sheet_name,
      credentials = %server_cfg.sheet.credentials_path.display(),
      "using Google Sheets"
    );
    let sheet = GoogleSheet::new(server_cfg.sheet.clone())
      .context("failed to build spreadsheet client")?;
    serve(sheet, server_cfg).await
  }
}

async fn serve<S>(store: S, server_cfg: ServerConfig) -> anyhow::Result<()>
where
  S: SheetStore + Clone + 'static,
{
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  let state = AppState {
    store:  Arc::new(store),
    config: Arc::new(server_cfg),
  };
  let app = prospect_web::router(state);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
