//! infinite-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite content store, and serves `/api/latest` and `/api/hubble` over HTTP.
//!
//! # Loading records locally
//!
//! Ingestion normally writes the store. For local development a JSON array of
//! content records can be written directly:
//!
//! ```text
//! cargo run -p infinite-server -- import records.json
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use infinite_api::AppState;
use infinite_core::record::ContentRecord;
use infinite_server::{ServerConfig, app, import_records, load_config};
use infinite_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Infinite content API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the HTTP API (the default).
  Serve,
  /// Write a JSON array of content records into the store and exit.
  Import {
    /// Path to the JSON file.
    file: PathBuf,
  },
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

  let server_cfg = load_config(&cli.config).context("failed to load configuration")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  let store = SqliteStore::open(&store_path, &server_cfg.table())
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  match cli.command.unwrap_or(Command::Serve) {
    Command::Serve => serve(store, &server_cfg).await,
    Command::Import { file } => import(&store, &server_cfg, &file).await,
  }
}

async fn serve(store: SqliteStore, server_cfg: &ServerConfig) -> anyhow::Result<()> {
  let state = AppState::new(store, server_cfg.latest()).with_hubble(server_cfg.hubble());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!(
    table = %server_cfg.table_name,
    index = %server_cfg.index_name,
    default_limit = server_cfg.default_limit,
    "Listening on http://{address}"
  );
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app(state)).await.context("server error")?;

  Ok(())
}

async fn import(
  store: &SqliteStore,
  server_cfg: &ServerConfig,
  file: &Path,
) -> anyhow::Result<()> {
  let raw = std::fs::read_to_string(file)
    .with_context(|| format!("reading {}", file.display()))?;
  let records: Vec<ContentRecord> =
    serde_json::from_str(&raw).context("parsing content records")?;

  let written = import_records(store, records, &server_cfg.partition)
    .await
    .context("import failed")?;

  tracing::info!(written, file = %file.display(), "import complete");
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
