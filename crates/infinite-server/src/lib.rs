//! Wiring for the `infinite-server` binary: configuration loading, the HTTP
//! application, and the local record import.

use std::path::{Path, PathBuf};

use axum::Router;
use infinite_api::{AppState, HubbleConfig, LatestConfig, api_router};
use infinite_core::{
  query::DEFAULT_LIMIT,
  record::{ContentRecord, parse_date},
  store::ContentStore,
};
use infinite_store_sqlite::TableConfig;
use serde::Deserialize;
use thiserror::Error;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` layered under
/// `INFINITE_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:                 String,
  pub port:                 u16,
  pub store_path:           PathBuf,
  pub table_name:           String,
  pub index_name:           String,
  /// Partition value that places an item in the time-ordered index.
  pub partition:            String,
  pub default_limit:        u32,
  /// Partition `/api/hubble` reads.
  pub hubble_partition:     String,
  pub hubble_default_limit: u32,
}

impl ServerConfig {
  pub fn table(&self) -> TableConfig {
    TableConfig {
      table_name: self.table_name.clone(),
      index_name: self.index_name.clone(),
      partition:  self.partition.clone(),
    }
  }

  pub fn latest(&self) -> LatestConfig {
    LatestConfig {
      default_limit: self.default_limit,
    }
  }

  pub fn hubble(&self) -> HubbleConfig {
    HubbleConfig {
      partition:     self.hubble_partition.clone(),
      default_limit: self.hubble_default_limit,
    }
  }
}

/// Load configuration from `path` (optional) and the environment.
pub fn load_config(path: &Path) -> Result<ServerConfig, config::ConfigError> {
  let table = TableConfig::default();
  let hubble = HubbleConfig::default();
  config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 3000_i64)?
    .set_default("store_path", "infinite.db")?
    .set_default("table_name", table.table_name)?
    .set_default("index_name", table.index_name)?
    .set_default("partition", table.partition)?
    .set_default("default_limit", i64::from(DEFAULT_LIMIT))?
    .set_default("hubble_partition", hubble.partition)?
    .set_default("hubble_default_limit", i64::from(hubble.default_limit))?
    .add_source(config::File::from(path.to_path_buf()).required(false))
    .add_source(config::Environment::with_prefix("INFINITE"))
    .build()?
    .try_deserialize()
}

// ─── Application ──────────────────────────────────────────────────────────────

/// The full HTTP application: the API router wrapped in request tracing.
pub fn app<S>(state: AppState<S>) -> Router
where
  S: ContentStore + Clone + 'static,
{
  api_router(state).layer(TraceLayer::new_for_http())
}

// ─── Import ───────────────────────────────────────────────────────────────────

/// Error raised while importing records.
#[derive(Debug, Error)]
pub enum ImportError<E: std::error::Error + 'static> {
  /// A record's date is not a canonical `YYYY-MM-DD`. Nothing is written when
  /// any record fails validation.
  #[error("invalid record: {0}")]
  InvalidRecord(#[source] infinite_core::Error),

  #[error("store error: {0}")]
  Store(#[source] E),
}

/// Write `records` into `store` under `partition`, overwriting existing
/// dates. Records are validated up front; returns the number written.
pub async fn import_records<S>(
  store: &S,
  records: Vec<ContentRecord>,
  partition: &str,
) -> Result<usize, ImportError<S::Error>>
where
  S: ContentStore,
{
  for record in &records {
    parse_date(&record.date).map_err(ImportError::InvalidRecord)?;
  }

  let count = records.len();
  for record in records {
    tracing::debug!(date = %record.date, "importing record");
    store
      .put_item(record.to_item(partition))
      .await
      .map_err(ImportError::Store)?;
  }
  Ok(count)
}
