//! SQLite implementation of [`ContentStore`].

use std::{path::Path, sync::Arc};

use rusqlite::OptionalExtension as _;

use infinite_core::{
  attribute::{Item, string_attr},
  record::{ATTR_DATE, ATTR_PARTITION, validate_key},
  store::ContentStore,
};

use crate::{
  Error, Result,
  encode::{decode_item, encode_item},
  schema::{Statements, TableConfig},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A content store backed by a single SQLite file.
///
/// Clones share one reference-counted connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn:      tokio_rusqlite::Connection,
  sql:       Arc<Statements>,
  partition: Arc<str>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>, config: &TableConfig) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::init(conn, config).await
  }

  /// Open an in-memory store, used by tests.
  pub async fn open_in_memory(config: &TableConfig) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::init(conn, config).await
  }

  async fn init(conn: tokio_rusqlite::Connection, config: &TableConfig) -> Result<Self> {
    let sql = Arc::new(Statements::render(config)?);
    let store = Self {
      conn,
      sql,
      partition: Arc::from(config.partition.as_str()),
    };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    let sql = Arc::clone(&self.sql);
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(&sql.schema)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// The partition value [`ContentStore::query_latest`] runs against.
  pub fn partition(&self) -> &str { &self.partition }
}

// ─── ContentStore impl ───────────────────────────────────────────────────────

impl ContentStore for SqliteStore {
  type Error = Error;

  async fn get_item(&self, date: &str) -> Result<Option<Item>> {
    let sql = Arc::clone(&self.sql);
    let date = date.to_owned();

    let raw: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql.get_item, rusqlite::params![date], |row| row.get(0))
            .optional()?,
        )
      })
      .await?;

    raw.as_deref().map(decode_item).transpose()
  }

  async fn query_latest(&self, limit: u32) -> Result<Vec<Item>> {
    self.query_partition(&self.partition, limit).await
  }

  async fn query_partition(&self, partition: &str, limit: u32) -> Result<Vec<Item>> {
    let sql = Arc::clone(&self.sql);
    let partition = partition.to_owned();

    let raws: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql.query_latest)?;
        let rows = stmt
          .query_map(rusqlite::params![partition, limit], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;

    raws.iter().map(|s| decode_item(s)).collect()
  }

  async fn put_item(&self, item: Item) -> Result<()> {
    let date = string_attr(&item, ATTR_DATE)
      .ok_or(infinite_core::Error::MissingAttribute(ATTR_DATE))?
      .to_owned();
    validate_key(&date)?;

    let pk = string_attr(&item, ATTR_PARTITION).map(str::to_owned);
    let item_json = encode_item(&item)?;
    let sql = Arc::clone(&self.sql);

    tracing::debug!(%date, indexed = pk.is_some(), "writing content item");

    self
      .conn
      .call(move |conn| {
        conn.execute(&sql.put_item, rusqlite::params![date, pk, item_json])?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
