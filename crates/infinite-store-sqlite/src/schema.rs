//! SQL schema and statements for the content table.
//!
//! Table and index names come from [`TableConfig`], so every statement is
//! rendered once at open time after the names are validated.

use serde::Deserialize;

use crate::{Error, Result};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Names of the content table, its time-ordered index, and the partition value
/// the index is queried with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TableConfig {
  pub table_name: String,
  pub index_name: String,
  pub partition:  String,
}

impl Default for TableConfig {
  fn default() -> Self {
    Self {
      table_name: "content".to_owned(),
      index_name: "gsi_latest".to_owned(),
      partition:  "LATEST".to_owned(),
    }
  }
}

/// ASCII letters, digits and `_`, not starting with a digit.
fn validate_identifier(name: &str) -> Result<&str> {
  let mut chars = name.chars();
  let valid = chars
    .next()
    .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
  if valid {
    Ok(name)
  } else {
    Err(Error::InvalidIdentifier(name.to_owned()))
  }
}

// ─── Statements ──────────────────────────────────────────────────────────────

/// Rendered SQL for one configured table.
#[derive(Debug)]
pub struct Statements {
  /// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
  pub schema:       String,
  pub get_item:     String,
  pub query_latest: String,
  pub put_item:     String,
}

impl Statements {
  pub fn render(config: &TableConfig) -> Result<Self> {
    let table = validate_identifier(&config.table_name)?;
    let index = validate_identifier(&config.index_name)?;

    // `pk` is NULL for items outside the index partition; such rows stay out
    // of range queries the same way a sparse secondary index skips them.
    let schema = format!(
      "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS {table} (
    date       TEXT PRIMARY KEY,   -- YYYY-MM-DD
    pk         TEXT,               -- index partition, NULL when absent
    item_json  TEXT NOT NULL       -- full item in attribute-value JSON
);

CREATE INDEX IF NOT EXISTS {index} ON {table}(pk, date DESC);

PRAGMA user_version = 1;
"
    );

    Ok(Self {
      schema,
      get_item: format!("SELECT item_json FROM {table} WHERE date = ?1"),
      query_latest: format!(
        "SELECT item_json FROM {table} INDEXED BY {index}
         WHERE pk = ?1
         ORDER BY date DESC
         LIMIT ?2"
      ),
      put_item: format!(
        "INSERT INTO {table} (date, pk, item_json) VALUES (?1, ?2, ?3)
         ON CONFLICT(date) DO UPDATE SET
           pk        = excluded.pk,
           item_json = excluded.item_json"
      ),
    })
  }
}
