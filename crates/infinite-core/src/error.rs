//! Error types for `infinite-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("stored item has no string attribute {0:?}")]
  MissingAttribute(&'static str),

  #[error("attribute {attribute:?} holds a non-numeric value {value:?}")]
  InvalidNumber {
    attribute: &'static str,
    value:     String,
  },

  #[error("invalid calendar date {0:?}, expected YYYY-MM-DD")]
  InvalidDate(String),

  #[error("invalid item key {0:?}, expected YYYY-MM-DD or a UTC RFC 3339 timestamp")]
  InvalidKey(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
