//! Attribute values: the raw, typed representation of a stored item.
//!
//! Ingestion writes items as maps of attribute name to [`AttributeValue`]. The
//! serialised form uses single-key tagged objects (`{"S": "..."}`,
//! `{"N": "4.5"}`, `{"M": {...}}`) so that items exported from the upstream
//! key-value store can be loaded unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// A stored item: attribute name → value.
pub type Item = BTreeMap<String, AttributeValue>;

/// One typed attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
  /// A string.
  #[serde(rename = "S")]
  S(String),
  /// A number, kept in its decimal string form until projected.
  #[serde(rename = "N")]
  N(String),
  /// A boolean.
  #[serde(rename = "BOOL")]
  Bool(bool),
  /// An explicit null; the flag is always `true` on the wire.
  #[serde(rename = "NULL")]
  Null(bool),
  /// An ordered list of values of any type.
  #[serde(rename = "L")]
  L(Vec<AttributeValue>),
  /// A nested map.
  #[serde(rename = "M")]
  M(Item),
}

impl AttributeValue {
  pub fn as_s(&self) -> Option<&str> {
    match self {
      Self::S(s) => Some(s),
      _ => None,
    }
  }

  pub fn as_n(&self) -> Option<&str> {
    match self {
      Self::N(n) => Some(n),
      _ => None,
    }
  }

  pub fn as_l(&self) -> Option<&[AttributeValue]> {
    match self {
      Self::L(l) => Some(l),
      _ => None,
    }
  }

  pub fn as_m(&self) -> Option<&Item> {
    match self {
      Self::M(m) => Some(m),
      _ => None,
    }
  }

  /// Encode a float as an `N` attribute.
  pub fn number(value: f64) -> Self { Self::N(value.to_string()) }

  /// Unwrap the type tags into plain JSON, recursively. `N` becomes a JSON
  /// number; `attribute` names the top-level attribute in errors.
  pub fn to_json(&self, attribute: &'static str) -> Result<Value> {
    Ok(match self {
      Self::S(s) => Value::String(s.clone()),
      Self::N(n) => Value::Number(serde_json::from_str(n.trim()).map_err(|_| {
        Error::InvalidNumber {
          attribute,
          value: n.clone(),
        }
      })?),
      Self::Bool(b) => Value::Bool(*b),
      Self::Null(_) => Value::Null,
      Self::L(list) => Value::Array(
        list
          .iter()
          .map(|v| v.to_json(attribute))
          .collect::<Result<_>>()?,
      ),
      Self::M(map) => Value::Object(
        map
          .iter()
          .map(|(k, v)| Ok((k.clone(), v.to_json(attribute)?)))
          .collect::<Result<_>>()?,
      ),
    })
  }
}

impl From<&str> for AttributeValue {
  fn from(s: &str) -> Self { Self::S(s.to_owned()) }
}

impl From<String> for AttributeValue {
  fn from(s: String) -> Self { Self::S(s) }
}

/// Look up a string attribute; any other type reads as absent.
pub fn string_attr<'a>(item: &'a Item, name: &str) -> Option<&'a str> {
  item.get(name).and_then(AttributeValue::as_s)
}
