//! Per-key query string access.

use std::convert::Infallible;

use axum::{
  extract::{FromRequestParts, Query},
  http::request::Parts,
};

/// The raw query string as decoded key/value pairs.
///
/// A repeated key resolves to its last value and an undecodable query string
/// reads as empty, so one bad parameter never discards the others.
#[derive(Debug, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
  /// The last value given for `key`.
  pub fn get(&self, key: &str) -> Option<&str> {
    self
      .0
      .iter()
      .rev()
      .find(|(k, _)| k == key)
      .map(|(_, v)| v.as_str())
  }
}

impl<S: Send + Sync> FromRequestParts<S> for QueryParams {
  type Rejection = Infallible;

  async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
    let pairs = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
      .await
      .map(|Query(pairs)| pairs)
      .unwrap_or_default();
    Ok(Self(pairs))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::http::Request;

  async fn extract(uri: &str) -> QueryParams {
    let (mut parts, ()) = Request::builder().uri(uri).body(()).unwrap().into_parts();
    let Ok(params) = QueryParams::from_request_parts(&mut parts, &()).await;
    params
  }

  #[tokio::test]
  async fn repeated_key_keeps_last_value() {
    let params = extract("/api/latest?date=2025-01-01&limit=1&limit=2").await;
    assert_eq!(params.get("date"), Some("2025-01-01"));
    assert_eq!(params.get("limit"), Some("2"));
    assert_eq!(params.get("guid"), None);
  }

  #[tokio::test]
  async fn values_are_percent_decoded() {
    let params = extract("/api/hubble?guid=potw%2050a&limit=+3").await;
    assert_eq!(params.get("guid"), Some("potw 50a"));
    assert_eq!(params.get("limit"), Some(" 3"));
  }

  #[tokio::test]
  async fn missing_query_string_is_empty() {
    assert_eq!(extract("/api/latest").await.get("date"), None);
  }
}
