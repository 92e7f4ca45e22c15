//! Handlers for `/api/latest`.
//!
//! | Method    | Path          | Notes |
//! |-----------|---------------|-------|
//! | `GET`     | `/api/latest` | `?date=<YYYY-MM-DD>` point lookup, else `?limit=<n>` newest first |
//! | `OPTIONS` | `/api/latest` | CORS preflight |

use axum::{
  Json,
  extract::State,
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
};
use infinite_core::{query::LatestQuery, record::ContentRecord, store::ContentStore};
use serde::Serialize;

use crate::{
  AppState,
  error::ApiError,
  etag::compute_etag,
  headers::{CACHE_CONTROL, CORS_HEADERS, JSON_CONTENT_TYPE},
  params::QueryParams,
};

// ─── Body ─────────────────────────────────────────────────────────────────────

/// JSON body of a `200` response.
#[derive(Debug, Serialize)]
pub struct LatestBody {
  pub items: Vec<ContentRecord>,
  pub count: usize,
}

// ─── GET ──────────────────────────────────────────────────────────────────────

/// `GET /api/latest[?limit=<n>][&date=<YYYY-MM-DD>]`
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  params: QueryParams,
  headers: HeaderMap,
) -> Result<Response, ApiError>
where
  S: ContentStore + Clone + 'static,
{
  let query = LatestQuery::from_params(
    params.get("date"),
    params.get("limit"),
    state.config.default_limit,
  );

  let items = fetch(&state, &query).await?;
  let etag = compute_etag(&items);
  tracing::debug!(?query, count = items.len(), %etag, "resolved latest query");

  let if_none_match = headers
    .get(header::IF_NONE_MATCH)
    .map(|v| v.as_bytes());
  if if_none_match == Some(etag.as_bytes()) {
    return Ok(
      (
        StatusCode::NOT_MODIFIED,
        CORS_HEADERS,
        [(header::CACHE_CONTROL, CACHE_CONTROL.to_owned()), (header::ETAG, etag)],
      )
        .into_response(),
    );
  }

  let count = items.len();
  Ok(
    (
      StatusCode::OK,
      CORS_HEADERS,
      [JSON_CONTENT_TYPE],
      [(header::CACHE_CONTROL, CACHE_CONTROL.to_owned()), (header::ETAG, etag)],
      Json(LatestBody { items, count }),
    )
      .into_response(),
  )
}

/// Run the query against the store and project every item. Any store or
/// projection failure aborts the whole result.
async fn fetch<S>(
  state: &AppState<S>,
  query: &LatestQuery,
) -> Result<Vec<ContentRecord>, ApiError>
where
  S: ContentStore + Clone + 'static,
{
  let raw = match query {
    LatestQuery::ByDate(date) => state
      .store
      .get_item(date)
      .await
      .map_err(ApiError::store)?
      .into_iter()
      .collect::<Vec<_>>(),
    LatestQuery::Latest(limit) => state
      .store
      .query_latest(*limit)
      .await
      .map_err(ApiError::store)?,
  };

  Ok(
    raw
      .iter()
      .map(ContentRecord::from_item)
      .collect::<Result<Vec<_>, _>>()?,
  )
}

// ─── OPTIONS ──────────────────────────────────────────────────────────────────

/// `OPTIONS /api/latest`: CORS preflight.
pub async fn preflight() -> Response {
  (StatusCode::NO_CONTENT, CORS_HEADERS).into_response()
}
