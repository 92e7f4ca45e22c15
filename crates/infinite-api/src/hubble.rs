//! Handlers for `/api/hubble`.
//!
//! | Method    | Path          | Notes |
//! |-----------|---------------|-------|
//! | `GET`     | `/api/hubble` | `?limit=<n>` newest first, `&guid=<id>` narrows the page |
//! | `OPTIONS` | `/api/hubble` | CORS preflight |

use axum::{
  Json,
  extract::State,
  http::{StatusCode, header},
  response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use infinite_core::{
  attribute::string_attr,
  hubble::{ATTR_GUID, HubbleRecord},
  query::HubbleQuery,
  store::ContentStore,
};
use serde::Serialize;

use crate::{
  AppState,
  error::ApiError,
  headers::{HUBBLE_CACHE_CONTROL, HUBBLE_CORS_HEADERS, JSON_CONTENT_TYPE},
  params::QueryParams,
};

/// JSON body of a `200` response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HubbleBody {
  pub items:        Vec<HubbleRecord>,
  pub count:        usize,
  /// When the page was read, RFC 3339 UTC with milliseconds.
  pub last_updated: String,
}

/// `GET /api/hubble[?limit=<n>][&guid=<id>]`
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  params: QueryParams,
) -> Result<Response, ApiError>
where
  S: ContentStore + Clone + 'static,
{
  let query = HubbleQuery::from_params(
    params.get("limit"),
    params.get("guid"),
    state.hubble.default_limit,
  );

  let raw = state
    .store
    .query_partition(&state.hubble.partition, query.limit)
    .await
    .map_err(ApiError::store)?;

  let items = raw
    .iter()
    .filter(|item| match &query.guid {
      Some(guid) => string_attr(item, ATTR_GUID) == Some(guid.as_str()),
      None => true,
    })
    .map(HubbleRecord::from_item)
    .collect::<Result<Vec<_>, _>>()?;
  tracing::debug!(?query, count = items.len(), "resolved hubble query");

  let count = items.len();
  Ok(
    (
      StatusCode::OK,
      HUBBLE_CORS_HEADERS,
      [JSON_CONTENT_TYPE, (header::CACHE_CONTROL, HUBBLE_CACHE_CONTROL)],
      Json(HubbleBody {
        items,
        count,
        last_updated: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
      }),
    )
      .into_response(),
  )
}

/// `OPTIONS /api/hubble`
pub async fn preflight() -> Response {
  (StatusCode::NO_CONTENT, HUBBLE_CORS_HEADERS).into_response()
}
