//! Response header sets for the read endpoints.

use axum::http::{HeaderName, header};

/// Allow-all CORS; attached to success, `304`, error and preflight responses.
pub const CORS_HEADERS: [(HeaderName, &str); 3] = [
  (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
  (header::ACCESS_CONTROL_ALLOW_METHODS, "GET,OPTIONS"),
  (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
];

/// Shared and private caches may keep a response for five minutes.
pub const CACHE_CONTROL: &str = "public, max-age=300, s-maxage=300";

pub const JSON_CONTENT_TYPE: (HeaderName, &str) =
  (header::CONTENT_TYPE, "application/json; charset=utf-8");

/// CORS for `/api/hubble`, which also admits an `Authorization` header.
pub const HUBBLE_CORS_HEADERS: [(HeaderName, &str); 3] = [
  (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
  (header::ACCESS_CONTROL_ALLOW_METHODS, "GET,OPTIONS"),
  (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, Authorization"),
];

/// Kept for an hour, then served stale for up to two more while revalidating.
pub const HUBBLE_CACHE_CONTROL: &str = "public, max-age=3600, stale-while-revalidate=7200";
