//! JSON read API for Infinite content.
//!
//! Exposes an axum [`Router`] serving `/api/latest` and `/api/hubble` backed
//! by any [`ContentStore`]. TLS and transport concerns are the caller's
//! responsibility.

pub mod error;
pub mod etag;
pub mod headers;
pub mod hubble;
pub mod latest;
pub mod params;

use std::sync::Arc;

use axum::{Router, routing::get};
use infinite_core::{
  hubble::HUBBLE_PARTITION,
  query::{DEFAULT_LIMIT, HUBBLE_DEFAULT_LIMIT},
  store::ContentStore,
};
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Handler configuration, fixed at construction time.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestConfig {
  /// Page size when the request carries no usable `limit`.
  pub default_limit: u32,
}

impl Default for LatestConfig {
  fn default() -> Self {
    Self {
      default_limit: DEFAULT_LIMIT,
    }
  }
}

/// `/api/hubble` configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HubbleConfig {
  /// Index partition the Hubble items are written under.
  pub partition:     String,
  pub default_limit: u32,
}

impl Default for HubbleConfig {
  fn default() -> Self {
    Self {
      partition:     HUBBLE_PARTITION.to_owned(),
      default_limit: HUBBLE_DEFAULT_LIMIT,
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through the handlers.
#[derive(Clone)]
pub struct AppState<S: ContentStore> {
  pub store:  Arc<S>,
  pub config: Arc<LatestConfig>,
  pub hubble: Arc<HubbleConfig>,
}

impl<S: ContentStore> AppState<S> {
  pub fn new(store: S, config: LatestConfig) -> Self {
    Self {
      store:  Arc::new(store),
      config: Arc::new(config),
      hubble: Arc::new(HubbleConfig::default()),
    }
  }

  pub fn with_hubble(mut self, hubble: HubbleConfig) -> Self {
    self.hubble = Arc::new(hubble);
    self
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
///
/// The returned `Router<()>` can be merged into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: ContentStore + Clone + 'static,
{
  Router::new()
    .route(
      "/api/latest",
      get(latest::handler::<S>).options(latest::preflight),
    )
    .route(
      "/api/hubble",
      get(hubble::handler::<S>).options(hubble::preflight),
    )
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
