//! HTTP front end for Pinboard.
//!
//! Wraps [`pinboard_api::api_router`] with token authentication, per-user
//! rate limiting, metrics and a health probe.

pub mod auth;
pub mod error;
pub mod metrics;
pub mod rate_limit;

pub use error::Error;

use std::sync::Arc;

use axum::{
  Json, Router, middleware,
  routing::{get, post},
};
use pinboard_core::store::Store;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use auth::AuthConfig;
use metrics::Metrics;
use rate_limit::{RateLimitConfig, RateLimits};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `PINBOARD_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                  String,
  #[serde(default = "default_port")]
  pub port:                  u16,
  /// Seed the store with a demo user and favourited assets on startup.
  #[serde(default)]
  pub preload:               bool,
  #[serde(default = "default_preload_assets")]
  pub preload_assets:        usize,
  #[serde(default = "default_shutdown_timeout_secs")]
  pub shutdown_timeout_secs: u64,
  pub auth:                  AuthConfig,
  #[serde(default)]
  pub rate_limit:            RateLimitConfig,
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 8080 }
fn default_preload_assets() -> usize { 3000 }
fn default_shutdown_timeout_secs() -> u64 { 15 }

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through the server's own handlers and middleware.
pub struct AppState<S> {
  pub store:   Arc<S>,
  pub auth:    Arc<AuthConfig>,
  pub limits:  Arc<RateLimits>,
  pub metrics: Arc<Metrics>,
}

impl<S> AppState<S> {
  pub fn new(store: Arc<S>, config: &ServerConfig) -> Self {
    let limits = RateLimits::new(&config.rate_limit, config.auth.users.keys());
    Self {
      store,
      auth: Arc::new(config.auth.clone()),
      limits: Arc::new(limits),
      metrics: Arc::new(Metrics::default()),
    }
  }
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:   self.store.clone(),
      auth:    self.auth.clone(),
      limits:  self.limits.clone(),
      metrics: self.metrics.clone(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
///
/// `/login` and `/health` are public; everything else sits behind
/// [`auth::require_bearer`].
pub fn router<S>(state: AppState<S>) -> Router
where
  S: Store + 'static,
{
  let protected = pinboard_api::api_router(state.store.clone())
    .merge(
      Router::new()
        .route("/metrics", get(metrics::handler::<S>))
        .with_state(state.clone()),
    )
    .layer(middleware::from_fn_with_state(
      state.clone(),
      auth::require_bearer::<S>,
    ));

  let public = Router::new()
    .route("/login", post(auth::login::<S>))
    .route("/health", get(health))
    .with_state(state);

  public.merge(protected).layer(TraceLayer::new_for_http())
}

async fn health() -> Json<Value> { Json(json!({ "status": "ok" })) }

// ─── Integration tests ────────────────────────────────────────────────────────
