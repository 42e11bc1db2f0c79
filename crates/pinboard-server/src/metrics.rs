//! Process counters exposed at `GET /metrics`.

use std::sync::atomic::{AtomicU64, Ordering};

use axum::{Json, extract::State};
use pinboard_api::ApiError;
use pinboard_core::store::{Store, StoreStats};
use serde::Serialize;

use crate::{AppState, error::Error};

#[derive(Debug, Default)]
pub struct Metrics {
  auth_failures:        AtomicU64,
  ratelimited_requests: AtomicU64,
}

impl Metrics {
  pub fn record_auth_failure(&self) {
    self.auth_failures.fetch_add(1, Ordering::Relaxed);
  }

  pub fn record_rate_limited(&self) {
    self.ratelimited_requests.fetch_add(1, Ordering::Relaxed);
  }

  pub fn snapshot(&self, store: StoreStats) -> MetricsSnapshot {
    MetricsSnapshot {
      store,
      auth_failures: self.auth_failures.load(Ordering::Relaxed),
      ratelimited_requests: self.ratelimited_requests.load(Ordering::Relaxed),
    }
  }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
  #[serde(flatten)]
  pub store:                StoreStats,
  pub auth_failures:        u64,
  pub ratelimited_requests: u64,
}

/// `GET /metrics`
pub async fn handler<S: Store>(
  State(state): State<AppState<S>>,
) -> Result<Json<MetricsSnapshot>, Error> {
  let stats = state.store.stats().map_err(ApiError::from)?;
  Ok(Json(state.metrics.snapshot(stats)))
}
