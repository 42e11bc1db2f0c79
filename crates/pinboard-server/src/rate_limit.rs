//! Token-bucket rate limiting for authenticated users and the login route.

use std::{
  collections::HashMap,
  sync::Mutex,
  time::{Duration, Instant},
};

use serde::Deserialize;

// ─── Configuration ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
  #[serde(default)]
  pub enabled:          bool,
  /// Requests each authenticated user may make per day.
  #[serde(default = "default_per_day")]
  pub per_day:          u32,
  /// Login attempts accepted per minute across all callers.
  #[serde(default = "default_login_per_minute")]
  pub login_per_minute: u32,
}

fn default_per_day() -> u32 { 1000 }
fn default_login_per_minute() -> u32 { 1000 }

impl Default for RateLimitConfig {
  fn default() -> Self {
    Self {
      enabled:          false,
      per_day:          default_per_day(),
      login_per_minute: default_login_per_minute(),
    }
  }
}

// ─── Bucket ───────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct BucketState {
  tokens: f64,
  last:   Instant,
}

/// A token bucket refilled continuously at `rate` tokens per second, holding
/// at most `burst` tokens.
#[derive(Debug)]
pub struct TokenBucket {
  rate:  f64,
  burst: f64,
  state: Mutex<BucketState>,
}

impl TokenBucket {
  /// A bucket admitting `count` requests per `period`, starting full.
  pub fn new(count: u32, period: Duration, burst: u32) -> Self {
    let burst = f64::from(burst.max(1));
    Self {
      rate: f64::from(count) / period.as_secs_f64(),
      burst,
      state: Mutex::new(BucketState {
        tokens: burst,
        last:   Instant::now(),
      }),
    }
  }

  pub fn try_acquire(&self) -> bool { self.try_acquire_at(Instant::now()) }

  pub fn try_acquire_at(&self, now: Instant) -> bool {
    let mut state = self
      .state
      .lock()
      .unwrap_or_else(|poisoned| poisoned.into_inner());
    let elapsed = now.saturating_duration_since(state.last).as_secs_f64();
    state.tokens = (state.tokens + elapsed * self.rate).min(self.burst);
    state.last = state.last.max(now);
    if state.tokens >= 1.0 {
      state.tokens -= 1.0;
      true
    } else {
      false
    }
  }
}

// ─── Limits ───────────────────────────────────────────────────────────────────

const DAY: Duration = Duration::from_secs(24 * 60 * 60);
const MINUTE: Duration = Duration::from_secs(60);

/// All buckets the server consults. Buckets exist only for known usernames.
#[derive(Debug)]
pub struct RateLimits {
  enabled:  bool,
  per_user: HashMap<String, TokenBucket>,
  login:    TokenBucket,
}

impl RateLimits {
  pub fn new<'a>(
    config: &RateLimitConfig,
    usernames: impl IntoIterator<Item = &'a String>,
  ) -> Self {
    let per_user = usernames
      .into_iter()
      .map(|name| (name.clone(), TokenBucket::new(config.per_day, DAY, 1)))
      .collect();
    Self {
      enabled: config.enabled,
      per_user,
      login: TokenBucket::new(config.login_per_minute, MINUTE, 1),
    }
  }

  /// Limits that admit everything.
  #[cfg(test)]
  pub fn disabled() -> Self {
    Self::new(&RateLimitConfig::default(), [])
  }

  pub fn allow_user(&self, username: &str) -> bool {
    if !self.enabled {
      return true;
    }
    self
      .per_user
      .get(username)
      .is_none_or(TokenBucket::try_acquire)
  }

  pub fn allow_login(&self) -> bool {
    !self.enabled || self.login.try_acquire()
  }
}
