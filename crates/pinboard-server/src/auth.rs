//! Token authentication: the credential table, `POST /login`, and the
//! bearer-token middleware guarding every other route.
//!
//! Passwords are checked against argon2 PHC strings. Tokens are HS256 JWTs
//! signed with the configured secret.

use std::collections::HashMap;

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
  Json,
  body::Bytes,
  extract::{Request, State},
  http::{HeaderMap, HeaderValue, header},
  middleware::Next,
  response::{IntoResponse, Response},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use pinboard_core::store::Store;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::Instrument as _;
use uuid::Uuid;

use crate::{AppState, error::Error};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Credentials and signing material, built once from configuration.
#[derive(Clone, Deserialize)]
pub struct AuthConfig {
  /// HMAC-SHA256 secret used to sign and verify tokens.
  pub secret:          String,
  #[serde(default = "default_token_ttl_hours")]
  pub token_ttl_hours: i64,
  /// Username → argon2 PHC string, e.g. `$argon2id$v=19$…`
  #[serde(default)]
  pub users:           HashMap<String, String>,
}

fn default_token_ttl_hours() -> i64 { 24 }

impl AuthConfig {
  /// Verify a username/password pair against the credential table.
  pub fn verify_password(&self, username: &str, password: &str) -> Result<(), Error> {
    let stored = self.users.get(username).ok_or(Error::InvalidCredentials)?;
    let parsed = PasswordHash::new(stored).map_err(|_| Error::InvalidCredentials)?;
    Argon2::default()
      .verify_password(password.as_bytes(), &parsed)
      .map_err(|_| Error::InvalidCredentials)
  }
}

// ─── Tokens ───────────────────────────────────────────────────────────────────

/// JWT claims embedded in every token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
  /// The authenticated username.
  pub sub: String,
  pub iat: i64,
  pub exp: i64,
  pub jti: String,
}

pub fn issue_token(username: &str, config: &AuthConfig) -> Result<(String, Claims), Error> {
  let now = Utc::now();
  let claims = Claims {
    sub: username.to_owned(),
    iat: now.timestamp(),
    exp: (now + Duration::hours(config.token_ttl_hours)).timestamp(),
    jti: Uuid::new_v4().to_string(),
  };
  let token = encode(
    &Header::default(),
    &claims,
    &EncodingKey::from_secret(config.secret.as_bytes()),
  )?;
  Ok((token, claims))
}

/// Validate signature and expiry, and that the subject is still a known user.
pub fn validate_token(token: &str, config: &AuthConfig) -> Result<Claims, Error> {
  let data = decode::<Claims>(
    token,
    &DecodingKey::from_secret(config.secret.as_bytes()),
    &Validation::default(),
  )
  .map_err(|_| Error::InvalidToken)?;
  if !config.users.contains_key(&data.claims.sub) {
    return Err(Error::InvalidToken);
  }
  Ok(data.claims)
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, Error> {
  let value = headers
    .get(header::AUTHORIZATION)
    .ok_or(Error::MissingAuthorization)?
    .to_str()
    .map_err(|_| Error::MalformedAuthorization)?;
  match value.split_once(' ') {
    Some(("Bearer", token)) if !token.is_empty() && !token.contains(' ') => {
      Ok(token)
    }
    _ => Err(Error::MalformedAuthorization),
  }
}

// ─── Login ────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct Credentials {
  username: String,
  password: String,
}

/// `POST /login`, body `{"username":"...","password":"..."}`.
///
/// Returns `{"token":"<jwt>"}` and also sets it as the `token` cookie.
pub async fn login<S: Store>(
  State(state): State<AppState<S>>,
  body: Bytes,
) -> Result<Response, Error> {
  if !state.limits.allow_login() {
    state.metrics.record_rate_limited();
    return Err(Error::RateLimited);
  }

  let creds: Credentials = serde_json::from_slice(&body)
    .map_err(|e| Error::BadRequest(format!("malformed credentials: {e}")))?;

  if let Err(e) = state.auth.verify_password(&creds.username, &creds.password) {
    tracing::info!(username = %creds.username, "login rejected");
    state.metrics.record_auth_failure();
    return Err(e);
  }

  let (token, claims) = issue_token(&creds.username, &state.auth)?;
  tracing::info!(username = %creds.username, "login succeeded");

  let expires = chrono::DateTime::from_timestamp(claims.exp, 0)
    .unwrap_or_else(Utc::now)
    .format("%a, %d %b %Y %H:%M:%S GMT");
  let cookie = format!("token={token}; Expires={expires}; Path=/; HttpOnly");

  let mut res = Json(json!({ "token": token })).into_response();
  if let Ok(value) = HeaderValue::from_str(&cookie) {
    res.headers_mut().insert(header::SET_COOKIE, value);
  }
  Ok(res)
}

// ─── Middleware ───────────────────────────────────────────────────────────────

/// Reject requests without a valid bearer token, then apply the caller's
/// rate limit. The rest of the request runs inside a span naming the caller.
pub async fn require_bearer<S: Store>(
  State(state): State<AppState<S>>,
  req: Request,
  next: Next,
) -> Result<Response, Error> {
  let claims = match bearer_token(req.headers())
    .and_then(|token| validate_token(token, &state.auth))
  {
    Ok(claims) => claims,
    Err(e) => {
      if !matches!(e, Error::MalformedAuthorization) {
        state.metrics.record_auth_failure();
      }
      return Err(e);
    }
  };

  if !state.limits.allow_user(&claims.sub) {
    state.metrics.record_rate_limited();
    tracing::debug!(username = %claims.sub, "rate limited");
    return Err(Error::RateLimited);
  }

  let span = tracing::info_span!("authenticated", username = %claims.sub);
  Ok(next.run(req).instrument(span).await)
}
