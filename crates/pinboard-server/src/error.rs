//! Errors raised by the server's own routes and middleware.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("missing Authorization header")]
  MissingAuthorization,
  #[error("wrong Authorization header format")]
  MalformedAuthorization,
  #[error("invalid or expired token")]
  InvalidToken,
  #[error("invalid credentials")]
  InvalidCredentials,
  #[error("too many requests")]
  RateLimited,
  #[error("bad request: {0}")]
  BadRequest(String),
  #[error("token error: {0}")]
  Token(#[from] jsonwebtoken::errors::Error),
  #[error(transparent)]
  Api(#[from] pinboard_api::ApiError),
}

impl Error {
  pub fn status(&self) -> StatusCode {
    match self {
      Error::MissingAuthorization
      | Error::InvalidToken
      | Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
      Error::MalformedAuthorization | Error::BadRequest(_) => {
        StatusCode::BAD_REQUEST
      }
      Error::RateLimited => StatusCode::TOO_MANY_REQUESTS,
      Error::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
      Error::Api(e) => e.status(),
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
