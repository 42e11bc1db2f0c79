//! Handlers for `/users` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/users` | Optional `page`, `limit` |
//! | `POST`   | `/users` | Body: `{"email":"...","name":"..."}`; returns 201 + `{"id":n}` |
//! | `GET`    | `/users/:id` | 404 if not found |
//! | `PUT`    | `/users/:id` | Partial body; returns the merged user |
//! | `DELETE` | `/users/:id` | Idempotent; also drops the user's favourites |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use bytes::Bytes;
use pinboard_core::{
  store::Store,
  user::{NewUser, User, UserId, UserPatch},
};
use serde_json::json;

use crate::{
  error::ApiError,
  extract::{Path, Query},
  page::Page,
};

fn parse_body<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
  serde_json::from_slice(body)
    .map_err(|e| ApiError::BadRequest(format!("malformed user: {e}")))
}

/// `GET /users[?page=..][&limit=..]`
pub async fn list<S: Store>(
  State(store): State<Arc<S>>,
  Query(page): Query<Page>,
) -> Result<Json<Vec<User>>, ApiError> {
  let users = store.list_users()?;
  Ok(Json(page.apply(users)))
}

/// `POST /users`
pub async fn create<S: Store>(
  State(store): State<Arc<S>>,
  body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
  let input: NewUser = parse_body(&body)?;
  let id = store.create_user(input)?;
  tracing::info!(user = id, "user created");
  Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// `GET /users/:id`
pub async fn get_one<S: Store>(
  State(store): State<Arc<S>>,
  Path(id): Path<UserId>,
) -> Result<Json<User>, ApiError> {
  Ok(Json(store.get_user(id)?))
}

/// `PUT /users/:id`
pub async fn update<S: Store>(
  State(store): State<Arc<S>>,
  Path(id): Path<UserId>,
  body: Bytes,
) -> Result<Json<User>, ApiError> {
  let patch: UserPatch = parse_body(&body)?;
  Ok(Json(store.update_user(id, patch)?))
}

/// `DELETE /users/:id`
pub async fn delete<S: Store>(
  State(store): State<Arc<S>>,
  Path(id): Path<UserId>,
) -> Result<StatusCode, ApiError> {
  if store.delete_user(id)? {
    tracing::info!(user = id, "user deleted");
  }
  Ok(StatusCode::NO_CONTENT)
}
