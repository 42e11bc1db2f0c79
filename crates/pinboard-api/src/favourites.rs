//! Handlers for `/users/:id/favourites` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/users/:id/favourites` | Optional `type`, `page`, `limit`; insertion order |
//! | `PUT`    | `/users/:id/favourites/:asset_id` | 409 if already a favourite |
//! | `DELETE` | `/users/:id/favourites/:asset_id` | Idempotent |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
};
use pinboard_core::{
  asset::{Asset, AssetId, AssetKind},
  store::Store,
  user::UserId,
};

use crate::{
  error::ApiError,
  extract::{Path, Query},
  page::{Page, TypeFilter},
};

/// `GET /users/:id/favourites[?type=..][&page=..][&limit=..]`
pub async fn list<S: Store>(
  State(store): State<Arc<S>>,
  Path(user): Path<UserId>,
  Query(filter): Query<TypeFilter>,
  Query(page): Query<Page>,
) -> Result<Json<Vec<Asset>>, ApiError> {
  let kind = AssetKind::parse_filter(&filter.kind)?;
  let assets = store.list_favourites(user, kind)?;
  tracing::debug!(user, count = assets.len(), "favourites listed");
  Ok(Json(page.apply(assets)))
}

/// `PUT /users/:id/favourites/:asset_id`
pub async fn add<S: Store>(
  State(store): State<Arc<S>>,
  Path((user, asset)): Path<(UserId, AssetId)>,
) -> Result<StatusCode, ApiError> {
  store.add_favourite(user, asset)?;
  Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /users/:id/favourites/:asset_id`
pub async fn remove<S: Store>(
  State(store): State<Arc<S>>,
  Path((user, asset)): Path<(UserId, AssetId)>,
) -> Result<StatusCode, ApiError> {
  store.remove_favourite(user, asset)?;
  Ok(StatusCode::NO_CONTENT)
}
