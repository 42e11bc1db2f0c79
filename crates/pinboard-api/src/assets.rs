//! Handlers for `/assets` endpoints.
//!
//! Request bodies are handed to [`pinboard_core::codec`] as raw bytes so the
//! two-phase envelope decode decides how `data` is read.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/assets` | Optional `type`, `page`, `limit` |
//! | `POST`   | `/assets` | Body: `{"type":..,"description":..,"data":{..}}`; returns 201 + `{"id":n}` |
//! | `GET`    | `/assets/:id` | 404 if not found |
//! | `PUT`    | `/assets/:id` | Partial envelope; returns the merged asset |
//! | `DELETE` | `/assets/:id` | Idempotent; strips the asset from all favourites |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use bytes::Bytes;
use pinboard_core::{
  asset::{Asset, AssetId, AssetKind},
  codec,
  store::Store,
};
use serde_json::json;

use crate::{
  error::ApiError,
  extract::{Path, Query},
  page::{Page, TypeFilter},
};

/// `GET /assets[?type=..][&page=..][&limit=..]`
pub async fn list<S: Store>(
  State(store): State<Arc<S>>,
  Query(filter): Query<TypeFilter>,
  Query(page): Query<Page>,
) -> Result<Json<Vec<Asset>>, ApiError> {
  let kind = AssetKind::parse_filter(&filter.kind)?;
  let assets = store.list_assets(kind)?;
  Ok(Json(page.apply(assets)))
}

/// `POST /assets`
pub async fn create<S: Store>(
  State(store): State<Arc<S>>,
  body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
  let input = codec::decode_asset(&body)?;
  let id = store.create_asset(input)?;
  tracing::info!(asset = id, "asset created");
  Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// `GET /assets/:id`
pub async fn get_one<S: Store>(
  State(store): State<Arc<S>>,
  Path(id): Path<AssetId>,
) -> Result<Json<Asset>, ApiError> {
  Ok(Json(store.get_asset(id)?))
}

/// `PUT /assets/:id`
pub async fn update<S: Store>(
  State(store): State<Arc<S>>,
  Path(id): Path<AssetId>,
  body: Bytes,
) -> Result<Json<Asset>, ApiError> {
  let patch = codec::decode_patch(&body)?;
  Ok(Json(store.update_asset(id, patch)?))
}

/// `DELETE /assets/:id`
pub async fn delete<S: Store>(
  State(store): State<Arc<S>>,
  Path(id): Path<AssetId>,
) -> Result<StatusCode, ApiError> {
  if store.delete_asset(id)? {
    tracing::info!(asset = id, "asset deleted");
  }
  Ok(StatusCode::NO_CONTENT)
}
