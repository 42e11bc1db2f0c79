//! JSON REST API for Pinboard.
//!
//! Exposes an axum [`Router`] backed by any [`pinboard_core::store::Store`].
//! Auth, rate limiting and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .merge(pinboard_api::api_router(store.clone()))
//! ```

pub mod assets;
pub mod error;
pub mod extract;
pub mod favourites;
pub mod page;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, put},
};
use pinboard_core::store::Store;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be merged into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: Store + 'static,
{
  Router::new()
    // Users
    .route("/users", get(users::list::<S>).post(users::create::<S>))
    .route(
      "/users/{id}",
      get(users::get_one::<S>)
        .put(users::update::<S>)
        .delete(users::delete::<S>),
    )
    // Favourites
    .route("/users/{id}/favourites", get(favourites::list::<S>))
    .route(
      "/users/{id}/favourites/{asset_id}",
      put(favourites::add::<S>).delete(favourites::remove::<S>),
    )
    // Assets
    .route("/assets", get(assets::list::<S>).post(assets::create::<S>))
    .route(
      "/assets/{id}",
      get(assets::get_one::<S>)
        .put(assets::update::<S>)
        .delete(assets::delete::<S>),
    )
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use pinboard_store_memory::MemoryStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn oneshot(
    store: &Arc<MemoryStore>,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(v) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(v.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    api_router(store.clone()).oneshot(req).await.unwrap()
  }

  async fn json_body(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  async fn create(store: &Arc<MemoryStore>, uri: &str, body: Value) -> u64 {
    let resp = oneshot(store, "POST", uri, Some(body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    json_body(resp).await["id"].as_u64().unwrap()
  }

  // ── Users ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_get_update_delete_user() {
    let store = Arc::new(MemoryStore::new());
    let id = create(&store, "/users", json!({"name":"Jo","email":"jo@x.com"})).await;
    assert_eq!(id, 1);

    let resp = oneshot(&store, "GET", "/users/1", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
      json_body(resp).await,
      json!({"id":1,"email":"jo@x.com","name":"Jo"})
    );

    let resp = oneshot(&store, "PUT", "/users/1", Some(json!({"name":"Joanna"}))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["name"], "Joanna");

    let resp = oneshot(&store, "DELETE", "/users/1", None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = oneshot(&store, "DELETE", "/users/1", None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = oneshot(&store, "GET", "/users/1", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(json_body(resp).await["error"].is_string());
  }

  #[tokio::test]
  async fn invalid_user_is_bad_request() {
    let store = Arc::new(MemoryStore::new());
    let resp = oneshot(&store, "POST", "/users", Some(json!({"name":"Jo"}))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = oneshot(&store, "GET", "/users/abc", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(resp).await["error"].is_string());

    let resp = oneshot(&store, "PUT", "/users/1/favourites/x", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(resp).await["error"].is_string());
  }

  // ── Assets ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn asset_round_trip_with_audience_string() {
    let store = Arc::new(MemoryStore::new());
    let id = create(
      &store,
      "/assets",
      json!({
        "type": "audience",
        "description": "aud",
        "data": {
          "gender": "female",
          "birthCountry": "Greece",
          "socialMediaHoursUsage": 3,
          "ageGroup": {"min": 18, "max": 24}
        }
      }),
    )
    .await;

    let resp = oneshot(&store, "GET", &format!("/assets/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["type"], "audience");
    assert_eq!(
      body["data"]["string"],
      "Females born in Greece in the age group of 18-24 spent 3 hours on social media"
    );
  }

  #[tokio::test]
  async fn unknown_asset_type_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let resp = oneshot(
      &store,
      "POST",
      "/assets",
      Some(json!({"type":"video","data":{}})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = oneshot(&store, "GET", "/assets?type=video", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = oneshot(&store, "GET", "/assets", None).await;
    assert_eq!(json_body(resp).await, json!([]));
  }

  #[tokio::test]
  async fn list_assets_by_type() {
    let store = Arc::new(MemoryStore::new());
    create(&store, "/assets", json!({"type":"insight","data":{"text":"a"}})).await;
    create(&store, "/assets", json!({"type":"chart","data":{"title":"b"}})).await;
    create(&store, "/assets", json!({"type":"insight","data":{"text":"c"}})).await;

    let resp = oneshot(&store, "GET", "/assets?type=insight", None).await;
    let body = json_body(resp).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|a| a["type"] == "insight"));

    let resp = oneshot(&store, "GET", "/assets?type=", None).await;
    assert_eq!(json_body(resp).await.as_array().unwrap().len(), 3);
  }

  #[tokio::test]
  async fn update_asset_with_other_variant_is_bad_request() {
    let store = Arc::new(MemoryStore::new());
    let id = create(&store, "/assets", json!({"type":"insight","data":{"text":"a"}})).await;

    let resp = oneshot(
      &store,
      "PUT",
      &format!("/assets/{id}"),
      Some(json!({"type":"chart","data":{"title":"x"}})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = oneshot(
      &store,
      "PUT",
      &format!("/assets/{id}"),
      Some(json!({"description":"renamed"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["description"], "renamed");
    assert_eq!(body["data"]["text"], "a");

    let resp = oneshot(
      &store,
      "PUT",
      "/assets/999",
      Some(json!({"description":"renamed"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Favourites ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn favourites_flow() {
    let store = Arc::new(MemoryStore::new());
    create(&store, "/users", json!({"name":"Jo","email":"jo@x.com"})).await;
    create(
      &store,
      "/assets",
      json!({"type":"chart","description":"d1","data":{"title":"t"}}),
    )
    .await;

    let resp = oneshot(&store, "PUT", "/users/1/favourites/1", None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = oneshot(&store, "PUT", "/users/1/favourites/1", None).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = oneshot(&store, "PUT", "/users/1/favourites/2", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = oneshot(&store, "GET", "/users/1/favourites", None).await;
    let body = json_body(resp).await;
    assert_eq!(body[0]["id"], 1);
    assert_eq!(body[0]["type"], "chart");
    assert_eq!(body[0]["description"], "d1");

    let resp = oneshot(&store, "GET", "/users/1/favourites?type=insight", None).await;
    assert_eq!(json_body(resp).await, json!([]));

    let resp = oneshot(&store, "DELETE", "/assets/1", None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = oneshot(&store, "GET", "/users/1/favourites", None).await;
    assert_eq!(json_body(resp).await, json!([]));

    let resp = oneshot(&store, "GET", "/users/2/favourites", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn favourites_are_paged() {
    let store = Arc::new(MemoryStore::new());
    let user = pinboard_store_memory::seed(store.as_ref(), 1500).unwrap();

    let uri = format!("/users/{user}/favourites?page=1");
    let resp = oneshot(&store, "GET", &uri, None).await;
    assert_eq!(json_body(resp).await.as_array().unwrap().len(), 500);

    let uri = format!("/users/{user}/favourites?page=0&limit=10");
    let resp = oneshot(&store, "GET", &uri, None).await;
    assert_eq!(json_body(resp).await.as_array().unwrap().len(), 10);

    let uri = format!("/users/{user}/favourites?limit=-1");
    let resp = oneshot(&store, "GET", &uri, None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(resp).await["error"].is_string());
  }

  #[tokio::test]
  async fn removing_favourite_is_idempotent() {
    let store = Arc::new(MemoryStore::new());
    create(&store, "/users", json!({"name":"Jo","email":"jo@x.com"})).await;
    create(&store, "/assets", json!({"type":"insight","data":{"text":"a"}})).await;
    oneshot(&store, "PUT", "/users/1/favourites/1", None).await;

    for _ in 0..2 {
      let resp = oneshot(&store, "DELETE", "/users/1/favourites/1", None).await;
      assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }
    let resp = oneshot(&store, "GET", "/users/1/favourites", None).await;
    assert_eq!(json_body(resp).await, json!([]));
  }
}
