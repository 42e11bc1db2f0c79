//! The `Store` trait: the operation set the serving layer consumes.
//!
//! Implemented by storage engines (e.g. `pinboard-store-memory`). Every
//! operation is synchronous and bounded; implementations may block on lock
//! acquisition but never suspend. Reads return owned snapshots, so callers
//! can serialise results without holding any engine lock.

use serde::Serialize;

use crate::{
  Result,
  asset::{Asset, AssetId, AssetKind, AssetPatch, NewAsset},
  user::{NewUser, User, UserId, UserPatch},
};

/// Entity counts taken from one consistent view of all three collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
  pub users:      usize,
  pub assets:     usize,
  /// Total favourite pairs across all users.
  pub favourites: usize,
}

pub trait Store: Send + Sync {
  // ── Users ─────────────────────────────────────────────────────────────

  /// Validate and insert a user, returning its newly allocated id.
  fn create_user(&self, input: NewUser) -> Result<UserId>;

  fn get_user(&self, id: UserId) -> Result<User>;

  /// Snapshot of all users, in no particular order.
  fn list_users(&self) -> Result<Vec<User>>;

  /// Merge the non-empty fields of `patch` and return the updated user.
  fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User>;

  /// Remove a user together with their favourites. Idempotent; returns
  /// whether the user existed.
  fn delete_user(&self, id: UserId) -> Result<bool>;

  // ── Assets ────────────────────────────────────────────────────────────

  /// Validate and insert an asset, returning its newly allocated id.
  fn create_asset(&self, input: NewAsset) -> Result<AssetId>;

  fn get_asset(&self, id: AssetId) -> Result<Asset>;

  /// Snapshot of all assets, restricted to `kind` when given.
  fn list_assets(&self, kind: Option<AssetKind>) -> Result<Vec<Asset>>;

  /// Merge a same-variant patch and return the updated asset.
  fn update_asset(&self, id: AssetId, patch: AssetPatch) -> Result<Asset>;

  /// Remove an asset and strip it from every user's favourites. Idempotent;
  /// returns whether the asset existed.
  fn delete_asset(&self, id: AssetId) -> Result<bool>;

  // ── Favourites ────────────────────────────────────────────────────────

  /// The user's favourite assets in insertion order, restricted to `kind`
  /// when given.
  fn list_favourites(
    &self,
    user: UserId,
    kind: Option<AssetKind>,
  ) -> Result<Vec<Asset>>;

  fn add_favourite(&self, user: UserId, asset: AssetId) -> Result<()>;

  /// Idempotent; returns whether the pair existed.
  fn remove_favourite(&self, user: UserId, asset: AssetId) -> Result<bool>;

  // ── Introspection ─────────────────────────────────────────────────────

  fn stats(&self) -> Result<StoreStats>;
}
