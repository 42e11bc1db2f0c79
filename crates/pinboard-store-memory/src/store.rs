//! [`MemoryStore`]: the in-memory implementation of [`Store`].

use pinboard_core::{
  Result,
  asset::{Asset, AssetId, AssetKind, AssetPatch, NewAsset},
  store::{Store, StoreStats},
  user::{NewUser, User, UserId, UserPatch},
};

use crate::{
  assets::AssetRegistry, favourites::FavouritesIndex, users::UserRegistry,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Pinboard store held entirely in process memory.
///
/// Lock order for operations spanning collections is users → assets →
/// favourites. Every guard is dropped before the operation returns.
#[derive(Debug, Default)]
pub struct MemoryStore {
  users:      UserRegistry,
  assets:     AssetRegistry,
  favourites: FavouritesIndex,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Poison the users lock by panicking in a thread that holds it.
  #[cfg(test)]
  pub(crate) fn poison_users(&self) {
    let _ = std::thread::scope(|s| {
      s.spawn(|| {
        let _guard = self.users.write();
        panic!("writer died holding the users lock");
      })
      .join()
    });
  }
}

// ─── Store impl ──────────────────────────────────────────────────────────────

impl Store for MemoryStore {
  // ── Users ─────────────────────────────────────────────────────────────────

  fn create_user(&self, input: NewUser) -> Result<UserId> {
    self.users.insert(input)
  }

  fn get_user(&self, id: UserId) -> Result<User> { self.users.get(id) }

  fn list_users(&self) -> Result<Vec<User>> { self.users.list() }

  fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User> {
    self.users.update(id, patch)
  }

  fn delete_user(&self, id: UserId) -> Result<bool> {
    let mut users = self.users.write()?;
    let mut favourites = self.favourites.write()?;
    let existed = users.remove(&id).is_some();
    let dropped = favourites.on_user_deleted(id);
    tracing::debug!(user = id, existed, dropped, "user deleted");
    Ok(existed)
  }

  // ── Assets ────────────────────────────────────────────────────────────────

  fn create_asset(&self, input: NewAsset) -> Result<AssetId> {
    self.assets.insert(input)
  }

  fn get_asset(&self, id: AssetId) -> Result<Asset> { self.assets.get(id) }

  fn list_assets(&self, kind: Option<AssetKind>) -> Result<Vec<Asset>> {
    self.assets.list(kind)
  }

  fn update_asset(&self, id: AssetId, patch: AssetPatch) -> Result<Asset> {
    self.assets.update(id, patch)
  }

  fn delete_asset(&self, id: AssetId) -> Result<bool> {
    let mut assets = self.assets.write()?;
    let mut favourites = self.favourites.write()?;
    let existed = assets.remove(&id).is_some();
    let stripped = favourites.on_asset_deleted(id);
    tracing::debug!(asset = id, existed, stripped, "asset deleted");
    Ok(existed)
  }

  // ── Favourites ────────────────────────────────────────────────────────────

  fn list_favourites(
    &self,
    user: UserId,
    kind: Option<AssetKind>,
  ) -> Result<Vec<Asset>> {
    let users = self.users.read()?;
    let assets = self.assets.read()?;
    let favourites = self.favourites.read()?;
    favourites.list(&users, &assets, user, kind)
  }

  fn add_favourite(&self, user: UserId, asset: AssetId) -> Result<()> {
    let users = self.users.read()?;
    let assets = self.assets.read()?;
    let mut favourites = self.favourites.write()?;
    favourites.add(&users, &assets, user, asset)?;
    tracing::debug!(user, asset, "favourite added");
    Ok(())
  }

  fn remove_favourite(&self, user: UserId, asset: AssetId) -> Result<bool> {
    let removed = self.favourites.write()?.remove(user, asset);
    tracing::debug!(user, asset, removed, "favourite removed");
    Ok(removed)
  }

  // ── Introspection ─────────────────────────────────────────────────────────

  fn stats(&self) -> Result<StoreStats> {
    let users = self.users.read()?;
    let assets = self.assets.read()?;
    let favourites = self.favourites.read()?;
    Ok(StoreStats {
      users:      users.len(),
      assets:     assets.len(),
      favourites: favourites.len(),
    })
  }
}
