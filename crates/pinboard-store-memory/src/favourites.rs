//! Favourites index: the user → asset relation.
//!
//! The index holds ids only and is never authoritative for whether a user or
//! an asset exists. Operations that need to check foreign keys take the
//! registries' maps by reference; those references can only be obtained from
//! a guard, so the caller necessarily holds the matching locks.

use std::{
  collections::HashMap,
  sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use pinboard_core::{
  Error, Result,
  asset::{Asset, AssetId, AssetKind},
  user::UserId,
};

use crate::{assets::AssetMap, lock, users::UserMap};

const COLLECTION: &str = "favourites";

#[derive(Debug, Default)]
pub(crate) struct FavouritesIndex {
  inner: RwLock<Favourites>,
}

impl FavouritesIndex {
  pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, Favourites>> {
    lock::read(&self.inner, COLLECTION)
  }

  pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, Favourites>> {
    lock::write(&self.inner, COLLECTION)
  }
}

/// Per-user favourite asset ids in insertion order, without duplicates.
#[derive(Debug, Default)]
pub(crate) struct Favourites {
  by_user: HashMap<UserId, Vec<AssetId>>,
}

impl Favourites {
  /// Append `asset` to `user`'s favourites.
  ///
  /// complexity: O(n), where n = number of favourites of `user`
  pub(crate) fn add(
    &mut self,
    users: &UserMap,
    assets: &AssetMap,
    user: UserId,
    asset: AssetId,
  ) -> Result<()> {
    if !users.contains_key(&user) {
      return Err(Error::UserNotFound(user));
    }
    if !assets.contains_key(&asset) {
      return Err(Error::AssetNotFound(asset));
    }
    let ids = self.by_user.entry(user).or_default();
    if ids.contains(&asset) {
      return Err(Error::AlreadyFavourite { user, asset });
    }
    ids.push(asset);
    Ok(())
  }

  /// Remove the pair if present, keeping the remaining ids in order.
  ///
  /// complexity: O(n), where n = number of favourites of `user`
  pub(crate) fn remove(&mut self, user: UserId, asset: AssetId) -> bool {
    let Some(ids) = self.by_user.get_mut(&user) else {
      return false;
    };
    match ids.iter().position(|&id| id == asset) {
      Some(i) => {
        ids.remove(i);
        true
      }
      None => false,
    }
  }

  /// Resolve `user`'s favourites against the asset map.
  pub(crate) fn list(
    &self,
    users: &UserMap,
    assets: &AssetMap,
    user: UserId,
    kind: Option<AssetKind>,
  ) -> Result<Vec<Asset>> {
    if !users.contains_key(&user) {
      return Err(Error::UserNotFound(user));
    }
    let Some(ids) = self.by_user.get(&user) else {
      return Ok(Vec::new());
    };

    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
      let asset = assets.get(id).ok_or_else(|| {
        Error::Internal(format!(
          "favourites of user {user} reference missing asset {id}"
        ))
      })?;
      if kind.is_none_or(|k| asset.kind() == k) {
        out.push(asset.clone());
      }
    }
    Ok(out)
  }

  /// Strip `asset` from every user's favourites. Returns how many
  /// references were removed.
  pub(crate) fn on_asset_deleted(&mut self, asset: AssetId) -> usize {
    self
      .by_user
      .values_mut()
      .map(|ids| {
        let before = ids.len();
        ids.retain(|&id| id != asset);
        before - ids.len()
      })
      .sum()
  }

  /// Drop `user`'s favourites entirely. Returns how many were dropped.
  pub(crate) fn on_user_deleted(&mut self, user: UserId) -> usize {
    self.by_user.remove(&user).map_or(0, |ids| ids.len())
  }

  /// Total number of favourite pairs.
  pub(crate) fn len(&self) -> usize { self.by_user.values().map(Vec::len).sum() }
}
