//! Asset registry: exclusive owner of all [`Asset`] entities.

use std::{
  collections::HashMap,
  sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use pinboard_core::{
  Error, Result,
  asset::{Asset, AssetId, AssetKind, AssetPatch, NewAsset},
};

use crate::{IdAllocator, lock};

pub(crate) type AssetMap = HashMap<AssetId, Asset>;

const COLLECTION: &str = "assets";

#[derive(Debug, Default)]
pub(crate) struct AssetRegistry {
  ids:    IdAllocator,
  assets: RwLock<AssetMap>,
}

impl AssetRegistry {
  pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, AssetMap>> {
    lock::read(&self.assets, COLLECTION)
  }

  pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, AssetMap>> {
    lock::write(&self.assets, COLLECTION)
  }

  pub(crate) fn get(&self, id: AssetId) -> Result<Asset> {
    self.read()?.get(&id).cloned().ok_or(Error::AssetNotFound(id))
  }

  pub(crate) fn list(&self, kind: Option<AssetKind>) -> Result<Vec<Asset>> {
    let assets = self.read()?;
    Ok(
      assets
        .values()
        .filter(|a| kind.is_none_or(|k| a.kind() == k))
        .cloned()
        .collect(),
    )
  }

  pub(crate) fn insert(&self, input: NewAsset) -> Result<AssetId> {
    input.validate()?;
    let mut assets = self.write()?;
    let id = self.ids.next();
    let asset = input.into_asset(id);
    tracing::debug!(asset = id, kind = %asset.kind(), "asset created");
    assets.insert(id, asset);
    Ok(id)
  }

  pub(crate) fn update(&self, id: AssetId, patch: AssetPatch) -> Result<Asset> {
    let mut assets = self.write()?;
    let asset = assets.get_mut(&id).ok_or(Error::AssetNotFound(id))?;
    asset.apply(patch)?;
    Ok(asset.clone())
  }
}
