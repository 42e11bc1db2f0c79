//! User registry: exclusive owner of all [`User`] entities.

use std::{
  collections::HashMap,
  sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use pinboard_core::{
  Error, Result,
  user::{NewUser, User, UserId, UserPatch},
};

use crate::{IdAllocator, lock};

pub(crate) type UserMap = HashMap<UserId, User>;

const COLLECTION: &str = "users";

#[derive(Debug, Default)]
pub(crate) struct UserRegistry {
  ids:   IdAllocator,
  users: RwLock<UserMap>,
}

impl UserRegistry {
  /// Shared guard for operations that read users alongside other
  /// collections.
  pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, UserMap>> {
    lock::read(&self.users, COLLECTION)
  }

  pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, UserMap>> {
    lock::write(&self.users, COLLECTION)
  }

  pub(crate) fn get(&self, id: UserId) -> Result<User> {
    self.read()?.get(&id).cloned().ok_or(Error::UserNotFound(id))
  }

  pub(crate) fn list(&self) -> Result<Vec<User>> {
    Ok(self.read()?.values().cloned().collect())
  }

  pub(crate) fn insert(&self, input: NewUser) -> Result<UserId> {
    input.validate()?;
    let mut users = self.write()?;
    let id = self.ids.next();
    users.insert(id, input.into_user(id));
    tracing::debug!(user = id, "user created");
    Ok(id)
  }

  pub(crate) fn update(&self, id: UserId, patch: UserPatch) -> Result<User> {
    let mut users = self.write()?;
    let user = users.get_mut(&id).ok_or(Error::UserNotFound(id))?;
    user.merge(patch);
    Ok(user.clone())
  }
}
