//! Lock acquisition helpers. A poisoned lock means a writer panicked midway
//! through a mutation; it is reported as an internal inconsistency rather
//! than propagated as a panic.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use pinboard_core::Error;

pub(crate) fn read<'a, T>(
  lock: &'a RwLock<T>,
  collection: &'static str,
) -> Result<RwLockReadGuard<'a, T>, Error> {
  lock.read().map_err(|_| poisoned(collection))
}

pub(crate) fn write<'a, T>(
  lock: &'a RwLock<T>,
  collection: &'static str,
) -> Result<RwLockWriteGuard<'a, T>, Error> {
  lock.write().map_err(|_| poisoned(collection))
}

fn poisoned(collection: &'static str) -> Error {
  tracing::warn!(collection, "lock poisoned");
  Error::Internal(format!("{collection} lock poisoned"))
}

#[cfg(test)]
mod tests {
  use std::thread;

  use super::*;

  fn poison(lock: &RwLock<()>) {
    let _ = thread::scope(|s| {
      s.spawn(|| {
        let _guard = lock.write();
        panic!("writer died holding the lock");
      })
      .join()
    });
  }

  #[test]
  fn poisoned_lock_is_an_internal_error() {
    let lock = RwLock::new(());
    assert!(read(&lock, "things").is_ok());

    poison(&lock);
    assert!(lock.is_poisoned());
    assert!(matches!(
      read(&lock, "things"),
      Err(Error::Internal(m)) if m == "things lock poisoned"
    ));
    assert!(matches!(write(&lock, "things"), Err(Error::Internal(_))));
  }
}
