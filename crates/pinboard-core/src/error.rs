//! Error types for `pinboard-core`.

use thiserror::Error;

use crate::{asset::AssetId, user::UserId};

#[derive(Debug, Error)]
pub enum Error {
  #[error("user {0} does not exist")]
  UserNotFound(UserId),

  #[error("asset {0} does not exist")]
  AssetNotFound(AssetId),

  #[error("asset {asset} is already a favourite of user {user}")]
  AlreadyFavourite { user: UserId, asset: AssetId },

  /// Malformed payload, unknown type tag, invalid enum value, type/variant
  /// mismatch or a missing required field.
  #[error("{0}")]
  Validation(String),

  /// A broken internal invariant (poisoned lock, dangling reference).
  #[error("internal inconsistency: {0}")]
  Internal(String),
}

/// Coarse classification of [`Error`], used by serving layers to pick a
/// status code without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  NotFound,
  AlreadyExists,
  Validation,
  Internal,
}

impl Error {
  pub fn validation(message: impl Into<String>) -> Self {
    Self::Validation(message.into())
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::UserNotFound(_) | Self::AssetNotFound(_) => ErrorKind::NotFound,
      Self::AlreadyFavourite { .. } => ErrorKind::AlreadyExists,
      Self::Validation(_) => ErrorKind::Validation,
      Self::Internal(_) => ErrorKind::Internal,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
