//! User entity and its creation/update inputs.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub type UserId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id:    UserId,
  pub email: String,
  pub name:  String,
}

/// Input to [`crate::store::Store::create_user`]. The id is always assigned
/// by the store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub name:  String,
}

impl NewUser {
  pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      email: email.into(),
      name:  name.into(),
    }
  }

  pub fn validate(&self) -> Result<()> {
    if self.email.is_empty() {
      return Err(Error::validation("email missing"));
    }
    if self.name.is_empty() {
      return Err(Error::validation("name missing"));
    }
    Ok(())
  }

  pub fn into_user(self, id: UserId) -> User {
    User {
      id,
      email: self.email,
      name: self.name,
    }
  }
}

/// Partial update for a [`User`]. Absent and empty fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
  pub email: Option<String>,
  pub name:  Option<String>,
}

impl User {
  /// Overwrite fields with the non-empty fields of `patch`.
  pub fn merge(&mut self, patch: UserPatch) {
    if let Some(email) = patch.email.filter(|e| !e.is_empty()) {
      self.email = email;
    }
    if let Some(name) = patch.name.filter(|n| !n.is_empty()) {
      self.name = name;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn validate_rejects_empty_fields() {
    assert!(NewUser::new("", "Jo").validate().is_err());
    assert!(NewUser::new("jo@x.com", "").validate().is_err());
    assert!(NewUser::new("jo@x.com", "Jo").validate().is_ok());
  }

  #[test]
  fn merge_skips_empty_fields() {
    let mut user = NewUser::new("jo@x.com", "Jo").into_user(7);
    user.merge(UserPatch {
      email: Some(String::new()),
      name:  Some("Joanna".into()),
    });
    assert_eq!(user.id, 7);
    assert_eq!(user.email, "jo@x.com");
    assert_eq!(user.name, "Joanna");

    user.merge(UserPatch::default());
    assert_eq!(user.name, "Joanna");
  }
}
