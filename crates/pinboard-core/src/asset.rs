//! Asset types: an envelope carrying one of three payload variants.
//!
//! The variant is the single source of truth for an asset's type: a stored
//! [`Asset`] derives its [`AssetKind`] from its [`AssetPayload`], so the two
//! can never disagree. Inputs ([`NewAsset`], [`AssetPatch`]) carry a
//! separately declared kind and are checked against the payload before they
//! reach a store.

use std::{fmt, str::FromStr};

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{Error, Result};

pub type AssetId = u64;

// ─── Kind ────────────────────────────────────────────────────────────────────

/// The type tag of an asset; also the `type` field of the wire envelope.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AssetKind {
  Chart,
  Insight,
  Audience,
}

impl AssetKind {
  /// Parse a list filter, where the empty string means "no filter".
  pub fn parse_filter(s: &str) -> Result<Option<Self>> {
    if s.is_empty() {
      return Ok(None);
    }
    s.parse()
      .map(Some)
      .map_err(|_| Error::validation(format!("unknown asset type: {s}")))
  }
}

// ─── Audience sub-types ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Option<String>", into = "String")]
pub enum Gender {
  Male,
  Female,
  /// Encoded as the empty string.
  #[default]
  Unspecified,
}

impl Gender {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Male => "male",
      Self::Female => "female",
      Self::Unspecified => "",
    }
  }
}

impl FromStr for Gender {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "male" => Ok(Self::Male),
      "female" => Ok(Self::Female),
      "" => Ok(Self::Unspecified),
      other => Err(Error::validation(format!("unknown gender: {other}"))),
    }
  }
}

/// `null` reads as [`Gender::Unspecified`], like the empty string.
impl TryFrom<Option<String>> for Gender {
  type Error = Error;

  fn try_from(s: Option<String>) -> Result<Self> {
    s.as_deref().unwrap_or_default().parse()
  }
}

impl From<Gender> for String {
  fn from(g: Gender) -> Self { g.as_str().to_owned() }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgeGroup {
  pub min: u8,
  pub max: u8,
}

impl fmt::Display for AgeGroup {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}", self.min, self.max)
  }
}

// ─── Payload variants ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Chart {
  pub title:        String,
  pub title_axis_x: String,
  pub title_axis_y: String,
  /// Raw chart content; base64 on the wire.
  #[serde(with = "crate::codec::base64_bytes")]
  pub data:         Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Insight {
  pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Audience {
  pub gender:                   Gender,
  pub birth_country:            String,
  pub social_media_hours_usage: u8,
  pub age_group:                AgeGroup,
}

impl Chart {
  fn merge(&mut self, patch: Chart) {
    if !patch.title.is_empty() {
      self.title = patch.title;
    }
    if !patch.title_axis_x.is_empty() {
      self.title_axis_x = patch.title_axis_x;
    }
    if !patch.title_axis_y.is_empty() {
      self.title_axis_y = patch.title_axis_y;
    }
    if !patch.data.is_empty() {
      self.data = patch.data;
    }
  }
}

impl Insight {
  fn merge(&mut self, patch: Insight) {
    if !patch.text.is_empty() {
      self.text = patch.text;
    }
  }
}

impl Audience {
  fn merge(&mut self, patch: Audience) {
    if patch.gender != Gender::Unspecified {
      self.gender = patch.gender;
    }
    if !patch.birth_country.is_empty() {
      self.birth_country = patch.birth_country;
    }
    if patch.social_media_hours_usage != 0 {
      self.social_media_hours_usage = patch.social_media_hours_usage;
    }
    if patch.age_group.min != 0 {
      self.age_group.min = patch.age_group.min;
    }
    if patch.age_group.max != 0 {
      self.age_group.max = patch.age_group.max;
    }
  }
}

/// The typed payload of an asset. Decoding and encoding are dispatched on
/// the envelope's `type` field by [`crate::codec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetPayload {
  Chart(Chart),
  Insight(Insight),
  Audience(Audience),
}

impl AssetPayload {
  pub fn kind(&self) -> AssetKind {
    match self {
      Self::Chart(_) => AssetKind::Chart,
      Self::Insight(_) => AssetKind::Insight,
      Self::Audience(_) => AssetKind::Audience,
    }
  }

  /// Merge the non-default fields of `patch` into `self`. Both must be the
  /// same variant.
  fn merge(&mut self, patch: AssetPayload) -> Result<()> {
    match (self, patch) {
      (Self::Chart(old), Self::Chart(new)) => old.merge(new),
      (Self::Insight(old), Self::Insight(new)) => old.merge(new),
      (Self::Audience(old), Self::Audience(new)) => old.merge(new),
      (old, new) => {
        return Err(mismatch(old.kind(), new.kind()));
      }
    }
    Ok(())
  }
}

fn mismatch(stored: AssetKind, requested: AssetKind) -> Error {
  Error::validation(format!(
    "cannot change asset type from {stored} to {requested}"
  ))
}

// ─── Asset ───────────────────────────────────────────────────────────────────

/// A stored asset. Serialised through the envelope encoder in
/// [`crate::codec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
  pub id:          AssetId,
  pub description: String,
  pub payload:     AssetPayload,
}

impl Asset {
  pub fn kind(&self) -> AssetKind { self.payload.kind() }

  /// Apply a partial update. Checks run before anything is written, so a
  /// rejected patch leaves the asset untouched.
  pub fn apply(&mut self, patch: AssetPatch) -> Result<()> {
    let stored = self.kind();
    if let Some(kind) = patch.kind
      && kind != stored
    {
      return Err(mismatch(stored, kind));
    }
    if let Some(payload) = &patch.payload
      && payload.kind() != stored
    {
      return Err(mismatch(stored, payload.kind()));
    }

    if let Some(description) = patch.description.filter(|d| !d.is_empty()) {
      self.description = description;
    }
    if let Some(payload) = patch.payload {
      self.payload.merge(payload)?;
    }
    Ok(())
  }
}

/// Input to [`crate::store::Store::create_asset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAsset {
  /// The declared type tag; must match the payload variant.
  pub kind:        AssetKind,
  pub description: String,
  pub payload:     AssetPayload,
}

impl NewAsset {
  /// Build an input whose declared kind is taken from the payload.
  pub fn new(description: impl Into<String>, payload: AssetPayload) -> Self {
    Self {
      kind: payload.kind(),
      description: description.into(),
      payload,
    }
  }

  pub fn validate(&self) -> Result<()> {
    if self.kind != self.payload.kind() {
      return Err(Error::validation(format!(
        "incompatible asset type {} and {} data",
        self.kind,
        self.payload.kind()
      )));
    }
    Ok(())
  }

  pub fn into_asset(self, id: AssetId) -> Asset {
    Asset {
      id,
      description: self.description,
      payload: self.payload,
    }
  }
}

/// Partial update for an [`Asset`]. `None`, empty and zero-valued fields are
/// left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetPatch {
  pub kind:        Option<AssetKind>,
  pub description: Option<String>,
  pub payload:     Option<AssetPayload>,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn chart_asset() -> Asset {
    NewAsset::new(
      "d1",
      AssetPayload::Chart(Chart {
        title:        "t".into(),
        title_axis_x: "x".into(),
        title_axis_y: "y".into(),
        data:         Bytes::from_static(b"some data"),
      }),
    )
    .into_asset(1)
  }

  #[test]
  fn kind_parses_and_displays_lowercase() {
    assert_eq!("audience".parse::<AssetKind>().unwrap(), AssetKind::Audience);
    assert_eq!(AssetKind::Chart.to_string(), "chart");
    assert!("Chart".parse::<AssetKind>().is_err());
  }

  #[test]
  fn parse_filter_treats_empty_as_none() {
    assert_eq!(AssetKind::parse_filter("").unwrap(), None);
    assert_eq!(
      AssetKind::parse_filter("insight").unwrap(),
      Some(AssetKind::Insight)
    );
    assert!(matches!(
      AssetKind::parse_filter("video"),
      Err(Error::Validation(_))
    ));
  }

  #[test]
  fn new_asset_rejects_declared_kind_mismatch() {
    let mut input =
      NewAsset::new("", AssetPayload::Insight(Insight { text: "x".into() }));
    assert!(input.validate().is_ok());
    input.kind = AssetKind::Chart;
    assert!(matches!(input.validate(), Err(Error::Validation(_))));
  }

  #[test]
  fn description_only_patch_leaves_payload_untouched() {
    let mut asset = chart_asset();
    let before = asset.payload.clone();
    asset
      .apply(AssetPatch {
        description: Some("Updated desc".into()),
        ..Default::default()
      })
      .unwrap();
    assert_eq!(asset.description, "Updated desc");
    assert_eq!(asset.payload, before);
  }

  #[test]
  fn chart_patch_merges_only_non_empty_fields() {
    let mut asset = chart_asset();
    asset
      .apply(AssetPatch {
        kind: Some(AssetKind::Chart),
        payload: Some(AssetPayload::Chart(Chart {
          title: "new title".into(),
          ..Default::default()
        })),
        ..Default::default()
      })
      .unwrap();
    let AssetPayload::Chart(chart) = &asset.payload else {
      panic!("variant changed");
    };
    assert_eq!(chart.title, "new title");
    assert_eq!(chart.title_axis_x, "x");
    assert_eq!(chart.data, Bytes::from_static(b"some data"));
    assert_eq!(asset.description, "d1");
  }

  #[test]
  fn audience_patch_ignores_zero_values() {
    let mut asset = NewAsset::new(
      "",
      AssetPayload::Audience(Audience {
        gender:                   Gender::Female,
        birth_country:            "Greece".into(),
        social_media_hours_usage: 3,
        age_group:                AgeGroup { min: 20, max: 30 },
      }),
    )
    .into_asset(4);
    asset
      .apply(AssetPatch {
        payload: Some(AssetPayload::Audience(Audience {
          age_group: AgeGroup { min: 0, max: 40 },
          ..Default::default()
        })),
        ..Default::default()
      })
      .unwrap();
    let AssetPayload::Audience(audience) = &asset.payload else {
      panic!("variant changed");
    };
    assert_eq!(audience.gender, Gender::Female);
    assert_eq!(audience.social_media_hours_usage, 3);
    assert_eq!(audience.age_group, AgeGroup { min: 20, max: 40 });
  }

  #[test]
  fn variant_mismatch_is_rejected_without_side_effects() {
    let mut asset = chart_asset();
    let before = asset.clone();
    let err = asset
      .apply(AssetPatch {
        description: Some("should not land".into()),
        payload: Some(AssetPayload::Insight(Insight { text: "x".into() })),
        ..Default::default()
      })
      .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(asset, before);

    let err = asset
      .apply(AssetPatch {
        kind: Some(AssetKind::Audience),
        ..Default::default()
      })
      .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
  }

  #[test]
  fn unknown_gender_is_rejected() {
    assert!("male".parse::<Gender>().is_ok());
    assert_eq!("".parse::<Gender>().unwrap(), Gender::Unspecified);
    assert!(matches!(
      "unknown".parse::<Gender>(),
      Err(Error::Validation(_))
    ));
  }
}
