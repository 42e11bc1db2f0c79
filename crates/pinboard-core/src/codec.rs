//! JSON codec for the asset envelope `{id, type, description, data}`.
//!
//! Decoding is two-phase: the envelope is parsed first with `data` kept as an
//! undecoded [`serde_json::Value`], then the value is decoded into the
//! variant selected by `type`. Encoding dispatches on the payload variant and
//! attaches derived presentation fields (the audience `string`), which are
//! never stored.

use serde::{
  Deserialize, Serialize, Serializer,
  ser::SerializeStruct,
};
use serde_json::Value;

use crate::{
  Error, Result,
  asset::{
    AssetKind, AssetPatch, AssetPayload, Audience, Chart, Gender, Insight,
    NewAsset,
  },
};

// ─── Decode ──────────────────────────────────────────────────────────────────

/// Phase one: the envelope with the payload left raw. An `id` field is
/// ignored; ids are always store-assigned.
#[derive(Debug, Deserialize)]
struct RawEnvelope {
  #[serde(rename = "type", default)]
  kind:        Option<String>,
  #[serde(default)]
  description: Option<String>,
  #[serde(default)]
  data:        Option<Value>,
}

fn parse_envelope(body: &[u8]) -> Result<RawEnvelope> {
  serde_json::from_slice(body)
    .map_err(|e| Error::validation(format!("malformed asset: {e}")))
}

fn parse_kind(tag: &str) -> Result<AssetKind> {
  tag
    .parse()
    .map_err(|_| Error::validation(format!("unknown asset type: {tag}")))
}

/// Phase two: decode the raw payload into the variant selected by `kind`.
pub fn decode_payload(kind: AssetKind, data: Value) -> Result<AssetPayload> {
  let payload = match kind {
    AssetKind::Chart => serde_json::from_value::<Chart>(data).map(AssetPayload::Chart),
    AssetKind::Insight => {
      serde_json::from_value::<Insight>(data).map(AssetPayload::Insight)
    }
    AssetKind::Audience => {
      serde_json::from_value::<Audience>(data).map(AssetPayload::Audience)
    }
  };
  payload.map_err(|e| Error::validation(format!("invalid {kind} data: {e}")))
}

/// Decode a create request. `type` and `data` are both required.
pub fn decode_asset(body: &[u8]) -> Result<NewAsset> {
  let raw = parse_envelope(body)?;
  let tag = raw
    .kind
    .filter(|t| !t.is_empty())
    .ok_or_else(|| Error::validation("missing asset type"))?;
  let kind = parse_kind(&tag)?;
  let data = raw
    .data
    .ok_or_else(|| Error::validation("missing asset data"))?;

  Ok(NewAsset {
    kind,
    description: raw.description.unwrap_or_default(),
    payload: decode_payload(kind, data)?,
  })
}

/// Decode an update request. Every field is optional, but `data` can only be
/// interpreted alongside a `type`.
pub fn decode_patch(body: &[u8]) -> Result<AssetPatch> {
  let raw = parse_envelope(body)?;
  let kind = raw
    .kind
    .filter(|t| !t.is_empty())
    .map(|t| parse_kind(&t))
    .transpose()?;

  let payload = match (kind, raw.data) {
    (Some(kind), Some(data)) => Some(decode_payload(kind, data)?),
    (None, Some(_)) => {
      return Err(Error::validation("asset data requires a type"));
    }
    (_, None) => None,
  };

  Ok(AssetPatch {
    kind,
    description: raw.description,
    payload,
  })
}

// ─── Encode ──────────────────────────────────────────────────────────────────

impl Serialize for crate::asset::Asset {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut envelope = serializer.serialize_struct("Asset", 4)?;
    envelope.serialize_field("id", &self.id)?;
    envelope.serialize_field("type", &self.kind())?;
    envelope.serialize_field("description", &self.description)?;
    envelope.serialize_field("data", &EncodedPayload(&self.payload))?;
    envelope.end()
  }
}

struct EncodedPayload<'a>(&'a AssetPayload);

/// An audience with its derived description appended.
#[derive(Serialize)]
struct EncodedAudience<'a> {
  #[serde(flatten)]
  audience: &'a Audience,
  string:   String,
}

impl Serialize for EncodedPayload<'_> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self.0 {
      AssetPayload::Chart(chart) => chart.serialize(serializer),
      AssetPayload::Insight(insight) => insight.serialize(serializer),
      AssetPayload::Audience(audience) => EncodedAudience {
        audience,
        string: describe_audience(audience),
      }
      .serialize(serializer),
    }
  }
}

/// Human-readable summary of an audience, e.g.
/// `"Males born in Greece in the age group of 20-30 spent 2 hours on social media"`.
pub fn describe_audience(audience: &Audience) -> String {
  let group = match audience.gender {
    Gender::Male => "Males",
    Gender::Female => "Females",
    Gender::Unspecified => "People",
  };
  format!(
    "{group} born in {} in the age group of {} spent {} hours on social media",
    audience.birth_country, audience.age_group, audience.social_media_hours_usage,
  )
}

// ─── Bytes ───────────────────────────────────────────────────────────────────

/// Serde adapter carrying [`bytes::Bytes`] as a standard base64 string.
/// `null` decodes to empty content.
pub mod base64_bytes {
  use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
  use bytes::Bytes;
  use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

  pub fn serialize<S: Serializer>(
    bytes: &Bytes,
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&B64.encode(bytes))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<Bytes, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
      Some(s) => B64.decode(s).map(Bytes::from).map_err(D::Error::custom),
      None => Ok(Bytes::new()),
    }
  }
}
