//! Serde helpers for raw byte strings.
//!
//! Human readable formats (json, cli input) carry bytes as hex strings,
//! binary formats carry them as-is.

use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize<S: Serializer>(
  bytes: &[u8],
  serializer: S,
) -> Result<S::Ok, S::Error> {
  if serializer.is_human_readable() {
    serializer.serialize_str(&hex::encode(bytes))
  } else {
    bytes.serialize(serializer)
  }
}

pub fn deserialize<'de, D: Deserializer<'de>>(
  deserializer: D,
) -> Result<Vec<u8>, D::Error> {
  if deserializer.is_human_readable() {
    hex::decode(String::deserialize(deserializer)?).map_err(D::Error::custom)
  } else {
    Vec::<u8>::deserialize(deserializer)
  }
}

/// Byte string wrapper that uses the encoding above, for use inside
/// containers.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct HexBytes(#[serde(with = "crate::encoding")] pub Vec<u8>);
