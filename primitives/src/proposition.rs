use {
  serde::{Deserialize, Serialize},
  std::fmt::Debug,
};

/// Script header of a proposition that is stored as-is, without constant
/// segregation or an explicit size.
pub const TRIVIAL_HEADER: u8 = 0x00;

/// Script header of a proposition with segregated constants and an explicit
/// varint encoded body size following the header byte.
pub const SIZED_HEADER: u8 = 0x18;

/// Type tag of a sigma proposition constant.
pub const SIGMA_PROP_TAG: u8 = 0x08;

/// Opcode of a "prove knowledge of discrete log" proposition, the plain
/// public key ownership condition.
pub const PROVE_DLOG_OPCODE: u8 = 0xcd;

/// A compressed elliptic curve point, used as a public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupElement(#[serde(with = "group_element_bytes")] [u8; 33]);

impl GroupElement {
  pub const fn new(bytes: [u8; 33]) -> Self {
    Self(bytes)
  }

  pub fn as_bytes(&self) -> &[u8; 33] {
    &self.0
  }
}

impl Debug for GroupElement {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "pk({})", hex::encode(self.0))
  }
}

impl std::str::FromStr for GroupElement {
  type Err = hex::FromHexError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut bytes = [0u8; 33];
    hex::decode_to_slice(s, &mut bytes)?;
    Ok(Self(bytes))
  }
}

/// An authorization condition, the requirement a box's guarding script must
/// encode for the box to be considered "owned by" a party.
///
/// The condition is kept in its serialized form. For a public key owner that
/// is the trivial script `[0x00, 0x08, 0xcd, <33 byte key>]`, which is also
/// exactly the script of a box paying to that public key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SigmaProp {
  #[serde(with = "crate::encoding")]
  bytes: Vec<u8>,
}

impl SigmaProp {
  /// Condition satisfied by a signature of the given public key.
  pub fn prove_dlog(pk: &GroupElement) -> Self {
    let mut bytes = Vec::with_capacity(36);
    bytes.push(TRIVIAL_HEADER);
    bytes.push(SIGMA_PROP_TAG);
    bytes.push(PROVE_DLOG_OPCODE);
    bytes.extend_from_slice(pk.as_bytes());
    Self { bytes }
  }

  pub fn from_bytes(bytes: Vec<u8>) -> Self {
    Self { bytes }
  }

  /// Serialized condition bytes.
  pub fn prop_bytes(&self) -> &[u8] {
    &self.bytes
  }

  /// Public key of a plain public key condition.
  pub fn public_key(&self) -> Option<GroupElement> {
    match self.bytes.as_slice() {
      [TRIVIAL_HEADER, SIGMA_PROP_TAG, PROVE_DLOG_OPCODE, key @ ..]
        if key.len() == 33 =>
      {
        let mut pk = [0u8; 33];
        pk.copy_from_slice(key);
        Some(GroupElement(pk))
      }
      _ => None,
    }
  }
}

/// Wraps a proposition body into a sized script: header byte, varint body
/// length, body.
pub fn sized_script(body: &[u8]) -> Vec<u8> {
  let mut buf = unsigned_varint::encode::usize_buffer();
  let size = unsigned_varint::encode::usize(body.len(), &mut buf);
  let mut script = Vec::with_capacity(1 + size.len() + body.len());
  script.push(SIZED_HEADER);
  script.extend_from_slice(size);
  script.extend_from_slice(body);
  script
}

/// Splits a sized script into its body, if it is one.
pub fn sized_body(script: &[u8]) -> Option<&[u8]> {
  match script.split_first() {
    Some((&SIZED_HEADER, rest)) => {
      let (len, body) = unsigned_varint::decode::usize(rest).ok()?;
      (body.len() == len).then_some(body)
    }
    _ => None,
  }
}

// always hex, the key is too long for serde's fixed array support.
mod group_element_bytes {
  use serde::{de::Error, Deserialize, Deserializer, Serializer};

  pub fn serialize<S: Serializer>(
    bytes: &[u8; 33],
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<[u8; 33], D::Error> {
    let mut bytes = [0u8; 33];
    hex::decode_to_slice(String::deserialize(deserializer)?, &mut bytes)
      .map_err(D::Error::custom)?;
    Ok(bytes)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn public_key_condition_layout() {
    let pk = GroupElement::new([2u8; 33]);
    let prop = SigmaProp::prove_dlog(&pk);
    assert_eq!(prop.prop_bytes().len(), 36);
    assert_eq!(&prop.prop_bytes()[..3], &[0x00, 0x08, 0xcd]);
    assert_eq!(prop.public_key(), Some(pk));
    assert_eq!(SigmaProp::from_bytes(vec![0x00, 0x08]).public_key(), None);
  }

  #[test]
  fn sized_script_roundtrip() {
    let body = vec![7u8; 200];
    let script = sized_script(&body);
    // 200 needs a two byte varint
    assert_eq!(&script[..3], &[SIZED_HEADER, 0xc8, 0x01]);
    assert_eq!(sized_body(&script), Some(body.as_slice()));
    assert_eq!(sized_body(&script[..script.len() - 1]), None);
    assert_eq!(sized_body(&[0x00, 0x01, 0x02]), None);
  }
}
