use {
  serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer},
  sha2::{Digest as _, Sha256},
  std::{
    fmt::{Debug, Display},
    ops::Deref,
    str::FromStr,
  },
};

/// A 32 byte digest.
///
/// Used for everything on the ledger that is identified by a hash: token ids,
/// box ids, transaction ids and script fingerprints.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest32([u8; 32]);

/// Identifier of a token class. Tokens are minted with the id of the first
/// input box of the minting transaction.
pub type TokenId = Digest32;

/// Identifier of an output box, derived from the creating transaction id and
/// the position of the output in that transaction.
pub type BoxId = Digest32;

impl Digest32 {
  pub const fn new(bytes: [u8; 32]) -> Self {
    Self(bytes)
  }

  pub const fn zero() -> Self {
    Self([0u8; 32])
  }

  pub fn as_bytes(&self) -> &[u8; 32] {
    &self.0
  }
}

/// Blake2b-256 of a byte string.
///
/// This is the hash the ledger uses for box ids, transaction ids and script
/// fingerprints.
pub fn blake2b256(bytes: &[u8]) -> Digest32 {
  let hash = blake2b_simd::Params::new().hash_length(32).hash(bytes);
  let mut out = [0u8; 32];
  out.copy_from_slice(hash.as_bytes());
  Digest32(out)
}

/// SHA-256 of a byte string, used for script template hashes.
pub fn sha256(bytes: &[u8]) -> Digest32 {
  let mut out = [0u8; 32];
  out.copy_from_slice(&Sha256::digest(bytes));
  Digest32(out)
}

impl From<[u8; 32]> for Digest32 {
  fn from(bytes: [u8; 32]) -> Self {
    Self(bytes)
  }
}

impl TryFrom<&[u8]> for Digest32 {
  type Error = std::array::TryFromSliceError;

  fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
    Ok(Self(value.try_into()?))
  }
}

impl AsRef<[u8]> for Digest32 {
  fn as_ref(&self) -> &[u8] {
    &self.0
  }
}

impl Deref for Digest32 {
  type Target = [u8];

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl Display for Digest32 {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", hex::encode(self.0))
  }
}

impl Debug for Digest32 {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "digest({})", hex::encode(self.0))
  }
}

impl FromStr for Digest32 {
  type Err = hex::FromHexError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(s, &mut bytes)?;
    Ok(Self(bytes))
  }
}

// hex in human readable formats (json, cli), raw bytes otherwise.
impl Serialize for Digest32 {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    if serializer.is_human_readable() {
      serializer.serialize_str(&hex::encode(self.0))
    } else {
      self.0.serialize(serializer)
    }
  }
}

impl<'de> Deserialize<'de> for Digest32 {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    if deserializer.is_human_readable() {
      let s = String::deserialize(deserializer)?;
      s.parse().map_err(D::Error::custom)
    } else {
      Ok(Self(<[u8; 32]>::deserialize(deserializer)?))
    }
  }
}
