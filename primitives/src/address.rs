use {
  crate::{
    blake2b256,
    SigmaProp,
    PROVE_DLOG_OPCODE,
    SIGMA_PROP_TAG,
    TRIVIAL_HEADER,
  },
  serde::{Deserialize, Serialize},
  std::{
    fmt::{Debug, Display},
    str::FromStr,
  },
  thiserror::Error,
};

const CHECKSUM_LEN: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("Invalid base58 encoding: {0}")]
  Encoding(#[from] bs58::decode::Error),

  #[error("Address is too short")]
  TooShort,

  #[error("Address checksum mismatch")]
  Checksum,

  #[error("Unknown network prefix {0:#04x}")]
  UnknownNetwork(u8),

  #[error("Unknown address type {0:#04x}")]
  UnknownType(u8),

  #[error("Pay-to-public-key address must carry a 33 byte key, got {0}")]
  InvalidKeyLength(usize),

  #[error("Unknown network {0}, expected mainnet or testnet")]
  UnknownNetworkName(String),
}

/// Ledger network an address or a contract instance belongs to.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Network {
  #[default]
  Mainnet,
  Testnet,
}

impl Network {
  fn prefix(&self) -> u8 {
    match self {
      Network::Mainnet => 0x00,
      Network::Testnet => 0x10,
    }
  }

  fn from_prefix(prefix: u8) -> Result<Self, Error> {
    match prefix {
      0x00 => Ok(Network::Mainnet),
      0x10 => Ok(Network::Testnet),
      other => Err(Error::UnknownNetwork(other)),
    }
  }
}

impl Display for Network {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Network::Mainnet => write!(f, "mainnet"),
      Network::Testnet => write!(f, "testnet"),
    }
  }
}

impl FromStr for Network {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "mainnet" => Ok(Network::Mainnet),
      "testnet" => Ok(Network::Testnet),
      other => Err(Error::UnknownNetworkName(other.to_owned())),
    }
  }
}

/// A human readable, checksummed representation of a guarding script.
///
/// The encoded form is `base58(prefix || content || checksum)` where the
/// prefix byte combines the network and the address type, and the checksum
/// is the first four bytes of blake2b-256 over `prefix || content`.
///
/// Pay-to-public-key addresses carry the 33 byte key as content, every other
/// script is carried whole as a pay-to-script address.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Address {
  P2PK { network: Network, key: Vec<u8> },
  P2S { network: Network, script: Vec<u8> },
}

impl Address {
  const TYPE_P2PK: u8 = 0x01;
  const TYPE_P2S: u8 = 0x03;

  /// Address of the given guarding script.
  pub fn from_script(network: Network, script: &[u8]) -> Self {
    match SigmaProp::from_bytes(script.to_vec()).public_key() {
      Some(pk) => Address::P2PK {
        network,
        key: pk.as_bytes().to_vec(),
      },
      None => Address::P2S {
        network,
        script: script.to_vec(),
      },
    }
  }

  pub fn network(&self) -> Network {
    match self {
      Address::P2PK { network, .. } | Address::P2S { network, .. } => *network,
    }
  }

  /// The guarding script a box must carry to pay to this address.
  pub fn script(&self) -> Vec<u8> {
    match self {
      Address::P2PK { key, .. } => {
        let mut script = vec![TRIVIAL_HEADER, SIGMA_PROP_TAG, PROVE_DLOG_OPCODE];
        script.extend_from_slice(key);
        script
      }
      Address::P2S { script, .. } => script.clone(),
    }
  }

  fn prefix(&self) -> u8 {
    match self {
      Address::P2PK { network, .. } => network.prefix() + Self::TYPE_P2PK,
      Address::P2S { network, .. } => network.prefix() + Self::TYPE_P2S,
    }
  }

  fn content(&self) -> &[u8] {
    match self {
      Address::P2PK { key, .. } => key,
      Address::P2S { script, .. } => script,
    }
  }

  pub fn encode(&self) -> String {
    let mut bytes = Vec::with_capacity(1 + self.content().len() + CHECKSUM_LEN);
    bytes.push(self.prefix());
    bytes.extend_from_slice(self.content());
    let checksum = blake2b256(&bytes);
    bytes.extend_from_slice(&checksum[..CHECKSUM_LEN]);
    bs58::encode(bytes).into_string()
  }

  pub fn decode(encoded: &str) -> Result<Self, Error> {
    let bytes = bs58::decode(encoded).into_vec()?;
    if bytes.len() < 1 + CHECKSUM_LEN {
      return Err(Error::TooShort);
    }

    let (body, checksum) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
    if &blake2b256(body)[..CHECKSUM_LEN] != checksum {
      return Err(Error::Checksum);
    }

    let prefix = body[0];
    let network = Network::from_prefix(prefix & 0xf0)?;
    let content = body[1..].to_vec();
    match prefix & 0x0f {
      Self::TYPE_P2PK if content.len() == 33 => Ok(Address::P2PK {
        network,
        key: content,
      }),
      Self::TYPE_P2PK => Err(Error::InvalidKeyLength(content.len())),
      Self::TYPE_P2S => Ok(Address::P2S {
        network,
        script: content,
      }),
      other => Err(Error::UnknownType(other)),
    }
  }
}

impl Display for Address {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.encode())
  }
}

impl Debug for Address {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "address({})", self.encode())
  }
}

impl FromStr for Address {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::decode(s)
  }
}

impl TryFrom<&str> for Address {
  type Error = Error;

  fn try_from(value: &str) -> Result<Self, Self::Error> {
    FromStr::from_str(value)
  }
}

impl TryFrom<String> for Address {
  type Error = Error;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::decode(&value)
  }
}

impl From<Address> for String {
  fn from(address: Address) -> Self {
    address.encode()
  }
}
