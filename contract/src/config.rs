use {
  bene_primitives::{Digest32, Network, PricingShape, SigmaProp, TokenId},
  serde::{Deserialize, Serialize},
  std::{fmt::Display, str::FromStr},
  thiserror::Error,
};

/// Miner fee paid out of the extracted value on every funds withdrawal.
pub const MINER_FEE: i64 = 1_100_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("Unknown contract generation {0}, expected one of v1_0, v1_1, v1_2")]
  UnknownGeneration(String),

  #[error("Developer fee must be a percentage between 0 and 100, got {0}")]
  FeeOutOfRange(u8),

  #[error("Contract generation {0} does not support a designated asset")]
  DesignatedAssetUnsupported(Generation),
}

/// Released generations of the campaign contract.
///
/// Campaigns created with an older generation keep being validated by the
/// rules of that generation for their entire lifetime.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Generation {
  #[serde(rename = "v1_0")]
  V1_0,
  #[serde(rename = "v1_1")]
  V1_1,
  #[serde(rename = "v1_2")]
  V1_2,
}

impl Generation {
  pub const ALL: [Generation; 3] =
    [Generation::V1_0, Generation::V1_1, Generation::V1_2];

  /// Layout of the pricing register of records of this generation.
  pub fn pricing_shape(&self) -> PricingShape {
    match self {
      Generation::V1_0 | Generation::V1_1 => PricingShape::Single,
      Generation::V1_2 => PricingShape::WithAsset,
    }
  }

  pub fn supports_designated_asset(&self) -> bool {
    matches!(self, Generation::V1_2)
  }
}

impl Display for Generation {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Generation::V1_0 => write!(f, "v1_0"),
      Generation::V1_1 => write!(f, "v1_1"),
      Generation::V1_2 => write!(f, "v1_2"),
    }
  }
}

impl FromStr for Generation {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "v1_0" => Ok(Generation::V1_0),
      "v1_1" => Ok(Generation::V1_1),
      "v1_2" => Ok(Generation::V1_2),
      other => Err(Error::UnknownGeneration(other.to_owned())),
    }
  }
}

/// Constants a campaign contract instance is built with.
///
/// Two campaigns with equal configs share the same script and therefore the
/// same fingerprint and address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ConfigParts", into = "ConfigParts")]
pub struct ContractConfig {
  owner: SigmaProp,
  dev_fee_hash: Digest32,
  dev_fee_percent: u8,
  token_id: TokenId,
  designated_asset: Option<TokenId>,
  network: Network,
  generation: Generation,
}

impl ContractConfig {
  pub fn new(
    owner: SigmaProp,
    dev_fee_hash: Digest32,
    dev_fee_percent: u8,
    token_id: TokenId,
    designated_asset: Option<TokenId>,
    network: Network,
    generation: Generation,
  ) -> Result<Self, Error> {
    if dev_fee_percent > 100 {
      return Err(Error::FeeOutOfRange(dev_fee_percent));
    }

    if designated_asset.is_some() && !generation.supports_designated_asset() {
      return Err(Error::DesignatedAssetUnsupported(generation));
    }

    Ok(Self {
      owner,
      dev_fee_hash,
      dev_fee_percent,
      token_id,
      designated_asset,
      network,
      generation,
    })
  }

  /// Condition of the project owner. Withdrawals pay to it and token
  /// additions must come from it.
  pub fn owner(&self) -> &SigmaProp {
    &self.owner
  }

  /// Blake2b-256 of the developer fee recipient script.
  pub fn dev_fee_hash(&self) -> &Digest32 {
    &self.dev_fee_hash
  }

  pub fn dev_fee_percent(&self) -> u8 {
    self.dev_fee_percent
  }

  /// Expected id of the proof-of-funding token.
  pub fn token_id(&self) -> &TokenId {
    &self.token_id
  }

  pub fn designated_asset(&self) -> Option<&TokenId> {
    self.designated_asset.as_ref()
  }

  pub fn network(&self) -> Network {
    self.network
  }

  pub fn generation(&self) -> Generation {
    self.generation
  }
}

// unvalidated wire form, every deserialized config goes through `new`.
#[derive(Serialize, Deserialize)]
struct ConfigParts {
  owner: SigmaProp,
  dev_fee_hash: Digest32,
  dev_fee_percent: u8,
  token_id: TokenId,
  designated_asset: Option<TokenId>,
  network: Network,
  generation: Generation,
}

impl TryFrom<ConfigParts> for ContractConfig {
  type Error = Error;

  fn try_from(parts: ConfigParts) -> Result<Self, Self::Error> {
    ContractConfig::new(
      parts.owner,
      parts.dev_fee_hash,
      parts.dev_fee_percent,
      parts.token_id,
      parts.designated_asset,
      parts.network,
      parts.generation,
    )
  }
}

impl From<ContractConfig> for ConfigParts {
  fn from(config: ContractConfig) -> Self {
    Self {
      owner: config.owner,
      dev_fee_hash: config.dev_fee_hash,
      dev_fee_percent: config.dev_fee_percent,
      token_id: config.token_id,
      designated_asset: config.designated_asset,
      network: config.network,
      generation: config.generation,
    }
  }
}
