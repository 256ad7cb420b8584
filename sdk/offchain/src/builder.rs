use {
  bene_contract::{
    campaign_script,
    fingerprint,
    mint_script,
    ConfigError,
    ContractConfig,
    Generation,
  },
  bene_primitives::{
    blake2b256,
    sha256,
    Address,
    Digest32,
    GroupElement,
    Network,
    SigmaProp,
    TokenId,
  },
  serde::{Deserialize, Serialize},
  thiserror::Error,
  tracing::info,
};

/// Developer fee percentage used when building template scripts.
const PLACEHOLDER_DEV_FEE: u8 = 5;

/// Seed of the developer fee hash used when building template scripts.
const PLACEHOLDER_DEV_SEED: &[u8] = b"9a3d2f6b";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("Invalid contract constants: {0}")]
  Config(#[from] ConfigError),

  #[error("Owner address belongs to {owner}, builder targets {builder}")]
  NetworkMismatch { builder: Network, owner: Network },

  #[error("Campaign owner must be a public key address")]
  OwnerNotPublicKey,
}

/// Constants a campaign contract is instantiated with, in the form a
/// project creator supplies them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constants {
  pub owner: Address,

  /// Blake2b-256 of the developer fee recipient script. The builder's
  /// default recipient is used when absent.
  #[serde(default)]
  pub dev_fee_hash: Option<Digest32>,

  pub dev_fee_percent: u8,

  /// Id of the proof-of-funding token.
  pub token_id: TokenId,

  #[serde(default)]
  pub designated_asset: Option<TokenId>,
}

/// A contract ready to be paid to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledContract {
  pub script: Vec<u8>,
  pub fingerprint: Digest32,
  pub address: Address,
}

impl CompiledContract {
  fn new(network: Network, script: Vec<u8>) -> Self {
    Self {
      fingerprint: fingerprint(&script),
      address: Address::from_script(network, &script),
      script,
    }
  }
}

/// Turns campaign constants into deployable contracts.
pub trait ContractBuilder {
  /// Validated contract config of a campaign of a given generation.
  fn config(
    &self,
    constants: &Constants,
    generation: Generation,
  ) -> Result<ContractConfig, Error>;

  /// Campaign contract script, fingerprint and address.
  fn compile(&self, config: &ContractConfig) -> CompiledContract;

  /// Minting guard of the identity token carrier of a campaign. It only
  /// allows spending the carrier into a record of the given campaign.
  fn mint_contract(&self, config: &ContractConfig) -> CompiledContract;

  /// Hash identifying a contract generation independent of the constants
  /// any particular campaign is built with.
  fn template_hash(&self, generation: Generation) -> Digest32;
}

/// Builder producing the script templates understood by the executor.
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
  network: Network,
  dev_fee_hash: Digest32,
}

impl TemplateBuilder {
  pub fn new(network: Network, dev_fee_hash: Digest32) -> Self {
    Self {
      network,
      dev_fee_hash,
    }
  }

  pub fn network(&self) -> Network {
    self.network
  }

  fn placeholder_config(
    &self,
    generation: Generation,
  ) -> Result<ContractConfig, ConfigError> {
    ContractConfig::new(
      SigmaProp::prove_dlog(&GroupElement::new([0x02; 33])),
      blake2b256(PLACEHOLDER_DEV_SEED),
      PLACEHOLDER_DEV_FEE,
      TokenId::zero(),
      None,
      self.network,
      generation,
    )
  }
}

impl ContractBuilder for TemplateBuilder {
  fn config(
    &self,
    constants: &Constants,
    generation: Generation,
  ) -> Result<ContractConfig, Error> {
    if constants.owner.network() != self.network {
      return Err(Error::NetworkMismatch {
        builder: self.network,
        owner: constants.owner.network(),
      });
    }

    let owner = match &constants.owner {
      Address::P2PK { .. } => SigmaProp::from_bytes(constants.owner.script()),
      Address::P2S { .. } => return Err(Error::OwnerNotPublicKey),
    };

    Ok(ContractConfig::new(
      owner,
      constants.dev_fee_hash.unwrap_or(self.dev_fee_hash),
      constants.dev_fee_percent,
      constants.token_id,
      constants.designated_asset,
      self.network,
      generation,
    )?)
  }

  fn compile(&self, config: &ContractConfig) -> CompiledContract {
    let contract = CompiledContract::new(config.network(), campaign_script(config));
    info!(
      "compiled {} campaign contract {}",
      config.generation(),
      contract.fingerprint
    );
    contract
  }

  fn mint_contract(&self, config: &ContractConfig) -> CompiledContract {
    let campaign = fingerprint(&campaign_script(config));
    let contract = CompiledContract::new(config.network(), mint_script(&campaign));
    info!("compiled mint contract for campaign {campaign}");
    contract
  }

  fn template_hash(&self, generation: Generation) -> Digest32 {
    // placeholder constants are always within range
    let config = self
      .placeholder_config(generation)
      .expect("placeholder constants are valid for every generation");
    sha256(&campaign_script(&config))
  }
}
