#![allow(dead_code)]

use {
  bene_contract::{campaign_script, CampaignRecord, ContractConfig, Generation},
  bene_primitives::{
    blake2b256,
    CampaignRegisters,
    Context,
    Counters,
    GroupElement,
    Network,
    Output,
    Pricing,
    SigmaProp,
    Token,
    TokenId,
  },
};

pub const BLOCK_LIMIT: i32 = 1_000;
pub const MINIMUM: i64 = 100;
pub const RATE: i64 = 1_000;

pub fn owner() -> SigmaProp {
  SigmaProp::prove_dlog(&GroupElement::new([2u8; 33]))
}

pub fn stranger() -> SigmaProp {
  SigmaProp::prove_dlog(&GroupElement::new([3u8; 33]))
}

pub fn dev_script() -> Vec<u8> {
  vec![0x18, 0x04, 0x05, 0xde, 0xad, 0x00]
}

pub fn identity_id() -> TokenId {
  blake2b256(b"campaign identity")
}

pub fn pft_id() -> TokenId {
  blake2b256(b"proof of funding")
}

pub fn asset_id() -> TokenId {
  blake2b256(b"designated asset")
}

pub fn config(generation: Generation) -> ContractConfig {
  ContractConfig::new(
    owner(),
    blake2b256(&dev_script()),
    5,
    pft_id(),
    None,
    Network::Testnet,
    generation,
  )
  .unwrap()
}

pub fn designated_config() -> ContractConfig {
  ContractConfig::new(
    owner(),
    blake2b256(&dev_script()),
    5,
    pft_id(),
    Some(asset_id()),
    Network::Testnet,
    Generation::V1_2,
  )
  .unwrap()
}

/// A campaign record of the given contract with the standard block limit,
/// minimum and rate.
pub fn record(
  config: &ContractConfig,
  value: u64,
  participation: u64,
  pft: Option<u64>,
  counters: Counters,
) -> CampaignRecord {
  let pricing = match config.generation() {
    Generation::V1_2 => Pricing::RateWithAsset {
      rate: RATE,
      asset_id_len: config.designated_asset().map_or(0, |_| 32),
    },
    _ => Pricing::Rate(RATE),
  };

  CampaignRecord {
    value,
    identity: Token::new(identity_id(), participation),
    other_tokens: pft
      .map(|amount| vec![Token::new(pft_id(), amount)])
      .unwrap_or_default(),
    script: campaign_script(config),
    registers: CampaignRegisters {
      block_limit: BLOCK_LIMIT,
      minimum_threshold: MINIMUM,
      counters,
      pricing,
      owner_details: b"{\"owner\":\"project\"}".to_vec(),
      project_metadata: b"{\"title\":\"campaign\"}".to_vec(),
    },
  }
}

/// Context spending `this` as the only input.
pub fn spend(
  this: &CampaignRecord,
  outputs: Vec<Output>,
  height: u32,
) -> Context {
  Context::new(vec![this.to_output(0)], outputs, height)
}

/// Copy of a record with changed mutable fields.
pub fn successor(
  this: &CampaignRecord,
  value: u64,
  participation: u64,
  pft: Option<u64>,
  counters: Counters,
) -> CampaignRecord {
  let mut next = this.clone();
  next.value = value;
  next.identity.amount = participation;
  next.other_tokens = pft
    .map(|amount| vec![Token::new(pft_id(), amount)])
    .unwrap_or_default();
  next.registers.counters = counters;
  next
}

pub fn pay(owner: &SigmaProp, value: u64) -> Output {
  Output::pay_to(owner, value)
}

pub fn pay_dev(value: u64) -> Output {
  Output {
    value,
    script: dev_script(),
    tokens: vec![],
    registers: Default::default(),
    creation_height: 0,
  }
}
