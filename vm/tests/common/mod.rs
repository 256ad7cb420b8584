#![allow(dead_code)]

pub mod campaign_ops;

use {
  bene_contract::{CampaignRecord, ContractConfig, Generation},
  bene_primitives::{
    blake2b256,
    BoxId,
    GroupElement,
    Network,
    Output,
    SigmaProp,
    Token,
    TokenId,
  },
  bene_vm::{InMemoryStateStore, State, StateDiff},
};

pub const BLOCK_LIMIT: i32 = 1_000;
pub const MINIMUM: i64 = 100;
pub const RATE: i64 = 1_000_000;
pub const PFT_SUPPLY: u64 = 1_000;

pub fn owner() -> SigmaProp {
  SigmaProp::prove_dlog(&GroupElement::new([2u8; 33]))
}

pub fn buyer() -> SigmaProp {
  SigmaProp::prove_dlog(&GroupElement::new([4u8; 33]))
}

pub fn miner() -> SigmaProp {
  SigmaProp::prove_dlog(&GroupElement::new([6u8; 33]))
}

pub fn dev_script() -> Vec<u8> {
  SigmaProp::prove_dlog(&GroupElement::new([8u8; 33]))
    .prop_bytes()
    .to_vec()
}

pub fn pft_id() -> TokenId {
  blake2b256(b"proof of funding token")
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

/// Boxes present on the ledger before any campaign exists.
pub struct Genesis {
  /// Owner funds together with the whole proof-of-funding token supply.
  pub owner_box: BoxId,

  /// Funds of a prospective buyer.
  pub buyer_box: BoxId,
}

/// Creates the initial ledger state with one owner box and one buyer box.
pub fn create_initial_ledger_state() -> (InMemoryStateStore, Genesis) {
  let owner_box = blake2b256(b"genesis-owner");
  let buyer_box = blake2b256(b"genesis-buyer");

  let mut diff = StateDiff::default();
  diff.set(
    owner_box,
    Output::pay_to(&owner(), 10_000_000_000)
      .with_tokens(vec![Token::new(pft_id(), PFT_SUPPLY)]),
  );
  diff.set(buyer_box, Output::pay_to(&buyer(), 1_000_000_000_000));

  let mut store = InMemoryStateStore::default();
  store.apply(diff);

  (store, Genesis {
    owner_box,
    buyer_box,
  })
}

/// Reads a campaign record from the ledger.
pub fn campaign(
  state: &impl State,
  id: &BoxId,
  config: &ContractConfig,
) -> anyhow::Result<CampaignRecord> {
  let output = state
    .get(id)
    .ok_or_else(|| anyhow::anyhow!("campaign box {id} not found"))?;
  Ok(CampaignRecord::from_output(
    &output,
    config.generation().pricing_shape(),
  )?)
}

/// Asserts the record level invariants that hold at every reachable point
/// of a campaign history.
pub fn assert_invariants(before: &CampaignRecord, after: &CampaignRecord) {
  let (b, a) = (&before.registers.counters, &after.registers.counters);
  assert!(a.sold >= b.sold);
  assert!(a.refunded >= b.refunded);
  assert!(a.exchanged >= b.exchanged);
  assert!(bene_contract::available_for_exchange(after).unwrap() >= 0);
}
