//! Validator of tokenized crowdfunding campaign records.
//!
//! A campaign lives on the ledger as a single record box that is replaced
//! wholesale by every transaction touching it. Spending the record is
//! allowed when the record is well formed and at least one of the six
//! campaign actions accepts the proposed successor and payouts.

mod accounting;
mod actions;
mod config;
mod mint;
mod record;
mod replication;
mod script;
mod variant;

pub use {
  accounting::{
    available_for_exchange,
    delta_participation,
    delta_proof_of_funding,
    delta_settlement,
    settlement_amount,
  },
  actions::{Action, Evaluation},
  config::{ContractConfig, Error as ConfigError, Generation, MINER_FEE},
  mint::validate_mint,
  record::{CampaignRecord, Error as RecordError},
  replication::is_replica,
  script::{campaign_script, fingerprint, mint_script, Guard},
  variant::{AssetMode, Replication, Variant},
};
use {
  bene_primitives::Context,
  thiserror::Error,
  tracing::{debug, trace},
};

/// Reason a campaign record may not be spent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
  #[error("Transaction has no input at position {0}")]
  MissingSelf(usize),

  #[error("Spent box is not a campaign record: {0}")]
  MalformedRecord(#[from] RecordError),

  #[error("Campaign record holds an unexpected token layout")]
  IllFormed,

  #[error("None of the campaign actions accepts the transaction")]
  NoMatchingAction,
}

/// Structural precondition of every spend: the proof-of-funding slot, when
/// present, holds the configured token, and the record holds one or two
/// token classes.
pub fn well_formed(config: &ContractConfig, record: &CampaignRecord) -> bool {
  let correct_token_id = record
    .proof_of_funding()
    .map_or(true, |token| &token.id == config.token_id());

  correct_token_id && matches!(record.token_classes(), 1 | 2)
}

/// Decides whether the campaign record at input `self_index` may be spent
/// by the transaction described by `context`, and which action allows it.
pub fn evaluate(
  config: &ContractConfig,
  context: &Context,
  self_index: usize,
) -> Result<Action, Rejection> {
  let output = context
    .inputs
    .get(self_index)
    .ok_or(Rejection::MissingSelf(self_index))?;

  let this =
    CampaignRecord::from_output(output, config.generation().pricing_shape())?;

  if !well_formed(config, &this) {
    trace!("campaign record at input {self_index} is ill formed");
    return Err(Rejection::IllFormed);
  }

  let variant = Variant::resolve(config, &this.registers.pricing);
  let evaluation = Evaluation::new(config, variant, context, &this);

  match evaluation.matching_action() {
    Some(action) => {
      debug!(
        "{} campaign {} accepted as {action}",
        config.generation(),
        this.identity_id()
      );
      Ok(action)
    }
    None => {
      debug!(
        "{} campaign {} rejected, no action matches",
        config.generation(),
        this.identity_id()
      );
      Err(Rejection::NoMatchingAction)
    }
  }
}

/// Boolean form of [`evaluate`].
pub fn validate(
  config: &ContractConfig,
  context: &Context,
  self_index: usize,
) -> bool {
  evaluate(config, context, self_index).is_ok()
}
