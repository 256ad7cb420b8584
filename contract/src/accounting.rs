//! Token and asset arithmetic between a record and its successor.
//!
//! All results are `None` when an amount does not fit a signed 64 bit
//! integer or an operation overflows.

use {
  crate::{AssetMode, CampaignRecord},
  bene_primitives::amount_of,
  bene_stdpred::{delta, long, Long},
};

/// Participation tokens that may still be sold without leaving sold tokens
/// unbacked by proof-of-funding tokens:
/// `pft - sold + refunded + exchanged`.
pub fn available_for_exchange(record: &CampaignRecord) -> Option<Long> {
  let counters = &record.registers.counters;
  long(record.proof_of_funding_amount())?
    .checked_sub(counters.sold)?
    .checked_add(counters.refunded)?
    .checked_add(counters.exchanged)
}

/// Participation tokens that left the record, negative when tokens were
/// returned to it.
pub fn delta_participation(
  this: &CampaignRecord,
  next: &CampaignRecord,
) -> Option<Long> {
  delta(next.participation(), this.participation())
}

/// Proof-of-funding tokens added to the record, negative when tokens were
/// taken out of it.
pub fn delta_proof_of_funding(
  this: &CampaignRecord,
  next: &CampaignRecord,
) -> Option<Long> {
  delta(this.proof_of_funding_amount(), next.proof_of_funding_amount())
}

/// Amount of the settlement asset held by a record.
///
/// A designated asset is looked up among all tokens of the record, the
/// first slot carrying its id counts and a missing asset counts as zero.
pub fn settlement_amount(asset: &AssetMode, record: &CampaignRecord) -> u64 {
  match asset {
    AssetMode::Native => record.value,
    AssetMode::Designated(id) => {
      let tokens: Vec<_> = record.tokens().copied().collect();
      amount_of(&tokens, id)
    }
  }
}

/// Settlement asset added to the record, negative when it was paid out.
pub fn delta_settlement(
  asset: &AssetMode,
  this: &CampaignRecord,
  next: &CampaignRecord,
) -> Option<Long> {
  delta(settlement_amount(asset, this), settlement_amount(asset, next))
}
