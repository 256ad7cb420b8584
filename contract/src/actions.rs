use {
  crate::{
    accounting::{
      available_for_exchange,
      delta_participation,
      delta_proof_of_funding,
      delta_settlement,
    },
    replication::is_replica,
    AssetMode,
    CampaignRecord,
    ContractConfig,
    Variant,
    MINER_FEE,
  },
  bene_primitives::{Context, Output},
  bene_stdpred::{
    delta,
    hash_equals,
    incremented_by,
    long,
    percent_of,
    sigma_prop_equals_script,
    Long,
  },
  serde::{Deserialize, Serialize},
  std::fmt::Display,
};

/// State transitions a campaign record may go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
  /// Participation tokens leave the record in exchange for the settlement
  /// asset at the record's rate.
  Buy,

  /// After the block limit, when the minimum was not reached, participation
  /// tokens come back and the settlement asset is returned at the same rate.
  Refund,

  /// Once the minimum is reached, escrowed funds are paid out to the owner
  /// minus the developer fee and the miner fee.
  WithdrawFunds,

  /// The owner takes back proof-of-funding tokens that were never sold.
  WithdrawUnsoldTokens,

  /// The owner adds proof-of-funding tokens to the record.
  AddTokens,

  /// Once the minimum is reached, participation tokens are swapped one for
  /// one against proof-of-funding tokens.
  ExchangeFundingTokens,
}

impl Action {
  pub const ALL: [Action; 6] = [
    Action::Buy,
    Action::Refund,
    Action::WithdrawFunds,
    Action::WithdrawUnsoldTokens,
    Action::AddTokens,
    Action::ExchangeFundingTokens,
  ];
}

impl Display for Action {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      Action::Buy => "buy",
      Action::Refund => "refund",
      Action::WithdrawFunds => "withdraw-funds",
      Action::WithdrawUnsoldTokens => "withdraw-unsold-tokens",
      Action::AddTokens => "add-tokens",
      Action::ExchangeFundingTokens => "exchange-funding-tokens",
    };
    write!(f, "{name}")
  }
}

/// A campaign record being spent in a transaction, together with
/// everything the action rules need to look at.
///
/// Output 0 of the transaction is the candidate successor record. It is
/// parsed once, up front. When it is not a well formed record every action
/// that needs a successor rejects.
pub struct Evaluation<'a> {
  config: &'a ContractConfig,
  variant: Variant,
  context: &'a Context,
  this: &'a CampaignRecord,
  next: Option<CampaignRecord>,
}

impl<'a> Evaluation<'a> {
  pub fn new(
    config: &'a ContractConfig,
    variant: Variant,
    context: &'a Context,
    this: &'a CampaignRecord,
  ) -> Self {
    let shape = config.generation().pricing_shape();
    let next = context
      .outputs
      .first()
      .and_then(|output| CampaignRecord::from_output(output, shape).ok());

    Self {
      config,
      variant,
      context,
      this,
      next,
    }
  }

  /// Runs the rules of a single action.
  pub fn check(&self, action: Action) -> bool {
    let outcome = match action {
      Action::Buy => self.buy(),
      Action::Refund => self.refund(),
      Action::WithdrawFunds => self.withdraw_funds(),
      Action::WithdrawUnsoldTokens => self.withdraw_unsold_tokens(),
      Action::AddTokens => self.add_tokens(),
      Action::ExchangeFundingTokens => self.exchange_funding_tokens(),
    };

    // unparsable successors, missing outputs and overflows all reject
    outcome.unwrap_or(false)
  }

  /// The first action whose rules accept the transaction.
  pub fn matching_action(&self) -> Option<Action> {
    Action::ALL.into_iter().find(|action| self.check(*action))
  }

  fn buy(&self) -> Option<bool> {
    let (this, next) = (self.this, self.next.as_ref()?);
    let (before, after) = (&this.registers.counters, &next.registers.counters);

    let sold = delta_participation(this, next)?;
    let paid = delta_settlement(&self.variant.asset, this, next)?;
    let price = sold.checked_mul(self.rate())?;

    let constants = self.replicated(next)
      && before.refunded == after.refunded
      && before.exchanged == after.exchanged
      && same_proof_of_funding(this, next);

    Some(
      constants
        && sold <= available_for_exchange(this)?
        && paid == price
        && incremented_by(before.sold, after.sold, sold),
    )
  }

  fn refund(&self) -> Option<bool> {
    let (this, next) = (self.this, self.next.as_ref()?);
    let (before, after) = (&this.registers.counters, &next.registers.counters);

    let after_block_limit =
      i64::from(self.context.height) > i64::from(this.registers.block_limit);
    let refundable = after_block_limit && !self.minimum_reached();

    let returned_tokens = delta_participation(next, this)?;
    let returned_value = delta_settlement(&self.variant.asset, next, this)?;
    let price = returned_tokens.checked_mul(self.rate())?;

    let constants = self.replicated(next)
      && before.sold == after.sold
      && before.exchanged == after.exchanged
      && same_proof_of_funding(this, next);

    Some(
      constants
        && refundable
        && incremented_by(before.refunded, after.refunded, returned_tokens)
        && returned_value == price,
    )
  }

  fn withdraw_funds(&self) -> Option<bool> {
    let this = self.this;
    let outputs = &self.context.outputs;

    // the record continues when output 0 carries the same script, otherwise
    // the campaign terminates and output 0 is not a record.
    let continuing = outputs.first()?.script == this.script;
    let successor = if continuing {
      Some(self.next.as_ref()?)
    } else {
      None
    };

    let constants = match successor {
      Some(next) => {
        this.registers.counters == next.registers.counters
          && this.participation() == next.participation()
          && same_proof_of_funding(this, next)
      }
      None => true,
    };

    let replicated = successor.map_or(false, |next| self.replicated(next));
    let no_proof_of_funding = this.proof_of_funding().is_none();
    let to_owner = self.pays_owner(outputs.get(1)?);

    match self.variant.asset {
      AssetMode::Native => {
        let extracted = match successor {
          Some(next) => delta(next.value, this.value)?,
          None => long(this.value)?,
        };

        let dev_fee =
          percent_of(extracted, Long::from(self.config.dev_fee_percent()))?;
        let project = extracted.checked_sub(dev_fee)?.checked_sub(MINER_FEE)?;

        let project_paid = long(outputs.get(1)?.value)? == project;
        let dev_output = outputs.get(2)?;
        let dev_paid = long(dev_output.value)? == dev_fee
          && hash_equals(&dev_output.script, self.config.dev_fee_hash());

        let all_funds_withdrawn = Some(extracted) == long(this.value);
        let end_or_replicate =
          replicated || (all_funds_withdrawn && no_proof_of_funding);

        Some(
          constants
            && end_or_replicate
            && self.minimum_reached()
            && to_owner
            && dev_paid
            && project_paid,
        )
      }
      // designated asset withdrawals enforce neither fees nor amounts and
      // count as a full withdrawal.
      AssetMode::Designated(_) => {
        let end_or_replicate = replicated || no_proof_of_funding;
        Some(constants && end_or_replicate && self.minimum_reached() && to_owner)
      }
    }
  }

  fn withdraw_unsold_tokens(&self) -> Option<bool> {
    let (this, next) = (self.this, self.next.as_ref()?);

    let added = delta_proof_of_funding(this, next)?;
    let extracted = added.checked_neg()?;

    let constants = self.replicated(next)
      && this.registers.counters == next.registers.counters
      && self.value_maintained(next)?
      && this.participation() == next.participation();

    Some(
      constants
        && self.pays_owner(self.context.outputs.get(1)?)
        && added < 0
        && extracted <= available_for_exchange(this)?,
    )
  }

  fn add_tokens(&self) -> Option<bool> {
    // tokens must come from the owner, spent as the second input
    let owner_input = self.context.inputs.get(1)?;
    let (this, next) = (self.this, self.next.as_ref()?);

    let constants = self.replicated(next)
      && this.registers.counters == next.registers.counters
      && self.value_maintained(next)?
      && this.participation() == next.participation();

    Some(
      constants
        && sigma_prop_equals_script(self.config.owner(), &owner_input.script)
        && delta_proof_of_funding(this, next)? > 0,
    )
  }

  fn exchange_funding_tokens(&self) -> Option<bool> {
    let (this, next) = (self.this, self.next.as_ref()?);
    let (before, after) = (&this.registers.counters, &next.registers.counters);

    let returned = delta_participation(next, this)?;
    let released = delta_proof_of_funding(this, next)?.checked_neg()?;

    let end_or_replicate = self.replicated(next)
      || (this.value == next.value && this.proof_of_funding().is_none());

    let constants = end_or_replicate
      && before.sold == after.sold
      && before.refunded == after.refunded
      && self.value_maintained(next)?;

    Some(
      constants
        && self.minimum_reached()
        && incremented_by(before.exchanged, after.exchanged, returned)
        && returned == released,
    )
  }

  fn replicated(&self, next: &CampaignRecord) -> bool {
    is_replica(self.variant.replication, self.this, next)
  }

  fn rate(&self) -> Long {
    self.this.registers.pricing.rate()
  }

  fn minimum_reached(&self) -> bool {
    self.this.registers.counters.sold >= self.this.registers.minimum_threshold
  }

  fn pays_owner(&self, output: &Output) -> bool {
    sigma_prop_equals_script(self.config.owner(), &output.script)
  }

  // the native value never moves, nor does a designated settlement asset
  fn value_maintained(&self, next: &CampaignRecord) -> Option<bool> {
    Some(
      self.this.value == next.value
        && delta_settlement(&self.variant.asset, self.this, next)? == 0,
    )
  }
}

fn same_proof_of_funding(this: &CampaignRecord, next: &CampaignRecord) -> bool {
  this.proof_of_funding_amount() == next.proof_of_funding_amount()
}
