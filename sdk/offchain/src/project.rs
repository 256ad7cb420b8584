use {
  crate::CampaignBox,
  bene_contract::Generation,
  bene_primitives::{Address, BoxId, TokenId},
  serde::Serialize,
};

/// Summary of a campaign as presented to project backers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
  pub box_id: BoxId,

  /// Identity token of the campaign.
  pub token_id: TokenId,
  pub generation: Generation,
  pub owner: Address,

  pub block_limit: i32,
  pub minimum_amount: i64,
  pub amount_sold: i64,
  pub amount_refunded: i64,
  pub amount_exchanged: i64,

  /// Settlement asset units per participation token.
  pub exchange_rate: i64,

  /// Native value held by the record.
  pub value: u64,

  /// Participation tokens still held by the record.
  pub participation_held: u64,

  /// Proof-of-funding tokens still held by the record.
  pub total_amount: u64,

  #[serde(with = "hex_blob")]
  pub owner_details: Vec<u8>,
  #[serde(with = "hex_blob")]
  pub metadata: Vec<u8>,
}

impl Project {
  /// The refund window is open once the block limit has passed.
  pub fn is_ended(&self, height: u32) -> bool {
    i64::from(self.block_limit) < i64::from(height)
  }

  pub fn min_raised(&self) -> bool {
    self.amount_sold > self.minimum_amount
  }
}

impl From<&CampaignBox> for Project {
  fn from(campaign: &CampaignBox) -> Self {
    let record = &campaign.record;
    let registers = &record.registers;
    let config = &campaign.config;

    Self {
      box_id: campaign.id,
      token_id: *record.identity_id(),
      generation: config.generation(),
      owner: Address::from_script(config.network(), config.owner().prop_bytes()),
      block_limit: registers.block_limit,
      minimum_amount: registers.minimum_threshold,
      amount_sold: registers.counters.sold,
      amount_refunded: registers.counters.refunded,
      amount_exchanged: registers.counters.exchanged,
      exchange_rate: registers.pricing.rate(),
      value: record.value,
      participation_held: record.participation(),
      total_amount: record.proof_of_funding_amount(),
      owner_details: registers.owner_details.clone(),
      metadata: registers.project_metadata.clone(),
    }
  }
}

mod hex_blob {
  use serde::Serializer;

  pub fn serialize<S: Serializer>(
    bytes: &[u8],
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
  }
}
