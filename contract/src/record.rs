use {
  bene_primitives::{
    CampaignRegisters,
    Output,
    PricingShape,
    RegisterError,
    Token,
    TokenId,
  },
  thiserror::Error,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("Campaign record holds no identity token")]
  NoIdentityToken,

  #[error("Invalid campaign registers: {0}")]
  Registers(#[from] RegisterError),

  #[error("Pricing register has shape {found:?}, expected {expected:?}")]
  PricingShape {
    expected: PricingShape,
    found: PricingShape,
  },
}

/// Typed view of a campaign record box.
///
/// The first token of the box identifies the campaign and its amount is the
/// participation token supply still held by the campaign. The second token,
/// when present, is the proof-of-funding token. Any further tokens are kept
/// as-is so that structural checks can reject them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignRecord {
  pub value: u64,
  pub identity: Token,
  pub other_tokens: Vec<Token>,
  pub script: Vec<u8>,
  pub registers: CampaignRegisters,
}

impl CampaignRecord {
  /// Parses a box as a campaign record with a given pricing layout.
  pub fn from_output(
    output: &Output,
    shape: PricingShape,
  ) -> Result<Self, Error> {
    let (identity, other_tokens) = output
      .tokens
      .split_first()
      .ok_or(Error::NoIdentityToken)?;

    let registers = CampaignRegisters::from_registers(&output.registers)?;
    if registers.pricing.shape() != shape {
      return Err(Error::PricingShape {
        expected: shape,
        found: registers.pricing.shape(),
      });
    }

    Ok(Self {
      value: output.value,
      identity: *identity,
      other_tokens: other_tokens.to_vec(),
      script: output.script.clone(),
      registers,
    })
  }

  /// Box form of this record.
  pub fn to_output(&self, creation_height: u32) -> Output {
    Output {
      value: self.value,
      script: self.script.clone(),
      tokens: self.tokens().copied().collect(),
      registers: self.registers.to_registers(),
      creation_height,
    }
  }

  pub fn identity_id(&self) -> &TokenId {
    &self.identity.id
  }

  /// Participation tokens held by the record.
  pub fn participation(&self) -> u64 {
    self.identity.amount
  }

  /// The token in the proof-of-funding position, whatever its id.
  pub fn proof_of_funding(&self) -> Option<&Token> {
    self.other_tokens.first()
  }

  /// Amount in the proof-of-funding position, zero when absent.
  pub fn proof_of_funding_amount(&self) -> u64 {
    self.proof_of_funding().map(|t| t.amount).unwrap_or(0)
  }

  /// All tokens of the record in box order.
  pub fn tokens(&self) -> impl Iterator<Item = &Token> {
    std::iter::once(&self.identity).chain(self.other_tokens.iter())
  }

  /// Number of distinct token slots held by the record.
  pub fn token_classes(&self) -> usize {
    1 + self.other_tokens.len()
  }
}
