use {
  crate::{token, Registers, SigmaProp, Token, TokenId},
  serde::{Deserialize, Serialize},
};

/// Represents the basic unit of ledger state: an immutable box that is
/// created by one transaction and consumed, as a whole, by another.
///
/// A box holds an amount of the native asset, up to a handful of tokens,
/// and up to six registers of additional typed data. It is guarded by a
/// script that must be satisfied before the box can be spent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
  /// Amount of the native ledger asset held by this box.
  pub value: u64,

  /// Serialized guarding script (proposition bytes) of this box.
  #[serde(with = "crate::encoding")]
  pub script: Vec<u8>,

  /// Ordered list of tokens held by this box.
  ///
  /// Order is significant. Contracts address tokens by position, for
  /// example a campaign record always carries its identity token first.
  pub tokens: Vec<Token>,

  /// Additional registers R4..R9.
  #[serde(default)]
  pub registers: Registers,

  /// Height at which the creating transaction was built.
  #[serde(default)]
  pub creation_height: u32,
}

impl Output {
  /// A box paying `value` to the owner of an authorization condition.
  pub fn pay_to(owner: &SigmaProp, value: u64) -> Self {
    Self {
      value,
      script: owner.prop_bytes().to_vec(),
      tokens: vec![],
      registers: Registers::default(),
      creation_height: 0,
    }
  }

  pub fn with_tokens(mut self, tokens: Vec<Token>) -> Self {
    self.tokens = tokens;
    self
  }

  /// Amount of a given token held by this box, zero if absent.
  pub fn token_amount(&self, id: &TokenId) -> u64 {
    token::amount_of(&self.tokens, id)
  }
}
