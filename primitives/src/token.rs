use {
  crate::TokenId,
  serde::{Deserialize, Serialize},
};

/// An amount of one token class held by an output box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
  pub id: TokenId,
  pub amount: u64,
}

impl Token {
  pub fn new(id: TokenId, amount: u64) -> Self {
    Self { id, amount }
  }
}

/// Amount of the first token with the given id in a list of tokens,
/// or zero when the list holds no such token.
pub fn amount_of(tokens: &[Token], id: &TokenId) -> u64 {
  tokens
    .iter()
    .find(|t| &t.id == id)
    .map(|t| t.amount)
    .unwrap_or(0)
}
