use {
  crate::{State, StateDiff},
  bene_primitives::{BoxId, Context, TokenId, Transaction},
  std::collections::{BTreeMap, BTreeSet},
  thiserror::Error,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("Transaction spends a box ({0}) that does not exist")]
  MissingInput(BoxId),

  #[error("Transaction spends the same box ({0}) more than once")]
  DuplicateInput(BoxId),

  #[error("Transaction has no inputs")]
  NoInputs,

  #[error("Native value is not conserved: {inputs} in, {outputs} out")]
  ValueNotConserved { inputs: u128, outputs: u128 },

  #[error(
    "Token {id} is not conserved: {inputs} in, {outputs} out and it cannot \
     be minted by this transaction"
  )]
  TokenNotConserved {
    id: TokenId,
    inputs: u128,
    outputs: u128,
  },
}

/// In case all input guards accept the transaction, then this is the set
/// of state mutations that will be applied to the ledger: every spent box
/// is removed and every created box is inserted under its id.
pub fn outputs(transaction: &Transaction) -> StateDiff {
  let mut output = StateDiff::default();
  for input in &transaction.inputs {
    output.remove(input);
  }
  for (id, created) in transaction.identified_outputs() {
    output.set(id, created.clone());
  }
  output
}

/// Resolves all inputs of a transaction against the current state and
/// builds the context every input guard is evaluated with.
pub fn context(
  state: &impl State,
  transaction: &Transaction,
  height: u32,
) -> Result<Context, Error> {
  if transaction.inputs.is_empty() {
    return Err(Error::NoInputs);
  }

  let mut seen = BTreeSet::new();
  let mut inputs = Vec::with_capacity(transaction.inputs.len());
  for id in &transaction.inputs {
    if !seen.insert(*id) {
      return Err(Error::DuplicateInput(*id));
    }
    inputs.push(state.get(id).ok_or(Error::MissingInput(*id))?);
  }

  Ok(Context::new(inputs, transaction.outputs.clone(), height))
}

/// Verifies that the transaction neither creates nor destroys value.
///
/// The native asset must be exactly conserved. No token may appear in the
/// outputs in a larger total than in the inputs, except a freshly minted
/// token whose id is the id of the first spent box. Tokens may be burned.
pub fn conservation(
  transaction: &Transaction,
  context: &Context,
) -> Result<(), Error> {
  let value_in: u128 = context.inputs.iter().map(|o| o.value as u128).sum();
  let value_out: u128 = context.outputs.iter().map(|o| o.value as u128).sum();
  if value_in != value_out {
    return Err(Error::ValueNotConserved {
      inputs: value_in,
      outputs: value_out,
    });
  }

  let totals = |boxes: &[bene_primitives::Output]| {
    let mut totals = BTreeMap::<TokenId, u128>::new();
    for token in boxes.iter().flat_map(|o| o.tokens.iter()) {
      *totals.entry(token.id).or_default() += token.amount as u128;
    }
    totals
  };

  let tokens_in = totals(&context.inputs);
  let mintable = transaction.inputs.first();

  for (id, amount) in totals(&context.outputs) {
    let available = tokens_in.get(&id).copied().unwrap_or(0);
    if amount > available && Some(&id) != mintable {
      return Err(Error::TokenNotConserved {
        id,
        inputs: available,
        outputs: amount,
      });
    }
  }

  Ok(())
}
