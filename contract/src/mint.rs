use {
  bene_primitives::{Context, Digest32},
  bene_stdpred::hash_equals,
  tracing::trace,
};

/// Minting guard of an identity token carrier.
///
/// The carrier (the box at `self_index`) may only be spent into output 0,
/// which must receive the full amount of the carrier's first token, must be
/// the only output holding that token, and must carry the campaign script
/// the carrier committed to.
pub fn validate_mint(
  fingerprint: &Digest32,
  context: &Context,
  self_index: usize,
) -> bool {
  let accepted = check_mint(fingerprint, context, self_index).unwrap_or(false);
  if !accepted {
    trace!("mint of input {self_index} rejected");
  }
  accepted
}

fn check_mint(
  fingerprint: &Digest32,
  context: &Context,
  self_index: usize,
) -> Option<bool> {
  let carrier = context.inputs.get(self_index)?.tokens.first()?;
  let record = context.outputs.first()?;
  let minted = record.tokens.first()?;

  let spend_all = minted.id == carrier.id && minted.amount == carrier.amount;
  let single_holder = context
    .outputs
    .iter()
    .skip(1)
    .all(|output| output.token_amount(&carrier.id) == 0);

  Some(spend_all && single_holder && hash_equals(&record.script, fingerprint))
}
