use {
  crate::{collect, State, StateDiff},
  bene_contract::{evaluate, validate_mint, Guard, Rejection},
  bene_primitives::{BoxId, Context, Transaction},
  rayon::prelude::*,
  std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
  },
  thiserror::Error,
  tracing::{debug, info},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("State access error: {0}")]
  State(#[from] collect::Error),

  #[error("Campaign record {0} rejected the transaction: {1}")]
  Rejected(BoxId, Rejection),

  #[error("Minting guard of {0} rejected the transaction")]
  MintRejected(BoxId),

  #[error("Box {0} is guarded by an unrecognized script")]
  UnknownScript(BoxId),

  #[error("Guard evaluation cancelled by other failed guards")]
  Cancelled,
}

/// Executes a transaction
///
/// This function resolves all boxes spent by the transaction, checks that
/// value and tokens are conserved, then evaluates the guarding script of
/// every spent box against the proposed outputs and returns a StateDiff
/// object that can be applied to the ledger state if all guards accept.
///
/// Public key guards are accepted as-is, signatures are verified outside
/// of the executor.
pub fn execute(
  tx: &Transaction,
  state: &impl State,
  height: u32,
) -> Result<StateDiff, Error> {
  // This context object is passed to every input guard during evaluation
  // stage. It contains all resolved inputs and proposed outputs.
  let context = collect::context(state, tx, height)?;
  collect::conservation(tx, &context)?;

  match parallel_invoke_guards(tx, &context) {
    Ok(()) => {
      info!(
        "transaction {} accepted at height {height}: {} in, {} out",
        tx.hash(),
        tx.inputs.len(),
        tx.outputs.len()
      );
      Ok(collect::outputs(tx))
    }
    Err(e) => {
      debug!("transaction {} rejected: {e}", tx.hash());
      Err(e)
    }
  }
}

/// Runs the guards of all inputs in parallel and returns Ok(()) if all of
/// them accept the transaction.
///
/// Otherwise if any guard rejects, then all other guards will be
/// cancelled and the reason for the failure will be returned.
fn parallel_invoke_guards(
  tx: &Transaction,
  context: &Context,
) -> Result<(), Error> {
  let cancelled = Arc::new(AtomicBool::new(false));
  (0..context.inputs.len())
    .into_par_iter()
    .map(|index| {
      if cancelled.load(Ordering::Acquire) {
        return Err(Error::Cancelled);
      }

      let result = invoke(tx.inputs[index], index, context);
      if result.is_err() {
        // on first error cancel evaluating all
        // remaining guards of the transaction.
        cancelled.store(true, Ordering::Release);
      }
      result
    })
    .reduce_with(|a, b| match (a, b) {
      (Ok(_), Ok(_)) => Ok(()),
      (Err(e), Ok(_)) => Err(e),
      (Ok(_), Err(e)) => Err(e),
      (Err(Error::Cancelled), Err(e)) => Err(e), // skip cancelled
      (Err(e), Err(Error::Cancelled)) => Err(e), // skip cancelled
      (Err(e1), Err(_)) => Err(e1),
    })
    .unwrap_or(Ok(()))
}

fn invoke(id: BoxId, index: usize, context: &Context) -> Result<(), Error> {
  match Guard::of(&context.inputs[index].script) {
    Guard::Campaign(config) => evaluate(&config, context, index)
      .map(|action| debug!("campaign box {id} spent by {action}"))
      .map_err(|reason| Error::Rejected(id, reason)),
    Guard::Mint(fingerprint) => {
      if validate_mint(&fingerprint, context, index) {
        Ok(())
      } else {
        Err(Error::MintRejected(id))
      }
    }
    Guard::PublicKey(_) => Ok(()),
    Guard::Unknown => Err(Error::UnknownScript(id)),
  }
}
