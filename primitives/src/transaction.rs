use {
  crate::{b58::ToBase58String, blake2b256, BoxId, Digest32, Output},
  once_cell::sync::OnceCell,
  serde::{Deserialize, Serialize},
};

#[derive(Clone, Serialize, Deserialize)]
pub struct Transaction {
  /// Boxes consumed by this transaction, in order.
  ///
  /// Each of them must exist in the current ledger state and the guarding
  /// script of every one of them must be satisfied by this transaction.
  pub inputs: Vec<BoxId>,

  /// Boxes created by this transaction, in order.
  ///
  /// Contracts address outputs by position, so the order is part of the
  /// transaction's meaning.
  pub outputs: Vec<Output>,

  #[serde(skip)]
  hash_cache: OnceCell<Digest32>,
}

impl Transaction {
  pub fn new(inputs: Vec<BoxId>, outputs: Vec<Output>) -> Self {
    Self {
      inputs,
      outputs,
      hash_cache: OnceCell::new(),
    }
  }

  /// Hash of the transaction that uniquely identifies it.
  pub fn hash(&self) -> &Digest32 {
    self.hash_cache.get_or_init(|| {
      let mut preimage = Vec::new();
      for input in &self.inputs {
        preimage.extend_from_slice(input.as_bytes());
      }
      preimage.extend_from_slice(
        &rmp_serde::to_vec(&self.outputs)
          .expect("outputs are always serializable"),
      );
      blake2b256(&preimage)
    })
  }

  /// Id of the output at a given position in this transaction.
  pub fn output_id(&self, index: u16) -> BoxId {
    let mut preimage = self.hash().as_bytes().to_vec();
    preimage.extend_from_slice(&index.to_be_bytes());
    blake2b256(&preimage)
  }

  /// All outputs paired with their box ids.
  pub fn identified_outputs(&self) -> impl Iterator<Item = (BoxId, &Output)> {
    self
      .outputs
      .iter()
      .enumerate()
      .map(|(ix, out)| (self.output_id(ix as u16), out))
  }
}

impl core::fmt::Debug for Transaction {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("Transaction")
      .field("hash", &self.hash().to_b58())
      .field("inputs", &self.inputs)
      .field("outputs", &self.outputs)
      .finish()
  }
}

/// Everything a guarding script may look at when it is evaluated.
///
/// Built by the executor for every transaction once all inputs are resolved
/// against the current ledger state. It is the same for every input of the
/// transaction, only the position of the box being spent differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
  /// Resolved input boxes, in transaction order.
  pub inputs: Vec<Output>,

  /// Proposed output boxes, in transaction order.
  pub outputs: Vec<Output>,

  /// Height of the block that would include the transaction.
  pub height: u32,
}

impl Context {
  pub fn new(inputs: Vec<Output>, outputs: Vec<Output>, height: u32) -> Self {
    Self {
      inputs,
      outputs,
      height,
    }
  }
}
