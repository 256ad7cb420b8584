use {
  bene_primitives::{BoxId, Output},
  serde::{Deserialize, Serialize},
  std::collections::{BTreeMap, BTreeSet, HashMap},
};

/// Represents a change in the set of unspent boxes.
///
/// Statediffs are meant to be accumulated and logically the entire
/// state of the ledger is the result of cumulative application
/// of consecutive state diffs.
///
/// A transaction produces a statediff that removes the boxes it spends
/// and inserts the boxes it creates. Diffs of consecutive transactions
/// can be merged into one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateDiff {
  upserts: BTreeMap<BoxId, Output>,
  deletes: BTreeSet<BoxId>,
}

impl StateDiff {
  /// Inserts a box under a given id.
  ///
  /// If the state diff had a box stored under this id
  /// then the old value is returned, otherwise `None` is returned.
  pub fn set(&mut self, id: BoxId, output: Output) -> Option<Output> {
    self.deletes.remove(&id);
    self.upserts.insert(id, output)
  }

  /// Removes a box under a given id.
  ///
  /// If the state diff contained a box with the given id
  /// then the removed value is returned, otherwise `None`.
  pub fn remove(&mut self, id: &BoxId) -> Option<Output> {
    self.deletes.insert(*id);
    self.upserts.remove(id)
  }

  /// Merges a state diff with a newer diff.
  ///
  /// Applying the resulting diff is equivalent to
  /// applyting the two merged diff consecutively on
  /// any state store.
  pub fn merge(self, newer: StateDiff) -> StateDiff {
    let mut upserts = self.upserts;
    let mut deletes = self.deletes;
    for (id, output) in newer.upserts {
      deletes.remove(&id);
      upserts.insert(id, output);
    }
    for id in newer.deletes {
      upserts.remove(&id);
      deletes.insert(id);
    }
    StateDiff { upserts, deletes }
  }

  /// Iterate over all box changes in a state diff.
  ///
  /// There are two variants of changes:
  ///   1. (BoxId, Output) => Means that the box was created.
  ///   2. (BoxId, None) => Means that the box was spent.
  pub fn iter(&self) -> impl Iterator<Item = (&BoxId, Option<&Output>)> {
    self
      .upserts
      .iter()
      .map(|(id, output)| (id, Some(output)))
      .chain(self.deletes.iter().map(|id| (id, None)))
  }
}

impl State for StateDiff {
  fn get(&self, id: &BoxId) -> Option<Output> {
    self.upserts.get(id).cloned()
  }

  fn apply(&mut self, diff: StateDiff) {
    *self = std::mem::take(self).merge(diff);
  }
}

pub trait State {
  fn get(&self, id: &BoxId) -> Option<Output>;
  fn apply(&mut self, diff: StateDiff);
}

#[derive(Debug, Default)]
pub struct InMemoryStateStore {
  data: HashMap<BoxId, Output>,
}

impl InMemoryStateStore {
  pub fn iter(&self) -> impl Iterator<Item = (&BoxId, &Output)> {
    self.data.iter()
  }
}

impl State for InMemoryStateStore {
  fn get(&self, id: &BoxId) -> Option<Output> {
    self.data.get(id).cloned()
  }

  fn apply(&mut self, diff: StateDiff) {
    for (k, v) in diff.upserts {
      self.data.insert(k, v);
    }

    for id in diff.deletes {
      self.data.remove(&id);
    }
  }
}
