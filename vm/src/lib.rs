mod collect;
mod execution;
mod state;

pub use {
  collect::Error as StateError,
  execution::{execute, Error},
  state::{InMemoryStateStore, State, StateDiff},
};
