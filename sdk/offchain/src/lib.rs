//! Off-chain helpers for building and inspecting Bene campaigns.

mod builder;
mod project;
mod query;

pub use {
  bene_vm::{InMemoryStateStore, State, StateDiff},
  builder::{
    CompiledContract,
    Constants,
    ContractBuilder,
    Error as BuilderError,
    TemplateBuilder,
  },
  project::Project,
  query::{CampaignBox, Query},
};
