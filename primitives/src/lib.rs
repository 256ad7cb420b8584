mod address;
mod b58;
mod digest;
mod encoding;
mod output;
mod proposition;
mod registers;
mod token;
mod transaction;

pub use {
  address::{Address, Error as AddressError, Network},
  b58::ToBase58String,
  digest::{blake2b256, sha256, BoxId, Digest32, TokenId},
  output::Output,
  proposition::{
    sized_body,
    sized_script,
    GroupElement,
    SigmaProp,
    PROVE_DLOG_OPCODE,
    SIGMA_PROP_TAG,
    SIZED_HEADER,
    TRIVIAL_HEADER,
  },
  registers::{
    CampaignRegisters,
    Counters,
    Error as RegisterError,
    Pricing,
    PricingShape,
    RegisterId,
    Registers,
  },
  token::{amount_of, Token},
  transaction::{Context, Transaction},
};
