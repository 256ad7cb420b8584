//! Small, side effect free predicates shared by the campaign validator and
//! the minting guard.
//!
//! Every predicate reduces to a boolean. Conditions that cannot be evaluated,
//! such as out of range slices or overflowing arithmetic, evaluate to false.

mod arithmetic;
mod bytes;
mod proposition;

pub use {arithmetic::*, bytes::*, proposition::*};
