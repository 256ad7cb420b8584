use bene_primitives::{blake2b256, Digest32};

/// Verifies that the blake2b-256 hash of some bytes equals an expected
/// commitment. Used to check that a script is the one committed to.
pub fn hash_equals(bytes: &[u8], expected: &Digest32) -> bool {
  &blake2b256(bytes) == expected
}
