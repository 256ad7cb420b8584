//! Checked 64 bit signed arithmetic.
//!
//! Ledger amounts are unsigned on the wire but contracts reason about them
//! as signed 64 bit integers, so that deltas can be negative. Any amount that
//! does not fit, and any operation that overflows, yields `None` and makes
//! the enclosing predicate false.

/// Signed 64 bit contract integer.
pub type Long = i64;

/// Converts a ledger amount to a contract integer.
pub fn long(amount: u64) -> Option<Long> {
  Long::try_from(amount).ok()
}

/// `to - from` of two ledger amounts as a contract integer.
pub fn delta(from: u64, to: u64) -> Option<Long> {
  long(to)?.checked_sub(long(from)?)
}

/// `amount * numerator / denominator`, with the division truncating toward
/// zero.
pub fn mul_div(amount: Long, numerator: Long, denominator: Long) -> Option<Long> {
  amount.checked_mul(numerator)?.checked_div(denominator)
}

/// Percentage of an amount, truncated.
pub fn percent_of(amount: Long, percent: Long) -> Option<Long> {
  mul_div(amount, percent, 100)
}

/// Verifies that a monotone value moved from `before` to `after` by exactly
/// `by`, and that `by` is a strictly positive step.
pub fn incremented_by(before: Long, after: Long, by: Long) -> bool {
  by > 0 && before.checked_add(by) == Some(after)
}
