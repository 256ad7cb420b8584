mod common;
use {
  bene_contract::{evaluate, validate, Action, Generation},
  bene_primitives::{Counters, Output, Token},
  common::*,
};

const EXTRACTED: u64 = 100_000_000;
const DEV_FEE: u64 = 5_000_000;
const PROJECT: u64 = 93_900_000;

fn funded() -> Counters {
  Counters::new(MINIMUM, 0, 0)
}

#[test]
fn partial_withdrawal_replicates() {
  let config = config(Generation::V1_1);
  let this = record(&config, EXTRACTED + 50_000_000, 400, Some(500), funded());
  let next = successor(&this, 50_000_000, 400, Some(500), funded());

  let context = spend(
    &this,
    vec![next.to_output(1), pay(&owner(), PROJECT), pay_dev(DEV_FEE)],
    10,
  );
  assert_eq!(evaluate(&config, &context, 0), Ok(Action::WithdrawFunds));
}

#[test]
fn full_withdrawal_terminates_without_funding_tokens() {
  let config = config(Generation::V1_0);
  let this = record(&config, EXTRACTED, 400, None, funded());

  // the record is not recreated, participation tokens go to the owner
  let leftovers =
    pay(&owner(), 0).with_tokens(vec![Token::new(identity_id(), 400)]);

  let context = spend(
    &this,
    vec![leftovers, pay(&owner(), PROJECT), pay_dev(DEV_FEE)],
    10,
  );
  assert_eq!(evaluate(&config, &context, 0), Ok(Action::WithdrawFunds));
}

#[test]
fn termination_requires_funding_tokens_gone() {
  let config = config(Generation::V1_1);
  let this = record(&config, EXTRACTED, 400, Some(100), funded());

  let leftovers = pay(&owner(), 0).with_tokens(vec![
    Token::new(identity_id(), 400),
    Token::new(pft_id(), 100),
  ]);

  let context = spend(
    &this,
    vec![leftovers, pay(&owner(), PROJECT), pay_dev(DEV_FEE)],
    10,
  );
  assert!(!validate(&config, &context, 0));
}

#[test]
fn fee_and_amount_deviations_are_rejected() {
  let config = config(Generation::V1_1);
  let this = record(&config, EXTRACTED + 1, 400, Some(500), funded());
  let next = successor(&this, 1, 400, Some(500), funded());

  let ok = vec![next.to_output(1), pay(&owner(), PROJECT), pay_dev(DEV_FEE)];
  assert!(validate(&config, &spend(&this, ok, 10), 0));

  let mut wrong_dev_script = pay_dev(DEV_FEE);
  wrong_dev_script.script.push(0);

  let deviations: Vec<Vec<Output>> = vec![
    vec![next.to_output(1), pay(&owner(), PROJECT + 1), pay_dev(DEV_FEE)],
    vec![next.to_output(1), pay(&owner(), PROJECT), pay_dev(DEV_FEE - 1)],
    vec![next.to_output(1), pay(&stranger(), PROJECT), pay_dev(DEV_FEE)],
    vec![next.to_output(1), pay(&owner(), PROJECT), wrong_dev_script],
    vec![next.to_output(1), pay(&owner(), PROJECT)],
    vec![next.to_output(1)],
  ];

  for outputs in deviations {
    assert!(!validate(&config, &spend(&this, outputs, 10), 0));
  }
}

#[test]
fn withdrawal_keeps_counters_and_tokens() {
  let config = config(Generation::V1_1);
  let this = record(&config, EXTRACTED + 1, 400, Some(500), funded());

  let successors = [
    successor(&this, 1, 399, Some(500), funded()),
    successor(&this, 1, 400, Some(499), funded()),
    successor(&this, 1, 400, Some(500), Counters::new(MINIMUM, 0, 1)),
  ];

  for next in successors {
    let outputs =
      vec![next.to_output(1), pay(&owner(), PROJECT), pay_dev(DEV_FEE)];
    assert!(!validate(&config, &spend(&this, outputs, 10), 0));
  }
}

#[test]
fn withdrawal_needs_minimum() {
  let config = config(Generation::V1_1);
  let this = record(
    &config,
    EXTRACTED,
    400,
    None,
    Counters::new(MINIMUM - 1, 0, 0),
  );
  let leftovers =
    pay(&owner(), 0).with_tokens(vec![Token::new(identity_id(), 400)]);

  let context = spend(
    &this,
    vec![leftovers, pay(&owner(), PROJECT), pay_dev(DEV_FEE)],
    10,
  );
  assert!(!validate(&config, &context, 0));
}

#[test]
fn designated_asset_withdrawal_skips_fee_checks() {
  let config = designated_config();
  let this = record(&config, 2_000_000, 400, None, funded());
  let leftovers =
    pay(&owner(), 0).with_tokens(vec![Token::new(identity_id(), 400)]);

  // no fee outputs, no amount checks
  let context = spend(&this, vec![leftovers, pay(&owner(), 1)], 10);
  assert_eq!(evaluate(&config, &context, 0), Ok(Action::WithdrawFunds));

  // the owner still has to be paid
  let leftovers =
    pay(&owner(), 0).with_tokens(vec![Token::new(identity_id(), 400)]);
  let context = spend(&this, vec![leftovers, pay(&stranger(), 1)], 10);
  assert!(!validate(&config, &context, 0));
}

#[test]
fn withdraw_unsold_tokens_up_to_available() {
  let config = config(Generation::V1_1);
  // available: 500 - 100 sold = 400
  let this = record(&config, 100_000, 400, Some(500), funded());

  let next = successor(&this, 100_000, 400, Some(100), funded());
  let context = spend(&this, vec![next.to_output(1), pay(&owner(), 0)], 10);
  assert_eq!(
    evaluate(&config, &context, 0),
    Ok(Action::WithdrawUnsoldTokens)
  );

  let next = successor(&this, 100_000, 400, Some(99), funded());
  let context = spend(&this, vec![next.to_output(1), pay(&owner(), 0)], 10);
  assert!(!validate(&config, &context, 0));
}

#[test]
fn withdraw_unsold_tokens_pays_owner_and_keeps_value() {
  let config = config(Generation::V1_1);
  let this = record(&config, 100_000, 400, Some(500), funded());
  let next = successor(&this, 100_000, 400, Some(300), funded());

  let context = spend(&this, vec![next.to_output(1)], 10);
  assert!(!validate(&config, &context, 0));

  let context =
    spend(&this, vec![next.to_output(1), pay(&stranger(), 0)], 10);
  assert!(!validate(&config, &context, 0));

  let drained = successor(&this, 99_999, 400, Some(300), funded());
  let context =
    spend(&this, vec![drained.to_output(1), pay(&owner(), 0)], 10);
  assert!(!validate(&config, &context, 0));
}
