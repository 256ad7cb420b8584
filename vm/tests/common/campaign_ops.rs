use {
  super::{campaign, owner, pft_id, BLOCK_LIMIT, MINIMUM, RATE},
  bene_contract::{
    campaign_script,
    fingerprint,
    mint_script,
    CampaignRecord,
    ContractConfig,
    Generation,
    MINER_FEE,
  },
  bene_primitives::{
    BoxId,
    CampaignRegisters,
    Counters,
    Output,
    Pricing,
    Registers,
    Token,
    TokenId,
    Transaction,
  },
  bene_vm::State,
};

/// Native value locked in the identity token carrier and later in the
/// genesis campaign record.
pub const CARRIER_VALUE: u64 = 2_000_000;

fn fetch(state: &impl State, id: &BoxId) -> anyhow::Result<Output> {
  state
    .get(id)
    .ok_or_else(|| anyhow::anyhow!("box {id} not found"))
}

/// Adds `add` and removes `sub` units of a token from a token list,
/// dropping the slot when it reaches zero.
fn adjust(tokens: &mut Vec<Token>, id: TokenId, add: u64, sub: u64) {
  match tokens.iter_mut().find(|t| t.id == id) {
    Some(token) => token.amount = token.amount + add - sub,
    None => tokens.push(Token::new(id, add - sub)),
  }
  tokens.retain(|t| t.amount != 0);
}

fn set_proof_of_funding(record: &mut CampaignRecord, amount: u64) {
  record.other_tokens = match amount {
    0 => vec![],
    amount => vec![Token::new(pft_id(), amount)],
  };
}

fn price(amount: u64) -> u64 {
  amount * RATE as u64
}

/// Creates the single use identity token carrier. The identity token is
/// minted with the id of the spent owner box and the carrier is guarded by
/// the minting contract committed to the campaign script.
pub fn create_carrier(
  state: &impl State,
  owner_box: BoxId,
  config: &ContractConfig,
  participation: u64,
) -> anyhow::Result<Transaction> {
  let funds = fetch(state, &owner_box)?;
  let committed = fingerprint(&campaign_script(config));

  let carrier = Output {
    value: CARRIER_VALUE,
    script: mint_script(&committed),
    tokens: vec![Token::new(owner_box, participation)],
    registers: Registers::default(),
    creation_height: 0,
  };

  let change = Output::pay_to(&owner(), funds.value - CARRIER_VALUE)
    .with_tokens(funds.tokens);

  Ok(Transaction::new(vec![owner_box], vec![carrier, change]))
}

/// Spends the identity token carrier into the genesis campaign record.
pub fn mint_campaign(
  state: &impl State,
  carrier_box: BoxId,
  config: &ContractConfig,
  height: u32,
) -> anyhow::Result<Transaction> {
  let carrier = fetch(state, &carrier_box)?;
  let pricing = match config.generation() {
    Generation::V1_2 => Pricing::RateWithAsset {
      rate: RATE,
      asset_id_len: 0,
    },
    _ => Pricing::Rate(RATE),
  };

  let record = CampaignRecord {
    value: carrier.value,
    identity: carrier.tokens[0],
    other_tokens: vec![],
    script: campaign_script(config),
    registers: CampaignRegisters {
      block_limit: BLOCK_LIMIT,
      minimum_threshold: MINIMUM,
      counters: Counters::default(),
      pricing,
      owner_details: b"{\"owner\":\"project\"}".to_vec(),
      project_metadata: b"{\"title\":\"campaign\"}".to_vec(),
    },
  };

  Ok(Transaction::new(vec![carrier_box], vec![
    record.to_output(height)
  ]))
}

/// Owner moves proof-of-funding tokens from one of their boxes into the
/// campaign record.
pub fn add_tokens(
  state: &impl State,
  campaign_box: BoxId,
  funder_box: BoxId,
  config: &ContractConfig,
  amount: u64,
  height: u32,
) -> anyhow::Result<Transaction> {
  let record = campaign(state, &campaign_box, config)?;
  let mut funder = fetch(state, &funder_box)?;

  let mut next = record.clone();
  set_proof_of_funding(&mut next, record.proof_of_funding_amount() + amount);
  adjust(&mut funder.tokens, pft_id(), 0, amount);

  Ok(Transaction::new(vec![campaign_box, funder_box], vec![
    next.to_output(height),
    funder,
  ]))
}

/// Buyer pays for participation tokens at the campaign rate.
pub fn buy(
  state: &impl State,
  campaign_box: BoxId,
  buyer_box: BoxId,
  config: &ContractConfig,
  amount: u64,
  height: u32,
) -> anyhow::Result<Transaction> {
  let record = campaign(state, &campaign_box, config)?;
  let mut buyer = fetch(state, &buyer_box)?;

  let mut next = record.clone();
  next.identity.amount -= amount;
  next.value += price(amount);
  next.registers.counters.sold += amount as i64;

  buyer.value -= price(amount);
  adjust(&mut buyer.tokens, *record.identity_id(), amount, 0);

  Ok(Transaction::new(vec![campaign_box, buyer_box], vec![
    next.to_output(height),
    buyer,
  ]))
}

/// Holder returns participation tokens and takes back what they paid.
pub fn refund(
  state: &impl State,
  campaign_box: BoxId,
  holder_box: BoxId,
  config: &ContractConfig,
  amount: u64,
  height: u32,
) -> anyhow::Result<Transaction> {
  let record = campaign(state, &campaign_box, config)?;
  let mut holder = fetch(state, &holder_box)?;

  let mut next = record.clone();
  next.identity.amount += amount;
  next.value -= price(amount);
  next.registers.counters.refunded += amount as i64;

  holder.value += price(amount);
  adjust(&mut holder.tokens, *record.identity_id(), 0, amount);

  Ok(Transaction::new(vec![campaign_box, holder_box], vec![
    next.to_output(height),
    holder,
  ]))
}

/// Holder swaps participation tokens one for one against proof-of-funding
/// tokens.
pub fn exchange(
  state: &impl State,
  campaign_box: BoxId,
  holder_box: BoxId,
  config: &ContractConfig,
  amount: u64,
  height: u32,
) -> anyhow::Result<Transaction> {
  let record = campaign(state, &campaign_box, config)?;
  let mut holder = fetch(state, &holder_box)?;

  let mut next = record.clone();
  next.identity.amount += amount;
  set_proof_of_funding(&mut next, record.proof_of_funding_amount() - amount);
  next.registers.counters.exchanged += amount as i64;

  adjust(&mut holder.tokens, *record.identity_id(), 0, amount);
  adjust(&mut holder.tokens, pft_id(), amount, 0);

  Ok(Transaction::new(vec![campaign_box, holder_box], vec![
    next.to_output(height),
    holder,
  ]))
}

/// Owner takes back proof-of-funding tokens that were never sold.
pub fn withdraw_unsold(
  state: &impl State,
  campaign_box: BoxId,
  config: &ContractConfig,
  amount: u64,
  height: u32,
) -> anyhow::Result<Transaction> {
  let record = campaign(state, &campaign_box, config)?;

  let mut next = record.clone();
  set_proof_of_funding(&mut next, record.proof_of_funding_amount() - amount);

  let unsold =
    Output::pay_to(&owner(), 0).with_tokens(vec![Token::new(pft_id(), amount)]);

  Ok(Transaction::new(vec![campaign_box], vec![
    next.to_output(height),
    unsold,
  ]))
}

/// Owner withdraws raised funds. Withdrawing everything terminates the
/// campaign, the participation tokens left in it go to the owner.
pub fn withdraw_funds(
  state: &impl State,
  campaign_box: BoxId,
  config: &ContractConfig,
  amount: Option<u64>,
  height: u32,
) -> anyhow::Result<Transaction> {
  let record = campaign(state, &campaign_box, config)?;
  let extracted = amount.unwrap_or(record.value);
  let dev_fee = extracted * config.dev_fee_percent() as u64 / 100;
  let project = extracted - dev_fee - MINER_FEE as u64;

  let first = match amount {
    Some(amount) => {
      let mut next = record.clone();
      next.value -= amount;
      next.to_output(height)
    }
    None => {
      Output::pay_to(&owner(), 0).with_tokens(record.tokens().copied().collect())
    }
  };

  let dev = Output {
    value: dev_fee,
    script: super::dev_script(),
    tokens: vec![],
    registers: Registers::default(),
    creation_height: height,
  };

  Ok(Transaction::new(vec![campaign_box], vec![
    first,
    Output::pay_to(&owner(), project),
    dev,
    Output::pay_to(&super::miner(), MINER_FEE as u64),
  ]))
}
