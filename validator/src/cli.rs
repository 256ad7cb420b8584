use {
  bene_contract::Generation,
  bene_primitives::{Address, Digest32, Network, TokenId},
  bene_sdk::Constants,
  clap::{Args, Parser, Subcommand},
  std::path::PathBuf,
};

/// Bene campaign contracts
///
/// Builds campaign contract addresses and checks whether a proposed
/// transaction may spend a campaign record.
#[derive(Debug, Parser)]
pub struct CliOptions {
  #[clap(subcommand)]
  pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Prints the fingerprint and address of a campaign contract
  Address(ContractOptions),

  /// Prints the address of the identity token minting contract
  MintAddress(ContractOptions),

  /// Prints the template hash of a contract generation
  TemplateHash {
    #[clap(long, short, default_value = "v1_2", value_name = "GENERATION")]
    generation: Generation,

    #[clap(long, short, default_value = "mainnet", value_name = "NETWORK")]
    network: Network,
  },

  /// Evaluates the guard of one input of a transaction context file
  Verify {
    /// JSON file with the resolved inputs, outputs and height
    #[clap(long, short, value_name = "FILE")]
    context: PathBuf,

    /// Position of the input being spent
    #[clap(long, short, default_value = "0", value_name = "INDEX")]
    input: usize,
  },
}

#[derive(Debug, Args)]
pub struct ContractOptions {
  /// Address of the project owner
  #[clap(long, value_name = "ADDRESS")]
  owner: Address,

  /// Blake2b-256 of the developer fee recipient script, hex
  #[clap(long, value_name = "HASH")]
  pub dev_fee_hash: Digest32,

  /// Developer fee percentage
  #[clap(long, default_value = "5", value_name = "PERCENT")]
  dev_fee: u8,

  /// Proof-of-funding token id, hex
  #[clap(long, value_name = "TOKEN")]
  token_id: TokenId,

  /// Designated settlement asset id, hex
  #[clap(long, value_name = "TOKEN")]
  asset: Option<TokenId>,

  #[clap(long, short, default_value = "mainnet", value_name = "NETWORK")]
  pub network: Network,

  #[clap(long, short, default_value = "v1_2", value_name = "GENERATION")]
  pub generation: Generation,
}

impl ContractOptions {
  pub fn constants(&self) -> Constants {
    Constants {
      owner: self.owner.clone(),
      dev_fee_hash: None,
      dev_fee_percent: self.dev_fee,
      token_id: self.token_id,
      designated_asset: self.asset,
    }
  }
}
