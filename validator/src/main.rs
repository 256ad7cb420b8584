use {
  crate::cli::{CliOptions, Command},
  anyhow::Context as _,
  bene_contract::{evaluate, validate_mint, Guard},
  bene_primitives::Context,
  bene_sdk::{ContractBuilder, TemplateBuilder},
  clap::Parser,
  tracing::{info, subscriber::set_global_default},
  tracing_subscriber::{EnvFilter, FmtSubscriber},
};

mod cli;

fn verify(context: &Context, input: usize) -> anyhow::Result<String> {
  let spent = context
    .inputs
    .get(input)
    .ok_or_else(|| anyhow::anyhow!("context has no input at position {input}"))?;

  match Guard::of(&spent.script) {
    Guard::Campaign(config) => match evaluate(&config, context, input) {
      Ok(action) => Ok(format!("accepted: {action}")),
      Err(rejection) => Ok(format!("rejected: {rejection}")),
    },
    Guard::Mint(fingerprint) => {
      if validate_mint(&fingerprint, context, input) {
        Ok("accepted: mint".to_owned())
      } else {
        Ok("rejected: output does not mint the committed campaign".to_owned())
      }
    }
    Guard::PublicKey(pk) => Ok(format!("requires a signature of {pk:?}")),
    Guard::Unknown => anyhow::bail!("input {input} has an unrecognized script"),
  }
}

fn main() -> anyhow::Result<()> {
  // configure logging, RUST_LOG controls verbosity
  set_global_default(
    FmtSubscriber::builder()
      .with_env_filter(EnvFilter::from_default_env())
      .with_writer(std::io::stderr)
      .finish(),
  )?;

  let opts = CliOptions::parse();
  info!("command: {opts:?}");

  match opts.command {
    Command::Address(contract) => {
      let builder = TemplateBuilder::new(contract.network, contract.dev_fee_hash);
      let config = builder.config(&contract.constants(), contract.generation)?;
      let compiled = builder.compile(&config);
      println!("fingerprint: {}", compiled.fingerprint);
      println!("address: {}", compiled.address);
    }
    Command::MintAddress(contract) => {
      let builder = TemplateBuilder::new(contract.network, contract.dev_fee_hash);
      let config = builder.config(&contract.constants(), contract.generation)?;
      println!("{}", builder.mint_contract(&config).address);
    }
    Command::TemplateHash {
      generation,
      network,
    } => {
      let builder = TemplateBuilder::new(network, Default::default());
      println!("{}", builder.template_hash(generation));
    }
    Command::Verify {
      context: path,
      input,
    } => {
      let json = std::fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;
      let context: Context = serde_json::from_str(&json)
        .with_context(|| format!("parsing {}", path.display()))?;
      println!("{}", verify(&context, input)?);
    }
  }

  Ok(())
}
