//! Script templates of the campaign and minting contracts.
//!
//! A contract script is a sized script whose body is a one byte tag
//! followed by the contract constants. Scripts are deterministic, two
//! contracts built from the same constants have byte-identical scripts, and
//! decodable, so the executor can recover the rules guarding a box from the
//! box alone.

use {
  crate::ContractConfig,
  bene_primitives::{
    blake2b256,
    sized_body,
    sized_script,
    Digest32,
    GroupElement,
    SigmaProp,
  },
};

const CAMPAIGN_TAG: u8 = 0x01;
const MINT_TAG: u8 = 0x02;

/// Rules guarding a box, recovered from its script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
  /// A campaign record of the given contract instance.
  Campaign(ContractConfig),

  /// An identity token carrier committed to a campaign script fingerprint.
  Mint(Digest32),

  /// A plain public key condition.
  PublicKey(GroupElement),

  /// Anything else.
  Unknown,
}

impl Guard {
  pub fn of(script: &[u8]) -> Self {
    if let Some(pk) = SigmaProp::from_bytes(script.to_vec()).public_key() {
      return Guard::PublicKey(pk);
    }

    let decoded = match sized_body(script) {
      Some([CAMPAIGN_TAG, constants @ ..]) => {
        rmp_serde::from_slice(constants).ok().map(Guard::Campaign)
      }
      Some([MINT_TAG, fingerprint @ ..]) => {
        Digest32::try_from(fingerprint).ok().map(Guard::Mint)
      }
      _ => None,
    };

    // only canonical encodings are recognized
    match decoded {
      Some(guard) if guard.script().as_deref() == Some(script) => guard,
      _ => Guard::Unknown,
    }
  }

  fn script(&self) -> Option<Vec<u8>> {
    match self {
      Guard::Campaign(config) => Some(campaign_script(config)),
      Guard::Mint(fingerprint) => Some(mint_script(fingerprint)),
      Guard::PublicKey(pk) => Some(SigmaProp::prove_dlog(pk).prop_bytes().to_vec()),
      Guard::Unknown => None,
    }
  }
}

/// Script of a campaign contract instance.
pub fn campaign_script(config: &ContractConfig) -> Vec<u8> {
  let mut body = vec![CAMPAIGN_TAG];
  body.extend_from_slice(
    &rmp_serde::to_vec(config).expect("config is always serializable"),
  );
  sized_script(&body)
}

/// Script of the minting guard committed to a campaign script fingerprint.
pub fn mint_script(fingerprint: &Digest32) -> Vec<u8> {
  let mut body = vec![MINT_TAG];
  body.extend_from_slice(fingerprint.as_bytes());
  sized_script(&body)
}

/// Blake2b-256 of a script, the form in which scripts are committed to.
pub fn fingerprint(script: &[u8]) -> Digest32 {
  blake2b256(script)
}
