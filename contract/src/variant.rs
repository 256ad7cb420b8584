use {
  crate::{ContractConfig, Generation},
  bene_primitives::{Pricing, TokenId},
};

/// How strictly a successor record is compared to its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replication {
  /// First generation rules. Carries an extra proof-of-funding clause that
  /// holds for every successor and thus has no effect.
  Legacy,

  /// Rules of every later generation.
  Corrected,
}

/// Asset the campaign escrows and sells its tokens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetMode {
  /// The native ledger asset, held as the record's value.
  Native,

  /// A fungible token, held as a token amount in the record.
  Designated(TokenId),
}

/// Rules a campaign record is validated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variant {
  pub replication: Replication,
  pub asset: AssetMode,
}

impl Variant {
  /// Picks the rules for a record of a given contract instance.
  ///
  /// Only third generation contracts settle in a designated asset, and only
  /// when one was configured and the record's pricing register marks the
  /// asset as present (non-zero id length). Everything else settles in the
  /// native asset.
  pub fn resolve(config: &ContractConfig, pricing: &Pricing) -> Self {
    let replication = match config.generation() {
      Generation::V1_0 => Replication::Legacy,
      Generation::V1_1 | Generation::V1_2 => Replication::Corrected,
    };

    let asset = match (config.generation(), config.designated_asset(), pricing)
    {
      (
        Generation::V1_2,
        Some(asset),
        Pricing::RateWithAsset { asset_id_len, .. },
      ) if *asset_id_len != 0 => AssetMode::Designated(*asset),
      _ => AssetMode::Native,
    };

    Self { replication, asset }
  }
}
