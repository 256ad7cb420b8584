use {
  bene_contract::{fingerprint, CampaignRecord, ContractConfig, Generation, Guard},
  bene_primitives::{BoxId, Digest32, Output, TokenId},
};

/// A campaign record box found on the ledger together with the contract
/// instance guarding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignBox {
  pub id: BoxId,
  pub config: ContractConfig,
  pub record: CampaignRecord,
}

impl CampaignBox {
  /// Recognizes a campaign record box. Boxes guarded by anything other
  /// than a campaign contract, or whose contents do not parse as a record
  /// of the contract's generation, are not campaigns.
  pub fn from_output(id: BoxId, output: &Output) -> Option<Self> {
    let Guard::Campaign(config) = Guard::of(&output.script) else {
      return None;
    };

    let shape = config.generation().pricing_shape();
    let record = CampaignRecord::from_output(output, shape).ok()?;
    Some(Self { id, config, record })
  }

  pub fn fingerprint(&self) -> Digest32 {
    fingerprint(&self.record.script)
  }
}

/// Selects campaign records out of a set of ledger boxes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
  /// Every campaign record.
  Any,

  /// The record of the campaign identified by the given token.
  Identity(TokenId),

  /// Records of campaigns sharing the given contract instance.
  Fingerprint(Digest32),

  /// Records validated by the rules of the given generation.
  Generation(Generation),
}

impl Query {
  pub fn matches(&self, campaign: &CampaignBox) -> bool {
    match self {
      Query::Any => true,
      Query::Identity(id) => campaign.record.identity_id() == id,
      Query::Fingerprint(hash) => &campaign.fingerprint() == hash,
      Query::Generation(generation) => {
        campaign.config.generation() == *generation
      }
    }
  }

  /// All matching campaign records among the given boxes.
  pub fn run<'a>(
    &'a self,
    boxes: impl IntoIterator<Item = (&'a BoxId, &'a Output)> + 'a,
  ) -> impl Iterator<Item = CampaignBox> + 'a {
    boxes
      .into_iter()
      .filter_map(|(id, output)| CampaignBox::from_output(*id, output))
      .filter(move |campaign| self.matches(campaign))
  }

  /// The first matching campaign record. Identity tokens are unique, so
  /// for [`Query::Identity`] this is the only one.
  pub fn first<'a>(
    &'a self,
    boxes: impl IntoIterator<Item = (&'a BoxId, &'a Output)> + 'a,
  ) -> Option<CampaignBox> {
    self.run(boxes).next()
  }
}
