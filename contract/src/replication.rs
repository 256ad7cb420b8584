use crate::{CampaignRecord, Replication};

/// Checks that `next` is a valid copy of `this` for every field that must
/// never change over the lifetime of a campaign: identity token id, block
/// limit, minimum threshold, pricing, owner details, project metadata and
/// script. The copy must also hold one or two token classes.
///
/// Counters, token amounts and value are not part of the replica and are
/// checked by the individual actions.
pub fn is_replica(
  replication: Replication,
  this: &CampaignRecord,
  next: &CampaignRecord,
) -> bool {
  let (current, successor) = (&this.registers, &next.registers);

  let same_fields = this.identity_id() == next.identity_id()
    && current.block_limit == successor.block_limit
    && current.minimum_threshold == successor.minimum_threshold
    && current.pricing == successor.pricing
    && current.owner_details == successor.owner_details
    && current.project_metadata == successor.project_metadata
    && this.script == next.script;

  let token_classes = matches!(next.token_classes(), 1 | 2);

  let legacy = match replication {
    Replication::Legacy => legacy_proof_of_funding_clause(next),
    Replication::Corrected => true,
  };

  same_fields && token_classes && legacy
}

// First generation clause: no proof-of-funding slot, or a slot with an
// empty id, or a slot whose id equals itself. The last disjunct always
// holds.
fn legacy_proof_of_funding_clause(next: &CampaignRecord) -> bool {
  match next.proof_of_funding() {
    None => true,
    Some(token) => {
      token.id.is_empty()
        || next.other_tokens.first().map(|slot| slot.id) == Some(token.id)
    }
  }
}
