//! The Match Resolver — check-then-create under a deterministic identity.
//!
//! Both sides of a reciprocal like may run this concurrently from opposite
//! directions with no shared lock. Correctness does not depend on who runs
//! first: the match row is keyed on an identity derived from the sorted pair,
//! so the second creation attempt lands on the existing row and is a no-op.
//! This is the single invariant the whole pipeline leans on.

use uuid::Uuid;

use spotter_core::{engagement::MatchEntity, store::EngagementStore};

use crate::fanout;

/// Resolve a freshly written edge `actor → target`.
///
/// Returns `None` when no reciprocal edge exists yet (the normal branch —
/// the match completes later from the other direction). Returns the match
/// when reciprocity holds, whether this call created it or lost the race.
/// Either kind of reciprocal edge counts: a superlike answers a like.
///
/// Match notifications fan out only from the call that actually created the
/// row, so exactly one symmetric pair exists per match.
pub async fn resolve<S: EngagementStore>(
  store: &S,
  actor: Uuid,
  target: Uuid,
) -> Result<Option<MatchEntity>, S::Error> {
  if store.find_edge(target, actor).await?.is_none() {
    return Ok(None);
  }

  let (entity, created) = store.create_match(actor, target).await?;

  store.mark_matched(actor, target).await?;
  store.mark_matched(target, actor).await?;

  if created {
    tracing::info!(match_id = %entity.match_id, "match created");
    fanout::notify_match(store, &entity).await?;
  }

  Ok(Some(entity))
}
