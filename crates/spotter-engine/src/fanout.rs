//! Notification Fan-out — derive notification records from pipeline events.
//!
//! Not idempotent on its own: it trusts its callers (the dispatcher and the
//! resolver) to invoke it at most once per logical event. If that caller-side
//! idempotency ever broke, duplicate notifications would be the observable
//! symptom — the engine tests pin this coupling down.

use chrono::Utc;

use spotter_core::{
  engagement::{LikeEdge, MatchEntity},
  notification::{NotificationKind, NotificationRecord},
  store::EngagementStore,
};

/// One record telling `edge.to` that `edge.from` liked them.
pub async fn notify_like<S: EngagementStore>(
  store: &S,
  edge: &LikeEdge,
) -> Result<NotificationRecord, S::Error> {
  let record = NotificationRecord::new(
    edge.from,
    edge.to,
    NotificationKind::for_like(edge.kind),
    Utc::now(),
  );
  store.insert_notifications(vec![record.clone()]).await?;
  Ok(record)
}

/// The symmetric pair for a new match: one record per participant, each
/// naming the *other* as `from`, sharing a single timestamp so both users see
/// the match as simultaneous.
pub async fn notify_match<S: EngagementStore>(
  store: &S,
  entity: &MatchEntity,
) -> Result<(NotificationRecord, NotificationRecord), S::Error> {
  let at = Utc::now();
  let to_a =
    NotificationRecord::new(entity.user_b, entity.user_a, NotificationKind::Match, at);
  let to_b =
    NotificationRecord::new(entity.user_a, entity.user_b, NotificationKind::Match, at);

  store
    .insert_notifications(vec![to_a.clone(), to_b.clone()])
    .await?;
  Ok((to_a, to_b))
}
