//! The `EngagementStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `spotter-store-sqlite`).
//! Higher layers (`spotter-engine`, `spotter-api`) depend on this abstraction,
//! not on any concrete backend. Every idempotency invariant the Match Resolver
//! relies on is expressed here: `record_like` refuses duplicates,
//! `create_match` is an upsert keyed on the deterministic pair identity.

use std::future::Future;

use uuid::Uuid;

use crate::{
  engagement::{LikeEdge, MatchEntity, NewLikeEdge},
  notification::NotificationRecord,
  profile::Candidate,
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`EngagementStore::notifications_for`].
#[derive(Debug, Clone, Copy)]
pub struct NotificationQuery {
  /// The recipient whose notifications to return.
  pub to:          Uuid,
  /// If `true`, only records whose `read` flag is still unset.
  pub unread_only: bool,
  pub limit:       Option<usize>,
}

impl NotificationQuery {
  pub fn for_recipient(to: Uuid) -> Self {
    Self { to, unread_only: false, limit: None }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over an engagement store backend.
///
/// There is no cross-client transaction or lock anywhere above this trait;
/// correctness under concurrent writers rests on the identity-based
/// idempotency of `record_like` and `create_match`.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait EngagementStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Profiles ──────────────────────────────────────────────────────────

  /// Create or replace a profile keyed on `user_id`.
  fn upsert_profile(
    &self,
    profile: Candidate,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Retrieve a profile by id. Returns `None` if not found.
  fn get_profile(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Option<Candidate>, Self::Error>> + Send + '_;

  /// The feed query: profiles `actor` has not yet decided on, excluding
  /// `actor` themselves. Finite and re-fetched per session; a passed
  /// candidate is never excluded (passes are client-local).
  fn candidates_for(
    &self,
    actor: Uuid,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Candidate>, Self::Error>> + Send + '_;

  // ── Like edges ────────────────────────────────────────────────────────

  /// Persist a like edge exactly once per `(from, to, kind)`.
  ///
  /// Returns `None` when the edge already exists — the caller must treat
  /// that as "already dispatched" and trigger nothing downstream.
  fn record_like(
    &self,
    input: NewLikeEdge,
  ) -> impl Future<Output = Result<Option<LikeEdge>, Self::Error>> + Send + '_;

  /// Append `target` to `actor`'s denormalised decided list, consumed by
  /// [`Self::candidates_for`] for exclusion. Idempotent.
  fn mark_decided(
    &self,
    actor: Uuid,
    target: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Look up the directed edge `from → to` of either kind.
  fn find_edge(
    &self,
    from: Uuid,
    to: Uuid,
  ) -> impl Future<Output = Result<Option<LikeEdge>, Self::Error>> + Send + '_;

  /// Set the `matched` flag on the directed edge `from → to`. A no-op if the
  /// edge does not exist or is already marked.
  fn mark_matched(
    &self,
    from: Uuid,
    to: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Matches ───────────────────────────────────────────────────────────

  /// Create the match for the unordered pair `{a, b}` under its
  /// deterministic identity, or return the existing one.
  ///
  /// The boolean is `true` only for the call that actually created the row;
  /// a racing second creation attempt gets `false`. This is the at-most-one
  /// guarantee the Match Resolver builds on.
  fn create_match(
    &self,
    a: Uuid,
    b: Uuid,
  ) -> impl Future<Output = Result<(MatchEntity, bool), Self::Error>> + Send + '_;

  /// All matches `user_id` participates in, newest first.
  fn matches_for(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<MatchEntity>, Self::Error>> + Send + '_;

  // ── Notifications ─────────────────────────────────────────────────────

  /// Append notification records. A multi-record call is atomic so a match's
  /// symmetric pair is never half-visible.
  fn insert_notifications(
    &self,
    records: Vec<NotificationRecord>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Notifications matching `query`, ordered by `created_at` descending.
  fn notifications_for(
    &self,
    query: NotificationQuery,
  ) -> impl Future<Output = Result<Vec<NotificationRecord>, Self::Error>> + Send + '_;

  /// Flip the `read` flag. Returns `false` if no such record exists.
  fn mark_read(
    &self,
    notification_id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
