//! The Decision Dispatcher — persists a like decision exactly once and
//! triggers match resolution.
//!
//! Side effects run in a fixed order: edge write, feed-exclusion append,
//! match resolution, like notification. The first backend failure stops the
//! sequence and is surfaced as [`DispatchOutcome::TransientFailure`] naming
//! the stage that failed; nothing is retried and nothing is rolled back. The
//! UI cursor has already advanced by the time this runs — a failed write is a
//! "silent miss" by design.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use spotter_core::{
  Error, Result,
  engagement::{LikeEdge, LikeKind, MatchEntity, NewLikeEdge},
  notification::NotificationRecord,
  profile::Candidate,
  store::{EngagementStore, NotificationQuery},
};

use crate::{fanout, resolve};

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// Which pipeline stage a transient failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStage {
  Edge,
  FeedExclusion,
  Resolve,
  Notify,
}

/// The tagged, one-way result of a dispatch. Consumed by a non-blocking side
/// channel (log line, toast); the gesture state machine never awaits it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchOutcome {
  /// The edge was written; `matched` is set when reciprocity completed a
  /// match during this dispatch.
  Persisted {
    edge:    LikeEdge,
    matched: Option<MatchEntity>,
  },
  /// The edge already existed. Nothing downstream was triggered, so a
  /// UI or network retry cannot double-count or double-notify.
  Duplicate { from: Uuid, to: Uuid },
  /// A backend write failed. The decision stays UI-committed; the miss is
  /// reported, not remediated.
  TransientFailure {
    stage:   DispatchStage,
    message: String,
  },
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// The engagement pipeline over a shared store handle.
///
/// Cloning is cheap — the store is reference-counted — so an `Engine` can be
/// handed to spawned fire-and-forget tasks.
pub struct Engine<S> {
  store: Arc<S>,
}

impl<S> Clone for Engine<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: EngagementStore> Engine<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Persist a like decision for `actor` on `target`.
  ///
  /// `actor` is always passed explicitly — the engine never reads an ambient
  /// "current user". The only hard error is a self-like; every backend
  /// failure is folded into the returned outcome.
  pub async fn dispatch_like(
    &self,
    actor: Uuid,
    target: Uuid,
    kind: LikeKind,
  ) -> Result<DispatchOutcome> {
    if actor == target {
      return Err(Error::SelfLike(actor));
    }

    let input = NewLikeEdge { from: actor, to: target, kind };
    let mut edge = match self.store.record_like(input).await {
      Ok(Some(edge)) => edge,
      Ok(None) => {
        tracing::debug!(%actor, %target, "duplicate like ignored");
        return Ok(DispatchOutcome::Duplicate { from: actor, to: target });
      }
      Err(e) => return Ok(transient(DispatchStage::Edge, e)),
    };

    if let Err(e) = self.store.mark_decided(actor, target).await {
      return Ok(transient(DispatchStage::FeedExclusion, e));
    }

    // Not retried on failure: the match self-heals the next time either
    // side's dispatch re-runs resolution.
    let matched = match resolve::resolve(&*self.store, actor, target).await {
      Ok(matched) => matched,
      Err(e) => return Ok(transient(DispatchStage::Resolve, e)),
    };
    edge.matched = matched.is_some();

    if let Err(e) = fanout::notify_like(&*self.store, &edge).await {
      return Ok(transient(DispatchStage::Notify, e));
    }

    Ok(DispatchOutcome::Persisted { edge, matched })
  }

  /// Re-run match resolution for `(actor, target)` without writing an edge.
  pub async fn resolve(
    &self,
    actor: Uuid,
    target: Uuid,
  ) -> std::result::Result<Option<MatchEntity>, S::Error> {
    resolve::resolve(&*self.store, actor, target).await
  }

  // ── Read surface for external collaborators ─────────────────────────────

  /// Candidates `actor` has not yet decided on.
  pub async fn feed(
    &self,
    actor: Uuid,
    limit: usize,
  ) -> std::result::Result<Vec<Candidate>, S::Error> {
    self.store.candidates_for(actor, limit).await
  }

  pub async fn upsert_profile(
    &self,
    profile: Candidate,
  ) -> std::result::Result<(), S::Error> {
    self.store.upsert_profile(profile).await
  }

  pub async fn get_profile(
    &self,
    user_id: Uuid,
  ) -> std::result::Result<Option<Candidate>, S::Error> {
    self.store.get_profile(user_id).await
  }

  pub async fn matches_for(
    &self,
    user_id: Uuid,
  ) -> std::result::Result<Vec<MatchEntity>, S::Error> {
    self.store.matches_for(user_id).await
  }

  /// Notifications for the recipient, newest first.
  pub async fn notifications_for(
    &self,
    query: NotificationQuery,
  ) -> std::result::Result<Vec<NotificationRecord>, S::Error> {
    self.store.notifications_for(query).await
  }

  /// Flip a notification's `read` flag. `false` if no such record.
  pub async fn mark_read(
    &self,
    notification_id: Uuid,
  ) -> std::result::Result<bool, S::Error> {
    self.store.mark_read(notification_id).await
  }
}

fn transient<E: std::error::Error>(stage: DispatchStage, error: E) -> DispatchOutcome {
  tracing::warn!(?stage, %error, "dispatch failed; decision stays UI-committed");
  DispatchOutcome::TransientFailure { stage, message: error.to_string() }
}
