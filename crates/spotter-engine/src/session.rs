//! The session driver — glue between the synchronous gesture machine and the
//! async pipeline.
//!
//! Commits are fire-and-forget: a commit-right spawns the dispatch and the
//! gesture path returns immediately, so the next card is never blocked on a
//! network round-trip. Outcomes, matches, and the exhausted signal are
//! published on a channel for the navigation and toast collaborators.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

use spotter_core::{
  engagement::{LikeKind, MatchEntity},
  store::EngagementStore,
  swipe::{Release, Settled, SwipeDecision, SwipeSession},
};

use crate::dispatch::{DispatchOutcome, Engine};

/// Events published by the driver for external collaborators.
#[derive(Debug, Clone)]
pub enum SessionSignal {
  /// A gesture committed; emitted before the dispatch completes.
  Decided(SwipeDecision),
  /// A fire-and-forget dispatch finished (successfully or not).
  Dispatched(DispatchOutcome),
  /// This session's dispatch completed a match — for celebratory UI.
  Matched(MatchEntity),
  /// The candidate sequence is spent; the caller should leave the screen.
  Exhausted,
}

/// Owns a [`SwipeSession`] for one actor and forwards its commits into the
/// pipeline without ever awaiting them on the gesture path.
pub struct SessionDriver<S> {
  engine:  Engine<S>,
  actor:   Uuid,
  session: SwipeSession,
  signals: UnboundedSender<SessionSignal>,
}

impl<S> SessionDriver<S>
where
  S: EngagementStore + 'static,
{
  /// Wrap `session` for `actor`. The receiver carries [`SessionSignal`]s; it
  /// keeps delivering in-flight dispatch outcomes even after the driver is
  /// abandoned.
  pub fn new(
    engine: Engine<S>,
    actor: Uuid,
    session: SwipeSession,
  ) -> (Self, UnboundedReceiver<SessionSignal>) {
    let (signals, receiver) = mpsc::unbounded_channel();
    (Self { engine, actor, session, signals }, receiver)
  }

  pub fn session(&self) -> &SwipeSession { &self.session }

  // ── Gesture forwarding ───────────────────────────────────────────────────

  pub fn grab(&mut self, index: usize) -> bool { self.session.grab(index) }

  pub fn drag_to(&mut self, dx: f32, dy: f32) -> bool {
    self.session.drag_to(dx, dy)
  }

  /// End the drag. On commit, the decision is dispatched (likes only —
  /// passes stay client-local) before the caller advances the animation.
  pub fn release(&mut self, vx: f32, vy: f32) -> Release {
    let release = self.session.release(vx, vy);
    if let Release::Commit(decision) = release {
      self.committed(decision);
    }
    release
  }

  /// Button-initiated superlike on the current card.
  pub fn superlike(&mut self) -> Option<SwipeDecision> {
    let decision = self.session.superlike()?;
    self.committed(decision);
    Some(decision)
  }

  /// Finish the in-flight card animation; signals `Exhausted` when the
  /// cursor passes the end of the sequence.
  pub fn settle(&mut self) -> Option<Settled> {
    let settled = self.session.settle();
    if settled == Some(Settled::Exhausted) {
      let _ = self.signals.send(SessionSignal::Exhausted);
    }
    settled
  }

  /// Leave the screen. Dropping the driver abandons only the UI state;
  /// dispatches already spawned run to completion in the background.
  pub fn abandon(mut self) { self.session.abandon(); }

  // ── Dispatch ─────────────────────────────────────────────────────────────

  fn committed(&self, decision: SwipeDecision) {
    let _ = self.signals.send(SessionSignal::Decided(decision));

    let kind = match decision {
      SwipeDecision::Like(_) => LikeKind::Like,
      SwipeDecision::Superlike(_) => LikeKind::Superlike,
      // Passes are never persisted.
      SwipeDecision::Pass(_) => return,
    };

    let engine = self.engine.clone();
    let actor = self.actor;
    let target = decision.target();
    let signals = self.signals.clone();

    tokio::spawn(async move {
      match engine.dispatch_like(actor, target, kind).await {
        Ok(outcome) => {
          if let DispatchOutcome::Persisted { matched: Some(entity), .. } = &outcome {
            let _ = signals.send(SessionSignal::Matched(entity.clone()));
          }
          let _ = signals.send(SessionSignal::Dispatched(outcome));
        }
        // The feed never serves the actor their own profile, so a rejected
        // dispatch here means a caller bug; log it and move on.
        Err(error) => tracing::warn!(%error, "dispatch rejected"),
      }
    });
  }
}
