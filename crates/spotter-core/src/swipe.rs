//! The swipe interaction controller — a per-card gesture state machine.
//!
//! Purely synchronous local state: gesture tracking never suspends and never
//! touches a backend. The machine converts a continuous 2-D drag on the
//! topmost card into one of three outcomes — commit-right (like), commit-left
//! (pass), or cancel — and advances the session cursor on commit.
//!
//! Only the card at the cursor is interactive. That is enforced structurally
//! by [`SwipeSession::grab`], not visually: a grab on any other index is
//! rejected, so two concurrent decisions can never be emitted for different
//! cards.

use uuid::Uuid;

use crate::profile::Candidate;

/// Horizontal displacement needed to commit, as a fraction of viewport width.
///
/// The threshold scales with device width so the gesture feels the same on a
/// phone and a tablet; it is never an absolute pixel count.
pub const COMMIT_FRACTION: f32 = 0.25;

// ─── Geometry ────────────────────────────────────────────────────────────────

/// The visible area the card stack is rendered into, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
  pub width:  f32,
  pub height: f32,
}

impl Viewport {
  pub fn new(width: f32, height: f32) -> Self {
    debug_assert!(width > 0.0, "viewport width must be positive");
    Self { width, height }
  }

  /// The horizontal displacement at which a release commits.
  pub fn commit_threshold(&self) -> f32 { self.width * COMMIT_FRACTION }
}

/// Displacement and release velocity captured at commit time.
///
/// Consumed by the exit animation only — the vertical component and the
/// velocity shape the card's trajectory off-screen but never influence
/// whether the gesture committed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fling {
  pub dx: f32,
  pub dy: f32,
  pub vx: f32,
  pub vy: f32,
}

// ─── States and outcomes ─────────────────────────────────────────────────────

/// Which way the card leaves the screen on commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
  /// Commit-left: pass.
  Left,
  /// Commit-right: like.
  Right,
  /// Button-initiated superlike; never produced by a drag release.
  Up,
}

/// The gesture phase of the card at the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
  /// Card at rest; cursor unchanged.
  Idle,
  /// Gesture active; the card follows the finger.
  Dragging { dx: f32, dy: f32 },
  /// Threshold exceeded; the card is animating off-screen.
  Committing { direction: Direction, fling: Fling },
  /// Threshold not met; the card is springing back to rest.
  Returning { dx: f32, dy: f32 },
}

/// The discrete decision a committed gesture produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDecision {
  Like(Uuid),
  Superlike(Uuid),
  /// Client-local only; never persisted, so the candidate may reappear in a
  /// future session.
  Pass(Uuid),
}

impl SwipeDecision {
  pub fn target(&self) -> Uuid {
    match self {
      Self::Like(id) | Self::Superlike(id) | Self::Pass(id) => *id,
    }
  }
}

/// Outcome of [`SwipeSession::release`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
  /// Threshold exceeded; the decision is final and the card animates out.
  Commit(SwipeDecision),
  /// Threshold not met (or no drag was active); the card springs back.
  Cancel,
}

/// Outcome of [`SwipeSession::settle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
  /// A commit animation finished; the cursor moved to the next candidate.
  Advanced,
  /// A commit animation finished and the sequence is spent — the caller
  /// (navigation, an external collaborator) is expected to leave the screen.
  Exhausted,
  /// A spring-back finished; cursor unchanged.
  Rested,
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// Client-local, per-run swipe state: an ordered candidate sequence, a
/// cursor, and the pending-gesture phase. Created when the swipe screen
/// mounts, dropped when the user leaves or exhausts the sequence; never
/// persisted across sessions.
#[derive(Debug, Clone)]
pub struct SwipeSession {
  viewport:   Viewport,
  candidates: Vec<Candidate>,
  cursor:     usize,
  phase:      Phase,
}

impl SwipeSession {
  pub fn new(viewport: Viewport, candidates: Vec<Candidate>) -> Self {
    Self { viewport, candidates, cursor: 0, phase: Phase::Idle }
  }

  pub fn viewport(&self) -> Viewport { self.viewport }

  pub fn cursor(&self) -> usize { self.cursor }

  pub fn phase(&self) -> Phase { self.phase }

  /// The interactive card, if any remain.
  pub fn current(&self) -> Option<&Candidate> { self.candidates.get(self.cursor) }

  /// Cards behind the current one, for the stacked peek visual. Read-only:
  /// these render but never accept gestures.
  pub fn peek(&self, depth: usize) -> Option<&Candidate> {
    self.candidates.get(self.cursor + depth)
  }

  pub fn is_exhausted(&self) -> bool { self.cursor >= self.candidates.len() }

  // ── Gesture input ───────────────────────────────────────────────────────

  /// Start a drag on the card at `index`.
  ///
  /// Returns `false` — and changes nothing — unless `index` is the cursor,
  /// the machine is idle, and candidates remain.
  pub fn grab(&mut self, index: usize) -> bool {
    if index != self.cursor || self.is_exhausted() {
      return false;
    }
    if !matches!(self.phase, Phase::Idle) {
      return false;
    }
    self.phase = Phase::Dragging { dx: 0.0, dy: 0.0 };
    true
  }

  /// Track finger movement. Ignored unless a drag is active.
  pub fn drag_to(&mut self, dx: f32, dy: f32) -> bool {
    match self.phase {
      Phase::Dragging { .. } => {
        self.phase = Phase::Dragging { dx, dy };
        true
      }
      _ => false,
    }
  }

  /// End the drag with release velocity `(vx, vy)`.
  ///
  /// Commits if and only if the horizontal displacement magnitude meets the
  /// viewport-proportional threshold. Vertical displacement and velocity are
  /// recorded for the exit animation but never decide the outcome.
  pub fn release(&mut self, vx: f32, vy: f32) -> Release {
    let Phase::Dragging { dx, dy } = self.phase else {
      return Release::Cancel;
    };

    if dx.abs() < self.viewport.commit_threshold() {
      self.phase = Phase::Returning { dx, dy };
      return Release::Cancel;
    }

    let direction = if dx > 0.0 { Direction::Right } else { Direction::Left };
    let decision = match (direction, self.current()) {
      (Direction::Right, Some(c)) => SwipeDecision::Like(c.user_id),
      (_, Some(c)) => SwipeDecision::Pass(c.user_id),
      // grab() refuses exhausted sessions, so a drag always has a card.
      (_, None) => {
        self.phase = Phase::Idle;
        return Release::Cancel;
      }
    };

    self.phase = Phase::Committing { direction, fling: Fling { dx, dy, vx, vy } };
    Release::Commit(decision)
  }

  /// Commit the current card upward as a superlike (button path, not a drag).
  /// Only valid while idle on a remaining card.
  pub fn superlike(&mut self) -> Option<SwipeDecision> {
    if !matches!(self.phase, Phase::Idle) {
      return None;
    }
    let target = self.current()?.user_id;
    self.phase = Phase::Committing {
      direction: Direction::Up,
      fling:     Fling { dx: 0.0, dy: 0.0, vx: 0.0, vy: 0.0 },
    };
    Some(SwipeDecision::Superlike(target))
  }

  /// Finish the in-flight animation: advance past a committed card, or put a
  /// returning card back to rest. `None` if nothing was animating.
  pub fn settle(&mut self) -> Option<Settled> {
    match self.phase {
      Phase::Committing { .. } => {
        self.cursor += 1;
        self.phase = Phase::Idle;
        Some(if self.is_exhausted() { Settled::Exhausted } else { Settled::Advanced })
      }
      Phase::Returning { .. } => {
        self.phase = Phase::Idle;
        Some(Settled::Rested)
      }
      _ => None,
    }
  }

  /// The screen unmounted mid-gesture: abandon the UI state. A dispatch
  /// already sent downstream is not cancelled — that is the dispatcher's
  /// fire-and-forget contract.
  pub fn abandon(&mut self) { self.phase = Phase::Idle; }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn candidate(name: &str) -> Candidate {
    Candidate {
      user_id:      Uuid::new_v4(),
      display_name: name.into(),
      birth_date:   NaiveDate::from_ymd_opt(1998, 3, 2).unwrap(),
      photo_url:    None,
    }
  }

  fn session(n: usize, width: f32) -> SwipeSession {
    let candidates = (0..n).map(|i| candidate(&format!("c{i}"))).collect();
    SwipeSession::new(Viewport::new(width, 2.0 * width), candidates)
  }

  #[test]
  fn drag_past_threshold_commits_right_as_like() {
    let mut s = session(2, 400.0);
    let target = s.current().unwrap().user_id;

    assert!(s.grab(0));
    assert!(s.drag_to(120.0, -30.0)); // threshold is 100
    assert_eq!(s.release(0.4, 0.1), Release::Commit(SwipeDecision::Like(target)));
    assert_eq!(s.settle(), Some(Settled::Advanced));
    assert_eq!(s.cursor(), 1);
  }

  #[test]
  fn drag_past_threshold_commits_left_as_pass() {
    let mut s = session(2, 400.0);
    let target = s.current().unwrap().user_id;

    assert!(s.grab(0));
    s.drag_to(-150.0, 12.0);
    assert_eq!(s.release(-0.8, 0.0), Release::Commit(SwipeDecision::Pass(target)));
    assert_eq!(s.settle(), Some(Settled::Advanced));
  }

  #[test]
  fn short_drag_cancels_and_keeps_cursor() {
    let mut s = session(2, 400.0);

    assert!(s.grab(0));
    s.drag_to(60.0, 5.0);
    assert_eq!(s.release(0.0, 0.0), Release::Cancel);
    assert!(matches!(s.phase(), Phase::Returning { .. }));
    assert_eq!(s.settle(), Some(Settled::Rested));
    assert_eq!(s.cursor(), 0);
  }

  #[test]
  fn threshold_scales_with_viewport_width() {
    // The same 110px drag commits on the narrow screen but cancels on the
    // wide one: the threshold is a function of width, not a constant.
    let mut narrow = session(1, 400.0); // threshold 100
    assert!(narrow.grab(0));
    narrow.drag_to(110.0, 0.0);
    assert!(matches!(narrow.release(0.0, 0.0), Release::Commit(_)));

    let mut wide = session(1, 800.0); // threshold 200
    assert!(wide.grab(0));
    wide.drag_to(110.0, 0.0);
    assert_eq!(wide.release(0.0, 0.0), Release::Cancel);
  }

  #[test]
  fn vertical_displacement_never_commits() {
    let mut s = session(1, 400.0);
    assert!(s.grab(0));
    s.drag_to(20.0, -500.0);
    assert_eq!(s.release(0.0, -3.0), Release::Cancel);
  }

  #[test]
  fn only_the_cursor_card_accepts_gestures() {
    let mut s = session(3, 400.0);

    assert!(!s.grab(1));
    assert!(!s.grab(2));
    assert!(matches!(s.phase(), Phase::Idle));

    // A drag without a grab is ignored, and releasing produces no decision.
    assert!(!s.drag_to(300.0, 0.0));
    assert_eq!(s.release(1.0, 0.0), Release::Cancel);
    assert_eq!(s.cursor(), 0);
  }

  #[test]
  fn grab_is_rejected_mid_gesture() {
    let mut s = session(2, 400.0);
    assert!(s.grab(0));
    assert!(!s.grab(0));
  }

  #[test]
  fn settle_past_last_candidate_signals_exhausted() {
    let mut s = session(1, 400.0);

    assert!(s.grab(0));
    s.drag_to(200.0, 0.0);
    assert!(matches!(s.release(0.0, 0.0), Release::Commit(_)));
    assert_eq!(s.settle(), Some(Settled::Exhausted));
    assert!(s.is_exhausted());
    assert!(s.current().is_none());
    assert!(!s.grab(0));
  }

  #[test]
  fn superlike_commits_upward_from_idle_only() {
    let mut s = session(2, 400.0);
    let target = s.current().unwrap().user_id;

    assert_eq!(s.superlike(), Some(SwipeDecision::Superlike(target)));
    assert!(matches!(
      s.phase(),
      Phase::Committing { direction: Direction::Up, .. }
    ));
    // Already committing: a second press does nothing.
    assert_eq!(s.superlike(), None);

    assert_eq!(s.settle(), Some(Settled::Advanced));
    assert_eq!(s.cursor(), 1);
  }

  #[test]
  fn abandon_drops_the_gesture_without_advancing() {
    let mut s = session(2, 400.0);
    assert!(s.grab(0));
    s.drag_to(300.0, 0.0);
    s.abandon();
    assert!(matches!(s.phase(), Phase::Idle));
    assert_eq!(s.cursor(), 0);
    assert_eq!(s.settle(), None);
  }

  #[test]
  fn peek_exposes_upcoming_cards_read_only() {
    let s = session(3, 400.0);
    assert_eq!(s.peek(0).unwrap().user_id, s.current().unwrap().user_id);
    assert!(s.peek(1).is_some());
    assert!(s.peek(3).is_none());
  }
}
