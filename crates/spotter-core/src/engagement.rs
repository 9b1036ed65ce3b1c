//! Like edges and match entities — the persisted engagement graph.
//!
//! A like edge is directed and written exactly once per `(from, to, kind)`.
//! A match is undirected, exists at most once per unordered pair, and is
//! identified deterministically so that two clients racing to create it from
//! opposite directions collide on the same identity instead of duplicating.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Like edges ──────────────────────────────────────────────────────────────

/// The decision family a swipe commit belongs to. Passes are never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeKind {
  Like,
  Superlike,
}

impl LikeKind {
  /// The discriminant string stored in the `kind` column.
  pub fn discriminant(&self) -> &'static str {
    match self {
      Self::Like => "like",
      Self::Superlike => "superlike",
    }
  }

  pub fn from_discriminant(s: &str) -> Result<Self> {
    match s {
      "like" => Ok(Self::Like),
      "superlike" => Ok(Self::Superlike),
      other => Err(Error::UnknownKind(other.to_string())),
    }
  }
}

/// A directed, timestamped "I liked them" relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikeEdge {
  pub edge_id:    Uuid,
  pub from:       Uuid,
  pub to:         Uuid,
  pub kind:       LikeKind,
  /// Server-assigned; never changes after creation.
  pub created_at: DateTime<Utc>,
  /// Set once the reciprocal edge exists and a match has been resolved.
  pub matched:    bool,
}

/// Input to [`crate::store::EngagementStore::record_like`].
/// `edge_id` and `created_at` are always set by the store.
#[derive(Debug, Clone, Copy)]
pub struct NewLikeEdge {
  pub from: Uuid,
  pub to:   Uuid,
  pub kind: LikeKind,
}

// ─── Matches ─────────────────────────────────────────────────────────────────

/// An undirected relation between exactly two users, created the instant both
/// directed edges exist. `(user_a, user_b)` is always the sorted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEntity {
  pub match_id:   Uuid,
  pub user_a:     Uuid,
  pub user_b:     Uuid,
  pub created_at: DateTime<Utc>,
}

impl MatchEntity {
  /// The participant that is not `user_id`.
  pub fn other(&self, user_id: Uuid) -> Uuid {
    if self.user_a == user_id { self.user_b } else { self.user_a }
  }
}

/// The unordered pair, sorted so both directions agree on it.
pub fn sorted_pair(a: Uuid, b: Uuid) -> (Uuid, Uuid) {
  if a <= b { (a, b) } else { (b, a) }
}

/// Deterministic match identity for the unordered pair `{a, b}`.
///
/// SHA-256 over the sorted pair, truncated to 128 bits. Both sides of a
/// simultaneous reciprocal like derive the same id, so the second creation
/// attempt lands on an existing row instead of a second match. The result is
/// a stable 128-bit identity, not an RFC 4122 versioned UUID.
pub fn match_id_for(a: Uuid, b: Uuid) -> Uuid {
  let (lo, hi) = sorted_pair(a, b);

  let mut hasher = Sha256::new();
  hasher.update(lo.as_bytes());
  hasher.update(hi.as_bytes());
  let digest = hasher.finalize();

  let mut bytes = [0u8; 16];
  bytes.copy_from_slice(&digest[..16]);
  Uuid::from_bytes(bytes)
}
