//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as ISO 8601
//! dates, kinds as their discriminant strings, and UUIDs as hyphenated
//! lowercase strings. The hyphenated lowercase form sorts the same way as the
//! raw bytes, which the `matches(user_a < user_b)` CHECK relies on.

use chrono::{DateTime, NaiveDate, Utc};
use spotter_core::{
  engagement::{LikeEdge, LikeKind, MatchEntity},
  notification::{NotificationKind, NotificationRecord},
  profile::Candidate,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── Timestamps and dates ────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_date(d: NaiveDate) -> String { d.to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  s.parse().map_err(|e: chrono::ParseError| Error::DateParse(e.to_string()))
}

// ─── Kind discriminants ──────────────────────────────────────────────────────

pub fn encode_like_kind(k: LikeKind) -> &'static str { k.discriminant() }

pub fn decode_like_kind(s: &str) -> Result<LikeKind> {
  Ok(LikeKind::from_discriminant(s)?)
}

pub fn encode_notification_kind(k: NotificationKind) -> &'static str {
  k.discriminant()
}

pub fn decode_notification_kind(s: &str) -> Result<NotificationKind> {
  Ok(NotificationKind::from_discriminant(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `profiles` row.
pub struct RawProfile {
  pub user_id:      String,
  pub display_name: String,
  pub birth_date:   String,
  pub photo_url:    Option<String>,
}

impl RawProfile {
  pub fn into_candidate(self) -> Result<Candidate> {
    Ok(Candidate {
      user_id:      decode_uuid(&self.user_id)?,
      display_name: self.display_name,
      birth_date:   decode_date(&self.birth_date)?,
      photo_url:    self.photo_url,
    })
  }
}

/// Raw strings read directly from a `like_edges` row.
pub struct RawLikeEdge {
  pub edge_id:    String,
  pub from_id:    String,
  pub to_id:      String,
  pub kind:       String,
  pub created_at: String,
  pub matched:    bool,
}

impl RawLikeEdge {
  pub fn into_edge(self) -> Result<LikeEdge> {
    Ok(LikeEdge {
      edge_id:    decode_uuid(&self.edge_id)?,
      from:       decode_uuid(&self.from_id)?,
      to:         decode_uuid(&self.to_id)?,
      kind:       decode_like_kind(&self.kind)?,
      created_at: decode_dt(&self.created_at)?,
      matched:    self.matched,
    })
  }
}

/// Raw strings read directly from a `matches` row.
pub struct RawMatch {
  pub match_id:   String,
  pub user_a:     String,
  pub user_b:     String,
  pub created_at: String,
}

impl RawMatch {
  pub fn into_match(self) -> Result<MatchEntity> {
    Ok(MatchEntity {
      match_id:   decode_uuid(&self.match_id)?,
      user_a:     decode_uuid(&self.user_a)?,
      user_b:     decode_uuid(&self.user_b)?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `notifications` row.
pub struct RawNotification {
  pub notification_id: String,
  pub from_id:         String,
  pub to_id:           String,
  pub kind:            String,
  pub created_at:      String,
  pub read:            bool,
}

impl RawNotification {
  pub fn into_record(self) -> Result<NotificationRecord> {
    Ok(NotificationRecord {
      notification_id: decode_uuid(&self.notification_id)?,
      from:            decode_uuid(&self.from_id)?,
      to:              decode_uuid(&self.to_id)?,
      kind:            decode_notification_kind(&self.kind)?,
      created_at:      decode_dt(&self.created_at)?,
      read:            self.read,
    })
  }
}
