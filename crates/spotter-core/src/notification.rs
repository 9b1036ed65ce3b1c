//! Notification records — derived, append-mostly event rows.
//!
//! The engine only ever creates these. The notifications screen (an external
//! collaborator) flips the `read` flag; nothing deletes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, engagement::LikeKind};

/// What happened to the recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
  Like,
  Superlike,
  Match,
  /// Written by the chat collaborator, read through the same query surface.
  Message,
}

impl NotificationKind {
  /// The discriminant string stored in the `kind` column.
  pub fn discriminant(&self) -> &'static str {
    match self {
      Self::Like => "like",
      Self::Superlike => "superlike",
      Self::Match => "match",
      Self::Message => "message",
    }
  }

  pub fn from_discriminant(s: &str) -> Result<Self> {
    match s {
      "like" => Ok(Self::Like),
      "superlike" => Ok(Self::Superlike),
      "match" => Ok(Self::Match),
      "message" => Ok(Self::Message),
      other => Err(Error::UnknownKind(other.to_string())),
    }
  }

  /// The notification kind announcing a like edge of `kind`.
  pub fn for_like(kind: LikeKind) -> Self {
    match kind {
      LikeKind::Like => Self::Like,
      LikeKind::Superlike => Self::Superlike,
    }
  }
}

/// A single notification row. `read` is the only field that ever mutates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecord {
  pub notification_id: Uuid,
  pub from:            Uuid,
  pub to:              Uuid,
  pub kind:            NotificationKind,
  pub created_at:      DateTime<Utc>,
  pub read:            bool,
}

impl NotificationRecord {
  /// A fresh unread record. `created_at` is passed in so fan-out can stamp a
  /// pair of records with one shared timestamp.
  pub fn new(
    from: Uuid,
    to: Uuid,
    kind: NotificationKind,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      notification_id: Uuid::new_v4(),
      from,
      to,
      kind,
      created_at,
      read: false,
    }
  }
}
