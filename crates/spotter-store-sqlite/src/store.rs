//! [`SqliteStore`] — the SQLite implementation of [`EngagementStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use spotter_core::{
  engagement::{self, LikeEdge, MatchEntity, NewLikeEdge},
  notification::NotificationRecord,
  profile::Candidate,
  store::{EngagementStore, NotificationQuery},
};

use crate::{
  Error, Result,
  encode::{
    RawLikeEdge, RawMatch, RawNotification, RawProfile, encode_date, encode_dt,
    encode_like_kind, encode_notification_kind, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An engagement store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All writes
/// serialise through one connection, so the `INSERT OR IGNORE` idempotency
/// below is the only coordination concurrent dispatchers need.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── EngagementStore impl ────────────────────────────────────────────────────

impl EngagementStore for SqliteStore {
  type Error = Error;

  // ── Profiles ──────────────────────────────────────────────────────────────

  async fn upsert_profile(&self, profile: Candidate) -> Result<()> {
    let user_id_str = encode_uuid(profile.user_id);
    let display_name = profile.display_name;
    let birth_date_str = encode_date(profile.birth_date);
    let photo_url = profile.photo_url;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO profiles (user_id, display_name, birth_date, photo_url)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT (user_id) DO UPDATE SET
             display_name = excluded.display_name,
             birth_date   = excluded.birth_date,
             photo_url    = excluded.photo_url",
          rusqlite::params![user_id_str, display_name, birth_date_str, photo_url],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn get_profile(&self, user_id: Uuid) -> Result<Option<Candidate>> {
    let id_str = encode_uuid(user_id);

    let raw: Option<RawProfile> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT user_id, display_name, birth_date, photo_url
               FROM profiles WHERE user_id = ?1",
              rusqlite::params![id_str],
              |row| {
                Ok(RawProfile {
                  user_id:      row.get(0)?,
                  display_name: row.get(1)?,
                  birth_date:   row.get(2)?,
                  photo_url:    row.get(3)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawProfile::into_candidate).transpose()
  }

  async fn candidates_for(&self, actor: Uuid, limit: usize) -> Result<Vec<Candidate>> {
    let actor_str = encode_uuid(actor);
    let limit_val = limit as i64;

    let raws: Vec<RawProfile> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT user_id, display_name, birth_date, photo_url
           FROM profiles
           WHERE user_id != ?1
             AND user_id NOT IN (SELECT target_id FROM decided WHERE actor_id = ?1)
           ORDER BY user_id
           LIMIT ?2",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![actor_str, limit_val], |row| {
            Ok(RawProfile {
              user_id:      row.get(0)?,
              display_name: row.get(1)?,
              birth_date:   row.get(2)?,
              photo_url:    row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProfile::into_candidate).collect()
  }

  // ── Like edges ────────────────────────────────────────────────────────────

  async fn record_like(&self, input: NewLikeEdge) -> Result<Option<LikeEdge>> {
    let edge = LikeEdge {
      edge_id:    Uuid::new_v4(),
      from:       input.from,
      to:         input.to,
      kind:       input.kind,
      created_at: Utc::now(),
      matched:    false,
    };

    let edge_id_str = encode_uuid(edge.edge_id);
    let from_str = encode_uuid(edge.from);
    let to_str = encode_uuid(edge.to);
    let kind_str = encode_like_kind(edge.kind).to_owned();
    let at_str = encode_dt(edge.created_at);

    // OR IGNORE + changes(): zero rows changed means the (from, to, kind)
    // edge already exists and this dispatch is a duplicate.
    let inserted: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "INSERT OR IGNORE INTO like_edges
             (edge_id, from_id, to_id, kind, created_at, matched)
           VALUES (?1, ?2, ?3, ?4, ?5, 0)",
          rusqlite::params![edge_id_str, from_str, to_str, kind_str, at_str],
        )?)
      })
      .await?;

    Ok(if inserted == 1 { Some(edge) } else { None })
  }

  async fn mark_decided(&self, actor: Uuid, target: Uuid) -> Result<()> {
    let actor_str = encode_uuid(actor);
    let target_str = encode_uuid(target);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO decided (actor_id, target_id) VALUES (?1, ?2)",
          rusqlite::params![actor_str, target_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn find_edge(&self, from: Uuid, to: Uuid) -> Result<Option<LikeEdge>> {
    let from_str = encode_uuid(from);
    let to_str = encode_uuid(to);

    let raw: Option<RawLikeEdge> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT edge_id, from_id, to_id, kind, created_at, matched
               FROM like_edges
               WHERE from_id = ?1 AND to_id = ?2
               ORDER BY created_at
               LIMIT 1",
              rusqlite::params![from_str, to_str],
              |row| {
                Ok(RawLikeEdge {
                  edge_id:    row.get(0)?,
                  from_id:    row.get(1)?,
                  to_id:      row.get(2)?,
                  kind:       row.get(3)?,
                  created_at: row.get(4)?,
                  matched:    row.get(5)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawLikeEdge::into_edge).transpose()
  }

  async fn mark_matched(&self, from: Uuid, to: Uuid) -> Result<()> {
    let from_str = encode_uuid(from);
    let to_str = encode_uuid(to);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE like_edges SET matched = 1 WHERE from_id = ?1 AND to_id = ?2",
          rusqlite::params![from_str, to_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Matches ───────────────────────────────────────────────────────────────

  async fn create_match(&self, a: Uuid, b: Uuid) -> Result<(MatchEntity, bool)> {
    let (lo, hi) = engagement::sorted_pair(a, b);
    let entity = MatchEntity {
      match_id:   engagement::match_id_for(a, b),
      user_a:     lo,
      user_b:     hi,
      created_at: Utc::now(),
    };

    let match_id_str = encode_uuid(entity.match_id);
    let lo_str = encode_uuid(lo);
    let hi_str = encode_uuid(hi);
    let at_str = encode_dt(entity.created_at);

    let (inserted, existing): (usize, Option<RawMatch>) = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "INSERT OR IGNORE INTO matches (match_id, user_a, user_b, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![match_id_str, lo_str, hi_str, at_str],
        )?;

        // Lost the race (or re-resolved): hand back the row that won.
        let existing = if n == 0 {
          conn
            .query_row(
              "SELECT match_id, user_a, user_b, created_at
               FROM matches WHERE match_id = ?1",
              rusqlite::params![match_id_str],
              |row| {
                Ok(RawMatch {
                  match_id:   row.get(0)?,
                  user_a:     row.get(1)?,
                  user_b:     row.get(2)?,
                  created_at: row.get(3)?,
                })
              },
            )
            .optional()?
        } else {
          None
        };

        Ok((n, existing))
      })
      .await?;

    if inserted == 1 {
      return Ok((entity, true));
    }
    match existing {
      Some(raw) => Ok((raw.into_match()?, false)),
      // Matches are never deleted, so a failed insert always finds its row.
      None => Ok((entity, false)),
    }
  }

  async fn matches_for(&self, user_id: Uuid) -> Result<Vec<MatchEntity>> {
    let id_str = encode_uuid(user_id);

    let raws: Vec<RawMatch> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT match_id, user_a, user_b, created_at
           FROM matches
           WHERE user_a = ?1 OR user_b = ?1
           ORDER BY created_at DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], |row| {
            Ok(RawMatch {
              match_id:   row.get(0)?,
              user_a:     row.get(1)?,
              user_b:     row.get(2)?,
              created_at: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMatch::into_match).collect()
  }

  // ── Notifications ─────────────────────────────────────────────────────────

  async fn insert_notifications(&self, records: Vec<NotificationRecord>) -> Result<()> {
    let encoded: Vec<(String, String, String, String, String, bool)> = records
      .iter()
      .map(|r| {
        (
          encode_uuid(r.notification_id),
          encode_uuid(r.from),
          encode_uuid(r.to),
          encode_notification_kind(r.kind).to_owned(),
          encode_dt(r.created_at),
          r.read,
        )
      })
      .collect();

    self
      .conn
      .call(move |conn| {
        // One transaction so a match's symmetric pair is never half-visible.
        let tx = conn.transaction()?;
        for (id, from, to, kind, at, read) in &encoded {
          tx.execute(
            "INSERT INTO notifications
               (notification_id, from_id, to_id, kind, created_at, read)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![id, from, to, kind, at, read],
          )?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn notifications_for(
    &self,
    query: NotificationQuery,
  ) -> Result<Vec<NotificationRecord>> {
    let to_str = encode_uuid(query.to);
    let unread_only = query.unread_only;
    let limit_val = query.limit.unwrap_or(100) as i64;

    let raws: Vec<RawNotification> = self
      .conn
      .call(move |conn| {
        let unread_clause = if unread_only { "AND read = 0" } else { "" };
        let sql = format!(
          "SELECT notification_id, from_id, to_id, kind, created_at, read
           FROM notifications
           WHERE to_id = ?1 {unread_clause}
           ORDER BY created_at DESC, notification_id
           LIMIT ?2"
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![to_str, limit_val], |row| {
            Ok(RawNotification {
              notification_id: row.get(0)?,
              from_id:         row.get(1)?,
              to_id:           row.get(2)?,
              kind:            row.get(3)?,
              created_at:      row.get(4)?,
              read:            row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawNotification::into_record).collect()
  }

  async fn mark_read(&self, notification_id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(notification_id);

    let changed: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE notifications SET read = 1 WHERE notification_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(changed == 1)
  }
}
