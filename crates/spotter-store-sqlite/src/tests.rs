//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use spotter_core::{
  engagement::{LikeKind, NewLikeEdge, match_id_for},
  notification::{NotificationKind, NotificationRecord},
  profile::Candidate,
  store::{EngagementStore, NotificationQuery},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn profile(name: &str) -> Candidate {
  Candidate {
    user_id:      Uuid::new_v4(),
    display_name: name.into(),
    birth_date:   NaiveDate::from_ymd_opt(1996, 9, 4).unwrap(),
    photo_url:    Some(format!("photos/{name}.jpg")),
  }
}

fn like(from: Uuid, to: Uuid) -> NewLikeEdge {
  NewLikeEdge { from, to, kind: LikeKind::Like }
}

// ─── Profiles ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_and_get_profile() {
  let s = store().await;
  let alice = profile("alice");

  s.upsert_profile(alice.clone()).await.unwrap();
  let fetched = s.get_profile(alice.user_id).await.unwrap().unwrap();
  assert_eq!(fetched, alice);
}

#[tokio::test]
async fn get_profile_missing_returns_none() {
  let s = store().await;
  assert!(s.get_profile(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn upsert_replaces_existing_profile() {
  let s = store().await;
  let mut alice = profile("alice");
  s.upsert_profile(alice.clone()).await.unwrap();

  alice.display_name = "Alice L".into();
  alice.photo_url = None;
  s.upsert_profile(alice.clone()).await.unwrap();

  let fetched = s.get_profile(alice.user_id).await.unwrap().unwrap();
  assert_eq!(fetched.display_name, "Alice L");
  assert_eq!(fetched.photo_url, None);
}

// ─── Feed query ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn candidates_exclude_self_and_decided() {
  let s = store().await;
  let actor = profile("actor");
  let liked = profile("liked");
  let fresh = profile("fresh");
  for p in [&actor, &liked, &fresh] {
    s.upsert_profile(p.clone()).await.unwrap();
  }

  s.mark_decided(actor.user_id, liked.user_id).await.unwrap();

  let feed = s.candidates_for(actor.user_id, 10).await.unwrap();
  assert_eq!(feed.len(), 1);
  assert_eq!(feed[0].user_id, fresh.user_id);
}

#[tokio::test]
async fn candidates_respect_limit() {
  let s = store().await;
  let actor = profile("actor");
  s.upsert_profile(actor.clone()).await.unwrap();
  for i in 0..5 {
    s.upsert_profile(profile(&format!("c{i}"))).await.unwrap();
  }

  let feed = s.candidates_for(actor.user_id, 3).await.unwrap();
  assert_eq!(feed.len(), 3);
}

// ─── Like edges ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn record_like_once_then_duplicate_is_none() {
  let s = store().await;
  let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

  let first = s.record_like(like(a, b)).await.unwrap();
  assert!(first.is_some());

  let second = s.record_like(like(a, b)).await.unwrap();
  assert!(second.is_none(), "duplicate (from, to, kind) must be refused");
}

#[tokio::test]
async fn like_and_superlike_are_distinct_edges() {
  let s = store().await;
  let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

  s.record_like(like(a, b)).await.unwrap().unwrap();
  let sup = s
    .record_like(NewLikeEdge { from: a, to: b, kind: LikeKind::Superlike })
    .await
    .unwrap();
  assert!(sup.is_some());
}

#[tokio::test]
async fn find_edge_is_directional() {
  let s = store().await;
  let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
  s.record_like(like(a, b)).await.unwrap().unwrap();

  assert!(s.find_edge(a, b).await.unwrap().is_some());
  assert!(s.find_edge(b, a).await.unwrap().is_none());
}

#[tokio::test]
async fn mark_matched_flips_the_flag() {
  let s = store().await;
  let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
  s.record_like(like(a, b)).await.unwrap().unwrap();

  s.mark_matched(a, b).await.unwrap();
  let edge = s.find_edge(a, b).await.unwrap().unwrap();
  assert!(edge.matched);
}

// ─── Matches ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_match_is_idempotent_across_directions() {
  let s = store().await;
  let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

  let (first, created) = s.create_match(a, b).await.unwrap();
  assert!(created);
  assert_eq!(first.match_id, match_id_for(a, b));

  // The opposite direction lands on the same row.
  let (second, created_again) = s.create_match(b, a).await.unwrap();
  assert!(!created_again);
  assert_eq!(second.match_id, first.match_id);
  assert_eq!(second.created_at, first.created_at);

  let for_a = s.matches_for(a).await.unwrap();
  let for_b = s.matches_for(b).await.unwrap();
  assert_eq!(for_a.len(), 1);
  assert_eq!(for_b.len(), 1);
}

#[tokio::test]
async fn matches_for_unrelated_user_is_empty() {
  let s = store().await;
  let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
  s.create_match(a, b).await.unwrap();

  assert!(s.matches_for(Uuid::new_v4()).await.unwrap().is_empty());
}

// ─── Notifications ───────────────────────────────────────────────────────────

#[tokio::test]
async fn notifications_come_back_newest_first() {
  let s = store().await;
  let to = Uuid::new_v4();
  let t0 = chrono::Utc::now();

  let older = NotificationRecord::new(Uuid::new_v4(), to, NotificationKind::Like, t0);
  let newer = NotificationRecord::new(
    Uuid::new_v4(),
    to,
    NotificationKind::Match,
    t0 + chrono::Duration::seconds(5),
  );
  s.insert_notifications(vec![older.clone()]).await.unwrap();
  s.insert_notifications(vec![newer.clone()]).await.unwrap();

  let records = s
    .notifications_for(NotificationQuery::for_recipient(to))
    .await
    .unwrap();
  assert_eq!(records.len(), 2);
  assert_eq!(records[0].notification_id, newer.notification_id);
  assert_eq!(records[1].notification_id, older.notification_id);
}

#[tokio::test]
async fn notifications_filter_by_recipient() {
  let s = store().await;
  let (to, other) = (Uuid::new_v4(), Uuid::new_v4());
  let now = chrono::Utc::now();

  s.insert_notifications(vec![
    NotificationRecord::new(Uuid::new_v4(), to, NotificationKind::Like, now),
    NotificationRecord::new(Uuid::new_v4(), other, NotificationKind::Like, now),
  ])
  .await
  .unwrap();

  let records = s
    .notifications_for(NotificationQuery::for_recipient(to))
    .await
    .unwrap();
  assert_eq!(records.len(), 1);
  assert_eq!(records[0].to, to);
}

#[tokio::test]
async fn mark_read_flips_flag_and_unread_filter_hides_it() {
  let s = store().await;
  let to = Uuid::new_v4();
  let record =
    NotificationRecord::new(Uuid::new_v4(), to, NotificationKind::Like, chrono::Utc::now());
  s.insert_notifications(vec![record.clone()]).await.unwrap();

  assert!(s.mark_read(record.notification_id).await.unwrap());

  let all = s
    .notifications_for(NotificationQuery::for_recipient(to))
    .await
    .unwrap();
  assert!(all[0].read);

  let unread = s
    .notifications_for(NotificationQuery {
      to,
      unread_only: true,
      limit: None,
    })
    .await
    .unwrap();
  assert!(unread.is_empty());
}

#[tokio::test]
async fn mark_read_unknown_id_returns_false() {
  let s = store().await;
  assert!(!s.mark_read(Uuid::new_v4()).await.unwrap());
}
