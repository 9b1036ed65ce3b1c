//! SQL schema for the Spotter SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS profiles (
    user_id      TEXT PRIMARY KEY,
    display_name TEXT NOT NULL,
    birth_date   TEXT NOT NULL,   -- ISO 8601 calendar date; age is derived
    photo_url    TEXT
);

-- Directed like edges, append-mostly (only `matched` ever mutates).
-- The UNIQUE constraint is the duplicate-dispatch guard: a retried like
-- collides here and is reported back as a duplicate, not re-processed.
CREATE TABLE IF NOT EXISTS like_edges (
    edge_id    TEXT PRIMARY KEY,
    from_id    TEXT NOT NULL,
    to_id      TEXT NOT NULL,
    kind       TEXT NOT NULL,     -- 'like' | 'superlike'
    created_at TEXT NOT NULL,
    matched    INTEGER NOT NULL DEFAULT 0,
    UNIQUE (from_id, to_id, kind),
    CHECK  (from_id != to_id)
);

-- Denormalised per-actor decided list; the feed query excludes these.
CREATE TABLE IF NOT EXISTS decided (
    actor_id  TEXT NOT NULL,
    target_id TEXT NOT NULL,
    PRIMARY KEY (actor_id, target_id)
);

-- match_id is derived from the sorted pair, so two clients racing to create
-- the same match from opposite directions collide on the primary key and the
-- second insert is ignored.
CREATE TABLE IF NOT EXISTS matches (
    match_id   TEXT PRIMARY KEY,
    user_a     TEXT NOT NULL,
    user_b     TEXT NOT NULL,
    created_at TEXT NOT NULL,
    UNIQUE (user_a, user_b),
    CHECK  (user_a < user_b)
);

-- Never deleted; only `read` mutates.
CREATE TABLE IF NOT EXISTS notifications (
    notification_id TEXT PRIMARY KEY,
    from_id         TEXT NOT NULL,
    to_id           TEXT NOT NULL,
    kind            TEXT NOT NULL,  -- 'like' | 'superlike' | 'match' | 'message'
    created_at      TEXT NOT NULL,
    read            INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS like_edges_from_idx  ON like_edges(from_id);
CREATE INDEX IF NOT EXISTS like_edges_to_idx    ON like_edges(to_id);
CREATE INDEX IF NOT EXISTS matches_user_a_idx   ON matches(user_a);
CREATE INDEX IF NOT EXISTS matches_user_b_idx   ON matches(user_b);
CREATE INDEX IF NOT EXISTS notifications_to_idx ON notifications(to_id, created_at);

PRAGMA user_version = 1;
";
