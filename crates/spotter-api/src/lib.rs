//! JSON REST API for the Spotter engagement engine.
//!
//! Exposes an axum [`Router`] backed by any
//! [`spotter_core::store::EngagementStore`] through a
//! [`spotter_engine::Engine`]. Auth, TLS, and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", spotter_api::api_router(engine.clone()))
//! ```

pub mod error;
pub mod feed;
pub mod likes;
pub mod matches;
pub mod notifications;
pub mod profiles;

use std::path::PathBuf;

use axum::{
  Router,
  routing::{get, post},
};
use serde::Deserialize;
use spotter_core::store::EngagementStore;
use spotter_engine::Engine;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router over `engine`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(engine: Engine<S>) -> Router<()>
where
  S: EngagementStore + Send + Sync + 'static,
{
  Router::new()
    // Profiles
    .route("/profiles", post(profiles::create::<S>))
    .route("/profiles/{id}", get(profiles::get_one::<S>))
    // Feed
    .route("/feed", get(feed::handler::<S>))
    // Likes
    .route("/likes", post(likes::create::<S>))
    // Matches
    .route("/matches", get(matches::list::<S>))
    // Notifications
    .route("/notifications", get(notifications::list::<S>))
    .route("/notifications/{id}/read", post(notifications::mark_read::<S>))
    .with_state(engine)
}

// ─── Integration tests ────────────────────────────────────────────────────────
