//! Handler for the `/feed` endpoint.

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;
use spotter_core::{profile::Candidate, store::EngagementStore};
use spotter_engine::Engine;
use uuid::Uuid;

use crate::error::ApiError;

/// Candidates served per request when the client does not say otherwise.
const DEFAULT_LIMIT: usize = 25;

#[derive(Debug, Deserialize)]
pub struct FeedParams {
  pub actor_id: Uuid,
  pub limit:    Option<usize>,
}

/// `GET /feed?actor_id=<id>[&limit=<n>]`
///
/// Candidates the actor has not yet decided on, excluding the actor. Passed
/// candidates reappear here: only persisted decisions exclude.
pub async fn handler<S>(
  State(engine): State<Engine<S>>,
  Query(params): Query<FeedParams>,
) -> Result<Json<Vec<Candidate>>, ApiError>
where
  S: EngagementStore + Send + Sync,
{
  let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
  let candidates = engine
    .feed(params.actor_id, limit)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(candidates))
}
