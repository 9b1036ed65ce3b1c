//! Handler for the `/matches` endpoint.

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;
use spotter_core::{engagement::MatchEntity, store::EngagementStore};
use spotter_engine::Engine;
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct MatchParams {
  pub user_id: Uuid,
}

/// `GET /matches?user_id=<id>` — every match the user participates in.
pub async fn list<S>(
  State(engine): State<Engine<S>>,
  Query(params): Query<MatchParams>,
) -> Result<Json<Vec<MatchEntity>>, ApiError>
where
  S: EngagementStore + Send + Sync,
{
  let matches = engine
    .matches_for(params.user_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(matches))
}
