//! Handler for the `/likes` endpoint — the HTTP face of the dispatcher.

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use spotter_core::{engagement::LikeKind, store::EngagementStore};
use spotter_engine::{DispatchOutcome, Engine};
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LikeBody {
  pub actor_id:  Uuid,
  pub target_id: Uuid,
  pub kind:      LikeKind,
}

/// `POST /likes` — body: `{"actor_id":..,"target_id":..,"kind":"like"}`
///
/// Responds `201` when the edge was newly persisted, `200` for duplicates
/// and reported transient failures; the body is the tagged outcome either
/// way. A self-like is the one hard `400`.
pub async fn create<S>(
  State(engine): State<Engine<S>>,
  Json(body): Json<LikeBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: EngagementStore + Send + Sync,
{
  let outcome = engine
    .dispatch_like(body.actor_id, body.target_id, body.kind)
    .await
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let status = match &outcome {
    DispatchOutcome::Persisted { .. } => StatusCode::CREATED,
    DispatchOutcome::Duplicate { .. }
    | DispatchOutcome::TransientFailure { .. } => StatusCode::OK,
  };
  Ok((status, Json(outcome)))
}
