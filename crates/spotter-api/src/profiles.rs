//! Handlers for `/profiles` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/profiles` | Body: a full candidate profile; upsert |
//! | `GET`  | `/profiles/:id` | 404 if not found |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use spotter_core::{profile::Candidate, store::EngagementStore};
use spotter_engine::Engine;
use uuid::Uuid;

use crate::error::ApiError;

/// `POST /profiles` — body: a full [`Candidate`]. Creates or replaces.
pub async fn create<S>(
  State(engine): State<Engine<S>>,
  Json(body): Json<Candidate>,
) -> Result<impl IntoResponse, ApiError>
where
  S: EngagementStore + Send + Sync,
{
  engine
    .upsert_profile(body.clone())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(body)))
}

/// `GET /profiles/:id`
pub async fn get_one<S>(
  State(engine): State<Engine<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Candidate>, ApiError>
where
  S: EngagementStore + Send + Sync,
{
  let profile = engine
    .get_profile(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("profile {id} not found")))?;
  Ok(Json(profile))
}
