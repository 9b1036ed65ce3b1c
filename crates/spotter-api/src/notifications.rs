//! Handlers for `/notifications` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/notifications` | `?user_id=<id>[&unread_only=true][&limit=<n>]` |
//! | `POST` | `/notifications/:id/read` | 204 on success, 404 if unknown |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
};
use serde::Deserialize;
use spotter_core::{
  notification::NotificationRecord,
  store::{EngagementStore, NotificationQuery},
};
use spotter_engine::Engine;
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub user_id:     Uuid,
  #[serde(default)]
  pub unread_only: bool,
  pub limit:       Option<usize>,
}

/// `GET /notifications?user_id=<id>` — newest first.
pub async fn list<S>(
  State(engine): State<Engine<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<NotificationRecord>>, ApiError>
where
  S: EngagementStore + Send + Sync,
{
  let query = NotificationQuery {
    to:          params.user_id,
    unread_only: params.unread_only,
    limit:       params.limit,
  };
  let records = engine
    .notifications_for(query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(records))
}

/// `POST /notifications/:id/read`
pub async fn mark_read<S>(
  State(engine): State<Engine<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: EngagementStore + Send + Sync,
{
  let flipped = engine
    .mark_read(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if flipped {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("notification {id} not found")))
  }
}
