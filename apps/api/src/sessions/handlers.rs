//! Axum route handlers for the session history API.
//!
//! Persistence failures surface to the caller; they never roll back or
//! affect an in-progress interview, which lives entirely client-side.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::session::{NewSession, SessionRow};
use crate::sessions::storage::{create_session, get_session, list_sessions, DEFAULT_LIST_LIMIT};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

/// POST /api/sessions
pub async fn handle_create(
    State(state): State<AppState>,
    Json(new): Json<NewSession>,
) -> Result<Json<SessionRow>, AppError> {
    if new.archetype.trim().is_empty() {
        return Err(AppError::Validation("archetype cannot be empty".to_string()));
    }

    let session = create_session(&state.db, &new).await?;
    Ok(Json(session))
}

/// GET /api/sessions?limit=N
pub async fn handle_list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<SessionRow>>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, 100);
    let sessions = list_sessions(&state.db, limit).await?;
    Ok(Json(sessions))
}

/// GET /api/sessions/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SessionRow>, AppError> {
    let session = get_session(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
    Ok(Json(session))
}
