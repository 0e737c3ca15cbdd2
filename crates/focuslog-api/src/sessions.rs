use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use tracing::error;
use uuid::Uuid;

use focuslog_types::api::{
    Claims, LogRealityRequest, MessageResponse, SessionResponse, StartSessionRequest,
};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::{parse_row_datetime, parse_row_id};

/// `POST /api/sessions` — start a session: planned fields only, actual
/// fields stay NULL until the owner logs reality.
pub async fn start_session(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<StartSessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.intention.trim().is_empty() {
        return Err(ApiError::Validation("intention must not be empty".into()));
    }

    let session_id = Uuid::new_v4();
    let start_time = focuslog_db::now_string();

    state.db.insert_session(
        &session_id.to_string(),
        &claims.sub.to_string(),
        &start_time,
        &req.intention,
        req.planned_duration,
    )?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "session started".into(),
        }),
    ))
}

/// `GET /api/sessions` — the caller's sessions, newest start time first.
pub async fn list_sessions(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    // Run the blocking DB query off the async runtime
    let db = state.clone();
    let owner_id = claims.sub.to_string();
    let rows = tokio::task::spawn_blocking(move || db.db.list_sessions(&owner_id))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(e.into())
        })??;

    let sessions: Vec<SessionResponse> = rows
        .into_iter()
        .map(|row| {
            let start_time = parse_row_datetime(&row.start_time, "usage session");
            SessionResponse {
                id: parse_row_id(&row.id, "usage_sessions"),
                start_time,
                intention: row.intention,
                planned_duration: row.planned_duration,
                actual_duration: row.actual_duration,
                actual_activity: row.actual_activity,
                feeling: row.feeling,
            }
        })
        .collect();

    Ok(Json(sessions))
}

/// `PUT /api/sessions/{id}` — log reality: overwrite the three actual-*
/// fields on an owned session. Any duration or feeling value is accepted.
/// The id is looked up as-is, so a malformed one is just an absent record.
pub async fn log_reality(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<LogRealityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let row = state
        .db
        .get_session(&session_id)?
        .ok_or(ApiError::NotFound)?;

    if row.user_id != claims.sub.to_string() {
        return Err(ApiError::Forbidden);
    }

    state.db.log_reality(
        &session_id,
        req.actual_duration,
        &req.actual_activity,
        &req.feeling,
    )?;

    Ok(Json(MessageResponse {
        message: "session updated".into(),
    }))
}
