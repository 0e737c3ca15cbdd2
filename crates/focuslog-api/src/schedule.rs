use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use chrono::NaiveDateTime;
use tracing::error;
use uuid::Uuid;

use focuslog_types::api::{
    Claims, IntentionResponse, MessageResponse, ScheduleIntentionRequest,
};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::{parse_row_datetime, parse_row_id};

/// `POST /api/schedule` — plan a future intention; starts uncompleted.
pub async fn create_intention(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<ScheduleIntentionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.title.trim().is_empty() {
        return Err(ApiError::Validation("title must not be empty".into()));
    }
    let scheduled_time = parse_scheduled_time(&req.scheduled_time)?;

    let intention_id = Uuid::new_v4();
    state.db.insert_intention(
        &intention_id.to_string(),
        &claims.sub.to_string(),
        &req.title,
        &scheduled_time
            .format(focuslog_db::DATETIME_FMT)
            .to_string(),
        req.planned_duration,
    )?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "intention scheduled".into(),
        }),
    ))
}

/// `GET /api/schedule` — the caller's intentions, soonest first.
pub async fn list_intentions(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let owner_id = claims.sub.to_string();
    let rows = tokio::task::spawn_blocking(move || db.db.list_intentions(&owner_id))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(e.into())
        })??;

    let intentions: Vec<IntentionResponse> = rows
        .into_iter()
        .map(|row| IntentionResponse {
            id: parse_row_id(&row.id, "scheduled_intentions"),
            scheduled_time: parse_row_datetime(&row.scheduled_time, "scheduled intention"),
            title: row.title,
            planned_duration: row.planned_duration,
            is_completed: row.is_completed,
        })
        .collect();

    Ok(Json(intentions))
}

/// `PUT /api/schedule/{id}/complete` — one-way completion flip; completing
/// an already-completed intention is not an error.
pub async fn complete_intention(
    State(state): State<AppState>,
    Path(intention_id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let row = state
        .db
        .get_intention(&intention_id)?
        .ok_or(ApiError::NotFound)?;

    if row.user_id != claims.sub.to_string() {
        return Err(ApiError::Forbidden);
    }

    state.db.complete_intention(&intention_id)?;

    Ok(Json(MessageResponse {
        message: "intention completed".into(),
    }))
}

/// Accepts the ISO-8601 shapes clients actually send: with seconds, without
/// seconds (HTML `datetime-local` inputs), or full RFC 3339.
pub(crate) fn parse_scheduled_time(raw: &str) -> Result<NaiveDateTime, ApiError> {
    NaiveDateTime::parse_from_str(raw, focuslog_db::DATETIME_FMT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .or_else(|_| chrono::DateTime::parse_from_rfc3339(raw).map(|dt| dt.naive_utc()))
        .map_err(|_| {
            ApiError::Validation(format!(
                "scheduled_time '{}' is not an ISO-8601 datetime",
                raw
            ))
        })
}
