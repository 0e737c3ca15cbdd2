use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// -- Session cookie claims --

/// JWT claims carried in the session cookie. Canonical definition lives
/// here so the auth handlers and the middleware agree on one shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub exp: usize,
}

// -- Auth forms --

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

// -- Session journal --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StartSessionRequest {
    pub intention: String,
    pub planned_duration: i64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogRealityRequest {
    pub actual_duration: i64,
    pub actual_activity: String,
    pub feeling: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub start_time: NaiveDateTime,
    pub intention: String,
    pub planned_duration: i64,
    pub actual_duration: Option<i64>,
    pub actual_activity: Option<String>,
    pub feeling: Option<String>,
}

// -- Scheduled intentions --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleIntentionRequest {
    pub title: String,
    /// ISO-8601, e.g. "2025-03-01T09:00:00".
    pub scheduled_time: String,
    pub planned_duration: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentionResponse {
    pub id: Uuid,
    pub title: String,
    pub scheduled_time: NaiveDateTime,
    pub planned_duration: i64,
    pub is_completed: bool,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
