/// Database row types — these map directly to SQLite rows.
/// Distinct from the focuslog-types API models to keep the DB layer
/// independent; ids and timestamps stay TEXT here and are parsed at the
/// API boundary.

pub struct UserRow {
    pub id: String,
    pub username: String,
    pub password: String,
    pub created_at: String,
}

pub struct SessionRow {
    pub id: String,
    pub user_id: String,
    pub start_time: String,
    pub intention: String,
    pub planned_duration: i64,
    pub actual_duration: Option<i64>,
    pub actual_activity: Option<String>,
    pub feeling: Option<String>,
}

pub struct IntentionRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub scheduled_time: String,
    pub planned_duration: i64,
    pub is_completed: bool,
}
