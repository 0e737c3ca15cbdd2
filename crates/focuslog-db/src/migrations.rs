use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          TEXT PRIMARY KEY,
            username    TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%S', 'now'))
        );

        CREATE TABLE IF NOT EXISTS usage_sessions (
            id                TEXT PRIMARY KEY,
            user_id           TEXT NOT NULL REFERENCES users(id),
            start_time        TEXT NOT NULL,
            intention         TEXT NOT NULL,
            planned_duration  INTEGER NOT NULL,
            actual_duration   INTEGER,
            actual_activity   TEXT,
            feeling           TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_usage_sessions_owner
            ON usage_sessions(user_id, start_time);

        CREATE TABLE IF NOT EXISTS scheduled_intentions (
            id                TEXT PRIMARY KEY,
            user_id           TEXT NOT NULL REFERENCES users(id),
            title             TEXT NOT NULL,
            scheduled_time    TEXT NOT NULL,
            planned_duration  INTEGER NOT NULL,
            is_completed      INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_scheduled_intentions_owner
            ON scheduled_intentions(user_id, scheduled_time);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
