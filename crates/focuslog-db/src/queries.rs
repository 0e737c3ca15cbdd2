use crate::Database;
use crate::models::{IntentionRow, SessionRow, UserRow};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

impl Database {
    // -- Users --

    pub fn create_user(&self, id: &str, username: &str, password_hash: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, username, password) VALUES (?1, ?2, ?3)",
                (id, username, password_hash),
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_username(conn, username))
    }

    // -- Usage sessions --

    pub fn insert_session(
        &self,
        id: &str,
        user_id: &str,
        start_time: &str,
        intention: &str,
        planned_duration: i64,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO usage_sessions (id, user_id, start_time, intention, planned_duration)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![id, user_id, start_time, intention, planned_duration],
            )?;
            Ok(())
        })
    }

    pub fn get_session(&self, id: &str) -> Result<Option<SessionRow>> {
        self.with_conn(|conn| {
            conn.prepare(
                "SELECT id, user_id, start_time, intention, planned_duration,
                        actual_duration, actual_activity, feeling
                 FROM usage_sessions WHERE id = ?1",
            )?
            .query_row([id], session_from_row)
            .optional()
            .map_err(Into::into)
        })
    }

    /// All sessions owned by `user_id`, newest start time first.
    pub fn list_sessions(&self, user_id: &str) -> Result<Vec<SessionRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, start_time, intention, planned_duration,
                        actual_duration, actual_activity, feeling
                 FROM usage_sessions
                 WHERE user_id = ?1
                 ORDER BY start_time DESC",
            )?;
            let rows = stmt
                .query_map([user_id], session_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Overwrite the three actual-* fields. Full overwrite, so re-applying
    /// the same update is a no-op.
    pub fn log_reality(
        &self,
        id: &str,
        actual_duration: i64,
        actual_activity: &str,
        feeling: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE usage_sessions
                 SET actual_duration = ?2, actual_activity = ?3, feeling = ?4
                 WHERE id = ?1",
                rusqlite::params![id, actual_duration, actual_activity, feeling],
            )?;
            Ok(())
        })
    }

    // -- Scheduled intentions --

    pub fn insert_intention(
        &self,
        id: &str,
        user_id: &str,
        title: &str,
        scheduled_time: &str,
        planned_duration: i64,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO scheduled_intentions
                     (id, user_id, title, scheduled_time, planned_duration)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![id, user_id, title, scheduled_time, planned_duration],
            )?;
            Ok(())
        })
    }

    pub fn get_intention(&self, id: &str) -> Result<Option<IntentionRow>> {
        self.with_conn(|conn| {
            conn.prepare(
                "SELECT id, user_id, title, scheduled_time, planned_duration, is_completed
                 FROM scheduled_intentions WHERE id = ?1",
            )?
            .query_row([id], intention_from_row)
            .optional()
            .map_err(Into::into)
        })
    }

    /// All intentions owned by `user_id`, soonest scheduled time first.
    pub fn list_intentions(&self, user_id: &str) -> Result<Vec<IntentionRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, title, scheduled_time, planned_duration, is_completed
                 FROM scheduled_intentions
                 WHERE user_id = ?1
                 ORDER BY scheduled_time ASC",
            )?;
            let rows = stmt
                .query_map([user_id], intention_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// One-way flip to completed. Completing twice is harmless.
    pub fn complete_intention(&self, id: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE scheduled_intentions SET is_completed = 1 WHERE id = ?1",
                [id],
            )?;
            Ok(())
        })
    }
}

fn session_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SessionRow> {
    Ok(SessionRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        start_time: row.get(2)?,
        intention: row.get(3)?,
        planned_duration: row.get(4)?,
        actual_duration: row.get(5)?,
        actual_activity: row.get(6)?,
        feeling: row.get(7)?,
    })
}

fn intention_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<IntentionRow> {
    Ok(IntentionRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        scheduled_time: row.get(3)?,
        planned_duration: row.get(4)?,
        is_completed: row.get(5)?,
    })
}

fn query_user_by_username(conn: &Connection, username: &str) -> Result<Option<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT id, username, password, created_at FROM users WHERE username = ?1")?;

    let row = stmt
        .query_row([username], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                password: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}

#[cfg(test)]
mod tests {
    use crate::Database;

    fn db_with_user(id: &str) -> Database {
        let db = Database::open_in_memory().unwrap();
        db.create_user(id, &format!("user-{id}"), "$argon2id$fake").unwrap();
        db
    }

    #[test]
    fn duplicate_username_rejected() {
        let db = Database::open_in_memory().unwrap();
        db.create_user("u1", "maya", "hash-one").unwrap();

        // The failure is recognizable as a constraint violation, so callers
        // can report "username taken" even when the pre-insert check raced.
        let err = db.create_user("u2", "maya", "hash-two").unwrap_err();
        assert!(crate::is_constraint_violation(&err));

        // The original row is untouched.
        let row = db.get_user_by_username("maya").unwrap().unwrap();
        assert_eq!(row.id, "u1");
        assert_eq!(row.password, "hash-one");
    }

    #[test]
    fn sessions_list_newest_first() {
        let db = db_with_user("u1");
        db.insert_session("s1", "u1", "2025-03-01T09:00:00", "write", 30).unwrap();
        db.insert_session("s2", "u1", "2025-03-01T11:00:00", "read", 45).unwrap();
        db.insert_session("s3", "u1", "2025-03-01T10:00:00", "plan", 15).unwrap();

        let ids: Vec<String> = db
            .list_sessions("u1")
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["s2", "s3", "s1"]);
    }

    #[test]
    fn list_sessions_only_returns_owner_rows() {
        let db = db_with_user("u1");
        db.create_user("u2", "other", "hash").unwrap();
        db.insert_session("s1", "u1", "2025-03-01T09:00:00", "write", 30).unwrap();
        db.insert_session("s2", "u2", "2025-03-01T10:00:00", "read", 30).unwrap();

        let rows = db.list_sessions("u1").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "s1");
    }

    #[test]
    fn log_reality_is_idempotent() {
        let db = db_with_user("u1");
        db.insert_session("s1", "u1", "2025-03-01T09:00:00", "write", 30).unwrap();

        db.log_reality("s1", 42, "scrolled news", "Distracted").unwrap();
        db.log_reality("s1", 42, "scrolled news", "Distracted").unwrap();

        let row = db.get_session("s1").unwrap().unwrap();
        assert_eq!(row.actual_duration, Some(42));
        assert_eq!(row.actual_activity.as_deref(), Some("scrolled news"));
        assert_eq!(row.feeling.as_deref(), Some("Distracted"));
        // Planned fields untouched by the reality update.
        assert_eq!(row.intention, "write");
        assert_eq!(row.planned_duration, 30);
    }

    #[test]
    fn intentions_list_soonest_first() {
        let db = db_with_user("u1");
        db.insert_intention("i1", "u1", "report", "2025-03-02T09:00:00", 60).unwrap();
        db.insert_intention("i2", "u1", "review", "2025-03-01T09:00:00", 30).unwrap();

        let ids: Vec<String> = db
            .list_intentions("u1")
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["i2", "i1"]);
    }

    #[test]
    fn complete_is_one_way_and_idempotent() {
        let db = db_with_user("u1");
        db.insert_intention("i1", "u1", "report", "2025-03-01T09:00:00", 60).unwrap();
        assert!(!db.get_intention("i1").unwrap().unwrap().is_completed);

        db.complete_intention("i1").unwrap();
        assert!(db.get_intention("i1").unwrap().unwrap().is_completed);

        db.complete_intention("i1").unwrap();
        assert!(db.get_intention("i1").unwrap().unwrap().is_completed);
    }

    #[test]
    fn get_session_missing_is_none() {
        let db = db_with_user("u1");
        assert!(db.get_session("nope").unwrap().is_none());
        assert!(db.get_intention("nope").unwrap().is_none());
    }
}
