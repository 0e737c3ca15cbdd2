//! HTTP surface of the focuslog server: form-based auth issuing a session
//! cookie, JSON endpoints for the session journal and the schedule, and the
//! server-rendered dashboard/focus pages.

pub mod auth;
pub mod error;
pub mod middleware;
pub mod pages;
pub mod router;
pub mod schedule;
pub mod sessions;

use tracing::warn;
use uuid::Uuid;

pub use router::router;

/// Parse a TEXT id column back into a Uuid. Rows are only ever written with
/// Uuid-formatted ids, so a failure means a corrupt database; log and fall
/// back rather than failing the whole listing.
pub(crate) fn parse_row_id(raw: &str, table: &str) -> Uuid {
    raw.parse().unwrap_or_else(|e| {
        warn!("Corrupt id '{}' in {}: {}", raw, table, e);
        Uuid::default()
    })
}

pub(crate) fn parse_row_datetime(raw: &str, ctx: &str) -> chrono::NaiveDateTime {
    chrono::NaiveDateTime::parse_from_str(raw, focuslog_db::DATETIME_FMT).unwrap_or_else(|e| {
        warn!("Corrupt timestamp '{}' on {}: {}", raw, ctx, e);
        chrono::NaiveDateTime::default()
    })
}
