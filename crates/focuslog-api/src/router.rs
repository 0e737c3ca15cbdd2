use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, put};

use crate::auth::{self, AppState};
use crate::middleware::{require_auth_api, require_auth_page};
use crate::{pages, schedule, sessions};

/// Assemble the full route tree. Split in three: the public auth forms, the
/// cookie-gated HTML pages (redirect to `/login` when signed out), and the
/// cookie-gated JSON API (401 when signed out).
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/login", get(pages::login_page).post(auth::login))
        .route("/register", get(pages::register_page).post(auth::register))
        .with_state(state.clone());

    let page_routes = Router::new()
        .route("/", get(pages::dashboard))
        .route("/focus/{intention_id}", get(pages::focus_page))
        .route("/logout", get(auth::logout))
        .layer(from_fn_with_state(state.clone(), require_auth_page))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route(
            "/api/sessions",
            get(sessions::list_sessions).post(sessions::start_session),
        )
        .route("/api/sessions/{session_id}", put(sessions::log_reality))
        .route(
            "/api/schedule",
            get(schedule::list_intentions).post(schedule::create_intention),
        )
        .route(
            "/api/schedule/{intention_id}/complete",
            put(schedule::complete_intention),
        )
        .layer(from_fn_with_state(state.clone(), require_auth_api))
        .with_state(state);

    Router::new().merge(public).merge(page_routes).merge(api_routes)
}
