use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{DecodingKey, Validation, decode};

use focuslog_types::api::Claims;

use crate::auth::AppState;
use crate::error::ApiError;

/// Name of the session cookie holding the signed token.
pub const SESSION_COOKIE: &str = "focuslog_session";

fn decode_session(jar: &CookieJar, secret: &str) -> Option<Claims> {
    let cookie = jar.get(SESSION_COOKIE)?;
    decode::<Claims>(
        cookie.value(),
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()
    .map(|data| data.claims)
}

/// Auth gate for `/api/*`: resolve the acting user from the session cookie
/// and stash the claims as a request extension, or answer 401.
pub async fn require_auth_api(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = decode_session(&jar, &state.jwt_secret).ok_or(ApiError::Unauthorized)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Auth gate for the HTML pages: unauthenticated visitors land on the login
/// form instead of a bare 401.
pub async fn require_auth_page(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, Redirect> {
    let claims =
        decode_session(&jar, &state.jwt_secret).ok_or_else(|| Redirect::to("/login"))?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
