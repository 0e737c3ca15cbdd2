use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::extract::State;
use axum::response::Redirect;
use axum::Form;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{EncodingKey, Header, encode};
use tracing::{error, info};
use uuid::Uuid;

use focuslog_db::Database;
use focuslog_types::api::{Claims, CredentialsForm};

use crate::error::ApiError;
use crate::middleware::SESSION_COOKIE;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
}

/// `POST /register`. Creates the user, signs them in, and redirects to the
/// dashboard. Failures redirect back to the form with a visible message.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<(CookieJar, Redirect), Redirect> {
    if form.username.len() < 3 || form.username.len() > 32 {
        return Err(form_error("/register", "username must be 3 to 32 characters"));
    }
    if form.password.len() < 8 {
        return Err(form_error("/register", "password must be at least 8 characters"));
    }

    let taken = || form_error("/register", &ApiError::DuplicateUsername.to_string());

    // Taken usernames leave the existing user untouched.
    match state.db.get_user_by_username(&form.username) {
        Ok(Some(_)) => return Err(taken()),
        Ok(None) => {}
        Err(e) => {
            error!("register lookup failed: {:#}", e);
            return Err(form_error("/register", "something went wrong, try again"));
        }
    }

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = match Argon2::default().hash_password(form.password.as_bytes(), &salt) {
        Ok(hash) => hash.to_string(),
        Err(e) => {
            error!("password hashing failed: {}", e);
            return Err(form_error("/register", "something went wrong, try again"));
        }
    };

    let user_id = Uuid::new_v4();
    if let Err(e) = state
        .db
        .create_user(&user_id.to_string(), &form.username, &password_hash)
    {
        // A concurrent registration can win the race between the check above
        // and this insert; the UNIQUE constraint still gets the message right.
        if focuslog_db::is_constraint_violation(&e) {
            return Err(taken());
        }
        error!("user insert failed: {:#}", e);
        return Err(form_error("/register", "something went wrong, try again"));
    }

    info!("registered user {}", form.username);
    sign_in(&state, jar, user_id, &form.username).map_err(|e| {
        error!("sign-in failed: {:#}", e);
        form_error("/register", "something went wrong, try again")
    })
}

/// `POST /login`. A failed login redirects back to the form with an explicit
/// error message rather than silently bouncing.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<(CookieJar, Redirect), Redirect> {
    let invalid = || form_error("/login", &ApiError::InvalidCredentials.to_string());

    let user = match state.db.get_user_by_username(&form.username) {
        Ok(Some(user)) => user,
        Ok(None) => return Err(invalid()),
        Err(e) => {
            error!("login lookup failed: {:#}", e);
            return Err(form_error("/login", "something went wrong, try again"));
        }
    };

    let parsed_hash = PasswordHash::new(&user.password).map_err(|e| {
        error!("stored hash for '{}' is unparsable: {}", user.username, e);
        form_error("/login", "something went wrong, try again")
    })?;

    if Argon2::default()
        .verify_password(form.password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(invalid());
    }

    let user_id: Uuid = user.id.parse().map_err(|e| {
        error!("corrupt user id '{}': {}", user.id, e);
        form_error("/login", "something went wrong, try again")
    })?;

    sign_in(&state, jar, user_id, &user.username).map_err(|e| {
        error!("sign-in failed: {:#}", e);
        form_error("/login", "something went wrong, try again")
    })
}

/// `GET /logout`. Drops the session cookie.
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to("/login"))
}

fn sign_in(
    state: &AppState,
    jar: CookieJar,
    user_id: Uuid,
    username: &str,
) -> anyhow::Result<(CookieJar, Redirect)> {
    let token = create_token(&state.jwt_secret, user_id, username)?;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((jar.add(cookie), Redirect::to("/")))
}

fn create_token(secret: &str, user_id: Uuid, username: &str) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::days(30)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

fn form_error(path: &str, message: &str) -> Redirect {
    // Messages are fixed ASCII, so spaces are the only thing to escape.
    Redirect::to(&format!("{}?error={}", path, message.replace(' ', "%20")))
}
