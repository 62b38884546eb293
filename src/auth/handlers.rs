use axum::{
    extract::{FromRef, State},
    http::header::SET_COOKIE,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::json;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        cookie::{expired_cookie, session_cookie},
        dto::AuthRequest,
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo_types::User,
    },
    error::{ApiError, ApiJson},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/signout", post(signout))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<AuthRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;

    // Fast path; the insert below settles races between concurrent signups.
    if User::find_by_username(&state.db, &payload.username)
        .await
        .map_err(ApiError::database)?
        .is_some()
    {
        return Err(username_taken(&payload.username));
    }

    let hash = hash_password(&payload.password)?;

    let Some(user) = User::create(&state.db, &payload.username, &hash)
        .await
        .map_err(ApiError::database)?
    else {
        return Err(username_taken(&payload.username));
    };

    info!(user_id = user.id, username = %user.username, "user signed up");
    start_session(&JwtKeys::from_ref(&state), &user.username)
}

#[instrument(skip(state, payload))]
pub async fn signin(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<AuthRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;

    let user = match User::find_by_username(&state.db, &payload.username).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(username = %payload.username, "signin unknown user");
            return Err(ApiError::Unauthorized(format!(
                "User {} not found.",
                payload.username
            )));
        }
        Err(e) => return Err(ApiError::database(e)),
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = user.id, "signin invalid password");
        return Err(ApiError::Unauthorized("Invalid password.".into()));
    }

    info!(user_id = user.id, username = %user.username, "user signed in");
    start_session(&JwtKeys::from_ref(&state), &user.username)
}

#[instrument(skip(state))]
pub async fn signout(State(state): State<AppState>) -> impl IntoResponse {
    let keys = JwtKeys::from_ref(&state);
    ([(SET_COOKIE, expired_cookie(keys.secure_cookie))], Json(json!({})))
}

fn username_taken(username: &str) -> ApiError {
    warn!(%username, "username already registered");
    ApiError::Unauthorized(format!("User {} already exists.", username))
}

fn start_session(keys: &JwtKeys, username: &str) -> Result<impl IntoResponse, ApiError> {
    let token = keys.sign(username).map_err(|e| {
        error!(error = %e, "jwt sign failed");
        ApiError::Internal(format!("Unable to create JWT: {}.", e))
    })?;
    let cookie = session_cookie(&token, keys.ttl, keys.secure_cookie);
    Ok(([(SET_COOKIE, cookie)], Json(json!({}))))
}
