use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{error, info, instrument, warn};

use super::dto::{Profile, ProfileResponse, ProfileUpdate};
use crate::{
    auth::{repo_types::User, AuthUser},
    courses::Course,
    error::{ApiError, ApiJson},
    state::AppState,
    tutors::{Tutor, Tutoring},
};

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile).patch(patch_profile))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = load_user(&state, &username).await?;

    let profile = match Tutor::find_by_user_id(&state.db, user.id)
        .await
        .map_err(ApiError::database)?
    {
        Some(tutor) => Profile::Tutor(tutor),
        None => Profile::User(user),
    };

    Ok(Json(ProfileResponse { profile }))
}

#[instrument(skip(state, edits))]
pub async fn patch_profile(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
    ApiJson(edits): ApiJson<ProfileUpdate>,
) -> Result<Json<Value>, ApiError> {
    let user = load_user(&state, &username).await?;
    let tutor = Tutor::find_by_user_id(&state.db, user.id)
        .await
        .map_err(ApiError::database)?;

    // Resolve every course up front so a bad code leaves the profile untouched.
    let mut directives = Vec::new();
    if tutor.is_some() {
        for item in edits.tutoring() {
            let Some(course) = Course::find_by_code(&state.db, &item.code)
                .await
                .map_err(ApiError::database)?
            else {
                warn!(code = %item.code, "tutoring directive for unknown course");
                return Err(ApiError::NotFound(format!("Course {} not found.", item.code)));
            };
            directives.push((course, item.action));
        }
    } else if !edits.tutoring().is_empty() || edits.bio().is_some() || edits.availability().is_some() {
        warn!(user_id = user.id, "tutor fields sent for non-tutor; ignoring");
    }

    let mut tx = state.db.begin().await.map_err(|e| ApiError::database(e.into()))?;

    User::update_contact_tx(&mut tx, user.id, edits.contact())
        .await
        .map_err(ApiError::database)?;

    let (mut added, mut removed) = (0u64, 0u64);
    if let Some(tutor) = &tutor {
        Tutor::update_details_tx(&mut tx, tutor.user.id, edits.bio(), edits.availability())
            .await
            .map_err(ApiError::database)?;

        for (course, add) in &directives {
            if *add {
                Tutoring::create_tx(&mut tx, tutor.user.id, course.id)
                    .await
                    .map_err(ApiError::database)?;
                added += 1;
            } else {
                removed += Tutoring::delete_tx(&mut tx, tutor.user.id, course.id)
                    .await
                    .map_err(ApiError::database)?;
            }
        }
    }

    tx.commit().await.map_err(|e| ApiError::database(e.into()))?;

    info!(user_id = user.id, added, removed, "profile updated");
    Ok(Json(json!({})))
}

async fn load_user(state: &AppState, username: &str) -> Result<User, ApiError> {
    match User::find_by_username(&state.db, username).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => {
            error!(%username, "authenticated user missing from database");
            Err(ApiError::Internal(format!(
                "User {} is authenticated but does not exist in the database.",
                username
            )))
        }
        Err(e) => Err(ApiError::database(e)),
    }
}
