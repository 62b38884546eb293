use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::{instrument, warn};

use super::repo_types::Tutor;
use crate::{courses::Course, error::ApiError, state::AppState};

#[derive(Debug, Serialize)]
pub struct TutorList {
    pub tutors: Vec<Tutor>,
}

#[derive(Debug, Serialize)]
pub struct TutorDetails {
    pub tutor: Tutor,
    pub courses: Vec<Course>,
}

pub fn tutor_routes() -> Router<AppState> {
    Router::new()
        .route("/tutors", get(list_tutors))
        .route("/tutors/:username", get(get_tutor))
}

#[instrument(skip(state))]
pub async fn list_tutors(State(state): State<AppState>) -> Result<Json<TutorList>, ApiError> {
    let tutors = Tutor::list(&state.db).await.map_err(ApiError::database)?;
    Ok(Json(TutorList { tutors }))
}

#[instrument(skip(state))]
pub async fn get_tutor(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<TutorDetails>, ApiError> {
    let Some(tutor) = Tutor::find_by_username(&state.db, &username)
        .await
        .map_err(ApiError::database)?
    else {
        warn!(%username, "tutor not found");
        return Err(ApiError::NotFound(format!("Tutor {} not found.", username)));
    };

    let courses = Course::list_by_tutor(&state.db, tutor.user.id)
        .await
        .map_err(ApiError::database)?;

    Ok(Json(TutorDetails { tutor, courses }))
}
