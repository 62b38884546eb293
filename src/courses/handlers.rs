use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::{instrument, warn};

use super::repo_types::Course;
use crate::{error::ApiError, state::AppState, tutors::Tutor};

#[derive(Debug, Serialize)]
pub struct CourseList {
    pub courses: Vec<Course>,
}

#[derive(Debug, Serialize)]
pub struct CourseDetails {
    pub course: Course,
    pub tutors: Vec<Tutor>,
}

pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses))
        .route("/courses/:code", get(get_course))
}

#[instrument(skip(state))]
pub async fn list_courses(State(state): State<AppState>) -> Result<Json<CourseList>, ApiError> {
    let courses = Course::list(&state.db).await.map_err(ApiError::database)?;
    Ok(Json(CourseList { courses }))
}

#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<CourseDetails>, ApiError> {
    let Some(course) = Course::find_by_code(&state.db, &code)
        .await
        .map_err(ApiError::database)?
    else {
        warn!(%code, "course not found");
        return Err(ApiError::NotFound(format!("Course {} not found.", code)));
    };

    let tutors = Tutor::list_by_course(&state.db, course.id)
        .await
        .map_err(ApiError::database)?;

    Ok(Json(CourseDetails { course, tutors }))
}
