use crate::state::AppState;
use axum::Router;

pub mod handlers;
pub mod repo;
pub mod repo_types;

pub use repo_types::{Tutor, Tutoring};

pub fn router() -> Router<AppState> {
    handlers::tutor_routes()
}
