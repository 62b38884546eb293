use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;

pub use dto::{Profile, ProfileUpdate, TutoringDirective};

pub fn router() -> Router<AppState> {
    handlers::profile_routes()
}
