use crate::state::AppState;
use axum::Router;

mod claims;
pub mod cookie;
mod dto;
pub mod extractors;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod repo;
pub mod repo_types;

pub use claims::Claims;
pub use extractors::AuthUser;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::auth_routes())
}
