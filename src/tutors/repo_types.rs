use serde::Serialize;
use sqlx::FromRow;

use crate::auth::repo_types::User;

/// A user who tutors. Serializes as the user's fields plus `bio` and `availability`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Tutor {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub user: User,
    pub bio: String,
    pub availability: String, // free text, e.g. "Mon/Wed afternoons"
}

/// "This tutor teaches this course."
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Tutoring {
    pub id: i64,
    pub tutor_id: i64,
    pub course_id: i64,
}
