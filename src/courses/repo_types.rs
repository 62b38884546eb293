use serde::Serialize;
use sqlx::FromRow;

/// Course record, identified publicly by its code (e.g. `cop-3502`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Course {
    #[serde(skip_serializing)]
    pub id: i64,
    pub code: String,
    pub name: String,
}
