use anyhow::Context;
use sqlx::SqlitePool;

use super::repo_types::Course;

impl Course {
    /// All courses ordered by code.
    pub async fn list(db: &SqlitePool) -> anyhow::Result<Vec<Course>> {
        let rows = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, code, name
            FROM courses
            ORDER BY code
            "#,
        )
        .fetch_all(db)
        .await
        .context("list courses")?;
        Ok(rows)
    }

    pub async fn find_by_code(db: &SqlitePool, code: &str) -> anyhow::Result<Option<Course>> {
        let row = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, code, name
            FROM courses
            WHERE code = ?
            "#,
        )
        .bind(code)
        .fetch_optional(db)
        .await
        .context("find course by code")?;
        Ok(row)
    }

    /// Courses taught by a tutor, one entry per tutoring row, ordered by code.
    pub async fn list_by_tutor(db: &SqlitePool, tutor_id: i64) -> anyhow::Result<Vec<Course>> {
        let rows = sqlx::query_as::<_, Course>(
            r#"
            SELECT c.id, c.code, c.name
              FROM tutorings tg
              JOIN courses c ON c.id = tg.course_id
             WHERE tg.tutor_id = ?
             ORDER BY c.code, tg.id
            "#,
        )
        .bind(tutor_id)
        .fetch_all(db)
        .await
        .context("list courses by tutor")?;
        Ok(rows)
    }
}
