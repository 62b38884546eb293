use anyhow::Context;
use sqlx::{Sqlite, SqlitePool, Transaction};

use super::repo_types::{Tutor, Tutoring};

const TUTOR_COLUMNS: &str = "u.id, u.username, u.password_hash, u.firstname, u.lastname, \
                             u.email, u.phone, t.bio, t.availability";

impl Tutor {
    /// All tutors ordered by username.
    pub async fn list(db: &SqlitePool) -> anyhow::Result<Vec<Tutor>> {
        let sql = format!(
            "SELECT {TUTOR_COLUMNS} FROM tutors t JOIN users u ON u.id = t.user_id ORDER BY u.username"
        );
        let rows = sqlx::query_as::<_, Tutor>(&sql)
            .fetch_all(db)
            .await
            .context("list tutors")?;
        Ok(rows)
    }

    pub async fn find_by_username(db: &SqlitePool, username: &str) -> anyhow::Result<Option<Tutor>> {
        let sql = format!(
            "SELECT {TUTOR_COLUMNS} FROM tutors t JOIN users u ON u.id = t.user_id WHERE u.username = ?"
        );
        let row = sqlx::query_as::<_, Tutor>(&sql)
            .bind(username)
            .fetch_optional(db)
            .await
            .context("find tutor by username")?;
        Ok(row)
    }

    pub async fn find_by_user_id(db: &SqlitePool, user_id: i64) -> anyhow::Result<Option<Tutor>> {
        let sql = format!(
            "SELECT {TUTOR_COLUMNS} FROM tutors t JOIN users u ON u.id = t.user_id WHERE t.user_id = ?"
        );
        let row = sqlx::query_as::<_, Tutor>(&sql)
            .bind(user_id)
            .fetch_optional(db)
            .await
            .context("find tutor by user id")?;
        Ok(row)
    }

    /// Tutors of a course, one entry per tutoring row, ordered by username.
    pub async fn list_by_course(db: &SqlitePool, course_id: i64) -> anyhow::Result<Vec<Tutor>> {
        let sql = format!(
            "SELECT {TUTOR_COLUMNS}
               FROM tutorings tg
               JOIN tutors t ON t.user_id = tg.tutor_id
               JOIN users u ON u.id = t.user_id
              WHERE tg.course_id = ?
              ORDER BY u.username, tg.id"
        );
        let rows = sqlx::query_as::<_, Tutor>(&sql)
            .bind(course_id)
            .fetch_all(db)
            .await
            .context("list tutors by course")?;
        Ok(rows)
    }

    /// Overwrite `bio` and/or `availability`; `None` keeps the stored value.
    pub async fn update_details_tx(
        tx: &mut Transaction<'_, Sqlite>,
        user_id: i64,
        bio: Option<&str>,
        availability: Option<&str>,
    ) -> anyhow::Result<()> {
        if bio.is_none() && availability.is_none() {
            return Ok(());
        }
        sqlx::query(
            r#"
            UPDATE tutors
               SET bio          = COALESCE(?, bio),
                   availability = COALESCE(?, availability)
             WHERE user_id = ?
            "#,
        )
        .bind(bio)
        .bind(availability)
        .bind(user_id)
        .execute(&mut **tx)
        .await
        .context("update tutor details")?;
        Ok(())
    }
}

impl Tutoring {
    pub async fn create_tx(
        tx: &mut Transaction<'_, Sqlite>,
        tutor_id: i64,
        course_id: i64,
    ) -> anyhow::Result<Tutoring> {
        let row = sqlx::query_as::<_, Tutoring>(
            r#"
            INSERT INTO tutorings (tutor_id, course_id)
            VALUES (?, ?)
            RETURNING id, tutor_id, course_id
            "#,
        )
        .bind(tutor_id)
        .bind(course_id)
        .fetch_one(&mut **tx)
        .await
        .context("insert tutoring")?;
        Ok(row)
    }

    /// Delete every row for the pair; returns how many went.
    pub async fn delete_tx(
        tx: &mut Transaction<'_, Sqlite>,
        tutor_id: i64,
        course_id: i64,
    ) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM tutorings WHERE tutor_id = ? AND course_id = ?")
            .bind(tutor_id)
            .bind(course_id)
            .execute(&mut **tx)
            .await
            .context("delete tutoring")?;
        Ok(res.rows_affected())
    }
}
