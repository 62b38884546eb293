use crate::auth::repo_types::{ContactChanges, User};
use anyhow::Context;
use sqlx::{Sqlite, SqlitePool, Transaction};

impl User {
    /// Find a user by username.
    pub async fn find_by_username(db: &SqlitePool, username: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, firstname, lastname, email, phone
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await
        .context("find user by username")?;
        Ok(user)
    }

    /// Create a new user with hashed password. `None` when the username is taken.
    pub async fn create(
        db: &SqlitePool,
        username: &str,
        password_hash: &str,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES (?, ?)
            ON CONFLICT (username) DO NOTHING
            RETURNING id, username, password_hash, firstname, lastname, email, phone
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_optional(db)
        .await
        .context("insert user")?;
        Ok(user)
    }

    /// Overwrite the contact fields present in `changes`.
    pub async fn update_contact_tx(
        tx: &mut Transaction<'_, Sqlite>,
        user_id: i64,
        changes: ContactChanges<'_>,
    ) -> anyhow::Result<()> {
        if changes.is_empty() {
            return Ok(());
        }
        sqlx::query(
            r#"
            UPDATE users
               SET firstname = COALESCE(?, firstname),
                   lastname  = COALESCE(?, lastname),
                   email     = COALESCE(?, email),
                   phone     = COALESCE(?, phone)
             WHERE id = ?
            "#,
        )
        .bind(changes.firstname)
        .bind(changes.lastname)
        .bind(changes.email)
        .bind(changes.phone)
        .bind(user_id)
        .execute(&mut **tx)
        .await
        .context("update user contact")?;
        Ok(())
    }
}
