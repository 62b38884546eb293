use anyhow::Context;
use sqlx::SqlitePool;
use tracing::debug;

use crate::auth::password::hash_password;

pub const COURSES: &[(&str, &str)] = &[
    ("cop-3502", "Programming Fundamentals 1"),
    ("cop-3503", "Programming Fundamentals 2"),
    ("cot-3100", "Applications of Discrete Structures"),
    ("cop-3530", "Data Structures and Algorithms"),
    ("cen-3031", "Introduction to Computer Organization"),
    ("cda-3101", "Introduction to Software Engineering"),
    ("cis-4301", "Information and Database Systems"),
    ("cop-4020", "Programming Language Concepts"),
    ("cop-4600", "Operating Systems"),
    ("cnt-4007", "Computer Network Fundamentals"),
];

pub const TUTORS: &[&str] = &["Alice", "Bob", "Clair", "David"];

/// (tutor username, course code)
pub const TUTORINGS: &[(&str, &str)] = &[
    ("Alice", "cop-3502"),
    ("Bob", "cop-3502"),
    ("Bob", "cop-3503"),
    ("Clair", "cot-3100"),
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub courses: usize,
    pub tutors: usize,
    pub tutorings: usize,
}

/// Replace all rows with the sample data. Tutor accounts get `password`.
pub async fn run(db: &SqlitePool, password: &str) -> anyhow::Result<SeedReport> {
    let hash = hash_password(password)?;
    let mut tx = db.begin().await.context("begin seed tx")?;

    for table in ["tutorings", "tutors", "users", "courses"] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&mut *tx)
            .await
            .with_context(|| format!("clear {table}"))?;
    }

    let mut report = SeedReport::default();

    for &(code, name) in COURSES {
        sqlx::query("INSERT INTO courses (code, name) VALUES (?, ?)")
            .bind(code)
            .bind(name)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("insert course {code}"))?;
        report.courses += 1;
    }

    for &username in TUTORS {
        let (user_id,): (i64,) =
            sqlx::query_as("INSERT INTO users (username, password_hash) VALUES (?, ?) RETURNING id")
                .bind(username)
                .bind(&hash)
                .fetch_one(&mut *tx)
                .await
                .with_context(|| format!("insert user {username}"))?;
        sqlx::query("INSERT INTO tutors (user_id) VALUES (?)")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("insert tutor {username}"))?;
        debug!(%username, user_id, "tutor seeded");
        report.tutors += 1;
    }

    for &(username, code) in TUTORINGS {
        sqlx::query(
            r#"
            INSERT INTO tutorings (tutor_id, course_id)
            SELECT u.id, c.id
              FROM users u, courses c
             WHERE u.username = ? AND c.code = ?
            "#,
        )
        .bind(username)
        .bind(code)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("insert tutoring {username} -> {code}"))?;
        report.tutorings += 1;
    }

    tx.commit().await.context("commit seed tx")?;
    Ok(report)
}
