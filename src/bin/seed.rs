//! Rebuilds the sample directory: clears every table, then inserts the
//! fixed courses, tutors and tutorings.

use anyhow::Context;
use tutorlink::{db, seed, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://database.db?mode=rwc".into());
    let password = std::env::var("SEED_PASSWORD").unwrap_or_else(|_| "password".into());

    let pool = db::connect(&database_url)
        .await
        .with_context(|| format!("open {}", database_url))?;
    db::migrate(&pool).await?;

    let report = seed::run(&pool, &password).await?;
    tracing::info!(
        courses = report.courses,
        tutors = report.tutors,
        tutorings = report.tutorings,
        "database seeded"
    );
    Ok(())
}
