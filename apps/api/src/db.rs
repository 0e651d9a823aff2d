use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Idempotent schema bootstrap. Each session save is a new row; there is no
/// UPDATE path against this table anywhere in the codebase.
pub async fn init_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS interview_sessions (
            id SERIAL PRIMARY KEY,
            archetype TEXT NOT NULL,
            score INTEGER NOT NULL,
            transcript JSONB NOT NULL,
            resume_summary TEXT,
            verdict TEXT,
            corporate_title TEXT,
            strengths JSONB,
            areas_for_improvement JSONB,
            real_advice TEXT,
            interview_tips JSONB,
            company_name TEXT,
            company_profile JSONB,
            ats_score JSONB,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Schema ready (interview_sessions)");
    Ok(())
}
