//! Session store queries. Every save is a fresh row; previous records are
//! never overwritten.

use sqlx::types::Json;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::session::{NewSession, SessionRow};

pub const DEFAULT_LIST_LIMIT: i64 = 10;

pub async fn create_session(pool: &PgPool, new: &NewSession) -> Result<SessionRow, AppError> {
    let row = sqlx::query_as::<_, SessionRow>(
        r#"
        INSERT INTO interview_sessions
            (archetype, score, transcript, resume_summary, verdict, corporate_title,
             strengths, areas_for_improvement, real_advice, interview_tips,
             company_name, company_profile, ats_score)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING *
        "#,
    )
    .bind(&new.archetype)
    .bind(new.score)
    .bind(Json(&new.transcript))
    .bind(&new.resume_summary)
    .bind(&new.verdict)
    .bind(&new.corporate_title)
    .bind(new.strengths.as_ref().map(Json))
    .bind(new.areas_for_improvement.as_ref().map(Json))
    .bind(&new.real_advice)
    .bind(new.interview_tips.as_ref().map(Json))
    .bind(&new.company_name)
    .bind(new.company_profile.as_ref().map(Json))
    .bind(new.ats_score.as_ref().map(Json))
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn list_sessions(pool: &PgPool, limit: i64) -> Result<Vec<SessionRow>, AppError> {
    let rows = sqlx::query_as::<_, SessionRow>(
        "SELECT * FROM interview_sessions ORDER BY created_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_session(pool: &PgPool, id: i32) -> Result<Option<SessionRow>, AppError> {
    let row = sqlx::query_as::<_, SessionRow>("SELECT * FROM interview_sessions WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}
