use serde_json::Value as JsonValue;
use sqlx::PgPool;

use crate::error::AppError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AnalysisEntry {
    pub id: i64,
    pub username: String,
    pub pgn: String,
    pub analysis: JsonValue,
    pub last_viewed_move: i32,
    pub comments: JsonValue,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub async fn insert_entry(
    pool: &PgPool,
    username: &str,
    pgn: &str,
    analysis: &JsonValue,
    last_viewed_move: i32,
    comments: &JsonValue,
) -> Result<i64, AppError> {
    let row: (i64,) = sqlx::query_as(
        r#"INSERT INTO analysis_history (username, pgn, analysis, last_viewed_move, comments)
           VALUES ($1, $2, $3, $4, $5)
           RETURNING id"#,
    )
    .bind(username)
    .bind(pgn)
    .bind(analysis)
    .bind(last_viewed_move)
    .bind(comments)
    .fetch_one(pool)
    .await
    .map_err(AppError::Sqlx)?;

    Ok(row.0)
}

/// Most recent saved analyses for a user, newest first.
pub async fn get_recent_for_user(
    pool: &PgPool,
    username: &str,
    limit: i64,
) -> Result<Vec<AnalysisEntry>, AppError> {
    sqlx::query_as::<_, AnalysisEntry>(
        r#"SELECT id, username, pgn, analysis, last_viewed_move, comments, created_at
           FROM analysis_history
           WHERE username = $1
           ORDER BY created_at DESC
           LIMIT $2"#,
    )
    .bind(username)
    .bind(limit)
    .fetch_all(pool)
    .await
    .map_err(AppError::Sqlx)
}

/// Update the viewing cursor (and optionally comments) of a saved
/// analysis. Returns the number of rows touched — zero means the id
/// does not exist.
pub async fn update_last_viewed(
    pool: &PgPool,
    entry_id: i64,
    last_viewed_move: i32,
    comments: Option<&JsonValue>,
) -> Result<u64, AppError> {
    let result = sqlx::query(
        r#"UPDATE analysis_history
           SET last_viewed_move = $2,
               comments = COALESCE($3, comments)
           WHERE id = $1"#,
    )
    .bind(entry_id)
    .bind(last_viewed_move)
    .bind(comments)
    .execute(pool)
    .await
    .map_err(AppError::Sqlx)?;

    Ok(result.rows_affected())
}
