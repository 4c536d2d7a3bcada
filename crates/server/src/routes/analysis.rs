use axum::{extract::Path, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use sqlx::PgPool;

use crate::db::analysis_history;
use crate::error::AppError;
use crate::eval::SharedEvaluator;

const HISTORY_LIMIT: i64 = 10;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub pgn: Option<String>,
}

#[derive(Deserialize)]
pub struct SaveAnalysisRequest {
    pub username: Option<String>,
    pub pgn: Option<String>,
    pub analysis: Option<JsonValue>,
    pub last_viewed_move: Option<i32>,
    pub comments: Option<JsonValue>,
}

#[derive(Deserialize)]
pub struct UpdateLastViewedRequest {
    pub last_viewed_move: Option<i32>,
    pub comments: Option<JsonValue>,
}

/// POST /api/analyze_game
pub async fn analyze_game(
    Extension(evaluator): Extension<SharedEvaluator>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<JsonValue>, AppError> {
    let pgn = req
        .pgn
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or(AppError::BadRequest("No PGN provided".into()))?;

    let records = replay_core::replay(pgn, evaluator.as_ref())
        .map_err(|_| AppError::BadRequest("Invalid PGN".into()))?;

    tracing::debug!("Analyzed game with {} plies", records.len());
    Ok(Json(json!({ "analysis": records })))
}

/// POST /api/save-analysis
pub async fn save_analysis(
    Extension(pool): Extension<PgPool>,
    Json(req): Json<SaveAnalysisRequest>,
) -> Result<Json<JsonValue>, AppError> {
    let (username, pgn) = match (&req.username, &req.pgn) {
        (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
        _ => return Err(AppError::BadRequest("Missing username or pgn".into())),
    };

    let analysis = req.analysis.unwrap_or_else(|| json!([]));
    let comments = req.comments.unwrap_or_else(|| json!([]));
    let last_viewed_move = req.last_viewed_move.unwrap_or(0);

    let id = analysis_history::insert_entry(
        &pool,
        username,
        pgn,
        &analysis,
        last_viewed_move,
        &comments,
    )
    .await?;

    tracing::info!("Saved analysis {} for {}", id, username);
    Ok(Json(json!({ "message": "Analysis saved", "id": id })))
}

/// GET /api/analysis-history/{username}
pub async fn get_analysis_history(
    Extension(pool): Extension<PgPool>,
    Path(username): Path<String>,
) -> Result<Json<JsonValue>, AppError> {
    let entries =
        analysis_history::get_recent_for_user(&pool, &username, HISTORY_LIMIT).await?;

    let history: Vec<JsonValue> = entries
        .iter()
        .map(|e| {
            json!({
                "id": e.id,
                "pgn": e.pgn,
                "analysis": e.analysis,
                "last_viewed_move": e.last_viewed_move,
                "comments": e.comments,
                "timestamp": e.created_at.to_rfc3339(),
            })
        })
        .collect();

    Ok(Json(json!({ "history": history })))
}

/// POST /api/update-last-viewed/{analysis_id}
pub async fn update_last_viewed(
    Extension(pool): Extension<PgPool>,
    Path(analysis_id): Path<i64>,
    Json(req): Json<UpdateLastViewedRequest>,
) -> Result<Json<JsonValue>, AppError> {
    let last_viewed_move = req
        .last_viewed_move
        .ok_or(AppError::BadRequest("Missing last_viewed_move".into()))?;

    let updated = analysis_history::update_last_viewed(
        &pool,
        analysis_id,
        last_viewed_move,
        req.comments.as_ref(),
    )
    .await?;

    if updated == 0 {
        return Err(AppError::NotFound("Analysis not found".into()));
    }

    Ok(Json(json!({ "message": "Last viewed move updated" })))
}
