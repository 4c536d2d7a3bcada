use axum::{extract::Query, Json};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use crate::clients::chess_com::ChessComClient;
use crate::error::AppError;

/// How many monthly archives to walk, newest last.
const RECENT_ARCHIVES: usize = 3;
/// How many PGNs to hand back at most.
const MAX_GAMES: usize = 10;

#[derive(Deserialize)]
pub struct GamesQuery {
    pub username: Option<String>,
}

/// GET /api/chesscom/games
pub async fn chesscom_games(Query(q): Query<GamesQuery>) -> Result<Json<JsonValue>, AppError> {
    let username = q
        .username
        .filter(|s| !s.is_empty())
        .ok_or(AppError::BadRequest("No Chess.com username provided".into()))?
        .to_lowercase();

    let client = ChessComClient::new();

    let archives = client
        .fetch_archives(&username)
        .await
        .map_err(|e| AppError::BadGateway(format!("Error fetching archives from Chess.com: {e}")))?;

    if archives.is_empty() {
        return Err(AppError::NotFound("No games found".into()));
    }

    let recent = &archives[archives.len().saturating_sub(RECENT_ARCHIVES)..];
    let mut pgns: Vec<String> = Vec::new();

    for archive_url in recent {
        match client.fetch_archive_games(archive_url).await {
            Ok(games) => pgns.extend(games),
            Err(e) => tracing::warn!("Skipping archive {archive_url}: {e}"),
        }
    }

    if pgns.len() > MAX_GAMES {
        pgns = pgns.split_off(pgns.len() - MAX_GAMES);
    }

    tracing::info!("Returning {} games for {}", pgns.len(), username);
    Ok(Json(json!({ "games": pgns })))
}
