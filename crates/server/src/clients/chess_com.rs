use reqwest::Client;
use serde_json::Value;

pub struct ChessComClient {
    client: Client,
}

impl ChessComClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent("ChessReview/1.0")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap();
        Self { client }
    }

    /// Fetch the list of monthly archive URLs for a player.
    /// Returned in the order Chess.com serves them (oldest first).
    pub async fn fetch_archives(&self, username: &str) -> Result<Vec<String>, String> {
        let url = format!(
            "https://api.chess.com/pub/player/{}/games/archives",
            username
        );

        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("Archives request error: {e}"))?;

        if !resp.status().is_success() {
            return Err(format!("Archives HTTP {}", resp.status()));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| format!("Archives JSON parse error: {e}"))?;

        let archives = data["archives"]
            .as_array()
            .cloned()
            .unwrap_or_default()
            .iter()
            .filter_map(|v| v.as_str().map(|s| s.to_string()))
            .collect();

        Ok(archives)
    }

    /// Fetch the PGNs from a single monthly archive URL.
    /// Games without a PGN are skipped; a 404 archive yields no games.
    pub async fn fetch_archive_games(&self, archive_url: &str) -> Result<Vec<String>, String> {
        // Rate limit
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        let resp = self
            .client
            .get(archive_url)
            .send()
            .await
            .map_err(|e| format!("Request error: {e}"))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(vec![]);
        }

        if !resp.status().is_success() {
            return Err(format!("HTTP {}", resp.status()));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| format!("JSON parse error: {e}"))?;

        let games = data["games"].as_array().cloned().unwrap_or_default();
        let pgns = games
            .iter()
            .filter_map(|game| game.get("pgn").and_then(|v| v.as_str()))
            .filter(|pgn| !pgn.is_empty())
            .map(|pgn| pgn.to_string())
            .collect();

        Ok(pgns)
    }
}

impl Default for ChessComClient {
    fn default() -> Self {
        Self::new()
    }
}
