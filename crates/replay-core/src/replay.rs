//! Game replay engine: folds a PGN move list over a board and emits
//! one analysis record per ply.

use serde::{Deserialize, Serialize};
use shakmaty::{fen::Fen, san::SanPlus, CastlingMode, Chess, EnPassantMode, Position};

use crate::pgn;

/// Position evaluation capability, injected by the caller.
///
/// The replay loop never assumes any particular evaluation semantics;
/// a real engine can be swapped in behind this trait without touching
/// the replay logic.
pub trait PositionEvaluator {
    fn evaluate(&self, position: &Chess) -> f64;
}

/// One analyzed ply. Field names match the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlyRecord {
    pub move_number: u32,
    pub played_move: String,
    pub board_fen: String,
    pub evaluation: f64,
    pub predicted_best_move: String,
    pub predicted_evaluation: f64,
    pub comment: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("Invalid PGN")]
    Unparseable,
}

/// Replay a PGN transcript from the starting position and produce one
/// record per ply, in play order.
///
/// The transcript must parse as a game record and every move must be
/// legal in sequence; anything else aborts the whole replay with
/// [`ReplayError::Unparseable`]. There is no partial-result mode.
pub fn replay(
    transcript: &str,
    evaluator: &dyn PositionEvaluator,
) -> Result<Vec<PlyRecord>, ReplayError> {
    let game = pgn::parse_pgn(transcript).ok_or(ReplayError::Unparseable)?;

    let mut pos = match game.start_fen {
        Some(ref fen_str) => {
            let fen: Fen = fen_str.parse().map_err(|_| ReplayError::Unparseable)?;
            fen.into_position(CastlingMode::Standard)
                .map_err(|_| ReplayError::Unparseable)?
        }
        None => Chess::default(),
    };

    let mut records = Vec::with_capacity(game.moves.len());

    for (i, move_san) in game.moves.iter().enumerate() {
        let san: SanPlus = move_san.parse().map_err(|_| ReplayError::Unparseable)?;
        let mv = san
            .san
            .to_move(&pos)
            .map_err(|_| ReplayError::Unparseable)?;

        let uci = mv.to_uci(CastlingMode::Standard).to_string();
        pos.play_unchecked(mv);

        let fen = Fen::from_position(&pos, EnPassantMode::Legal).to_string();
        let eval = evaluator.evaluate(&pos);

        records.push(PlyRecord {
            move_number: (i + 1) as u32,
            played_move: uci.clone(),
            board_fen: fen,
            evaluation: eval,
            // Placeholder contract: echo the played move until a real
            // engine sits behind the evaluator.
            predicted_best_move: uci,
            predicted_evaluation: eval,
            comment: "Placeholder analysis".to_string(),
        });
    }

    Ok(records)
}
