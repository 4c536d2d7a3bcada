pub mod game_data;
pub mod pgn;
pub mod replay;

pub use game_data::{GameData, GameMetadata};
pub use replay::{replay, PlyRecord, PositionEvaluator, ReplayError};
