//! Placeholder position evaluator.

use std::sync::Arc;

use replay_core::PositionEvaluator;
use shakmaty::Chess;

/// Evaluator handle shared across request handlers.
pub type SharedEvaluator = Arc<dyn PositionEvaluator + Send + Sync>;

/// Constant-score evaluator standing in for a real engine.
///
/// Swapping in genuine evaluation means implementing
/// [`PositionEvaluator`] on a new type and wiring it up in `main`;
/// nothing in the replay path changes.
#[derive(Debug, Clone)]
pub struct PlaceholderEvaluator {
    score: f64,
}

impl Default for PlaceholderEvaluator {
    fn default() -> Self {
        Self { score: 0.5 }
    }
}

impl PositionEvaluator for PlaceholderEvaluator {
    fn evaluate(&self, _position: &Chess) -> f64 {
        self.score
    }
}
