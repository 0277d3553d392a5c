//! Random Move Chess Engine
//!
//! Selects moves uniformly at random from all legal moves of the side to move.
//! Used as:
//! - the fallback of the neural move selector when no evaluator is loaded
//! - the fallback when none of the evaluator's ranked candidates is legal
//! - a baseline opponent for self-play

use chess_core::{Board, Move};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::trace;


/// A chess engine that plays random legal moves.
///
/// Owns its generator so a seeded engine replays the same choices for the
/// same sequence of positions.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A uniformly chosen legal move, or `None` when the side to move has none
    /// (checkmate or stalemate).
    pub fn pick(&mut self, board: &Board) -> Option<Move> {
        let moves = board.all_legal_moves();
        let choice = moves.choose(&mut self.rng).copied();
        trace!(candidates = moves.len(), ?choice, "random pick");
        choice
    }
}
