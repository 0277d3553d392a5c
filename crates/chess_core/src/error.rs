//! Errors raised at the checked boundaries of the rules engine.
//!
//! Legality queries themselves answer with `bool` or an empty set; these
//! errors cover parsing and the checked game-session wrappers.

use thiserror::Error;

use crate::types::{PieceKind, Square};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error("invalid square label: {0:?}")]
    InvalidSquare(String),

    #[error("invalid move notation: {0:?}")]
    InvalidMove(String),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("illegal move {from}{to}")]
    IllegalMove { from: Square, to: Square },

    #[error("a promotion on {0} must be resolved first")]
    PromotionPending(Square),

    #[error("no promotion pending")]
    NoPromotionPending,

    #[error("no pawn awaiting promotion on {0}")]
    NotPromotable(Square),

    #[error("cannot promote to {0}")]
    InvalidPromotion(PieceKind),

    #[error("the game is over")]
    GameOver,
}

pub type ChessResult<T> = Result<T, ChessError>;
