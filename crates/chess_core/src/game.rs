//! Game session: a board plus move history and promotion bookkeeping.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::{Board, Capture, MoveResult, Promotion, RookMove};
use crate::error::{ChessError, ChessResult};
use crate::movegen::GameStatus;
use crate::types::*;

/// One executed move as kept in the history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mv: Move,
    pub id: PieceId,
    pub color: Color,
    /// Kind of the piece before it moved.
    pub kind: PieceKind,
    pub captured: Option<Capture>,
    pub en_passant: bool,
    pub castle: Option<RookMove>,
    pub promotion: Option<PieceKind>,
}

/// One game session. Owns its board; nothing is shared between sessions.
#[derive(Clone, Debug, Default)]
pub struct Game {
    board: Board,
    history: Vec<MoveRecord>,
    pending_promotion: Option<Square>,
}

impl Game {
    pub fn new() -> Self {
        Self::from_board(Board::startpos())
    }

    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            history: Vec::new(),
            pending_promotion: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Square of a pawn that reached the far rank and awaits its new kind.
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }

    /// Status for the side to move. Resolve a pending promotion first:
    /// until then the promoted piece still counts as a pawn.
    pub fn status(&self) -> GameStatus {
        self.board.status()
    }

    /// Back to the standard layout with an empty history.
    pub fn reset(&mut self) {
        *self = Self::new();
        debug!("game reset");
    }

    /// Checked move: validates, executes and records.
    ///
    /// Passing a promotion kind finalizes a promoting move at once; without
    /// one the move is left pending until [`Game::promote`].
    pub fn play(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> ChessResult<MoveResult> {
        if let Some(sq) = self.pending_promotion {
            return Err(ChessError::PromotionPending(sq));
        }
        if self.board.status().is_over() {
            return Err(ChessError::GameOver);
        }
        if !self.board.is_valid_move(from, to) {
            return Err(ChessError::IllegalMove { from, to });
        }

        let before = self
            .board
            .piece_at(from)
            .ok_or(ChessError::IllegalMove { from, to })?;
        let result = self.board.make_move(from, to, promotion);

        self.history.push(MoveRecord {
            mv: Move::new(from, to),
            id: before.id,
            color: before.color,
            kind: before.kind,
            captured: result.captured,
            en_passant: result.en_passant,
            castle: result.rook_move,
            promotion: result.promoted_to,
        });

        if result.needs_promotion {
            self.pending_promotion = Some(to);
        } else {
            self.log_if_over();
        }
        Ok(result)
    }

    /// Finalizes the pending promotion and amends the last history entry.
    pub fn promote(&mut self, kind: PieceKind) -> ChessResult<Promotion> {
        let square = self.pending_promotion.ok_or(ChessError::NoPromotionPending)?;
        let promotion = self.board.promote(square, kind)?;
        self.pending_promotion = None;
        if let Some(last) = self.history.last_mut() {
            last.promotion = Some(kind);
        }
        self.log_if_over();
        Ok(promotion)
    }

    fn log_if_over(&self) {
        let status = self.board.status();
        if status.is_over() {
            info!(?status, moves = self.history.len(), "game over");
        }
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
