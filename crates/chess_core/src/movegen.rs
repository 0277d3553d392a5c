//! Move legality and game-status queries.
//!
//! Every query answers with a `bool` or a (possibly empty) collection; an
//! illegal request is never an error. Legality is shape check first, then a
//! simulation on a scratch board that rejects self-check.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::types::*;

/// Outcome of the position for the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    /// The side to move is in check but has a way out.
    Check,
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Stalemate)
    }
}

impl Board {
    /// Full legality check for moving the piece on `from` to `to`.
    pub fn is_valid_move(&self, from: Square, to: Square) -> bool {
        let Some(pc) = self.piece_at(from) else {
            return false;
        };
        if pc.color != self.side_to_move() {
            return false;
        }
        let target = self.piece_at(to);
        if target.is_some_and(|t| t.color == pc.color) {
            return false;
        }
        if !self.is_valid_shape(pc, from, to, target) {
            return false;
        }
        !self.leaves_king_in_check(pc.color, from, to)
    }

    fn is_valid_shape(&self, pc: Piece, from: Square, to: Square, target: Option<Piece>) -> bool {
        let df = from.file().abs_diff(to.file());
        let dr = from.rank().abs_diff(to.rank());

        match pc.kind {
            PieceKind::Pawn => {
                let dir = pc.color.forward();
                let step = to.rank() as i8 - from.rank() as i8;
                if df == 0 && target.is_none() {
                    if step == dir {
                        return true;
                    }
                    // double step: both squares must be empty
                    return from.rank() == pc.color.pawn_rank()
                        && step == 2 * dir
                        && from
                            .offset(0, dir)
                            .is_some_and(|mid| self.piece_at(mid).is_none());
                }
                df == 1 && step == dir && (target.is_some() || self.en_passant_target() == Some(to))
            }
            PieceKind::Knight => (df == 2 && dr == 1) || (df == 1 && dr == 2),
            PieceKind::Bishop => df == dr && df > 0 && self.is_path_clear(from, to),
            PieceKind::Rook => (df == 0 || dr == 0) && df + dr > 0 && self.is_path_clear(from, to),
            PieceKind::Queen => {
                (df == dr || df == 0 || dr == 0) && df + dr > 0 && self.is_path_clear(from, to)
            }
            PieceKind::King => {
                if df <= 1 && dr <= 1 && df + dr > 0 {
                    true
                } else {
                    !pc.has_moved && dr == 0 && df == 2 && self.can_castle(from, to)
                }
            }
        }
    }

    /// Castling preconditions for a king travelling from `king_from` to `king_to`.
    ///
    /// King and rook unmoved, nothing between them, and no square from the
    /// king's start to its destination (inclusive) attacked.
    pub fn can_castle(&self, king_from: Square, king_to: Square) -> bool {
        let Some(king) = self.piece_at(king_from) else {
            return false;
        };
        if king.kind != PieceKind::King
            || king.has_moved
            || king_from.rank() != king_to.rank()
            || king_from.file().abs_diff(king_to.file()) != 2
        {
            return false;
        }
        if self.is_in_check(king.color) {
            return false;
        }

        let dir: i8 = if king_to.file() > king_from.file() { 1 } else { -1 };
        let rook_file = if dir > 0 { 7 } else { 0 };
        let rook_ok = Square::new(rook_file, king_from.rank())
            .and_then(|s| self.piece_at(s))
            .is_some_and(|r| r.kind == PieceKind::Rook && r.color == king.color && !r.has_moved);
        if !rook_ok {
            return false;
        }

        let lo = king_from.file().min(rook_file) + 1;
        let hi = king_from.file().max(rook_file);
        for file in lo..hi {
            if Square::new(file, king_from.rank()).is_some_and(|s| self.piece_at(s).is_some()) {
                return false;
            }
        }

        let enemy = king.color.other();
        let mut cur = Some(king_from);
        while let Some(sq) = cur {
            if self.is_square_attacked(sq, enemy) {
                return false;
            }
            if sq == king_to {
                break;
            }
            cur = sq.offset(dir, 0);
        }
        true
    }

    /// Plays the move on a scratch copy and asks whether `mover` is then in check.
    fn leaves_king_in_check(&self, mover: Color, from: Square, to: Square) -> bool {
        let mut scratch = self.clone();
        scratch.apply(from, to, None);
        scratch.is_in_check(mover)
    }

    /// Every destination the piece on `from` may legally reach, a1..h8 order.
    ///
    /// Empty when `from` is empty or holds a piece of the side not to move.
    pub fn legal_moves(&self, from: Square) -> Vec<Square> {
        match self.piece_at(from) {
            Some(pc) if pc.color == self.side_to_move() => Square::all()
                .filter(|&to| self.is_valid_move(from, to))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// All legal moves for the side to move.
    pub fn all_legal_moves(&self) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        for (from, _) in self.pieces(self.side_to_move()) {
            out.extend(self.legal_moves(from).into_iter().map(|to| Move::new(from, to)));
        }
        out
    }

    fn has_legal_move(&self) -> bool {
        self.pieces(self.side_to_move())
            .any(|(from, _)| !self.legal_moves(from).is_empty())
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_in_check(self.side_to_move()) && !self.has_legal_move()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check(self.side_to_move()) && !self.has_legal_move()
    }

    pub fn status(&self) -> GameStatus {
        let stm = self.side_to_move();
        let in_check = self.is_in_check(stm);
        match (in_check, self.has_legal_move()) {
            (true, false) => GameStatus::Checkmate { winner: stm.other() },
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check,
            (false, true) => GameStatus::InProgress,
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
