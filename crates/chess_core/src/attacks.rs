//! Attack detection.
//!
//! Attacks are found by scanning every piece of the attacking color; there are
//! no cached attack maps. Pins and checks against the attacker are ignored.

use crate::board::Board;
use crate::types::*;

impl Board {
    /// Whether the piece on `from` attacks `to`, ignoring pins and whose turn it is.
    ///
    /// Pawns attack diagonally forward only; a pawn push is never an attack.
    pub fn can_piece_attack(&self, from: Square, to: Square) -> bool {
        let Some(pc) = self.piece_at(from) else {
            return false;
        };
        let df = from.file().abs_diff(to.file());
        let dr = from.rank().abs_diff(to.rank());

        match pc.kind {
            PieceKind::Pawn => {
                df == 1 && to.rank() as i8 == from.rank() as i8 + pc.color.forward()
            }
            PieceKind::Knight => (df == 2 && dr == 1) || (df == 1 && dr == 2),
            PieceKind::Bishop => df == dr && df > 0 && self.is_path_clear(from, to),
            PieceKind::Rook => (df == 0 || dr == 0) && df + dr > 0 && self.is_path_clear(from, to),
            PieceKind::Queen => {
                (df == dr || df == 0 || dr == 0) && df + dr > 0 && self.is_path_clear(from, to)
            }
            PieceKind::King => df <= 1 && dr <= 1 && df + dr > 0,
        }
    }

    /// Walks the unit step from `from` towards `to`, excluding both endpoints,
    /// and reports whether every square in between is empty.
    ///
    /// Only meaningful for squares on a shared rank, file or diagonal.
    pub fn is_path_clear(&self, from: Square, to: Square) -> bool {
        let df = (to.file() as i8 - from.file() as i8).signum();
        let dr = (to.rank() as i8 - from.rank() as i8).signum();
        let mut cur = from.offset(df, dr);
        while let Some(sq) = cur {
            if sq == to {
                return true;
            }
            if self.piece_at(sq).is_some() {
                return false;
            }
            cur = sq.offset(df, dr);
        }
        // stepped off the board without meeting `to`: not aligned
        false
    }

    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        self.pieces(by).any(|(sq, _)| self.can_piece_attack(sq, target))
    }

    /// True iff `color`'s king stands on a square the opponent attacks.
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(ksq) => self.is_square_attacked(ksq, color.other()),
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
