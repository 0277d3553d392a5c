use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChessError, ChessResult};
use crate::types::*;

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Game state for one session: an 8x8 grid indexed `[rank][file]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
    side_to_move: Color,
    en_passant: Option<Square>, // square behind a pawn that just advanced 2
}

/// A piece removed by a move, with the square it stood on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    pub piece: Piece,
    pub square: Square,
}

/// Rook relocation caused by castling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RookMove {
    pub id: PieceId,
    pub from: Square,
    pub to: Square,
}

/// Everything a presentation layer needs to replay one executed move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    pub from: Square,
    pub to: Square,
    /// The moved piece as it stands after the move.
    pub piece: Piece,
    pub captured: Option<Capture>,
    pub en_passant: bool,
    pub rook_move: Option<RookMove>,
    /// The pawn reached the far rank and still awaits its new kind.
    pub needs_promotion: bool,
    pub promoted_to: Option<PieceKind>,
}

/// A finalized promotion: the pawn keeps its id and takes a new kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: PieceId,
    pub square: Square,
    pub kind: PieceKind,
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Board {
    /// The standard 32-piece layout with white to move.
    ///
    /// Ids are handed out in a1..h8 scan order: white 0-15, black 16-31.
    pub fn startpos() -> Self {
        let mut b = Board::empty(Color::White);
        let mut next_id = 0u8;
        let layout = [
            (0u8, Color::White),
            (1, Color::White),
            (6, Color::Black),
            (7, Color::Black),
        ];
        for (rank, color) in layout {
            for file in 0..8u8 {
                let kind = if rank == 1 || rank == 6 {
                    PieceKind::Pawn
                } else {
                    BACK_RANK[file as usize]
                };
                b.squares[rank as usize][file as usize] =
                    Some(Piece::new(PieceId(next_id), color, kind));
                next_id += 1;
            }
        }
        b
    }

    fn empty(side_to_move: Color) -> Self {
        Board {
            squares: [[None; 8]; 8],
            side_to_move,
            en_passant: None,
        }
    }

    /// Builds a board from Forsyth-Edwards Notation.
    ///
    /// Only the placement and side-to-move fields are required. Castling
    /// rights decide which kings and rooks count as unmoved; clocks are ignored.
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        let bad = |msg: &str| ChessError::InvalidFen(format!("{msg} in {fen:?}"));
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(bad("expected at least 2 fields"));
        }

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(bad("invalid side to move")),
        };
        let mut b = Board::empty(side_to_move);

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(bad("board section needs 8 ranks"));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx; // FEN lists rank 8 .. 1
            let mut file = 0usize;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as usize;
                } else {
                    let kind =
                        PieceKind::from_letter(ch).ok_or_else(|| bad("invalid piece letter"))?;
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    if file >= 8 {
                        return Err(bad("too many files in rank"));
                    }
                    // ids are assigned below, once the whole grid is known
                    b.squares[rank][file] = Some(Piece::new(PieceId(0), color, kind));
                    file += 1;
                }
                if file > 8 {
                    return Err(bad("too many files in rank"));
                }
            }
            if file != 8 {
                return Err(bad("not enough files in rank"));
            }
        }

        for color in Color::ALL {
            let kings = Square::all()
                .filter(|&s| {
                    b.piece_at(s)
                        .is_some_and(|p| p.color == color && p.kind == PieceKind::King)
                })
                .count();
            if kings != 1 {
                return Err(bad("each side needs exactly one king"));
            }
        }

        let castling = parts.get(2).copied().unwrap_or("-");
        if castling != "-" && !castling.chars().all(|c| "KQkq".contains(c)) {
            return Err(bad("invalid castling field"));
        }

        let mut next_id = 0u8;
        for sq in Square::all() {
            if let Some(mut pc) = b.piece_at(sq) {
                pc.id = PieceId(next_id);
                next_id += 1;
                pc.has_moved = !starts_unmoved(pc, sq, castling);
                b.set_piece(sq, Some(pc));
            }
        }

        if let Some(ep) = parts.get(3).copied().filter(|&s| s != "-") {
            let sq: Square = ep.parse().map_err(|_| bad("invalid en-passant square"))?;
            let mover = side_to_move.other();
            let expected_rank = mover.pawn_rank() as i8 + mover.forward();
            if sq.rank() as i8 != expected_rank || b.piece_at(sq).is_some() {
                return Err(bad("en-passant square inconsistent with position"));
            }
            // the pawn that just double-stepped stands one rank further on
            let pushed = sq.offset(0, mover.forward()).and_then(|s| b.piece_at(s));
            if !pushed.is_some_and(|p| p.kind == PieceKind::Pawn && p.color == mover) {
                return Err(bad("no pawn behind en-passant square"));
            }
            b.en_passant = Some(sq);
        }

        Ok(b)
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.rank() as usize][sq.file() as usize]
    }

    pub(crate) fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        self.squares[sq.rank() as usize][sq.file() as usize] = pc;
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn king_square(&self, c: Color) -> Option<Square> {
        self.pieces(c)
            .find(|(_, pc)| pc.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Pieces of one color in a1..h8 order.
    pub fn pieces(&self, c: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_at(sq) {
            Some(pc) if pc.color == c => Some((sq, pc)),
            _ => None,
        })
    }

    /// Locates a tracked piece by its identity.
    pub fn piece_by_id(&self, id: PieceId) -> Option<(Square, Piece)> {
        Square::all().find_map(|sq| self.piece_at(sq).filter(|pc| pc.id == id).map(|pc| (sq, pc)))
    }

    /// Number of pieces of the given color and kind.
    pub fn count(&self, c: Color, kind: PieceKind) -> usize {
        self.pieces(c).filter(|(_, pc)| pc.kind == kind).count()
    }

    /// Executes a move that `is_valid_move` has already accepted.
    ///
    /// There is no re-validation here; calling it with an unchecked move
    /// leaves the board in an unspecified state.
    ///
    /// # Panics
    /// Panics if `from` is empty.
    pub fn make_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> MoveResult {
        let result = self.apply(from, to, promotion);
        debug!(
            mv = %Move::new(from, to),
            piece = %result.piece.kind,
            id = %result.piece.id,
            captured = ?result.captured.map(|c| c.piece.id),
            castle = result.rook_move.is_some(),
            en_passant = result.en_passant,
            needs_promotion = result.needs_promotion,
            "move executed"
        );
        result
    }

    /// Move execution without logging; also used for self-check simulation.
    pub(crate) fn apply(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> MoveResult {
        let mut moved = self.piece_at(from).expect("no piece on from-square");
        let was_pawn = moved.kind == PieceKind::Pawn;
        let ep_target = self.en_passant.take();

        let mut captured = self.piece_at(to).map(|piece| Capture { piece, square: to });

        // En-passant: the victim stands beside the origin, not on the destination
        let mut en_passant = false;
        if was_pawn && captured.is_none() && Some(to) == ep_target && from.file() != to.file() {
            if let Some(victim_sq) = Square::new(to.file(), from.rank())
                && let Some(victim) = self.piece_at(victim_sq)
                && victim.kind == PieceKind::Pawn
                && victim.color != moved.color
            {
                self.set_piece(victim_sq, None);
                captured = Some(Capture {
                    piece: victim,
                    square: victim_sq,
                });
                en_passant = true;
            }
        }

        // Castling: king travels two files, rook lands on the square it crossed
        let mut rook_move = None;
        if moved.kind == PieceKind::King && from.file().abs_diff(to.file()) == 2 {
            let dir: i8 = if to.file() > from.file() { 1 } else { -1 };
            let rook_file = if dir > 0 { 7 } else { 0 };
            if let Some(rook_from) = Square::new(rook_file, from.rank())
                && let Some(rook_to) = to.offset(-dir, 0)
                && let Some(mut rook) = self.piece_at(rook_from)
            {
                rook.has_moved = true;
                self.set_piece(rook_from, None);
                self.set_piece(rook_to, Some(rook));
                rook_move = Some(RookMove {
                    id: rook.id,
                    from: rook_from,
                    to: rook_to,
                });
            }
        }

        moved.has_moved = true;

        let mut needs_promotion = false;
        let mut promoted_to = None;
        if was_pawn && to.rank() == moved.color.promotion_rank() {
            match promotion.filter(|k| k.is_promotion_target()) {
                Some(kind) => {
                    moved.kind = kind;
                    promoted_to = Some(kind);
                }
                None => needs_promotion = true,
            }
        }

        self.set_piece(from, None);
        self.set_piece(to, Some(moved));

        if was_pawn && from.rank().abs_diff(to.rank()) == 2 {
            self.en_passant = Square::new(from.file(), (from.rank() + to.rank()) / 2);
        }

        self.side_to_move = self.side_to_move.other();

        MoveResult {
            from,
            to,
            piece: moved,
            captured,
            en_passant,
            rook_move,
            needs_promotion,
            promoted_to,
        }
    }

    /// Finalizes a pending promotion on `square`, keeping the pawn's id.
    ///
    /// The turn is not touched: it already passed when the pawn moved.
    pub fn promote(&mut self, square: Square, kind: PieceKind) -> ChessResult<Promotion> {
        if !kind.is_promotion_target() {
            return Err(ChessError::InvalidPromotion(kind));
        }
        let mut pc = match self.piece_at(square) {
            Some(pc)
                if pc.kind == PieceKind::Pawn && square.rank() == pc.color.promotion_rank() =>
            {
                pc
            }
            _ => return Err(ChessError::NotPromotable(square)),
        };
        pc.kind = kind;
        self.set_piece(square, Some(pc));
        debug!(%square, id = %pc.id, %kind, "promotion finalized");
        Ok(Promotion {
            id: pc.id,
            square,
            kind,
        })
    }
}

/// Whether a freshly parsed piece may still castle (kings, rooks) or is on
/// its starting rank (pawns).
fn starts_unmoved(pc: Piece, sq: Square, castling: &str) -> bool {
    let home = sq.rank() == pc.color.back_rank();
    let (king_side, queen_side) = match pc.color {
        Color::White => ('K', 'Q'),
        Color::Black => ('k', 'q'),
    };
    match pc.kind {
        PieceKind::Pawn => sq.rank() == pc.color.pawn_rank(),
        PieceKind::King => {
            home && sq.file() == 4
                && (castling.contains(king_side) || castling.contains(queen_side))
        }
        PieceKind::Rook => {
            home && ((sq.file() == 7 && castling.contains(king_side))
                || (sq.file() == 0 && castling.contains(queen_side)))
        }
        _ => true,
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let c = Square::new(file, rank)
                    .and_then(|s| self.piece_at(s))
                    .map(|p| p.symbol())
                    .unwrap_or('.');
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
