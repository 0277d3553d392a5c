//! Board encoding for evaluator input
//!
//! Converts a board into the flat `f32` vector the evaluator model was
//! trained on. The layout is a fixed contract with the model file:
//!
//! | Range     | Content |
//! |-----------|---------|
//! | 0..768    | 12 planes × 64 squares, one-hot piece occupancy |
//! | 768       | side to move (1.0 white, 0.0 black) |
//! | 769..773  | castling-rights slots, always 1.0 |
//! | 773..775  | reserved, always 0.0 |
//! | 775..787  | piece counts / 8.0, white P N B R Q K then black |
//! | 787..791  | constants 0.5, 0.5, 0.0, 0.0 |
//!
//! Planes 0-5 are white pawn, knight, bishop, rook, queen, king; planes 6-11
//! the same for black. Squares are indexed from white's side (a1 = 0).

use chess_core::{Board, Color, PieceKind, Square};

/// Number of feature planes: 6 piece kinds × 2 colors
pub const NUM_PLANES: usize = 12;

/// Length of the one-hot occupancy segment: 8 × 8 × 12 = 768
pub const NUM_PIECE_FEATURES: usize = 64 * NUM_PLANES;

/// Total length of an encoded board.
pub const FEATURE_LEN: usize = 791;

/// Offset of the side-to-move flag.
pub const SIDE_TO_MOVE_IDX: usize = NUM_PIECE_FEATURES;

/// Offset of the first material count.
pub const MATERIAL_IDX: usize = SIDE_TO_MOVE_IDX + 7;

const MATERIAL_DIVISOR: f32 = 8.0;

/// Plane index of a piece in the occupancy segment.
#[inline]
pub fn plane(color: Color, kind: PieceKind) -> usize {
    let color_offset = if color == Color::White { 0 } else { 6 };
    kind.idx() + color_offset
}

/// Encodes `board` into a vector of exactly [`FEATURE_LEN`] values.
pub fn encode_board(board: &Board) -> Vec<f32> {
    let mut features = vec![0.0f32; FEATURE_LEN];

    for sq in Square::all() {
        if let Some(piece) = board.piece_at(sq) {
            let idx = plane(piece.color, piece.kind) * 64 + sq.index() as usize;
            features[idx] = 1.0;
        }
    }

    let mut idx = SIDE_TO_MOVE_IDX;
    features[idx] = if board.side_to_move() == Color::White { 1.0 } else { 0.0 };
    idx += 1;

    // Castling slots are not derived from the position
    for _ in 0..4 {
        features[idx] = 1.0;
        idx += 1;
    }
    idx += 2;

    debug_assert_eq!(idx, MATERIAL_IDX);
    for color in Color::ALL {
        for kind in PieceKind::ALL {
            features[idx] = board.count(color, kind) as f32 / MATERIAL_DIVISOR;
            idx += 1;
        }
    }

    features[idx] = 0.5;
    features[idx + 1] = 0.5;

    features
}

#[cfg(test)]
#[path = "features_tests.rs"]
mod features_tests;
