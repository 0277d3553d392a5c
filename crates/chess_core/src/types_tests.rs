use super::*;

#[test]
fn test_square_labels() {
    let e4: Square = "e4".parse().unwrap();
    assert_eq!(e4.file(), 4);
    assert_eq!(e4.rank(), 3);
    assert_eq!(e4.index(), 28);
    assert_eq!(e4.to_string(), "e4");

    assert_eq!(Square::from_index(0).unwrap().to_string(), "a1");
    assert_eq!(Square::from_index(63).unwrap().to_string(), "h8");
}

#[test]
fn test_square_rejects_bad_labels() {
    for bad in ["", "e", "i1", "a9", "a0", "e44", "E4"] {
        assert!(bad.parse::<Square>().is_err(), "{bad:?} should not parse");
    }
    assert!(Square::new(8, 0).is_none());
    assert!(Square::from_index(64).is_none());
}

#[test]
fn test_square_offset_stays_on_board() {
    let a1: Square = "a1".parse().unwrap();
    assert_eq!(a1.offset(1, 2).unwrap().to_string(), "b3");
    assert!(a1.offset(-1, 0).is_none());
    assert!(a1.offset(0, 8).is_none());
}

#[test]
fn test_square_serializes_as_label() {
    let sq: Square = "g7".parse().unwrap();
    assert_eq!(serde_json::to_string(&sq).unwrap(), "\"g7\"");
    let back: Square = serde_json::from_str("\"g7\"").unwrap();
    assert_eq!(back, sq);
    assert!(serde_json::from_str::<Square>("\"z9\"").is_err());
}

#[test]
fn test_move_index_layout() {
    let mv: Move = "e2e4".parse().unwrap();
    assert_eq!(mv.index(), 12 * 64 + 28);
    assert_eq!(Move::from_index(mv.index()), Some(mv));
    assert_eq!(Move::from_index(Move::INDEX_SPACE), None);
    assert_eq!(mv.to_string(), "e2e4");
}

#[test]
fn test_color_ranks() {
    assert_eq!(Color::White.promotion_rank(), 7);
    assert_eq!(Color::Black.promotion_rank(), 0);
    assert_eq!(Color::Black.pawn_rank(), 6);
    assert_eq!(Color::White.other(), Color::Black);
}

#[test]
fn test_piece_symbol_case() {
    let white = Piece::new(PieceId(0), Color::White, PieceKind::Knight);
    let black = Piece::new(PieceId(1), Color::Black, PieceKind::Knight);
    assert_eq!(white.symbol(), 'N');
    assert_eq!(black.symbol(), 'n');
    assert!(!PieceKind::King.is_promotion_target());
    assert!(PieceKind::Knight.is_promotion_target());
}
