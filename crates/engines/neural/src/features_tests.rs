use super::*;

fn sq(s: &str) -> usize {
    s.parse::<Square>().unwrap().index() as usize
}

#[test]
fn test_encode_startpos() {
    let features = encode_board(&Board::startpos());

    assert_eq!(features.len(), FEATURE_LEN);

    // 32 pieces, all occupancy bits set exactly once
    let occupied: usize = features[..NUM_PIECE_FEATURES]
        .iter()
        .filter(|&&x| x > 0.0)
        .count();
    assert_eq!(occupied, 32);

    // White pawns on rank 2 (squares 8-15)
    for s in 8..16 {
        assert_eq!(features[plane(Color::White, PieceKind::Pawn) * 64 + s], 1.0);
    }
    assert_eq!(features[plane(Color::Black, PieceKind::King) * 64 + sq("e8")], 1.0);
    assert_eq!(features[plane(Color::White, PieceKind::Queen) * 64 + sq("d1")], 1.0);
}

#[test]
fn test_encode_tail_layout() {
    let features = encode_board(&Board::startpos());
    let tail = &features[NUM_PIECE_FEATURES..];

    let expected: [f32; 23] = [
        1.0, // white to move
        1.0, 1.0, 1.0, 1.0, // castling slots
        0.0, 0.0, // reserved
        1.0, 0.25, 0.25, 0.25, 0.125, 0.125, // white P N B R Q K
        1.0, 0.25, 0.25, 0.25, 0.125, 0.125, // black P N B R Q K
        0.5, 0.5, 0.0, 0.0,
    ];
    assert_eq!(tail, &expected[..]);
}

#[test]
fn test_side_to_move_flag() {
    let mut board = Board::startpos();
    board.make_move("e2".parse().unwrap(), "e4".parse().unwrap(), None);
    let features = encode_board(&board);
    assert_eq!(features[SIDE_TO_MOVE_IDX], 0.0);
    assert_eq!(features[plane(Color::White, PieceKind::Pawn) * 64 + sq("e4")], 1.0);
    assert_eq!(features[plane(Color::White, PieceKind::Pawn) * 64 + sq("e2")], 0.0);
}

#[test]
fn test_material_counts_follow_position() {
    let board = Board::from_fen("4k3/8/8/8/8/8/PPP5/RQ2K3 b - - 0 1").unwrap();
    let features = encode_board(&board);
    let white = &features[MATERIAL_IDX..MATERIAL_IDX + 6];
    let black = &features[MATERIAL_IDX + 6..MATERIAL_IDX + 12];
    let expected_white: [f32; 6] = [3.0 / 8.0, 0.0, 0.0, 0.125, 0.125, 0.125];
    let expected_black: [f32; 6] = [0.0, 0.0, 0.0, 0.0, 0.0, 0.125];
    assert_eq!(white, &expected_white[..]);
    assert_eq!(black, &expected_black[..]);
    // Castling slots stay constant even with no rights
    let castling: [f32; 4] = [1.0; 4];
    assert_eq!(&features[SIDE_TO_MOVE_IDX + 1..SIDE_TO_MOVE_IDX + 5], &castling[..]);
}

#[test]
fn test_encoding_is_deterministic() {
    let board =
        Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
            .unwrap();
    assert_eq!(encode_board(&board), encode_board(&board.clone()));
}
