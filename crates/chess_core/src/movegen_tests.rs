use super::*;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn board(fen: &str) -> Board {
    Board::from_fen(fen).unwrap()
}

fn squares(list: &[&str]) -> Vec<Square> {
    let mut v: Vec<Square> = list.iter().map(|s| sq(s)).collect();
    v.sort();
    v
}

#[test]
fn test_startpos_moves() {
    let b = Board::startpos();
    // Starting position has 20 legal moves
    assert_eq!(b.all_legal_moves().len(), 20);
    assert_eq!(b.legal_moves(sq("e2")), squares(&["e3", "e4"]));
    assert_eq!(b.legal_moves(sq("g1")), squares(&["f3", "h3"]));
    assert!(b.legal_moves(sq("e1")).is_empty());
}

#[test]
fn test_kiwipete_moves() {
    // Kiwipete position - complex with many move types
    let b = board("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -");
    assert_eq!(b.all_legal_moves().len(), 48);
}

#[test]
fn test_no_moves_for_empty_or_enemy_square() {
    let b = Board::startpos();
    assert!(b.legal_moves(sq("e4")).is_empty());
    assert!(b.legal_moves(sq("e7")).is_empty());
    assert!(!b.is_valid_move(sq("e7"), sq("e5")));
    assert!(!b.is_valid_move(sq("e4"), sq("e5")));
}

#[test]
fn test_cannot_capture_own_piece_or_stand_still() {
    let b = Board::startpos();
    assert!(!b.is_valid_move(sq("a1"), sq("a2")));
    assert!(!b.is_valid_move(sq("e2"), sq("e2")));
}

#[test]
fn test_blocked_double_step_is_illegal() {
    let b = board("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
    assert!(!b.is_valid_move(sq("e2"), sq("e4")));
    assert!(!b.is_valid_move(sq("e2"), sq("e3")));
    assert!(b.legal_moves(sq("e2")).is_empty());

    // double step only from the starting rank
    let b = board("4k3/8/8/8/8/4P3/8/4K3 w - - 0 1");
    assert!(!b.is_valid_move(sq("e3"), sq("e5")));
}

#[test]
fn test_pawn_diagonal_needs_a_target() {
    let b = board("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1");
    assert!(b.is_valid_move(sq("e4"), sq("d5")));
    assert!(!b.is_valid_move(sq("e4"), sq("f5")));
    assert!(!b.is_valid_move(sq("e4"), sq("d3")));
}

#[test]
fn test_pinned_piece_cannot_expose_king() {
    // Bishop on e2 pinned by the rook on e8
    let b = board("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1");
    assert!(!b.is_valid_move(sq("e2"), sq("d3")));
    assert!(b.legal_moves(sq("e2")).is_empty());
}

#[test]
fn test_king_cannot_step_into_attack() {
    let b = board("4k3/8/8/8/8/8/r7/4K3 w - - 0 1");
    assert!(!b.is_valid_move(sq("e1"), sq("e2")));
    assert!(b.is_valid_move(sq("e1"), sq("f1")));
    // King may not hide behind itself along the checking line
    let b = board("4k3/8/8/8/8/8/8/r3K3 w - - 0 1");
    assert!(!b.is_valid_move(sq("e1"), sq("f1")));
    assert!(b.is_valid_move(sq("e1"), sq("e2")));
}

#[test]
fn test_must_answer_check() {
    let b = board("4k3/8/8/8/8/8/3P4/r3K2R w K - 0 1");
    assert!(b.is_in_check(Color::White));
    // Unrelated pawn move leaves the king in check
    assert!(!b.is_valid_move(sq("d2"), sq("d3")));
    // Castling out of check is not allowed
    assert!(!b.is_valid_move(sq("e1"), sq("g1")));
}

#[test]
fn test_en_passant_exposing_king_is_illegal() {
    // Capturing en passant would open the fifth rank to the rook
    let b = board("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1");
    assert!(!b.is_valid_move(sq("e5"), sq("d6")));
    assert!(b.is_valid_move(sq("e5"), sq("e6")));
}

#[test]
fn test_castling_allowed_when_all_conditions_hold() {
    let b = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    assert!(b.can_castle(sq("e1"), sq("g1")));
    assert!(b.is_valid_move(sq("e1"), sq("g1")));
    assert!(b.is_valid_move(sq("e1"), sq("c1")));
    let king_moves = b.legal_moves(sq("e1"));
    assert!(king_moves.contains(&sq("g1")));
    assert!(king_moves.contains(&sq("c1")));
}

#[test]
fn test_castling_requires_unmoved_pieces() {
    let b = board("r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1");
    assert!(!b.is_valid_move(sq("e1"), sq("g1"))); // h1 rook has moved
    assert!(b.is_valid_move(sq("e1"), sq("c1")));

    let b = board("r3k2r/8/8/8/8/8/8/R3K2R w kq - 0 1");
    assert!(!b.is_valid_move(sq("e1"), sq("c1"))); // king has moved
}

#[test]
fn test_castling_requires_empty_path() {
    let b = board("r3k2r/8/8/8/8/8/8/RN2K1NR w KQkq - 0 1");
    assert!(!b.is_valid_move(sq("e1"), sq("g1")));
    // b1 is not crossed by the king but still has to be empty
    assert!(!b.is_valid_move(sq("e1"), sq("c1")));
}

#[test]
fn test_castling_not_through_or_into_attack() {
    // f1 attacked by the rook on f8
    let b = board("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(!b.can_castle(sq("e1"), sq("g1")));
    assert!(b.can_castle(sq("e1"), sq("c1")));

    // g1 attacked by the rook on g8
    let b = board("4k1r1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(!b.is_valid_move(sq("e1"), sq("g1")));

    // b1 attacked: the king never crosses it, so castling is fine
    let b = board("1r2k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(b.is_valid_move(sq("e1"), sq("c1")));
}

#[test]
fn test_castling_not_out_of_check() {
    let b = board("4k3/8/8/8/8/8/8/R3K2r w Q - 0 1");
    assert!(!b.can_castle(sq("e1"), sq("c1")));
}

#[test]
fn test_checkmate_and_stalemate_detection() {
    // Back-rank mate
    let b = board("6k1/5ppp/8/8/8/8/8/3R2K1 b - - 0 1");
    assert!(!b.is_checkmate());
    let mut b = b;
    b.make_move(sq("g8"), sq("h8"), None);
    b.make_move(sq("d1"), sq("d8"), None);
    assert!(b.is_checkmate());
    assert!(!b.is_stalemate());
    assert_eq!(b.status(), GameStatus::Checkmate { winner: Color::White });

    // Black king in corner, white queen stalemates
    let b = board("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");
    assert!(b.is_stalemate());
    assert!(!b.is_checkmate());
    assert_eq!(b.status(), GameStatus::Stalemate);
    assert!(b.all_legal_moves().is_empty());
}

#[test]
fn test_status_check_with_escape() {
    let b = board("4k3/8/8/8/8/8/8/4K2r w - - 0 1");
    assert_eq!(b.status(), GameStatus::Check);
    assert!(!GameStatus::Check.is_over());
    assert_eq!(Board::startpos().status(), GameStatus::InProgress);
}

/// Every listed destination passes `is_valid_move`, and no other square does.
fn assert_moves_agree(b: &Board) {
    for from in Square::all() {
        let listed = b.legal_moves(from);
        for to in Square::all() {
            assert_eq!(
                listed.contains(&to),
                b.is_valid_move(from, to),
                "disagreement for {from}{to}"
            );
        }
    }
}

#[test]
fn test_legal_moves_agree_with_is_valid_move() {
    for fen in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R b KQkq -",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -",
        "4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1",
    ] {
        assert_moves_agree(&board(fen));
    }
}

#[test]
fn test_legal_moves_never_leave_king_in_check() {
    let b = board("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -");
    let mover = b.side_to_move();
    for mv in b.all_legal_moves() {
        let mut after = b.clone();
        after.make_move(mv.from, mv.to, Some(PieceKind::Queen));
        assert!(!after.is_in_check(mover), "{mv} leaves the king in check");
        assert_eq!(after.side_to_move(), mover.other());
    }
}
