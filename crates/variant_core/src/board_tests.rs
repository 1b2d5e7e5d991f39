use super::*;

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

fn mv(p: &Position, from: &str, to: &str) -> Move {
    Move::new(
        p.dims.parse_square(from).unwrap(),
        p.dims.parse_square(to).unwrap(),
    )
}

#[test]
fn make_unmake_restores_position() {
    let fens = [
        fen::STANDARD_FEN,
        "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
        "4k3/P7/8/8/8/8/8/4K3 w - - 0 1",
    ];
    let moves = [("e2", "e4"), ("a1", "a8"), ("a7", "a8")];
    for (fen, (from, to)) in fens.into_iter().zip(moves) {
        let mut p = pos(fen);
        let m = mv(&p, from, to);
        let undo = p.make_move(m);
        assert_ne!(p.to_fen(), fen);
        p.unmake_move(m, undo);
        assert_eq!(p.to_fen(), fen);
        assert!(p.history.is_empty());
    }
}

#[test]
fn pawn_reaching_last_rank_becomes_queen_by_default() {
    let mut p = pos("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
    let m = mv(&p, "a7", "a8");
    p.make_move(m);
    assert_eq!(p.to_fen(), "Q3k3/8/8/8/8/8/8/4K3 b - - 0 1");

    let mut p = pos("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
    p.make_move(m.with_promo(PieceKind::Knight));
    assert_eq!(p.to_fen(), "N3k3/8/8/8/8/8/8/4K3 b - - 0 1");
}

#[test]
fn double_step_sets_en_passant_square() {
    let mut p = Position::startpos();
    let m = mv(&p, "e2", "e4");
    p.make_move(m);
    assert_eq!(p.en_passant, p.dims.parse_square("e3"));
    assert_eq!(p.halfmove_clock, 0);

    let n = mv(&p, "g8", "f6");
    p.make_move(n);
    assert_eq!(p.en_passant, None);
    assert_eq!(p.halfmove_clock, 1);
    assert_eq!(p.fullmove_number, 2);
}

#[test]
fn rook_capture_clears_both_sides_rights() {
    let mut p = pos("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let m = mv(&p, "a1", "a8");
    p.make_move(m);
    assert_eq!(p.to_fen(), "R3k2r/8/8/8/8/8/8/4K2R b Kk - 0 1");
    assert_eq!(
        p.history.last().unwrap().captured,
        Some(Piece::new(Color::Black, PieceKind::Rook))
    );
}

#[test]
fn king_move_drops_rights_and_is_remembered() {
    let mut p = pos("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    assert!(!p.king_has_moved(Color::White));
    let m = mv(&p, "e1", "d1");
    p.make_move(m);
    assert!(p.king_has_moved(Color::White));
    assert!(!p.king_has_moved(Color::Black));
    assert_eq!(p.castling.wk, None);
    assert_eq!(p.castling.wq, None);
    assert_eq!(p.castling.bk, Some(7));
    assert_eq!(p.castling.bq, Some(0));
}

#[test]
fn turn_passes_after_the_side_spends_its_budget() {
    let mut p = Position::startpos();
    p.set_moves_per_turn(2, 1);
    assert_eq!(p.moves_left, 2);

    let a = mv(&p, "e2", "e4");
    let undo = p.make_move(a);
    assert_eq!(p.side_to_move, Color::White);
    assert_eq!(p.moves_left, 1);

    p.unmake_move(a, undo);
    assert_eq!(p.moves_left, 2);
    p.make_move(a);

    let b = mv(&p, "d2", "d4");
    p.make_move(b);
    assert_eq!(p.side_to_move, Color::Black);
    assert_eq!(p.moves_left, 1);

    let c = mv(&p, "e7", "e5");
    p.make_move(c);
    assert_eq!(p.side_to_move, Color::White);
    assert_eq!(p.moves_left, 2);
    assert_eq!(p.fullmove_number, 2);
}

#[test]
fn zero_budget_is_raised_to_one() {
    let mut p = Position::startpos();
    p.set_moves_per_turn(0, 0);
    assert_eq!(p.moves_per_turn, [1, 1]);
    assert_eq!(p.moves_left, 1);
}

#[test]
fn attacks_reach_across_wide_boards() {
    let dims = BoardDims::new(12, 12);
    let mut p = Position::new_empty(dims);
    let a1 = dims.sq(0, 0).unwrap();
    let l1 = dims.sq(11, 0).unwrap();
    let l12 = dims.sq(11, 11).unwrap();
    p.set_piece(a1, Some(Piece::new(Color::White, PieceKind::Queen)));

    assert!(p.is_square_attacked(l1, Color::White));
    assert!(p.is_square_attacked(l12, Color::White));
    assert!(!p.is_square_attacked(dims.sq(11, 1).unwrap(), Color::White));
    assert!(!p.is_square_attacked(l1, Color::Black));

    p.set_piece(dims.sq(6, 0).unwrap(), Some(Piece::new(Color::Black, PieceKind::Knight)));
    assert!(!p.is_square_attacked(l1, Color::White));
    assert_eq!(
        p.first_on_ray(a1, 1, 0),
        Some((dims.sq(6, 0).unwrap(), Piece::new(Color::Black, PieceKind::Knight)))
    );
}

#[test]
fn pawns_attack_forward_diagonals_only() {
    let p = pos("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1");
    let d = p.dims;
    assert!(p.is_square_attacked(d.parse_square("d5").unwrap(), Color::White));
    assert!(p.is_square_attacked(d.parse_square("f5").unwrap(), Color::White));
    assert!(!p.is_square_attacked(d.parse_square("e5").unwrap(), Color::White));
    assert!(!p.is_square_attacked(d.parse_square("d3").unwrap(), Color::White));
}

#[test]
fn bureaucrat_attacks_nothing() {
    let p = pos("4k3/8/8/8/3C4/8/8/4K3 b - - 0 1");
    let d = p.dims;
    for name in ["c5", "d5", "e5", "c3", "e4"] {
        assert!(!p.is_square_attacked(d.parse_square(name).unwrap(), Color::White), "{name}");
    }
    assert!(!p.in_check(Color::Black));
}

#[test]
fn display_draws_ranks_files_and_turn() {
    let p = pos("k4/5/5/5/4K w - - 0 1");
    let expected = concat!(
        " 5 | k . . . .\n",
        " 4 | . . . . .\n",
        " 3 | . . . . .\n",
        " 2 | . . . . .\n",
        " 1 | . . . . K\n",
        "     a b c d e\n",
        "White to move (1 of 1 this turn)",
    );
    assert_eq!(p.to_string(), expected);
}

#[test]
fn counters_saturate_at_their_limit() {
    let fen = "4k3/8/8/8/8/8/8/4K1N1 b - - 4294967295 4294967295";
    let mut p = pos(fen);
    let m = mv(&p, "e8", "d8");
    let undo = p.make_move(m);
    assert_eq!(p.halfmove_clock, u32::MAX);
    assert_eq!(p.fullmove_number, u32::MAX);
    p.unmake_move(m, undo);
    assert_eq!(p.to_fen(), fen);
}
