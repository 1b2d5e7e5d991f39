use serde_json::json;
use variant_core::{
    new_game, perft_with_rules, preset, ClickOutcome, Color, Configuration, GameController,
    Position,
};

fn play(game: &mut GameController, from: &str, to: &str) -> ClickOutcome {
    let a = game.coords_of(from).unwrap();
    game.handle_click(a.x, a.y);
    let b = game.coords_of(to).unwrap();
    game.handle_click(b.x, b.y)
}

#[test]
fn captured_bureaucrat_defects_to_first_empty_square() {
    let p = preset("Bureaucrat").unwrap();
    let mut game = new_game(&p, &p.configuration()).unwrap();
    for (from, to) in [
        ("c2", "c4"),
        ("a7", "a6"),
        ("c4", "c5"),
        ("a6", "a5"),
        ("c5", "d6"),
    ] {
        assert!(
            matches!(play(&mut game, from, to), ClickOutcome::MoveApplied { .. }),
            "{from}-{to}"
        );
    }
    assert_eq!(
        game.encode_position(),
        "rnbqkbnr/Cppppppp/3P4/p7/8/4C3/PP1PPPPP/RNBQKBNR b KQkq - 0 3"
    );
}

#[test]
fn bureaucrat_may_jump_to_every_empty_square() {
    let p = preset("Bureaucrat").unwrap();
    let mut game = new_game(&p, &p.configuration()).unwrap();
    let c = game.coords_of("e3").unwrap();
    match game.handle_click(c.x, c.y) {
        ClickOutcome::Select { legal_targets, .. } => {
            assert_eq!(legal_targets.len(), 30);
            assert!(legal_targets.contains("h5"));
            assert!(!legal_targets.contains("d6"));
        }
        other => panic!("expected a selection, got {other:?}"),
    }
}

#[test]
fn outcomes_serialize_with_kind_tag() {
    let p = preset("Standard").unwrap();
    let mut game = new_game(&p, &p.configuration()).unwrap();

    let c = game.coords_of("g1").unwrap();
    let selected = game.handle_click(c.x, c.y);
    assert_eq!(
        serde_json::to_value(&selected).unwrap(),
        json!({ "kind": "select", "square": "g1", "legal_targets": ["f3", "h3"] })
    );

    let c = game.coords_of("f3").unwrap();
    let moved = game.handle_click(c.x, c.y);
    assert_eq!(
        serde_json::to_value(&moved).unwrap(),
        json!({ "kind": "move_applied", "from": "g1", "to": "f3" })
    );

    let view = serde_json::to_value(game.view_state()).unwrap();
    assert_eq!(view["move_history"], json!(["g1-f3"]));
    assert_eq!(view["last_move_to"], json!({ "x": 5, "y": 5 }));
    assert_eq!(view["selected"], json!(null));

    assert_eq!(
        serde_json::to_value(ClickOutcome::Noop).unwrap(),
        json!({ "kind": "noop" })
    );
}

#[test]
fn filled_wide_board_game() {
    let p = preset("Standard").unwrap();
    let cfg = Configuration::from_toml_str("board_width = 10\nfill_expanded_files = true\n").unwrap();
    let game = new_game(&p, &cfg).unwrap();

    assert_eq!(game.position().width(), 10);
    assert_eq!(
        game.encode_position(),
        "rnqbkbnnnr/pppppppppp/10/10/10/10/PPPPPPPPPP/RNQBKBNNNR w KQkq - 0 1"
    );
    // Twenty pawn moves and two jumps for each of the four knights.
    assert_eq!(game.legal_moves().len(), 28);
}

#[test]
fn double_move_tree_counts() {
    let p = preset("Double move x2").unwrap();
    let game = new_game(&p, &p.configuration()).unwrap();
    let pos: &Position = game.position();

    // White moves twice before Black replies, so depth 2 stays with White.
    let after_one = perft_with_rules(pos, game.rules(), 1);
    assert_eq!(after_one, 20);
    let after_two = perft_with_rules(pos, game.rules(), 2);
    assert!(after_two > 20 * 20);
    assert_eq!(game.side_to_move(), Color::White);
}
