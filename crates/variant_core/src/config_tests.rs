use super::*;

#[test]
fn partial_toml_uses_defaults() {
    let cfg = Configuration::from_toml_str(
        r#"
        bureaucrat_enabled = true
        white_moves_per_turn = 2
        board_width = 10
        "#,
    )
    .unwrap();
    assert!(cfg.bureaucrat_enabled);
    assert_eq!(cfg.white_moves_per_turn, 2);
    assert_eq!(cfg.black_moves_per_turn, 1);
    assert_eq!(cfg.board_width, 10);
    assert_eq!(cfg.board_height, 0);
    assert_eq!(cfg.bureaucrat_capture, BureaucratCapture::Defect);
    assert!(cfg.resize_requested());
}

#[test]
fn capture_policy_and_override_parse() {
    let cfg = Configuration::from_toml_str(
        r#"
        bureaucrat_capture = "retire"
        position_override = "   "
        "#,
    )
    .unwrap();
    assert_eq!(cfg.bureaucrat_capture, BureaucratCapture::Retire);
    // Blank override counts as no override.
    assert_eq!(cfg.override_text(), None);
}

#[test]
fn zero_moves_per_turn_is_clamped() {
    let cfg = Configuration::from_toml_str("black_moves_per_turn = 0").unwrap();
    assert_eq!(cfg.black_moves_per_turn, 1);
}

#[test]
fn malformed_toml_is_reported() {
    let err = Configuration::from_toml_str("board_width = \"wide\"").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn presets_seed_configuration() {
    let all = presets();
    let names: Vec<&str> = all.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Standard", "Double move x2", "Bureaucrat", "Bureaucrat + DM x2"]
    );

    let dm = preset("bureaucrat + dm x2").unwrap();
    let cfg = dm.configuration();
    assert!(cfg.bureaucrat_enabled);
    assert_eq!((cfg.white_moves_per_turn, cfg.black_moves_per_turn), (2, 2));
    assert_eq!(dm.default_fen, BUREAUCRAT_FEN);

    assert!(matches!(
        preset("Atomic"),
        Err(ConfigError::UnknownPreset(name)) if name == "Atomic"
    ));
}
