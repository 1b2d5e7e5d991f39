use super::*;
use crate::bureaucrat::BureaucratCapture;

#[test]
fn default_configuration_builds_standard_chain() {
    let rules = build_rules(&Configuration::default());
    assert_eq!(
        rules.rules(),
        &[
            Rule::Standard(StandardRuleset),
            Rule::MultiMove(MultiMoveRule::new(1, 1)),
        ]
    );
}

#[test]
fn bureaucrat_slots_between_standard_and_multi_move() {
    let cfg = Configuration {
        bureaucrat_enabled: true,
        bureaucrat_capture: BureaucratCapture::Retire,
        white_moves_per_turn: 2,
        black_moves_per_turn: 3,
        ..Configuration::default()
    };
    let rules = build_rules(&cfg);
    assert_eq!(
        rules.rules(),
        &[
            Rule::Standard(StandardRuleset),
            Rule::Bureaucrat(BureaucratRule::new(BureaucratCapture::Retire)),
            Rule::MultiMove(MultiMoveRule::new(2, 3)),
        ]
    );
}

#[test]
fn same_configuration_same_rules() {
    let cfg = Configuration {
        bureaucrat_enabled: true,
        ..Configuration::default()
    };
    assert_eq!(build_rules(&cfg), build_rules(&cfg.clone()));
}
