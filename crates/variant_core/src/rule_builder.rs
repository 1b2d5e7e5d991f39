use crate::bureaucrat::BureaucratRule;
use crate::config::Configuration;
use crate::rules::{MultiMoveRule, Rule, RuleSet, StandardRuleset};

/// Map a configuration to its rule chain: `StandardRuleset` first, the
/// bureaucrat rule when enabled, then the per-turn move counts.
pub fn build_rules(cfg: &Configuration) -> RuleSet {
    let mut rules = vec![Rule::Standard(StandardRuleset)];
    if cfg.bureaucrat_enabled {
        rules.push(Rule::Bureaucrat(BureaucratRule::new(cfg.bureaucrat_capture)));
    }
    rules.push(Rule::MultiMove(MultiMoveRule::new(
        cfg.white_moves_per_turn,
        cfg.black_moves_per_turn,
    )));
    RuleSet::new(rules)
}

#[cfg(test)]
#[path = "rule_builder_tests.rs"]
mod rule_builder_tests;
