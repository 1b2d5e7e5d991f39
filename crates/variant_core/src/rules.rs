//! Rule chain: a closed set of rule variants run in list order at three hook points.
//!
//! - `on_game_start` runs once, right after the start position is decoded.
//! - `filter_legal_moves` receives the previous rule's output. The chain
//!   starts from geometry-only moves (`pseudo_moves`), so the first rule
//!   must supply check safety. `build_rules` always puts `StandardRuleset` first.
//! - `on_move_applied` runs after the position has been mutated.

use tracing::debug;

use crate::board::Position;
use crate::bureaucrat::BureaucratRule;
use crate::movegen::{is_legal, pseudo_moves};
use crate::types::*;

/// Baseline chess legality: check safety, castling conditions and the
/// en-passant window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StandardRuleset;

impl StandardRuleset {
    pub fn filter_legal_moves(&self, pos: &mut Position, mut moves: Vec<Move>) -> Vec<Move> {
        let mover = pos.side_to_move;
        let king_moved = pos.king_has_moved(mover);
        moves.retain(|&mv| {
            if mv.is_castle() && king_moved {
                return false;
            }
            if mv.is_en_passant() && pos.en_passant != Some(mv.to) {
                return false;
            }
            is_legal(pos, mv)
        });
        moves
    }
}

/// Gives each side a fixed number of consecutive moves per turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MultiMoveRule {
    pub white: u8,
    pub black: u8,
}

impl MultiMoveRule {
    pub fn new(white: u8, black: u8) -> Self {
        Self {
            white: white.max(1),
            black: black.max(1),
        }
    }

    pub fn moves_for(&self, c: Color) -> u8 {
        match c {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    /// The remaining-moves counter lives in `Position`, so that trial moves
    /// made during legality checks unwind it along with everything else.
    pub fn on_game_start(&self, pos: &mut Position) {
        pos.set_moves_per_turn(self.white, self.black);
    }
}

impl Default for MultiMoveRule {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rule {
    Standard(StandardRuleset),
    Bureaucrat(BureaucratRule),
    MultiMove(MultiMoveRule),
}

impl Rule {
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Standard(_) => "standard",
            Rule::Bureaucrat(_) => "bureaucrat",
            Rule::MultiMove(_) => "multi-move",
        }
    }

    pub fn on_game_start(&self, pos: &mut Position) {
        match self {
            Rule::Standard(_) | Rule::Bureaucrat(_) => {}
            Rule::MultiMove(r) => r.on_game_start(pos),
        }
    }

    pub fn filter_legal_moves(&self, pos: &mut Position, moves: Vec<Move>) -> Vec<Move> {
        match self {
            Rule::Standard(r) => r.filter_legal_moves(pos, moves),
            Rule::Bureaucrat(r) => r.filter_legal_moves(pos, moves),
            Rule::MultiMove(_) => moves,
        }
    }

    pub fn on_move_applied(&self, pos: &mut Position, mv: Move) {
        match self {
            Rule::Standard(_) | Rule::MultiMove(_) => {}
            Rule::Bureaucrat(r) => r.on_move_applied(pos, mv),
        }
    }
}

impl From<StandardRuleset> for Rule {
    fn from(r: StandardRuleset) -> Self {
        Rule::Standard(r)
    }
}

impl From<BureaucratRule> for Rule {
    fn from(r: BureaucratRule) -> Self {
        Rule::Bureaucrat(r)
    }
}

impl From<MultiMoveRule> for Rule {
    fn from(r: MultiMoveRule) -> Self {
        Rule::MultiMove(r)
    }
}

/// Ordered list of active rules. Immutable once a game has started.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(Rule::name).collect()
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.rules.iter().any(|r| r.name() == name)
    }

    pub fn start(&self, pos: &mut Position) {
        debug!(rules = ?self.names(), "running game-start hooks");
        for rule in &self.rules {
            rule.on_game_start(pos);
        }
    }

    /// Legal moves for the side to move. Works on a scratch copy, so `pos` is never touched.
    pub fn legal_moves(&self, pos: &Position) -> Vec<Move> {
        let mut scratch = pos.clone();
        let mut moves = Vec::with_capacity(64);
        pseudo_moves(&scratch, &mut moves);
        for rule in &self.rules {
            moves = rule.filter_legal_moves(&mut scratch, moves);
        }
        moves
    }

    pub fn legal_moves_from(&self, pos: &Position, from: Square) -> Vec<Move> {
        let mut moves = self.legal_moves(pos);
        moves.retain(|m| m.from == from);
        moves
    }

    /// Apply a move already known to be legal, then let each rule react.
    pub fn apply(&self, pos: &mut Position, mv: Move) {
        pos.make_move(mv);
        for rule in &self.rules {
            rule.on_move_applied(pos, mv);
        }
        debug!(
            from = %pos.dims.square_name(mv.from),
            to = %pos.dims.square_name(mv.to),
            side_to_move = %pos.side_to_move,
            moves_left = pos.moves_left,
            "move applied"
        );
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
