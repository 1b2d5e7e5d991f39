//! Click-driven game controller: the one stateful entry point a presentation layer talks to.

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use crate::board::Position;
use crate::config::{Configuration, ScenarioPreset};
use crate::error::GameError;
use crate::fen;
use crate::notation::{history_notation, parse_uci_move};
use crate::rule_builder::build_rules;
use crate::rules::RuleSet;
use crate::start_position::build_starting_fen;
use crate::types::*;

pub const ILLEGAL_DESTINATION: &str = "illegal destination";
pub const ILLEGAL_MOVE: &str = "illegal move";

/// Grid coordinates as drawn: `x` is the file, `y` counts rows from the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    Idle,
    Selected { square: Square, targets: Vec<Move> },
}

/// Result of one click.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClickOutcome {
    Select {
        square: String,
        legal_targets: BTreeSet<String>,
    },
    MoveApplied {
        from: String,
        to: String,
    },
    MoveRejected {
        reason: String,
    },
    Noop,
}

/// Snapshot for rendering. Rebuilt after every click.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub selected: Option<Coord>,
    pub legal_targets: BTreeSet<String>,
    pub last_move_from: Option<Coord>,
    pub last_move_to: Option<Coord>,
    pub move_history: Vec<String>,
    /// Reason of the last rejected click, cleared by the next click.
    pub last_error: Option<String>,
}

#[derive(Clone, Debug)]
pub struct GameController {
    position: Position,
    rules: RuleSet,
    selection: Selection,
    last_move: Option<(Square, Square)>,
    history: Vec<String>,
    last_error: Option<String>,
    view: ViewState,
}

/// Start a game from a preset: a non-blank override in `cfg` wins over the preset's position.
pub fn new_game(preset: &ScenarioPreset, cfg: &Configuration) -> Result<GameController, GameError> {
    let base = cfg.override_text().unwrap_or(preset.default_fen.as_str());
    info!(preset = %preset.name, "starting new game");
    GameController::from_config(base, cfg)
}

impl GameController {
    /// Wrap a decoded position; runs every rule's game-start hook on it.
    pub fn new(mut position: Position, rules: RuleSet) -> Self {
        rules.start(&mut position);
        Self {
            position,
            rules,
            selection: Selection::Idle,
            last_move: None,
            history: Vec::new(),
            last_error: None,
            view: ViewState::default(),
        }
    }

    /// Derive the start position from `base` and build the rule chain.
    pub fn from_config(base: &str, cfg: &Configuration) -> Result<Self, GameError> {
        let text = build_starting_fen(base, cfg)?;
        let position = fen::decode(&text)?;
        let rules = build_rules(cfg);
        info!(start = %text, rules = ?rules.names(), "game ready");
        Ok(Self::new(position, rules))
    }

    pub fn handle_click(&mut self, x: usize, y: usize) -> ClickOutcome {
        self.last_error = None;
        let outcome = self.transition(x, y);
        self.refresh_view();
        outcome
    }

    /// Play a move typed as coordinates (`e2e4`, `e2-e4`, `e7e8n`, `j9j10`).
    /// Drops any pending selection. A promotion letter picks the piece;
    /// without one the pawn becomes a queen.
    pub fn play_move_text(&mut self, text: &str) -> ClickOutcome {
        self.last_error = None;
        self.selection = Selection::Idle;
        let legal = self.rules.legal_moves(&self.position);
        let outcome = match parse_uci_move(&legal, &self.position.dims, text) {
            Some(mv) => self.apply(mv),
            None => {
                warn!(text = %text, "rejected move text");
                self.last_error = Some(ILLEGAL_MOVE.to_string());
                ClickOutcome::MoveRejected {
                    reason: ILLEGAL_MOVE.to_string(),
                }
            }
        };
        self.refresh_view();
        outcome
    }

    fn transition(&mut self, x: usize, y: usize) -> ClickOutcome {
        let previous = std::mem::replace(&mut self.selection, Selection::Idle);
        let sq = match self.position.dims.from_grid(x, y) {
            Some(s) => s,
            None => return ClickOutcome::Noop,
        };
        let own_piece = matches!(
            self.position.piece_at(sq),
            Some(pc) if pc.color == self.position.side_to_move
        );

        match previous {
            Selection::Idle if own_piece => self.select(sq),
            Selection::Idle => ClickOutcome::Noop,
            Selection::Selected { square, .. } if square == sq => ClickOutcome::Noop,
            Selection::Selected { square, targets } => {
                // Promotions chosen by click become queens.
                let mv = targets
                    .iter()
                    .filter(|m| m.to == sq)
                    .find(|m| m.promo.is_none() || m.promo == Some(PieceKind::Queen))
                    .copied();
                match mv {
                    Some(mv) => self.apply(mv),
                    None if own_piece => self.select(sq),
                    None => {
                        let name = self.position.dims.square_name(sq);
                        warn!(
                            from = %self.position.dims.square_name(square),
                            to = %name,
                            "rejected click"
                        );
                        self.last_error = Some(ILLEGAL_DESTINATION.to_string());
                        ClickOutcome::MoveRejected {
                            reason: ILLEGAL_DESTINATION.to_string(),
                        }
                    }
                }
            }
        }
    }

    fn select(&mut self, sq: Square) -> ClickOutcome {
        let targets = self.rules.legal_moves_from(&self.position, sq);
        let names = self.target_names(&targets);
        debug!(square = %self.position.dims.square_name(sq), targets = names.len(), "selected");
        self.selection = Selection::Selected {
            square: sq,
            targets,
        };
        ClickOutcome::Select {
            square: self.position.dims.square_name(sq),
            legal_targets: names,
        }
    }

    fn apply(&mut self, mv: Move) -> ClickOutcome {
        let dims = self.position.dims;
        self.history.push(history_notation(&dims, mv));
        self.rules.apply(&mut self.position, mv);
        self.last_move = Some((mv.from, mv.to));
        ClickOutcome::MoveApplied {
            from: dims.square_name(mv.from),
            to: dims.square_name(mv.to),
        }
    }

    fn target_names(&self, targets: &[Move]) -> BTreeSet<String> {
        targets
            .iter()
            .map(|m| self.position.dims.square_name(m.to))
            .collect()
    }

    fn refresh_view(&mut self) {
        let dims = self.position.dims;
        let coord = |sq: Square| {
            let (x, y) = dims.to_grid(sq);
            Coord { x, y }
        };
        let (selected, legal_targets) = match &self.selection {
            Selection::Idle => (None, BTreeSet::new()),
            Selection::Selected { square, targets } => {
                (Some(coord(*square)), self.target_names(targets))
            }
        };
        self.view = ViewState {
            selected,
            legal_targets,
            last_move_from: self.last_move.map(|(from, _)| coord(from)),
            last_move_to: self.last_move.map(|(_, to)| coord(to)),
            move_history: self.history.clone(),
            last_error: self.last_error.clone(),
        };
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Exchange-notation name of a grid cell, e.g. `(4, 6)` is `e2` on 8x8.
    pub fn algebraic_of(&self, x: usize, y: usize) -> Option<String> {
        let d = self.position.dims;
        d.from_grid(x, y).map(|sq| d.square_name(sq))
    }

    /// Grid cell of a square name; inverse of `algebraic_of`.
    pub fn coords_of(&self, name: &str) -> Option<Coord> {
        let d = self.position.dims;
        d.parse_square(name).map(|sq| {
            let (x, y) = d.to_grid(sq);
            Coord { x, y }
        })
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Every legal move for the side to move. An empty list means the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.rules.legal_moves(&self.position)
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }

    pub fn in_check(&self) -> bool {
        self.position.in_check(self.position.side_to_move)
    }

    pub fn encode_position(&self) -> String {
        fen::encode(&self.position)
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;
