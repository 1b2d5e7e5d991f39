//! The bureaucrat: a piece that moves to any empty square, never captures
//! and never attacks. What happens when it is captured is a policy choice.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Position;
use crate::movegen::is_legal;
use crate::types::*;

/// Outcome of capturing a bureaucrat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BureaucratCapture {
    /// The bureaucrat changes side and reappears on the first empty square
    /// (files left to right, each file scanned from the top rank down).
    #[default]
    Defect,
    /// The bureaucrat leaves the board like any captured piece.
    Retire,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BureaucratRule {
    pub capture: BureaucratCapture,
}

impl BureaucratRule {
    pub fn new(capture: BureaucratCapture) -> Self {
        Self { capture }
    }

    /// Tags captures of bureaucrats and adds the side's bureaucrat relocations.
    pub fn filter_legal_moves(&self, pos: &mut Position, mut moves: Vec<Move>) -> Vec<Move> {
        for mv in moves.iter_mut() {
            let victim = pos.piece_at(mv.to);
            if mv.tag.is_none() && victim.map(|pc| pc.kind) == Some(PieceKind::Bureaucrat) {
                mv.tag = Some(MoveTag::Transform);
            }
        }

        let mover = pos.side_to_move;
        let bureaucrats: Vec<Square> = pos
            .pieces()
            .filter(|(_, pc)| pc.color == mover && pc.kind == PieceKind::Bureaucrat)
            .map(|(sq, _)| sq)
            .collect();
        let empties: Vec<Square> = pos
            .dims
            .squares()
            .filter(|&s| pos.piece_at(s).is_none())
            .collect();

        for from in bureaucrats {
            for &to in &empties {
                let mv = Move::new(from, to);
                // Moving a bureaucrat can still uncover a check on its own king.
                if is_legal(pos, mv) {
                    moves.push(mv);
                }
            }
        }
        moves
    }

    pub fn on_move_applied(&self, pos: &mut Position, mv: Move) {
        let captured = match pos.history.last() {
            Some(entry) if entry.mv == mv => entry.captured,
            _ => return,
        };
        let victim = match captured {
            Some(pc) if pc.kind == PieceKind::Bureaucrat => pc,
            _ => return,
        };

        match self.capture {
            BureaucratCapture::Retire => {
                debug!(color = %victim.color, "bureaucrat retired");
            }
            BureaucratCapture::Defect => {
                let defector = Piece::new(victim.color.other(), PieceKind::Bureaucrat);
                match first_empty_square(pos) {
                    Some(sq) => {
                        pos.set_piece(sq, Some(defector));
                        debug!(
                            color = %defector.color,
                            square = %pos.dims.square_name(sq),
                            "bureaucrat defected"
                        );
                    }
                    None => debug!("no empty square for the defecting bureaucrat"),
                }
            }
        }
    }
}

/// First empty square scanning files left to right, each from the top rank down.
pub fn first_empty_square(pos: &Position) -> Option<Square> {
    let d = pos.dims;
    (0..d.width as usize)
        .flat_map(|x| (0..d.height as usize).map(move |y| (x, y)))
        .filter_map(|(x, y)| d.from_grid(x, y))
        .find(|&s| pos.piece_at(s).is_none())
}

#[cfg(test)]
#[path = "bureaucrat_tests.rs"]
mod bureaucrat_tests;
