use std::fmt;

use crate::error::FormatError;
use crate::fen;
use crate::types::*;

pub const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Castling rights. Each right is bound to the file of the rook that castles on that side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: Option<u8>,
    pub wq: Option<u8>,
    pub bk: Option<u8>,
    pub bq: Option<u8>,
}

impl CastlingRights {
    pub fn get(&self, c: Color, side: CastleSide) -> Option<u8> {
        match (c, side) {
            (Color::White, CastleSide::King) => self.wk,
            (Color::White, CastleSide::Queen) => self.wq,
            (Color::Black, CastleSide::King) => self.bk,
            (Color::Black, CastleSide::Queen) => self.bq,
        }
    }

    pub fn set(&mut self, c: Color, side: CastleSide, rook_file: Option<u8>) {
        let slot = match (c, side) {
            (Color::White, CastleSide::King) => &mut self.wk,
            (Color::White, CastleSide::Queen) => &mut self.wq,
            (Color::Black, CastleSide::King) => &mut self.bk,
            (Color::Black, CastleSide::Queen) => &mut self.bq,
        };
        *slot = rook_file;
    }

    pub fn clear_color(&mut self, c: Color) {
        self.set(c, CastleSide::King, None);
        self.set(c, CastleSide::Queen, None);
    }

    pub fn is_empty(&self) -> bool {
        self.wk.is_none() && self.wq.is_none() && self.bk.is_none() && self.bq.is_none()
    }
}

/// One applied move as the history records it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub mv: Move,
    pub piece: Piece,
    pub captured: Option<Piece>,
}

#[derive(Clone, Debug)]
pub struct Position {
    pub dims: BoardDims,
    /// Square array indexed by `Square`.
    pub board: Vec<Option<Piece>>,
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    /// Moves each side makes before the turn passes, indexed by `Color::idx`.
    pub moves_per_turn: [u8; 2],
    /// Moves the side to move still has this turn.
    pub moves_left: u8,
    pub history: Vec<HistoryEntry>,
}

/// Minimal diff recorded by `make_move`, enough for `unmake_move` to restore the position.
#[derive(Clone, Debug)]
pub struct Undo {
    pub captured: Option<(Square, Piece)>,
    pub moved_piece: Piece,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub side_to_move: Color,
    pub moves_left: u8,
    pub rook_move: Option<(Square, Square)>, // (rook_from, rook_to) for castling
}

impl Position {
    pub fn new_empty(dims: BoardDims) -> Self {
        Position {
            dims,
            board: vec![None; dims.square_count()],
            side_to_move: Color::White,
            castling: CastlingRights::default(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            moves_per_turn: [1, 1],
            moves_left: 1,
            history: Vec::new(),
        }
    }

    pub fn startpos() -> Self {
        fen::decode(fen::STANDARD_FEN).expect("standard start position must decode")
    }

    pub fn from_fen(text: &str) -> Result<Self, FormatError> {
        fen::decode(text)
    }

    pub fn to_fen(&self) -> String {
        fen::encode(self)
    }

    pub fn width(&self) -> u8 {
        self.dims.width
    }

    pub fn height(&self) -> u8 {
        self.dims.height
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq as usize]
    }

    pub fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    /// Occupied squares in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.board
            .iter()
            .enumerate()
            .filter_map(|(i, pc)| pc.map(|pc| (i as Square, pc)))
    }

    pub fn king_sq(&self, c: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, pc)| pc.color == c && pc.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Square of the rook a castling right is bound to, if the right is held.
    pub fn castling_rook(&self, c: Color, side: CastleSide) -> Option<Square> {
        self.castling
            .get(c, side)
            .and_then(|file| self.dims.sq(file as i8, self.dims.home_rank(c)))
    }

    /// Install per-side move budgets and restart the current side's budget.
    pub fn set_moves_per_turn(&mut self, white: u8, black: u8) {
        self.moves_per_turn = [white.max(1), black.max(1)];
        self.moves_left = self.moves_per_turn[self.side_to_move.idx()];
    }

    pub fn king_has_moved(&self, c: Color) -> bool {
        self.history
            .iter()
            .any(|h| h.piece.color == c && h.piece.kind == PieceKind::King)
    }

    pub fn in_check(&self, c: Color) -> bool {
        let ksq = match self.king_sq(c) {
            Some(s) => s,
            None => return false,
        };
        self.is_square_attacked(ksq, c.other())
    }

    fn holds(&self, sq: Option<Square>, by: Color, kinds: &[PieceKind]) -> bool {
        match sq.and_then(|s| self.piece_at(s)) {
            Some(pc) => pc.color == by && kinds.contains(&pc.kind),
            None => false,
        }
    }

    /// First occupied square walking from `from` (exclusive) along `(df, dr)`.
    pub fn first_on_ray(&self, from: Square, df: i8, dr: i8) -> Option<(Square, Piece)> {
        let d = self.dims;
        let mut f = d.file_of(from) + df;
        let mut r = d.rank_of(from) + dr;
        while let Some(s) = d.sq(f, r) {
            if let Some(pc) = self.piece_at(s) {
                return Some((s, pc));
            }
            f += df;
            r += dr;
        }
        None
    }

    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        let d = self.dims;
        let tf = d.file_of(target);
        let tr = d.rank_of(target);

        // A pawn of `by` attacking the target stands one step behind it, diagonally.
        let back = -d.forward(by);
        for df in [-1, 1] {
            if self.holds(d.sq(tf + df, tr + back), by, &[PieceKind::Pawn]) {
                return true;
            }
        }

        for (df, dr) in KNIGHT_DELTAS {
            if self.holds(d.sq(tf + df, tr + dr), by, &[PieceKind::Knight]) {
                return true;
            }
        }

        for (df, dr) in KING_DELTAS {
            if self.holds(d.sq(tf + df, tr + dr), by, &[PieceKind::King]) {
                return true;
            }
        }

        for (df, dr) in DIAGONALS {
            if let Some((_, pc)) = self.first_on_ray(target, df, dr) {
                if pc.color == by && matches!(pc.kind, PieceKind::Bishop | PieceKind::Queen) {
                    return true;
                }
            }
        }
        for (df, dr) in ORTHOGONALS {
            if let Some((_, pc)) = self.first_on_ray(target, df, dr) {
                if pc.color == by && matches!(pc.kind, PieceKind::Rook | PieceKind::Queen) {
                    return true;
                }
            }
        }

        false
    }

    /// Apply `mv` in place. Panics if the origin square is empty: that is a corrupted caller.
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let d = self.dims;
        let from = mv.from;
        let to = mv.to;
        let moved = self.piece_at(from).expect("no piece on from-square");
        let mut captured = self.piece_at(to).map(|pc| (to, pc));
        let undo = Undo {
            captured: None,
            moved_piece: moved,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            side_to_move: self.side_to_move,
            moves_left: self.moves_left,
            rook_move: None,
        };

        self.en_passant = None;

        // Halfmove clock reset on capture or pawn move
        let mut reset_hmc = moved.kind == PieceKind::Pawn || captured.is_some();

        if mv.is_en_passant() {
            if let Some(cs) = d.sq(d.file_of(to), d.rank_of(from)) {
                captured = self.piece_at(cs).map(|pc| (cs, pc));
                self.set_piece(cs, None);
                reset_hmc = true;
            }
        }

        // King travels two files; the rook lands on the square the king crossed.
        let mut rook_move = None;
        if mv.is_castle() {
            let side = if d.file_of(to) > d.file_of(from) {
                CastleSide::King
            } else {
                CastleSide::Queen
            };
            let rook_from = self
                .castling_rook(moved.color, side)
                .expect("castling move without a castling right");
            let rook_to = d
                .sq(d.file_of(from) + side.dir(), d.rank_of(from))
                .expect("castling rook square off the board");
            rook_move = Some((rook_from, rook_to));
        }

        self.set_piece(from, None);
        self.set_piece(to, Some(moved));

        if let Some((rf, rt)) = rook_move {
            let rook = self.piece_at(rf).expect("no rook on castling square");
            self.set_piece(rf, None);
            self.set_piece(rt, Some(rook));
        }

        if moved.kind == PieceKind::Pawn && d.rank_of(to) == d.home_rank(moved.color.other()) {
            let promo = mv.promo.unwrap_or(PieceKind::Queen);
            self.set_piece(to, Some(Piece::new(moved.color, promo)));
        }

        if moved.kind == PieceKind::King {
            self.castling.clear_color(moved.color);
        }
        for c in [Color::White, Color::Black] {
            for side in CastleSide::BOTH {
                if let Some(rsq) = self.castling_rook(c, side) {
                    if rsq == from || rsq == to {
                        self.castling.set(c, side, None);
                    }
                }
            }
        }

        if moved.kind == PieceKind::Pawn && (d.rank_of(to) - d.rank_of(from)).abs() == 2 {
            self.en_passant = d.sq(d.file_of(from), (d.rank_of(from) + d.rank_of(to)) / 2);
        }

        self.halfmove_clock = if reset_hmc {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };

        self.history.push(HistoryEntry {
            mv,
            piece: moved,
            captured: captured.map(|(_, pc)| pc),
        });

        // The turn passes only once the side has spent its whole budget.
        self.moves_left = self.moves_left.saturating_sub(1);
        if self.moves_left == 0 {
            if self.side_to_move == Color::Black {
                self.fullmove_number = self.fullmove_number.saturating_add(1);
            }
            self.side_to_move = self.side_to_move.other();
            self.moves_left = self.moves_per_turn[self.side_to_move.idx()];
        }

        Undo {
            captured,
            rook_move,
            ..undo
        }
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = undo.side_to_move;
        self.moves_left = undo.moves_left;
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;
        self.history.pop();

        if let Some((rf, rt)) = undo.rook_move {
            let rook = self.piece_at(rt).expect("castled rook missing");
            self.set_piece(rt, None);
            self.set_piece(rf, Some(rook));
        }

        // Restoring the moved piece also reverts a promotion.
        self.set_piece(mv.to, None);
        self.set_piece(mv.from, Some(undo.moved_piece));

        if let Some((sq, pc)) = undo.captured {
            self.set_piece(sq, Some(pc));
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.dims;
        for rank in (0..d.height as i8).rev() {
            write!(f, "{:>2} |", rank + 1)?;
            for file in 0..d.width as i8 {
                let ch = d
                    .sq(file, rank)
                    .and_then(|s| self.piece_at(s))
                    .map(Piece::fen_char)
                    .unwrap_or('.');
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        write!(f, "    ")?;
        for file in 0..d.width {
            write!(f, " {}", (b'a' + file) as char)?;
        }
        writeln!(f)?;
        write!(
            f,
            "{} to move ({} of {} this turn)",
            self.side_to_move,
            self.moves_left,
            self.moves_per_turn[self.side_to_move.idx()]
        )
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
