use crate::board::{Position, DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS};
use crate::types::*;

/// Generate all check-safe moves, returning a freshly allocated vector.
/// Variant rules are not consulted; see `RuleSet::legal_moves` for that.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all check-safe moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);
    // Filter illegal moves in-place by playing them on the mutable position.
    out.retain(|&mv| is_legal(pos, mv));
}

/// Whether `mv` keeps the mover's king safe. Castling additionally requires
/// that the king is not in check and does not cross an attacked square.
/// The position is left exactly as it was.
pub fn is_legal(pos: &mut Position, mv: Move) -> bool {
    let mover = match pos.piece_at(mv.from) {
        Some(pc) => pc.color,
        None => return false,
    };

    if mv.is_castle() {
        let d = pos.dims;
        let dir = (d.file_of(mv.to) - d.file_of(mv.from)).signum();
        if pos.in_check(mover) {
            return false;
        }
        match d.sq(d.file_of(mv.from) + dir, d.rank_of(mv.from)) {
            Some(crossed) if !pos.is_square_attacked(crossed, mover.other()) => {}
            _ => return false,
        }
    }

    let undo = pos.make_move(mv);
    let illegal = pos.in_check(mover);
    pos.unmake_move(mv, undo);
    !illegal
}

/// Geometry-only moves for the side to move. Bureaucrats contribute nothing
/// here: their moves belong to `BureaucratRule`.
pub fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    for (sq, pc) in pos.pieces() {
        if pc.color != pos.side_to_move {
            continue;
        }
        pseudo_moves_for(pos, sq, pc, out);
    }
}

fn pseudo_moves_for(pos: &Position, sq: Square, pc: Piece, out: &mut Vec<Move>) {
    match pc.kind {
        PieceKind::Pawn => gen_pawn(pos, sq, pc.color, out),
        PieceKind::Knight => gen_leaper(pos, sq, pc.color, out, &KNIGHT_DELTAS),
        PieceKind::Bishop => gen_slider(pos, sq, pc.color, out, &DIAGONALS),
        PieceKind::Rook => gen_slider(pos, sq, pc.color, out, &ORTHOGONALS),
        PieceKind::Queen => {
            gen_slider(pos, sq, pc.color, out, &DIAGONALS);
            gen_slider(pos, sq, pc.color, out, &ORTHOGONALS);
        }
        PieceKind::King => {
            gen_leaper(pos, sq, pc.color, out, &KING_DELTAS);
            gen_castle(pos, sq, pc.color, out);
        }
        PieceKind::Bureaucrat => {}
    }
}

fn push_pawn_move(pos: &Position, from: Square, to: Square, c: Color, out: &mut Vec<Move>) {
    let d = pos.dims;
    if d.rank_of(to) == d.home_rank(c.other()) {
        for pk in PieceKind::PROMOTIONS {
            out.push(Move::new(from, to).with_promo(pk));
        }
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>) {
    let d = pos.dims;
    let f = d.file_of(from);
    let r = d.rank_of(from);
    let dir = d.forward(c);
    let start_rank = d.home_rank(c) + dir;

    // forward 1
    if let Some(to) = d.sq(f, r + dir) {
        if pos.piece_at(to).is_none() {
            push_pawn_move(pos, from, to, c, out);

            // forward 2 from start
            if r == start_rank {
                if let Some(to2) = d.sq(f, r + 2 * dir) {
                    if pos.piece_at(to2).is_none() {
                        out.push(Move::new(from, to2));
                    }
                }
            }
        }
    }

    // captures + en-passant
    for df in [-1, 1] {
        let to = match d.sq(f + df, r + dir) {
            Some(s) => s,
            None => continue,
        };
        match pos.piece_at(to) {
            Some(tpc) if tpc.color != c => push_pawn_move(pos, from, to, c, out),
            Some(_) => {}
            None if pos.en_passant == Some(to) => {
                // The victim must actually stand beside the pawn.
                let victim = d.sq(f + df, r).and_then(|s| pos.piece_at(s));
                if victim == Some(Piece::new(c.other(), PieceKind::Pawn)) {
                    out.push(Move::new(from, to).with_tag(MoveTag::EnPassant));
                }
            }
            None => {}
        }
    }
}

fn gen_leaper(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>, deltas: &[(i8, i8)]) {
    let d = pos.dims;
    let f = d.file_of(from);
    let r = d.rank_of(from);
    for (df, dr) in deltas {
        if let Some(to) = d.sq(f + df, r + dr) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => out.push(Move::new(from, to)),
                _ => {}
            }
        }
    }
}

fn gen_slider(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>, dirs: &[(i8, i8)]) {
    let d = pos.dims;
    let f0 = d.file_of(from);
    let r0 = d.rank_of(from);
    for (df, dr) in dirs {
        let mut f = f0 + df;
        let mut r = r0 + dr;
        while let Some(to) = d.sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => {
                    out.push(Move::new(from, to));
                    break;
                }
                _ => break,
            }
            f += df;
            r += dr;
        }
    }
}

/// Castling geometry only: right held, bound rook in place, empty squares.
/// Attack conditions are checked by `is_legal`.
fn gen_castle(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>) {
    let d = pos.dims;
    let kf = d.file_of(from);
    let home = d.home_rank(c);
    if d.rank_of(from) != home {
        return;
    }

    for side in CastleSide::BOTH {
        let rook_sq = match pos.castling_rook(c, side) {
            Some(s) => s,
            None => continue,
        };
        if pos.piece_at(rook_sq) != Some(Piece::new(c, PieceKind::Rook)) {
            continue;
        }
        let rf = d.file_of(rook_sq);
        let dir = side.dir();
        if (rf - kf).signum() != dir {
            continue;
        }

        // Everything strictly between king and rook must be empty.
        let between_clear = ((kf.min(rf) + 1)..kf.max(rf))
            .all(|f| d.sq(f, home).and_then(|s| pos.piece_at(s)).is_none());
        if !between_clear {
            continue;
        }

        // King's path (the square it crosses and the one it lands on) must be empty.
        let crossed = d.sq(kf + dir, home);
        let dest = d.sq(kf + 2 * dir, home);
        let (crossed, dest) = match (crossed, dest) {
            (Some(a), Some(b)) => (a, b),
            _ => continue,
        };
        if pos.piece_at(crossed).is_some() || pos.piece_at(dest).is_some() {
            continue;
        }

        out.push(Move::new(from, dest).with_tag(MoveTag::Castle));
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
