//! Start position derivation: board resizing and the Chess960 back-rank shuffle.
//!
//! Works on decoded positions and hands back position text, so the caller
//! decodes exactly what a player could have typed in.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::board::Position;
use crate::config::Configuration;
use crate::error::LayoutError;
use crate::fen;
use crate::types::*;

/// Final start text for `base` under `cfg`, shuffling with the thread-local rng.
pub fn build_starting_fen(base: &str, cfg: &Configuration) -> Result<String, LayoutError> {
    build_starting_fen_with_rng(base, cfg, &mut rand::thread_rng())
}

/// Resize (when requested dimensions differ from the base), then shuffle
/// the back ranks (when `chess960` is set). Otherwise `base` comes back unchanged.
pub fn build_starting_fen_with_rng<R: Rng + ?Sized>(
    base: &str,
    cfg: &Configuration,
    rng: &mut R,
) -> Result<String, LayoutError> {
    let pos = fen::decode(base)?;
    let width = if cfg.board_width == 0 {
        pos.width()
    } else {
        cfg.board_width
    };
    let height = if cfg.board_height == 0 {
        pos.height()
    } else {
        cfg.board_height
    };
    check_dims(width, height)?;

    let resizing =
        cfg.resize_requested() && (width != pos.width() || height != pos.height());
    if !resizing && !cfg.chess960 {
        debug!("start position unchanged");
        return Ok(base.to_string());
    }

    let mut pos = if resizing {
        resize(&pos, width, height, cfg.fill_expanded_files)?
    } else {
        pos
    };
    if cfg.chess960 {
        shuffle_back_ranks(&mut pos, rng)?;
    }

    let text = fen::encode(&pos);
    info!(start = %text, width, height, chess960 = cfg.chess960, "derived start position");
    Ok(text)
}

fn check_dims(width: u8, height: u8) -> Result<(), LayoutError> {
    if width < MIN_BOARD_SIZE || height < MIN_BOARD_SIZE {
        return Err(LayoutError::TooSmall {
            width,
            height,
            min: MIN_BOARD_SIZE,
        });
    }
    if width > MAX_BOARD_SIZE || height > MAX_BOARD_SIZE {
        return Err(LayoutError::TooLarge {
            width,
            height,
            max: MAX_BOARD_SIZE,
        });
    }
    Ok(())
}

/// Fit `pos` onto a `width` x `height` board.
///
/// With `fill` set, the board is rebuilt from scratch: full back ranks and
/// pawn ranks sized to the new width, and all four castling rights.
/// Without it, pieces keep their files (new files are added empty on the
/// right), White's half stays anchored to rank 1 and Black's half to the
/// top rank, and empty ranks are added or removed in the middle.
/// Either way the en-passant target is cleared and the clocks are kept.
pub fn resize(pos: &Position, width: u8, height: u8, fill: bool) -> Result<Position, LayoutError> {
    check_dims(width, height)?;
    let dims = BoardDims::new(width, height);

    let mut out = if fill {
        let mut out = standard_layout(dims);
        out.castling = fen::full_castling_rights(&out);
        out
    } else {
        let mut out = shift_pieces(pos, dims)?;
        // Re-bind the rights the base held; the rook files may sit on a new top rank.
        let bound = fen::full_castling_rights(&out);
        for c in [Color::White, Color::Black] {
            for side in CastleSide::BOTH {
                if pos.castling.get(c, side).is_some() {
                    out.castling.set(c, side, bound.get(c, side));
                }
            }
        }
        out
    };

    out.side_to_move = pos.side_to_move;
    out.halfmove_clock = pos.halfmove_clock;
    out.fullmove_number = pos.fullmove_number;
    debug!(
        from_width = pos.width(),
        from_height = pos.height(),
        width,
        height,
        fill,
        "resized board"
    );
    Ok(out)
}

fn shift_pieces(pos: &Position, dims: BoardDims) -> Result<Position, LayoutError> {
    let old = pos.dims;
    let mut out = Position::new_empty(dims);
    let lower_half = old.height as i8 / 2;
    let shift = dims.height as i8 - old.height as i8;
    let dropped = LayoutError::WouldDropPieces {
        width: dims.width,
        height: dims.height,
    };

    for (sq, pc) in pos.pieces() {
        let file = old.file_of(sq);
        let rank = old.rank_of(sq);
        let rank = if rank < lower_half { rank } else { rank + shift };
        let target = dims.sq(file, rank).ok_or_else(|| dropped.clone())?;
        if out.piece_at(target).is_some() {
            return Err(dropped);
        }
        out.set_piece(target, Some(pc));
    }
    Ok(out)
}

/// Back rank for a standard-style start on `width` files. Eight files give
/// the usual arrangement. Other widths put rooks on the edges, the king on
/// the centre file (left of centre when even), bishops beside the king, a
/// queen on the nearest remaining file (left first) and knights elsewhere.
pub fn standard_back_rank(width: u8) -> Vec<PieceKind> {
    use PieceKind::*;
    if width == 8 {
        return vec![Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
    }

    let w = width as usize;
    let mut rank = vec![Knight; w];
    rank[0] = Rook;
    rank[w - 1] = Rook;
    let king = if w % 2 == 0 { w / 2 - 1 } else { w / 2 };
    rank[king] = King;
    for b in [king.saturating_sub(1).max(1), (king + 1).min(w - 2)] {
        if rank[b] == Knight {
            rank[b] = Bishop;
        }
    }
    let queen = (1..w).find_map(|offset| {
        let left = king.checked_sub(offset).filter(|&i| rank[i] == Knight);
        let right = Some(king + offset).filter(|&i| i < w && rank[i] == Knight);
        left.or(right)
    });
    if let Some(q) = queen {
        rank[q] = Queen;
    }
    rank
}

/// Black back rank, black pawns, empty middle, white pawns, white back rank.
fn standard_layout(dims: BoardDims) -> Position {
    let mut pos = Position::new_empty(dims);
    let top = dims.height as i8 - 1;
    for (file, kind) in standard_back_rank(dims.width).into_iter().enumerate() {
        let file = file as i8;
        let placements = [
            (0, Piece::new(Color::White, kind)),
            (1, Piece::new(Color::White, PieceKind::Pawn)),
            (top - 1, Piece::new(Color::Black, PieceKind::Pawn)),
            (top, Piece::new(Color::Black, kind)),
        ];
        for (rank, pc) in placements {
            if let Some(sq) = dims.sq(file, rank) {
                pos.set_piece(sq, Some(pc));
            }
        }
    }
    pos
}

/// Random back rank: bishops on opposite-coloured files, the king strictly
/// between two rooks, then one queen if a file is left and knights on the
/// rest. On eight files this is exactly the Chess960 set, uniformly.
pub fn chess960_back_rank<R: Rng + ?Sized>(
    width: u8,
    rng: &mut R,
) -> Result<Vec<PieceKind>, LayoutError> {
    let w = width as usize;
    let unsatisfiable = LayoutError::Chess960Unsatisfiable { width };
    let mut rank: Vec<Option<PieceKind>> = vec![None; w];

    let dark: Vec<usize> = (0..w).step_by(2).collect();
    let light: Vec<usize> = (1..w).step_by(2).collect();
    let (b1, b2) = match (dark.choose(rng), light.choose(rng)) {
        (Some(&a), Some(&b)) => (a, b),
        _ => return Err(unsatisfiable),
    };
    rank[b1] = Some(PieceKind::Bishop);
    rank[b2] = Some(PieceKind::Bishop);

    let mut free: Vec<usize> = (0..w).filter(|&i| rank[i].is_none()).collect();
    if free.len() < 3 {
        return Err(unsatisfiable);
    }
    free.shuffle(rng);

    let mut trio = [free[0], free[1], free[2]];
    trio.sort_unstable();
    rank[trio[0]] = Some(PieceKind::Rook);
    rank[trio[1]] = Some(PieceKind::King);
    rank[trio[2]] = Some(PieceKind::Rook);

    // `free` is shuffled, so the queen lands on a uniformly chosen leftover file.
    if let Some((&q, knights)) = free[3..].split_first() {
        rank[q] = Some(PieceKind::Queen);
        for &n in knights {
            rank[n] = Some(PieceKind::Knight);
        }
    }

    Ok(rank
        .into_iter()
        .map(|k| k.unwrap_or(PieceKind::Knight))
        .collect())
}

/// Replace White's first rank and Black's last rank with one mirrored random arrangement.
fn shuffle_back_ranks<R: Rng + ?Sized>(pos: &mut Position, rng: &mut R) -> Result<(), LayoutError> {
    let d = pos.dims;
    let rank = chess960_back_rank(d.width, rng)?;
    for (file, kind) in rank.into_iter().enumerate() {
        for c in [Color::White, Color::Black] {
            if let Some(sq) = d.sq(file as i8, d.home_rank(c)) {
                pos.set_piece(sq, Some(Piece::new(c, kind)));
            }
        }
    }
    pos.castling = fen::full_castling_rights(pos);
    pos.en_passant = None;
    Ok(())
}

#[cfg(test)]
#[path = "start_position_tests.rs"]
mod start_position_tests;
