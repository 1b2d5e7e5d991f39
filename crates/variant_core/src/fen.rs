//! Position-exchange text: FEN generalized to any board between 5x5 and 26x26
//! and to the extra piece letters variant rules introduce.

use crate::board::{CastlingRights, Position};
use crate::error::FormatError;
use crate::types::*;

pub const STANDARD_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse position text. The two move counters may be omitted, in which case
/// they default to `0 1`. Board width is taken from the first row.
pub fn decode(text: &str) -> Result<Position, FormatError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != 4 && fields.len() != 6 {
        return Err(FormatError::FieldCount {
            found: fields.len(),
        });
    }

    let rows = parse_placement(fields[0])?;
    let height = rows.len();
    if !(MIN_BOARD_SIZE as usize..=MAX_BOARD_SIZE as usize).contains(&height) {
        return Err(FormatError::RowCount {
            found: height,
            min: MIN_BOARD_SIZE,
            max: MAX_BOARD_SIZE,
        });
    }
    let width = rows[0].len();
    if !(MIN_BOARD_SIZE as usize..=MAX_BOARD_SIZE as usize).contains(&width) {
        return Err(FormatError::Dimensions {
            width,
            min: MIN_BOARD_SIZE,
            max: MAX_BOARD_SIZE,
        });
    }
    if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(FormatError::RowWidth {
            row: row + 1,
            expected: width,
            found: cells.len(),
        });
    }

    let dims = BoardDims::new(width as u8, height as u8);
    let mut pos = Position::new_empty(dims);
    // Rows run from the top (highest rank) down.
    for (y, row) in rows.iter().enumerate() {
        for (x, pc) in row.iter().enumerate() {
            if let Some(sq) = dims.from_grid(x, y) {
                pos.set_piece(sq, *pc);
            }
        }
    }

    pos.side_to_move = match fields[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(FormatError::SideToMove(other.to_string())),
    };

    pos.castling = parse_castling(&pos, fields[2])?;

    pos.en_passant = match fields[3] {
        "-" => None,
        name => Some(
            dims.parse_square(name)
                .ok_or_else(|| FormatError::EnPassant(name.to_string()))?,
        ),
    };

    if fields.len() == 6 {
        pos.halfmove_clock = parse_counter("halfmove clock", fields[4])?;
        pos.fullmove_number = parse_counter("fullmove number", fields[5])?;
    }

    Ok(pos)
}

fn parse_placement(text: &str) -> Result<Vec<Vec<Option<Piece>>>, FormatError> {
    let mut rows = Vec::new();
    for (i, row_text) in text.split('/').enumerate() {
        let mut row = Vec::new();
        let mut run: usize = 0;
        let mut in_run = false;
        for ch in row_text.chars() {
            if let Some(digit) = ch.to_digit(10) {
                // Saturates; oversized runs fail the width checks below.
                run = run.saturating_mul(10).saturating_add(digit as usize);
                in_run = true;
                continue;
            }
            if in_run {
                push_run(&mut row, run, i)?;
                run = 0;
                in_run = false;
            }
            let pc = Piece::from_fen_char(ch).ok_or(FormatError::UnknownPiece(ch))?;
            row.push(Some(pc));
        }
        if in_run {
            push_run(&mut row, run, i)?;
        }
        rows.push(row);
    }
    Ok(rows)
}

fn push_run(row: &mut Vec<Option<Piece>>, run: usize, row_idx: usize) -> Result<(), FormatError> {
    if run == 0 {
        return Err(FormatError::EmptyRun { row: row_idx + 1 });
    }
    // Anything past the maximum width is rejected by the row-width check anyway.
    let run = run.min(MAX_BOARD_SIZE as usize + 1);
    row.extend(std::iter::repeat(None).take(run));
    Ok(())
}

fn parse_castling(pos: &Position, text: &str) -> Result<CastlingRights, FormatError> {
    let mut rights = CastlingRights::default();
    if text == "-" {
        return Ok(rights);
    }
    for ch in text.chars() {
        let (color, side) = match ch {
            'K' => (Color::White, CastleSide::King),
            'Q' => (Color::White, CastleSide::Queen),
            'k' => (Color::Black, CastleSide::King),
            'q' => (Color::Black, CastleSide::Queen),
            _ => return Err(FormatError::Castling(ch)),
        };
        rights.set(color, side, Some(castling_rook_file(pos, color, side)));
    }
    Ok(rights)
}

/// All four rights, each bound to its rook as `decode` would bind `KQkq`.
pub fn full_castling_rights(pos: &Position) -> CastlingRights {
    let mut rights = CastlingRights::default();
    for c in [Color::White, Color::Black] {
        for side in CastleSide::BOTH {
            rights.set(c, side, Some(castling_rook_file(pos, c, side)));
        }
    }
    rights
}

/// Outermost own rook on `side` of the king on the home rank. Falls back to
/// the edge file so a right on a half-set-up board still encodes back out.
fn castling_rook_file(pos: &Position, c: Color, side: CastleSide) -> u8 {
    let d = pos.dims;
    let home = d.home_rank(c);
    let edge = match side {
        CastleSide::King => d.width as i8 - 1,
        CastleSide::Queen => 0,
    };
    let king_file = (0..d.width as i8).find(|&f| {
        d.sq(f, home).and_then(|s| pos.piece_at(s)) == Some(Piece::new(c, PieceKind::King))
    });
    let king_file = match king_file {
        Some(f) => f,
        None => return edge as u8,
    };

    let rook = Piece::new(c, PieceKind::Rook);
    let mut f = edge;
    while f != king_file {
        if d.sq(f, home).and_then(|s| pos.piece_at(s)) == Some(rook) {
            return f as u8;
        }
        f -= side.dir();
    }
    edge as u8
}

fn parse_counter(field: &'static str, text: &str) -> Result<u32, FormatError> {
    text.parse().map_err(|_| FormatError::Counter {
        field,
        value: text.to_string(),
    })
}

pub fn encode(pos: &Position) -> String {
    let d = pos.dims;
    let mut out = String::new();

    for y in 0..d.height as usize {
        if y > 0 {
            out.push('/');
        }
        let mut empty = 0;
        for x in 0..d.width as usize {
            let pc = d.from_grid(x, y).and_then(|s| pos.piece_at(s));
            match pc {
                Some(pc) => {
                    if empty > 0 {
                        out.push_str(&empty.to_string());
                        empty = 0;
                    }
                    out.push(pc.fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push_str(&empty.to_string());
        }
    }

    out.push(' ');
    out.push(match pos.side_to_move {
        Color::White => 'w',
        Color::Black => 'b',
    });

    out.push(' ');
    let c = pos.castling;
    if c.is_empty() {
        out.push('-');
    } else {
        for (right, ch) in [(c.wk, 'K'), (c.wq, 'Q'), (c.bk, 'k'), (c.bq, 'q')] {
            if right.is_some() {
                out.push(ch);
            }
        }
    }

    out.push(' ');
    match pos.en_passant {
        Some(sq) => out.push_str(&d.square_name(sq)),
        None => out.push('-'),
    }

    out.push_str(&format!(" {} {}", pos.halfmove_clock, pos.fullmove_number));
    out
}

/// Canonical form of position text: merged empty runs, `KQkq` ordering,
/// explicit move counters.
pub fn normalize(text: &str) -> Result<String, FormatError> {
    decode(text).map(|pos| encode(&pos))
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
