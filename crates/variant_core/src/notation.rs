use crate::types::*;

/// Move-history form shown to players: `e2-e4`, `e7-e8=Q`.
pub fn history_notation(dims: &BoardDims, mv: Move) -> String {
    let mut s = format!("{}-{}", dims.square_name(mv.from), dims.square_name(mv.to));
    if let Some(p) = mv.promo {
        s.push('=');
        s.push(p.letter().to_ascii_uppercase());
    }
    s
}

/// Coordinate form: `e2e4`, `e7e8q`, `j9j10`.
pub fn move_to_uci(dims: &BoardDims, mv: Move) -> String {
    let mut s = String::new();
    s.push_str(&dims.square_name(mv.from));
    s.push_str(&dims.square_name(mv.to));
    if let Some(p) = mv.promo {
        s.push(p.letter());
    }
    s
}

/// Split `e2e4`, `e2-e4`, `j9j10` or `e7e8q` into two squares and an optional promotion.
fn split_coords(dims: &BoardDims, txt: &str) -> Option<(Square, Square, Option<PieceKind>)> {
    let cleaned: String = txt
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    let bytes = cleaned.as_bytes();

    // Each square is one letter followed by its rank digits.
    let square_end = |start: usize| {
        let digits = bytes[start + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        start + 1 + digits
    };
    if bytes.is_empty() {
        return None;
    }
    let mid = square_end(0);
    if mid >= bytes.len() {
        return None;
    }
    let end = square_end(mid);

    let from = dims.parse_square(&cleaned[..mid])?;
    let to = dims.parse_square(&cleaned[mid..end])?;
    let promo = match &cleaned[end..] {
        "" => None,
        rest if rest.len() == 1 => {
            let kind = PieceKind::from_letter(rest.chars().next()?)?;
            if !PieceKind::PROMOTIONS.contains(&kind) {
                return None;
            }
            Some(kind)
        }
        _ => return None,
    };
    Some((from, to, promo))
}

/// Resolve coordinate text against a legal move list, so castling, en-passant
/// and rule tags come from the generator. Without a promotion letter a queen is chosen.
pub fn parse_uci_move(legal: &[Move], dims: &BoardDims, txt: &str) -> Option<Move> {
    if !txt.is_ascii() {
        return None;
    }
    let (from, to, promo) = split_coords(dims, txt)?;
    legal
        .iter()
        .find(|m| {
            m.from == from
                && m.to == to
                && match promo {
                    Some(p) => m.promo == Some(p),
                    None => m.promo.is_none() || m.promo == Some(PieceKind::Queen),
                }
        })
        .copied()
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
