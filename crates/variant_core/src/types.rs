use serde::{Deserialize, Serialize};

/// Smallest board edge any position or layout may use.
pub const MIN_BOARD_SIZE: u8 = 5;
/// Files are lettered `a..=z`, so boards top out at 26 files (and ranks, to keep the grid square-bounded).
pub const MAX_BOARD_SIZE: u8 = 26;

/// Index into a position's square array: `rank * width + file`.
pub type Square = u16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    /// Custom piece; its movement and capture behaviour come from `BureaucratRule`.
    Bureaucrat,
}

impl PieceKind {
    /// Promotion choices, preferred first.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Lowercase exchange-format letter.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
            PieceKind::Bureaucrat => 'c',
        }
    }

    pub fn from_letter(ch: char) -> Option<PieceKind> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            'c' => Some(PieceKind::Bureaucrat),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Exchange-format letter: uppercase for White, lowercase for Black.
    pub fn fen_char(self) -> char {
        match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter(),
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Piece> {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        PieceKind::from_letter(ch).map(|kind| Piece { color, kind })
    }
}

/// Side effect carried by a move beyond "piece goes from A to B".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveTag {
    Castle,
    EnPassant,
    /// A rule reacts to this move by transforming a piece (see `BureaucratRule`).
    Transform,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promo: Option<PieceKind>,
    pub tag: Option<MoveTag>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promo: None,
            tag: None,
        }
    }

    pub fn with_promo(self, promo: PieceKind) -> Self {
        Self {
            promo: Some(promo),
            ..self
        }
    }

    pub fn with_tag(self, tag: MoveTag) -> Self {
        Self {
            tag: Some(tag),
            ..self
        }
    }

    pub fn is_castle(&self) -> bool {
        self.tag == Some(MoveTag::Castle)
    }

    pub fn is_en_passant(&self) -> bool {
        self.tag == Some(MoveTag::EnPassant)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastleSide {
    /// Toward the last file.
    King,
    /// Toward file `a`.
    Queen,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::King, CastleSide::Queen];

    pub fn dir(self) -> i8 {
        match self {
            CastleSide::King => 1,
            CastleSide::Queen => -1,
        }
    }
}

/// Board geometry. Files run `a..` left to right, ranks `1..` from White's side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoardDims {
    pub width: u8,
    pub height: u8,
}

impl BoardDims {
    pub const STANDARD: BoardDims = BoardDims {
        width: 8,
        height: 8,
    };

    pub fn new(width: u8, height: u8) -> Self {
        Self { width, height }
    }

    pub fn square_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn squares(&self) -> impl Iterator<Item = Square> {
        0..self.square_count() as Square
    }

    pub fn sq(&self, file: i8, rank: i8) -> Option<Square> {
        if (0..self.width as i8).contains(&file) && (0..self.height as i8).contains(&rank) {
            Some(rank as Square * self.width as Square + file as Square)
        } else {
            None
        }
    }

    pub fn file_of(&self, sq: Square) -> i8 {
        (sq % self.width as Square) as i8
    }

    pub fn rank_of(&self, sq: Square) -> i8 {
        (sq / self.width as Square) as i8
    }

    /// Rank holding a side's pieces at the start (0 for White, last for Black).
    pub fn home_rank(&self, c: Color) -> i8 {
        match c {
            Color::White => 0,
            Color::Black => self.height as i8 - 1,
        }
    }

    pub fn forward(&self, c: Color) -> i8 {
        match c {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Exchange notation, e.g. `e4` or `j10`.
    pub fn square_name(&self, sq: Square) -> String {
        let f = (b'a' + self.file_of(sq) as u8) as char;
        format!("{f}{}", self.rank_of(sq) as u16 + 1)
    }

    pub fn parse_square(&self, name: &str) -> Option<Square> {
        let name = name.trim();
        let mut chars = name.chars();
        let f = chars.next()?.to_ascii_lowercase();
        if !f.is_ascii_lowercase() {
            return None;
        }
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let rank: u16 = digits.parse().ok()?;
        if rank == 0 || rank > self.height as u16 {
            return None;
        }
        self.sq((f as u8 - b'a') as i8, (rank - 1) as i8)
    }

    /// Grid coordinates as a presentation layer sees them: `x` = file, `y` = row from the top.
    pub fn from_grid(&self, x: usize, y: usize) -> Option<Square> {
        if x >= self.width as usize || y >= self.height as usize {
            return None;
        }
        self.sq(x as i8, (self.height as usize - 1 - y) as i8)
    }

    pub fn to_grid(&self, sq: Square) -> (usize, usize) {
        let x = self.file_of(sq) as usize;
        let y = self.height as usize - 1 - self.rank_of(sq) as usize;
        (x, y)
    }

    /// Whether a square is a dark square (a1 is dark).
    pub fn is_dark(&self, sq: Square) -> bool {
        (self.file_of(sq) + self.rank_of(sq)) % 2 == 0
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
