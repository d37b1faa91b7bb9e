use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::config::GameConfig;
use crate::pieces::{Glyph, Piece, PieceKind, Side};

/// Number of squares on the board.
pub const NUM_SQUARES: usize = 64;

/// Represents a single square on the chess board (0-63).
///
/// Internally stores index 0-63 where:
/// - 0 = a1, 7 = h1
/// - 56 = a8, 63 = h8
///
/// Rule logic works on raw `i32` indices (see [`Board::get`]); `Square` is
/// the validated form used for parsing and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square(u8);

impl Square {
    /// Creates a new Square if the index is valid (0-63).
    pub const fn new(idx: u8) -> Option<Self> {
        if idx < NUM_SQUARES as u8 {
            Some(Square(idx))
        } else {
            None
        }
    }

    /// Returns the internal index value (0-63).
    pub const fn value(self) -> u8 {
        self.0
    }

    /// The index as the signed form rule logic works with.
    pub const fn index(self) -> i32 {
        self.0 as i32
    }

    /// Returns the file ('a'-'h') of this square.
    pub const fn file(self) -> char {
        (b'a' + (self.0 % 8)) as char
    }

    /// Returns the rank (1-8) of this square.
    pub const fn rank(self) -> u8 {
        (self.0 / 8) + 1
    }
}

/// Error type for parsing square notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SquareParseError {
    /// Square notation must be exactly 2 characters
    #[error("square must be 2 characters (e.g., 'e4')")]
    WrongLength,
    /// File must be a letter from a-h
    #[error("file must be a-h")]
    BadFile,
    /// Rank must be a digit from 1-8
    #[error("rank must be 1-8")]
    BadRank,
}

/// Parse algebraic notation like "e4" into a Square.
///
/// # Examples
/// ```
/// # use glyph_chess::board::Square;
/// let square: Square = "e4".parse().unwrap();
/// assert_eq!(square.value(), 28);
/// ```
impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(SquareParseError::WrongLength);
        };

        let file = file.to_ascii_lowercase();
        let rank = rank.to_digit(10).ok_or(SquareParseError::BadRank)?;

        if !('a'..='h').contains(&file) {
            return Err(SquareParseError::BadFile);
        }
        if !(1..=8).contains(&rank) {
            return Err(SquareParseError::BadRank);
        }

        let idx = ((rank as u8 - 1) * 8) + (file as u8 - b'a');
        Ok(Square(idx))
    }
}

/// Display square in algebraic notation (e.g., "e4").
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// The 64-slot board: a pure array abstraction.
///
/// Index = rank * 8 + file, 0-based. No legality is enforced at this layer.
/// `get` accepts any `i32` and answers `None` off the board, which the
/// sliding-piece scan relies on when a ray runs past an edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; NUM_SQUARES],
}

impl Board {
    /// An empty board.
    pub const fn empty() -> Self {
        Self {
            squares: [None; NUM_SQUARES],
        }
    }

    /// The standard starting layout, with each side's glyphs in the fill
    /// variant the config selects.
    pub fn starting(config: &GameConfig) -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Self::empty();
        for (file, kind) in BACK_RANK.into_iter().enumerate() {
            board.squares[file] = Some(side_piece(config, Side::Light, kind));
            board.squares[56 + file] = Some(side_piece(config, Side::Dark, kind));
        }
        for file in 0..8 {
            board.squares[8 + file] = Some(side_piece(config, Side::Light, PieceKind::Pawn));
            board.squares[48 + file] = Some(side_piece(config, Side::Dark, PieceKind::Pawn));
        }
        board
    }

    /// The piece at `index`, or `None` when the slot is empty or the index
    /// is off the board (negative included).
    #[inline]
    pub fn get(&self, index: i32) -> Option<Piece> {
        if (0..NUM_SQUARES as i32).contains(&index) {
            self.squares[index as usize]
        } else {
            None
        }
    }

    /// Put `piece` (or clear with `None`) at `index`.
    ///
    /// `index` must be a real square, 0-63.
    #[inline]
    pub fn place(&mut self, index: i32, piece: Option<Piece>) {
        self.squares[index as usize] = piece;
    }
}

/// Build a piece of `kind` for `side` in the side's configured fill variant.
fn side_piece(config: &GameConfig, side: Side, kind: PieceKind) -> Piece {
    Piece::new(Glyph::new(kind, config.fill_of(side)), side)
}
