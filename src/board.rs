use std::fmt;
use std::str::FromStr;

use shakmaty::{Color, File, Piece, Rank, Role};
use thiserror::Error;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: i8 = 8;

/// Backline piece order by column, shared by both colors.
const BACK_RANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

/// Error when parsing an algebraic square name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid square notation: '{0}'")]
pub struct ParseSquareError(pub String);

/// A board coordinate addressed by `(row, col)`.
///
/// Row 0 is Black's back rank and row 7 is White's, so `(6, 4)` is `e2`.
/// A `Square` may hold coordinates outside the board; callers receiving
/// external input check [`Square::is_on_board`] instead of trusting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    #[inline]
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// True when both coordinates are in `0..8`.
    #[inline]
    pub const fn is_on_board(self) -> bool {
        self.row >= 0 && self.row < BOARD_SIZE && self.col >= 0 && self.col < BOARD_SIZE
    }

    /// Offset by a row/column delta. The result may be off the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Self {
        Self::new(self.row.saturating_add(d_row), self.col.saturating_add(d_col))
    }

    /// Flat index into the 64-square grid, or `None` when off the board.
    #[inline]
    fn index(self) -> Option<usize> {
        if self.is_on_board() {
            Some(self.row as usize * BOARD_SIZE as usize + self.col as usize)
        } else {
            None
        }
    }

    /// Convert to the algebraic square used by `shakmaty`.
    pub fn to_algebraic(self) -> Option<shakmaty::Square> {
        if !self.is_on_board() {
            return None;
        }
        let file = File::new(self.col as u32);
        let rank = Rank::new((BOARD_SIZE - 1 - self.row) as u32);
        Some(shakmaty::Square::from_coords(file, rank))
    }
}

impl From<shakmaty::Square> for Square {
    fn from(square: shakmaty::Square) -> Self {
        let col = square.file().char() as u8 - b'a';
        let rank = square.rank().char() as u8 - b'1';
        Self::new(BOARD_SIZE - 1 - rank as i8, col as i8)
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<shakmaty::Square>()
            .map(Square::from)
            .map_err(|_| ParseSquareError(s.to_string()))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_algebraic() {
            Some(square) => write!(f, "{square}"),
            None => write!(f, "({}, {})", self.row, self.col),
        }
    }
}

/// FEN-style letter for a piece: uppercase for White, lowercase for Black.
pub fn piece_char(piece: Piece) -> char {
    let c = match piece.role {
        Role::Pawn => 'p',
        Role::Knight => 'n',
        Role::Bishop => 'b',
        Role::Rook => 'r',
        Role::Queen => 'q',
        Role::King => 'k',
    };
    match piece.color {
        Color::White => c.to_ascii_uppercase(),
        Color::Black => c,
    }
}

/// 8×8 grid of optional pieces.
///
/// The board performs no legality checking: [`Board::move_piece`] relocates
/// unconditionally. Rule enforcement lives in [`crate::rules`] and
/// [`crate::game_logic::GameController`].
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a board in the standard starting position.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.reset();
        board
    }

    /// Create a board with no pieces.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            squares: [None; 64],
        }
    }

    /// Get the piece at a given square, if any. Off-board squares are empty.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        square.index().and_then(|i| self.squares[i])
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.piece_at(square).is_some()
    }

    /// Put a piece on a square, returning whatever was there.
    pub fn place(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        let i = square.index()?;
        self.squares[i].replace(piece)
    }

    /// Take the piece off a square.
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        let i = square.index()?;
        self.squares[i].take()
    }

    /// Relocate the piece on `from` to `to`, overwriting `to`.
    ///
    /// Returns the overwritten piece. Does nothing if `from` is empty or
    /// either square is off the board.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<Piece> {
        if from == to || !to.is_on_board() {
            return None;
        }
        let piece = self.remove(from)?;
        self.place(to, piece)
    }

    /// Empty every square.
    pub fn clear(&mut self) {
        self.squares = [None; 64];
    }

    /// Restore the standard initial position.
    pub fn reset(&mut self) {
        self.clear();
        for (col, role) in BACK_RANK.into_iter().enumerate() {
            let col = col as i8;
            self.place(Square::new(0, col), Piece { role, color: Color::Black });
            self.place(Square::new(1, col), Piece { role: Role::Pawn, color: Color::Black });
            self.place(Square::new(6, col), Piece { role: Role::Pawn, color: Color::White });
            self.place(Square::new(7, col), Piece { role, color: Color::White });
        }
    }

    /// Iterate over occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares.iter().enumerate().filter_map(|(i, piece)| {
            piece.map(|p| {
                let i = i as i8;
                (Square::new(i / BOARD_SIZE, i % BOARD_SIZE), p)
            })
        })
    }

    /// Number of pieces on the board.
    pub fn count(&self) -> usize {
        self.squares.iter().filter(|p| p.is_some()).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let c = self.piece_at(Square::new(row, col)).map_or('.', piece_char);
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        write!(f, "{self}")?;
        write!(f, "}}")
    }
}
