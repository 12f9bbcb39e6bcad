//! Board representation for the Lights Out puzzle.
//!
//! A board is an immutable value: applying a move never mutates the
//! receiver, it produces a new board. The cells are bit-packed row-major
//! into 64-bit words, so the packed words double as the canonical key the
//! solver deduplicates on.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

/// Packed cell storage. Boards up to 11x11 fit inline without a heap
/// allocation.
type Words = SmallVec<[u64; 2]>;

/// A toggle target: pressing it flips the cell at `(row, col)` and its
/// in-bounds orthogonal neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Errors constructing a board from external cell data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// A row's length does not match the number of rows.
    NotSquare {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::NotSquare {
                row,
                expected,
                actual,
            } => write!(
                f,
                "board is not square: row {} has {} cells, expected {}",
                row, actual, expected
            ),
        }
    }
}

impl std::error::Error for BoardError {}

/// An N x N Lights Out board.
///
/// Serializes as a grid of rows of booleans (`[[true,false],[false,true]]`),
/// which is the JSON format the CLI exchanges.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<bool>>", into = "Vec<Vec<bool>>")]
pub struct Board {
    size: usize,
    bits: Words,
}

/// Canonical, content-derived key for a board state.
///
/// Two boards with identical cell contents always produce equal keys; the
/// solver's visited set stores these instead of full boards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardKey {
    size: usize,
    bits: Words,
}

fn word_count(size: usize) -> usize {
    (size * size + 63) / 64
}

impl Board {
    /// An all-off board of the given side length.
    pub fn unlit(size: usize) -> Self {
        Self {
            size,
            bits: smallvec![0; word_count(size)],
        }
    }

    /// A board with every cell lit or unlit at random (50/50).
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let mut board = Self::unlit(size);
        for cell in 0..size * size {
            if rng.gen::<bool>() {
                board.bits[cell / 64] |= 1 << (cell % 64);
            }
        }
        board
    }

    /// Build a board from rows of booleans. The input must be square:
    /// every row as long as the number of rows.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, BoardError> {
        let size = rows.len();
        let mut board = Self::unlit(size);
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != size {
                return Err(BoardError::NotSquare {
                    row,
                    expected: size,
                    actual: cells.len(),
                });
            }
            for (col, &lit) in cells.iter().enumerate() {
                if lit {
                    let cell = row * size + col;
                    board.bits[cell / 64] |= 1 << (cell % 64);
                }
            }
        }
        Ok(board)
    }

    /// Side length N.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the cell at `(row, col)` is lit.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn is_lit(&self, row: usize, col: usize) -> bool {
        assert!(
            row < self.size && col < self.size,
            "cell ({}, {}) out of bounds for {}x{} board",
            row,
            col,
            self.size,
            self.size
        );
        let cell = row * self.size + col;
        self.bits[cell / 64] >> (cell % 64) & 1 == 1
    }

    /// Apply a move, returning the resulting board. The pressed cell and
    /// its up/down/left/right neighbors are flipped; neighbor positions
    /// off the edge are skipped.
    ///
    /// # Panics
    ///
    /// Panics if the move is out of bounds. An out-of-range move is a bug
    /// in the caller's move generation, not a condition to recover from.
    pub fn apply(&self, mv: Move) -> Board {
        assert!(
            mv.row < self.size && mv.col < self.size,
            "move {} out of bounds for {}x{} board",
            mv,
            self.size,
            self.size
        );
        let mut next = self.clone();
        next.flip(mv.row, mv.col);
        if mv.row > 0 {
            next.flip(mv.row - 1, mv.col);
        }
        if mv.row + 1 < self.size {
            next.flip(mv.row + 1, mv.col);
        }
        if mv.col > 0 {
            next.flip(mv.row, mv.col - 1);
        }
        if mv.col + 1 < self.size {
            next.flip(mv.row, mv.col + 1);
        }
        next
    }

    fn flip(&mut self, row: usize, col: usize) {
        let cell = row * self.size + col;
        self.bits[cell / 64] ^= 1 << (cell % 64);
    }

    /// Whether every cell is off. The 0x0 board is trivially solved.
    pub fn is_solved(&self) -> bool {
        self.bits.iter().all(|&word| word == 0)
    }

    /// Number of lit cells.
    pub fn lit_count(&self) -> usize {
        self.bits.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// The canonical key for this state.
    pub fn key(&self) -> BoardKey {
        BoardKey {
            size: self.size,
            bits: self.bits.clone(),
        }
    }
}

impl TryFrom<Vec<Vec<bool>>> for Board {
    type Error = BoardError;

    fn try_from(rows: Vec<Vec<bool>>) -> Result<Self, Self::Error> {
        Board::from_rows(rows)
    }
}

impl From<Board> for Vec<Vec<bool>> {
    fn from(board: Board) -> Self {
        (0..board.size)
            .map(|row| (0..board.size).map(|col| board.is_lit(row, col)).collect())
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..self.size {
            write!(f, "{:^3}", col)?;
        }
        writeln!(f)?;
        for row in 0..self.size {
            write!(f, "{:>2} ", row)?;
            for col in 0..self.size {
                write!(f, " {} ", if self.is_lit(row, col) { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&[bool]]) -> Board {
        Board::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn test_double_toggle_is_identity() {
        let start = board(&[
            &[true, false, true],
            &[false, true, false],
            &[true, true, false],
        ]);
        for row in 0..3 {
            for col in 0..3 {
                let mv = Move::new(row, col);
                assert_eq!(start.apply(mv).apply(mv), start);
            }
        }
    }

    #[test]
    fn test_toggles_commute() {
        let start = board(&[&[true, true, false], &[false, false, true], &[true, false, true]]);
        let a = Move::new(0, 1);
        let b = Move::new(1, 1);
        assert_eq!(start.apply(a).apply(b), start.apply(b).apply(a));
    }

    #[test]
    fn test_corner_toggle_flips_three_cells() {
        let pressed = Board::unlit(3).apply(Move::new(0, 0));
        assert_eq!(pressed.lit_count(), 3);
        assert!(pressed.is_lit(0, 0));
        assert!(pressed.is_lit(0, 1));
        assert!(pressed.is_lit(1, 0));
    }

    #[test]
    fn test_edge_and_center_toggle_footprints() {
        let edge = Board::unlit(3).apply(Move::new(0, 1));
        assert_eq!(edge.lit_count(), 4);
        let center = Board::unlit(3).apply(Move::new(1, 1));
        assert_eq!(center.lit_count(), 5);
    }

    #[test]
    fn test_unlit_is_solved() {
        assert!(Board::unlit(0).is_solved());
        assert!(Board::unlit(4).is_solved());
        assert!(!Board::unlit(2).apply(Move::new(0, 0)).is_solved());
    }

    #[test]
    fn test_keys_track_cell_contents() {
        let a = board(&[&[true, false], &[false, true]]);
        let b = Board::unlit(2).apply(Move::new(0, 0)).apply(Move::new(1, 1));
        // Pressing (0,0) then (1,1) flips both off-diagonal cells twice,
        // leaving exactly the diagonal lit.
        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), Board::unlit(2).key());
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let err = Board::from_rows(vec![vec![true, false], vec![false]]).unwrap_err();
        assert_eq!(
            err,
            BoardError::NotSquare {
                row: 1,
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_out_of_bounds_move_panics() {
        Board::unlit(2).apply(Move::new(2, 0));
    }

    #[test]
    fn test_json_round_trip() {
        let original = board(&[&[true, false], &[false, true]]);
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, "[[true,false],[false,true]]");
        let parsed: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_non_square_json_rejected() {
        let result: Result<Board, _> = serde_json::from_str("[[true,false],[false]]");
        assert!(result.is_err());
    }

    #[test]
    fn test_random_board_round_trips_through_rows() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let b = Board::random(7, &mut StdRng::seed_from_u64(7));
        assert_eq!(b.size(), 7);
        let rebuilt = Board::from_rows(Vec::<Vec<bool>>::from(b.clone())).unwrap();
        assert_eq!(rebuilt, b);
        assert_eq!(rebuilt.key(), b.key());
        // Same seed, same board; generation is deterministic per stream.
        assert_eq!(b, Board::random(7, &mut StdRng::seed_from_u64(7)));
    }
}
