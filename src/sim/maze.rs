//! Maze grid
//!
//! A rectangular grid of wall/open cells built once from a row-major layout.
//! Cell `(col, row)` covers the unit square `[col, col+1] × [row, row+1]`.

use core::fmt;

/// The 15×15 layout the game ships with
pub const REFERENCE_LAYOUT: [&str; 15] = [
    "111111111111111",
    "100000100000001",
    "101110101111101",
    "101000101000101",
    "101011101011101",
    "101000001000001",
    "101111111011101",
    "100000001000001",
    "111011101111101",
    "100010001000001",
    "101110111011101",
    "101000000010001",
    "101011111110101",
    "100000000000001",
    "111111111111111",
];

/// Why a layout was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// No rows, or a zero-length first row
    Empty,
    /// A row's length differs from the first row's
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character other than '0' or '1'
    InvalidCell { row: usize, col: usize, found: char },
    /// An outer-ring cell is open
    OpenBorder { row: usize, col: usize },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "maze layout is empty"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(f, "maze row {row} has {found} cells, expected {expected}"),
            Self::InvalidCell { row, col, found } => {
                write!(f, "invalid maze cell {found:?} at row {row}, col {col}")
            }
            Self::OpenBorder { row, col } => {
                write!(f, "outer ring must be wall, found open cell at row {row}, col {col}")
            }
        }
    }
}

impl std::error::Error for MazeError {}

/// Immutable wall grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    /// Row-major cells, `true` = wall
    cells: Vec<bool>,
    rows: usize,
    cols: usize,
}

impl Maze {
    /// Build a maze from rows of '1' (wall) / '0' (open).
    ///
    /// Rows must all have the same length and the outer ring must be wall.
    pub fn from_layout<S: AsRef<str>>(layout: &[S]) -> Result<Self, MazeError> {
        let cols = layout
            .first()
            .map(|r| r.as_ref().chars().count())
            .unwrap_or(0);
        if cols == 0 {
            return Err(MazeError::Empty);
        }
        let rows = layout.len();

        let mut cells = Vec::with_capacity(rows * cols);
        for (row, line) in layout.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != cols {
                return Err(MazeError::Ragged {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, c) in line.chars().enumerate() {
                let wall = match c {
                    '1' => true,
                    '0' => false,
                    _ => return Err(MazeError::InvalidCell { row, col, found: c }),
                };
                let on_ring = row == 0 || col == 0 || row == rows - 1 || col == cols - 1;
                if on_ring && !wall {
                    return Err(MazeError::OpenBorder { row, col });
                }
                cells.push(wall);
            }
        }

        Ok(Self { cells, rows, cols })
    }

    /// The shipped 15×15 maze
    pub fn reference() -> Self {
        // The constant layout always parses
        Self::from_layout(&REFERENCE_LAYOUT).unwrap_or_else(|e| unreachable!("{e}"))
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether cell `(col, row)` is a wall. Anything off the grid is wall.
    #[inline]
    pub fn is_wall(&self, col: i32, row: i32) -> bool {
        if col < 0 || row < 0 {
            return true;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.cols || row >= self.rows {
            return true;
        }
        self.cells[row * self.cols + col]
    }

    /// Iterate rows top to bottom, each as a slice of wall flags
    pub fn rows_iter(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.cols)
    }

    /// Coordinates `(col, row)` of every wall cell in row-major order
    pub fn walls(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, wall)| **wall)
            .map(|(i, _)| ((i % self.cols) as i32, (i / self.cols) as i32))
    }
}
