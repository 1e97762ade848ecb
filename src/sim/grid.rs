//! The cell grid the balls move across
//!
//! Row 0 is the top of the screen, column 0 holds the paddle.

use super::layout::Layout;
use crate::consts::*;

/// Occupant of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum CellKind {
    #[default]
    Empty,
    Paddle,
    Block,
    Ball,
    /// Touching this ends the round
    Trap,
}

impl CellKind {
    /// Number of cell kinds (size of the LCD lookup tables)
    pub const COUNT: usize = 5;

    /// Stable index for table lookups
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Character used by the terminal display and layout files
    pub fn glyph(self) -> char {
        match self {
            CellKind::Empty => ' ',
            CellKind::Paddle => '|',
            CellKind::Block => 'O',
            CellKind::Ball => '*',
            CellKind::Trap => 'X',
        }
    }

    /// Parse a layout character. `.` is accepted as empty so rows stay readable.
    pub fn from_glyph(c: char) -> Option<Self> {
        match c {
            ' ' | '.' => Some(CellKind::Empty),
            '|' => Some(CellKind::Paddle),
            'O' | 'o' => Some(CellKind::Block),
            '*' => Some(CellKind::Ball),
            'X' | 'x' => Some(CellKind::Trap),
            _ => None,
        }
    }
}

/// Address of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Raw cell storage, `[row][col]`
pub type Cells = [[CellKind; COLS]; ROWS];

/// Live playfield plus the count of blocks still standing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Cells,
    /// Blocks left to clear; reaching zero wins the round
    pub blocks_left: u32,
}

impl Grid {
    pub fn new(cells: Cells, blocks_left: u32) -> Self {
        Self { cells, blocks_left }
    }

    /// Copy the layout into the live grid and restore its block count
    pub fn reset(&mut self, layout: &Layout) {
        self.cells = layout.cells;
        self.blocks_left = layout.block_count;
    }

    /// Cell kind at (row, col). Panics when out of bounds.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> CellKind {
        self.cells[row][col]
    }

    #[inline]
    pub fn at(&self, pos: CellPos) -> CellKind {
        self.cells[pos.row][pos.col]
    }

    #[inline]
    pub fn set(&mut self, pos: CellPos, kind: CellKind) {
        self.cells[pos.row][pos.col] = kind;
    }

    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    /// Number of cells of the given kind
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().flatten().filter(|&&c| c == kind).count()
    }

    /// First and last paddle rows in column 0, if a paddle is present
    pub fn paddle_span(&self) -> Option<(usize, usize)> {
        let mut rows = (0..ROWS).filter(|&r| self.cells[r][0] == CellKind::Paddle);
        let first = rows.next()?;
        let last = rows.last().unwrap_or(first);
        Some((first, last))
    }
}

impl Default for Grid {
    fn default() -> Self {
        let layout = Layout::default();
        Self::new(layout.cells, layout.block_count)
    }
}
