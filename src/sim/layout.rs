//! Starting configuration for a round
//!
//! A layout is immutable once built; `GameState::reset` copies it into the
//! live grid and ball set. Layout files are JSON:
//!
//! ```json
//! {
//!   "rows": ["X.......OOOOOOOO", "|.......OOOOOOOO", "|.......OOOOOOOO", "X.......OOOOOOOO"],
//!   "balls": [[1, 4], [3, 5]],
//!   "block_count": 32
//! }
//! ```
//!
//! `balls` are `[row, col]` pairs. `block_count` defaults to the number of
//! `O` cells.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use super::grid::{CellKind, CellPos, Cells};
use crate::consts::*;

/// Immutable round setup: cell contents, ball spawn cells and block target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub cells: Cells,
    pub balls: [CellPos; BALL_COUNT],
    /// Blocks that must be hit to win
    pub block_count: u32,
}

impl Default for Layout {
    fn default() -> Self {
        use CellKind::{Block as B, Empty as E, Paddle as P, Trap as T};

        Self {
            cells: [
                [T, E, E, E, E, E, E, E, B, B, B, B, B, B, B, B],
                [P, E, E, E, E, E, E, E, B, B, B, B, B, B, B, B],
                [P, E, E, E, E, E, E, E, B, B, B, B, B, B, B, B],
                [T, E, E, E, E, E, E, E, B, B, B, B, B, B, B, B],
            ],
            balls: [CellPos::new(1, 4), CellPos::new(3, 5)],
            block_count: 4 * 8,
        }
    }
}

/// On-disk form of a layout
#[derive(Debug, Clone, Deserialize)]
struct LayoutFile {
    rows: Vec<String>,
    balls: Vec<(usize, usize)>,
    #[serde(default)]
    block_count: Option<u32>,
}

impl Layout {
    /// Parse and validate a JSON layout
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        let file: LayoutFile = serde_json::from_str(json).map_err(LayoutError::Parse)?;
        Self::try_from(file)
    }

    /// Read a layout file from disk
    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let json = std::fs::read_to_string(path).map_err(LayoutError::Io)?;
        let layout = Self::from_json(&json)?;
        log::info!(
            "Loaded layout from {} ({} blocks)",
            path.display(),
            layout.block_count
        );
        Ok(layout)
    }

    /// Check the invariants the simulation relies on.
    ///
    /// Balls must spawn on an empty cell inside the grid and right of the
    /// paddle column, since the first move clears the spawn cell. Paddles may
    /// only sit in column 0, otherwise the paddle nudge could push a ball off
    /// the right edge. The block target must be reachable and above zero.
    pub fn validate(&self) -> Result<(), LayoutError> {
        for (index, pos) in self.balls.iter().enumerate() {
            if pos.row >= ROWS || pos.col >= COLS {
                return Err(LayoutError::SpawnOutOfBounds { index, pos: *pos });
            }
            let cell = self.cells[pos.row][pos.col];
            if pos.col == 0 || cell != CellKind::Empty {
                return Err(LayoutError::SpawnBlocked {
                    index,
                    pos: *pos,
                    cell,
                });
            }
        }

        for (row, cells) in self.cells.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate().skip(1) {
                if cell == CellKind::Paddle {
                    return Err(LayoutError::PaddleOffEdge {
                        pos: CellPos::new(row, col),
                    });
                }
            }
        }

        let placed = self.placed_blocks();
        if placed > 0 && !(1..=placed).contains(&self.block_count) {
            return Err(LayoutError::BlockCount {
                declared: self.block_count,
                placed,
            });
        }

        Ok(())
    }

    /// Number of block cells on the map
    pub fn placed_blocks(&self) -> u32 {
        self.cells
            .iter()
            .flatten()
            .filter(|&&c| c == CellKind::Block)
            .count() as u32
    }

    /// Render the layout rows back into file notation
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| match c {
                        CellKind::Empty => '.',
                        other => other.glyph(),
                    })
                    .collect()
            })
            .collect()
    }
}

impl TryFrom<LayoutFile> for Layout {
    type Error = LayoutError;

    fn try_from(file: LayoutFile) -> Result<Self, Self::Error> {
        if file.rows.len() != ROWS {
            return Err(LayoutError::RowCount {
                found: file.rows.len(),
            });
        }

        let mut cells: Cells = [[CellKind::Empty; COLS]; ROWS];
        for (row, line) in file.rows.iter().enumerate() {
            let width = line.chars().count();
            if width != COLS {
                return Err(LayoutError::RowWidth { row, found: width });
            }
            for (col, ch) in line.chars().enumerate() {
                cells[row][col] = CellKind::from_glyph(ch).ok_or(LayoutError::UnknownCell {
                    pos: CellPos::new(row, col),
                    glyph: ch,
                })?;
            }
        }

        if file.balls.len() != BALL_COUNT {
            return Err(LayoutError::BallCount {
                found: file.balls.len(),
            });
        }
        let mut balls = [CellPos::new(0, 0); BALL_COUNT];
        for (slot, &(row, col)) in balls.iter_mut().zip(&file.balls) {
            *slot = CellPos::new(row, col);
        }

        let mut layout = Layout {
            cells,
            balls,
            block_count: 0,
        };
        layout.block_count = file.block_count.unwrap_or_else(|| layout.placed_blocks());
        layout.validate()?;
        Ok(layout)
    }
}

/// Reasons a layout file is rejected
#[derive(Debug)]
pub enum LayoutError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    RowCount { found: usize },
    RowWidth { row: usize, found: usize },
    UnknownCell { pos: CellPos, glyph: char },
    BallCount { found: usize },
    SpawnOutOfBounds { index: usize, pos: CellPos },
    SpawnBlocked { index: usize, pos: CellPos, cell: CellKind },
    PaddleOffEdge { pos: CellPos },
    BlockCount { declared: u32, placed: u32 },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::Io(e) => write!(f, "cannot read layout: {e}"),
            LayoutError::Parse(e) => write!(f, "invalid layout JSON: {e}"),
            LayoutError::RowCount { found } => {
                write!(f, "expected {ROWS} rows, found {found}")
            }
            LayoutError::RowWidth { row, found } => {
                write!(f, "row {row}: expected {COLS} cells, found {found}")
            }
            LayoutError::UnknownCell { pos, glyph } => {
                write!(f, "unknown cell {glyph:?} at row {}, col {}", pos.row, pos.col)
            }
            LayoutError::BallCount { found } => {
                write!(f, "expected {BALL_COUNT} balls, found {found}")
            }
            LayoutError::SpawnOutOfBounds { index, pos } => write!(
                f,
                "ball {index} spawns outside the grid at row {}, col {}",
                pos.row, pos.col
            ),
            LayoutError::SpawnBlocked { index, pos, cell } => write!(
                f,
                "ball {index} spawns on {cell:?} at row {}, col {} (needs an empty cell right of column 0)",
                pos.row, pos.col
            ),
            LayoutError::BlockCount { declared, placed } => write!(
                f,
                "block_count {declared} must be between 1 and the {placed} blocks placed"
            ),
            LayoutError::PaddleOffEdge { pos } => write!(
                f,
                "paddle cell at row {}, col {} (paddles belong in column 0)",
                pos.row, pos.col
            ),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LayoutError::Io(e) => Some(e),
            LayoutError::Parse(e) => Some(e),
            _ => None,
        }
    }
}
