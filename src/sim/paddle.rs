//! Paddle movement
//!
//! The paddle is a run of `Paddle` cells in column 0. Moving it shifts the
//! whole column one row; the row it leaves behind at the edge becomes a trap.

use super::grid::{CellKind, CellPos, Grid};
use crate::consts::*;

/// Shift column 0 one row toward the top. Returns false if already there.
pub fn move_up(grid: &mut Grid) -> bool {
    if grid.cell(0, 0) == CellKind::Paddle {
        return false;
    }

    for row in 1..ROWS {
        let below = grid.cell(row, 0);
        grid.set(CellPos::new(row - 1, 0), below);
    }
    grid.set(CellPos::new(LAST_ROW, 0), CellKind::Trap);
    true
}

/// Shift column 0 one row toward the bottom. Returns false if already there.
pub fn move_down(grid: &mut Grid) -> bool {
    if grid.cell(LAST_ROW, 0) == CellKind::Paddle {
        return false;
    }

    for row in (1..ROWS).rev() {
        let above = grid.cell(row - 1, 0);
        grid.set(CellPos::new(row, 0), above);
    }
    grid.set(CellPos::new(0, 0), CellKind::Trap);
    true
}
