//! Balls and the angle arithmetic used to bounce them
//!
//! Headings are whole degrees, 0° pointing toward increasing column and 90°
//! toward increasing row. Reflections are integer adjustments of the heading
//! rather than vector reflection.

use glam::DVec2;

use super::grid::CellPos;
use crate::consts::*;
use crate::{heading_step, normalize_degrees};

/// A ball entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    /// Continuous position, x = column, y = row
    pub pos: DVec2,
    /// Heading in degrees, [0, 360)
    pub angle: i32,
}

impl Ball {
    /// A ball resting at the centre of a cell, heading 0°
    pub fn at(cell: CellPos) -> Self {
        Self {
            pos: DVec2::new(cell.col as f64, cell.row as f64),
            angle: 0,
        }
    }

    /// Grid cell the ball currently occupies
    #[inline]
    pub fn cell(&self) -> CellPos {
        snap_pos(self.pos)
    }

    /// Move one unit along the heading, then clamp to the grid and bounce
    /// off whichever walls were touched.
    pub fn advance(&mut self) {
        self.pos += heading_step(self.angle);

        let last_col = LAST_COL as f64;
        let last_row = LAST_ROW as f64;

        if self.pos.x <= 0.0 {
            self.pos.x = 0.0;
            self.reflect_x();
        } else if self.pos.x >= last_col {
            self.pos.x = last_col;
            self.reflect_x();
        }

        if self.pos.y <= 0.0 {
            self.pos.y = 0.0;
            self.reflect_y();
        } else if self.pos.y >= last_row {
            self.pos.y = last_row;
            self.reflect_y();
        }
    }

    #[inline]
    pub fn reflect_x(&mut self) {
        self.angle = reflect_x(self.angle);
    }

    #[inline]
    pub fn reflect_y(&mut self) {
        self.angle = reflect_y(self.angle);
    }

    #[inline]
    pub fn reflect_corner(&mut self) {
        self.angle = reflect_corner(self.angle);
    }
}

/// Reverse the horizontal component of a heading (bounce off a side wall or the paddle)
pub fn reflect_x(angle: i32) -> i32 {
    let reflected = if angle > 180 {
        270 + (270 - angle)
    } else {
        180 - angle
    };
    normalize_degrees(reflected)
}

/// Reverse the vertical component of a heading (bounce off the top or bottom)
pub fn reflect_y(angle: i32) -> i32 {
    normalize_degrees(360 - angle)
}

/// Send the ball straight back where it came from
pub fn reflect_corner(angle: i32) -> i32 {
    normalize_degrees(angle + 180)
}

/// Snap one coordinate to a cell index, rounding half up.
///
/// Coordinates are never negative here, so truncation is floor.
pub fn snap(c: f64) -> usize {
    let whole = c as usize;
    if c - whole as f64 >= RASTER_ROUND_LIMIT {
        whole + 1
    } else {
        whole
    }
}

/// Snap a continuous position to the grid cell it falls in
pub fn snap_pos(pos: DVec2) -> CellPos {
    CellPos::new(snap(pos.y), snap(pos.x))
}
