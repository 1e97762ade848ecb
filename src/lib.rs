//! Raster Breakout - a Breakout game on a coarse character grid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, balls, collisions, game phases)
//! - `input`: Control sources: board button latch, keyboard, scripted
//! - `display`: Terminal and character-LCD output
//! - `console`: Drives the simulation from a control source into a display
//! - `settings`: Host-side configuration

pub mod console;
pub mod display;
pub mod input;
pub mod settings;
pub mod sim;

pub use console::Console;
pub use settings::Settings;

use glam::DVec2;

/// Game configuration constants
pub mod consts {
    /// Grid height in cells (two character-LCD lines of two cells each)
    pub const ROWS: usize = 4;
    /// Grid width in cells (one per LCD column)
    pub const COLS: usize = 16;
    pub const LAST_ROW: usize = ROWS - 1;
    pub const LAST_COL: usize = COLS - 1;

    /// Number of balls in play each round
    pub const BALL_COUNT: usize = 2;

    /// Fractional part at which a coordinate snaps to the next cell.
    /// Also the displacement below which a block hit counts as "no movement" on an axis.
    pub const RASTER_ROUND_LIMIT: f64 = 0.5;

    /// Host simulation tick (4 Hz)
    pub const DEFAULT_TICK_MS: u64 = 250;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(deg: i32) -> i32 {
    deg.rem_euclid(360)
}

/// Unit step along a heading given in degrees
#[inline]
pub fn heading_step(deg: i32) -> DVec2 {
    let rad = f64::from(deg).to_radians();
    DVec2::new(rad.cos(), rad.sin())
}
