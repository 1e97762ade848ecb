//! Output devices
//!
//! The game draws two kinds of screens: the playfield grid while a round is
//! running, and two-line text for the splash and result screens.

pub mod lcd;
pub mod terminal;

pub use lcd::{CharacterLcd, LcdBus};
pub use terminal::TerminalDisplay;

use crate::sim::Grid;

/// Splash screen text
pub const SPLASH: (&str, &str) = ("    BREAKOUT", " Press to start");
/// Second line of the result screen
pub const RESTART_PROMPT: &str = "Click to restart";

/// A screen the game can draw on
pub trait Display {
    type Error;

    /// Draw the playfield; called once per playing tick
    fn draw_grid(&mut self, grid: &Grid) -> Result<(), Self::Error>;

    /// Replace the screen with two lines of text
    fn draw_message(&mut self, line1: &str, line2: &str) -> Result<(), Self::Error>;
}

impl<D: Display + ?Sized> Display for &mut D {
    type Error = D::Error;

    fn draw_grid(&mut self, grid: &Grid) -> Result<(), Self::Error> {
        (**self).draw_grid(grid)
    }

    fn draw_message(&mut self, line1: &str, line2: &str) -> Result<(), Self::Error> {
        (**self).draw_message(line1, line2)
    }
}
