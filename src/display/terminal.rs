//! Text-mode display for the host simulation
//!
//! Lines end in `\r\n` so frames stay aligned while the host has the
//! terminal in raw mode.

use std::io::{self, Write};

use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, queue};

use super::Display;
use crate::consts::*;
use crate::sim::Grid;

const BORDER: char = '#';

/// Draws the grid inside a `#` border on any writer
pub struct TerminalDisplay<W: Write> {
    out: W,
    /// Home the cursor and clear the screen before each frame
    clear: bool,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out, clear: true }
    }

    /// Append frames instead of redrawing in place (logs, tests)
    pub fn without_clear(mut self) -> Self {
        self.clear = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn begin_frame(&mut self) -> io::Result<()> {
        if self.clear {
            queue!(self.out, cursor::MoveTo(0, 0), terminal::Clear(ClearType::All))?;
        }
        Ok(())
    }

    fn border(&mut self) -> io::Result<()> {
        let line: String = std::iter::repeat_n(BORDER, COLS + 2).collect();
        write!(self.out, "{line}\r\n")
    }
}

impl<W: Write> Display for TerminalDisplay<W> {
    type Error = io::Error;

    fn draw_grid(&mut self, grid: &Grid) -> io::Result<()> {
        self.begin_frame()?;
        self.border()?;
        for row in grid.cells() {
            let line: String = row.iter().map(|c| c.glyph()).collect();
            write!(self.out, "{BORDER}{line}{BORDER}\r\n")?;
        }
        self.border()?;
        self.out.flush()
    }

    fn draw_message(&mut self, line1: &str, line2: &str) -> io::Result<()> {
        self.begin_frame()?;
        write!(self.out, "{line1}\r\n{line2}\r\n")?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(grid: &Grid) -> String {
        let mut display = TerminalDisplay::new(Vec::new()).without_clear();
        display.draw_grid(grid).unwrap();
        String::from_utf8(display.into_inner()).unwrap()
    }

    #[test]
    fn test_default_grid_frame() {
        let text = render(&Grid::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), ROWS + 2);
        assert_eq!(lines[0], "##################");
        assert_eq!(lines[1], "#X       OOOOOOOO#");
        assert_eq!(lines[2], "#|       OOOOOOOO#");
        assert_eq!(lines[4], "#X       OOOOOOOO#");
        assert_eq!(lines[5], lines[0]);
    }

    #[test]
    fn test_ball_glyph() {
        use crate::sim::{CellKind, CellPos};

        let mut grid = Grid::default();
        grid.set(CellPos::new(1, 4), CellKind::Ball);
        let text = render(&grid);
        assert_eq!(text.lines().nth(2), Some("#|   *   OOOOOOOO#"));
    }

    #[test]
    fn test_frames_start_with_home_and_clear() {
        let mut expected = Vec::new();
        queue!(expected, cursor::MoveTo(0, 0), terminal::Clear(ClearType::All)).unwrap();
        expected.extend_from_slice(b"YOU WIN\r\nagain?\r\n");

        let mut display = TerminalDisplay::new(Vec::new());
        display.draw_message("YOU WIN", "again?").unwrap();
        let bytes = display.into_inner();
        assert_eq!(bytes, expected);
        assert!(bytes.starts_with(b"\x1b[1;1H\x1b[2J"));
    }

    #[test]
    fn test_grid_clears_once_per_frame() {
        let mut display = TerminalDisplay::new(Vec::new());
        display.draw_grid(&Grid::default()).unwrap();
        display.draw_grid(&Grid::default()).unwrap();
        let text = String::from_utf8(display.into_inner()).unwrap();
        assert_eq!(text.matches("\x1b[2J").count(), 2);
        assert_eq!(text.matches("\r\n").count(), 2 * (ROWS + 2));
    }
}
