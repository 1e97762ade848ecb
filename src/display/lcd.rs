//! HD44780-style 2x16 character LCD
//!
//! Each LCD character cell is 5x8 pixels and shows two grid cells stacked
//! vertically, so grid rows 0+1 make up line 1 and rows 2+3 line 2. Half-cell
//! shapes come from eight custom glyphs uploaded to CGRAM at init; the rest
//! use the built-in ROM characters.
//!
//! Port setup and the 4-bit nibble/enable timing belong to the board. This
//! module only decides which command and data bytes to send.

use std::convert::Infallible;

use super::Display;
use crate::consts::*;
use crate::sim::{CellKind, Grid};

/// Character columns per line
pub const LCD_COLS: usize = COLS;
/// Text lines on the panel
pub const LCD_LINES: usize = 2;

const _: () = assert!(ROWS == LCD_LINES * 2, "each LCD line shows two grid rows");

/// Controller command bytes
pub mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const HOME: u8 = 0x02;
    /// Cursor increments, display does not shift
    pub const ENTRY_INCREMENT: u8 = 0x06;
    pub const DISPLAY_OFF: u8 = 0x08;
    /// Display on, cursor off, no blink
    pub const DISPLAY_ON: u8 = 0x0C;
    /// 4-bit interface, 2 lines, 5x8 font
    pub const FUNCTION_4BIT_2LINE: u8 = 0x28;
    pub const CGRAM_ADDR: u8 = 0x40;
    pub const DDRAM_LINE1: u8 = 0x80;
    pub const DDRAM_LINE2: u8 = 0xC0;
}

/// Custom glyph slots in CGRAM, named top half / bottom half
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Glyph {
    SolidTop = 0,
    SolidBottom,
    BallTop,
    BallBottom,
    SolidBall,
    BallSolid,
    SolidTrap,
    TrapSolid,
}

impl Glyph {
    pub const COUNT: usize = 8;

    /// Character code that displays this glyph
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

const SOLID: u8 = 0b11111;
const BALL_A: u8 = 0b01110;
const TRAP_A: u8 = 0b10001;
const TRAP_B: u8 = 0b01010;

/// CGRAM bitmaps, 8 rows of 5 pixels, indexed by [`Glyph`]
pub const GLYPHS: [[u8; 8]; Glyph::COUNT] = [
    [SOLID, SOLID, SOLID, SOLID, 0, 0, 0, 0],
    [0, 0, 0, 0, SOLID, SOLID, SOLID, SOLID],
    [BALL_A, SOLID, SOLID, BALL_A, 0, 0, 0, 0],
    [0, 0, 0, 0, BALL_A, SOLID, SOLID, BALL_A],
    [SOLID, SOLID, SOLID, SOLID, BALL_A, SOLID, SOLID, BALL_A],
    [BALL_A, SOLID, SOLID, BALL_A, SOLID, SOLID, SOLID, SOLID],
    [SOLID, SOLID, SOLID, SOLID, TRAP_A, TRAP_B, TRAP_B, TRAP_A],
    [TRAP_A, TRAP_B, TRAP_B, TRAP_A, SOLID, SOLID, SOLID, SOLID],
];

/// ROM characters used alongside the custom glyphs
const EMPTY: u8 = b' ';
const SOLID_FULL: u8 = b'#';
const BALL_BALL: u8 = b'8';

/// Character for a (top, bottom) pair of cells, indexed by [`CellKind::index`].
///
/// Traps are drawn like a solid half-cell under empty, paddle and ball cells
/// and blank elsewhere; the trap glyphs stay in CGRAM unused.
/// Pairs that cannot occur in play (a block in the paddle column, for
/// example) map to blank.
pub const PAIR_CHARS: [[u8; CellKind::COUNT]; CellKind::COUNT] = {
    use Glyph::*;
    [
        // top: Empty; bottom: Empty, Paddle, Block, Ball, Trap
        [EMPTY, SolidBottom.code(), SolidBottom.code(), BallBottom.code(), SolidBottom.code()],
        // top: Paddle
        [SolidTop.code(), SOLID_FULL, EMPTY, EMPTY, SolidTop.code()],
        // top: Block
        [SolidTop.code(), EMPTY, SOLID_FULL, SolidBall.code(), EMPTY],
        // top: Ball
        [BallTop.code(), SOLID_FULL, BallSolid.code(), BALL_BALL, BallSolid.code()],
        // top: Trap
        [EMPTY, SolidBottom.code(), EMPTY, EMPTY, EMPTY],
    ]
};

/// Character showing `top` stacked over `bottom`
#[inline]
pub fn pair_char(top: CellKind, bottom: CellKind) -> u8 {
    PAIR_CHARS[top.index()][bottom.index()]
}

/// Character codes for both LCD lines
pub fn compose(grid: &Grid) -> [[u8; LCD_COLS]; LCD_LINES] {
    std::array::from_fn(|line| {
        let top = line * 2;
        std::array::from_fn(|col| pair_char(grid.cell(top, col), grid.cell(top + 1, col)))
    })
}

/// Fit text to one LCD line: ASCII only, cut or space-padded to the width
pub fn text_line(text: &str) -> [u8; LCD_COLS] {
    let mut line = [EMPTY; LCD_COLS];
    for (slot, ch) in line.iter_mut().zip(text.chars()) {
        *slot = if ch.is_ascii() && !ch.is_ascii_control() {
            ch as u8
        } else {
            b'?'
        };
    }
    line
}

/// Byte-level link to the LCD controller
pub trait LcdBus {
    /// Send with RS low (instruction register)
    fn command(&mut self, byte: u8);
    /// Send with RS high (data register)
    fn data(&mut self, byte: u8);
}

/// 2x16 character LCD driven through an [`LcdBus`]
#[derive(Debug)]
pub struct CharacterLcd<B> {
    bus: B,
}

impl<B: LcdBus> CharacterLcd<B> {
    /// Configure the controller and upload the custom glyphs
    pub fn new(bus: B) -> Self {
        let mut lcd = Self { bus };
        lcd.init();
        lcd
    }

    fn init(&mut self) {
        for byte in [
            cmd::FUNCTION_4BIT_2LINE,
            cmd::DISPLAY_OFF,
            cmd::CLEAR,
            cmd::ENTRY_INCREMENT,
            cmd::DISPLAY_ON,
            cmd::CLEAR,
        ] {
            self.bus.command(byte);
        }

        for (slot, bitmap) in GLYPHS.iter().enumerate() {
            self.bus.command(cmd::CGRAM_ADDR + (slot as u8) * 8);
            for &row in bitmap {
                self.bus.data(row);
            }
        }
        log::debug!("LCD initialized, {} glyphs uploaded", GLYPHS.len());
    }

    /// Write both lines of character codes
    pub fn write_lines(&mut self, lines: &[[u8; LCD_COLS]; LCD_LINES]) {
        for (addr, line) in [cmd::DDRAM_LINE1, cmd::DDRAM_LINE2].into_iter().zip(lines) {
            self.bus.command(addr);
            for &code in line {
                self.bus.data(code);
            }
        }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }
}

impl<B: LcdBus> Display for CharacterLcd<B> {
    type Error = Infallible;

    fn draw_grid(&mut self, grid: &Grid) -> Result<(), Infallible> {
        self.write_lines(&compose(grid));
        Ok(())
    }

    fn draw_message(&mut self, line1: &str, line2: &str) -> Result<(), Infallible> {
        self.write_lines(&[text_line(line1), text_line(line2)]);
        Ok(())
    }
}
