//! Player controls
//!
//! The simulation only ever sees a [`Control`] per frame. Where it comes from
//! is up to the [`ControlSource`]: the five-button board goes through
//! [`LatchedButtons`], the terminal host reads [`KeyboardControls`] and tests
//! use [`ScriptedControls`].

use std::collections::VecDeque;

use embedded_hal::digital::InputPin;

mod keyboard;

pub use keyboard::{KeyAction, KeyboardControls, key_action};

/// One debounced control reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Control {
    #[default]
    None,
    Up,
    Down,
    /// Start a round / acknowledge the result screen
    Select,
}

/// Anything that can be polled once per frame for a control
pub trait ControlSource {
    fn read_control(&mut self) -> Control;

    /// Whether the player asked to leave; the run loop stops when this is set
    fn quit_requested(&self) -> bool {
        false
    }
}

impl<F: FnMut() -> Control> ControlSource for F {
    fn read_control(&mut self) -> Control {
        self()
    }
}

/// Plays back a fixed sequence, then repeats a fallback forever
#[derive(Debug, Clone, Default)]
pub struct ScriptedControls {
    queue: VecDeque<Control>,
    fallback: Control,
}

impl ScriptedControls {
    pub fn new(script: impl IntoIterator<Item = Control>) -> Self {
        Self {
            queue: script.into_iter().collect(),
            fallback: Control::None,
        }
    }

    /// Control returned once the script runs out
    pub fn then_repeat(mut self, control: Control) -> Self {
        self.fallback = control;
        self
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl ControlSource for ScriptedControls {
    fn read_control(&mut self) -> Control {
        self.queue.pop_front().unwrap_or(self.fallback)
    }
}

/// Button bit masks on the input port. Buttons pull the line low when pressed.
pub mod pins {
    pub const UP: u8 = 0b0000_0001;
    pub const LEFT: u8 = 0b0000_0010;
    pub const CENTER: u8 = 0b0000_0100;
    pub const RIGHT: u8 = 0b0000_1000;
    pub const DOWN: u8 = 0b0001_0000;
    /// All five lines high: nothing pressed
    pub const RELEASED: u8 = UP | LEFT | CENTER | RIGHT | DOWN;
}

/// Physical buttons on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Up,
    Left,
    Center,
    Right,
    Down,
}

impl Button {
    /// Priority order when several lines are low at once
    const SCAN: [(u8, Button); 5] = [
        (pins::UP, Button::Up),
        (pins::LEFT, Button::Left),
        (pins::CENTER, Button::Center),
        (pins::RIGHT, Button::Right),
        (pins::DOWN, Button::Down),
    ];
}

impl From<Button> for Control {
    fn from(button: Button) -> Self {
        match button {
            Button::Up => Control::Up,
            Button::Down => Control::Down,
            Button::Center => Control::Select,
            Button::Left | Button::Right => Control::None,
        }
    }
}

/// Raw access to the button port
pub trait ButtonPins {
    /// Current port snapshot; a cleared bit means pressed
    fn read_pins(&mut self) -> u8;
}

/// The five button lines as individual `embedded-hal` inputs, in
/// up, left, center, right, down order.
///
/// A line that fails to read counts as released.
pub struct PinButtons<P> {
    lines: [P; 5],
}

impl<P: InputPin> PinButtons<P> {
    pub fn new(up: P, left: P, center: P, right: P, down: P) -> Self {
        Self {
            lines: [up, left, center, right, down],
        }
    }

    pub fn into_inner(self) -> [P; 5] {
        self.lines
    }
}

impl<P: InputPin> ButtonPins for PinButtons<P> {
    fn read_pins(&mut self) -> u8 {
        let mut levels = pins::RELEASED;
        for ((mask, _), line) in Button::SCAN.iter().zip(self.lines.iter_mut()) {
            match line.is_low() {
                Ok(true) => levels &= !mask,
                Ok(false) => {}
                Err(e) => log::warn!("Button line read failed: {:?}", e),
            }
        }
        levels
    }
}

/// Turns raw button levels into one control per press.
///
/// After a press is reported no further press is accepted until every button
/// has been released, so holding a button moves the paddle once.
#[derive(Debug)]
pub struct LatchedButtons<P> {
    pins: P,
    accept: bool,
}

impl<P: ButtonPins> LatchedButtons<P> {
    pub fn new(pins: P) -> Self {
        Self { pins, accept: true }
    }

    /// Report the highest-priority pressed button if the latch is open
    pub fn poll(&mut self) -> Option<Button> {
        let levels = self.pins.read_pins();

        if self.accept {
            if let Some(&(_, button)) = Button::SCAN.iter().find(|(mask, _)| levels & mask == 0) {
                self.accept = false;
                return Some(button);
            }
        }

        if levels & pins::RELEASED == pins::RELEASED {
            self.accept = true;
        }
        None
    }

    pub fn into_inner(self) -> P {
        self.pins
    }
}

impl<P: ButtonPins> ControlSource for LatchedButtons<P> {
    fn read_control(&mut self) -> Control {
        self.poll().map(Control::from).unwrap_or_default()
    }
}
