//! Keyboard controls for the terminal host
//!
//! Arrow keys (or `w`/`s`, `k`/`j`) move the paddle, Enter or Space is the
//! select button, `q` or Esc asks the host to quit. Presses that arrive
//! between frames are queued so none are lost at slow tick rates.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{Control, ControlSource};

/// Presses kept for later frames; older ones are dropped past this
const MAX_PENDING: usize = 4;

/// What a single key press means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Control(Control),
    Quit,
}

/// Map a key press to a game action
pub fn key_action(key: &KeyEvent) -> Option<KeyAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let action = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => KeyAction::Control(Control::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => {
            KeyAction::Control(Control::Down)
        }
        KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Control(Control::Select),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        _ => return None,
    };
    Some(action)
}

/// Reads pending terminal key events once per frame.
///
/// The terminal must be in raw mode for presses to arrive without Enter.
#[derive(Debug, Default)]
pub struct KeyboardControls {
    pending: VecDeque<Control>,
    quit: bool,
}

impl KeyboardControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one terminal event
    pub fn handle_event(&mut self, event: &Event) {
        let Event::Key(key) = event else {
            return;
        };
        match key_action(key) {
            Some(KeyAction::Control(control)) => {
                if self.pending.len() == MAX_PENDING {
                    self.pending.pop_front();
                }
                self.pending.push_back(control);
            }
            Some(KeyAction::Quit) => self.quit = true,
            None => {}
        }
    }

    /// Drain every event already waiting, without blocking
    fn drain_events(&mut self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            self.handle_event(&event);
        }
        Ok(())
    }
}

impl ControlSource for KeyboardControls {
    fn read_control(&mut self) -> Control {
        if let Err(e) = self.drain_events() {
            log::error!("Keyboard input failed: {}", e);
            self.quit = true;
        }
        self.pending.pop_front().unwrap_or_default()
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}
