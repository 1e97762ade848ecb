//! Game loop driver
//!
//! Polls the control source, advances the simulation and redraws. The
//! playfield is redrawn every playing tick; text screens only when the phase
//! changes, since their content never does.

use crate::display::{Display, RESTART_PROMPT, SPLASH};
use crate::input::ControlSource;
use crate::sim::{GamePhase, GameState, StepStatus, TickInput, tick};

/// A running game wired to its input and output devices
pub struct Console<C, D> {
    state: GameState,
    controls: C,
    display: D,
    /// Idle/demo mode, passed through to every tick
    autopilot: bool,
    /// Phase drawn last frame; `None` forces a redraw
    last_phase: Option<GamePhase>,
}

impl<C: ControlSource, D: Display> Console<C, D> {
    pub fn new(state: GameState, controls: C, display: D) -> Self {
        Self {
            state,
            controls,
            display,
            autopilot: false,
            last_phase: None,
        }
    }

    pub fn with_autopilot(mut self, enabled: bool) -> Self {
        self.autopilot = enabled;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Run one iteration of the loop: read input, tick, draw
    pub fn frame(&mut self) -> Result<StepStatus, D::Error> {
        let input = TickInput {
            control: self.controls.read_control(),
            idle_mode: self.autopilot,
        };
        let status = tick(&mut self.state, &input);
        self.draw()?;
        Ok(status)
    }

    fn draw(&mut self) -> Result<(), D::Error> {
        let phase = self.state.phase;
        let changed = self.last_phase != Some(phase);
        self.last_phase = Some(phase);

        match phase {
            GamePhase::Playing => self.display.draw_grid(&self.state.grid),
            GamePhase::AwaitingStart if changed => self.display.draw_message(SPLASH.0, SPLASH.1),
            GamePhase::RoundOver(outcome) if changed => {
                self.display.draw_message(outcome.banner(), RESTART_PROMPT)
            }
            _ => Ok(()),
        }
    }

    /// Run until the control source asks to quit, calling `pace` between
    /// frames (sleep, wait for a timer...).
    ///
    /// Board control sources never ask, so there this only returns if the
    /// display fails.
    pub fn run(&mut self, mut pace: impl FnMut(GamePhase)) -> Result<(), D::Error> {
        while !self.controls.quit_requested() {
            self.frame()?;
            pace(self.state.phase);
        }
        log::info!(
            "Leaving after {} rounds ({} ticks this round)",
            self.state.rounds,
            self.state.time_ticks
        );
        Ok(())
    }

    pub fn into_parts(self) -> (GameState, C, D) {
        (self.state, self.controls, self.display)
    }
}
