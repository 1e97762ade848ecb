//! Raster Breakout host simulation
//!
//! Plays the game in the terminal at the board's frame rate. Usage:
//! `raster-breakout [settings.json]`. Arrow keys move the paddle, Enter or
//! Space starts a round, `q` or Esc quits. `RUST_LOG=debug` shows collisions.

use std::io::{self, Stdout, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use crossterm::{cursor, execute, terminal};
use raster_breakout::display::TerminalDisplay;
use raster_breakout::input::KeyboardControls;
use raster_breakout::sim::{GamePhase, GameState};
use raster_breakout::{Console, Settings};

/// Raw mode on an alternate screen for as long as the guard lives
struct RawTerminal;

impl RawTerminal {
    fn enter(out: &mut Stdout) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        let mut out = io::stdout();
        let _ = execute!(out, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = out.flush();
        let _ = terminal::disable_raw_mode();
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(Settings::FILE_NAME));
    let settings = Settings::load(&path);

    let seed = settings.resolve_seed();
    let state = GameState::new(seed, settings.resolve_layout());
    log::info!(
        "Raster Breakout (host) starting, seed {}, autopilot {}",
        seed,
        settings.autopilot
    );

    let mut stdout = io::stdout();
    let _guard = match RawTerminal::enter(&mut stdout) {
        Ok(guard) => guard,
        Err(e) => {
            log::error!("Cannot prepare the terminal: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // With autopilot on the keys are only used to quit
    let display = TerminalDisplay::new(stdout.lock());
    let mut console =
        Console::new(state, KeyboardControls::new(), display).with_autopilot(settings.autopilot);

    let tick = settings.tick_interval();
    let pause = settings.round_over_pause();
    let result = console.run(|phase| {
        let delay = match phase {
            GamePhase::RoundOver(_) if settings.autopilot => pause,
            _ => tick,
        };
        std::thread::sleep(delay);
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Terminal write failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
