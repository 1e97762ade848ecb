//! Game state and round lifecycle
//!
//! Everything the simulation mutates lives in one `GameState`; nothing is global.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ball::Ball;
use super::grid::Grid;
use super::layout::Layout;
use crate::consts::*;

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A ball reached a trap cell
    GameOver,
    /// The last block was hit
    Win,
}

impl Outcome {
    /// Banner shown on the result screen
    pub fn banner(&self) -> &'static str {
        match self {
            Outcome::GameOver => "GAME OVER",
            Outcome::Win => "YOU WIN",
        }
    }
}

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Splash screen, waiting for the start button
    AwaitingStart,
    /// Balls are moving
    Playing,
    /// Result screen, waiting for the player to acknowledge
    RoundOver(Outcome),
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from, for reproducing a session
    pub seed: u64,
    rng: Pcg32,
    /// Configuration every round starts from
    pub layout: Layout,
    pub grid: Grid,
    pub balls: [Ball; BALL_COUNT],
    pub phase: GamePhase,
    /// Ticks simulated in the current round
    pub time_ticks: u64,
    /// Rounds started since power-on
    pub rounds: u32,
}

impl GameState {
    /// Create a state on the splash screen with the grid already laid out
    pub fn new(seed: u64, layout: Layout) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            grid: Grid::new(layout.cells, layout.block_count),
            balls: layout.balls.map(Ball::at),
            layout,
            phase: GamePhase::AwaitingStart,
            time_ticks: 0,
            rounds: 0,
        };
        state.reset();
        state
    }

    /// Restore grid, balls and block counter from the layout
    pub fn reset(&mut self) {
        self.grid.reset(&self.layout);
        self.balls = self.layout.balls.map(Ball::at);
        self.time_ticks = 0;
    }

    /// Give every ball a fresh random heading in [0, 360)
    pub fn start_balls(&mut self) {
        for ball in &mut self.balls {
            ball.angle = self.rng.random_range(0..360);
        }
    }

    /// Reset the playfield and launch a new round
    pub fn start_round(&mut self) {
        self.reset();
        self.start_balls();
        self.rounds += 1;
        self.phase = GamePhase::Playing;

        log::info!(
            "Round {} started (seed {}, headings {:?})",
            self.rounds,
            self.seed,
            self.balls.map(|b| b.angle)
        );
    }

    /// Record the end of a round
    pub fn finish_round(&mut self, outcome: Outcome) {
        self.phase = GamePhase::RoundOver(outcome);
        log::info!(
            "Round {} over: {:?} after {} ticks, {} blocks left",
            self.rounds,
            outcome,
            self.time_ticks,
            self.grid.blocks_left
        );
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(0, Layout::default())
    }
}
