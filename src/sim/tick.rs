//! Fixed-step simulation tick
//!
//! One call to [`tick`] is one frame of the game loop: paddle command first,
//! then every ball moves one unit and is resolved against the grid.

use glam::DVec2;

use super::ball::{Ball, snap, snap_pos};
use super::grid::{CellKind, Grid};
use super::paddle;
use super::state::{GamePhase, GameState, Outcome};
use crate::consts::*;
use crate::input::Control;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Debounced control read this frame
    pub control: Control,
    /// Idle/demo mode - the paddle follows the nearest ball and rounds start themselves
    pub idle_mode: bool,
}

/// Result of moving the balls for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Continue,
    GameOver,
    Win,
}

impl StepStatus {
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            StepStatus::Continue => None,
            StepStatus::GameOver => Some(Outcome::GameOver),
            StepStatus::Win => Some(Outcome::Win),
        }
    }
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> StepStatus {
    let control = if input.idle_mode {
        autopilot_control(state)
    } else {
        input.control
    };

    match state.phase {
        GamePhase::AwaitingStart => {
            if control == Control::Select {
                state.start_round();
            }
            StepStatus::Continue
        }

        GamePhase::RoundOver(_) => {
            if control == Control::Select {
                state.phase = GamePhase::AwaitingStart;
            }
            StepStatus::Continue
        }

        GamePhase::Playing => {
            let moved = match control {
                Control::Up => paddle::move_up(&mut state.grid),
                Control::Down => paddle::move_down(&mut state.grid),
                Control::None | Control::Select => false,
            };
            if moved {
                log::debug!("Paddle {:?} -> {:?}", control, state.grid.paddle_span());
            }

            state.time_ticks += 1;
            let status = move_balls(state);
            if let Some(outcome) = status.outcome() {
                state.finish_round(outcome);
            }
            status
        }
    }
}

/// Move every ball one step in index order.
///
/// Stops at the first terminal result; the remaining balls are not moved this tick.
pub fn move_balls(state: &mut GameState) -> StepStatus {
    let grid = &mut state.grid;
    for (index, ball) in state.balls.iter_mut().enumerate() {
        let previous = ball.pos;
        ball.advance();
        let status = update_cell(grid, ball, previous);
        if status != StepStatus::Continue {
            log::debug!("Ball {} ended the round: {:?}", index, status);
            return status;
        }
    }
    StepStatus::Continue
}

/// Resolve a ball that just moved from `previous` against the cell it landed in
pub fn update_cell(grid: &mut Grid, ball: &mut Ball, previous: DVec2) -> StepStatus {
    let from = snap_pos(previous);
    let mut to = ball.cell();

    match grid.at(to) {
        CellKind::Paddle => {
            // Push the ball out of the paddle column
            ball.pos.x += 1.0;
            to.col += 1;
            ball.reflect_x();
        }
        CellKind::Trap => return StepStatus::GameOver,
        CellKind::Block => {
            grid.blocks_left = grid.blocks_left.saturating_sub(1);
            if grid.blocks_left == 0 {
                return StepStatus::Win;
            }

            let still_x = (previous.x - ball.pos.x).abs() < RASTER_ROUND_LIMIT;
            let still_y = (previous.y - ball.pos.y).abs() < RASTER_ROUND_LIMIT;
            match (still_x, still_y) {
                (true, true) => ball.reflect_corner(),
                (true, false) => ball.reflect_y(),
                (false, true) | (false, false) => ball.reflect_x(),
            }
            log::debug!(
                "Block hit at {:?}, {} left, heading now {}",
                to,
                grid.blocks_left,
                ball.angle
            );
        }
        CellKind::Empty | CellKind::Ball => {}
    }

    grid.set(from, CellKind::Empty);
    grid.set(to, CellKind::Ball);
    StepStatus::Continue
}

/// Demo-mode control: start rounds unprompted and keep the paddle level
/// with the ball nearest to it.
pub fn autopilot_control(state: &GameState) -> Control {
    if state.phase != GamePhase::Playing {
        return Control::Select;
    }

    let Some((top, bottom)) = state.grid.paddle_span() else {
        return Control::None;
    };
    let Some(nearest) = state
        .balls
        .iter()
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
    else {
        return Control::None;
    };

    let target = snap(nearest.pos.y).min(LAST_ROW);
    if target < top {
        Control::Up
    } else if target > bottom {
        Control::Down
    } else {
        Control::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::{CellPos, Cells};
    use crate::sim::layout::Layout;

    use CellKind::{Block as B, Empty as E, Paddle as P, Trap as T};

    /// Open field with the default paddle column and no blocks.
    /// Ball 0 starts at (row 1, col 4); ball 1 idles along the bottom wall.
    fn open_layout() -> Layout {
        let mut cells: Cells = [[E; COLS]; ROWS];
        for (row, kind) in [T, P, P, T].into_iter().enumerate() {
            cells[row][0] = kind;
        }
        Layout {
            cells,
            balls: [CellPos::new(1, 4), CellPos::new(3, 12)],
            block_count: 0,
        }
    }

    fn playing(layout: Layout, angles: [i32; BALL_COUNT]) -> GameState {
        let mut state = GameState::new(1, layout);
        state.phase = GamePhase::Playing;
        for (ball, angle) in state.balls.iter_mut().zip(angles) {
            ball.angle = angle;
        }
        state
    }

    fn input(control: Control) -> TickInput {
        TickInput {
            control,
            ..Default::default()
        }
    }

    #[test]
    fn test_diagonal_step_into_block() {
        let mut layout = open_layout();
        layout.cells[2][5] = B;
        layout.cells[0][9] = B;
        layout.block_count = 2;
        let mut state = playing(layout, [45, 0]);

        let status = move_balls(&mut state);

        assert_eq!(status, StepStatus::Continue);
        let ball = state.balls[0];
        assert!((ball.pos.x - 4.71).abs() < 0.01);
        assert!((ball.pos.y - 1.71).abs() < 0.01);
        assert_eq!(state.grid.blocks_left, 1);
        // Both axes moved ~0.71 cells, so the horizontal rule applies
        assert_eq!(ball.angle, 135);
        assert_eq!(state.grid.cell(2, 5), CellKind::Ball);
        assert_eq!(state.grid.cell(1, 4), CellKind::Empty);
    }

    #[test]
    fn test_empty_cell_leaves_heading() {
        let mut state = playing(open_layout(), [45, 0]);
        move_balls(&mut state);

        assert_eq!(state.balls[0].angle, 45);
        assert_eq!(state.grid.cell(2, 5), CellKind::Ball);
        assert_eq!(state.grid.count(CellKind::Ball), 2);
    }

    #[test]
    fn test_block_reflection_rules() {
        let mut layout = open_layout();
        layout.cells[2][5] = B;
        layout.block_count = 10;

        let cases = [
            // (previous position, expected heading from 30°)
            (DVec2::new(5.2, 2.1), 210), // barely moved: corner
            (DVec2::new(5.1, 1.0), 330), // vertical move: flip vertical
            (DVec2::new(4.0, 2.1), 150), // horizontal move: flip horizontal
            (DVec2::new(4.0, 1.0), 150), // diagonal: horizontal by default
        ];

        for (previous, expected) in cases {
            let mut grid = Grid::new(layout.cells, layout.block_count);
            let mut ball = Ball {
                pos: DVec2::new(5.0, 2.0),
                angle: 30,
            };
            let status = update_cell(&mut grid, &mut ball, previous);

            assert_eq!(status, StepStatus::Continue);
            assert_eq!(ball.angle, expected, "previous {previous:?}");
            assert_eq!(grid.blocks_left, 9);
            assert_eq!(grid.cell(2, 5), CellKind::Ball);
        }
    }

    #[test]
    fn test_paddle_bounce_pushes_ball_out() {
        let mut state = playing(open_layout(), [180, 0]);
        state.balls[0].pos = DVec2::new(1.3, 1.0);

        let status = move_balls(&mut state);

        assert_eq!(status, StepStatus::Continue);
        let ball = state.balls[0];
        assert!((ball.pos.x - 1.3).abs() < 1e-9);
        assert_eq!(ball.angle, 0);
        assert_eq!(state.grid.cell(1, 0), CellKind::Paddle);
        assert_eq!(state.grid.cell(1, 1), CellKind::Ball);
    }

    #[test]
    fn test_paddle_bounce_moves_the_ball_mark() {
        let mut state = playing(open_layout(), [225, 0]);
        state.balls[0].pos = DVec2::new(1.2, 2.0);
        state.grid.set(CellPos::new(1, 4), CellKind::Empty);
        state.grid.set(CellPos::new(2, 1), CellKind::Ball);

        // (1.2, 2.0) -> (0.49, 1.29): paddle cell (1, 0), nudged to (1, 1)
        let status = move_balls(&mut state);

        assert_eq!(status, StepStatus::Continue);
        assert_eq!(state.balls[0].angle, 315);
        assert_eq!(state.balls[0].cell(), CellPos::new(1, 1));
        assert_eq!(state.grid.cell(2, 1), CellKind::Empty);
        assert_eq!(state.grid.cell(1, 1), CellKind::Ball);
        assert_eq!(state.grid.cell(1, 0), CellKind::Paddle);
        assert_eq!(state.grid.cell(2, 0), CellKind::Paddle);
    }

    #[test]
    fn test_trap_ends_round_before_later_balls() {
        let mut layout = open_layout();
        layout.balls[0] = CellPos::new(0, 1);
        let mut state = playing(layout, [180, 0]);
        let ball1_before = state.balls[1];
        let grid_before = state.grid.clone();

        let status = tick(&mut state, &input(Control::None));

        assert_eq!(status, StepStatus::GameOver);
        assert_eq!(state.phase, GamePhase::RoundOver(Outcome::GameOver));
        assert_eq!(state.balls[1], ball1_before);
        assert_eq!(state.grid, grid_before);
    }

    #[test]
    fn test_win_exactly_when_last_block_falls() {
        let mut layout = open_layout();
        layout.cells[1][5] = B;
        layout.cells[3][14] = B;
        layout.block_count = 2;
        let mut state = playing(layout, [0, 0]);

        // Ball 0 takes the first block, ball 1 is one cell short of the second
        assert_eq!(tick(&mut state, &input(Control::None)), StepStatus::Continue);
        assert_eq!(state.grid.blocks_left, 1);
        assert_eq!(state.phase, GamePhase::Playing);

        assert_eq!(tick(&mut state, &input(Control::None)), StepStatus::Win);
        assert_eq!(state.grid.blocks_left, 0);
        assert_eq!(state.phase, GamePhase::RoundOver(Outcome::Win));
        // The winning block is left standing
        assert_eq!(state.grid.cell(3, 14), CellKind::Block);
    }

    #[test]
    fn test_phase_transitions() {
        let mut state = GameState::new(5, Layout::default());

        // Paddle input does nothing on the splash screen
        tick(&mut state, &input(Control::Up));
        assert_eq!(state.phase, GamePhase::AwaitingStart);
        assert_eq!(state.grid.paddle_span(), Some((1, 2)));

        tick(&mut state, &input(Control::Select));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 0);

        // Select is ignored while playing
        state.balls[0].angle = 90;
        state.balls[1].angle = 90;
        tick(&mut state, &input(Control::Select));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);

        state.finish_round(Outcome::GameOver);
        tick(&mut state, &input(Control::Down));
        assert_eq!(state.phase, GamePhase::RoundOver(Outcome::GameOver));
        tick(&mut state, &input(Control::Select));
        assert_eq!(state.phase, GamePhase::AwaitingStart);
    }

    #[test]
    fn test_paddle_moves_before_balls() {
        let mut state = playing(open_layout(), [90, 0]);
        tick(&mut state, &input(Control::Up));
        assert_eq!(state.grid.paddle_span(), Some((0, 1)));
        assert_eq!(state.grid.cell(3, 0), CellKind::Trap);
    }

    #[test]
    fn test_restart_restores_defaults() {
        let layout = Layout::default();
        let mut state = GameState::new(11, layout.clone());
        tick(&mut state, &input(Control::Select));

        state.grid.set(CellPos::new(2, 9), CellKind::Ball);
        state.grid.blocks_left = 17;
        state.balls[1].pos = DVec2::new(9.4, 2.2);
        state.finish_round(Outcome::GameOver);

        tick(&mut state, &input(Control::Select));
        tick(&mut state, &input(Control::Select));

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.grid.cells(), &layout.cells);
        assert_eq!(state.grid.blocks_left, layout.block_count);
        for (ball, spawn) in state.balls.iter().zip(layout.balls) {
            assert_eq!(ball.cell(), spawn);
            assert_eq!(ball.pos, Ball::at(spawn).pos);
        }
    }

    #[test]
    fn test_autopilot_follows_nearest_ball() {
        let mut state = playing(open_layout(), [0, 0]);
        // Paddle spans rows 1-2; nearest ball (col 4) sits on row 1
        assert_eq!(autopilot_control(&state), Control::None);

        state.balls[0].pos = DVec2::new(3.0, 0.2);
        assert_eq!(autopilot_control(&state), Control::Up);

        state.balls[0].pos = DVec2::new(3.0, 2.8);
        assert_eq!(autopilot_control(&state), Control::Down);

        state.phase = GamePhase::RoundOver(Outcome::Win);
        assert_eq!(autopilot_control(&state), Control::Select);
    }

    #[test]
    fn test_idle_mode_overrides_input() {
        let mut state = GameState::new(8, Layout::default());
        let idle = TickInput {
            control: Control::None,
            idle_mode: true,
        };
        tick(&mut state, &idle);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(2024, Layout::default());
        let mut b = GameState::new(2024, Layout::default());
        let idle = TickInput {
            control: Control::None,
            idle_mode: true,
        };

        for _ in 0..200 {
            tick(&mut a, &idle);
            tick(&mut b, &idle);
        }

        assert_eq!(a.phase, b.phase);
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.balls, b.balls);
        assert_eq!(a.rounds, b.rounds);
    }
}
