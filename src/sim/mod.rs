//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One unit step per tick, no sub-stepping
//! - Seeded RNG only
//! - Balls processed in index order
//! - No rendering or platform dependencies

pub mod ball;
pub mod grid;
pub mod layout;
pub mod paddle;
pub mod state;
pub mod tick;

pub use ball::{Ball, reflect_corner, reflect_x, reflect_y, snap, snap_pos};
pub use grid::{CellKind, CellPos, Cells, Grid};
pub use layout::{Layout, LayoutError};
pub use state::{GamePhase, GameState, Outcome};
pub use tick::{StepStatus, TickInput, autopilot_control, move_balls, tick, update_cell};
