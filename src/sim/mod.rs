//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Tick-counted timers only, advanced by one scheduler pass per tick
//! - No rendering or platform dependencies

pub mod collision;
pub mod maze;
pub mod scroller;
pub mod timers;

use serde::{Deserialize, Serialize};

pub use collision::{Aabb, has_passed};
pub use maze::{MazeChaseSim, MazeState};
pub use scroller::{ScrollerState, SideScrollerSim};
pub use timers::{Cadence, Countdown};

use crate::settings::Settings;

/// Which game the engine is simulating. Chosen at construction, immutable
/// for the engine's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    SideScroller,
    MazeChase,
}

/// Directional intent, shared by maze movement and input handling.
///
/// `ALL` doubles as the fixed tie-break priority order for agent move
/// selection, so its ordering is load-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Grid delta (dx, dy); y grows downward.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Input commands for a single tick (deterministic)
///
/// The engine records input asynchronously and drains it into one of these at
/// the start of the next tick; nothing mutates the sim mid-tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Flap impulse request (side-scroller)
    pub flap: bool,
    /// Buffered direction request (maze mode)
    pub direction: Option<Direction>,
}

/// What a tick did to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    /// All pellets collected; the sim has already reinitialized for the next
    /// level, carrying score/lives/level forward.
    LevelComplete,
    GameOver,
}

/// Read-only snapshot handed to the renderer every tick.
#[derive(Debug)]
pub enum Frame<'a> {
    Scroller(&'a ScrollerState),
    Maze(&'a MazeState),
}

/// A game mode's simulation behind the shared tick/collision/score interface.
///
/// Two concrete variants exist: [`SideScrollerSim`] and [`MazeChaseSim`],
/// selected by the engine at construction.
pub trait Simulation {
    /// Reinitialize all mode state for a fresh run.
    fn reset(&mut self, settings: &Settings);

    /// Advance one fixed timestep.
    fn tick(&mut self, input: &TickInput, dt: f32) -> TickOutcome;

    /// Snapshot of the current visible state.
    fn frame(&self) -> Frame<'_>;

    fn score(&self) -> u64;

    /// Mode-specific secondary counter: obstacles passed, or pellets eaten.
    fn secondary_count(&self) -> u32;

    /// Apply a new speed-tier multiplier. Affects advection only; grid
    /// cadences and timers never scale.
    fn set_speed(&mut self, multiplier: f32);

    /// Replace the shield budget. Returns false for modes without shields.
    fn set_shields(&mut self, _shields: u32) -> bool {
        false
    }
}
