//! Maze-chase simulation with pursuing agents

pub mod agent;
pub mod grid;
pub mod state;
pub mod tick;

pub use agent::{AgentMode, Pursuer};
pub use grid::{Cell, CellKind, Maze, Pellet};
pub use state::{MazeState, MazeTimers, Player};
pub use tick::tick;

use crate::settings::Settings;
use crate::sim::{Frame, Simulation, TickInput, TickOutcome};

/// Maze chase behind the shared [`Simulation`] interface.
#[derive(Debug)]
pub struct MazeChaseSim {
    state: MazeState,
}

impl MazeChaseSim {
    pub fn new(settings: &Settings) -> Self {
        Self {
            state: MazeState::new(settings),
        }
    }

    pub fn state(&self) -> &MazeState {
        &self.state
    }
}

impl Simulation for MazeChaseSim {
    fn reset(&mut self, settings: &Settings) {
        self.state = MazeState::new(settings);
    }

    fn tick(&mut self, input: &TickInput, dt: f32) -> TickOutcome {
        tick::tick(&mut self.state, input, dt)
    }

    fn frame(&self) -> Frame<'_> {
        Frame::Maze(&self.state)
    }

    fn score(&self) -> u64 {
        self.state.score
    }

    fn secondary_count(&self) -> u32 {
        self.state.pellets_eaten
    }

    fn set_speed(&mut self, _multiplier: f32) {
        // Grid cadences are fixed; speed tiers only affect the side-scroller.
    }
}
