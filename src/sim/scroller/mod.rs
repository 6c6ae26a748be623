//! Side-scrolling obstacle-avoidance simulation

pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use spawn::RngState;
pub use state::{Avatar, Obstacle, Projectile, ScrollerState, ScrollerTimers};
pub use tick::tick;

use crate::settings::Settings;
use crate::sim::{Frame, Simulation, TickInput, TickOutcome};

/// Side-scroller behind the shared [`Simulation`] interface.
#[derive(Debug)]
pub struct SideScrollerSim {
    state: ScrollerState,
}

impl SideScrollerSim {
    pub fn new(settings: &Settings) -> Self {
        Self {
            state: ScrollerState::new(settings),
        }
    }

    pub fn state(&self) -> &ScrollerState {
        &self.state
    }
}

impl Simulation for SideScrollerSim {
    fn reset(&mut self, settings: &Settings) {
        self.state = ScrollerState::new(settings);
    }

    fn tick(&mut self, input: &TickInput, dt: f32) -> TickOutcome {
        tick::tick(&mut self.state, input, dt)
    }

    fn frame(&self) -> Frame<'_> {
        Frame::Scroller(&self.state)
    }

    fn score(&self) -> u64 {
        self.state.score
    }

    fn secondary_count(&self) -> u32 {
        self.state.obstacles_passed
    }

    fn set_speed(&mut self, multiplier: f32) {
        self.state.speed_multiplier = multiplier;
    }

    fn set_shields(&mut self, shields: u32) -> bool {
        self.state.shields = shields;
        self.state.max_shields = shields;
        true
    }
}
