//! Maze-chase state
//!
//! All state that must be persisted for determinism lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::Direction;
use crate::sim::timers::{Cadence, Countdown};

use super::agent::{AgentMode, Pursuer};
use super::grid::{self, Cell, Maze, Pellet};

pub const PLAYER_SPAWN: Cell = Cell::new(19, 21);

/// The shared Scatter/Chase alternation applied to eligible agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GlobalPhase {
    Scatter,
    Chase,
}

impl GlobalPhase {
    pub fn flip(self) -> Self {
        match self {
            GlobalPhase::Scatter => GlobalPhase::Chase,
            GlobalPhase::Chase => GlobalPhase::Scatter,
        }
    }

    pub fn mode(self) -> AgentMode {
        match self {
            GlobalPhase::Scatter => AgentMode::Scatter,
            GlobalPhase::Chase => AgentMode::Chase,
        }
    }
}

/// The player's piece: one grid cell plus a buffered turn request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player {
    pub cell: Cell,
    pub direction: Direction,
    /// Applied at the next alignment where its target cell is walkable
    pub next_direction: Option<Direction>,
}

impl Player {
    pub fn spawn() -> Self {
        Self {
            cell: PLAYER_SPAWN,
            direction: Direction::Right,
            next_direction: None,
        }
    }

    pub fn pixel_pos(&self) -> Vec2 {
        Vec2::new(
            self.cell.x as f32 * CELL_SIZE,
            self.cell.y as f32 * CELL_SIZE,
        )
    }
}

/// Events produced by one scheduler pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerEvents {
    pub player_step: bool,
    pub agent_step: bool,
    pub phase_flip: bool,
    pub vulnerability_expired: bool,
    pub blink_toggle: bool,
}

/// Named timer handles, advanced by one scheduler pass per tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MazeTimers {
    pub player_move: Cadence,
    pub agent_move: Cadence,
    pub global_phase: Cadence,
    pub vulnerability: Countdown,
    pub blink: Cadence,
    /// Agent contact is ignored while active (post-hit grace)
    pub invulnerability: Countdown,
}

impl MazeTimers {
    pub fn new() -> Self {
        Self {
            player_move: Cadence::new(PLAYER_MOVE_PERIOD),
            agent_move: Cadence::new(AGENT_MOVE_PERIOD),
            global_phase: Cadence::new(GLOBAL_PHASE_TICKS),
            vulnerability: Countdown::idle(),
            blink: Cadence::new(BLINK_PERIOD_TICKS),
            invulnerability: Countdown::idle(),
        }
    }

    /// The single per-tick scheduler pass.
    pub fn advance(&mut self) -> TimerEvents {
        let player_step = self.player_move.tick();
        let agent_step = self.agent_move.tick();
        let phase_flip = self.global_phase.tick();
        let vulnerability_expired = self.vulnerability.tick();

        // Blink only runs inside the closing window of the vulnerability
        let blink_toggle = if self.vulnerability.active()
            && self.vulnerability.remaining() <= BLINK_WINDOW_TICKS
        {
            self.blink.tick()
        } else {
            self.blink.reset();
            false
        };

        self.invulnerability.tick();

        TimerEvents {
            player_step,
            agent_step,
            phase_flip,
            vulnerability_expired,
            blink_toggle,
        }
    }
}

impl Default for MazeTimers {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete maze-chase state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MazeState {
    pub maze: Maze,
    pub player: Player,
    pub agents: [Pursuer; 4],
    pub pellets: Vec<Pellet>,
    pub score: u64,
    pub pellets_eaten: u32,
    pub lives: u32,
    pub level: u32,
    pub global_phase: GlobalPhase,
    pub timers: MazeTimers,
    pub elapsed_ticks: u64,
}

impl MazeState {
    pub fn new(settings: &Settings) -> Self {
        let maze = Maze::standard();
        let pellets = maze.pellets();
        Self {
            maze,
            player: Player::spawn(),
            agents: std::array::from_fn(Pursuer::new),
            pellets,
            score: 0,
            pellets_eaten: 0,
            lives: settings.starting_lives,
            level: 1,
            global_phase: GlobalPhase::Scatter,
            timers: MazeTimers::new(),
            elapsed_ticks: 0,
        }
    }

    /// Reinitialize for the next level, carrying score/lives/level forward.
    pub fn next_level(&mut self) {
        self.level += 1;
        self.pellets = self.maze.pellets();
        grid::apply_power_variant(&mut self.pellets, self.level);
        self.player = Player::spawn();
        self.agents = std::array::from_fn(Pursuer::new);
        self.global_phase = GlobalPhase::Scatter;
        self.timers = MazeTimers::new();
    }

    /// After a life is lost: everyone back to their start cells, staggered
    /// re-release, short grace window. Score, lives, and pellets stay.
    pub fn reset_positions(&mut self) {
        self.player = Player::spawn();
        for agent in self.agents.iter_mut() {
            let delay = agent.identity as u32 * PEN_RERELEASE_STAGGER_TICKS;
            agent.pen_reset(delay);
        }
        self.global_phase = GlobalPhase::Scatter;
        self.timers.global_phase.reset();
        self.timers.vulnerability.cancel();
        self.timers.invulnerability.arm(INVULNERABILITY_TICKS);
    }

    /// Identity 0's cell while it is out on the board.
    pub fn leader_cell(&self) -> Option<Cell> {
        let leader = &self.agents[0];
        (!leader.in_pen).then_some(leader.cell)
    }

    pub fn remaining_pellets(&self) -> usize {
        self.pellets.iter().filter(|p| !p.collected).count()
    }

    /// Renderer flag, mirrored from the grace countdown.
    pub fn invulnerable(&self) -> bool {
        self.timers.invulnerability.active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = MazeState::new(&Settings::default());
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.level, 1);
        assert_eq!(state.player.cell, PLAYER_SPAWN);
        assert!(state.agents.iter().all(|a| a.in_pen));
        assert_eq!(state.global_phase, GlobalPhase::Scatter);
        assert!(state.remaining_pellets() > 0);
    }

    #[test]
    fn test_next_level_preserves_run_counters() {
        let mut state = MazeState::new(&Settings::default());
        state.score = 700;
        state.lives = 2;
        state.pellets_eaten = 50;
        state.next_level();
        assert_eq!(state.level, 2);
        assert_eq!(state.score, 700);
        assert_eq!(state.lives, 2);
        assert_eq!(state.pellets_eaten, 50);
        assert_eq!(state.remaining_pellets(), state.pellets.len());
    }

    #[test]
    fn test_reset_positions_staggers_releases() {
        let mut state = MazeState::new(&Settings::default());
        for agent in state.agents.iter_mut() {
            agent.release_to_door(AgentMode::Chase);
        }
        state.reset_positions();
        let delays: Vec<u32> = state.agents.iter().map(|a| a.release.remaining()).collect();
        assert_eq!(delays, vec![0, 60, 120, 180]);
        assert!(state.invulnerable());
    }

    #[test]
    fn test_state_serde_round_trip() {
        let state = MazeState::new(&Settings::default());
        let json = serde_json::to_string(&state).unwrap();
        let back: MazeState = serde_json::from_str(&json).unwrap();
        let json2 = serde_json::to_string(&back).unwrap();
        assert_eq!(json, json2);
    }
}
