//! Run configuration
//!
//! Plain serde data handed in by the host; the engine never persists it.

use serde::{Deserialize, Serialize};

use crate::consts::{STARTING_LIVES, STARTING_SHIELDS};

/// Discrete speed tiers for the side-scroller's advection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl GameSpeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameSpeed::Slow => "Slow",
            GameSpeed::Normal => "Normal",
            GameSpeed::Fast => "Fast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slow" => Some(GameSpeed::Slow),
            "normal" | "moderate" => Some(GameSpeed::Normal),
            "fast" => Some(GameSpeed::Fast),
            _ => None,
        }
    }

    /// Multiplier applied to obstacle/projectile advection. Grid cadences
    /// and timers never scale.
    pub fn multiplier(self) -> f32 {
        match self {
            GameSpeed::Slow => 0.75,
            GameSpeed::Normal => 1.5,
            GameSpeed::Fast => 2.25,
        }
    }
}

/// Per-run configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Seed for obstacle-gap generation; same seed, same run
    pub seed: u64,
    pub speed: GameSpeed,
    /// Side-scroller only
    pub starting_shields: u32,
    /// Maze mode only
    pub starting_lives: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,
            speed: GameSpeed::Normal,
            starting_shields: STARTING_SHIELDS,
            starting_lives: STARTING_LIVES,
        }
    }
}

impl Settings {
    /// JSON interchange with host collaborators.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
