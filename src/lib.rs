//! Arcade Core - a deterministic dual-mode arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, maze AI, game state)
//! - `engine`: Host-facing orchestrator and renderer contract
//! - `settings`: Run configuration

pub mod engine;
pub mod settings;
pub mod sim;

pub use engine::{EngineError, EnginePhase, GameEngine, Outcome, Renderer};
pub use settings::{GameSpeed, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz logical ticks)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Logical ticks per game-second; every duration below is a tick count
    pub const TICKS_PER_SECOND: u64 = 60;

    /// Side-scroller world bounds
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Avatar defaults
    pub const AVATAR_START_X: f32 = 100.0;
    pub const AVATAR_START_Y: f32 = 285.0;
    pub const AVATAR_WIDTH: f32 = 60.0;
    pub const AVATAR_HEIGHT: f32 = 40.0;
    /// Downward acceleration (px/s²)
    pub const GRAVITY: f32 = 1800.0;
    /// Vertical velocity set by a flap impulse (px/s, negative is up)
    pub const FLAP_VELOCITY: f32 = -480.0;
    /// Visual rotation derived from velocity (degrees per px/s, clamped)
    pub const ROTATION_PER_VELOCITY: f32 = 0.12;
    pub const ROTATION_MIN: f32 = -30.0;
    pub const ROTATION_MAX: f32 = 90.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 80.0;
    pub const OBSTACLE_GAP: f32 = 200.0;
    /// Horizontal distance the rightmost obstacle must advect before the next spawns
    pub const OBSTACLE_SPACING: f32 = 300.0;
    /// Leftward advection speed before the speed-tier multiplier (px/s)
    pub const OBSTACLE_BASE_SPEED: f32 = 240.0;
    /// Minimum distance of the gap center from the top/bottom edges
    pub const OBSTACLE_GAP_MARGIN: f32 = 180.0;

    /// Projectile defaults
    pub const PROJECTILE_WIDTH: f32 = 30.0;
    pub const PROJECTILE_HEIGHT: f32 = 12.0;
    /// Leftward speed before the speed-tier multiplier (px/s)
    pub const PROJECTILE_BASE_SPEED: f32 = 480.0;
    /// Warm-up before the first projectile, and the interval between them (15 s)
    pub const PROJECTILE_INTERVAL_TICKS: u32 = 900;
    /// Pre-spawn warning window surfaced to the renderer (2 s)
    pub const PROJECTILE_WARNING_TICKS: u32 = 120;

    /// Non-fatal obstacle hit response
    pub const INVINCIBILITY_TICKS: u32 = 60;
    pub const HIT_EFFECT_TICKS: u32 = 30;
    pub const HIT_KNOCKBACK: f32 = 20.0;
    /// The avatar is never knocked back past this x
    pub const HIT_MIN_X: f32 = 50.0;

    /// Maze-mode cell size in pixels
    pub const CELL_SIZE: f32 = 20.0;
    /// Ticks between one-cell moves
    pub const PLAYER_MOVE_PERIOD: u32 = 8;
    pub const AGENT_MOVE_PERIOD: u32 = 10;
    /// Scatter/Chase alternation period (10 s)
    pub const GLOBAL_PHASE_TICKS: u32 = 600;
    /// Power-pellet vulnerability window (10 s)
    pub const VULNERABILITY_TICKS: u32 = 600;
    /// Vulnerable agents blink during the final 3 s of the window
    pub const BLINK_WINDOW_TICKS: u32 = 180;
    pub const BLINK_PERIOD_TICKS: u32 = 30;
    /// Post-hit window during which agent contact is ignored (2 s)
    pub const INVULNERABILITY_TICKS: u32 = 120;
    /// Per-identity release delays at level start (0/5/10/15 s)
    pub const PEN_RELEASE_TICKS: [u32; 4] = [0, 300, 600, 900];
    /// Staggered re-release after the player loses a life
    pub const PEN_RERELEASE_STAGGER_TICKS: u32 = 60;
    /// Delay before an eaten agent leaves the pen again (5 s)
    pub const PEN_REENTRY_TICKS: u32 = 300;

    /// Scoring
    pub const PELLET_SCORE: u64 = 5;
    pub const POWER_PELLET_SCORE: u64 = 25;
    pub const AGENT_SCORE: u64 = 100;
    pub const LEVEL_BONUS: u64 = 1000;

    /// Run defaults
    pub const STARTING_LIVES: u32 = 3;
    pub const STARTING_SHIELDS: u32 = 3;
}
