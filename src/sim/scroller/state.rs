//! Side-scroller state and entity types
//!
//! Everything here is serializable and owned by the engine; the renderer only
//! ever sees it through a read-only snapshot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::collision::Aabb;
use crate::sim::timers::{Cadence, Countdown};

use super::spawn::{self, RngState};

/// The player's avatar. Mutated once per tick by the physics pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Avatar {
    pub pos: Vec2,
    /// Vertical velocity, px/s; negative is up
    pub velocity: f32,
    /// Visual rotation in degrees, derived from velocity
    pub rotation: f32,
}

impl Avatar {
    pub fn spawn() -> Self {
        Self {
            pos: Vec2::new(AVATAR_START_X, AVATAR_START_Y),
            velocity: 0.0,
            rotation: 0.0,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, AVATAR_WIDTH, AVATAR_HEIGHT)
    }
}

/// A pipe pair: solid above and below a vertical gap.
///
/// `scored` is set either when the avatar passes the obstacle or when the
/// obstacle absorbs a shield hit, so one obstacle can neither score nor hit
/// twice.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub gap_center: f32,
    pub scored: bool,
}

impl Obstacle {
    pub fn top_aabb(&self) -> Aabb {
        Aabb::new(self.x, 0.0, OBSTACLE_WIDTH, self.gap_center - OBSTACLE_GAP / 2.0)
    }

    pub fn bottom_aabb(&self) -> Aabb {
        let top = self.gap_center + OBSTACLE_GAP / 2.0;
        Aabb::new(self.x, top, OBSTACLE_WIDTH, WORLD_HEIGHT - top)
    }

    pub fn trailing_edge(&self) -> f32 {
        self.x + OBSTACLE_WIDTH
    }

    pub fn collides(&self, avatar: &Aabb) -> bool {
        avatar.overlaps(&self.top_aabb()) || avatar.overlaps(&self.bottom_aabb())
    }
}

/// Always fatal on contact, shields or not.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Projectile {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT)
    }
}

/// Named timer handles, advanced by one scheduler pass per tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScrollerTimers {
    /// Obstacle hits are ignored while active
    pub invincibility: Countdown,
    /// Renderer flash after a shield hit
    pub hit_effect: Countdown,
    /// Fires a projectile every interval; doubles as the warm-up delay
    pub projectile_spawn: Cadence,
}

impl ScrollerTimers {
    fn new() -> Self {
        Self {
            invincibility: Countdown::idle(),
            hit_effect: Countdown::idle(),
            projectile_spawn: Cadence::new(PROJECTILE_INTERVAL_TICKS),
        }
    }

    /// Single per-tick scheduler pass. Returns true when a projectile is due.
    pub fn advance(&mut self) -> bool {
        self.invincibility.tick();
        self.hit_effect.tick();
        self.projectile_spawn.tick()
    }
}

/// Complete side-scroller state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollerState {
    pub avatar: Avatar,
    pub obstacles: Vec<Obstacle>,
    pub projectiles: Vec<Projectile>,
    pub shields: u32,
    pub max_shields: u32,
    pub score: u64,
    pub obstacles_passed: u32,
    pub speed_multiplier: f32,
    pub timers: ScrollerTimers,
    pub rng: RngState,
    pub elapsed_ticks: u64,
}

impl ScrollerState {
    pub fn new(settings: &Settings) -> Self {
        let mut rng = RngState::new(settings.seed);
        // One obstacle is already inbound when the run starts
        let first = spawn::create_obstacle(&mut rng);
        Self {
            avatar: Avatar::spawn(),
            obstacles: vec![first],
            projectiles: Vec::new(),
            shields: settings.starting_shields,
            max_shields: settings.starting_shields,
            score: 0,
            obstacles_passed: 0,
            speed_multiplier: settings.speed.multiplier(),
            timers: ScrollerTimers::new(),
            rng,
            elapsed_ticks: 0,
        }
    }

    /// Renderer flag: a projectile arrives within the warning window.
    pub fn projectile_warning(&self) -> bool {
        self.timers.projectile_spawn.remaining() <= PROJECTILE_WARNING_TICKS
    }

    /// Renderer flag: the avatar was recently hit.
    pub fn hit_effect_active(&self) -> bool {
        self.timers.hit_effect.active()
    }
}
