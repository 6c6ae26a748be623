//! Procedural obstacle and projectile spawning

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

use super::state::{Obstacle, Projectile};

/// Seeded RNG state, serializable alongside the run.
///
/// Each draw derives a fresh generator from (seed, stream) and bumps the
/// stream, so replaying a run from the same seed reproduces every gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    seed: u64,
    stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    fn next(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream += 1;
        rng
    }

    /// Uniform gap center inside the safe vertical band.
    pub fn gap_center(&mut self) -> f32 {
        self.next()
            .random_range(OBSTACLE_GAP_MARGIN..WORLD_HEIGHT - OBSTACLE_GAP_MARGIN)
    }
}

/// New obstacle at the right edge with a randomized vertical gap.
pub fn create_obstacle(rng: &mut RngState) -> Obstacle {
    Obstacle {
        x: WORLD_WIDTH,
        gap_center: rng.gap_center(),
        scored: false,
    }
}

/// True when the rightmost obstacle has advected past the spacing threshold.
pub fn should_spawn(obstacles: &[Obstacle]) -> bool {
    obstacles
        .iter()
        .map(|o| o.x)
        .fold(f32::MIN, f32::max)
        < WORLD_WIDTH - OBSTACLE_SPACING
}

/// Advect obstacles leftward and prune the ones fully off the left edge.
pub fn advance_obstacles(obstacles: &mut Vec<Obstacle>, speed_multiplier: f32, dt: f32) {
    for obstacle in obstacles.iter_mut() {
        obstacle.x -= OBSTACLE_BASE_SPEED * speed_multiplier * dt;
    }
    obstacles.retain(|o| o.x + OBSTACLE_WIDTH > 0.0);
}

/// New projectile at the right edge, aimed at the avatar's current altitude.
pub fn create_projectile(avatar_y: f32) -> Projectile {
    Projectile {
        pos: Vec2::new(WORLD_WIDTH, avatar_y),
        vel: Vec2::new(-PROJECTILE_BASE_SPEED, 0.0),
    }
}

/// Advect projectiles and prune off-screen ones.
pub fn advance_projectiles(projectiles: &mut Vec<Projectile>, speed_multiplier: f32, dt: f32) {
    for projectile in projectiles.iter_mut() {
        projectile.pos += projectile.vel * speed_multiplier * dt;
    }
    projectiles.retain(|p| p.pos.x + PROJECTILE_WIDTH > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_stays_in_safe_band() {
        let mut rng = RngState::new(7);
        for _ in 0..100 {
            let gap = rng.gap_center();
            assert!(gap >= OBSTACLE_GAP_MARGIN);
            assert!(gap <= WORLD_HEIGHT - OBSTACLE_GAP_MARGIN);
        }
    }

    #[test]
    fn test_same_seed_same_gaps() {
        let mut a = RngState::new(42);
        let mut b = RngState::new(42);
        for _ in 0..20 {
            assert_eq!(a.gap_center(), b.gap_center());
        }
    }

    #[test]
    fn test_should_spawn_respects_spacing() {
        let mut rng = RngState::new(1);
        let mut obstacles = vec![create_obstacle(&mut rng)];
        assert!(!should_spawn(&obstacles));

        obstacles[0].x = WORLD_WIDTH - OBSTACLE_SPACING - 1.0;
        assert!(should_spawn(&obstacles));
    }

    #[test]
    fn test_spawn_when_empty() {
        assert!(should_spawn(&[]));
    }

    #[test]
    fn test_advance_prunes_offscreen() {
        let mut obstacles = vec![
            Obstacle {
                x: -OBSTACLE_WIDTH - 1.0,
                gap_center: 300.0,
                scored: true,
            },
            Obstacle {
                x: 400.0,
                gap_center: 300.0,
                scored: false,
            },
        ];
        advance_obstacles(&mut obstacles, 1.5, SIM_DT);
        assert_eq!(obstacles.len(), 1);
        assert!(obstacles[0].x < 400.0);
    }

    #[test]
    fn test_projectile_advects_left() {
        let mut projectiles = vec![create_projectile(285.0)];
        advance_projectiles(&mut projectiles, 1.5, SIM_DT);
        assert!(projectiles[0].pos.x < WORLD_WIDTH);
        assert_eq!(projectiles[0].pos.y, 285.0);
    }
}
