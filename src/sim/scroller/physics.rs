//! Vertical motion for the side-scroller avatar
//!
//! Pure transformations of avatar state: flap impulse, gravity integration,
//! and the world-bounds rules. No error conditions.

use crate::consts::*;

use super::state::Avatar;

/// Flap: set a fixed upward velocity.
pub fn apply_impulse(avatar: &mut Avatar) {
    avatar.velocity = FLAP_VELOCITY;
}

/// Add gravity to velocity, velocity to position, and derive the visual
/// rotation from velocity.
pub fn integrate(avatar: &mut Avatar, dt: f32) {
    avatar.velocity += GRAVITY * dt;
    avatar.pos.y += avatar.velocity * dt;
    avatar.rotation = (avatar.velocity * ROTATION_PER_VELOCITY).clamp(ROTATION_MIN, ROTATION_MAX);
}

/// The avatar's bottom edge has reached the ground.
pub fn ground_collision(avatar: &Avatar, bounds_height: f32) -> bool {
    avatar.pos.y + AVATAR_HEIGHT >= bounds_height
}

/// Clamp to the top of the world instead of letting the avatar exit it.
pub fn bounce_off_ceiling(avatar: &mut Avatar) {
    if avatar.pos.y < 0.0 {
        avatar.pos.y = 0.0;
        if avatar.velocity < 0.0 {
            avatar.velocity = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flap_sets_upward_velocity() {
        let mut avatar = Avatar::spawn();
        avatar.velocity = 300.0;
        apply_impulse(&mut avatar);
        assert_eq!(avatar.velocity, FLAP_VELOCITY);
        assert!(avatar.velocity < 0.0);
    }

    #[test]
    fn test_gravity_accelerates_fall() {
        let mut avatar = Avatar::spawn();
        let y0 = avatar.pos.y;
        integrate(&mut avatar, SIM_DT);
        let v1 = avatar.velocity;
        integrate(&mut avatar, SIM_DT);
        assert!(avatar.velocity > v1);
        assert!(avatar.pos.y > y0);
    }

    #[test]
    fn test_rotation_tracks_velocity() {
        let mut avatar = Avatar::spawn();
        apply_impulse(&mut avatar);
        integrate(&mut avatar, SIM_DT);
        assert_eq!(avatar.rotation, ROTATION_MIN);

        // Long fall pegs the rotation at its downward clamp
        for _ in 0..120 {
            integrate(&mut avatar, SIM_DT);
        }
        assert_eq!(avatar.rotation, ROTATION_MAX);
    }

    #[test]
    fn test_ground_collision() {
        let mut avatar = Avatar::spawn();
        assert!(!ground_collision(&avatar, WORLD_HEIGHT));
        avatar.pos.y = WORLD_HEIGHT - AVATAR_HEIGHT;
        assert!(ground_collision(&avatar, WORLD_HEIGHT));
    }

    #[test]
    fn test_ceiling_bounce_clamps() {
        let mut avatar = Avatar::spawn();
        avatar.pos.y = -12.0;
        avatar.velocity = -200.0;
        bounce_off_ceiling(&mut avatar);
        assert_eq!(avatar.pos.y, 0.0);
        assert_eq!(avatar.velocity, 0.0);
    }

    #[test]
    fn test_ceiling_bounce_ignores_descent() {
        let mut avatar = Avatar::spawn();
        avatar.pos.y = 40.0;
        avatar.velocity = 100.0;
        bounce_off_ceiling(&mut avatar);
        assert_eq!(avatar.pos.y, 40.0);
        assert_eq!(avatar.velocity, 100.0);
    }
}
