//! Fixed timestep tick for the side-scroller

use crate::consts::*;
use crate::sim::{TickInput, TickOutcome, collision};

use super::spawn;
use super::state::ScrollerState;
use super::physics;

/// Advance the side-scroller by one fixed timestep.
///
/// Order per tick: timers, physics, advection + scoring, spawning, collision
/// resolution. Returns GameOver the instant the run ends; the state is left
/// intact for the final snapshot.
pub fn tick(state: &mut ScrollerState, input: &TickInput, dt: f32) -> TickOutcome {
    state.elapsed_ticks += 1;

    let projectile_due = state.timers.advance();
    if projectile_due {
        log::debug!(
            "projectile spawned at t={}s",
            state.elapsed_ticks / TICKS_PER_SECOND
        );
        state
            .projectiles
            .push(spawn::create_projectile(state.avatar.pos.y));
    }

    if input.flap {
        physics::apply_impulse(&mut state.avatar);
    }
    physics::integrate(&mut state.avatar, dt);
    physics::bounce_off_ceiling(&mut state.avatar);

    // Score passes before advection so a pass and a hit cannot land on the
    // same obstacle in the same tick
    let avatar_box = state.avatar.aabb();
    for obstacle in state.obstacles.iter_mut() {
        if !obstacle.scored && collision::has_passed(&avatar_box, obstacle.trailing_edge()) {
            obstacle.scored = true;
            state.score += 1;
            state.obstacles_passed += 1;
        }
    }

    spawn::advance_obstacles(&mut state.obstacles, state.speed_multiplier, dt);
    spawn::advance_projectiles(&mut state.projectiles, state.speed_multiplier, dt);
    if spawn::should_spawn(&state.obstacles) {
        state.obstacles.push(spawn::create_obstacle(&mut state.rng));
    }

    resolve_collisions(state)
}

fn resolve_collisions(state: &mut ScrollerState) -> TickOutcome {
    // Ground: instant death
    if physics::ground_collision(&state.avatar, WORLD_HEIGHT) {
        log::info!("ground collision, run over");
        return TickOutcome::GameOver;
    }

    let avatar_box = state.avatar.aabb();

    // Projectiles: instant death regardless of shields
    for projectile in &state.projectiles {
        if projectile.aabb().overlaps(&avatar_box) {
            log::info!("projectile collision, run over");
            return TickOutcome::GameOver;
        }
    }

    // Obstacles: shield-absorbed unless none remain
    if !state.timers.invincibility.active() {
        for obstacle in state.obstacles.iter_mut() {
            if !obstacle.scored && obstacle.collides(&avatar_box) {
                if state.shields > 0 {
                    state.shields -= 1;
                    obstacle.scored = true;
                    log::debug!("shield hit, {} remaining", state.shields);

                    // Repulsion: upward impulse plus a bounded leftward shove
                    state.avatar.velocity = FLAP_VELOCITY;
                    state.avatar.pos.x = (state.avatar.pos.x - HIT_KNOCKBACK).max(HIT_MIN_X);
                    state.timers.invincibility.arm(INVINCIBILITY_TICKS);
                    state.timers.hit_effect.arm(HIT_EFFECT_TICKS);
                } else {
                    log::info!("obstacle collision with no shields, run over");
                    return TickOutcome::GameOver;
                }
                break;
            }
        }
    }

    TickOutcome::Running
}
