//! Fixed timestep tick for the maze chase

use crate::consts::*;
use crate::sim::{TickInput, TickOutcome};

use super::agent::{self, AgentMode, PEN_DOOR};
use super::state::{MazeState, TimerEvents};

/// Advance the maze chase by one fixed timestep.
///
/// Order per tick: scheduler pass, player movement, agent movement, phase and
/// vulnerability transitions, collision resolution.
pub fn tick(state: &mut MazeState, input: &TickInput, _dt: f32) -> TickOutcome {
    state.elapsed_ticks += 1;

    let events = state.timers.advance();

    update_player(state, input, &events);
    update_agents(state, &events);
    apply_phase_transitions(state, &events);
    resolve_collisions(state)
}

fn update_player(state: &mut MazeState, input: &TickInput, events: &TimerEvents) {
    if let Some(direction) = input.direction {
        state.player.next_direction = Some(direction);
    }

    // Apply the buffered turn as soon as its target cell is walkable; a
    // request toward a wall just stays buffered
    if let Some(next) = state.player.next_direction {
        if state
            .maze
            .is_walkable(state.maze.neighbor(state.player.cell, next))
        {
            state.player.direction = next;
            state.player.next_direction = None;
        }
    }

    if events.player_step {
        let target = state.maze.neighbor(state.player.cell, state.player.direction);
        if state.maze.is_walkable(target) {
            state.player.cell = target;
        }
    }
}

fn update_agents(state: &mut MazeState, events: &TimerEvents) {
    let player_cell = state.player.cell;
    let player_heading = state.player.direction;
    let leader = state.leader_cell();
    let ambient = state.global_phase.mode();

    for agent in state.agents.iter_mut() {
        if agent.in_pen {
            if agent.release.tick() || !agent.release.active() {
                log::debug!("agent {} released", agent.identity);
                agent.release_to_door(ambient);
            } else {
                agent.bob_in_pen();
            }
            continue;
        }

        if !events.agent_step {
            continue;
        }

        let step = match agent.mode {
            AgentMode::Frightened => {
                agent::step_fleeing(&state.maze, agent.cell, agent.direction, player_cell)
            }
            AgentMode::Eaten => {
                agent::step_toward(&state.maze, agent.cell, agent.direction, PEN_DOOR)
            }
            AgentMode::Scatter => {
                agent::step_toward(&state.maze, agent.cell, agent.direction, agent.home_corner())
            }
            AgentMode::Chase => {
                let target = agent::chase_target(
                    &state.maze,
                    agent.identity,
                    agent.cell,
                    player_cell,
                    player_heading,
                    leader,
                );
                agent::step_toward(&state.maze, agent.cell, agent.direction, target)
            }
        };

        if let Some((direction, cell)) = step {
            agent.direction = direction;
            agent.cell = cell;
        }

        if agent.mode == AgentMode::Eaten && agent.cell == PEN_DOOR {
            log::debug!("agent {} back at the pen", agent.identity);
            agent.pen_reset(PEN_REENTRY_TICKS);
        }
    }
}

fn apply_phase_transitions(state: &mut MazeState, events: &TimerEvents) {
    if events.phase_flip {
        state.global_phase = state.global_phase.flip();
        log::info!("global phase now {:?}", state.global_phase);
        let ambient = state.global_phase.mode();
        for agent in state.agents.iter_mut() {
            if !agent.in_pen
                && agent.mode != AgentMode::Frightened
                && agent.mode != AgentMode::Eaten
            {
                agent.mode = ambient;
            }
        }
    }

    if events.vulnerability_expired {
        log::debug!("vulnerability window over");
        let ambient = state.global_phase.mode();
        for agent in state.agents.iter_mut() {
            agent.vulnerable = false;
            agent.blinking = false;
            if !agent.in_pen && agent.mode != AgentMode::Eaten {
                agent.mode = ambient;
            }
        }
    }

    if events.blink_toggle {
        for agent in state.agents.iter_mut() {
            if agent.vulnerable {
                agent.blinking = !agent.blinking;
            }
        }
    }
}

fn resolve_collisions(state: &mut MazeState) -> TickOutcome {
    collect_pellet(state);

    if !state.timers.invulnerability.active() {
        let player_cell = state.player.cell;
        let mut life_lost = false;

        for agent in state.agents.iter_mut() {
            if agent.in_pen || agent.cell != player_cell {
                continue;
            }
            if agent.vulnerable && agent.mode == AgentMode::Frightened {
                state.score += AGENT_SCORE;
                agent.mode = AgentMode::Eaten;
                agent.vulnerable = false;
                agent.blinking = false;
                log::debug!("agent {} eaten", agent.identity);
            } else if agent.mode != AgentMode::Eaten {
                life_lost = true;
                break;
            }
        }

        if life_lost {
            state.lives = state.lives.saturating_sub(1);
            log::info!("player caught, {} lives left", state.lives);
            if state.lives == 0 {
                return TickOutcome::GameOver;
            }
            state.reset_positions();
        }
    }

    if state.remaining_pellets() == 0 {
        state.score += LEVEL_BONUS;
        state.next_level();
        log::info!("level complete, starting level {}", state.level);
        return TickOutcome::LevelComplete;
    }

    TickOutcome::Running
}

fn collect_pellet(state: &mut MazeState) {
    let player_cell = state.player.cell;
    let Some(pellet) = state
        .pellets
        .iter_mut()
        .find(|p| !p.collected && p.cell == player_cell)
    else {
        return;
    };

    pellet.collected = true;
    state.pellets_eaten += 1;

    if pellet.is_power {
        state.score += POWER_PELLET_SCORE;
        state.timers.vulnerability.arm(VULNERABILITY_TICKS);
        log::info!("power pellet eaten, agents frightened");
        for agent in state.agents.iter_mut() {
            if !agent.in_pen && agent.mode != AgentMode::Eaten {
                agent.vulnerable = true;
                agent.blinking = false;
                agent.mode = AgentMode::Frightened;
            }
        }
    } else {
        state.score += PELLET_SCORE;
    }
}
