//! Pursuing-agent state machine and movement heuristics
//!
//! Four agents, fixed identities 0-3, each with a home corner for Scatter and
//! a per-identity Chase targeting rule. Movement is reactive: among the legal
//! neighboring cells (reversal excluded unless nothing else is legal), take
//! the one minimizing Manhattan distance to the current target, ties broken
//! by the fixed `Direction::ALL` priority order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Direction;
use crate::sim::timers::Countdown;

use super::grid::{Cell, Maze};

/// Where released agents enter the board, and where eaten agents return to.
pub const PEN_DOOR: Cell = Cell::new(19, 9);
/// Bob rows while waiting inside the pen
pub const PEN_TOP_ROW: i32 = 11;
pub const PEN_BOTTOM_ROW: i32 = 12;

const PEN_SLOTS: [Cell; 4] = [
    Cell::new(19, 11),
    Cell::new(20, 11),
    Cell::new(19, 12),
    Cell::new(20, 12),
];

const HOME_CORNERS: [Cell; 4] = [
    Cell::new(38, 1),
    Cell::new(1, 1),
    Cell::new(38, 21),
    Cell::new(1, 21),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentMode {
    /// Head for the home corner
    Scatter,
    /// Pursue the per-identity target
    Chase,
    /// Flee the player (power-pellet window)
    Frightened,
    /// Beeline back to the pen door, then re-enter the pen
    Eaten,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pursuer {
    pub identity: usize,
    pub cell: Cell,
    pub direction: Direction,
    pub mode: AgentMode,
    pub vulnerable: bool,
    pub blinking: bool,
    pub in_pen: bool,
    pub release: Countdown,
}

impl Pursuer {
    pub fn new(identity: usize) -> Self {
        let mut release = Countdown::idle();
        release.arm(PEN_RELEASE_TICKS[identity]);
        Self {
            identity,
            cell: PEN_SLOTS[identity],
            direction: Direction::Up,
            mode: AgentMode::Scatter,
            vulnerable: false,
            blinking: false,
            in_pen: true,
            release,
        }
    }

    pub fn home_corner(&self) -> Cell {
        HOME_CORNERS[self.identity]
    }

    /// Leave the pen through the door, adopting the ambient global mode.
    pub fn release_to_door(&mut self, ambient: AgentMode) {
        self.in_pen = false;
        self.cell = PEN_DOOR;
        self.direction = Direction::Up;
        self.mode = ambient;
    }

    /// Back to the pen slot with a fresh release countdown.
    pub fn pen_reset(&mut self, release_ticks: u32) {
        self.in_pen = true;
        self.cell = PEN_SLOTS[self.identity];
        self.direction = Direction::Up;
        self.mode = AgentMode::Scatter;
        self.vulnerable = false;
        self.blinking = false;
        self.release.arm(release_ticks);
    }

    /// Vertical bob between the pen rows while waiting for release.
    pub fn bob_in_pen(&mut self) {
        self.cell.y = if self.release.remaining() % 20 < 10 {
            PEN_TOP_ROW
        } else {
            PEN_BOTTOM_ROW
        };
    }

    pub fn pixel_pos(&self) -> Vec2 {
        Vec2::new(
            self.cell.x as f32 * CELL_SIZE,
            self.cell.y as f32 * CELL_SIZE,
        )
    }
}

/// Project `n` cells ahead of the player along its heading.
///
/// Heading up also shifts left by `n` when `with_quirk` is set; identity 1
/// inherits that quirk from the classic targeting table.
fn ahead_of(player_cell: Cell, heading: Direction, n: i32, with_quirk: bool) -> Cell {
    let (dx, dy) = heading.delta();
    let mut target = Cell::new(player_cell.x + dx * n, player_cell.y + dy * n);
    if with_quirk && heading == Direction::Up {
        target.x -= n;
    }
    target
}

/// Per-identity chase target.
///
/// `leader` is identity 0's cell while it is out of the pen; identity 2 falls
/// back to direct pursuit without it.
pub fn chase_target(
    maze: &Maze,
    identity: usize,
    agent_cell: Cell,
    player_cell: Cell,
    player_heading: Direction,
    leader: Option<Cell>,
) -> Cell {
    match identity {
        // Direct pursuit
        0 => player_cell,
        // Ambush four cells ahead
        1 => maze.clamp(ahead_of(player_cell, player_heading, 4, true)),
        // Double the vector from the leader through two cells ahead
        2 => match leader {
            Some(leader) => {
                let pivot = ahead_of(player_cell, player_heading, 2, false);
                maze.clamp(Cell::new(
                    pivot.x + (pivot.x - leader.x),
                    pivot.y + (pivot.y - leader.y),
                ))
            }
            None => player_cell,
        },
        // Pursue while far, retreat home when close
        _ => {
            if agent_cell.manhattan(player_cell) < 8 {
                HOME_CORNERS[identity.min(3)]
            } else {
                player_cell
            }
        }
    }
}

/// Legal neighboring moves in priority order.
///
/// Reversal is excluded unless it is the only option; walls never pass the
/// filter, so an agent can no longer path into one.
pub fn legal_moves(maze: &Maze, cell: Cell, heading: Direction) -> Vec<(Direction, Cell)> {
    let reverse = heading.opposite();
    let forward: Vec<(Direction, Cell)> = Direction::ALL
        .iter()
        .filter(|&&d| d != reverse)
        .map(|&d| (d, maze.neighbor(cell, d)))
        .filter(|(_, c)| maze.is_walkable(*c))
        .collect();
    if !forward.is_empty() {
        return forward;
    }
    Direction::ALL
        .iter()
        .map(|&d| (d, maze.neighbor(cell, d)))
        .filter(|(_, c)| maze.is_walkable(*c))
        .collect()
}

/// Move minimizing Manhattan distance to `target`.
pub fn step_toward(
    maze: &Maze,
    cell: Cell,
    heading: Direction,
    target: Cell,
) -> Option<(Direction, Cell)> {
    legal_moves(maze, cell, heading)
        .into_iter()
        .min_by_key(|(_, c)| c.manhattan(target))
}

/// Move maximizing Manhattan distance from the player (Frightened).
pub fn step_fleeing(
    maze: &Maze,
    cell: Cell,
    heading: Direction,
    player_cell: Cell,
) -> Option<(Direction, Cell)> {
    legal_moves(maze, cell, heading)
        .into_iter()
        .min_by_key(|(_, c)| -c.manhattan(player_cell))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_0_targets_player() {
        let maze = Maze::standard();
        let target = chase_target(
            &maze,
            0,
            Cell::new(5, 5),
            Cell::new(10, 9),
            Direction::Left,
            None,
        );
        assert_eq!(target, Cell::new(10, 9));
    }

    #[test]
    fn test_identity_1_leads_the_player() {
        let maze = Maze::standard();
        let target = chase_target(
            &maze,
            1,
            Cell::new(5, 5),
            Cell::new(10, 9),
            Direction::Right,
            None,
        );
        assert_eq!(target, Cell::new(14, 9));

        // The classic up-heading quirk also shifts the target left
        let target = chase_target(
            &maze,
            1,
            Cell::new(5, 5),
            Cell::new(10, 9),
            Direction::Up,
            None,
        );
        assert_eq!(target, Cell::new(6, 5));
    }

    #[test]
    fn test_identity_2_doubles_leader_vector() {
        let maze = Maze::standard();
        let target = chase_target(
            &maze,
            2,
            Cell::new(5, 5),
            Cell::new(10, 9),
            Direction::Right,
            Some(Cell::new(8, 9)),
        );
        // Pivot (12, 9); vector from leader (4, 0); doubled lands at (16, 9)
        assert_eq!(target, Cell::new(16, 9));
    }

    #[test]
    fn test_identity_2_without_leader_chases() {
        let maze = Maze::standard();
        let target = chase_target(
            &maze,
            2,
            Cell::new(5, 5),
            Cell::new(10, 9),
            Direction::Right,
            None,
        );
        assert_eq!(target, Cell::new(10, 9));
    }

    #[test]
    fn test_identity_3_retreats_when_close() {
        let maze = Maze::standard();
        let far = chase_target(
            &maze,
            3,
            Cell::new(30, 21),
            Cell::new(10, 21),
            Direction::Left,
            None,
        );
        assert_eq!(far, Cell::new(10, 21));

        let near = chase_target(
            &maze,
            3,
            Cell::new(13, 21),
            Cell::new(10, 21),
            Direction::Left,
            None,
        );
        assert_eq!(near, HOME_CORNERS[3]);
    }

    #[test]
    fn test_chase_target_is_clamped() {
        let maze = Maze::standard();
        // Player near the top heading up pushes the projection off-grid
        let target = chase_target(
            &maze,
            1,
            Cell::new(5, 5),
            Cell::new(2, 1),
            Direction::Up,
            None,
        );
        assert_eq!(target, Cell::new(0, 0));
    }

    #[test]
    fn test_legal_moves_exclude_walls_and_reversal() {
        let maze = Maze::standard();
        // (2, 4) is a straight corridor cell: walls above and below, open
        // left and right. Heading Right leaves exactly one legal move.
        let moves = legal_moves(&maze, Cell::new(2, 4), Direction::Right);
        let dirs: Vec<Direction> = moves.iter().map(|(d, _)| *d).collect();
        assert_eq!(dirs, vec![Direction::Right]);
    }

    #[test]
    fn test_no_moves_inside_pen_block() {
        let maze = Maze::standard();
        // Pen interior is walled on all sides; even reversal finds nothing
        assert!(legal_moves(&maze, Cell::new(19, 11), Direction::Up).is_empty());
        assert_eq!(step_toward(&maze, Cell::new(19, 11), Direction::Up, PEN_DOOR), None);
    }

    #[test]
    fn test_step_toward_ties_break_by_priority() {
        let maze = Maze::standard();
        // (6, 2) is a vertical corridor; heading Left leaves Up and Down
        // legal, and the target is equidistant from both. Priority order
        // puts Up first.
        let target = Cell::new(10, 2);
        let (dir, _) = step_toward(&maze, Cell::new(6, 2), Direction::Left, target).unwrap();
        assert_eq!(dir, Direction::Up);
    }

    #[test]
    fn test_step_fleeing_maximizes_distance() {
        let maze = Maze::standard();
        // (10, 4) heading Up: walls above and below leave Left and Right;
        // with the player just to the left, fleeing goes right
        let (dir, _) = step_fleeing(&maze, Cell::new(10, 4), Direction::Up, Cell::new(8, 4))
            .unwrap();
        assert_eq!(dir, Direction::Right);
    }

    #[test]
    fn test_pen_reset_rearms_release() {
        let mut agent = Pursuer::new(2);
        agent.release_to_door(AgentMode::Chase);
        assert!(!agent.in_pen);
        assert_eq!(agent.cell, PEN_DOOR);
        assert_eq!(agent.mode, AgentMode::Chase);

        agent.vulnerable = true;
        agent.pen_reset(PEN_REENTRY_TICKS);
        assert!(agent.in_pen);
        assert!(!agent.vulnerable);
        assert_eq!(agent.cell, PEN_SLOTS[2]);
        assert_eq!(agent.release.remaining(), PEN_REENTRY_TICKS);
    }
}
