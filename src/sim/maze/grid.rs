//! Maze grid and pellet inventory
//!
//! The maze is a static embedded constant, rectangular, with tunnel cells at
//! the row edges wrapping horizontally. Pellets are tracked separately from
//! the grid so collection never mutates the layout.

use serde::{Deserialize, Serialize};

use crate::sim::Direction;

pub const MAZE_WIDTH: i32 = 40;
pub const MAZE_HEIGHT: i32 = 23;

/// Level layout: `#` wall, `.` pellet, `o` power pellet, space empty floor.
///
/// The 4-cell block at (19..=20, 11..=12) is the holding pen; penned agents
/// sit on those cells but are excluded from movement and collision until
/// released through the door at (19, 9).
const LAYOUT: [&str; MAZE_HEIGHT as usize] = [
    "########################################",
    "#..................##..................#",
    "#.####.#####.#####.##.#####.#####.####.#",
    "#o####.#####.#####.##.#####.#####.####o#",
    "#......................................#",
    "#.####.##.####################.##.####.#",
    "#......##..........##..........##......#",
    "######.#####.#####.##.#####.#####.######",
    "######.#####.#####.##.#####.#####.######",
    "######.##......................##.######",
    "######.##.####################.##.######",
    "..........####################..........",
    "######.##.####################.##.######",
    "######.##......................##.######",
    "######.#####.#####.##.#####.#####.######",
    "#..................##..................#",
    "#.####.#####.#####.##.#####.#####.####.#",
    "#o..##............................##..o#",
    "###.##.##.####################.##.##.###",
    "#......##..........##..........##......#",
    "#.##########.#####.##.#####.#####.####.#",
    "#......................................#",
    "########################################",
];

/// Power-pellet placements cycled by `level % 4`. Positions that land on a
/// wall are skipped, so some levels carry fewer power pellets.
const POWER_VARIANTS: [[(i32, i32); 4]; 4] = [
    [(1, 3), (38, 3), (1, 17), (38, 17)],
    [(1, 1), (38, 1), (1, 21), (38, 21)],
    [(1, 5), (38, 5), (1, 15), (38, 15)],
    [(3, 3), (36, 3), (3, 17), (36, 17)],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Wall,
    Empty,
    Pellet,
    PowerPellet,
}

/// Grid coordinates; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: Cell) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pellet {
    pub cell: Cell,
    pub is_power: bool,
    pub collected: bool,
}

/// Static level grid. Regenerated (with a power-pellet variant) on level
/// completion; never mutated during play.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Maze {
    cells: Vec<CellKind>,
}

impl Maze {
    pub fn standard() -> Self {
        let cells = LAYOUT
            .iter()
            .flat_map(|row| row.chars())
            .map(|c| match c {
                '#' => CellKind::Wall,
                'o' => CellKind::PowerPellet,
                '.' => CellKind::Pellet,
                _ => CellKind::Empty,
            })
            .collect();
        Self { cells }
    }

    /// Wrap a column index through the tunnel.
    pub fn wrap_x(&self, x: i32) -> i32 {
        x.rem_euclid(MAZE_WIDTH)
    }

    /// Cell kind with tunnel wrapping; anything outside the rows is a Wall.
    pub fn kind(&self, cell: Cell) -> CellKind {
        if cell.y < 0 || cell.y >= MAZE_HEIGHT {
            return CellKind::Wall;
        }
        let x = self.wrap_x(cell.x);
        self.cells[(cell.y * MAZE_WIDTH + x) as usize]
    }

    pub fn is_walkable(&self, cell: Cell) -> bool {
        self.kind(cell) != CellKind::Wall
    }

    /// Neighboring cell in `direction`, tunnel-wrapped.
    pub fn neighbor(&self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        Cell::new(self.wrap_x(cell.x + dx), cell.y + dy)
    }

    /// Clamp a (possibly projected) target back into the grid bounds.
    pub fn clamp(&self, cell: Cell) -> Cell {
        Cell::new(
            cell.x.clamp(0, MAZE_WIDTH - 1),
            cell.y.clamp(0, MAZE_HEIGHT - 1),
        )
    }

    /// Fresh pellet inventory: one pellet per non-wall floor cell.
    pub fn pellets(&self) -> Vec<Pellet> {
        let mut pellets = Vec::new();
        for y in 0..MAZE_HEIGHT {
            for x in 0..MAZE_WIDTH {
                let cell = Cell::new(x, y);
                match self.kind(cell) {
                    CellKind::Pellet => pellets.push(Pellet {
                        cell,
                        is_power: false,
                        collected: false,
                    }),
                    CellKind::PowerPellet => pellets.push(Pellet {
                        cell,
                        is_power: true,
                        collected: false,
                    }),
                    CellKind::Wall | CellKind::Empty => {}
                }
            }
        }
        pellets
    }
}

/// Re-seat the power pellets for `level`, leaving collection flags alone.
pub fn apply_power_variant(pellets: &mut [Pellet], level: u32) {
    let variant = &POWER_VARIANTS[(level % 4) as usize];
    for pellet in pellets.iter_mut() {
        pellet.is_power = false;
    }
    for &(x, y) in variant {
        let cell = Cell::new(x, y);
        if let Some(pellet) = pellets.iter_mut().find(|p| p.cell == cell) {
            pellet.is_power = true;
        }
    }
}
