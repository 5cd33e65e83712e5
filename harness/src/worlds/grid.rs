//! `GridMaze`: 4-connected maze parsed from ASCII.
//!
//! `S` marks the start, `G` the goal, `#` a wall; any other character is
//! open floor. Moves cost 1 and the estimate is the Manhattan distance.
//! The graph has cycles, so unbounded depth-first algorithms only stop on a
//! budget.

use thicket_kernel::functor::{
    CostFunction, Expansion, Heuristic, NodeGenerator, NodeIsState, Path,
};

use crate::contract::{SearchWorldV1, WorldError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMaze {
    width: usize,
    height: usize,
    walls: Vec<bool>,
    start: Cell,
    goal: Cell,
}

impl GridMaze {
    /// Parse a rectangular maze, one row per line.
    ///
    /// # Errors
    ///
    /// [`WorldError::Invalid`] for an empty or ragged grid;
    /// [`WorldError::Marker`] unless `S` and `G` each appear once.
    pub fn parse(text: &str) -> Result<Self, WorldError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let width = rows.first().map_or(0, |r| r.chars().count());
        if width == 0 {
            return Err(WorldError::Invalid {
                detail: "empty grid".into(),
            });
        }
        if let Some(bad) = rows.iter().position(|r| r.chars().count() != width) {
            return Err(WorldError::Invalid {
                detail: format!("row {bad} is not {width} cells wide"),
            });
        }

        let mut walls = Vec::with_capacity(width * rows.len());
        let mut starts = Vec::new();
        let mut goals = Vec::new();
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    'S' => starts.push(Cell { row, col }),
                    'G' => goals.push(Cell { row, col }),
                    _ => {}
                }
                walls.push(ch == '#');
            }
        }
        let start = single('S', &starts)?;
        let goal = single('G', &goals)?;
        Ok(Self {
            width,
            height: rows.len(),
            walls,
            start,
            goal,
        })
    }

    #[must_use]
    pub fn start(&self) -> Cell {
        self.start
    }

    #[must_use]
    pub fn goal(&self) -> Cell {
        self.goal
    }

    #[must_use]
    pub fn is_open(&self, cell: Cell) -> bool {
        cell.row < self.height
            && cell.col < self.width
            && !self.walls[cell.row * self.width + cell.col]
    }

    /// Open neighbors in the order up, right, down, left.
    #[must_use]
    pub fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        let Cell { row, col } = cell;
        [
            row.checked_sub(1).map(|row| Cell { row, col }),
            Some(Cell { row, col: col + 1 }),
            Some(Cell { row: row + 1, col }),
            col.checked_sub(1).map(|col| Cell { row, col }),
        ]
        .into_iter()
        .flatten()
        .filter(|c| self.is_open(*c))
        .collect()
    }
}

fn single(marker: char, found: &[Cell]) -> Result<Cell, WorldError> {
    match found {
        [one] => Ok(*one),
        _ => Err(WorldError::Marker {
            marker,
            found: found.len(),
        }),
    }
}

impl NodeIsState for GridMaze {}

impl NodeGenerator<Cell> for GridMaze {
    fn expand(&self, path: &Path<'_, Cell>) -> Expansion<Cell> {
        self.neighbors(*path.node()).into()
    }

    fn is_goal(&self, path: &Path<'_, Cell>) -> bool {
        *path.node() == self.goal
    }
}

impl CostFunction<Cell, u64> for GridMaze {
    fn transition_cost(&self, _from: &Cell, _to: &Cell) -> u64 {
        1
    }
}

impl Heuristic<Cell, u64> for GridMaze {
    fn estimate(&self, node: &Cell) -> u64 {
        (node.row.abs_diff(self.goal.row) + node.col.abs_diff(self.goal.col)) as u64
    }
}

impl SearchWorldV1<Cell> for GridMaze {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "grid"
    }

    fn root(&self) -> Cell {
        self.start
    }

    fn render(&self, node: &Cell) -> String {
        format!("r{}c{}", node.row, node.col)
    }
}
