//! Dead end removal
//!
//! A dead end is an open cell with at least three closed sides (walls or
//! the map edge). Each pass walls up every tracked dead end and follows the
//! corridor it belonged to, so a dangling corridor shrinks by one cell per
//! pass until it reaches a junction or a room.

use crate::world::{Direction, Grid, Point, Thresholds};

/// What a pruning run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneOutcome {
    /// Passes performed over the tracked dead ends
    pub passes: usize,
    /// Cells turned into walls
    pub walled: usize,
    /// Dead ends still tracked when the pass budget ran out
    pub remaining: usize,
}

/// Removes corridor stubs leading nowhere
#[derive(Debug, Clone)]
pub struct DeadEndPruner {
    iterations: i32,
    dead_ends: Vec<Point>,
}

impl DeadEndPruner {
    /// `iterations` bounds the number of passes; zero or less keeps all dead ends
    pub fn new(iterations: i32) -> Self {
        Self {
            iterations,
            dead_ends: Vec::new(),
        }
    }

    /// Check if the cell is open with three or more closed sides
    pub fn is_dead_end(grid: &Grid, tiles: &Thresholds, x: i32, y: i32) -> bool {
        if !grid.is_valid(x, y) || tiles.is_wall(grid.get(x, y)) {
            return false;
        }
        let closed = Direction::ALL
            .iter()
            .map(|d| d.step(x, y, 1))
            .filter(|(nx, ny)| grid.try_get(*nx, *ny).map_or(true, |v| tiles.is_wall(v)))
            .count();
        closed >= 3
    }

    pub fn prune(&mut self, grid: &mut Grid, tiles: &Thresholds) -> PruneOutcome {
        let mut outcome = PruneOutcome::default();
        if self.iterations <= 0 {
            return outcome;
        }

        self.dead_ends.clear();
        for x in 0..grid.width() {
            for y in 0..grid.height() {
                if Self::is_dead_end(grid, tiles, x, y) {
                    self.dead_ends.push(Point::new(x, y));
                }
            }
        }

        while outcome.passes < self.iterations as usize && !self.dead_ends.is_empty() {
            self.dead_ends.retain_mut(|dead_end| {
                // Two chains can meet in the same cell
                if !tiles.is_wall(grid.get(dead_end.x, dead_end.y)) {
                    outcome.walled += 1;
                }
                grid.set(dead_end.x, dead_end.y, tiles.wall);
                match single_dead_end_neighbor(grid, tiles, *dead_end) {
                    Some(next) => {
                        *dead_end = next;
                        true
                    }
                    None => false,
                }
            });
            outcome.passes += 1;
        }

        outcome.remaining = self.dead_ends.len();
        self.dead_ends.clear();
        log::debug!("Walled {} dead end cells in {} passes", outcome.walled, outcome.passes);
        outcome
    }
}

/// The neighbour that became a dead end, if there is exactly one
fn single_dead_end_neighbor(grid: &Grid, tiles: &Thresholds, cell: Point) -> Option<Point> {
    let mut found = None;
    for direction in Direction::ALL {
        let neighbor = cell.neighbor(direction, 1);
        if DeadEndPruner::is_dead_end(grid, tiles, neighbor.x, neighbor.y) {
            if found.is_some() {
                return None;
            }
            found = Some(neighbor);
        }
    }
    found
}
