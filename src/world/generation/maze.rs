//! Maze corridors
//!
//! Every wall cell on the odd lattice that is still uncarved starts a new
//! corridor walk. A walk moves two cells at a time, carving the cell it jumps
//! over, and stops as soon as no uncarved lattice cell is reachable. Walks
//! never cross each other or a room, so each one becomes its own region.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::world::{Direction, Grid, Point, RegionIndex, Thresholds, UNASSIGNED};

/// Carves winding corridors into the uncarved parts of a grid
#[derive(Debug, Clone)]
pub struct MazeCarver {
    winding_chance: f32,
    /// Reused between steps
    directions: Vec<Direction>,
}

impl MazeCarver {
    /// `winding_chance` is the chance of leaving a straight corridor even
    /// when it could continue. 0 only turns at obstacles, 1 turns at random.
    pub fn new(winding_chance: f32) -> Self {
        Self {
            winding_chance,
            directions: Vec::with_capacity(Direction::ALL.len()),
        }
    }

    /// Fill every uncarved lattice cell with corridors.
    ///
    /// Returns the number of walks (and so regions) created.
    pub fn carve<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        regions: &mut RegionIndex,
        tiles: &Thresholds,
        rng: &mut R,
    ) -> usize {
        debug_assert!(regions.matches(grid), "region index does not mirror the grid");
        let mut walks = 0;
        for x in (1..grid.width()).step_by(2) {
            for y in (1..grid.height()).step_by(2) {
                if is_uncarved(grid, regions, tiles, Point::new(x, y)) {
                    self.walk(grid, regions, tiles, Point::new(x, y), rng);
                    walks += 1;
                }
            }
        }
        self.directions.clear();
        log::debug!("Carved {} corridor walks", walks);
        walks
    }

    fn walk<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        regions: &mut RegionIndex,
        tiles: &Thresholds,
        mut cursor: Point,
        rng: &mut R,
    ) {
        let region = regions.next_region();
        let mut last_direction: Option<Direction> = None;

        loop {
            carve_cell(grid, regions, tiles, cursor, region);

            self.directions.clear();
            for direction in Direction::ALL {
                if is_carveable(grid, regions, tiles, cursor, direction) {
                    self.directions.push(direction);
                }
            }

            let direction = match last_direction {
                Some(last)
                    if self.directions.contains(&last) && rng.gen::<f32>() > self.winding_chance =>
                {
                    last
                }
                _ => match self.directions.choose(rng) {
                    Some(direction) => *direction,
                    None => return,
                },
            };
            last_direction = Some(direction);

            // The cell between two lattice cells
            cursor.advance(direction);
            carve_cell(grid, regions, tiles, cursor, region);
            cursor.advance(direction);
        }
    }
}

fn carve_cell(
    grid: &mut Grid,
    regions: &mut RegionIndex,
    tiles: &Thresholds,
    cell: Point,
    region: i32,
) {
    grid.set(cell.x, cell.y, tiles.corridor);
    regions.set(cell.x, cell.y, region);
}

/// A wall cell that belongs to no room or corridor yet
fn is_uncarved(grid: &Grid, regions: &RegionIndex, tiles: &Thresholds, cell: Point) -> bool {
    grid.is_valid(cell.x, cell.y)
        && tiles.is_wall(grid.get(cell.x, cell.y))
        && regions.get(cell.x, cell.y) == UNASSIGNED
}

/// Both the lattice cell two steps away and the cell in between must be uncarved
fn is_carveable(
    grid: &Grid,
    regions: &RegionIndex,
    tiles: &Thresholds,
    cell: Point,
    direction: Direction,
) -> bool {
    is_uncarved(grid, regions, tiles, cell.neighbor(direction, 2))
        && is_uncarved(grid, regions, tiles, cell.neighbor(direction, 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::generation::{Room, RoomShape};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn carve_empty(width: i32, height: i32, winding: f32, seed: u64) -> (Grid, RegionIndex, usize) {
        let tiles = Thresholds::default();
        let mut grid = Grid::filled(tiles.wall, width, height);
        let mut regions = RegionIndex::for_grid(&grid);
        let mut rng = StdRng::seed_from_u64(seed);
        let walks = MazeCarver::new(winding).carve(&mut grid, &mut regions, &tiles, &mut rng);
        (grid, regions, walks)
    }

    #[test]
    fn test_every_lattice_cell_carved() {
        let (grid, regions, walks) = carve_empty(21, 15, 0.3, 7);
        assert!(walks >= 1);
        assert_eq!(regions.region_count(), walks);
        for x in (1..21).step_by(2) {
            for y in (1..15).step_by(2) {
                assert_eq!(grid.get(x, y), 0.0, "lattice cell ({}, {}) left as wall", x, y);
                assert!(regions.get(x, y) >= 0);
            }
        }
    }

    #[test]
    fn test_even_cells_stay_walls() {
        let (grid, _, _) = carve_empty(21, 15, 0.5, 9);
        for (x, y, value) in grid.iter() {
            if x % 2 == 0 && y % 2 == 0 {
                assert_eq!(value, 1.0, "({}, {}) should never be carved", x, y);
            }
        }
    }

    #[test]
    fn test_border_untouched_on_odd_grid() {
        let (grid, _, _) = carve_empty(15, 11, 0.15, 1);
        for (x, y, value) in grid.iter() {
            if x == 0 || y == 0 || x == 14 || y == 10 {
                assert_eq!(value, 1.0);
            }
        }
    }

    #[test]
    fn test_single_cell_lattice() {
        // A 3x3 grid has one lattice cell and nowhere to go
        let (grid, regions, walks) = carve_empty(3, 3, 0.15, 0);
        assert_eq!(walks, 1);
        assert_eq!(grid.count(|v| v == 0.0), 1);
        assert_eq!(regions.get(1, 1), 0);
    }

    #[test]
    fn test_walk_cells_share_region() {
        let (grid, regions, _) = carve_empty(31, 31, 0.15, 4);
        // Neighbouring carved cells in one walk always share a region, so every carved
        // cell must have at least one carved neighbour from the same region (or be alone).
        for (x, y, value) in grid.iter() {
            if value != 0.0 {
                continue;
            }
            let region = regions.get(x, y);
            let carved_neighbors: Vec<_> = Direction::ALL
                .iter()
                .map(|d| d.step(x, y, 1))
                .filter(|(nx, ny)| grid.try_get(*nx, *ny) == Some(0.0))
                .collect();
            if !carved_neighbors.is_empty() {
                assert!(carved_neighbors.iter().any(|(nx, ny)| regions.get(*nx, *ny) == region));
            }
        }
    }

    #[test]
    fn test_walks_keep_out_of_rooms() {
        let tiles = Thresholds::default();
        let mut grid = Grid::filled(tiles.wall, 11, 11);
        let mut regions = RegionIndex::for_grid(&grid);
        let room = Room::new(3, 3, 5, 5);
        RoomShape::Diamond.carve(&room, &mut grid, tiles.floor);
        let region = regions.next_region();
        room.fill_region(&grid, &tiles, &mut regions, region);
        let floor: Vec<_> = grid.iter().filter(|(_, _, v)| *v == tiles.floor).collect();

        let mut rng = StdRng::seed_from_u64(3);
        MazeCarver::new(0.5).carve(&mut grid, &mut regions, &tiles, &mut rng);

        for &(x, y, _) in &floor {
            assert_eq!(grid.get(x, y), tiles.floor, "room cell ({}, {}) overwritten", x, y);
            assert_eq!(regions.get(x, y), region);
        }
        // Corners the diamond left as walls are ordinary lattice cells
        for (x, y) in [(3, 3), (7, 3), (3, 7), (7, 7)] {
            assert_eq!(grid.get(x, y), tiles.corridor);
            assert_ne!(regions.get(x, y), region);
        }
    }

    #[test]
    fn test_walks_never_jump_over_floor() {
        let tiles = Thresholds::default();
        let mut grid = Grid::filled(tiles.wall, 9, 9);
        let mut regions = RegionIndex::for_grid(&grid);
        for x in [2, 4, 6] {
            grid.set(x, 3, tiles.floor);
            regions.set(x, 3, 0);
        }
        regions.next_region();

        for seed in 0..8 {
            let mut carved = grid.clone();
            let mut carved_regions = regions.clone();
            let mut rng = StdRng::seed_from_u64(seed);
            MazeCarver::new(0.0).carve(&mut carved, &mut carved_regions, &tiles, &mut rng);
            for x in [2, 4, 6] {
                assert_eq!(carved.get(x, 3), tiles.floor, "seed {}", seed);
                assert_eq!(carved_regions.get(x, 3), 0, "seed {}", seed);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let (a, _, _) = carve_empty(41, 25, 0.4, 99);
        let (b, _, _) = carve_empty(41, 25, 0.4, 99);
        assert_eq!(a, b);
    }
}
