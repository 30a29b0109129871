//! Region joining
//!
//! After rooms and corridors are carved, the map is a set of disconnected
//! regions. Regions whose cells already share an edge count as joined. A
//! connector is a wall cell touching at least two regions. Connectors are
//! visited in random order and carved whenever they join regions that are
//! not connected yet, until a single region remains.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::world::{Direction, Grid, MergeTable, Point, RegionIndex, Thresholds};

/// A wall cell bordering two or more regions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connector {
    pub position: Point,
    /// Distinct neighbouring region ids, sorted ascending
    pub regions: Vec<usize>,
}

/// What a merge pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Connectors discovered on the grid
    pub connectors: usize,
    /// Connectors carved to join two or more groups
    pub merged: usize,
    /// Redundant connectors carved by the random roll
    pub extra: usize,
    /// Region pairs joined without a connector because they already touch
    pub touching: usize,
    /// Groups still separate when the pass ended
    pub unjoined: usize,
}

/// Joins regions by carving connectors
#[derive(Debug, Clone)]
pub struct RegionMerger {
    random_connector_chance: f32,
}

impl RegionMerger {
    /// `random_connector_chance` is the chance of carving a connector between
    /// regions that are already joined, which adds loops to the dungeon.
    pub fn new(random_connector_chance: f32) -> Self {
        Self { random_connector_chance }
    }

    /// Find every connector on the grid interior.
    ///
    /// Connectors are listed in scan order: columns left to right, each
    /// column top to bottom.
    pub fn find_connectors(
        grid: &Grid,
        regions: &RegionIndex,
        tiles: &Thresholds,
    ) -> Vec<Connector> {
        let mut connectors = Vec::new();
        for x in 1..grid.width() - 1 {
            for y in 1..grid.height() - 1 {
                if !tiles.is_wall(grid.get(x, y)) {
                    continue;
                }
                let mut neighbors: Vec<usize> = Vec::with_capacity(4);
                for direction in Direction::ALL {
                    let (nx, ny) = direction.step(x, y, 1);
                    let region = regions.get(nx, ny);
                    if region >= 0 && !tiles.is_wall(grid.get(nx, ny)) {
                        neighbors.push(region as usize);
                    }
                }
                neighbors.sort_unstable();
                neighbors.dedup();
                if neighbors.len() > 1 {
                    connectors.push(Connector {
                        position: Point::new(x, y),
                        regions: neighbors,
                    });
                }
            }
        }
        connectors
    }

    /// Carve connectors until every region is joined or no connectors are left
    pub fn merge<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        regions: &RegionIndex,
        tiles: &Thresholds,
        rng: &mut R,
    ) -> MergeOutcome {
        debug_assert!(regions.matches(grid), "region index does not mirror the grid");
        let mut connectors = Self::find_connectors(grid, regions, tiles);
        connectors.shuffle(rng);

        let mut table = MergeTable::new(regions.region_count());
        let mut outcome = MergeOutcome {
            connectors: connectors.len(),
            unjoined: table.len(),
            ..MergeOutcome::default()
        };
        outcome.touching = join_touching(grid, regions, tiles, &mut table);
        outcome.unjoined -= outcome.touching;
        let mut representatives: Vec<usize> = Vec::with_capacity(4);

        for connector in &connectors {
            if outcome.unjoined <= 1 {
                break;
            }

            representatives.clear();
            representatives.extend(connector.regions.iter().map(|r| table.find(*r)));
            representatives.sort_unstable();
            representatives.dedup();

            if representatives.len() <= 1 {
                // Already joined; occasionally open it anyway
                if rng.gen::<f32>() < self.random_connector_chance {
                    carve_connector(grid, tiles, connector.position);
                    outcome.extra += 1;
                }
                continue;
            }

            carve_connector(grid, tiles, connector.position);
            outcome.merged += 1;
            let target = representatives[0];
            for other in &representatives[1..] {
                table.union(target, *other);
            }
            outcome.unjoined -= representatives.len() - 1;
        }

        log::debug!(
            "Merged regions through {} of {} connectors ({} extra, {} touching), {} groups left",
            outcome.merged,
            outcome.connectors,
            outcome.extra,
            outcome.touching,
            outcome.unjoined
        );
        outcome
    }
}

/// Union regions whose open cells are edge neighbours. Returns the unions made.
fn join_touching(
    grid: &Grid,
    regions: &RegionIndex,
    tiles: &Thresholds,
    table: &mut MergeTable,
) -> usize {
    let mut joined = 0;
    for (x, y, value) in grid.iter() {
        let region = regions.get(x, y);
        if region < 0 || tiles.is_wall(value) {
            continue;
        }
        for (nx, ny) in [(x + 1, y), (x, y + 1)] {
            let other = regions.get(nx, ny);
            let open = grid.try_get(nx, ny).is_some_and(|v| !tiles.is_wall(v));
            if other < 0 || other == region || !open {
                continue;
            }
            if table.union(region as usize, other as usize) {
                joined += 1;
            }
        }
    }
    joined
}

fn carve_connector(grid: &mut Grid, tiles: &Thresholds, position: Point) {
    grid.set(position.x, position.y, tiles.corridor);
}
