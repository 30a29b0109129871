//! Room placement
//!
//! Rooms are rejection-sampled: each attempt rolls a random rectangle and
//! keeps it only if it overlaps none of the rooms placed so far.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::styles::{carve_styled, RoomStyle};
use crate::error::GenerationError;
use crate::world::{Grid, RegionIndex, Thresholds};

/// A rectangular room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Check if the two rectangles share at least one cell
    pub fn overlaps(&self, other: &Room) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// Check if a cell lies inside the rectangle
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Center cell (rounded towards the origin)
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Fill every cell of the rectangle
    pub fn fill(&self, grid: &mut Grid, value: f32) {
        for x in self.x..self.x + self.width {
            for y in self.y..self.y + self.height {
                grid.set(x, y, value);
            }
        }
    }

    /// Assign the carved cells of the rectangle to `region`.
    ///
    /// Cells a room style left as walls stay unassigned, so corridors can
    /// still reach them.
    pub fn fill_region(
        &self,
        grid: &Grid,
        tiles: &Thresholds,
        regions: &mut RegionIndex,
        region: i32,
    ) {
        for x in self.x..self.x + self.width {
            for y in self.y..self.y + self.height {
                if !tiles.is_wall(grid.get(x, y)) {
                    regions.set(x, y, region);
                }
            }
        }
    }
}

/// Room size and shape settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomSettings {
    /// Minimum width and height
    pub min_room_size: i32,
    /// Maximum width and height
    pub max_room_size: i32,
    /// Maximum difference between a room's width and height
    pub tolerance: i32,
    /// Stop placing rooms after this many. Zero or less means no limit.
    pub max_rooms_amount: i32,
    /// Weighted room shapes. Empty means plain rectangles.
    pub styles: Vec<RoomStyle>,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            min_room_size: 3,
            max_room_size: 7,
            tolerance: 2,
            max_rooms_amount: 0,
            styles: Vec::new(),
        }
    }
}

impl RoomSettings {
    /// Check the settings against a grid before anything is carved
    pub fn validate(
        &self,
        grid: &Grid,
        normalization: Normalization,
    ) -> Result<(), GenerationError> {
        let (min, max) = (self.min_room_size, self.max_room_size);
        if min <= 0 || min > max {
            return Err(GenerationError::InvalidRoomSizeRange { min, max });
        }
        if self.tolerance < 0 {
            return Err(GenerationError::NegativeTolerance(self.tolerance));
        }
        if normalization == Normalization::OddLattice && (min % 2 == 0 || max % 2 == 0) {
            return Err(GenerationError::EvenRoomSize { min, max });
        }
        if max >= grid.width() || max >= grid.height() {
            return Err(GenerationError::RoomTooLarge {
                max_room_size: max,
                width: grid.width(),
                height: grid.height(),
            });
        }
        Ok(())
    }

    /// Number of attempts used when none is configured
    pub fn default_attempts(&self, grid: &Grid) -> i32 {
        (grid.width() / self.max_room_size) * (grid.height() / self.max_room_size)
    }
}

/// How sampled sizes and positions are adjusted before use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Values are used as rolled
    #[default]
    Identity,
    /// Positions and sizes are forced odd so rooms line up with the maze lattice
    OddLattice,
}

impl Normalization {
    pub fn position(self, position: i32) -> i32 {
        match self {
            Normalization::Identity => position,
            Normalization::OddLattice => {
                if position == 0 {
                    1
                } else if position % 2 == 0 {
                    position - 1
                } else {
                    position
                }
            }
        }
    }

    /// Adjust a size rolled from `min..=max`, keeping it in that range
    pub fn size<R: Rng + ?Sized>(self, size: i32, min: i32, max: i32, rng: &mut R) -> i32 {
        match self {
            Normalization::Identity => size,
            Normalization::OddLattice => {
                if size % 2 != 0 {
                    return size;
                }
                let (picked, other) = if rng.gen_bool(0.5) {
                    (size - 1, size + 1)
                } else {
                    (size + 1, size - 1)
                };
                if picked >= min && picked <= max {
                    picked
                } else {
                    debug_assert!(other >= min && other <= max);
                    other
                }
            }
        }
    }
}

/// Places non-overlapping rooms on a grid
pub struct RoomPlacer<'a> {
    settings: &'a RoomSettings,
    normalization: Normalization,
}

impl<'a> RoomPlacer<'a> {
    /// Settings must have passed [`RoomSettings::validate`] for the target grid
    pub fn new(settings: &'a RoomSettings, normalization: Normalization) -> Self {
        Self { settings, normalization }
    }

    fn random_size<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        let (min, max) = (self.settings.min_room_size, self.settings.max_room_size);
        let size = if min == max { min } else { rng.gen_range(min..=max) };
        self.normalization.size(size, min, max, rng)
    }

    /// Roll a size within tolerance of `bound`
    fn random_size_near<R: Rng + ?Sized>(&self, bound: i32, rng: &mut R) -> i32 {
        let min = self.settings.min_room_size.max(bound - self.settings.tolerance);
        let max = self.settings.max_room_size.min(bound + self.settings.tolerance);
        let size = rng.gen_range(min..=max);
        self.normalization.size(size, min, max, rng)
    }

    /// Roll a random room that fits in the grid
    pub fn random_room<R: Rng + ?Sized>(&self, grid: &Grid, rng: &mut R) -> Room {
        let width = self.random_size(rng);
        let height = self.random_size_near(width, rng);
        debug_assert!(width < grid.width() && height < grid.height());
        let x = self.normalization.position(rng.gen_range(0..grid.width() - width));
        let y = self.normalization.position(rng.gen_range(0..grid.height() - height));
        Room::new(x, y, width, height)
    }

    /// Try `attempts` times to place a room, carving accepted rooms with the
    /// floor value and giving each one a new region.
    ///
    /// Returns the number of rooms placed by this call.
    pub fn place_rooms<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        regions: &mut RegionIndex,
        rooms: &mut Vec<Room>,
        attempts: i32,
        tiles: &Thresholds,
        rng: &mut R,
    ) -> usize {
        debug_assert!(regions.matches(grid), "region index does not mirror the grid");
        let max_rooms = self.settings.max_rooms_amount;
        let before = rooms.len();

        for _ in 0..attempts {
            if max_rooms > 0 && rooms.len() >= max_rooms as usize {
                break;
            }

            let room = self.random_room(grid, rng);
            if rooms.iter().any(|r| r.overlaps(&room)) {
                continue;
            }

            carve_styled(&self.settings.styles, &room, grid, tiles.floor, rng);
            let region = regions.next_region();
            room.fill_region(grid, tiles, regions, region);
            rooms.push(room);
        }

        let placed = rooms.len() - before;
        log::debug!("Placed {} rooms in {} attempts", placed, attempts);
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::generation::RoomShape;
    use crate::world::UNASSIGNED;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_overlap() {
        let a = Room::new(1, 1, 3, 3);
        assert!(a.overlaps(&Room::new(3, 3, 3, 3)));
        assert!(!a.overlaps(&Room::new(4, 1, 3, 3)));
        assert!(!a.overlaps(&Room::new(1, 4, 3, 3)));
        assert!(a.overlaps(&Room::new(0, 0, 9, 9)));
    }

    #[test]
    fn test_room_geometry() {
        let room = Room::new(2, 3, 5, 3);
        assert!(room.contains(6, 5));
        assert!(!room.contains(7, 5));
        assert_eq!(room.center(), (4, 4));
    }

    #[test]
    fn test_region_skips_uncarved_cells() {
        let tiles = Thresholds::default();
        let mut grid = Grid::filled(tiles.wall, 7, 7);
        let mut regions = RegionIndex::for_grid(&grid);
        let room = Room::new(1, 1, 5, 5);
        RoomShape::Diamond.carve(&room, &mut grid, tiles.floor);
        let region = regions.next_region();
        room.fill_region(&grid, &tiles, &mut regions, region);

        assert_eq!(regions.get(3, 3), region);
        assert_eq!(regions.get(3, 1), region);
        // Cut-off corner
        assert_eq!(grid.get(1, 1), tiles.wall);
        assert_eq!(regions.get(1, 1), UNASSIGNED);
    }

    #[test]
    fn test_odd_position() {
        let odd = Normalization::OddLattice;
        assert_eq!(odd.position(0), 1);
        assert_eq!(odd.position(1), 1);
        assert_eq!(odd.position(4), 3);
        assert_eq!(odd.position(7), 7);
        assert_eq!(Normalization::Identity.position(4), 4);
    }

    #[test]
    fn test_odd_size_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            assert_eq!(Normalization::OddLattice.size(4, 4, 6, &mut rng), 5);
            let size = Normalization::OddLattice.size(6, 3, 7, &mut rng);
            assert!(size == 5 || size == 7);
        }
    }

    #[test]
    fn test_validate() {
        let grid = Grid::new(21, 15);
        let settings = RoomSettings::default();
        assert!(settings.validate(&grid, Normalization::OddLattice).is_ok());

        let even = RoomSettings { min_room_size: 4, ..RoomSettings::default() };
        assert_eq!(
            even.validate(&grid, Normalization::OddLattice),
            Err(GenerationError::EvenRoomSize { min: 4, max: 7 })
        );
        assert!(even.validate(&grid, Normalization::Identity).is_ok());

        let inverted = RoomSettings {
            min_room_size: 9,
            max_room_size: 7,
            ..RoomSettings::default()
        };
        assert!(matches!(
            inverted.validate(&grid, Normalization::Identity),
            Err(GenerationError::InvalidRoomSizeRange { .. })
        ));

        let huge = RoomSettings { max_room_size: 15, ..RoomSettings::default() };
        assert!(matches!(
            huge.validate(&grid, Normalization::OddLattice),
            Err(GenerationError::RoomTooLarge { .. })
        ));
    }

    #[test]
    fn test_default_attempts() {
        let grid = Grid::new(50, 30);
        assert_eq!(RoomSettings::default().default_attempts(&grid), 7 * 4);
    }

    #[test]
    fn test_placed_rooms_do_not_overlap() {
        let mut rng = StdRng::seed_from_u64(42);
        let settings = RoomSettings {
            min_room_size: 3,
            max_room_size: 9,
            tolerance: 3,
            ..RoomSettings::default()
        };
        let mut grid = Grid::filled(1.0, 61, 41);
        let mut regions = RegionIndex::for_grid(&grid);
        let mut rooms = Vec::new();
        let placer = RoomPlacer::new(&settings, Normalization::OddLattice);
        let tiles = Thresholds::default();
        let placed = placer.place_rooms(&mut grid, &mut regions, &mut rooms, 200, &tiles, &mut rng);

        assert!(placed > 0);
        assert_eq!(regions.region_count(), placed);
        for (i, a) in rooms.iter().enumerate() {
            assert!(a.width % 2 == 1 && a.height % 2 == 1);
            assert!(a.x % 2 == 1 && a.y % 2 == 1);
            assert!((a.width - a.height).abs() <= settings.tolerance);
            assert!(a.width >= 3 && a.width <= 9 && a.height >= 3 && a.height <= 9);
            assert!(a.x + a.width <= grid.width() && a.y + a.height <= grid.height());
            for b in rooms.iter().skip(i + 1) {
                assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
            }
            assert_eq!(regions.get(a.x, a.y), i as i32);
            assert_eq!(grid.get(a.x, a.y), 0.5);
        }
    }

    #[test]
    fn test_max_rooms_amount() {
        let mut rng = StdRng::seed_from_u64(5);
        let settings = RoomSettings { max_rooms_amount: 2, ..RoomSettings::default() };
        let mut grid = Grid::filled(1.0, 81, 81);
        let mut regions = RegionIndex::for_grid(&grid);
        let mut rooms = Vec::new();
        let placer = RoomPlacer::new(&settings, Normalization::OddLattice);
        let tiles = Thresholds::default();
        placer.place_rooms(&mut grid, &mut regions, &mut rooms, 500, &tiles, &mut rng);
        assert_eq!(rooms.len(), 2);
    }
}
