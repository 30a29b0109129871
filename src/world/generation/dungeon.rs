//! Rooms and mazes dungeon generator
//!
//! Rooms are scattered first, the space between them is filled with maze
//! corridors, regions are joined through connectors and finally corridor
//! stubs that lead nowhere are filled back in.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::connectors::RegionMerger;
use super::dead_ends::DeadEndPruner;
use super::maze::MazeCarver;
use super::rooms::{Normalization, Room, RoomPlacer, RoomSettings};
use crate::error::GenerationError;
use crate::world::{Grid, RegionIndex, Thresholds};

/// Dungeon generation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    pub rooms: RoomSettings,
    /// Room sampling budget. Zero or less derives it from the grid size.
    pub room_generation_attempts: i32,
    pub tiles: Thresholds,
    /// Chance to leave a straight corridor when it could continue
    pub winding_chance: f32,
    /// Chance to open a connector between regions that are already joined
    pub random_connector_chance: f32,
    /// Maximum dead end removal passes. Zero or less keeps all dead ends.
    pub dead_end_removal_iterations: i32,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            rooms: RoomSettings::default(),
            room_generation_attempts: 0,
            tiles: Thresholds::default(),
            winding_chance: 0.15,
            random_connector_chance: 0.01,
            dead_end_removal_iterations: i32::MAX,
        }
    }
}

/// Stage a generator is currently in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Reset,
    PlacingRooms,
    CarvingMaze,
    MergingRegions,
    PruningDeadEnds,
}

/// Result of one dungeon generation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DungeonLayout {
    /// Rooms in placement order
    pub rooms: Vec<Room>,
    /// Regions created by rooms and corridor walks
    pub region_count: usize,
    /// Connectors found between regions
    pub connectors: usize,
    /// Connectors carved to join regions
    pub merged_connectors: usize,
    /// Connectors carved between regions that were already joined
    pub extra_connectors: usize,
    /// Groups of regions left separate (1 for a connected dungeon)
    pub unjoined_regions: usize,
    pub pruning_passes: usize,
    pub pruned_cells: usize,
}

/// Generates rooms and mazes dungeons.
///
/// `generate` borrows the generator mutably, so one instance never runs two
/// generations at once. Create one generator per thread for parallel use.
#[derive(Debug, Clone, Default)]
pub struct DungeonGenerator {
    config: DungeonConfig,
    phase: Phase,
    rooms: Vec<Room>,
    /// Kept between runs to reuse the allocation
    regions: Option<RegionIndex>,
}

impl DungeonGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DungeonConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut DungeonConfig {
        &mut self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Generate a dungeon into `grid`, overwriting all of its cells.
    ///
    /// Settings are checked first; on error the grid is left untouched.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
    ) -> Result<DungeonLayout, GenerationError> {
        self.config.rooms.validate(grid, Normalization::OddLattice)?;
        let tiles = self.config.tiles;
        if !tiles.is_ordered() {
            log::warn!(
                "Wall value {} is not above floor {} and corridor {}, carving may misbehave",
                tiles.wall,
                tiles.floor,
                tiles.corridor
            );
        }

        self.reset();
        let mut regions = match self.regions.take() {
            Some(mut regions) if regions.matches(grid) => {
                regions.clear();
                regions
            }
            _ => RegionIndex::for_grid(grid),
        };
        grid.fill(tiles.wall);

        self.enter(Phase::PlacingRooms);
        let attempts = if self.config.room_generation_attempts > 0 {
            self.config.room_generation_attempts
        } else {
            self.config.rooms.default_attempts(grid)
        };
        RoomPlacer::new(&self.config.rooms, Normalization::OddLattice).place_rooms(
            grid,
            &mut regions,
            &mut self.rooms,
            attempts,
            &tiles,
            rng,
        );

        self.enter(Phase::CarvingMaze);
        MazeCarver::new(self.config.winding_chance).carve(grid, &mut regions, &tiles, rng);

        self.enter(Phase::MergingRegions);
        let merge = RegionMerger::new(self.config.random_connector_chance)
            .merge(grid, &regions, &tiles, rng);

        self.enter(Phase::PruningDeadEnds);
        let prune = DeadEndPruner::new(self.config.dead_end_removal_iterations).prune(grid, &tiles);

        let layout = DungeonLayout {
            rooms: std::mem::take(&mut self.rooms),
            region_count: regions.region_count(),
            connectors: merge.connectors,
            merged_connectors: merge.merged,
            extra_connectors: merge.extra,
            unjoined_regions: merge.unjoined,
            pruning_passes: prune.passes,
            pruned_cells: prune.walled,
        };

        regions.clear();
        self.regions = Some(regions);
        self.reset();

        log::info!(
            "Generated {}x{} dungeon: {} rooms, {} regions, {} connectors opened, {} cells pruned",
            grid.width(),
            grid.height(),
            layout.rooms.len(),
            layout.region_count,
            layout.merged_connectors + layout.extra_connectors,
            layout.pruned_cells
        );
        Ok(layout)
    }

    fn enter(&mut self, phase: Phase) {
        log::debug!("Dungeon generation: {:?}", phase);
        self.phase = phase;
    }

    fn reset(&mut self) {
        self.rooms.clear();
        self.phase = Phase::Reset;
    }
}
