//! Procedural map generation
//!
//! The rooms-and-mazes dungeon pipeline plus two standalone field generators
//! (value noise and cellular automata). Every generator writes into a
//! caller-owned [`Grid`].

pub mod rooms;
pub mod styles;
pub mod maze;
pub mod connectors;
pub mod dead_ends;
pub mod dungeon;
pub mod caves;
pub mod noise;

pub use caves::{CellularAutomataGenerator, CellularSettings};
pub use connectors::{Connector, MergeOutcome, RegionMerger};
pub use dead_ends::{DeadEndPruner, PruneOutcome};
pub use dungeon::{DungeonConfig, DungeonGenerator, DungeonLayout, Phase};
pub use maze::MazeCarver;
pub use self::noise::{NoiseGenerator, NoiseSettings, NoiseSource};
pub use rooms::{Normalization, Room, RoomPlacer, RoomSettings};
pub use styles::{RoomShape, RoomStyle};

use serde::{Deserialize, Serialize};

use super::Grid;

/// How a generator combines its value with what is already in a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GenerationMode {
    #[default]
    Add,
    Subtract,
    Multiply,
    Divide,
    Replace,
}

impl GenerationMode {
    /// Apply `value` to a cell, returning the cell's new value
    pub fn apply(self, grid: &mut Grid, x: i32, y: i32, value: f32) -> f32 {
        match self {
            GenerationMode::Add => grid.add(x, y, value),
            GenerationMode::Subtract => grid.subtract(x, y, value),
            GenerationMode::Multiply => grid.multiply(x, y, value),
            GenerationMode::Divide => grid.divide(x, y, value),
            GenerationMode::Replace => grid.set(x, y, value),
        }
    }
}
