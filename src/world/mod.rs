//! World module
//!
//! Contains the grid, region bookkeeping, tile thresholds and procedural generation.

pub mod grid;
pub mod region;
pub mod direction;
pub mod tile;
pub mod generation;

pub use grid::Grid;
pub use region::{MergeTable, RegionIndex, UNASSIGNED};
pub use direction::{Direction, Point};
pub use tile::{Thresholds, TileKind};
