//! Hollowgen - rooms and mazes dungeon generation
//!
//! Scatter rooms, fill the gaps with winding corridors, join everything
//! through connectors and fill the dead ends back in. Also ships value noise
//! and cellular automata generators working on the same grid.

pub mod error;
pub mod world;
pub mod data;

// Re-export commonly used types
pub use error::{ConfigError, GenerationError};
pub use world::generation::{DungeonConfig, DungeonGenerator, DungeonLayout, GenerationMode, Room};
pub use world::{Grid, Thresholds, TileKind};
