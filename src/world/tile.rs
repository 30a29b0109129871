//! Tile thresholds
//!
//! Cells are plain floats; thresholds decide whether a value is a wall,
//! room floor or corridor.

use serde::{Deserialize, Serialize};

/// Values used to carve and classify cells
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Cells equal to or above this value are walls. Should be the highest.
    pub wall: f32,
    /// Room floor value
    pub floor: f32,
    /// Corridor value
    pub corridor: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            wall: 1.0,
            floor: 0.5,
            corridor: 0.0,
        }
    }
}

impl Thresholds {
    #[inline]
    pub fn is_wall(&self, value: f32) -> bool {
        value >= self.wall
    }

    /// Classify a cell value
    pub fn classify(&self, value: f32) -> TileKind {
        if self.is_wall(value) {
            TileKind::Wall
        } else if value == self.floor {
            TileKind::Floor
        } else if value == self.corridor {
            TileKind::Corridor
        } else {
            TileKind::Other
        }
    }

    /// True if the wall value is above both floor and corridor
    pub fn is_ordered(&self) -> bool {
        self.wall > self.floor && self.wall > self.corridor
    }
}

/// Semantic tier of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Wall,
    Floor,
    Corridor,
    /// Non-wall value matching neither floor nor corridor (e.g. a styled room)
    Other,
}

impl TileKind {
    pub fn is_walkable(&self) -> bool {
        !matches!(self, TileKind::Wall)
    }

    /// Character used when printing maps
    pub fn glyph(&self) -> char {
        match self {
            TileKind::Wall => '#',
            TileKind::Floor => '.',
            TileKind::Corridor => ',',
            TileKind::Other => '?',
        }
    }
}
