//! Room shapes
//!
//! A room is always placed and collision-checked as a rectangle; its style
//! decides which cells inside that rectangle are actually carved.

use std::ops::Range;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rooms::Room;
use crate::world::Grid;

/// Shape carved inside a room's rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomShape {
    /// Fills every cell. Works with any size.
    Square,
    /// Cuts the corners off. Looks best around 5 to 25 cells.
    Rounded,
    /// Inner hall with a tower in every corner. Needs at least 7x7.
    Castle,
    /// Pyramid-like shape. Needs a square room bigger than 2.
    Diamond,
    /// The rectangle split in thirds with the corner parts removed. Needs at least 3x3.
    Cross,
}

const CASTLE_MIN_SIZE: i32 = 7;
const CASTLE_MIN_TOWER: i32 = 3;
const CROSS_MIN_SIZE: i32 = 3;

impl RoomShape {
    /// Check if this shape can be carved in the room
    pub fn is_valid(&self, room: &Room) -> bool {
        match self {
            RoomShape::Square | RoomShape::Rounded => true,
            RoomShape::Castle => room.width >= CASTLE_MIN_SIZE && room.height >= CASTLE_MIN_SIZE,
            RoomShape::Diamond => room.width > 2 && room.width == room.height,
            RoomShape::Cross => room.width >= CROSS_MIN_SIZE && room.height >= CROSS_MIN_SIZE,
        }
    }

    /// Carve the shape into the grid with `value`
    pub fn carve(&self, room: &Room, grid: &mut Grid, value: f32) {
        match self {
            RoomShape::Square => room.fill(grid, value),
            RoomShape::Rounded => carve_rounded(room, grid, value),
            RoomShape::Castle => carve_castle(room, grid, value),
            RoomShape::Diamond => carve_diamond(room, grid, value),
            RoomShape::Cross => carve_cross(room, grid, value),
        }
    }
}

/// Fill a rectangle given in room-local coordinates
fn fill_local(room: &Room, grid: &mut Grid, x_range: Range<i32>, y_range: Range<i32>, value: f32) {
    for x in x_range {
        for y in y_range.clone() {
            grid.set(room.x + x, room.y + y, value);
        }
    }
}

fn carve_rounded(room: &Room, grid: &mut Grid, value: f32) {
    let half_size = (room.width + room.height) / 2;
    let max_distance = half_size * 9 / 10;
    for x in 0..room.width {
        for y in 0..room.height {
            let distance = (x - room.width / 2).abs() + (y - room.height / 2).abs();
            if distance < max_distance {
                grid.set(room.x + x, room.y + y, value);
            }
        }
    }
}

fn carve_castle(room: &Room, grid: &mut Grid, value: f32) {
    let size = room.width.min(room.height);
    let tower = ((size - 1) / 4).max(CASTLE_MIN_TOWER);
    let offset = (tower / 4).max(if tower == CASTLE_MIN_TOWER { 1 } else { 2 });
    let (w, h) = (room.width, room.height);

    // Main hall
    fill_local(room, grid, offset..w - offset, offset..h - offset, value);
    // Towers
    fill_local(room, grid, 0..tower, 0..tower, value);
    fill_local(room, grid, w - tower..w, 0..tower, value);
    fill_local(room, grid, 0..tower, h - tower..h, value);
    fill_local(room, grid, w - tower..w, h - tower..h, value);
}

fn carve_diamond(room: &Room, grid: &mut Grid, value: f32) {
    let half_size = room.width / 2;
    for x in 0..room.width {
        for y in 0..room.height {
            let distance = (x - half_size).abs() + (y - half_size).abs();
            if distance <= half_size {
                grid.set(room.x + x, room.y + y, value);
            }
        }
    }
}

fn carve_cross(room: &Room, grid: &mut Grid, value: f32) {
    let offset_x = room.width / 3;
    let offset_y = room.height / 3;
    fill_local(room, grid, 0..room.width, offset_y..room.height - offset_y, value);
    fill_local(room, grid, offset_x..room.width - offset_x, 0..room.height, value);
}

/// A shape entry in the style list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomStyle {
    pub shape: RoomShape,
    /// Relative chance of being rolled. Zero disables the entry.
    #[serde(default = "default_weight")]
    pub weight: u32,
    /// Carve with this value instead of the floor value
    #[serde(default)]
    pub value: Option<f32>,
}

fn default_weight() -> u32 {
    1
}

impl RoomStyle {
    pub fn new(shape: RoomShape) -> Self {
        Self { shape, weight: 1, value: None }
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Carve rooms of this style with a custom tile value
    pub fn with_value(mut self, value: f32) -> Self {
        self.value = Some(value);
        self
    }
}

/// Carve `room` with a style rolled from `styles`.
///
/// The rolled style is skipped if it rejects the room and the following
/// styles are tried in order, wrapping around. If none fits, or the list is
/// empty, the whole rectangle is filled.
pub fn carve_styled<R: Rng + ?Sized>(
    styles: &[RoomStyle],
    room: &Room,
    grid: &mut Grid,
    value: f32,
    rng: &mut R,
) {
    let total: u32 = styles.iter().map(|s| s.weight).sum();
    if total == 0 {
        room.fill(grid, value);
        return;
    }

    let mut roll = rng.gen_range(0..total);
    let mut start = 0;
    for (idx, style) in styles.iter().enumerate() {
        if roll < style.weight {
            start = idx;
            break;
        }
        roll -= style.weight;
    }

    let count = styles.len();
    for step in 0..count {
        let style = &styles[(start + step) % count];
        if style.weight > 0 && style.shape.is_valid(room) {
            style.shape.carve(room, grid, style.value.unwrap_or(value));
            return;
        }
    }
    log::debug!("No style fits room {:?}, filling it", room);
    room.fill(grid, value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn carved(shape: RoomShape, width: i32, height: i32) -> Grid {
        let mut grid = Grid::filled(1.0, width + 2, height + 2);
        let room = Room::new(1, 1, width, height);
        shape.carve(&room, &mut grid, 0.0);
        grid
    }

    #[test]
    fn test_validity() {
        assert!(RoomShape::Castle.is_valid(&Room::new(0, 0, 7, 9)));
        assert!(!RoomShape::Castle.is_valid(&Room::new(0, 0, 5, 9)));
        assert!(RoomShape::Diamond.is_valid(&Room::new(0, 0, 5, 5)));
        assert!(!RoomShape::Diamond.is_valid(&Room::new(0, 0, 5, 7)));
        assert!(!RoomShape::Diamond.is_valid(&Room::new(0, 0, 1, 1)));
        assert!(!RoomShape::Cross.is_valid(&Room::new(0, 0, 1, 5)));
    }

    #[test]
    fn test_square_fills_everything() {
        let grid = carved(RoomShape::Square, 5, 3);
        assert_eq!(grid.count(|v| v == 0.0), 15);
    }

    #[test]
    fn test_diamond_shape() {
        let grid = carved(RoomShape::Diamond, 5, 5);
        // Rows of 1, 3, 5, 3, 1 cells
        assert_eq!(grid.count(|v| v == 0.0), 13);
        assert_eq!(grid.get(3, 1), 0.0);
        assert_eq!(grid.get(1, 1), 1.0);
        assert_eq!(grid.get(1, 3), 0.0);
    }

    #[test]
    fn test_cross_removes_corners() {
        let grid = carved(RoomShape::Cross, 9, 9);
        assert_eq!(grid.get(1, 1), 1.0);
        assert_eq!(grid.get(3, 3), 1.0);
        assert_eq!(grid.get(4, 1), 0.0);
        assert_eq!(grid.get(1, 4), 0.0);
        assert_eq!(grid.count(|v| v == 0.0), 81 - 4 * 9);
    }

    #[test]
    fn test_castle_towers() {
        let grid = carved(RoomShape::Castle, 7, 7);
        // tower = 3, offset = 1: corners carved, the gap between towers on the edge is not
        assert_eq!(grid.get(1, 1), 0.0);
        assert_eq!(grid.get(7, 7), 0.0);
        assert_eq!(grid.get(4, 1), 1.0);
        assert_eq!(grid.get(4, 2), 0.0);
    }

    #[test]
    fn test_rounded_cuts_corners() {
        let grid = carved(RoomShape::Rounded, 7, 7);
        assert_eq!(grid.get(1, 1), 1.0);
        assert_eq!(grid.get(4, 4), 0.0);
    }

    #[test]
    fn test_shapes_stay_inside_room() {
        let shapes = [
            RoomShape::Square,
            RoomShape::Rounded,
            RoomShape::Castle,
            RoomShape::Diamond,
            RoomShape::Cross,
        ];
        for shape in shapes {
            let grid = carved(shape, 9, 9);
            for (x, y, v) in grid.iter() {
                if x == 0 || y == 0 || x == 10 || y == 10 {
                    assert_eq!(v, 1.0, "{:?} carved border cell ({}, {})", shape, x, y);
                }
            }
        }
    }

    #[test]
    fn test_invalid_style_falls_through() {
        let mut rng = StdRng::seed_from_u64(3);
        let styles = [RoomStyle::new(RoomShape::Diamond).with_value(0.25)];
        let room = Room::new(1, 1, 3, 5);
        let mut grid = Grid::filled(1.0, 5, 7);
        carve_styled(&styles, &room, &mut grid, 0.5, &mut rng);
        // Diamond rejects a non-square room, so the room is filled with the default value
        assert_eq!(grid.count(|v| v == 0.5), 15);
        assert_eq!(grid.count(|v| v == 0.25), 0);
    }

    #[test]
    fn test_style_value_override() {
        let mut rng = StdRng::seed_from_u64(3);
        let styles = [
            RoomStyle::new(RoomShape::Castle).with_weight(0),
            RoomStyle::new(RoomShape::Square).with_value(0.25),
        ];
        let room = Room::new(1, 1, 3, 3);
        let mut grid = Grid::filled(1.0, 5, 5);
        carve_styled(&styles, &room, &mut grid, 0.5, &mut rng);
        assert_eq!(grid.count(|v| v == 0.25), 9);
    }
}
