//! Cardinal directions and the maze cursor

/// One of the four axis-aligned carving directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order neighbours are examined
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit offset of this direction
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Coordinates `distance` cells away from `(x, y)`
    #[inline]
    pub const fn step(self, x: i32, y: i32, distance: i32) -> (i32, i32) {
        let (dx, dy) = self.offset();
        (x + dx * distance, y + dy * distance)
    }
}

/// A mutable grid cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move one cell in `direction`
    #[inline]
    pub fn advance(&mut self, direction: Direction) {
        let (x, y) = direction.step(self.x, self.y, 1);
        self.x = x;
        self.y = y;
    }

    /// Neighbour `distance` cells away, without moving
    #[inline]
    pub fn neighbor(&self, direction: Direction, distance: i32) -> Point {
        let (x, y) = direction.step(self.x, self.y, distance);
        Point::new(x, y)
    }
}
