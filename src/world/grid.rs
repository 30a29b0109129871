//! Grid data structure
//!
//! The 2D scalar field every generator reads from and writes into.

/// A rectangular field of `f32` cells, stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<f32>,
}

impl Grid {
    /// Create a new grid filled with zeros
    pub fn new(width: i32, height: i32) -> Self {
        Self::filled(0.0, width, height)
    }

    /// Create a new grid with every cell set to `value`
    pub fn filled(value: f32, width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self {
            width,
            height,
            cells: vec![value; (width * height) as usize],
        }
    }

    /// Wrap existing row-major cell values
    pub fn from_cells(cells: Vec<f32>, width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        assert_eq!(cells.len(), (width * height) as usize, "cell count does not match dimensions");
        Self { width, height, cells }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells
    #[inline]
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn is_valid(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    pub fn to_index(&self, x: i32, y: i32) -> usize {
        debug_assert!(
            self.is_valid(x, y),
            "({}, {}) outside {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        (y * self.width + x) as usize
    }

    /// Convert 1D index to 2D coordinates
    #[inline]
    pub fn to_xy(&self, index: usize) -> (i32, i32) {
        let index = index as i32;
        (index % self.width, index / self.width)
    }

    /// Get cell value. Panics when out of bounds.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> f32 {
        self.cells[self.to_index(x, y)]
    }

    /// Get cell value, or `None` outside the grid
    pub fn try_get(&self, x: i32, y: i32) -> Option<f32> {
        if self.is_valid(x, y) {
            Some(self.get(x, y))
        } else {
            None
        }
    }

    /// Set cell value, returning the new value
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, value: f32) -> f32 {
        let idx = self.to_index(x, y);
        self.cells[idx] = value;
        value
    }

    pub fn add(&mut self, x: i32, y: i32, value: f32) -> f32 {
        let idx = self.to_index(x, y);
        self.cells[idx] += value;
        self.cells[idx]
    }

    pub fn subtract(&mut self, x: i32, y: i32, value: f32) -> f32 {
        let idx = self.to_index(x, y);
        self.cells[idx] -= value;
        self.cells[idx]
    }

    pub fn multiply(&mut self, x: i32, y: i32, value: f32) -> f32 {
        let idx = self.to_index(x, y);
        self.cells[idx] *= value;
        self.cells[idx]
    }

    pub fn divide(&mut self, x: i32, y: i32, value: f32) -> f32 {
        let idx = self.to_index(x, y);
        self.cells[idx] /= value;
        self.cells[idx]
    }

    /// Set every cell to `value`
    pub fn fill(&mut self, value: f32) -> &mut Self {
        self.cells.fill(value);
        self
    }

    /// Copy all cell values from a grid of the same size
    pub fn copy_from(&mut self, other: &Grid) {
        assert!(
            self.width == other.width && self.height == other.height,
            "cannot copy {}x{} grid into {}x{} grid",
            other.width,
            other.height,
            self.width,
            self.height
        );
        self.cells.copy_from_slice(&other.cells);
    }

    /// Clamp every cell into `[min, max]`
    pub fn clamp(&mut self, min: f32, max: f32) -> &mut Self {
        for cell in &mut self.cells {
            *cell = cell.clamp(min, max);
        }
        self
    }

    /// Replace every cell equal to `value` with `with_value`
    pub fn replace(&mut self, value: f32, with_value: f32) -> &mut Self {
        for cell in &mut self.cells {
            if *cell == value {
                *cell = with_value;
            }
        }
        self
    }

    /// Raw row-major cell values
    pub fn cells(&self) -> &[f32] {
        &self.cells
    }

    /// Iterate over `(x, y, value)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, f32)> + '_ {
        self.cells.iter().enumerate().map(move |(idx, value)| {
            let (x, y) = self.to_xy(idx);
            (x, y, *value)
        })
    }

    /// Count cells matching a predicate
    pub fn count(&self, predicate: impl Fn(f32) -> bool) -> usize {
        self.cells.iter().filter(|v| predicate(**v)).count()
    }
}
