//! Cave generator using cellular automata
//!
//! Creates organic, cave-like blobs. A cell is alive when its value is at
//! or above the marker.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::GenerationMode;
use crate::world::Grid;

/// Cellular automata settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellularSettings {
    /// Randomly seed living cells before iterating
    pub initiate: bool,
    /// Value a living cell holds
    pub marker: f32,
    /// Chance of a cell starting alive
    pub alive_chance: f32,
    pub iterations: u32,
    /// Dead cells with more living neighbours than this are born
    pub birth_limit: u32,
    /// Living cells with fewer living neighbours than this die
    pub death_limit: u32,
    /// Neighbourhood radius (1 = the eight surrounding cells)
    pub radius: i32,
    /// How births are written into the grid
    pub mode: GenerationMode,
}

impl Default for CellularSettings {
    fn default() -> Self {
        Self {
            initiate: true,
            marker: 1.0,
            alive_chance: 0.5,
            iterations: 3,
            birth_limit: 4,
            death_limit: 3,
            radius: 1,
            mode: GenerationMode::Add,
        }
    }
}

pub struct CellularAutomataGenerator {
    settings: CellularSettings,
    /// Working copy written during an iteration
    buffer: Option<Grid>,
}

impl CellularAutomataGenerator {
    pub fn new(settings: CellularSettings) -> Self {
        Self { settings, buffer: None }
    }

    pub fn settings(&self) -> &CellularSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut CellularSettings {
        &mut self.settings
    }

    pub fn generate<R: Rng + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R) {
        if self.settings.initiate {
            self.initiate(grid, rng);
        }

        let mut buffer = match self.buffer.take() {
            Some(buffer) if buffer.width() == grid.width() && buffer.height() == grid.height() => {
                buffer
            }
            _ => grid.clone(),
        };
        for _ in 0..self.settings.iterations {
            buffer.copy_from(grid);
            self.iterate(grid, &mut buffer);
            grid.copy_from(&buffer);
        }
        self.buffer = Some(buffer);

        log::debug!(
            "Cellular automata ran {} iterations, {} cells alive",
            self.settings.iterations,
            grid.count(|v| v >= self.settings.marker)
        );
    }

    fn initiate<R: Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) {
        let marker = self.settings.marker;
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let alive = grid.get(x, y) >= marker;
                if rng.gen::<f32>() < self.settings.alive_chance {
                    if !alive {
                        grid.add(x, y, marker);
                    }
                } else if alive {
                    grid.subtract(x, y, marker);
                }
            }
        }
    }

    /// One generation: read from `grid`, write into `next`
    fn iterate(&self, grid: &Grid, next: &mut Grid) {
        let marker = self.settings.marker;
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let neighbors = self.count_alive_neighbors(grid, x, y);
                if grid.get(x, y) >= marker {
                    if neighbors < self.settings.death_limit {
                        next.subtract(x, y, marker);
                    }
                } else if neighbors > self.settings.birth_limit {
                    self.settings.mode.apply(next, x, y, marker);
                }
            }
        }
    }

    /// Count living cells in the square neighbourhood, skipping the cell itself
    fn count_alive_neighbors(&self, grid: &Grid, x: i32, y: i32) -> u32 {
        let radius = self.settings.radius;
        let mut count = 0;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if grid.try_get(x + dx, y + dy).is_some_and(|v| v >= self.settings.marker) {
                    count += 1;
                }
            }
        }
        count
    }
}
