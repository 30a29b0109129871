//! Value noise generator
//!
//! The grid is split into square regions of `radius` cells. Each region
//! corner gets a smoothed pseudo-random value and cells in between are
//! cosine-interpolated, giving soft blobs whose size follows the radius.
//! Run it several times with falling radius and modifier to add detail.

use std::f32::consts::PI;

use ::noise::{NoiseFn, Perlin};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::GenerationMode;
use crate::error::GenerationError;
use crate::world::Grid;

/// Where lattice values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NoiseSource {
    /// Integer hash of the lattice point and seed
    #[default]
    Hashed,
    /// Perlin noise sampled at the centre of the lattice cell
    Perlin,
}

/// Noise settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSettings {
    /// Region size in cells; must be positive
    pub radius: i32,
    /// Largest value added to a cell
    pub modifier: f32,
    /// Zero rolls a random seed on the next generation
    pub seed: i32,
    pub mode: GenerationMode,
    pub source: NoiseSource,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            radius: 8,
            modifier: 1.0,
            seed: 0,
            mode: GenerationMode::Add,
            source: NoiseSource::Hashed,
        }
    }
}

pub struct NoiseGenerator {
    settings: NoiseSettings,
    /// Built lazily for the current seed
    perlin: Option<(i32, Perlin)>,
}

impl NoiseGenerator {
    pub fn new(settings: NoiseSettings) -> Self {
        Self { settings, perlin: None }
    }

    pub fn settings(&self) -> &NoiseSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut NoiseSettings {
        &mut self.settings
    }

    /// Seed in use; zero until one is rolled or set
    pub fn seed(&self) -> i32 {
        self.settings.seed
    }

    /// Write noise into every cell of `grid`.
    ///
    /// `rng` is only consulted to roll a seed when none is set.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
    ) -> Result<(), GenerationError> {
        let radius = self.settings.radius;
        if radius <= 0 {
            return Err(GenerationError::InvalidNoiseRadius(radius));
        }
        if self.settings.seed == 0 {
            self.settings.seed = roll_seed(rng);
            log::debug!("Rolled noise seed {}", self.settings.seed);
        }
        if self.settings.source == NoiseSource::Perlin {
            let seed = self.settings.seed;
            if self.perlin.as_ref().map_or(true, |(built_for, _)| *built_for != seed) {
                self.perlin = Some((seed, Perlin::new(seed as u32)));
            }
        }

        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let value = self.sample(x, y, radius);
                self.settings.mode.apply(grid, x, y, (value + 1.0) / 2.0 * self.settings.modifier);
            }
        }
        Ok(())
    }

    /// Interpolated noise for a cell, roughly in `[-1, 1]`
    fn sample(&self, x: i32, y: i32, radius: i32) -> f32 {
        let region_x = x / radius;
        let region_y = y / radius;
        let fraction_x = x as f32 / radius as f32 - region_x as f32;
        let fraction_y = y as f32 / radius as f32 - region_y as f32;

        let center = self.smooth_noise(region_x, region_y);
        let right = self.smooth_noise(region_x + 1, region_y);
        let bottom = self.smooth_noise(region_x, region_y + 1);
        let bottom_right = self.smooth_noise(region_x + 1, region_y + 1);

        let top = interpolate(center, right, fraction_x);
        let bottom = interpolate(bottom, bottom_right, fraction_x);
        interpolate(top, bottom, fraction_y)
    }

    fn smooth_noise(&self, x: i32, y: i32) -> f32 {
        let corners = self.noise(x - 1, y - 1)
            + self.noise(x + 1, y - 1)
            + self.noise(x - 1, y + 1)
            + self.noise(x + 1, y + 1);
        let sides = self.noise(x - 1, y)
            + self.noise(x + 1, y)
            + self.noise(x, y - 1)
            + self.noise(x, y + 1);
        corners / 16.0 + sides / 8.0 + self.noise(x, y) / 4.0
    }

    fn noise(&self, x: i32, y: i32) -> f32 {
        match (&self.settings.source, &self.perlin) {
            (NoiseSource::Perlin, Some((_, perlin))) => {
                perlin.get([x as f64 + 0.5, y as f64 + 0.5]) as f32
            }
            _ => hashed_noise(x, y, self.settings.seed),
        }
    }
}

/// Pseudo-random value in `[-1, 1]` for a lattice point
pub fn hashed_noise(x: i32, y: i32, seed: i32) -> f32 {
    let n = x.wrapping_add(seed).wrapping_add(y.wrapping_mul(seed));
    let hash = n
        .wrapping_mul(n.wrapping_mul(n).wrapping_mul(15731).wrapping_add(789221))
        .wrapping_add(1376312589)
        & 0x7fff_ffff;
    1.0 - hash as f32 / 1_073_741_824.0
}

fn interpolate(start: f32, end: f32, fraction: f32) -> f32 {
    let modifier = (1.0 - (fraction * PI).cos()) * 0.5;
    start * (1.0 - modifier) + end * modifier
}

/// Roll a random 16-bit prime
pub fn roll_seed<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    loop {
        let candidate = rng.gen_range(1 << 15..1 << 16) | 1;
        if is_prime(candidate) {
            return candidate;
        }
    }
}

fn is_prime(n: i32) -> bool {
    if n < 2 {
        return false;
    }
    let mut divisor = 2;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 1;
    }
    true
}
