//! Continuous scalar fields blended with automata masks as a second randomness source.

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use super::seed::ZoneRng;

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl ScalarField {
    pub fn from_values(width: usize, height: usize, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), width * height);
        Self { width, height, values }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.values[y * self.width + x]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Rescales to [0, 1]; a flat field becomes 0.5 everywhere.
    fn normalized(mut self) -> Self {
        let min = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;
        for value in &mut self.values {
            *value = if span > f64::EPSILON { (*value - min) / span } else { 0.5 };
        }
        self
    }
}

/// Any deterministic field generator seeded from the caller's stream.
pub trait NoiseField {
    fn generate_field(
        &self,
        width: usize,
        height: usize,
        rng: &mut ZoneRng,
        octaves: u32,
    ) -> ScalarField;
}

/// Fractal Perlin noise sampled on cell centres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerlinField {
    pub frequency: f64,
}

impl PerlinField {
    pub const ZONE_FREQUENCY: f64 = 0.08;

    pub fn new(frequency: f64) -> Self {
        Self { frequency }
    }
}

impl Default for PerlinField {
    fn default() -> Self {
        Self::new(Self::ZONE_FREQUENCY)
    }
}

impl NoiseField for PerlinField {
    fn generate_field(
        &self,
        width: usize,
        height: usize,
        rng: &mut ZoneRng,
        octaves: u32,
    ) -> ScalarField {
        let noise_seed = rng.next_u64() as u32;
        // Integer lattice points of Perlin noise are always zero, so sample off-lattice.
        let offset_x = rng.unit_f64() * 256.0 + 0.5;
        let offset_y = rng.unit_f64() * 256.0 + 0.5;
        let fbm = Fbm::<Perlin>::new(noise_seed).set_octaves(octaves.clamp(1, 16) as usize);

        let mut values = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let sample_x = (x as f64 + offset_x) * self.frequency;
                let sample_y = (y as f64 + offset_y) * self.frequency;
                values.push(fbm.get([sample_x, sample_y]));
            }
        }
        ScalarField::from_values(width, height, values).normalized()
    }
}
