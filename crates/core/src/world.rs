//! Overworld map: a fixed biome grid plus scattered points of interest.

mod generator;
pub mod poi;

use serde::Serialize;

use crate::mapgen::{NoiseField, PerlinField};
use crate::types::{Biome, Pos};

pub use poi::{PoiKind, PointOfInterest, tier_for_distance};

pub const WORLD_WIDTH: usize = 20;
pub const WORLD_HEIGHT: usize = 20;
pub const WORLD_CENTER: Pos = Pos { y: 10, x: 10 };
/// Sampling frequency giving a handful of biome blobs across the map.
pub const WORLD_NOISE_FREQUENCY: f64 = 0.18;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WorldMap {
    seed: u64,
    biomes: Vec<Biome>,
    noise: Vec<f64>,
    pois: Vec<Option<PointOfInterest>>,
}

impl WorldMap {
    pub fn generate(seed: u64) -> Self {
        Self::generate_with(seed, &PerlinField::new(WORLD_NOISE_FREQUENCY))
    }

    pub fn generate_with(seed: u64, noise: &dyn NoiseField) -> Self {
        generator::generate_world(seed, noise)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn width(&self) -> usize {
        WORLD_WIDTH
    }

    pub fn height(&self) -> usize {
        WORLD_HEIGHT
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < WORLD_WIDTH && (y as usize) < WORLD_HEIGHT
    }

    pub fn biome_at(&self, x: i32, y: i32) -> Option<Biome> {
        self.in_bounds(x, y).then(|| self.biomes[index(x, y)])
    }

    pub fn get_poi(&self, x: i32, y: i32) -> Option<&PointOfInterest> {
        if !self.in_bounds(x, y) {
            return None;
        }
        self.pois[index(x, y)].as_ref()
    }

    /// Every point of interest with its map position, row-major.
    pub fn pois(&self) -> impl Iterator<Item = (Pos, &PointOfInterest)> {
        self.pois.iter().enumerate().filter_map(|(cell, poi)| {
            poi.as_ref().map(|poi| (position(cell), poi))
        })
    }

    pub fn biome_count(&self, biome: Biome) -> usize {
        self.biomes.iter().filter(|&&candidate| candidate == biome).count()
    }

    /// One text row per map row: POI glyph where present, biome glyph otherwise.
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((WORLD_WIDTH + 1) * WORLD_HEIGHT);
        for y in 0..WORLD_HEIGHT as i32 {
            for x in 0..WORLD_WIDTH as i32 {
                let glyph = match self.get_poi(x, y) {
                    Some(poi) => poi.kind.glyph(),
                    None => self.biomes[index(x, y)].glyph().to_ascii_lowercase(),
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}

fn index(x: i32, y: i32) -> usize {
    (y as usize) * WORLD_WIDTH + (x as usize)
}

fn position(cell: usize) -> Pos {
    Pos { y: (cell / WORLD_WIDTH) as i32, x: (cell % WORLD_WIDTH) as i32 }
}
