use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EntityId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn manhattan(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn orthogonal_neighbors(self) -> [Pos; 4] {
        [
            Pos { y: self.y - 1, x: self.x },
            Pos { y: self.y, x: self.x + 1 },
            Pos { y: self.y + 1, x: self.x },
            Pos { y: self.y, x: self.x - 1 },
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Edge {
    North,
    South,
    West,
    East,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::North, Edge::South, Edge::West, Edge::East];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Biome {
    Cave,
    Desert,
    Jungle,
    Ruins,
}

impl Biome {
    pub const ALL: [Biome; 4] = [Biome::Cave, Biome::Desert, Biome::Jungle, Biome::Ruins];

    /// Quartile thresholding of a normalized noise sample.
    pub fn from_noise(value: f64) -> Self {
        if value < 0.25 {
            Biome::Cave
        } else if value < 0.50 {
            Biome::Desert
        } else if value < 0.75 {
            Biome::Jungle
        } else {
            Biome::Ruins
        }
    }

    pub fn band_center(self) -> f64 {
        match self {
            Biome::Cave => 0.125,
            Biome::Desert => 0.375,
            Biome::Jungle => 0.625,
            Biome::Ruins => 0.875,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Biome::Cave => 'C',
            Biome::Desert => 'D',
            Biome::Jungle => 'J',
            Biome::Ruins => 'R',
        }
    }
}
