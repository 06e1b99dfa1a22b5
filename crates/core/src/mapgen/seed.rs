//! Deterministic seed mixing and the shared pseudo-random stream used by zone builders.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::Pos;

/// Bumped whenever a builder's draw sequence changes on purpose.
pub const GENERATION_VERSION: u32 = 1;

/// The single random stream shared by every builder of one generation run.
pub struct ZoneRng {
    inner: ChaCha8Rng,
}

impl ZoneRng {
    pub fn from_seed(seed: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Uniform-ish value in `0..bound` by modulo reduction; `bound == 0` yields 0.
    pub fn below(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        (self.next_u64() % bound as u64) as usize
    }

    pub fn range_inclusive(&mut self, min_value: usize, max_value: usize) -> usize {
        debug_assert!(min_value <= max_value);
        min_value + self.below(max_value - min_value + 1)
    }

    /// A roll in `0..100`.
    pub fn percent(&mut self) -> u32 {
        self.below(100) as u32
    }

    pub fn chance(&mut self, percent: u32) -> bool {
        self.percent() < percent
    }

    pub fn coin(&mut self) -> bool {
        self.next_u64() & 1 == 0
    }

    /// A value in `[0, 1)` built from the top 53 bits of one draw.
    pub fn unit_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
    }
}

pub fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}

/// xxh3-64 of the identifier's UTF-8 bytes; stable across processes and platforms.
pub fn zone_id_digest(zone_id: &str) -> u64 {
    xxh3_64(zone_id.as_bytes())
}

pub fn derive_zone_seed(world_seed: u64, zone_id: &str, pipeline_fingerprint: u64) -> u64 {
    let mut mixed = world_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= zone_id_digest(zone_id).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= pipeline_fingerprint.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}

/// Interior coordinate shared by both ends of the vertical link below `upper_zone_id`.
pub fn stairs_anchor(world_seed: u64, upper_zone_id: &str, width: usize, height: usize) -> Pos {
    let mixed = mix_seed_stream(world_seed, zone_id_digest(upper_zone_id));
    let span_x = width.saturating_sub(2).max(1) as u64;
    let span_y = height.saturating_sub(2).max(1) as u64;
    let x = 1 + (mixed % span_x) as i32;
    let y = 1 + ((mixed >> 32) % span_y) as i32;
    Pos { y: y.min(height as i32 - 1), x: x.min(width as i32 - 1) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_inclusive_stays_inside_requested_bounds() {
        let mut rng = ZoneRng::from_seed(12_345);
        for _ in 0..200 {
            let value = rng.range_inclusive(7, 13);
            assert!((7..=13).contains(&value));
        }
    }

    #[test]
    fn unit_draws_stay_in_half_open_unit_interval() {
        let mut rng = ZoneRng::from_seed(9);
        for _ in 0..200 {
            let value = rng.unit_f64();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn same_seed_replays_the_same_stream() {
        let mut left = ZoneRng::from_seed(77);
        let mut right = ZoneRng::from_seed(77);
        for _ in 0..32 {
            assert_eq!(left.next_u64(), right.next_u64());
        }
    }

    #[test]
    fn chance_extremes_are_absolute() {
        let mut rng = ZoneRng::from_seed(5);
        for _ in 0..100 {
            assert!(rng.chance(100));
            assert!(!rng.chance(0));
        }
    }

    #[test]
    fn zone_id_digest_is_pinned() {
        assert_eq!(zone_id_digest("Overworld.10.10.0"), xxh3_64(b"Overworld.10.10.0"));
        assert_ne!(zone_id_digest("Overworld.10.10.0"), zone_id_digest("Overworld.10.10.1"));
    }

    #[test]
    fn zone_seed_changes_when_inputs_change() {
        let baseline = derive_zone_seed(99, "Overworld.1.2.0", 7);
        assert_ne!(baseline, derive_zone_seed(98, "Overworld.1.2.0", 7));
        assert_ne!(baseline, derive_zone_seed(99, "Overworld.1.3.0", 7));
        assert_ne!(baseline, derive_zone_seed(99, "Overworld.1.2.0", 8));
        assert_eq!(baseline, derive_zone_seed(99, "Overworld.1.2.0", 7));
    }

    #[test]
    fn stairs_anchor_is_interior() {
        for seed in 0..50 {
            let anchor = stairs_anchor(seed, "Overworld.4.4.0", 80, 25);
            assert!((1..79).contains(&anchor.x));
            assert!((1..24).contains(&anchor.y));
        }
    }
}
