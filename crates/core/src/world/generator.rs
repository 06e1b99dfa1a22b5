//! World map construction: biome thresholding, coverage repair, then POI scattering.

use tracing::{debug, info, warn};

use crate::mapgen::NoiseField;
use crate::mapgen::ZoneRng;
use crate::mapgen::seed::mix_seed_stream;
use crate::types::{Biome, Pos};

use super::poi::{self, PoiKind, PointOfInterest};
use super::{WORLD_CENTER, WORLD_HEIGHT, WORLD_WIDTH, WorldMap, index, position};

const WORLD_STREAM: u64 = 0x5752_4C44;
const WORLD_NOISE_OCTAVES: u32 = 2;
const PLACEMENT_ATTEMPTS: usize = 200;

/// (kind, minimum count, maximum count), placed in this order.
const POI_QUOTAS: [(PoiKind, usize, usize); 3] = [
    (PoiKind::Village, 4, 6),
    (PoiKind::Lair, 3, 5),
    (PoiKind::MerchantCamp, 2, 3),
];

pub(super) fn generate_world(seed: u64, noise: &dyn NoiseField) -> WorldMap {
    let mut rng = ZoneRng::from_seed(mix_seed_stream(seed, WORLD_STREAM));
    let field = noise.generate_field(WORLD_WIDTH, WORLD_HEIGHT, &mut rng, WORLD_NOISE_OCTAVES);
    let noise_values = field.values().to_vec();

    let mut biomes: Vec<Biome> = noise_values.iter().map(|&value| Biome::from_noise(value)).collect();
    let center = index(WORLD_CENTER.x, WORLD_CENTER.y);
    biomes[center] = Biome::Cave;
    repair_biome_coverage(&mut biomes, &noise_values, center);

    let mut pois: Vec<Option<PointOfInterest>> = vec![None; WORLD_WIDTH * WORLD_HEIGHT];
    pois[center] = Some(poi::starting_village());
    let mut placed = vec![WORLD_CENTER];

    for (kind, min_count, max_count) in POI_QUOTAS {
        let target = rng.range_inclusive(min_count, max_count);
        let mut count = 0;
        let mut attempts = 0;
        while count < target && attempts < PLACEMENT_ATTEMPTS {
            attempts += 1;
            let candidate = Pos::new(rng.below(WORLD_WIDTH) as i32, rng.below(WORLD_HEIGHT) as i32);
            let cell = index(candidate.x, candidate.y);
            if pois[cell].is_some() {
                continue;
            }
            if placed.iter().any(|&other| other.manhattan(candidate) < kind.min_spacing()) {
                continue;
            }
            let tier = poi::tier_for_distance(candidate.manhattan(WORLD_CENTER));
            pois[cell] = Some(poi::roll_point_of_interest(kind, biomes[cell], tier, &mut rng));
            placed.push(candidate);
            count += 1;
        }
        if count < target {
            warn!(?kind, placed = count, target, "point-of-interest quota not met");
        } else {
            debug!(?kind, placed = count, "points of interest placed");
        }
    }

    info!(seed, pois = placed.len(), "world map generated");
    WorldMap { seed, biomes, noise: noise_values, pois }
}

/// Gives each absent biome the cell whose noise sits closest to its band centre.
/// The centre cell and cells holding the last instance of a biome are never taken.
fn repair_biome_coverage(biomes: &mut [Biome], noise: &[f64], center: usize) {
    for biome in Biome::ALL {
        if biomes.contains(&biome) {
            continue;
        }
        let mut best: Option<(usize, f64)> = None;
        for (cell, &current) in biomes.iter().enumerate() {
            if cell == center || count_of(biomes, current) <= 1 {
                continue;
            }
            let distance = (noise[cell] - biome.band_center()).abs();
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((cell, distance));
            }
        }
        if let Some((cell, _)) = best {
            debug!(?biome, at = ?position(cell), "biome coverage repaired");
            biomes[cell] = biome;
        }
    }
}

fn count_of(biomes: &[Biome], biome: Biome) -> usize {
    biomes.iter().filter(|&&candidate| candidate == biome).count()
}
