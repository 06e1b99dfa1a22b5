//! Built-in pipelines and the population tables they roll from.

use std::sync::Arc;

use crate::config::GenerationConfig;
use crate::content::keys;
use crate::mapgen::{
    BorderBuilder, ConnectivityBuilder, Pipeline, PopulationBuilder, StairsBuilder,
    TerrainBuilder, TerrainProfile, WeightedEntry, WeightedTable,
};
use crate::types::Biome;
use crate::world::PoiKind;

use super::zone_id::ZoneCoords;

pub const MAX_TIER: u8 = 3;

/// What every recipe needs besides the zone id.
pub struct RecipeContext<'a> {
    pub world_seed: u64,
    pub config: &'a GenerationConfig,
}

impl RecipeContext<'_> {
    /// Up link when something lies above, down link while above `max_depth`.
    pub fn stairs_for(&self, coords: ZoneCoords, floor_blueprint: &str) -> Option<StairsBuilder> {
        if !self.config.stairs_enabled {
            return None;
        }
        let above = coords.above();
        let below = (coords.depth < self.config.max_depth).then(|| coords.below());
        if above.is_none() && below.is_none() {
            return None;
        }
        let mut stairs = StairsBuilder::new(self.world_seed, floor_blueprint);
        if let Some(above) = above {
            stairs = stairs.with_above(above.zone_id());
        }
        if let Some(below) = below {
            stairs = stairs.with_below(below.zone_id());
        }
        Some(stairs)
    }
}

/// Border (unless the profile carves the outer ring), terrain, optional stairs,
/// connectivity, then population.
pub fn assemble(
    name: String,
    profile: TerrainProfile,
    table: WeightedTable,
    stairs: Option<StairsBuilder>,
    config: &GenerationConfig,
) -> Pipeline {
    let mut pipeline = Pipeline::new(name).with_failure_policy(config.failure_policy);
    if !profile.carve_outer_ring {
        pipeline = pipeline.with(BorderBuilder::new(profile.wall_blueprint.clone()));
    }
    let floor = profile.floor_blueprint.clone();
    pipeline = pipeline.with(TerrainBuilder::new(profile));
    if let Some(stairs) = stairs {
        pipeline = pipeline.with(stairs);
    }
    pipeline
        .with(ConnectivityBuilder::new(floor))
        .with(PopulationBuilder::new(Arc::new(table)))
}

pub fn biome_name(biome: Biome) -> &'static str {
    match biome {
        Biome::Cave => "cave",
        Biome::Desert => "desert",
        Biome::Jungle => "jungle",
        Biome::Ruins => "ruins",
    }
}

/// Ordinary wilderness for `biome`; spawns grow with `tier`.
pub fn biome_table(biome: Biome, tier: u8) -> WeightedTable {
    let tier = usize::from(tier.clamp(1, MAX_TIER));
    WeightedTable {
        guaranteed: Vec::new(),
        min_rolls: 2 + tier,
        max_rolls: 4 + 2 * tier,
        entries: biome_entries(biome, tier),
    }
}

fn biome_entries(biome: Biome, tier: usize) -> Vec<WeightedEntry> {
    let elite = if tier >= 2 { 2 * tier as u32 } else { 0 };
    let mut entries = match biome {
        Biome::Cave => vec![
            WeightedEntry::new(keys::GIANT_RAT, 6),
            WeightedEntry::new(keys::BAT, 4),
            WeightedEntry::new(keys::CAVE_SPIDER, 2 + elite),
            WeightedEntry::new(keys::TORCH, 1),
        ],
        Biome::Desert => vec![
            WeightedEntry::new(keys::SCORPION, 6),
            WeightedEntry::new(keys::SAND_RAIDER, 2 + elite),
            WeightedEntry::new(keys::COIN_PURSE, 1),
        ],
        Biome::Jungle => vec![
            WeightedEntry::new(keys::JUNGLE_SNAKE, 6),
            WeightedEntry::new(keys::JAGUAR, 1 + elite),
            WeightedEntry::new(keys::HEALING_HERB, 3),
        ],
        Biome::Ruins => vec![
            WeightedEntry::new(keys::SKELETON, 6),
            WeightedEntry::new(keys::CULTIST, 3),
            WeightedEntry::new(keys::GHOUL, elite),
            WeightedEntry::new(keys::COIN_PURSE, 2),
        ],
    };
    entries.retain(|entry| entry.weight > 0);
    entries
}

/// Boss first, then the biome's native creatures as its minions.
pub fn lair_table(biome: Biome, boss: &str, tier: u8) -> WeightedTable {
    let tier = usize::from(tier.clamp(1, MAX_TIER));
    let mut entries = biome_entries(biome, tier);
    entries.retain(|entry| !is_item(&entry.blueprint));
    WeightedTable {
        guaranteed: vec![boss.to_string()],
        min_rolls: 1 + tier,
        max_rolls: 3 + tier,
        entries,
    }
}

pub fn village_table() -> WeightedTable {
    WeightedTable {
        guaranteed: vec![keys::ELDER.to_string()],
        min_rolls: 3,
        max_rolls: 6,
        entries: vec![
            WeightedEntry::new(keys::VILLAGER, 6),
            WeightedEntry::new(keys::VILLAGE_GUARD, 2),
            WeightedEntry::new(keys::HEALING_HERB, 1),
        ],
    }
}

pub fn merchant_table() -> WeightedTable {
    WeightedTable {
        guaranteed: vec![keys::MERCHANT.to_string()],
        min_rolls: 2,
        max_rolls: 4,
        entries: vec![
            WeightedEntry::new(keys::CARAVAN_GUARD, 3),
            WeightedEntry::new(keys::PACK_MULE, 2),
            WeightedEntry::new(keys::COIN_PURSE, 1),
        ],
    }
}

pub fn underground_table(tier: u8) -> WeightedTable {
    let tier = usize::from(tier.clamp(1, MAX_TIER));
    WeightedTable {
        guaranteed: Vec::new(),
        min_rolls: 2 + tier,
        max_rolls: 4 + 2 * tier,
        entries: vec![
            WeightedEntry::new(keys::DEEP_CRAWLER, 2 + 2 * tier as u32),
            WeightedEntry::new(keys::CAVE_SPIDER, 4),
            WeightedEntry::new(keys::BAT, 3),
            WeightedEntry::new(keys::GHOUL, tier as u32),
            WeightedEntry::new(keys::TORCH, 1),
        ],
    }
}

/// Terrain a point of interest sits on, independent of the surrounding biome.
pub fn poi_profile(kind: PoiKind, config: &GenerationConfig) -> TerrainProfile {
    match kind {
        PoiKind::Village => config.profiles.ruins.clone(),
        PoiKind::Lair => config.profiles.cave.clone(),
        PoiKind::MerchantCamp => config.profiles.desert.clone(),
    }
}

fn is_item(blueprint: &str) -> bool {
    [keys::TORCH, keys::COIN_PURSE, keys::HEALING_HERB].contains(&blueprint)
}
