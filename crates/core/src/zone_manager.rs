//! Zone cache, seed derivation and routing of zone ids to generation pipelines.

mod recipes;
mod selector;
mod zone_id;

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{info, warn};

use crate::config::GenerationConfig;
use crate::connections::ConnectionRegistry;
use crate::content::CatalogFactory;
use crate::error::ZoneError;
use crate::mapgen::{BuildContext, ZoneRng, derive_zone_seed};
use crate::world::WorldMap;
use crate::zone::Zone;

pub use recipes::{
    MAX_TIER, RecipeContext, biome_table, lair_table, merchant_table, underground_table,
    village_table,
};
pub use selector::{DefaultSelector, OverworldSelector, PipelineSelector};
pub use zone_id::ZoneCoords;

/// Owns every generated zone until it is unloaded. Not synchronized; callers on
/// several threads must serialize access themselves.
pub struct ZoneManager {
    world_seed: u64,
    config: GenerationConfig,
    selector: Box<dyn PipelineSelector>,
    factory: CatalogFactory,
    connections: ConnectionRegistry,
    cache: HashMap<String, Zone>,
}

impl ZoneManager {
    pub fn new(
        world_seed: u64,
        config: GenerationConfig,
        selector: Box<dyn PipelineSelector>,
    ) -> Self {
        let factory = CatalogFactory::new(config.catalog());
        Self {
            world_seed,
            config,
            selector,
            factory,
            connections: ConnectionRegistry::new(),
            cache: HashMap::new(),
        }
    }

    /// Routes through a world map generated from the same seed.
    pub fn overworld(world_seed: u64, config: GenerationConfig) -> Self {
        let world = WorldMap::generate(world_seed);
        Self::new(world_seed, config, Box::new(OverworldSelector::new(world)))
    }

    pub fn world_seed(&self) -> u64 {
        self.world_seed
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn get_zone(&mut self, zone_id: &str) -> Result<&Zone, ZoneError> {
        self.get_zone_mut(zone_id).map(|zone| &*zone)
    }

    /// Cached zone, or a freshly generated one. Failed generations are not cached,
    /// so a retry with the same seed and configuration fails the same way.
    pub fn get_zone_mut(&mut self, zone_id: &str) -> Result<&mut Zone, ZoneError> {
        let canonical = canonical_id(zone_id);
        let zone_id = canonical.as_str();
        match self.cache.entry(canonical.clone()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let context = RecipeContext { world_seed: self.world_seed, config: &self.config };
                let mut pipeline = self.selector.select(zone_id, &context)?;
                let seed = derive_zone_seed(self.world_seed, zone_id, pipeline.fingerprint());
                let mut rng = ZoneRng::from_seed(seed);
                let mut zone = Zone::new(zone_id, self.config.zone_width, self.config.zone_height);

                let report = pipeline
                    .generate(&mut BuildContext {
                        zone: &mut zone,
                        factory: &mut self.factory,
                        rng: &mut rng,
                        connections: &mut self.connections,
                    })
                    .inspect_err(|error| warn!(zone = zone_id, %error, "zone generation failed"))?;

                info!(
                    zone = zone_id,
                    seed,
                    pipeline = pipeline.name(),
                    builders = pipeline.len(),
                    failed = report.failed.len(),
                    "zone generated"
                );
                Ok(entry.insert(zone))
            }
        }
    }

    /// Drops the cached zone; its connections stay registered so a regenerated
    /// zone lines up with neighbours again.
    pub fn unload_zone(&mut self, zone_id: &str) -> Option<Zone> {
        self.cache.remove(&canonical_id(zone_id))
    }

    pub fn is_loaded(&self, zone_id: &str) -> bool {
        self.cache.contains_key(&canonical_id(zone_id))
    }

    /// Sorted for stable output.
    pub fn loaded_zone_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.cache.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn connections(&self) -> &ConnectionRegistry {
        &self.connections
    }
}

/// Overworld ids in their four-field form, so the legacy spelling shares a cache
/// entry, seed and stairs links with it. Other ids pass through unchanged.
fn canonical_id(zone_id: &str) -> String {
    ZoneCoords::parse(zone_id).map_or_else(|| zone_id.to_string(), ZoneCoords::zone_id)
}
