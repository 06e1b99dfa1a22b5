//! Routing from a zone id to the pipeline that builds it.

use tracing::debug;

use crate::content::keys;
use crate::error::ZoneError;
use crate::mapgen::{Pipeline, TerrainProfile, WeightedTable};
use crate::types::{Biome, Pos};
use crate::world::{PoiKind, WORLD_CENTER, WorldMap, tier_for_distance};

use super::recipes::{self, MAX_TIER, RecipeContext};
use super::zone_id::ZoneCoords;

pub trait PipelineSelector {
    fn select(&self, zone_id: &str, context: &RecipeContext<'_>) -> Result<Pipeline, ZoneError>;
}

/// Every zone is a plain cave with tier-one spawns and no vertical links.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultSelector;

impl PipelineSelector for DefaultSelector {
    fn select(&self, _zone_id: &str, context: &RecipeContext<'_>) -> Result<Pipeline, ZoneError> {
        Ok(recipes::assemble(
            "cave".to_string(),
            context.config.profiles.cave.clone(),
            recipes::biome_table(Biome::Cave, 1),
            None,
            context.config,
        ))
    }
}

/// Routes by world-map biome and point of interest, or underground below the surface.
#[derive(Clone, Debug)]
pub struct OverworldSelector {
    world: WorldMap,
}

impl OverworldSelector {
    pub fn new(world: WorldMap) -> Self {
        Self { world }
    }

    pub fn world(&self) -> &WorldMap {
        &self.world
    }

    fn locate(&self, zone_id: &str) -> Result<ZoneCoords, ZoneError> {
        let coords = ZoneCoords::parse(zone_id)
            .ok_or_else(|| ZoneError::MalformedZoneId(zone_id.to_string()))?;
        if !self.world.in_bounds(coords.x, coords.y) {
            return Err(ZoneError::OutOfWorld {
                zone: zone_id.to_string(),
                width: self.world.width(),
                height: self.world.height(),
            });
        }
        Ok(coords)
    }
}

impl PipelineSelector for OverworldSelector {
    fn select(&self, zone_id: &str, context: &RecipeContext<'_>) -> Result<Pipeline, ZoneError> {
        let coords = self.locate(zone_id)?;
        let max_depth = context.config.max_depth;
        if coords.depth > max_depth {
            return Err(ZoneError::TooDeep {
                zone: zone_id.to_string(),
                depth: coords.depth,
                max_depth,
            });
        }
        let surface_tier = tier_for_distance(Pos::new(coords.x, coords.y).manhattan(WORLD_CENTER));

        if coords.depth > 0 {
            let tier =
                u32::from(surface_tier).saturating_add(coords.depth).min(u32::from(MAX_TIER)) as u8;
            let profile = context.config.profiles.underground(coords.depth);
            debug!(zone = zone_id, depth = coords.depth, tier, "routing underground");
            return Ok(build(
                format!("underground:{}", coords.depth),
                profile,
                recipes::underground_table(tier),
                coords,
                context,
            ));
        }

        if let Some(poi) = self.world.get_poi(coords.x, coords.y) {
            let profile = recipes::poi_profile(poi.kind, context.config);
            let table = match poi.kind {
                PoiKind::Village => recipes::village_table(),
                PoiKind::MerchantCamp => recipes::merchant_table(),
                PoiKind::Lair => {
                    let biome = self.world.biome_at(coords.x, coords.y).unwrap_or(Biome::Cave);
                    let boss = poi.boss.as_deref().unwrap_or(keys::CAVE_TROLL);
                    recipes::lair_table(biome, boss, poi.tier)
                }
            };
            debug!(zone = zone_id, kind = ?poi.kind, name = %poi.name, "routing point of interest");
            let name = format!("poi:{:?}", poi.kind).to_lowercase();
            return Ok(build(name, profile, table, coords, context));
        }

        let biome = self.world.biome_at(coords.x, coords.y).unwrap_or(Biome::Cave);
        let profile = context.config.profiles.for_biome(biome).clone();
        Ok(build(
            format!("biome:{}", recipes::biome_name(biome)),
            profile,
            recipes::biome_table(biome, surface_tier),
            coords,
            context,
        ))
    }
}

fn build(
    name: String,
    profile: TerrainProfile,
    table: WeightedTable,
    coords: ZoneCoords,
    context: &RecipeContext<'_>,
) -> Pipeline {
    let stairs = context.stairs_for(coords, &profile.floor_blueprint);
    recipes::assemble(name, profile, table, stairs, context.config)
}
