//! Blueprint catalog and the catalog-backed entity factory.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::entity::{Entity, EntityFactory, tags};
use crate::types::EntityId;

pub mod keys {
    pub const WALL: &str = "Wall";

    pub const CAVE_WALL: &str = "CaveWall";
    pub const CAVE_FLOOR: &str = "CaveFloor";
    pub const RUBBLE: &str = "Rubble";

    pub const JUNGLE_THICKET: &str = "JungleThicket";
    pub const JUNGLE_FLOOR: &str = "JungleFloor";
    pub const GRASS: &str = "Grass";
    pub const TREE: &str = "Tree";

    pub const SANDSTONE: &str = "Sandstone";
    pub const SAND: &str = "Sand";
    pub const DUNE_GRASS: &str = "DuneGrass";
    pub const CACTUS: &str = "Cactus";

    pub const RUIN_WALL: &str = "RuinWall";
    pub const FLAGSTONE: &str = "Flagstone";
    pub const BROKEN_PILLAR: &str = "BrokenPillar";

    pub const BEDROCK: &str = "Bedrock";
    pub const DEEP_FLOOR: &str = "DeepFloor";
    pub const FUNGUS: &str = "Fungus";

    pub const STAIRS_UP: &str = "StairsUp";
    pub const STAIRS_DOWN: &str = "StairsDown";

    pub const GIANT_RAT: &str = "GiantRat";
    pub const CAVE_SPIDER: &str = "CaveSpider";
    pub const BAT: &str = "Bat";
    pub const SCORPION: &str = "Scorpion";
    pub const SAND_RAIDER: &str = "SandRaider";
    pub const JUNGLE_SNAKE: &str = "JungleSnake";
    pub const JAGUAR: &str = "Jaguar";
    pub const SKELETON: &str = "Skeleton";
    pub const CULTIST: &str = "Cultist";
    pub const GHOUL: &str = "Ghoul";
    pub const DEEP_CRAWLER: &str = "DeepCrawler";

    pub const CAVE_TROLL: &str = "CaveTroll";
    pub const SAND_WYRM: &str = "SandWyrm";
    pub const VINE_HORROR: &str = "VineHorror";
    pub const LICH: &str = "Lich";

    pub const VILLAGER: &str = "Villager";
    pub const VILLAGE_GUARD: &str = "VillageGuard";
    pub const ELDER: &str = "Elder";
    pub const MERCHANT: &str = "Merchant";
    pub const CARAVAN_GUARD: &str = "CaravanGuard";
    pub const PACK_MULE: &str = "PackMule";

    pub const HEALING_HERB: &str = "HealingHerb";
    pub const COIN_PURSE: &str = "CoinPurse";
    pub const TORCH: &str = "Torch";
}

pub mod layers {
    pub const GROUND: i32 = 0;
    pub const DECORATION: i32 = 1;
    pub const FEATURE: i32 = 2;
    pub const TERRAIN: i32 = 3;
    pub const ITEM: i32 = 4;
    pub const CREATURE: i32 = 5;
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BlueprintDef {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub layer: i32,
}

impl BlueprintDef {
    fn new(name: &str, tag_list: &[&str], layer: i32) -> Self {
        Self {
            name: name.to_string(),
            tags: tag_list.iter().map(|tag| tag.to_string()).collect(),
            layer,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct BlueprintCatalog {
    defs: BTreeMap<String, BlueprintDef>,
}

impl BlueprintCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every blueprint the built-in generation recipes place.
    pub fn build_default() -> Self {
        let wall = [tags::WALL, tags::SOLID];
        let floor = [tags::FLOOR];
        let decoration = [tags::DECORATION];
        let blocker = [tags::DECORATION, tags::SOLID];
        // Creatures never block terrain passability.
        let creature = [tags::CREATURE];
        let item = [tags::ITEM];
        let stairs = [tags::STAIRS];

        let mut catalog = Self::empty();
        for name in
            [keys::WALL, keys::CAVE_WALL, keys::JUNGLE_THICKET, keys::SANDSTONE, keys::RUIN_WALL]
        {
            catalog.insert(BlueprintDef::new(name, &wall, layers::TERRAIN));
        }
        catalog.insert(BlueprintDef::new(keys::BEDROCK, &wall, layers::TERRAIN));
        for name in [
            keys::CAVE_FLOOR,
            keys::JUNGLE_FLOOR,
            keys::GRASS,
            keys::SAND,
            keys::FLAGSTONE,
            keys::DEEP_FLOOR,
        ] {
            catalog.insert(BlueprintDef::new(name, &floor, layers::GROUND));
        }
        for name in [keys::RUBBLE, keys::DUNE_GRASS, keys::FUNGUS] {
            catalog.insert(BlueprintDef::new(name, &decoration, layers::DECORATION));
        }
        for name in [keys::TREE, keys::CACTUS, keys::BROKEN_PILLAR] {
            catalog.insert(BlueprintDef::new(name, &blocker, layers::FEATURE));
        }
        for name in [keys::STAIRS_UP, keys::STAIRS_DOWN] {
            catalog.insert(BlueprintDef::new(name, &stairs, layers::FEATURE));
        }
        for name in [
            keys::GIANT_RAT,
            keys::CAVE_SPIDER,
            keys::BAT,
            keys::SCORPION,
            keys::SAND_RAIDER,
            keys::JUNGLE_SNAKE,
            keys::JAGUAR,
            keys::SKELETON,
            keys::CULTIST,
            keys::GHOUL,
            keys::DEEP_CRAWLER,
            keys::CAVE_TROLL,
            keys::SAND_WYRM,
            keys::VINE_HORROR,
            keys::LICH,
            keys::VILLAGER,
            keys::VILLAGE_GUARD,
            keys::ELDER,
            keys::MERCHANT,
            keys::CARAVAN_GUARD,
            keys::PACK_MULE,
        ] {
            catalog.insert(BlueprintDef::new(name, &creature, layers::CREATURE));
        }
        for name in [keys::HEALING_HERB, keys::COIN_PURSE, keys::TORCH] {
            catalog.insert(BlueprintDef::new(name, &item, layers::ITEM));
        }
        catalog
    }

    /// Adds or replaces a definition by name.
    pub fn insert(&mut self, def: BlueprintDef) {
        self.defs.insert(def.name.clone(), def);
    }

    pub fn get(&self, name: &str) -> Option<&BlueprintDef> {
        self.defs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.defs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

/// Entity factory backed by a [`BlueprintCatalog`]; ids come from a slot map
/// so every created entity has a unique, stable handle.
pub struct CatalogFactory {
    catalog: BlueprintCatalog,
    spawned: SlotMap<EntityId, String>,
}

impl CatalogFactory {
    pub fn new(catalog: BlueprintCatalog) -> Self {
        Self { catalog, spawned: SlotMap::with_key() }
    }

    pub fn catalog(&self) -> &BlueprintCatalog {
        &self.catalog
    }

    pub fn spawned_count(&self) -> usize {
        self.spawned.len()
    }

    pub fn blueprint_of(&self, id: EntityId) -> Option<&str> {
        self.spawned.get(id).map(String::as_str)
    }
}

impl Default for CatalogFactory {
    fn default() -> Self {
        Self::new(BlueprintCatalog::build_default())
    }
}

impl EntityFactory for CatalogFactory {
    fn create_entity(&mut self, blueprint: &str) -> Option<Entity> {
        let def = self.catalog.get(blueprint)?;
        let tag_set: BTreeSet<String> = def.tags.iter().cloned().collect();
        let layer = def.layer;
        let id = self.spawned.insert(blueprint.to_string());
        Some(Entity { id, blueprint: blueprint.to_string(), tags: tag_set, layer })
    }
}
