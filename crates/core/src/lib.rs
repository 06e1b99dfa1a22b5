pub mod config;
pub mod connections;
pub mod content;
pub mod entity;
pub mod error;
pub mod mapgen;
pub mod types;
pub mod world;
pub mod zone;
pub mod zone_manager;

#[cfg(test)]
mod test_support;

pub use config::GenerationConfig;
pub use connections::{ConnectionKind, ConnectionRegistry, ZoneConnection};
pub use content::{BlueprintCatalog, BlueprintDef, CatalogFactory};
pub use entity::{Entity, EntityFactory};
pub use error::{ConfigError, ZoneError};
pub use types::*;
pub use world::{PoiKind, PointOfInterest, WorldMap};
pub use zone::{Cell, Zone};
pub use zone_manager::{
    DefaultSelector, OverworldSelector, PipelineSelector, ZoneCoords, ZoneManager,
};
