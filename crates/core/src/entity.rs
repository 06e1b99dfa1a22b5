//! Entity handle and factory contract consumed by zone builders.

use std::collections::BTreeSet;

use crate::types::EntityId;

pub mod tags {
    pub const WALL: &str = "Wall";
    pub const SOLID: &str = "Solid";
    pub const FLOOR: &str = "Floor";
    pub const DECORATION: &str = "Decoration";
    pub const CREATURE: &str = "Creature";
    pub const ITEM: &str = "Item";
    pub const STAIRS: &str = "Stairs";
}

/// A placed game object. Generation only inspects the blueprint name, the tag
/// set and the layer; everything else belongs to the entity model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    pub id: EntityId,
    pub blueprint: String,
    pub tags: BTreeSet<String>,
    pub layer: i32,
}

impl Entity {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_solid(&self) -> bool {
        self.has_tag(tags::SOLID)
    }

    /// Blocking terrain: tagged both wall and solid.
    pub fn is_wall(&self) -> bool {
        self.has_tag(tags::WALL) && self.is_solid()
    }
}

pub trait EntityFactory {
    /// Instantiates a named blueprint; `None` means "skip this placement".
    fn create_entity(&mut self, blueprint: &str) -> Option<Entity>;
}
