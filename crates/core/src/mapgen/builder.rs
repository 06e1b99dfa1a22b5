//! The builder contract every pipeline stage implements, plus shared placement helpers.

use crate::connections::ConnectionRegistry;
use crate::entity::EntityFactory;
use crate::types::Pos;
use crate::zone::Zone;

use super::seed::ZoneRng;

/// Observed priority bands; lower runs earlier.
pub mod priority {
    pub const BORDER: i32 = 1000;
    pub const TERRAIN: i32 = 2000;
    pub const STAIRS: i32 = 2500;
    pub const CONNECTIVITY: i32 = 3000;
    pub const POPULATION: i32 = 4000;
}

/// Everything one builder may touch during a generation run.
pub struct BuildContext<'a> {
    pub zone: &'a mut Zone,
    pub factory: &'a mut dyn EntityFactory,
    pub rng: &'a mut ZoneRng,
    pub connections: &'a mut ConnectionRegistry,
}

impl BuildContext<'_> {
    /// Instantiates and places a blueprint; a factory miss is a silent skip.
    pub fn place(&mut self, blueprint: &str, pos: Pos) -> bool {
        match self.factory.create_entity(blueprint) {
            Some(entity) => self.zone.add_entity(entity, pos),
            None => false,
        }
    }

    /// Removes blocking occupants and lays `floor` if nothing remains in the cell.
    pub fn clear_to_floor(&mut self, pos: Pos, floor: &str) {
        if !self.zone.in_bounds(pos) {
            return;
        }
        self.zone.clear_solid(pos);
        if self.zone.is_empty(pos) {
            self.place(floor, pos);
        }
    }
}

pub trait ZoneBuilder {
    fn name(&self) -> &'static str;

    fn priority(&self) -> i32;

    /// Mutates the zone; returns false when the builder could not do its job.
    fn build_zone(&mut self, context: &mut BuildContext<'_>) -> bool;
}
