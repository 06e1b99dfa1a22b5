//! Population tables and the builder that scatters their rolls over open cells.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::builder::{BuildContext, ZoneBuilder, priority};
use super::seed::ZoneRng;

pub trait PopulationTable {
    /// Blueprint names to spawn, in placement order.
    fn roll(&self, rng: &mut ZoneRng) -> Vec<String>;
}

/// Always yields the same list; draws nothing from the stream.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedTable(pub Vec<String>);

impl PopulationTable for FixedTable {
    fn roll(&self, _rng: &mut ZoneRng) -> Vec<String> {
        self.0.clone()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedEntry {
    pub blueprint: String,
    pub weight: u32,
}

impl WeightedEntry {
    pub fn new(blueprint: &str, weight: u32) -> Self {
        Self { blueprint: blueprint.to_string(), weight }
    }
}

/// `guaranteed` always spawns first; then a roll count in `min_rolls..=max_rolls`
/// picks entries by cumulative weight.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedTable {
    #[serde(default)]
    pub guaranteed: Vec<String>,
    pub min_rolls: usize,
    pub max_rolls: usize,
    pub entries: Vec<WeightedEntry>,
}

impl WeightedTable {
    fn pick(&self, rng: &mut ZoneRng, total_weight: u32) -> Option<&str> {
        let roll = rng.below(total_weight as usize) as u32;
        let mut cumulative = 0;
        for entry in &self.entries {
            cumulative += entry.weight;
            if roll < cumulative {
                return Some(&entry.blueprint);
            }
        }
        None
    }
}

impl PopulationTable for WeightedTable {
    fn roll(&self, rng: &mut ZoneRng) -> Vec<String> {
        let mut rolled = self.guaranteed.clone();
        let total_weight: u32 = self.entries.iter().map(|entry| entry.weight).sum();
        if total_weight == 0 || self.max_rolls < self.min_rolls {
            return rolled;
        }
        let count = rng.range_inclusive(self.min_rolls, self.max_rolls);
        for _ in 0..count {
            if let Some(blueprint) = self.pick(rng, total_weight) {
                rolled.push(blueprint.to_string());
            }
        }
        rolled
    }
}

pub struct PopulationBuilder {
    table: Arc<dyn PopulationTable>,
}

impl PopulationBuilder {
    pub fn new(table: Arc<dyn PopulationTable>) -> Self {
        Self { table }
    }
}

impl ZoneBuilder for PopulationBuilder {
    fn name(&self) -> &'static str {
        "population"
    }

    fn priority(&self) -> i32 {
        priority::POPULATION
    }

    fn build_zone(&mut self, context: &mut BuildContext<'_>) -> bool {
        let mut pool: Vec<_> =
            context.zone.cells().filter(|cell| cell.is_passable()).map(|cell| cell.pos()).collect();
        let rolled = self.table.roll(context.rng);

        let mut placed = 0;
        for blueprint in &rolled {
            if pool.is_empty() {
                break;
            }
            let index = context.rng.below(pool.len());
            let pos = pool.swap_remove(index);
            if context.place(blueprint, pos) {
                placed += 1;
            }
        }
        debug!(zone = context.zone.id(), rolled = rolled.len(), placed, "population placed");
        true
    }
}
