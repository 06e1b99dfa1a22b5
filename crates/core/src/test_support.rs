//! Shared fixtures for builder-level tests.

use std::collections::VecDeque;

use crate::connections::ConnectionRegistry;
use crate::content::{CatalogFactory, keys};
use crate::mapgen::builder::{BuildContext, ZoneBuilder};
use crate::mapgen::seed::ZoneRng;
use crate::types::Pos;
use crate::zone::Zone;

pub(crate) struct Harness {
    pub(crate) zone: Zone,
    pub(crate) factory: CatalogFactory,
    pub(crate) rng: ZoneRng,
    pub(crate) connections: ConnectionRegistry,
}

impl Harness {
    pub(crate) fn new(width: usize, height: usize, seed: u64) -> Self {
        Self {
            zone: Zone::new("test", width, height),
            factory: CatalogFactory::default(),
            rng: ZoneRng::from_seed(seed),
            connections: ConnectionRegistry::new(),
        }
    }

    pub(crate) fn with_id(mut self, zone_id: &str) -> Self {
        self.zone = Zone::new(zone_id, self.zone.width(), self.zone.height());
        self
    }

    pub(crate) fn context(&mut self) -> BuildContext<'_> {
        BuildContext {
            zone: &mut self.zone,
            factory: &mut self.factory,
            rng: &mut self.rng,
            connections: &mut self.connections,
        }
    }

    pub(crate) fn run(&mut self, builder: &mut dyn ZoneBuilder) -> bool {
        let mut context = self.context();
        builder.build_zone(&mut context)
    }

    /// Walls every cell.
    pub(crate) fn fill_walls(&mut self) {
        for index in 0..self.zone.width() * self.zone.height() {
            let pos = self.zone.pos_at(index);
            self.context().place(keys::CAVE_WALL, pos);
        }
    }

    /// Clears an inclusive rectangle to cave floor.
    pub(crate) fn open_rect(&mut self, left: i32, top: i32, right: i32, bottom: i32) {
        for y in top..=bottom {
            for x in left..=right {
                self.context().clear_to_floor(Pos { y, x }, keys::CAVE_FLOOR);
            }
        }
    }
}

/// Positions reachable from `start` over passable cells, 4-directional.
pub(crate) fn reachable_from(zone: &Zone, start: Pos) -> Vec<Pos> {
    let mut seen = vec![false; zone.width() * zone.height()];
    let mut open = VecDeque::from([start]);
    let mut reached = Vec::new();
    seen[zone.index(start)] = true;
    while let Some(pos) = open.pop_front() {
        reached.push(pos);
        for next in pos.orthogonal_neighbors() {
            if zone.is_passable(next) && !seen[zone.index(next)] {
                seen[zone.index(next)] = true;
                open.push_back(next);
            }
        }
    }
    reached
}

pub(crate) fn all_passable_connected(zone: &Zone) -> bool {
    let Some(start) = zone.first_passable() else {
        return true;
    };
    reachable_from(zone, start).len() == zone.passable_count()
}
