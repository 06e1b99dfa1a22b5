//! Connectivity repair: merges every passable region into one and opens a mouth on each edge.

use std::cmp::Ordering;

use tracing::debug;

use crate::types::{Edge, Pos};

use super::builder::{BuildContext, ZoneBuilder, priority};
use super::grid::{first_unreached, flood_fill, nearest_reachable};

/// Corner inset for edge mouths.
const MOUTH_INSET: usize = 2;
/// Percent chance that a merge corridor step also opens a side cell.
const WIDEN_CHANCE: u32 = 75;

pub struct ConnectivityBuilder {
    floor_blueprint: String,
}

impl ConnectivityBuilder {
    pub fn new(floor_blueprint: impl Into<String>) -> Self {
        Self { floor_blueprint: floor_blueprint.into() }
    }

    /// Walks from `from` toward `target`, clearing floor until it steps onto a reachable cell.
    /// At most `width + height` cells are walked; returns how many were.
    fn carve_corridor(
        &self,
        context: &mut BuildContext<'_>,
        reachable: &[bool],
        from: Pos,
        target: Pos,
        widen: bool,
    ) -> usize {
        let max_steps = context.zone.width() + context.zone.height();
        let mut current = from;
        let mut walked = 0;
        for _ in 0..max_steps {
            if context.zone.in_bounds(current) && reachable[context.zone.index(current)] {
                break;
            }
            context.clear_to_floor(current, &self.floor_blueprint);
            walked += 1;

            let dx = target.x - current.x;
            let dy = target.y - current.y;
            if dx == 0 && dy == 0 {
                break;
            }
            let horizontal = match dx.abs().cmp(&dy.abs()) {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => context.rng.coin(),
            };

            if widen && context.rng.chance(WIDEN_CHANCE) {
                let side = if context.rng.coin() { 1 } else { -1 };
                let beside = if horizontal {
                    Pos { y: current.y + side, x: current.x }
                } else {
                    Pos { y: current.y, x: current.x + side }
                };
                context.clear_to_floor(beside, &self.floor_blueprint);
            }

            if horizontal {
                current.x += dx.signum();
            } else {
                current.y += dy.signum();
            }
        }
        walked
    }

    fn mouth_position(context: &mut BuildContext<'_>, edge: Edge) -> Pos {
        let width = context.zone.width();
        let height = context.zone.height();
        let along = |context: &mut BuildContext<'_>, length: usize| {
            let inset = MOUTH_INSET.min(length.saturating_sub(1) / 2);
            context.rng.range_inclusive(inset, length - 1 - inset) as i32
        };
        match edge {
            Edge::North => Pos { y: 0, x: along(context, width) },
            Edge::South => Pos { y: height as i32 - 1, x: along(context, width) },
            Edge::West => Pos { y: along(context, height), x: 0 },
            Edge::East => Pos { y: along(context, height), x: width as i32 - 1 },
        }
    }
}

impl ZoneBuilder for ConnectivityBuilder {
    fn name(&self) -> &'static str {
        "connectivity"
    }

    fn priority(&self) -> i32 {
        priority::CONNECTIVITY
    }

    fn build_zone(&mut self, context: &mut BuildContext<'_>) -> bool {
        let Some(start) = context.zone.first_passable() else {
            return false;
        };

        let mut reachable = flood_fill(context.zone, start);
        let mut merges = 0;
        let mut corridor_cells = 0;
        while let Some(stray) = first_unreached(context.zone, &reachable) {
            let Some(target) = nearest_reachable(context.zone, &reachable, stray) else {
                break;
            };
            corridor_cells += self.carve_corridor(context, &reachable, stray, target, true);
            reachable = flood_fill(context.zone, start);
            merges += 1;
        }

        for edge in Edge::ALL {
            let mouth = Self::mouth_position(context, edge);
            context.clear_to_floor(mouth, &self.floor_blueprint);
            if !reachable[context.zone.index(mouth)] {
                if let Some(target) = nearest_reachable(context.zone, &reachable, mouth) {
                    corridor_cells +=
                        self.carve_corridor(context, &reachable, mouth, target, false);
                }
                reachable = flood_fill(context.zone, start);
            }
        }

        debug!(zone = context.zone.id(), merges, corridor_cells, "connectivity repaired");
        true
    }
}
