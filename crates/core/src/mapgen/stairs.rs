//! Vertical links: matching up/down staircases between a zone and its neighbours in depth.

use tracing::debug;

use crate::connections::{ConnectionKind, ZoneConnection};
use crate::content::keys;
use crate::types::Pos;

use super::builder::{BuildContext, ZoneBuilder, priority};
use super::seed::stairs_anchor;

pub struct StairsBuilder {
    anchor_seed: u64,
    above: Option<String>,
    below: Option<String>,
    floor_blueprint: String,
}

impl StairsBuilder {
    pub fn new(anchor_seed: u64, floor_blueprint: impl Into<String>) -> Self {
        Self { anchor_seed, above: None, below: None, floor_blueprint: floor_blueprint.into() }
    }

    pub fn with_above(mut self, zone_id: impl Into<String>) -> Self {
        self.above = Some(zone_id.into());
        self
    }

    pub fn with_below(mut self, zone_id: impl Into<String>) -> Self {
        self.below = Some(zone_id.into());
        self
    }

    /// Where the link with `neighbor` lands in this zone, if either side already recorded it.
    fn linked_position(
        context: &BuildContext<'_>,
        neighbor: &str,
        toward: ConnectionKind,
    ) -> Option<Pos> {
        let zone_id = context.zone.id();
        let incoming = match toward {
            ConnectionKind::StairsUp => ConnectionKind::StairsDown,
            ConnectionKind::StairsDown => ConnectionKind::StairsUp,
        };
        context
            .connections
            .targeting(zone_id, incoming)
            .find(|link| link.source_zone == neighbor)
            .map(|link| link.target_pos)
            .or_else(|| {
                context
                    .connections
                    .originating(zone_id, toward)
                    .find(|link| link.target_zone == neighbor)
                    .map(|link| link.source_pos)
            })
    }

    fn clamp_interior(context: &BuildContext<'_>, pos: Pos) -> Pos {
        let max_x = (context.zone.width() as i32 - 2).max(0);
        let max_y = (context.zone.height() as i32 - 2).max(0);
        Pos { y: pos.y.clamp(max_y.min(1), max_y), x: pos.x.clamp(max_x.min(1), max_x) }
    }

    fn place_link(
        &self,
        context: &mut BuildContext<'_>,
        neighbor: &str,
        kind: ConnectionKind,
        anchor_zone: &str,
    ) {
        let pos = Self::linked_position(context, neighbor, kind).unwrap_or_else(|| {
            stairs_anchor(self.anchor_seed, anchor_zone, context.zone.width(), context.zone.height())
        });
        let pos = Self::clamp_interior(context, pos);
        let blueprint = match kind {
            ConnectionKind::StairsUp => keys::STAIRS_UP,
            ConnectionKind::StairsDown => keys::STAIRS_DOWN,
        };
        context.clear_to_floor(pos, &self.floor_blueprint);
        context.place(blueprint, pos);
        let zone_id = context.zone.id().to_string();
        context.connections.register(ZoneConnection {
            source_zone: zone_id,
            source_pos: pos,
            target_zone: neighbor.to_string(),
            target_pos: pos,
            kind,
        });
        debug!(zone = context.zone.id(), neighbor, ?kind, x = pos.x, y = pos.y, "stairs placed");
    }
}

impl ZoneBuilder for StairsBuilder {
    fn name(&self) -> &'static str {
        "stairs"
    }

    fn priority(&self) -> i32 {
        priority::STAIRS
    }

    fn build_zone(&mut self, context: &mut BuildContext<'_>) -> bool {
        if let Some(above) = &self.above {
            self.place_link(context, above, ConnectionKind::StairsUp, above);
        }
        if let Some(below) = &self.below {
            let own_id = context.zone.id().to_string();
            self.place_link(context, below, ConnectionKind::StairsDown, &own_id);
        }
        true
    }
}
