//! Registry of directed links between zones, indexed under both endpoints.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionKind {
    StairsDown,
    StairsUp,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneConnection {
    pub source_zone: String,
    pub source_pos: Pos,
    pub target_zone: String,
    pub target_pos: Pos,
    pub kind: ConnectionKind,
}

#[derive(Clone, Debug, Default)]
pub struct ConnectionRegistry {
    connections: Vec<ZoneConnection>,
    by_zone: HashMap<String, Vec<usize>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a link under both endpoint ids. Returns false for an exact duplicate.
    pub fn register(&mut self, connection: ZoneConnection) -> bool {
        if self.connections.contains(&connection) {
            return false;
        }
        let index = self.connections.len();
        self.by_zone.entry(connection.source_zone.clone()).or_default().push(index);
        if connection.target_zone != connection.source_zone {
            self.by_zone.entry(connection.target_zone.clone()).or_default().push(index);
        }
        self.connections.push(connection);
        true
    }

    /// Every link with `zone_id` at either end, in registration order.
    pub fn for_zone<'a>(
        &'a self,
        zone_id: &str,
    ) -> impl Iterator<Item = &'a ZoneConnection> + use<'a> {
        self.by_zone
            .get(zone_id)
            .into_iter()
            .flatten()
            .map(|&index| &self.connections[index])
    }

    pub fn targeting<'a>(
        &'a self,
        zone_id: &'a str,
        kind: ConnectionKind,
    ) -> impl Iterator<Item = &'a ZoneConnection> {
        self.for_zone(zone_id)
            .filter(move |connection| connection.target_zone == zone_id && connection.kind == kind)
    }

    pub fn originating<'a>(
        &'a self,
        zone_id: &'a str,
        kind: ConnectionKind,
    ) -> impl Iterator<Item = &'a ZoneConnection> {
        self.for_zone(zone_id)
            .filter(move |connection| connection.source_zone == zone_id && connection.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
