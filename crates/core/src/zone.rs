//! Zone grid storage: fixed-size cells holding layered occupant entities.

use std::mem;

use slotmap::SecondaryMap;

use crate::entity::Entity;
use crate::types::{EntityId, Pos};

#[derive(Clone, Debug)]
pub struct Cell {
    pos: Pos,
    occupants: Vec<Entity>,
}

impl Cell {
    fn new(pos: Pos) -> Self {
        Self { pos, occupants: Vec::new() }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    /// Occupants in ascending layer order.
    pub fn occupants(&self) -> &[Entity] {
        &self.occupants
    }

    pub fn is_wall(&self) -> bool {
        self.occupants.iter().any(Entity::is_wall)
    }

    pub fn is_passable(&self) -> bool {
        !self.occupants.iter().any(Entity::is_solid)
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.occupants.iter().any(|entity| entity.has_tag(tag))
    }

    pub fn has_blueprint(&self, blueprint: &str) -> bool {
        self.occupants.iter().any(|entity| entity.blueprint == blueprint)
    }
}

#[derive(Clone, Debug)]
pub struct Zone {
    id: String,
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    locations: SecondaryMap<EntityId, Pos>,
}

impl Zone {
    pub fn new(id: impl Into<String>, width: usize, height: usize) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new(Pos { y: y as i32, x: x as i32 }));
            }
        }
        Self { id: id.into(), width, height, cells, locations: SecondaryMap::new() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(&self.cells[self.index(pos)])
    }

    /// Row-major iteration over every cell.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn for_each_cell(&self, mut visit: impl FnMut(&Cell, i32, i32)) {
        for cell in &self.cells {
            visit(cell, cell.pos.x, cell.pos.y);
        }
    }

    /// Places an entity above every occupant with an equal or lower layer.
    /// Returns false (dropping the entity) when `pos` is out of bounds.
    pub fn add_entity(&mut self, entity: Entity, pos: Pos) -> bool {
        if !self.in_bounds(pos) {
            return false;
        }
        if let Some(previous) = self.locations.get(entity.id).copied() {
            self.detach(entity.id, previous);
        }
        let index = self.index(pos);
        let occupants = &mut self.cells[index].occupants;
        let slot = occupants.partition_point(|occupant| occupant.layer <= entity.layer);
        self.locations.insert(entity.id, pos);
        occupants.insert(slot, entity);
        true
    }

    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        let pos = self.locations.remove(id)?;
        self.detach(id, pos)
    }

    pub fn entity_pos(&self, id: EntityId) -> Option<Pos> {
        self.locations.get(id).copied()
    }

    /// Removes every solid occupant at `pos` and returns them.
    pub fn clear_solid(&mut self, pos: Pos) -> Vec<Entity> {
        if !self.in_bounds(pos) {
            return Vec::new();
        }
        let index = self.index(pos);
        let occupants = mem::take(&mut self.cells[index].occupants);
        let (removed, kept): (Vec<Entity>, Vec<Entity>) =
            occupants.into_iter().partition(Entity::is_solid);
        self.cells[index].occupants = kept;
        for entity in &removed {
            self.locations.remove(entity.id);
        }
        removed
    }

    /// Out-of-bounds coordinates read as wall.
    pub fn is_wall(&self, pos: Pos) -> bool {
        self.cell(pos).is_none_or(Cell::is_wall)
    }

    /// Out-of-bounds coordinates are never passable.
    pub fn is_passable(&self, pos: Pos) -> bool {
        self.cell(pos).is_some_and(Cell::is_passable)
    }

    pub fn is_empty(&self, pos: Pos) -> bool {
        self.cell(pos).is_some_and(Cell::is_empty)
    }

    pub fn passable_mask(&self) -> Vec<bool> {
        self.cells.iter().map(Cell::is_passable).collect()
    }

    pub fn first_passable(&self) -> Option<Pos> {
        self.cells.iter().find(|cell| cell.is_passable()).map(Cell::pos)
    }

    pub fn passable_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_passable()).count()
    }

    pub fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }

    pub fn pos_at(&self, index: usize) -> Pos {
        Pos { y: (index / self.width) as i32, x: (index % self.width) as i32 }
    }

    /// Stable encoding of the grid contents: dimensions, then each cell's
    /// occupant blueprints in layer order. Entity ids are not included.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for cell in &self.cells {
            bytes.extend((cell.occupants.len() as u32).to_le_bytes());
            for entity in &cell.occupants {
                bytes.extend(entity.blueprint.as_bytes());
                bytes.push(0);
            }
        }
        bytes
    }

    fn detach(&mut self, id: EntityId, pos: Pos) -> Option<Entity> {
        let index = self.index(pos);
        let occupants = &mut self.cells[index].occupants;
        let slot = occupants.iter().position(|entity| entity.id == id)?;
        Some(occupants.remove(slot))
    }
}
