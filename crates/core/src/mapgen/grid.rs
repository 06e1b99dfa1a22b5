//! Reachability primitives over a zone's passable cells.

use std::collections::VecDeque;

use crate::types::Pos;
use crate::zone::Zone;

/// 4-directional breadth-first reachable set from `start`, as a row-major bitmap.
pub fn flood_fill(zone: &Zone, start: Pos) -> Vec<bool> {
    let mut reachable = vec![false; zone.width() * zone.height()];
    if !zone.is_passable(start) {
        return reachable;
    }
    reachable[zone.index(start)] = true;
    let mut open = VecDeque::from([start]);
    while let Some(pos) = open.pop_front() {
        for next in pos.orthogonal_neighbors() {
            if !zone.is_passable(next) {
                continue;
            }
            let index = zone.index(next);
            if !reachable[index] {
                reachable[index] = true;
                open.push_back(next);
            }
        }
    }
    reachable
}

/// First passable cell, in row-major order, outside the reachable set.
pub fn first_unreached(zone: &Zone, reachable: &[bool]) -> Option<Pos> {
    zone.cells()
        .enumerate()
        .find(|(index, cell)| !reachable[*index] && cell.is_passable())
        .map(|(_, cell)| cell.pos())
}

/// Nearest reachable cell by Manhattan distance; ties resolve to the first in row-major order.
pub fn nearest_reachable(zone: &Zone, reachable: &[bool], from: Pos) -> Option<Pos> {
    let mut best: Option<(u32, Pos)> = None;
    for (index, &reached) in reachable.iter().enumerate() {
        if !reached {
            continue;
        }
        let pos = zone.pos_at(index);
        let distance = from.manhattan(pos);
        if best.is_none_or(|(best_distance, _)| distance < best_distance) {
            best = Some((distance, pos));
        }
    }
    best.map(|(_, pos)| pos)
}
