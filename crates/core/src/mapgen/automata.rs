//! Binary wall/open masks from random seeding plus synchronous neighbour-count smoothing.

use std::mem;

use serde::{Deserialize, Serialize};

use super::seed::ZoneRng;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomataRules {
    /// Wall-neighbour counts that keep a wall cell walled.
    pub survive: Vec<u8>,
    /// Wall-neighbour counts that turn an open cell into wall.
    pub born: Vec<u8>,
}

impl Default for AutomataRules {
    fn default() -> Self {
        Self { survive: vec![5, 6, 7, 8], born: vec![6, 7, 8] }
    }
}

#[derive(Clone, Debug)]
pub struct CellularAutomataGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    pub seed_chance: u32,
    pub seed_borders: bool,
    pub border_depth: usize,
    pub passes: u32,
    pub rules: AutomataRules,
}

impl CellularAutomataGrid {
    /// Defaults reproduce the organic-blob cave signature: 55% seed, two passes,
    /// survive {5..8}, born {6..8}, border seeding one cell deep.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
            seed_chance: 55,
            seed_borders: true,
            border_depth: 1,
            passes: 2,
            rules: AutomataRules::default(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn generate(&mut self, rng: &mut ZoneRng) {
        for y in 0..self.height {
            for x in 0..self.width {
                let index = y * self.width + x;
                self.cells[index] = self.is_pinned(x, y) || rng.chance(self.seed_chance);
            }
        }

        let mut next = vec![false; self.cells.len()];
        for _ in 0..self.passes {
            for y in 0..self.height {
                for x in 0..self.width {
                    let index = y * self.width + x;
                    next[index] = if self.is_pinned(x, y) {
                        true
                    } else {
                        let walls = self.wall_neighbors(x as i32, y as i32);
                        if self.cells[index] {
                            self.rules.survive.contains(&walls)
                        } else {
                            self.rules.born.contains(&walls)
                        }
                    };
                }
            }
            mem::swap(&mut self.cells, &mut next);
        }
    }

    /// Out-of-bounds reads as wall.
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return true;
        }
        self.cells[(y as usize) * self.width + (x as usize)]
    }

    pub fn is_open(&self, x: i32, y: i32) -> bool {
        !self.is_wall(x, y)
    }

    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|&&wall| !wall).count()
    }

    fn is_pinned(&self, x: usize, y: usize) -> bool {
        self.seed_borders
            && (x < self.border_depth
                || y < self.border_depth
                || x + self.border_depth >= self.width
                || y + self.border_depth >= self.height)
    }

    fn wall_neighbors(&self, x: i32, y: i32) -> u8 {
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if (dx != 0 || dy != 0) && self.is_wall(x + dx, y + dy) {
                    count += 1;
                }
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn grid(width: usize, height: usize, seed_chance: u32, passes: u32) -> CellularAutomataGrid {
        let mut grid = CellularAutomataGrid::new(width, height);
        grid.seed_chance = seed_chance;
        grid.passes = passes;
        grid
    }

    #[test]
    fn full_seed_chance_without_passes_is_all_wall() {
        let mut automata = grid(10, 10, 100, 0);
        automata.generate(&mut ZoneRng::from_seed(1));
        for y in 0..10 {
            for x in 0..10 {
                assert!(automata.is_wall(x, y), "({x},{y}) should be wall");
            }
        }
    }

    #[test]
    fn zero_seed_chance_with_border_leaves_open_interior() {
        let mut automata = grid(5, 5, 0, 0);
        automata.generate(&mut ZoneRng::from_seed(1));
        for y in 0..5 {
            for x in 0..5 {
                let ring = x == 0 || y == 0 || x == 4 || y == 4;
                assert_eq!(automata.is_wall(x, y), ring, "({x},{y})");
            }
        }
    }

    #[test]
    fn out_of_bounds_is_wall_and_not_open() {
        let automata = grid(3, 3, 0, 0);
        assert!(automata.is_wall(-1, 1));
        assert!(automata.is_wall(1, 3));
        assert!(!automata.is_open(3, 0));
    }

    #[test]
    fn open_field_stays_open_without_born_neighbours() {
        let mut automata = grid(7, 7, 0, 3);
        automata.seed_borders = false;
        automata.generate(&mut ZoneRng::from_seed(3));
        assert_eq!(automata.open_count(), 49);
    }

    #[test]
    fn solid_field_survives_smoothing_because_outside_counts_as_wall() {
        let mut automata = grid(6, 4, 100, 4);
        automata.seed_borders = false;
        automata.generate(&mut ZoneRng::from_seed(8));
        assert_eq!(automata.open_count(), 0);
    }

    #[test]
    fn same_seed_yields_identical_mask() {
        let mut left = grid(40, 20, 55, 2);
        let mut right = grid(40, 20, 55, 2);
        left.generate(&mut ZoneRng::from_seed(2024));
        right.generate(&mut ZoneRng::from_seed(2024));
        assert_eq!(left.cells, right.cells);
    }

    proptest! {
        #[test]
        fn border_cells_stay_wall_for_any_pass_count(
            seed in any::<u64>(),
            passes in 0_u32..5,
            depth in 1_usize..3,
            seed_chance in 0_u32..=100
        ) {
            let mut automata = grid(16, 12, seed_chance, passes);
            automata.border_depth = depth;
            automata.generate(&mut ZoneRng::from_seed(seed));
            for y in 0..12_usize {
                for x in 0..16_usize {
                    let distance_to_edge = x.min(y).min(15 - x).min(11 - y);
                    if distance_to_edge < depth {
                        prop_assert!(automata.is_wall(x as i32, y as i32));
                    }
                }
            }
        }
    }
}
