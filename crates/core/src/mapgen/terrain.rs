//! Data-driven carve-and-place terrain: one routine, parameterised per biome by a profile.

use serde::{Deserialize, Serialize};

use crate::content::keys;
use crate::types::{Biome, Pos};

use super::automata::CellularAutomataGrid;
use super::builder::{BuildContext, ZoneBuilder, priority};
use super::noise::{NoiseField, PerlinField};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// `None` leaves the carved cell bare.
    pub blueprint: Option<String>,
    /// Share of a 0..100 roll.
    pub weight: u32,
}

impl PaletteEntry {
    pub fn new(blueprint: &str, weight: u32) -> Self {
        Self { blueprint: Some(blueprint.to_string()), weight }
    }

    pub fn nothing(weight: u32) -> Self {
        Self { blueprint: None, weight }
    }
}

/// How the primary ground blueprint is chosen for each carved cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum GroundRule {
    /// One percentage roll from the shared stream per carved cell.
    Palette { entries: Vec<PaletteEntry> },
    /// `|x*31 + y*17| mod 100 < density`; consumes no random draws.
    PositionHash { blueprint: String, density: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoration {
    pub blueprint: String,
    pub chance: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainProfile {
    pub name: String,
    pub seed_chance: u32,
    pub passes: u32,
    pub border_depth: usize,
    pub noise_threshold: f64,
    pub noise_octaves: u32,
    /// Carve the outermost ring too; also disables border seeding of the automata.
    pub carve_outer_ring: bool,
    pub wall_blueprint: String,
    /// Laid by corridor carving and stairs placement.
    pub floor_blueprint: String,
    pub ground: GroundRule,
    pub decorations: Vec<Decoration>,
}

impl Default for TerrainProfile {
    fn default() -> Self {
        Self::cave()
    }
}

impl TerrainProfile {
    pub fn cave() -> Self {
        Self {
            name: "cave".to_string(),
            seed_chance: 55,
            passes: 2,
            border_depth: 1,
            noise_threshold: 0.47,
            noise_octaves: 3,
            carve_outer_ring: false,
            wall_blueprint: keys::CAVE_WALL.to_string(),
            floor_blueprint: keys::CAVE_FLOOR.to_string(),
            ground: GroundRule::Palette {
                entries: vec![
                    PaletteEntry::new(keys::CAVE_FLOOR, 80),
                    PaletteEntry::new(keys::RUBBLE, 15),
                    PaletteEntry::nothing(5),
                ],
            },
            decorations: Vec::new(),
        }
    }

    pub fn jungle() -> Self {
        Self {
            name: "jungle".to_string(),
            seed_chance: 45,
            passes: 2,
            border_depth: 1,
            noise_threshold: 0.47,
            noise_octaves: 3,
            carve_outer_ring: true,
            wall_blueprint: keys::JUNGLE_THICKET.to_string(),
            floor_blueprint: keys::JUNGLE_FLOOR.to_string(),
            ground: GroundRule::PositionHash { blueprint: keys::GRASS.to_string(), density: 95 },
            decorations: vec![Decoration { blueprint: keys::TREE.to_string(), chance: 6 }],
        }
    }

    pub fn desert() -> Self {
        Self {
            name: "desert".to_string(),
            seed_chance: 42,
            passes: 2,
            border_depth: 1,
            noise_threshold: 0.5,
            noise_octaves: 2,
            carve_outer_ring: false,
            wall_blueprint: keys::SANDSTONE.to_string(),
            floor_blueprint: keys::SAND.to_string(),
            ground: GroundRule::Palette {
                entries: vec![
                    PaletteEntry::new(keys::SAND, 85),
                    PaletteEntry::new(keys::DUNE_GRASS, 10),
                    PaletteEntry::nothing(5),
                ],
            },
            decorations: vec![Decoration { blueprint: keys::CACTUS.to_string(), chance: 3 }],
        }
    }

    pub fn ruins() -> Self {
        Self {
            name: "ruins".to_string(),
            seed_chance: 50,
            passes: 3,
            border_depth: 1,
            noise_threshold: 0.45,
            noise_octaves: 4,
            carve_outer_ring: false,
            wall_blueprint: keys::RUIN_WALL.to_string(),
            floor_blueprint: keys::FLAGSTONE.to_string(),
            ground: GroundRule::Palette {
                entries: vec![
                    PaletteEntry::new(keys::FLAGSTONE, 70),
                    PaletteEntry::new(keys::RUBBLE, 25),
                    PaletteEntry::nothing(5),
                ],
            },
            decorations: vec![Decoration { blueprint: keys::BROKEN_PILLAR.to_string(), chance: 4 }],
        }
    }

    /// Deeper levels seed more rock and smooth longer.
    pub fn underground(depth: u32) -> Self {
        let step = depth.min(4);
        Self {
            name: "underground".to_string(),
            seed_chance: 55 + step * 2,
            passes: 2 + step.min(2),
            border_depth: 1,
            noise_threshold: 0.47 - 0.02 * f64::from(step.min(3)),
            noise_octaves: 3,
            carve_outer_ring: false,
            wall_blueprint: keys::BEDROCK.to_string(),
            floor_blueprint: keys::DEEP_FLOOR.to_string(),
            ground: GroundRule::Palette {
                entries: vec![
                    PaletteEntry::new(keys::DEEP_FLOOR, 85),
                    PaletteEntry::new(keys::FUNGUS, 10),
                    PaletteEntry::nothing(5),
                ],
            },
            decorations: Vec::new(),
        }
    }

    pub fn for_biome(biome: Biome) -> Self {
        match biome {
            Biome::Cave => Self::cave(),
            Biome::Desert => Self::desert(),
            Biome::Jungle => Self::jungle(),
            Biome::Ruins => Self::ruins(),
        }
    }
}

pub fn position_hash(x: i32, y: i32) -> u32 {
    ((i64::from(x) * 31 + i64::from(y) * 17).abs() % 100) as u32
}

pub struct TerrainBuilder {
    profile: TerrainProfile,
    noise: Box<dyn NoiseField>,
}

impl TerrainBuilder {
    pub fn new(profile: TerrainProfile) -> Self {
        Self::with_noise(profile, Box::new(PerlinField::default()))
    }

    pub fn with_noise(profile: TerrainProfile, noise: Box<dyn NoiseField>) -> Self {
        Self { profile, noise }
    }

    pub fn profile(&self) -> &TerrainProfile {
        &self.profile
    }

    fn carve_cell(&self, context: &mut BuildContext<'_>, pos: Pos) {
        context.zone.clear_solid(pos);

        match &self.profile.ground {
            GroundRule::Palette { entries } => {
                let roll = context.rng.percent();
                let mut cumulative = 0;
                for entry in entries {
                    cumulative += entry.weight;
                    if roll < cumulative {
                        if let Some(blueprint) = &entry.blueprint {
                            context.place(blueprint, pos);
                        }
                        break;
                    }
                }
            }
            GroundRule::PositionHash { blueprint, density } => {
                if position_hash(pos.x, pos.y) < *density {
                    context.place(blueprint, pos);
                }
            }
        }

        for decoration in &self.profile.decorations {
            if context.rng.chance(decoration.chance) {
                context.place(&decoration.blueprint, pos);
            }
        }
    }
}

impl ZoneBuilder for TerrainBuilder {
    fn name(&self) -> &'static str {
        "terrain"
    }

    fn priority(&self) -> i32 {
        priority::TERRAIN
    }

    fn build_zone(&mut self, context: &mut BuildContext<'_>) -> bool {
        let width = context.zone.width();
        let height = context.zone.height();

        for index in 0..width * height {
            let pos = context.zone.pos_at(index);
            if !context.zone.is_wall(pos) {
                context.place(&self.profile.wall_blueprint, pos);
            }
        }

        let mut automata = CellularAutomataGrid::new(width, height);
        automata.seed_chance = self.profile.seed_chance;
        automata.passes = self.profile.passes;
        automata.seed_borders = !self.profile.carve_outer_ring;
        automata.border_depth = self.profile.border_depth;
        automata.generate(context.rng);

        let field = self.noise.generate_field(width, height, context.rng, self.profile.noise_octaves);

        let inset = usize::from(!self.profile.carve_outer_ring);
        for y in inset..height.saturating_sub(inset) {
            for x in inset..width.saturating_sub(inset) {
                if automata.is_open(x as i32, y as i32)
                    || field.get(x, y) <= self.profile.noise_threshold
                {
                    self.carve_cell(context, Pos { y: y as i32, x: x as i32 });
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::noise::ScalarField;
    use crate::mapgen::seed::ZoneRng;
    use crate::test_support::Harness;

    /// Every cell reads as `value`, leaving carving to the automata alone.
    struct ConstantField(f64);

    impl NoiseField for ConstantField {
        fn generate_field(
            &self,
            width: usize,
            height: usize,
            _rng: &mut ZoneRng,
            _octaves: u32,
        ) -> ScalarField {
            ScalarField::from_values(width, height, vec![self.0; width * height])
        }
    }

    #[test]
    fn position_hash_matches_documented_formula() {
        assert_eq!(position_hash(0, 0), 0);
        assert_eq!(position_hash(1, 1), 48);
        assert_eq!(position_hash(3, 0), 93);
        assert_eq!(position_hash(-5, 2), 21);
    }

    #[test]
    fn cave_keeps_outer_ring_walled() {
        let mut harness = Harness::new(30, 12, 17);
        harness.run(&mut TerrainBuilder::new(TerrainProfile::cave()));
        for cell in harness.zone.cells() {
            let pos = cell.pos();
            if pos.x == 0 || pos.y == 0 || pos.x == 29 || pos.y == 11 {
                assert!(cell.is_wall(), "outer ring {pos:?} must stay wall");
            }
        }
        assert!(harness.zone.passable_count() > 0);
    }

    #[test]
    fn noise_below_threshold_carves_every_interior_cell() {
        let mut harness = Harness::new(10, 6, 3);
        let mut profile = TerrainProfile::cave();
        profile.seed_chance = 100;
        harness.run(&mut TerrainBuilder::with_noise(profile, Box::new(ConstantField(0.0))));
        for cell in harness.zone.cells() {
            let pos = cell.pos();
            let interior = pos.x > 0 && pos.y > 0 && pos.x < 9 && pos.y < 5;
            assert_eq!(cell.is_passable(), interior, "{pos:?}");
        }
    }

    #[test]
    fn full_seed_and_high_noise_carve_nothing() {
        let mut harness = Harness::new(10, 6, 3);
        let mut profile = TerrainProfile::cave();
        profile.seed_chance = 100;
        harness.run(&mut TerrainBuilder::with_noise(profile, Box::new(ConstantField(1.0))));
        assert_eq!(harness.zone.passable_count(), 0);
        assert!(harness.zone.cells().all(|cell| cell.is_wall()));
    }

    #[test]
    fn jungle_carves_outer_ring_and_places_grass_by_position() {
        let mut harness = Harness::new(12, 8, 21);
        let mut profile = TerrainProfile::jungle();
        profile.decorations.clear();
        harness.run(&mut TerrainBuilder::with_noise(profile, Box::new(ConstantField(0.0))));

        for cell in harness.zone.cells() {
            let pos = cell.pos();
            assert!(!cell.is_wall(), "jungle carves every cell including {pos:?}");
            assert_eq!(
                cell.has_blueprint(keys::GRASS),
                position_hash(pos.x, pos.y) < 95,
                "grass at {pos:?} must follow the position hash"
            );
        }
    }

    #[test]
    fn jungle_grass_layout_is_independent_of_the_stream() {
        let grass_cells = |seed: u64| {
            let mut harness = Harness::new(12, 8, seed);
            let mut profile = TerrainProfile::jungle();
            profile.decorations.clear();
            harness.run(&mut TerrainBuilder::with_noise(profile, Box::new(ConstantField(0.0))));
            harness
                .zone
                .cells()
                .filter(|cell| cell.has_blueprint(keys::GRASS))
                .map(|cell| cell.pos())
                .collect::<Vec<_>>()
        };
        assert_eq!(grass_cells(1), grass_cells(999));
    }

    #[test]
    fn cave_palette_places_floor_rubble_or_nothing() {
        let mut harness = Harness::new(40, 20, 5);
        let mut profile = TerrainProfile::cave();
        profile.seed_chance = 0;
        harness.run(&mut TerrainBuilder::with_noise(profile, Box::new(ConstantField(1.0))));

        let mut floors = 0;
        let mut rubble = 0;
        let mut bare = 0;
        for cell in harness.zone.cells().filter(|cell| cell.is_passable()) {
            if cell.has_blueprint(keys::CAVE_FLOOR) {
                floors += 1;
            } else if cell.has_blueprint(keys::RUBBLE) {
                rubble += 1;
            } else {
                assert!(cell.is_empty());
                bare += 1;
            }
        }
        assert!(floors > rubble && rubble > bare, "floor={floors} rubble={rubble} bare={bare}");
    }

    #[test]
    fn profiles_round_trip_through_toml() {
        let profile = TerrainProfile::jungle();
        let text = toml::to_string(&profile).expect("serialize profile");
        let decoded: TerrainProfile = toml::from_str(&text).expect("deserialize profile");
        assert_eq!(decoded, profile);
    }
}
