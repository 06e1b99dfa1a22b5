//! Zone terrain generation split into composable, priority-ordered builders.

pub mod automata;
pub mod border;
pub mod builder;
pub mod connectivity;
pub mod grid;
pub mod noise;
pub mod pipeline;
pub mod population;
pub mod seed;
pub mod stairs;
pub mod terrain;

pub use automata::{AutomataRules, CellularAutomataGrid};
pub use border::BorderBuilder;
pub use builder::{BuildContext, ZoneBuilder, priority};
pub use connectivity::ConnectivityBuilder;
pub use noise::{NoiseField, PerlinField, ScalarField};
pub use pipeline::{FailurePolicy, Pipeline, PipelineReport};
pub use population::{FixedTable, PopulationBuilder, PopulationTable, WeightedEntry, WeightedTable};
pub use seed::{GENERATION_VERSION, ZoneRng, derive_zone_seed};
pub use stairs::StairsBuilder;
pub use terrain::{Decoration, GroundRule, PaletteEntry, TerrainBuilder, TerrainProfile};
