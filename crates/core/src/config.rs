//! Generation settings loaded from TOML, with defaults matching the built-in recipes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::content::{BlueprintCatalog, BlueprintDef};
use crate::error::ConfigError;
use crate::mapgen::{FailurePolicy, GroundRule, TerrainProfile};
use crate::types::Biome;

/// Smallest zone side that still leaves room for edge mouths and interior stairs.
pub const MIN_ZONE_SIDE: usize = 8;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub zone_width: usize,
    pub zone_height: usize,
    pub failure_policy: FailurePolicy,
    /// Deepest underground level reachable below an overworld zone.
    pub max_depth: u32,
    pub stairs_enabled: bool,
    pub profiles: ProfileSet,
    /// Added to the built-in catalog; a name already present is replaced.
    pub extra_blueprints: Vec<BlueprintDef>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            zone_width: 80,
            zone_height: 25,
            failure_policy: FailurePolicy::Abort,
            max_depth: 3,
            stairs_enabled: true,
            profiles: ProfileSet::default(),
            extra_blueprints: Vec::new(),
        }
    }
}

/// Terrain profile per overworld biome plus an optional fixed underground profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSet {
    pub cave: TerrainProfile,
    pub desert: TerrainProfile,
    pub jungle: TerrainProfile,
    pub ruins: TerrainProfile,
    /// `None` uses the depth-scaled preset.
    pub underground: Option<TerrainProfile>,
}

impl Default for ProfileSet {
    fn default() -> Self {
        Self {
            cave: TerrainProfile::cave(),
            desert: TerrainProfile::desert(),
            jungle: TerrainProfile::jungle(),
            ruins: TerrainProfile::ruins(),
            underground: None,
        }
    }
}

impl ProfileSet {
    pub fn for_biome(&self, biome: Biome) -> &TerrainProfile {
        match biome {
            Biome::Cave => &self.cave,
            Biome::Desert => &self.desert,
            Biome::Jungle => &self.jungle,
            Biome::Ruins => &self.ruins,
        }
    }

    pub fn underground(&self, depth: u32) -> TerrainProfile {
        self.underground.clone().unwrap_or_else(|| TerrainProfile::underground(depth))
    }

    fn iter(&self) -> impl Iterator<Item = &TerrainProfile> {
        [&self.cave, &self.desert, &self.jungle, &self.ruins].into_iter().chain(&self.underground)
    }
}

impl GenerationConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
    }

    /// Built-in blueprints merged with `extra_blueprints`.
    pub fn catalog(&self) -> BlueprintCatalog {
        let mut catalog = BlueprintCatalog::build_default();
        for def in &self.extra_blueprints {
            catalog.insert(def.clone());
        }
        catalog
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.zone_width < MIN_ZONE_SIDE || self.zone_height < MIN_ZONE_SIDE {
            return Err(ConfigError::Invalid(format!(
                "zone size {}x{} is below the {MIN_ZONE_SIDE}x{MIN_ZONE_SIDE} minimum",
                self.zone_width, self.zone_height
            )));
        }
        if let Some(def) = self.extra_blueprints.iter().find(|def| def.name.is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "extra blueprint with tags {:?} has an empty name",
                def.tags
            )));
        }

        let catalog = self.catalog();
        for profile in self.profiles.iter() {
            validate_profile(profile, &catalog)?;
        }
        Ok(())
    }
}

fn validate_profile(profile: &TerrainProfile, catalog: &BlueprintCatalog) -> Result<(), ConfigError> {
    let invalid = |detail: String| ConfigError::Invalid(format!("profile '{}': {detail}", profile.name));

    if profile.seed_chance > 100 {
        return Err(invalid(format!("seed_chance {} exceeds 100", profile.seed_chance)));
    }
    if !(0.0..=1.0).contains(&profile.noise_threshold) {
        return Err(invalid(format!("noise_threshold {} outside [0, 1]", profile.noise_threshold)));
    }

    let mut blueprints = vec![profile.wall_blueprint.as_str(), profile.floor_blueprint.as_str()];
    match &profile.ground {
        GroundRule::Palette { entries } => {
            let total: u32 = entries.iter().map(|entry| entry.weight).sum();
            if total > 100 {
                return Err(invalid(format!("palette weights sum to {total}, above 100")));
            }
            blueprints.extend(entries.iter().filter_map(|entry| entry.blueprint.as_deref()));
        }
        GroundRule::PositionHash { blueprint, density } => {
            if *density > 100 {
                return Err(invalid(format!("position hash density {density} exceeds 100")));
            }
            blueprints.push(blueprint);
        }
    }
    for decoration in &profile.decorations {
        if decoration.chance > 100 {
            return Err(invalid(format!("decoration '{}' chance exceeds 100", decoration.blueprint)));
        }
        blueprints.push(&decoration.blueprint);
    }

    if let Some(missing) = blueprints.into_iter().find(|name| !catalog.contains(name)) {
        return Err(invalid(format!("unknown blueprint '{missing}'")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::mapgen::Decoration;

    #[test]
    fn empty_document_yields_defaults() {
        let config = GenerationConfig::from_toml_str("").unwrap();
        assert_eq!(config, GenerationConfig::default());
        assert_eq!((config.zone_width, config.zone_height), (80, 25));
        assert_eq!(config.max_depth, 3);
    }

    #[test]
    fn partial_document_overrides_only_named_fields() {
        let config = GenerationConfig::from_toml_str(
            "zone_width = 40\nfailure_policy = \"continue\"\nstairs_enabled = false\n",
        )
        .unwrap();
        assert_eq!(config.zone_width, 40);
        assert_eq!(config.zone_height, 25);
        assert_eq!(config.failure_policy, FailurePolicy::Continue);
        assert!(!config.stairs_enabled);
    }

    #[test]
    fn load_reads_file_and_merges_extra_blueprints() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[[extra_blueprints]]\nname = \"Glowcap\"\ntags = [\"Decoration\"]\nlayer = 1\n"
        )
        .unwrap();

        let config = GenerationConfig::load(file.path()).unwrap();
        let catalog = config.catalog();
        assert!(catalog.contains("Glowcap"), "extra blueprint should join the catalog");
        assert_eq!(catalog.len(), BlueprintCatalog::build_default().len() + 1);
    }

    #[test]
    fn missing_file_reports_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        match GenerationConfig::load(&path) {
            Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            GenerationConfig::from_toml_str("zone_width = \"wide\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn tiny_zones_are_rejected() {
        assert!(matches!(
            GenerationConfig::from_toml_str("zone_width = 4"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn profile_referencing_unknown_blueprint_is_rejected() {
        let mut config = GenerationConfig::default();
        config.profiles.jungle.decorations.push(Decoration {
            blueprint: "Moonflower".to_string(),
            chance: 3,
        });
        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("Moonflower"), "got {error}");
    }

    #[test]
    fn underground_override_replaces_depth_scaling() {
        let mut config = GenerationConfig::default();
        assert_eq!(config.profiles.underground(2), TerrainProfile::underground(2));
        config.profiles.underground = Some(TerrainProfile::cave());
        assert_eq!(config.profiles.underground(2), TerrainProfile::cave());
    }
}
