//! Point-of-interest records and the per-biome lookup tables behind them.

use serde::{Deserialize, Serialize};

use crate::content::keys;
use crate::types::Biome;

use crate::mapgen::ZoneRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PoiKind {
    Village,
    Lair,
    MerchantCamp,
}

impl PoiKind {
    /// Minimum Manhattan distance from every earlier point of interest.
    pub fn min_spacing(self) -> u32 {
        match self {
            PoiKind::Village => 4,
            PoiKind::Lair | PoiKind::MerchantCamp => 3,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            PoiKind::Village => 'V',
            PoiKind::Lair => 'L',
            PoiKind::MerchantCamp => 'M',
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub kind: PoiKind,
    pub name: String,
    pub faction: Option<String>,
    pub tier: u8,
    /// Boss blueprint, lairs only.
    pub boss: Option<String>,
}

pub fn faction_for(biome: Biome) -> &'static str {
    match biome {
        Biome::Cave => "Deepfolk",
        Biome::Desert => "Sand Nomads",
        Biome::Jungle => "Vine Tribes",
        Biome::Ruins => "Remnant Order",
    }
}

pub const MERCHANT_FACTION: &str = "Merchant Guild";

pub fn lair_boss_for(biome: Biome) -> &'static str {
    match biome {
        Biome::Cave => keys::CAVE_TROLL,
        Biome::Desert => keys::SAND_WYRM,
        Biome::Jungle => keys::VINE_HORROR,
        Biome::Ruins => keys::LICH,
    }
}

fn boss_title(biome: Biome) -> &'static str {
    match biome {
        Biome::Cave => "Cave Troll",
        Biome::Desert => "Sand Wyrm",
        Biome::Jungle => "Vine Horror",
        Biome::Ruins => "Lich",
    }
}

/// Tier band from Manhattan distance to the world centre.
pub fn tier_for_distance(distance: u32) -> u8 {
    match distance {
        0..=4 => 1,
        5..=8 => 2,
        _ => 3,
    }
}

const VILLAGE_PREFIXES: [&str; 8] =
    ["Amber", "Stone", "Ash", "Willow", "Copper", "Mist", "Thorn", "Salt"];
const VILLAGE_SUFFIXES: [&str; 6] = ["ford", "hollow", "reach", "well", "stead", "moor"];
const LAIR_NOUNS: [&str; 5] = ["Den", "Hollow", "Pit", "Nest", "Maw"];
const MERCHANT_NAMES: [&str; 6] = ["Oskar", "Tamsin", "Berik", "Yusra", "Halvard", "Ines"];

pub fn starting_village() -> PointOfInterest {
    PointOfInterest {
        kind: PoiKind::Village,
        name: "Hearthstone".to_string(),
        faction: Some(faction_for(Biome::Cave).to_string()),
        tier: 1,
        boss: None,
    }
}

pub(super) fn roll_point_of_interest(
    kind: PoiKind,
    biome: Biome,
    tier: u8,
    rng: &mut ZoneRng,
) -> PointOfInterest {
    match kind {
        PoiKind::Village => {
            let prefix = VILLAGE_PREFIXES[rng.below(VILLAGE_PREFIXES.len())];
            let suffix = VILLAGE_SUFFIXES[rng.below(VILLAGE_SUFFIXES.len())];
            PointOfInterest {
                kind,
                name: format!("{prefix}{suffix}"),
                faction: Some(faction_for(biome).to_string()),
                tier,
                boss: None,
            }
        }
        PoiKind::Lair => {
            let noun = LAIR_NOUNS[rng.below(LAIR_NOUNS.len())];
            PointOfInterest {
                kind,
                name: format!("{noun} of the {}", boss_title(biome)),
                faction: None,
                tier,
                boss: Some(lair_boss_for(biome).to_string()),
            }
        }
        PoiKind::MerchantCamp => {
            let merchant = MERCHANT_NAMES[rng.below(MERCHANT_NAMES.len())];
            PointOfInterest {
                kind,
                name: format!("{merchant}'s Camp"),
                faction: Some(MERCHANT_FACTION.to_string()),
                tier,
                boss: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_follow_distance_bands() {
        assert_eq!(tier_for_distance(0), 1);
        assert_eq!(tier_for_distance(4), 1);
        assert_eq!(tier_for_distance(5), 2);
        assert_eq!(tier_for_distance(8), 2);
        assert_eq!(tier_for_distance(9), 3);
        assert_eq!(tier_for_distance(20), 3);
    }

    #[test]
    fn only_lairs_carry_a_boss() {
        let mut rng = ZoneRng::from_seed(3);
        for biome in Biome::ALL {
            let lair = roll_point_of_interest(PoiKind::Lair, biome, 2, &mut rng);
            assert_eq!(lair.boss.as_deref(), Some(lair_boss_for(biome)));
            assert!(lair.faction.is_none());

            let village = roll_point_of_interest(PoiKind::Village, biome, 2, &mut rng);
            assert!(village.boss.is_none());
            assert_eq!(village.faction.as_deref(), Some(faction_for(biome)));
        }
    }
}
