use worldgen::world::WORLD_CENTER;
use worldgen::world::poi::faction_for;
use worldgen::{Biome, PoiKind, WorldMap};

#[test]
fn seed_42_starts_in_a_cave_village() {
    let world = WorldMap::generate(42);
    assert_eq!(world.biome_at(10, 10), Some(Biome::Cave));
    assert_eq!(world.get_poi(10, 10).map(|poi| poi.kind), Some(PoiKind::Village));
}

#[test]
fn poi_counts_stay_within_quotas() {
    for seed in 0..32 {
        let world = WorldMap::generate(seed);
        let count = |kind| world.pois().filter(|(_, poi)| poi.kind == kind).count();
        assert!((1..=7).contains(&count(PoiKind::Village)), "seed {seed}");
        assert!(count(PoiKind::Lair) <= 5, "seed {seed}");
        assert!(count(PoiKind::MerchantCamp) <= 3, "seed {seed}");
    }
}

#[test]
fn villages_carry_their_biome_faction() {
    let world = WorldMap::generate(7);
    for (pos, poi) in world.pois().filter(|(pos, _)| *pos != WORLD_CENTER) {
        if poi.kind == PoiKind::Village {
            let biome = world.biome_at(pos.x, pos.y).unwrap();
            assert_eq!(poi.faction.as_deref(), Some(faction_for(biome)));
        }
    }
}

#[test]
fn ascii_render_is_twenty_rows_of_twenty() {
    let rendered = WorldMap::generate(3).render_ascii();
    let rows: Vec<&str> = rendered.lines().collect();
    assert_eq!(rows.len(), 20);
    assert!(rows.iter().all(|row| row.chars().count() == 20));
    assert_eq!(rows[10].chars().nth(10), Some('V'));
}
