use proptest::prelude::*;
use worldgen::mapgen::grid::flood_fill;
use worldgen::{GenerationConfig, Pos, WorldMap, Zone, ZoneManager};

fn config() -> GenerationConfig {
    GenerationConfig { zone_width: 36, zone_height: 16, ..GenerationConfig::default() }
}

fn assert_single_component(zone: &Zone) {
    let start = zone.first_passable().expect("zone has an open cell");
    let reachable = flood_fill(zone, start);
    for cell in zone.cells() {
        if cell.is_passable() {
            assert!(
                reachable[zone.index(cell.pos())],
                "{:?} in {} is cut off from {:?}",
                cell.pos(),
                zone.id(),
                start
            );
        }
    }
}

fn assert_edges_reachable(zone: &Zone) {
    let start = zone.first_passable().expect("zone has an open cell");
    let reachable = flood_fill(zone, start);
    let (w, h) = (zone.width() as i32, zone.height() as i32);
    let edges: [(&str, Vec<Pos>); 4] = [
        ("north", (0..w).map(|x| Pos::new(x, 0)).collect()),
        ("south", (0..w).map(|x| Pos::new(x, h - 1)).collect()),
        ("west", (0..h).map(|y| Pos::new(0, y)).collect()),
        ("east", (0..h).map(|y| Pos::new(w - 1, y)).collect()),
    ];
    for (name, cells) in edges {
        assert!(
            cells.iter().any(|&pos| zone.is_passable(pos) && reachable[zone.index(pos)]),
            "{name} edge of {} has no connected opening",
            zone.id()
        );
    }
}

#[test]
fn every_route_yields_a_connected_zone_with_open_edges() {
    let mut manager = ZoneManager::overworld(42, config());
    let world_pois: Vec<Pos> = WorldMap::generate(42).pois().map(|(pos, _)| pos).collect();
    let mut ids: Vec<String> =
        world_pois.iter().map(|pos| format!("Overworld.{}.{}.0", pos.x, pos.y)).collect();
    ids.extend(["Overworld.0.0.0", "Overworld.19.19.0", "Overworld.5.12.1", "Overworld.5.12.3"]
        .map(String::from));

    for id in &ids {
        let zone = manager.get_zone(id).expect("zone should generate");
        assert_single_component(zone);
        assert_edges_reachable(zone);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn overworld_zones_are_single_components(
        seed in any::<u64>(),
        x in 0i32..20,
        y in 0i32..20,
        depth in 0u32..=3,
    ) {
        let mut manager = ZoneManager::overworld(seed, config());
        let zone = manager.get_zone(&format!("Overworld.{x}.{y}.{depth}")).unwrap();
        assert_single_component(zone);
        assert_edges_reachable(zone);
    }
}
