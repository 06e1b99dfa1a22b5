use anyhow::{Result, bail};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use worldgen::content::keys;
use worldgen::mapgen::grid::flood_fill;
use worldgen::{GenerationConfig, Pos, Zone, ZoneCoords, ZoneManager};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Zones to generate across random worlds
    #[arg(short, long, default_value_t = 200)]
    zones: u32,
}

fn pick(rng: &mut ChaCha8Rng, bound: u64) -> u64 {
    rng.next_u64() % bound
}

fn check_connected(zone: &Zone) -> Result<()> {
    let Some(start) = zone.first_passable() else {
        bail!("Invariant failed: {} has no open cell", zone.id());
    };
    let reachable = flood_fill(zone, start);
    let cut_off = zone.cells().find(|cell| cell.is_passable() && !reachable[zone.index(cell.pos())]);
    if let Some(cell) = cut_off {
        bail!("Invariant failed: {:?} in {} is unreachable", cell.pos(), zone.id());
    }
    Ok(())
}

fn stairs_at(zone: &Zone, blueprint: &str) -> Option<Pos> {
    zone.cells().find(|cell| cell.has_blueprint(blueprint)).map(|cell| cell.pos())
}

fn main() -> Result<()> {
    let args = Args::parse();
    println!("Starting fuzz harness on seed {} for {} zones...", args.seed, args.zones);

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let config = GenerationConfig { zone_width: 48, zone_height: 20, ..GenerationConfig::default() };

    for _ in 0..args.zones {
        let world_seed = rng.next_u64();
        let coords = ZoneCoords {
            x: pick(&mut rng, 20) as i32,
            y: pick(&mut rng, 20) as i32,
            depth: pick(&mut rng, u64::from(config.max_depth) + 1) as u32,
        };
        let mut manager = ZoneManager::overworld(world_seed, config.clone());

        let zone = manager.get_zone(&coords.zone_id())?;
        check_connected(zone)?;
        let up = stairs_at(zone, keys::STAIRS_UP);

        if let Some(above) = coords.above() {
            let upper = manager.get_zone(&above.zone_id())?;
            check_connected(upper)?;
            let down = stairs_at(upper, keys::STAIRS_DOWN);
            if up.is_none() || up != down {
                bail!("Invariant failed: stairs between {above} and {coords} do not line up");
            }
        }
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
