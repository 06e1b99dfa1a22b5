use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;
use worldgen::entity::tags;
use worldgen::{Cell, GenerationConfig, WorldMap, Zone, ZoneManager};

#[derive(Parser)]
#[command(author, version, about = "Render generated worlds and zones as text", long_about = None)]
struct Args {
    /// World seed shared by the map and every zone
    #[arg(short, long, default_value_t = 42, global = true)]
    seed: u64,
    /// Emit JSON instead of an ASCII rendering
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// The 20x20 overworld with biomes and points of interest
    World,
    /// One zone, routed through the overworld
    Zone {
        /// Zone id such as Overworld.10.10.0
        #[arg(short, long, default_value = "Overworld.10.10.0")]
        id: String,
        /// TOML generation config; defaults apply when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match args.command {
        Command::World => print_world(args.seed, args.json),
        Command::Zone { id, config } => print_zone(args.seed, &id, config, args.json),
    }
}

fn print_world(seed: u64, as_json: bool) -> Result<()> {
    let world = WorldMap::generate(seed);
    if as_json {
        println!("{}", serde_json::to_string_pretty(&world).context("Failed to serialize world")?);
        return Ok(());
    }
    print!("{}", world.render_ascii());
    for (pos, poi) in world.pois() {
        println!("({:>2},{:>2}) {:?} tier {} {}", pos.x, pos.y, poi.kind, poi.tier, poi.name);
    }
    Ok(())
}

fn print_zone(seed: u64, zone_id: &str, config: Option<PathBuf>, as_json: bool) -> Result<()> {
    let config = match config {
        Some(path) => GenerationConfig::load(&path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GenerationConfig::default(),
    };
    let mut manager = ZoneManager::overworld(seed, config);
    let zone = manager
        .get_zone(zone_id)
        .with_context(|| format!("Failed to generate zone {zone_id}"))?;
    let rows = render_zone(zone);

    if as_json {
        let document = json!({
            "id": zone.id(),
            "width": zone.width(),
            "height": zone.height(),
            "passable": zone.passable_count(),
            "rows": rows,
        });
        println!("{}", serde_json::to_string_pretty(&document).context("Failed to serialize zone")?);
    } else {
        for row in rows {
            println!("{row}");
        }
    }
    Ok(())
}

fn render_zone(zone: &Zone) -> Vec<String> {
    let mut rows = vec![String::with_capacity(zone.width()); zone.height()];
    zone.for_each_cell(|cell, _x, y| rows[y as usize].push(glyph(cell)));
    rows
}

/// Topmost occupant wins.
fn glyph(cell: &Cell) -> char {
    let Some(top) = cell.occupants().last() else {
        return ' ';
    };
    if top.has_tag(tags::CREATURE) {
        top.blueprint.chars().next().unwrap_or('c')
    } else if top.has_tag(tags::STAIRS) {
        if top.blueprint.ends_with("Up") { '<' } else { '>' }
    } else if top.has_tag(tags::ITEM) {
        '*'
    } else if top.is_wall() {
        '#'
    } else if top.is_solid() {
        '&'
    } else if top.has_tag(tags::DECORATION) {
        ','
    } else {
        '.'
    }
}
