use std::collections::HashMap;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use world_generator::config::GeneratorConfig;
use world_generator::export;
use world_generator::macro_terrain::MacroClass;
use world_generator::world::{self, GeneratedWorld};

#[derive(Parser, Debug)]
#[command(name = "world_generator")]
#[command(about = "Generate layered region worlds with settlements and roads")]
struct Args {
    /// Domain half-size; the world covers [-half-size, half-size] squared
    #[arg(short = 'S', long, default_value = "2048")]
    half_size: f32,

    /// Random seed (uses a random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Minimum separation of macro terrain samples
    #[arg(long, default_value = "300")]
    macro_separation: f32,

    /// Minimum separation of biome samples
    #[arg(long, default_value = "100")]
    biome_separation: f32,

    /// Minimum separation of settlements
    #[arg(long, default_value = "800")]
    settlement_separation: f32,

    /// Export the generated world as JSON (specify output path)
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    let config = GeneratorConfig {
        half_size: args.half_size,
        macro_separation: args.macro_separation,
        biome_separation: args.biome_separation,
        settlement_separation: args.settlement_separation,
        ..GeneratorConfig::default()
    };

    println!("Generating world with seed: {}", seed);
    println!(
        "Domain: [{}, {}] squared",
        -config.half_size, config.half_size
    );

    let start = std::time::Instant::now();
    let world = world::generate_world(config, seed);
    println!("Generated in {:.2}s", start.elapsed().as_secs_f64());

    print_summary(&world);

    if let Some(path) = args.export {
        match export::save_snapshot(&world, &path) {
            Ok(()) => println!("Exported world snapshot to {}", path.display()),
            Err(e) => {
                eprintln!("Failed to export snapshot: {}", e);
                process::exit(1);
            }
        }
    }
}

fn print_summary(world: &GeneratedWorld) {
    let macro_total = world.macro_tier.regions.len();
    for class in MacroClass::all() {
        let count = world
            .macro_tier
            .regions
            .iter()
            .filter(|r| r.class == *class)
            .count();
        println!(
            "Macro tier: {} {} regions ({:.1}%)",
            count,
            class.display_name(),
            100.0 * count as f64 / macro_total.max(1) as f64
        );
    }

    let mut biome_counts: HashMap<&str, usize> = HashMap::new();
    for region in &world.biome_tier.regions {
        *biome_counts.entry(region.class.display_name()).or_insert(0) += 1;
    }
    let mut biome_counts: Vec<(&str, usize)> = biome_counts.into_iter().collect();
    biome_counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    println!("Biome tier: {} regions", world.biome_tier.regions.len());
    for (name, count) in biome_counts {
        println!("  {:<22} {}", name, count);
    }

    println!(
        "Placed {} settlements, {} roads",
        world.settlements.len(),
        world.roads.roads.len()
    );
}
