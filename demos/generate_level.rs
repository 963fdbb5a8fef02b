use bsp_dungeon::{Dungeon, GenerationConfig};
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use std::path::PathBuf;

/// Dungeon generation configuration.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Config {
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of extra regenerations to print after the first level.
    #[arg(short, long, default_value_t = 0)]
    regenerate: usize,

    #[clap(short, long)]
    verbose: bool,
}

fn main() {
    let args = Config::parse();
    let config = match &args.config {
        Some(path) => GenerationConfig::load(path).expect("Failed to load config"),
        None => GenerationConfig::default(),
    };
    if args.verbose {
        println!("Grid size         : {}x{}", config.grid_width, config.grid_height);
        println!("Level rect        : {:?}", config.level_rect);
        println!("Stop chance       : {}", config.stop_chance);
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut dungeon = Dungeon::new(config);
    for pass in 0..=args.regenerate {
        let level = dungeon
            .regenerate(&mut rng)
            .expect("Failed to generate level");
        if args.verbose {
            println!("Pass              : {pass}");
            println!("Rooms             : {}", level.rooms().len());
            println!("Door pairs        : {}", level.door_list().pair_count());
            println!("Tree depth        : {}", level.tree().depth());
        }
        println!("{level}");
    }
}
