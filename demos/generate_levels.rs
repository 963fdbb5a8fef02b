use bsp_dungeon::{BatchStats, GenerationConfig, generate_batch};
use clap::Parser;
use std::path::PathBuf;

/// Batch generation configuration.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Config {
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, default_value_t = 0)]
    first_seed: u64,

    #[arg(short, long, default_value_t = 1000)]
    num_levels: u64,

    /// Print every generated level.
    #[clap(short, long)]
    print: bool,
}

fn main() {
    let args = Config::parse();
    let config = match &args.config {
        Some(path) => GenerationConfig::load(path).expect("Failed to load config"),
        None => GenerationConfig::default(),
    };

    let seeds = (args.first_seed..args.first_seed + args.num_levels).collect::<Vec<_>>();
    let levels = generate_batch(&config, &seeds, true).expect("Failed to generate levels");

    if args.print {
        for (seed, level) in seeds.iter().zip(&levels) {
            println!("Seed {seed}\n{level}");
        }
    }

    if let Some(stats) = BatchStats::from_levels(&levels) {
        println!("Levels            : {}", stats.levels);
        println!("Rooms (min/max)   : {}/{}", stats.min_rooms, stats.max_rooms);
        println!("Rooms (mean)      : {:.2}", stats.mean_rooms);
        println!("Floor cells (mean): {:.2}", stats.mean_floor);
    }
}
