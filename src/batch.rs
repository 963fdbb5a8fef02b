use anyhow::{Context, Result};
use rand::{SeedableRng, rngs::StdRng};
use rayon::prelude::*;

use crate::{GenerationConfig, Level, level::generate, progress::BatchProgress};

/// Generates one level per seed in parallel.
///
/// Each level gets its own grid and `StdRng`, so the result for a seed does
/// not depend on the rest of the batch.
pub fn generate_batch(
    config: &GenerationConfig,
    seeds: &[u64],
    show_progress: bool,
) -> Result<Vec<Level>> {
    config.validate()?;

    let progress = BatchProgress::new(seeds.len(), show_progress);
    let levels = seeds
        .par_iter()
        .map(|&seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let level = generate(config.level_rect, config, &mut rng)
                .with_context(|| format!("Failed to generate level for seed {seed}"));
            progress.increment();
            level
        })
        .collect::<Result<Vec<_>>>();
    progress.finish();
    levels
}

/// Summary of a batch of levels.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchStats {
    pub levels: usize,
    pub min_rooms: usize,
    pub max_rooms: usize,
    pub mean_rooms: f64,
    pub mean_floor: f64,
}

impl BatchStats {
    pub fn from_levels(levels: &[Level]) -> Option<Self> {
        let room_counts = levels.iter().map(|level| level.rooms().len());
        let min_rooms = room_counts.clone().min()?;
        let max_rooms = room_counts.clone().max()?;
        let count = levels.len() as f64;
        let mean_rooms = room_counts.sum::<usize>() as f64 / count;
        let mean_floor = levels
            .iter()
            .map(|level| level.grid().floor_count())
            .sum::<usize>() as f64
            / count;
        Some(Self {
            levels: levels.len(),
            min_rooms,
            max_rooms,
            mean_rooms,
            mean_floor,
        })
    }
}
