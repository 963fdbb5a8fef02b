use anyhow::Result;
use log::debug;
use rand::prelude::*;
use std::fmt::{Display, Formatter};

use crate::{
    Door, Doors, GenerationConfig, Grid, PartitionTree, Rect, Room,
    corridor::rasterize,
    grid::Cell,
    doors::{LinkOutcome, link},
    partition::{self, Axis},
    rooms::place_rooms,
};

const RENDER_ROOM: char = 'o';
const RENDER_DOOR: char = '+';

/// One generated level: partition tree, rooms, doors and carved grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    level_rect: Rect,
    tree: PartitionTree<Room>,
    rooms: Vec<Room>,
    doors: Doors,
    grid: Grid,
}

impl Level {
    pub fn level_rect(&self) -> &Rect {
        &self.level_rect
    }

    pub fn tree(&self) -> &PartitionTree<Room> {
        &self.tree
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn doors(&self) -> &[Door] {
        self.doors.as_slice()
    }

    pub fn door_list(&self) -> &Doors {
        &self.doors
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Room containing `(x, y)`, if any.
    pub fn room_at(&self, x: i32, y: i32) -> Option<&Room> {
        self.rooms.iter().find(|room| room.contains_point(x, y))
    }

    /// ASCII symbol for `(x, y)` with rooms and doors drawn over the grid.
    pub fn symbol_at(&self, x: i32, y: i32) -> char {
        if self.doors().iter().any(|door| door.position() == (x, y)) {
            RENDER_DOOR
        } else if self.room_at(x, y).is_some() {
            RENDER_ROOM
        } else {
            self.grid.get(x, y).map_or(' ', Cell::symbol)
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        for y in 0..self.grid.height() as i32 {
            for x in 0..self.grid.width() as i32 {
                write!(f, "{}", self.symbol_at(x, y))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Generates a level inside `level_rect`.
///
/// Deterministic for a given `rng` stream.
pub fn generate(level_rect: Rect, config: &GenerationConfig, rng: &mut impl Rng) -> Result<Level> {
    config.validate_level_rect(&level_rect)?;
    let tree = partition::build(level_rect, config.stop_chance, rng);
    let grid = Grid::new(config.grid_width, config.grid_height);
    Ok(finish(level_rect, tree, grid, rng))
}

/// Generates a level whose root region is split along `axis` at `offset`.
pub fn generate_with_root_split(
    level_rect: Rect,
    axis: Axis,
    offset: i32,
    config: &GenerationConfig,
    rng: &mut impl Rng,
) -> Result<Level> {
    config.validate_level_rect(&level_rect)?;
    let tree =
        partition::build_with_root_split(level_rect, axis, offset, config.stop_chance, rng)?;
    let grid = Grid::new(config.grid_width, config.grid_height);
    Ok(finish(level_rect, tree, grid, rng))
}

fn finish(level_rect: Rect, tree: PartitionTree<()>, mut grid: Grid, rng: &mut impl Rng) -> Level {
    let tree = place_rooms(tree, rng);
    let rooms = tree.rooms();
    let doors = link(&tree, rng);

    grid.reset();
    rasterize(doors.as_slice(), &mut grid);

    match doors.outcome() {
        LinkOutcome::NoCandidate => debug!(
            "Generated {} rooms, {} door pairs, {} floor cells",
            rooms.len(),
            doors.pair_count(),
            grid.floor_count()
        ),
        LinkOutcome::Candidate(room) => debug!("Generated a single unsplit room {room:?}"),
    }

    Level {
        level_rect,
        tree,
        rooms,
        doors,
        grid,
    }
}

/// Holds the current level and regenerates it on request.
///
/// The grid is carried over and reset between passes.
pub struct Dungeon {
    config: GenerationConfig,
    level: Option<Level>,
}

impl Dungeon {
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            config,
            level: None,
        }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Current level, if one has been generated.
    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    /// Replaces the current level with a fresh one.
    ///
    /// On error the previous level is kept.
    pub fn regenerate(&mut self, rng: &mut impl Rng) -> Result<&Level> {
        let level_rect = self.config.level_rect;
        self.config.validate_level_rect(&level_rect)?;

        let tree = partition::build(level_rect, self.config.stop_chance, rng);
        let grid = match self.level.take() {
            Some(previous) => previous.into_grid(),
            None => Grid::new(self.config.grid_width, self.config.grid_height),
        };
        Ok(&*self.level.insert(finish(level_rect, tree, grid, rng)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn rejects_undersized_level() {
        let mut rng = StdRng::seed_from_u64(0);
        let config = GenerationConfig::default();
        assert!(generate(Rect::new(1, 1, 2, 22), &config, &mut rng).is_err());
        assert!(generate(Rect::new(1, 1, 40, 22), &config, &mut rng).is_err());
    }

    #[test]
    fn rejects_level_past_coordinate_range() {
        let mut rng = StdRng::seed_from_u64(0);
        let config = GenerationConfig::default();
        assert!(generate(Rect::new(i32::MAX - 5, 1, 30, 22), &config, &mut rng).is_err());
        assert!(
            generate_with_root_split(
                Rect::new(1, i32::MAX - 5, 30, 22),
                Axis::Horizontal,
                15,
                &config,
                &mut rng
            )
            .is_err()
        );
    }

    #[test]
    fn tiny_level_has_one_room_and_no_doors() {
        let mut rng = StdRng::seed_from_u64(0);
        let config = GenerationConfig::default();
        let level = generate(Rect::new(0, 0, 5, 5), &config, &mut rng).unwrap();
        assert_eq!(level.rooms().len(), 1);
        assert!(level.doors().is_empty());
        assert_eq!(level.grid().floor_count(), 0);
    }

    #[test]
    fn display_marks_rooms_and_doors() {
        let mut rng = StdRng::seed_from_u64(8);
        let config = GenerationConfig::default();
        let level = generate(config.level_rect, &config, &mut rng).unwrap();
        let text = level.to_string();
        assert_eq!(text.lines().count(), 24);
        assert!(text.lines().all(|line| line.chars().count() == 32));
        assert_eq!(
            text.chars().filter(|&c| c == RENDER_DOOR).count(),
            level
                .doors()
                .iter()
                .map(Door::position)
                .collect::<std::collections::HashSet<_>>()
                .len()
        );
        assert!(text.contains(RENDER_ROOM));
    }

    #[test]
    fn regenerate_replaces_level_and_resets_grid() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut dungeon = Dungeon::new(GenerationConfig::default());
        assert!(dungeon.level().is_none());

        let first = dungeon.regenerate(&mut rng).unwrap().clone();
        let second = dungeon.regenerate(&mut rng).unwrap().clone();
        assert_ne!(first, second);

        // A fresh grid carved from the same doors matches the reused one.
        let mut fresh = Grid::new(32, 24);
        rasterize(second.doors(), &mut fresh);
        assert_eq!(&fresh, second.grid());
    }

    #[test]
    fn failed_regeneration_keeps_previous_level() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut dungeon = Dungeon::new(GenerationConfig::default());
        let previous = dungeon.regenerate(&mut rng).unwrap().clone();

        dungeon.config.stop_chance = 2.0;
        assert!(dungeon.regenerate(&mut rng).is_err());
        assert_eq!(dungeon.level(), Some(&previous));
    }
}
