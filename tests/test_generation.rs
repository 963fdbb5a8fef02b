//! Integration tests for the full level generation pipeline.
//!
//! Exercises: partition → room placement → door linking → corridor carving,
//! through the public `generate` entry points only.

use bsp_dungeon::{
    Axis, Door, GenerationConfig, Grid, Level, NodeId, Rect, Room, SplitKind, generate,
    generate_with_root_split,
    grid::Cell,
    partition::NodeKind,
};
use rand::{SeedableRng, rngs::StdRng};
use std::collections::{HashSet, VecDeque};

// ── Helpers ────────────────────────────────────────────────────────────

fn default_level(seed: u64) -> Level {
    let config = GenerationConfig::default();
    let mut rng = StdRng::seed_from_u64(seed);
    generate(config.level_rect, &config, &mut rng).unwrap()
}

fn large_level(seed: u64) -> Level {
    let config = GenerationConfig {
        grid_width: 96,
        grid_height: 64,
        level_rect: Rect::new(1, 1, 94, 62),
        stop_chance: 0.1,
    };
    let mut rng = StdRng::seed_from_u64(seed);
    generate(config.level_rect, &config, &mut rng).unwrap()
}

fn room_of(rooms: &[Room], door: &Door) -> usize {
    rooms
        .iter()
        .position(|room| door.edge.touches(room, door.x, door.y))
        .expect("door does not sit on a room edge")
}

/// Floor cells orthogonally reachable from `start`, not entering `blocked`.
fn flood(grid: &Grid, start: (i32, i32), blocked: &[Room]) -> HashSet<(i32, i32)> {
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some((x, y)) = queue.pop_front() {
        for next in [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)] {
            let inside_room = blocked.iter().any(|room| room.contains_point(next.0, next.1));
            if grid.is_floor(next.0, next.1) && !inside_room && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

fn levels() -> impl Iterator<Item = Level> {
    (0..48).map(default_level).chain((0..8).map(large_level))
}

// ── Tree shape ─────────────────────────────────────────────────────────

#[test]
fn leaves_tile_the_level_rect() {
    for level in levels() {
        let leaves = level.tree().leaf_bounds();
        let area: i64 = leaves.iter().map(Rect::area).sum();
        assert_eq!(area, level.level_rect().area());
        for (i, a) in leaves.iter().enumerate() {
            assert!(level.level_rect().contains_rect(a));
            for b in &leaves[i + 1..] {
                assert!(!a.overlaps(b));
            }
        }
    }
}

#[test]
fn internal_nodes_have_split_kinds() {
    for level in levels() {
        let tree = level.tree();
        for node in tree.nodes() {
            match node.kind() {
                NodeKind::Leaf(_) => assert!(matches!(
                    node.split(),
                    SplitKind::Root
                        | SplitKind::Top
                        | SplitKind::Bottom
                        | SplitKind::Left
                        | SplitKind::Right
                )),
                NodeKind::Internal { axis, .. } => assert_eq!(node.split(), axis.split_kind()),
            }
        }
    }
}

// ── Rooms ──────────────────────────────────────────────────────────────

#[test]
fn rooms_lie_strictly_inside_their_leaf() {
    for level in levels() {
        let tree = level.tree();
        assert_eq!(level.rooms().len(), tree.leaf_count());
        for id in tree.leaves() {
            let node = tree.node(id);
            let room = node.leaf().unwrap();
            let bounds = node.bounds();
            assert!(room.x >= bounds.x && room.y >= bounds.y);
            assert!(room.right() <= bounds.right() && room.bottom() <= bounds.bottom());
            assert!(room.right() < bounds.right() || room.x > bounds.x);
            assert!(room.bottom() < bounds.bottom() || room.y > bounds.y);
        }
    }
}

// ── Doors ──────────────────────────────────────────────────────────────

#[test]
fn twins_are_mutual() {
    for level in levels() {
        let doors = level.doors();
        for (index, door) in doors.iter().enumerate() {
            let twin = &doors[door.twin.index()];
            assert_eq!(twin.twin.index(), index);
        }
    }
}

#[test]
fn door_graph_is_a_spanning_tree() {
    for level in levels() {
        let rooms = level.rooms();
        let mut edges = vec![Vec::new(); rooms.len()];
        let pairs = level.door_list().pairs().collect::<Vec<_>>();
        assert_eq!(pairs.len(), rooms.len() - 1);

        for (a, b) in pairs {
            let (ra, rb) = (room_of(rooms, a), room_of(rooms, b));
            assert_ne!(ra, rb);
            edges[ra].push(rb);
            edges[rb].push(ra);
        }

        let mut seen = vec![false; rooms.len()];
        seen[0] = true;
        let mut queue = VecDeque::from([0]);
        while let Some(room) = queue.pop_front() {
            for &next in &edges[room] {
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }
        assert!(seen.iter().all(|&reached| reached));
    }
}

// ── Corridors ──────────────────────────────────────────────────────────

#[test]
fn every_door_pair_is_joined_by_floor() {
    for level in levels() {
        let grid = level.grid();
        for (a, b) in level.door_list().pairs() {
            assert!(grid.is_floor(a.x, a.y));
            assert!(grid.is_floor(b.x, b.y));
            assert!(flood(grid, a.position(), &[]).contains(&b.position()));
        }
    }
}

#[test]
fn floor_only_comes_from_corridors() {
    for level in levels() {
        let mut carved = Grid::new(level.grid().width(), level.grid().height());
        bsp_dungeon::corridor::rasterize(level.doors(), &mut carved);
        assert_eq!(&carved, level.grid());
    }
}

#[test]
fn reset_twice_equals_reset_once() {
    let level = default_level(3);
    let mut grid = level.into_grid();
    assert!(grid.floor_count() > 0);
    grid.reset();
    let once = grid.clone();
    grid.reset();
    assert_eq!(grid, once);
    assert!(grid.iter().all(|(_, _, cell)| cell == Cell::Wall));
}

// ── Determinism ────────────────────────────────────────────────────────

#[test]
fn same_seed_same_level() {
    for seed in 0..16 {
        assert_eq!(default_level(seed), default_level(seed));
    }
}

#[test]
fn different_seeds_differ() {
    let distinct = (0..16)
        .map(|seed| default_level(seed).rooms().to_vec())
        .collect::<HashSet<_>>();
    assert!(distinct.len() > 1);
}

// ── Scenario ───────────────────────────────────────────────────────────

#[test]
fn forced_horizontal_split_gives_one_corridor() {
    let config = GenerationConfig {
        stop_chance: 1.0,
        ..GenerationConfig::default()
    };
    for seed in 0..32 {
        let mut rng = StdRng::seed_from_u64(seed);
        let level =
            generate_with_root_split(config.level_rect, Axis::Horizontal, 15, &config, &mut rng)
                .unwrap();

        let tree = level.tree();
        let root = tree.node(tree.root());
        assert_eq!(root.split(), SplitKind::Horizontal);
        let (first, second): (NodeId, NodeId) = match *root.kind() {
            NodeKind::Internal { first, second, .. } => (first, second),
            NodeKind::Leaf(_) => panic!("root was not split"),
        };
        assert_eq!(tree.node(first).split(), SplitKind::Left);
        assert_eq!(tree.node(second).split(), SplitKind::Right);
        assert_eq!(*tree.node(first).bounds(), Rect::new(1, 1, 15, 22));
        assert_eq!(*tree.node(second).bounds(), Rect::new(16, 1, 15, 22));

        assert_eq!(level.rooms().len(), 2);
        assert_eq!(level.doors().len(), 2);

        let rooms = level.rooms();
        let outside = level
            .grid()
            .iter()
            .filter(|&(x, y, cell)| {
                cell.is_floor() && !rooms.iter().any(|room| room.contains_point(x, y))
            })
            .map(|(x, y, _)| (x, y))
            .collect::<HashSet<_>>();

        // The corridor leaves the left room once and enters the right room
        // once, so the cells between the rooms form a single run.
        let start = *outside.iter().next().expect("split column was not carved");
        let run = flood(level.grid(), start, rooms);
        assert_eq!(run, outside, "seed {seed} left more than one floor run");
    }
}

#[test]
fn undersized_level_is_rejected() {
    let config = GenerationConfig::default();
    let mut rng = StdRng::seed_from_u64(0);
    assert!(generate(Rect::new(1, 1, 2, 2), &config, &mut rng).is_err());
    assert!(
        generate_with_root_split(config.level_rect, Axis::Horizontal, 2, &config, &mut rng)
            .is_err()
    );
}
