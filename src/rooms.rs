use rand::prelude::*;

use crate::{PartitionTree, Rect, Room};

/// Leaves must be at least this large in both dimensions to hold a room.
pub const MIN_LEAF_EXTENT: i32 = 3;

/// Smallest room width or height.
pub const MIN_ROOM_EXTENT: i32 = 2;

/// Places one room strictly inside every leaf of `tree`.
pub fn place_rooms(tree: PartitionTree<()>, rng: &mut impl Rng) -> PartitionTree<Room> {
    tree.map_leaves(|bounds, ()| place_room(bounds, rng))
}

/// Picks a random room inside `bounds`.
///
/// The room is at most `extent - 1` wide and high, so it never fills its leaf.
pub fn place_room(bounds: &Rect, rng: &mut impl Rng) -> Room {
    assert!(
        bounds.width >= MIN_LEAF_EXTENT && bounds.height >= MIN_LEAF_EXTENT,
        "Leaf {bounds:?} is too small to hold a room"
    );

    let width = rng.random_range(MIN_ROOM_EXTENT..bounds.width);
    let height = rng.random_range(MIN_ROOM_EXTENT..bounds.height);
    let left_pad = rng.random_range(0..bounds.width - width);
    let top_pad = rng.random_range(0..bounds.height - height);

    Rect::new(bounds.x + left_pad, bounds.y + top_pad, width, height)
}

impl PartitionTree<Room> {
    /// Rooms in leaf order.
    pub fn rooms(&self) -> Vec<Room> {
        self.leaf_values().copied().collect()
    }
}
