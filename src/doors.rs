//! Door linking over a BSP tree.
//!
//! Every internal node links one room from each child subtree with a single
//! door pair. Each subtree hands one representative room up to its parent, so
//! the resulting door graph is a spanning tree over the rooms.

use rand::prelude::*;

use crate::{NodeId, PartitionTree, Room, partition::Axis, partition::NodeKind};

/// Index of a door in its [`Doors`] list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DoorId(usize);

impl DoorId {
    #[cfg(test)]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Side of a room a door is cut into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub fn opposite(self) -> Self {
        match self {
            Edge::Left => Edge::Right,
            Edge::Right => Edge::Left,
            Edge::Top => Edge::Bottom,
            Edge::Bottom => Edge::Top,
        }
    }

    /// Whether `(x, y)` lies on this edge's boundary row or column of `room`.
    pub fn touches(self, room: &Room, x: i32, y: i32) -> bool {
        if !room.contains_point(x, y) {
            return false;
        }
        match self {
            Edge::Left => x == room.x,
            Edge::Right => x == room.right() - 1,
            Edge::Top => y == room.y,
            Edge::Bottom => y == room.bottom() - 1,
        }
    }
}

/// One end of a corridor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Door {
    pub x: i32,
    pub y: i32,
    pub edge: Edge,
    pub twin: DoorId,
}

impl Door {
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

/// What a linking step hands back to its caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Room standing in for the linked subtree.
    Candidate(Room),
    NoCandidate,
}

/// Side of its parent a subtree hangs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Branch {
    /// Left or top child.
    First,
    /// Right or bottom child.
    Second,
}

/// Doors produced by one linking pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Doors {
    doors: Vec<Door>,
    outcome: LinkOutcome,
}

impl Doors {
    pub fn as_slice(&self) -> &[Door] {
        &self.doors
    }

    pub fn len(&self) -> usize {
        self.doors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doors.is_empty()
    }

    pub fn get(&self, id: DoorId) -> &Door {
        &self.doors[id.0]
    }

    pub fn twin(&self, door: &Door) -> &Door {
        self.get(door.twin)
    }

    /// Outcome of linking the root node.
    pub fn outcome(&self) -> LinkOutcome {
        self.outcome
    }

    /// Every linked pair, once.
    pub fn pairs(&self) -> impl Iterator<Item = (&Door, &Door)> + '_ {
        self.doors
            .chunks_exact(2)
            .map(|pair| (&pair[0], &pair[1]))
    }

    pub fn pair_count(&self) -> usize {
        self.doors.len() / 2
    }
}

/// Links sibling subtrees of `tree` with door pairs.
///
/// A split root yields [`LinkOutcome::NoCandidate`], an unsplit root yields
/// its only room.
pub fn link(tree: &PartitionTree<Room>, rng: &mut impl Rng) -> Doors {
    let mut doors = Vec::with_capacity(2 * tree.internal_count());
    let outcome = match *tree.node(tree.root()).kind() {
        NodeKind::Leaf(room) => LinkOutcome::Candidate(room),
        NodeKind::Internal {
            axis,
            first,
            second,
        } => {
            link_children(tree, axis, first, second, &mut doors, rng);
            LinkOutcome::NoCandidate
        }
    };
    Doors { doors, outcome }
}

fn link_branch(
    tree: &PartitionTree<Room>,
    id: NodeId,
    branch: Branch,
    doors: &mut Vec<Door>,
    rng: &mut impl Rng,
) -> Room {
    match *tree.node(id).kind() {
        NodeKind::Leaf(room) => room,
        NodeKind::Internal {
            axis,
            first,
            second,
        } => {
            let (first_room, second_room) = link_children(tree, axis, first, second, doors, rng);
            // Hand up the room nearest the parent's sibling.
            match branch {
                Branch::First => second_room,
                Branch::Second => first_room,
            }
        }
    }
}

fn link_children(
    tree: &PartitionTree<Room>,
    axis: Axis,
    first: NodeId,
    second: NodeId,
    doors: &mut Vec<Door>,
    rng: &mut impl Rng,
) -> (Room, Room) {
    let first_room = link_branch(tree, first, Branch::First, doors, rng);
    let second_room = link_branch(tree, second, Branch::Second, doors, rng);

    let (first_edge, second_edge) = match axis {
        Axis::Horizontal => (Edge::Right, Edge::Left),
        Axis::Vertical => (Edge::Bottom, Edge::Top),
    };
    let (ax, ay) = door_position(&first_room, first_edge, rng);
    let (bx, by) = door_position(&second_room, second_edge, rng);

    let a = DoorId(doors.len());
    let b = DoorId(doors.len() + 1);
    doors.push(Door {
        x: ax,
        y: ay,
        edge: first_edge,
        twin: b,
    });
    doors.push(Door {
        x: bx,
        y: by,
        edge: second_edge,
        twin: a,
    });

    (first_room, second_room)
}

/// Random cell on `edge` of `room`, excluding the far corner along the edge.
fn door_position(room: &Room, edge: Edge, rng: &mut impl Rng) -> (i32, i32) {
    debug_assert!(
        room.width >= 2 && room.height >= 2,
        "Room {room:?} is too small for a door"
    );
    match edge {
        Edge::Left => (room.x, room.y + rng.random_range(0..room.height - 1)),
        Edge::Right => (
            room.right() - 1,
            room.y + rng.random_range(0..room.height - 1),
        ),
        Edge::Top => (room.x + rng.random_range(0..room.width - 1), room.y),
        Edge::Bottom => (
            room.x + rng.random_range(0..room.width - 1),
            room.bottom() - 1,
        ),
    }
}
