//! Binary space partitioning of a level rectangle.
//!
//! Nodes live in a flat arena in depth-first pre-order, so a leaf scan of the
//! arena visits leaves left-to-right (top-to-bottom) and dropping the tree
//! releases every node at once.

use anyhow::{Result, ensure};
use rand::prelude::*;

use crate::Rect;

/// Regions must be strictly larger than this to be split.
pub const MIN_SPLIT_EXTENT: i32 = 7;

/// Smallest extent of either child along the split axis.
pub const MIN_CHILD_EXTENT: i32 = 4;

/// Default probability that a non-root node stops splitting early.
pub const DEFAULT_STOP_CHANCE: f64 = 0.25;

/// Role of a node within its parent, or the axis it was split on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SplitKind {
    Root,
    Top,
    Bottom,
    Left,
    Right,
    Horizontal,
    Vertical,
}

impl SplitKind {
    pub fn is_split(self) -> bool {
        matches!(self, SplitKind::Horizontal | SplitKind::Vertical)
    }
}

/// Axis a region is divided along.
///
/// A horizontal split cuts the width into `Left`/`Right` children, a vertical
/// split cuts the height into `Top`/`Bottom` children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn other(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Extent of `bounds` that this axis divides.
    pub fn extent(self, bounds: &Rect) -> i32 {
        match self {
            Axis::Horizontal => bounds.width,
            Axis::Vertical => bounds.height,
        }
    }

    pub fn split_kind(self) -> SplitKind {
        match self {
            Axis::Horizontal => SplitKind::Horizontal,
            Axis::Vertical => SplitKind::Vertical,
        }
    }

    /// Split kinds given to the first and second child.
    pub fn child_kinds(self) -> (SplitKind, SplitKind) {
        match self {
            Axis::Horizontal => (SplitKind::Left, SplitKind::Right),
            Axis::Vertical => (SplitKind::Top, SplitKind::Bottom),
        }
    }

    /// Cuts `bounds` at `offset` cells from its origin along this axis.
    pub fn divide(self, bounds: &Rect, offset: i32) -> (Rect, Rect) {
        match self {
            Axis::Horizontal => (
                Rect::new(bounds.x, bounds.y, offset, bounds.height),
                Rect::new(
                    bounds.x + offset,
                    bounds.y,
                    bounds.width - offset,
                    bounds.height,
                ),
            ),
            Axis::Vertical => (
                Rect::new(bounds.x, bounds.y, bounds.width, offset),
                Rect::new(
                    bounds.x,
                    bounds.y + offset,
                    bounds.width,
                    bounds.height - offset,
                ),
            ),
        }
    }
}

/// Index of a node in its tree's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Either a leaf carrying a payload or an internal node with two children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind<L> {
    Leaf(L),
    Internal {
        axis: Axis,
        /// Left or top child.
        first: NodeId,
        /// Right or bottom child.
        second: NodeId,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionNode<L> {
    bounds: Rect,
    split: SplitKind,
    kind: NodeKind<L>,
}

impl<L> PartitionNode<L> {
    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    pub fn split(&self) -> SplitKind {
        self.split
    }

    pub fn kind(&self) -> &NodeKind<L> {
        &self.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    pub fn leaf(&self) -> Option<&L> {
        match &self.kind {
            NodeKind::Leaf(value) => Some(value),
            NodeKind::Internal { .. } => None,
        }
    }
}

/// BSP tree whose leaves carry an `L`.
///
/// The builder produces `PartitionTree<()>`; room placement turns it into a
/// `PartitionTree<Room>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionTree<L> {
    nodes: Vec<PartitionNode<L>>,
}

impl<L> PartitionTree<L> {
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &PartitionNode<L> {
        debug_assert!(id.0 < self.nodes.len(), "Node {} out of bounds", id.0);
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[PartitionNode<L>] {
        &self.nodes
    }

    /// Bounds of the whole partitioned region.
    pub fn bounds(&self) -> &Rect {
        &self.nodes[0].bounds
    }

    /// Leaf ids in left-to-right, top-to-bottom order.
    pub fn leaves(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_leaf())
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    pub fn internal_count(&self) -> usize {
        self.nodes.len() - self.leaf_count()
    }

    /// Bounds of every leaf region.
    pub fn leaf_bounds(&self) -> Vec<Rect> {
        self.nodes
            .iter()
            .filter(|node| node.is_leaf())
            .map(|node| node.bounds)
            .collect()
    }

    /// Leaf payloads in leaf order.
    pub fn leaf_values(&self) -> impl Iterator<Item = &L> + '_ {
        self.nodes.iter().filter_map(PartitionNode::leaf)
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.depth_from(self.root())
    }

    fn depth_from(&self, id: NodeId) -> usize {
        match self.node(id).kind {
            NodeKind::Leaf(_) => 0,
            NodeKind::Internal { first, second, .. } => {
                1 + self.depth_from(first).max(self.depth_from(second))
            }
        }
    }

    /// Replaces every leaf payload, visiting leaves in leaf order.
    pub fn map_leaves<M>(self, mut f: impl FnMut(&Rect, L) -> M) -> PartitionTree<M> {
        let nodes = self
            .nodes
            .into_iter()
            .map(|node| {
                let PartitionNode {
                    bounds,
                    split,
                    kind,
                } = node;
                let kind = match kind {
                    NodeKind::Leaf(value) => NodeKind::Leaf(f(&bounds, value)),
                    NodeKind::Internal {
                        axis,
                        first,
                        second,
                    } => NodeKind::Internal {
                        axis,
                        first,
                        second,
                    },
                };
                PartitionNode {
                    bounds,
                    split,
                    kind,
                }
            })
            .collect();
        PartitionTree { nodes }
    }
}

/// Partitions `region` into a random BSP tree.
///
/// The root always attempts a split; every other node first stops with
/// probability `stop_chance`.
pub fn build(region: Rect, stop_chance: f64, rng: &mut impl Rng) -> PartitionTree<()> {
    debug_assert!(region.width > 0, "Region width must be greater than zero");
    debug_assert!(region.height > 0, "Region height must be greater than zero");
    debug_assert!(
        (0.0..=1.0).contains(&stop_chance),
        "Stop chance must lie in [0, 1]"
    );

    let mut nodes = Vec::new();
    grow(&mut nodes, region, SplitKind::Root, stop_chance, rng);
    PartitionTree { nodes }
}

/// Partitions `region` with the root split forced along `axis` at `offset`.
///
/// Both children then grow randomly as in [`build`].
pub fn build_with_root_split(
    region: Rect,
    axis: Axis,
    offset: i32,
    stop_chance: f64,
    rng: &mut impl Rng,
) -> Result<PartitionTree<()>> {
    let extent = axis.extent(&region);
    ensure!(
        extent > MIN_SPLIT_EXTENT,
        "Region extent {extent} is too small to split along {axis:?}"
    );
    ensure!(
        (MIN_CHILD_EXTENT..=extent - MIN_CHILD_EXTENT).contains(&offset),
        "Split offset {offset} must lie in [{MIN_CHILD_EXTENT}, {}]",
        extent - MIN_CHILD_EXTENT
    );

    let mut nodes = vec![PartitionNode {
        bounds: region,
        split: SplitKind::Root,
        kind: NodeKind::Leaf(()),
    }];
    split_and_grow(&mut nodes, NodeId(0), axis, offset, stop_chance, rng);
    Ok(PartitionTree { nodes })
}

fn grow(
    nodes: &mut Vec<PartitionNode<()>>,
    bounds: Rect,
    split: SplitKind,
    stop_chance: f64,
    rng: &mut impl Rng,
) -> NodeId {
    let id = NodeId(nodes.len());
    nodes.push(PartitionNode {
        bounds,
        split,
        kind: NodeKind::Leaf(()),
    });

    let preferred = if rng.random_bool(0.5) {
        Axis::Vertical
    } else {
        Axis::Horizontal
    };
    if split != SplitKind::Root && rng.random_bool(stop_chance) {
        return id;
    }

    if let Some((axis, offset)) = choose_split(&bounds, preferred, rng) {
        split_and_grow(nodes, id, axis, offset, stop_chance, rng);
    }
    id
}

fn split_and_grow(
    nodes: &mut Vec<PartitionNode<()>>,
    id: NodeId,
    axis: Axis,
    offset: i32,
    stop_chance: f64,
    rng: &mut impl Rng,
) {
    let (first_bounds, second_bounds) = axis.divide(&nodes[id.0].bounds, offset);
    let (first_kind, second_kind) = axis.child_kinds();

    let first = grow(nodes, first_bounds, first_kind, stop_chance, rng);
    let second = grow(nodes, second_bounds, second_kind, stop_chance, rng);

    let node = &mut nodes[id.0];
    node.split = axis.split_kind();
    node.kind = NodeKind::Internal {
        axis,
        first,
        second,
    };
}

/// Tries `preferred` first, then the other axis.
fn choose_split(bounds: &Rect, preferred: Axis, rng: &mut impl Rng) -> Option<(Axis, i32)> {
    [preferred, preferred.other()]
        .into_iter()
        .find_map(|axis| split_offset(axis.extent(bounds), rng).map(|offset| (axis, offset)))
}

/// Offset of a split along an axis of length `extent`, if it can be split.
fn split_offset(extent: i32, rng: &mut impl Rng) -> Option<i32> {
    if extent <= MIN_SPLIT_EXTENT {
        return None;
    }
    if extent == MIN_SPLIT_EXTENT + 1 {
        Some(extent / 2)
    } else {
        Some(rng.random_range(MIN_CHILD_EXTENT..extent - MIN_CHILD_EXTENT))
    }
}
