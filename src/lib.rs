//! # `BspDungeon`
//!
//! `BspDungeon` is a library for procedurally generating 2D dungeon levels
//! from a binary space partition: one room per leaf, one door pair per split,
//! and stepped corridors carved into a wall/floor grid.

// #![deny(warnings)]
// #![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]

mod batch;
pub mod config;
pub mod corridor;
pub mod doors;
pub mod grid;
pub mod level;
pub mod partition;
mod progress;
mod rect;
pub mod rooms;

pub use batch::{BatchStats, generate_batch};
pub use config::GenerationConfig;
pub use doors::{Door, DoorId, Doors, LinkOutcome};
pub use grid::{Cell, Grid};
pub use level::{Dungeon, Level, generate, generate_with_root_split};
pub use partition::{Axis, NodeId, PartitionNode, PartitionTree, SplitKind};
pub use rect::{Rect, Room};
