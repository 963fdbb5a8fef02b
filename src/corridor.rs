use fixedbitset::FixedBitSet;

use crate::{Door, Grid};

/// Carves a corridor between every linked door pair.
///
/// Each pair is carved once, whichever of its doors comes first.
pub fn rasterize(doors: &[Door], grid: &mut Grid) {
    let mut carved = FixedBitSet::with_capacity(doors.len());
    for (index, door) in doors.iter().enumerate() {
        if carved.contains(index) {
            continue;
        }
        let twin = door.twin.index();
        debug_assert!(twin < doors.len(), "Door {index} has no twin in the list");
        carved.insert(index);
        carved.insert(twin);
        carve(door.position(), doors[twin].position(), grid);
    }
}

/// Marks a stepped, orthogonally connected line of floor from `from` to `to`.
///
/// The longer axis advances every step; the shorter axis advances whenever the
/// accumulated error reaches the longer span, never past the target.
pub fn carve(from: (i32, i32), to: (i32, i32), grid: &mut Grid) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let (step_x, step_y) = (dx.signum(), dy.signum());
    let (span_x, span_y) = (dx.abs(), dy.abs());
    let (mut x, mut y) = from;
    let mut error = 0;

    if span_x > span_y {
        loop {
            grid.set_floor(x, y);
            error += span_y;
            if error >= span_x && y != to.1 {
                y += step_y;
                error -= span_x;
                grid.set_floor(x, y);
            }
            if x == to.0 {
                break;
            }
            x += step_x;
        }
    } else {
        loop {
            grid.set_floor(x, y);
            error += span_x;
            if error >= span_y && x != to.0 {
                x += step_x;
                error -= span_y;
                grid.set_floor(x, y);
            }
            if y == to.1 {
                break;
            }
            y += step_y;
        }
    }
}
