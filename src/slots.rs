//! Legal boundary slot enumeration.

use crate::error::{PlacementError, Result};
use crate::geometry::{Core, Coordinate};

/// A candidate position on the core boundary, on a routing track.
#[derive(Debug, Clone, Copy)]
pub struct Slot {
    pub pos: Coordinate,
    pub used: bool,
}

/// Enumerate every legal slot along the core boundary, counter-clockwise
/// starting at the lower-left corner: bottom (left→right), right
/// (bottom→top), top (right→left), left (top→bottom).
///
/// Slots inside a configured blockage region are skipped. Fails with
/// [`PlacementError::InvalidGeometry`] if an edge with positive extent
/// yields zero slots.
///
/// This rejects a zero-slot edge unconditionally, even if no pin would
/// ever need a slot there — this function has no netlist to check
/// that against, so it always treats a starved edge as fatal rather
/// than only when it would actually block a pin.
pub fn enumerate_slots(core: &Core) -> Result<Vec<Slot>> {
    let lb = core.lb;
    let ub = core.ub;

    let estimate = (((ub.x - lb.x) * 2) / core.min_dist_pins_x as i64
        + ((ub.y - lb.y) * 2) / core.min_dist_pins_y as i64)
        .max(0) as usize;
    let mut slots = Vec::with_capacity(estimate);

    // Edge 1: bottom, left -> right.
    let mut edge1 = Vec::new();
    let mut x = lb.x + core.init_tracks_x as i64;
    while x < ub.x {
        edge1.push(Coordinate::new(x, lb.y));
        x += core.min_dist_pins_x as i64;
    }

    // Edge 2: right, bottom -> top.
    let mut edge2 = Vec::new();
    let mut y = lb.y + core.init_tracks_y as i64;
    while y < ub.y {
        edge2.push(Coordinate::new(ub.x, y));
        y += core.min_dist_pins_y as i64;
    }

    // Edge 3: top, generated left -> right then reversed to right -> left.
    let mut edge3 = Vec::new();
    let mut x = lb.x + core.init_tracks_x as i64;
    while x < ub.x {
        edge3.push(Coordinate::new(x, ub.y));
        x += core.min_dist_pins_x as i64;
    }
    edge3.reverse();

    // Edge 4: left, generated bottom -> top then reversed to top -> bottom.
    let mut edge4 = Vec::new();
    let mut y = lb.y + core.init_tracks_y as i64;
    while y < ub.y {
        edge4.push(Coordinate::new(lb.x, y));
        y += core.min_dist_pins_y as i64;
    }
    edge4.reverse();

    if edge1.is_empty() || edge2.is_empty() || edge3.is_empty() || edge4.is_empty() {
        return Err(PlacementError::InvalidGeometry(
            "an edge of the core produced zero slots".into(),
        ));
    }

    for pos in edge1.into_iter().chain(edge2).chain(edge3).chain(edge4) {
        if !core.is_blocked(pos) {
            slots.push(Slot { pos, used: false });
        }
    }

    Ok(slots)
}
