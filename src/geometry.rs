//! Integer database-unit geometry primitives.
//!
//! All placement math runs in [`Dbu`] (database unit) coordinates — a
//! signed integer — to keep slot positions, pitches and HPWL exact.

use crate::error::{PlacementError, Result};

/// Signed integer coordinate in database units.
pub type Dbu = i64;

/// A point in the core's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub x: Dbu,
    pub y: Dbu,
}

impl Coordinate {
    pub const fn new(x: Dbu, y: Dbu) -> Self {
        Self { x, y }
    }
}

/// Cardinal direction an I/O pin faces, outward from the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    North,
    South,
    East,
    West,
}

/// The rectangular core boundary, its routing-track pitches, and the
/// optional blockage regions carried through the blockage interface
/// hook (see [`Core::is_blocked`]).
#[derive(Debug, Clone)]
pub struct Core {
    pub lb: Coordinate,
    pub ub: Coordinate,
    pub min_dist_pins_x: u32,
    pub min_dist_pins_y: u32,
    pub init_tracks_x: u32,
    pub init_tracks_y: u32,
    blockages: Vec<(Coordinate, Coordinate)>,
}

impl Core {
    pub fn new(
        lb: Coordinate,
        ub: Coordinate,
        min_dist_pins_x: u32,
        min_dist_pins_y: u32,
        init_tracks_x: u32,
        init_tracks_y: u32,
    ) -> Result<Self> {
        if ub.x <= lb.x || ub.y <= lb.y {
            return Err(PlacementError::InvalidGeometry(format!(
                "core upper bound {:?} must be strictly greater than lower bound {:?} on both axes",
                ub, lb
            )));
        }
        if min_dist_pins_x == 0 || min_dist_pins_y == 0 {
            return Err(PlacementError::InvalidGeometry(
                "pitches must be positive".into(),
            ));
        }
        Ok(Self {
            lb,
            ub,
            min_dist_pins_x,
            min_dist_pins_y,
            init_tracks_x,
            init_tracks_y,
            blockages: Vec::new(),
        })
    }

    pub fn add_blockage(&mut self, lb: Coordinate, ub: Coordinate) {
        self.blockages.push((lb, ub));
    }

    /// Always `false` when no blockage regions are configured. A
    /// blockage-file parser is out of scope; callers that have one can
    /// populate regions directly via [`Core::add_blockage`].
    pub fn is_blocked(&self, pos: Coordinate) -> bool {
        self.blockages.iter().any(|(lb, ub)| {
            pos.x >= lb.x && pos.x <= ub.x && pos.y >= lb.y && pos.y <= ub.y
        })
    }

    /// Orientation a pin at `pos` faces outward. Corner overrides are
    /// checked first, then the single-edge rules.
    pub fn orientation_at(&self, pos: Coordinate) -> Option<Orientation> {
        let (lb_x, lb_y, ub_x, ub_y) = (self.lb.x, self.lb.y, self.ub.x, self.ub.y);
        if pos.x == lb_x {
            return Some(if pos.y == ub_y {
                Orientation::South
            } else {
                Orientation::East
            });
        }
        if pos.x == ub_x {
            return Some(if pos.y == lb_y {
                Orientation::North
            } else {
                Orientation::West
            });
        }
        if pos.y == lb_y {
            return Some(Orientation::North);
        }
        if pos.y == ub_y {
            return Some(Orientation::South);
        }
        None
    }
}
