//! I/O pins, their sink (instance) pins, and HPWL queries.

use crate::geometry::{Coordinate, Dbu, Orientation};

/// An internal cell pin that an I/O pin connects to. Immutable for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstancePin(pub Coordinate);

/// A top-level pin of the block, with a stable identity and its sinks.
#[derive(Debug, Clone)]
pub struct IoPin {
    pub id: usize,
    pub pos: Option<Coordinate>,
    pub orientation: Option<Orientation>,
    pub sinks: Vec<InstancePin>,
}

impl IoPin {
    pub fn new(id: usize, sinks: Vec<InstancePin>) -> Self {
        Self {
            id,
            pos: None,
            orientation: None,
            sinks,
        }
    }

    pub fn has_sinks(&self) -> bool {
        !self.sinks.is_empty()
    }
}

/// Half-perimeter wire length of the bounding box of `{at} ∪ sinks`.
/// Zero if `sinks` is empty.
pub fn hpwl(at: Coordinate, sinks: &[InstancePin]) -> Dbu {
    if sinks.is_empty() {
        return 0;
    }
    let mut min_x = at.x;
    let mut max_x = at.x;
    let mut min_y = at.y;
    let mut max_y = at.y;
    for InstancePin(p) in sinks {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    (max_x - min_x) + (max_y - min_y)
}

/// An ordered collection of I/O pins. The same container is used for the
/// full netlist and for sinks-only / per-section sub-netlists.
#[derive(Debug, Clone, Default)]
pub struct Netlist {
    pins: Vec<IoPin>,
}

impl Netlist {
    pub fn new() -> Self {
        Self { pins: Vec::new() }
    }

    pub fn add(&mut self, pin: IoPin) {
        self.pins.push(pin);
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn pins(&self) -> impl Iterator<Item = &IoPin> {
        self.pins.iter()
    }

    pub fn get(&self, idx: usize) -> &IoPin {
        &self.pins[idx]
    }

    /// Sum of HPWL over every pin at its current (possibly unplaced)
    /// position, divided by 2000 per the legacy reporting convention.
    /// Unplaced pins (`pos: None`) contribute 0 — they have no HPWL to
    /// report yet.
    pub fn total_hpwl(&self) -> Dbu {
        let raw: Dbu = self
            .pins
            .iter()
            .map(|p| p.pos.map(|at| hpwl(at, &p.sinks)).unwrap_or(0))
            .sum();
        raw / 2000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hpwl_of_centered_sink_is_symmetric() {
        let at = Coordinate::new(50, 0);
        let sinks = vec![InstancePin(Coordinate::new(500, 500))];
        assert_eq!(hpwl(at, &sinks), (500 - 50) + 500);
    }

    #[test]
    fn hpwl_with_no_sinks_is_zero() {
        assert_eq!(hpwl(Coordinate::new(0, 0), &[]), 0);
    }
}
