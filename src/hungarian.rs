//! Minimum-cost bipartite matching between a section's pins and slots.

use crate::geometry::Dbu;
use crate::netlist::hpwl;
use crate::section::Section;
use crate::slots::Slot;

/// Cost-space multiplier: converts an (already integer) HPWL into the
/// matcher's internal cost units, reserving headroom for the dual-update
/// arithmetic below without needing fractional costs.
pub const COST_MULT: Dbu = 1000;

/// `result[i]` is the slot index (within `slots`) assigned to the pin at
/// row `i` of `section.net`.
pub struct MatchResult {
    pub pin_to_slot: Vec<usize>,
}

/// Solve the assignment problem for one section: `n` pins against `m`
/// slots, `m >= n`, minimising total `cost(pin, slot) = hpwl * COST_MULT`.
///
/// Implemented as the classic O(n² m) potentials/augmenting-path Hungarian
/// algorithm (Kuhn–Munkres) for rectangular matrices — equivalent to
/// padding to a square matrix with zero-cost dummy rows, without
/// materialising the padding. Ascending row order (pin index) and
/// strict-less-than comparisons in the column scan give the required
/// determinism: ties are broken by smaller slot index (first column
/// achieving the minimal reduced cost wins), then by smaller pin index
/// (rows are processed in ascending order, so an earlier pin claims a
/// contested slot first).
pub fn solve(section: &Section, slots: &[Slot]) -> MatchResult {
    let section_slots = &slots[section.slot_range.clone()];
    let n = section.net.len();
    let m = section_slots.len();
    debug_assert!(m >= n, "section must have at least as many slots as pins");

    if n == 0 {
        return MatchResult { pin_to_slot: Vec::new() };
    }

    let cost = |i: usize, j: usize| -> Dbu {
        let pin = section.net.get(i);
        hpwl(section_slots[j].pos, &pin.sinks) * COST_MULT
    };

    const INF: Dbu = Dbu::MAX / 4;
    let mut u = vec![0 as Dbu; n + 1];
    let mut v = vec![0 as Dbu; m + 1];
    let mut p = vec![0usize; m + 1]; // p[j] = 1-based row matched to column j
    let mut way = vec![0usize; m + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0usize;
        let mut minv = vec![INF; m + 1];
        let mut used = vec![false; m + 1];
        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = INF;
            let mut j1 = 0usize;
            for j in 1..=m {
                if !used[j] {
                    let c = if i0 == 0 { 0 } else { cost(i0 - 1, j - 1) };
                    let cur = c - u[i0] - v[j];
                    if cur < minv[j] {
                        minv[j] = cur;
                        way[j] = j0;
                    }
                    if minv[j] < delta {
                        delta = minv[j];
                        j1 = j;
                    }
                }
            }
            debug_assert!(delta >= 0, "negative reduced cost: internal invariant violated");
            for j in 0..=m {
                if used[j] {
                    u[p[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }
            j0 = j1;
            if p[j0] == 0 {
                break;
            }
        }
        loop {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut pin_to_slot = vec![0usize; n];
    for j in 1..=m {
        if p[j] != 0 {
            pin_to_slot[p[j] - 1] = j - 1;
        }
    }

    MatchResult { pin_to_slot }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Coordinate;
    use crate::netlist::{InstancePin, IoPin, Netlist};

    fn section_of(pins: Vec<(usize, Coordinate)>, slot_positions: &[Coordinate]) -> (Section, Vec<Slot>) {
        let slots: Vec<Slot> = slot_positions
            .iter()
            .map(|&pos| Slot { pos, used: false })
            .collect();
        let mut net = Netlist::new();
        for (id, sink) in pins {
            net.add(IoPin::new(id, vec![InstancePin(sink)]));
        }
        let section = Section {
            slot_range: 0..slots.len(),
            anchor: slots[slots.len() / 2].pos,
            net,
            max_slots: slots.len(),
            cur_slots: 0,
        };
        (section, slots)
    }

    #[test]
    fn assigns_each_pin_a_distinct_slot_minimising_cost() {
        let slot_positions = [
            Coordinate::new(0, 0),
            Coordinate::new(10, 0),
            Coordinate::new(20, 0),
        ];
        let (section, slots) = section_of(
            vec![(0, Coordinate::new(21, 0)), (1, Coordinate::new(1, 0))],
            &slot_positions,
        );
        let result = solve(&section, &slots);
        assert_eq!(result.pin_to_slot.len(), 2);
        assert_ne!(result.pin_to_slot[0], result.pin_to_slot[1]);
        // pin 0's sink is nearest slot 2, pin 1's sink nearest slot 0.
        assert_eq!(result.pin_to_slot[0], 2);
        assert_eq!(result.pin_to_slot[1], 0);
    }

    #[test]
    fn ties_break_by_smallest_slot_then_smallest_pin() {
        // Every slot is equidistant from both pins (sinks coincide with
        // the section anchor), so any assignment has equal cost; the
        // deterministic tie-break must pick slot 0 for pin 0, slot 1 for
        // pin 1.
        let slot_positions = [Coordinate::new(0, 0), Coordinate::new(0, 0)];
        let (section, slots) = section_of(
            vec![(0, Coordinate::new(0, 0)), (1, Coordinate::new(0, 0))],
            &slot_positions,
        );
        let result = solve(&section, &slots);
        assert_eq!(result.pin_to_slot, vec![0, 1]);
    }
}
