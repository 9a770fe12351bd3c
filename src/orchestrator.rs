//! Sequences the phases of a single placement run: split the netlist,
//! enumerate slots, build and fill sections, match each section, fill
//! zero-sink pins into the leftover slots, and assign orientations.

use std::collections::HashMap;

use crate::assign::setup_sections;
use crate::config::Parameters;
use crate::error::{PlacementError, Result};
use crate::geometry::{Core, Coordinate, Dbu, Orientation};
use crate::hungarian;
use crate::netlist::{IoPin, Netlist};
use crate::slots::enumerate_slots;

/// The final list of placed pins plus the optional before/after total
/// HPWL figures.
pub struct PlacementReport {
    pub assignment: Vec<IoPin>,
    pub hpwl_before: Option<Dbu>,
    pub hpwl_after: Option<Dbu>,
}

/// Run the full placement pipeline: split the netlist into sinked and
/// zero-sink pins, enumerate slots, build sections, match, fill, and
/// orient. Parsing and writing the exchange file are the caller's job.
pub fn run(core: &Core, netlist: Netlist, parms: &Parameters) -> Result<PlacementReport> {
    let hpwl_before = if parms.return_hpwl {
        Some(netlist.total_hpwl())
    } else {
        None
    };

    let mut sinks_net = Netlist::new();
    let mut zero_sink_ids: Vec<usize> = Vec::new();
    for pin in netlist.pins() {
        if pin.has_sinks() {
            sinks_net.add(IoPin::new(pin.id, pin.sinks.clone()));
        } else {
            zero_sink_ids.push(pin.id);
        }
    }

    let slots = enumerate_slots(core)?;

    let mut sections = setup_sections(
        &slots,
        &sinks_net,
        parms.slots_per_section,
        parms.usage_per_section,
        parms.slots_increase_factor,
        parms.usage_increase_factor,
        parms.force_pin_spread,
    )?;

    let mut used = vec![false; slots.len()];
    let mut placed: HashMap<usize, Coordinate> = HashMap::new();

    #[cfg(feature = "parallel")]
    let matches: Vec<(usize, hungarian::MatchResult)> = {
        use rayon::prelude::*;
        sections
            .par_iter()
            .enumerate()
            .filter(|(_, s)| s.net.len() > 0)
            .map(|(i, s)| (i, hungarian::solve(s, &slots)))
            .collect()
    };
    #[cfg(not(feature = "parallel"))]
    let matches: Vec<(usize, hungarian::MatchResult)> = sections
        .iter()
        .enumerate()
        .filter(|(_, s)| s.net.len() > 0)
        .map(|(i, s)| (i, hungarian::solve(s, &slots)))
        .collect();

    for (section_idx, result) in matches {
        let section = &mut sections[section_idx];
        for (local_pin_idx, &local_slot_idx) in result.pin_to_slot.iter().enumerate() {
            let global_slot_idx = section.slot_range.start + local_slot_idx;
            let pin_id = section.net.get(local_pin_idx).id;
            used[global_slot_idx] = true;
            placed.insert(pin_id, slots[global_slot_idx].pos);
        }
    }

    // Zero-sink fill: walk the global slot list in boundary order.
    let mut zero_sink_iter = zero_sink_ids.into_iter();
    let mut next_zero_sink = zero_sink_iter.next();
    for (idx, slot) in slots.iter().enumerate() {
        if used[idx] {
            continue;
        }
        let Some(id) = next_zero_sink else { break };
        used[idx] = true;
        placed.insert(id, slot.pos);
        next_zero_sink = zero_sink_iter.next();
    }
    if next_zero_sink.is_some() || zero_sink_iter.next().is_some() {
        return Err(PlacementError::NoSlotForFloatingPin);
    }

    // Orientation assignment, independent per pin.
    let ids: Vec<usize> = placed.keys().copied().collect();
    #[cfg(feature = "parallel")]
    let orientations: Vec<(usize, Orientation)> = {
        use rayon::prelude::*;
        ids.par_iter()
            .map(|&id| (id, core.orientation_at(placed[&id])))
            .filter_map(|(id, o)| o.map(|o| (id, o)))
            .collect()
    };
    #[cfg(not(feature = "parallel"))]
    let orientations: Vec<(usize, Orientation)> = ids
        .iter()
        .map(|&id| (id, core.orientation_at(placed[&id])))
        .filter_map(|(id, o)| o.map(|o| (id, o)))
        .collect();
    let orientations: HashMap<usize, Orientation> = orientations.into_iter().collect();

    let mut assignment = Vec::with_capacity(netlist.len());
    for pin in netlist.pins() {
        let mut out = IoPin::new(pin.id, pin.sinks.clone());
        out.pos = placed.get(&pin.id).copied();
        out.orientation = out.pos.and_then(|_| orientations.get(&pin.id).copied());
        assignment.push(out);
    }

    let hpwl_after = if parms.return_hpwl {
        let mut total = Netlist::new();
        for pin in &assignment {
            let mut p = IoPin::new(pin.id, pin.sinks.clone());
            p.pos = pin.pos;
            total.add(p);
        }
        Some(total.total_hpwl())
    } else {
        None
    };

    Ok(PlacementReport {
        assignment,
        hpwl_before,
        hpwl_after,
    })
}
