//! Section assignment: greedy HPWL-sorted pin-to-section placement with
//! the outer retry loop that grows capacity on failure.

use crate::error::{PlacementError, Result};
use crate::netlist::{hpwl, IoPin, Netlist};
use crate::section::{build_sections, Section, MAX_SECTIONS_RECOMMENDED, MAX_SLOTS_RECOMMENDED};
use crate::slots::Slot;

/// One pass over every pin in `sinks_net`: assign each to the
/// lowest-HPWL section with residual capacity. Returns `true` iff every
/// pin found a home.
///
/// Ties in HPWL are broken by ascending section index. If
/// `force_pin_spread` is false, only the single closest section is ever
/// considered for a given pin, and a pin that doesn't fit there aborts
/// the whole pass rather than trying the next-best section — not
/// globally optimal, but deliberate: it lets the retry loop react to a
/// single hot section instead of silently redistributing load.
fn assign_pins_to_sections(sinks_net: &Netlist, sections: &mut [Section], force_pin_spread: bool) -> bool {
    let mut total_assigned = 0usize;

    for idx in 0..sinks_net.len() {
        let pin = sinks_net.get(idx);

        #[cfg(feature = "parallel")]
        let dists: Vec<_> = {
            use rayon::prelude::*;
            sections
                .par_iter()
                .map(|s| hpwl(s.anchor, &pin.sinks))
                .collect()
        };
        #[cfg(not(feature = "parallel"))]
        let dists: Vec<_> = sections.iter().map(|s| hpwl(s.anchor, &pin.sinks)).collect();

        let mut order: Vec<usize> = (0..sections.len()).collect();
        order.sort_by(|&a, &b| dists[a].cmp(&dists[b]).then(a.cmp(&b)));

        let mut assigned = false;
        for &i in &order {
            if sections[i].has_room() {
                sections[i].net.add(IoPin::new(pin.id, pin.sinks.clone()));
                sections[i].cur_slots += 1;
                assigned = true;
                total_assigned += 1;
                break;
            }
            if !force_pin_spread {
                break;
            }
        }
        if !assigned {
            break;
        }
    }

    total_assigned == sinks_net.len()
}

/// Run the outer retry loop: build sections, attempt a full assignment,
/// and on failure grow `usage_per_section` and `slots_per_section`
/// before retrying.
///
/// Validates preconditions up front, and detects non-progressing
/// retries rather than looping forever: if growing the parameters did
/// not actually change them, the attempt can never succeed and
/// [`PlacementError::CannotFit`] is raised.
#[allow(clippy::too_many_arguments)]
pub fn setup_sections(
    slots: &[Slot],
    sinks_net: &Netlist,
    mut slots_per_section: u32,
    mut usage_per_section: f32,
    slots_increase_factor: f32,
    usage_increase_factor: f32,
    force_pin_spread: bool,
) -> Result<Vec<Section>> {
    if slots_per_section <= 1 {
        return Err(PlacementError::InvalidConfiguration(
            "slotsPerSection must be greater than one".into(),
        ));
    }
    if usage_per_section <= 0.0 {
        return Err(PlacementError::InvalidConfiguration(
            "usagePerSection must be greater than zero".into(),
        ));
    }
    if !force_pin_spread && usage_increase_factor == 0.0 && slots_increase_factor == 0.0 {
        return Err(PlacementError::InvalidConfiguration(
            "if forcePinSpread is false, either usageIncreaseFactor or slotsIncreaseFactor must be non-zero".into(),
        ));
    }

    loop {
        let mut spp = slots_per_section;
        let mut usage = usage_per_section;
        let mut sections = build_sections(
            slots,
            &mut spp,
            &mut usage,
            slots_increase_factor,
            usage_increase_factor,
        );

        if assign_pins_to_sections(sinks_net, &mut sections, force_pin_spread) {
            return Ok(sections);
        }

        let next_usage = usage_per_section * (1.0 + usage_increase_factor);
        let next_spp = (slots_per_section as f32 * (1.0 + slots_increase_factor)) as u32;

        if next_usage == usage_per_section && next_spp == slots_per_section {
            return Err(PlacementError::CannotFit);
        }

        usage_per_section = next_usage;
        slots_per_section = next_spp;

        if sections.len() > MAX_SECTIONS_RECOMMENDED {
            log::warn!(
                "number of sections is {} while the maximum recommended value is {}; this may negatively affect performance",
                sections.len(),
                MAX_SECTIONS_RECOMMENDED
            );
        }
        if slots_per_section > MAX_SLOTS_RECOMMENDED {
            log::warn!(
                "slots per section is {slots_per_section} while the maximum recommended value is {MAX_SLOTS_RECOMMENDED}; this may negatively affect performance"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Core, Coordinate};
    use crate::netlist::InstancePin;
    use crate::slots::enumerate_slots;

    fn pins_with_sinks(coords: &[(Dbu, Dbu)]) -> Netlist {
        let mut net = Netlist::new();
        for (i, &(x, y)) in coords.iter().enumerate() {
            net.add(IoPin::new(i, vec![InstancePin(Coordinate::new(x, y))]));
        }
        net
    }
    use crate::geometry::Dbu;

    #[test]
    fn s4_retry_growth_eventually_succeeds() {
        let core = Core::new(
            Coordinate::new(0, 0),
            Coordinate::new(1100, 1100),
            100,
            100,
            50,
            50,
        )
        .unwrap();
        let slots = enumerate_slots(&core).unwrap();
        let coords: Vec<(Dbu, Dbu)> = (0..10).map(|_| (550, 550)).collect();
        let net = pins_with_sinks(&coords);

        // usage = 0.1 with slots_per_section = 4 gives max_slots = 0 per
        // section on the first attempt (infeasible for any pin); the
        // retry loop must grow usage_per_section until capacity catches
        // up with the 10 pins to place.
        let sections = setup_sections(&slots, &net, 4, 0.1, 0.0, 0.1, true).unwrap();
        let total: usize = sections.iter().map(|s| s.cur_slots).sum();
        assert_eq!(total, 10);
    }

    #[test]
    fn rejects_non_progressing_configuration_up_front() {
        let err = setup_sections(&Vec::new(), &Netlist::new(), 2, 0.8, 0.0, 0.0, false);
        assert!(matches!(err, Err(PlacementError::InvalidConfiguration(_))));
    }

    #[test]
    fn rejects_slots_per_section_not_greater_than_one() {
        let err = setup_sections(&Vec::new(), &Netlist::new(), 1, 0.8, 0.01, 0.01, true);
        assert!(matches!(err, Err(PlacementError::InvalidConfiguration(_))));
    }
}
