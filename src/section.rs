//! Sectioning: chunk the boundary slot sequence into capacity-limited
//! groups.

use std::ops::Range;

use crate::netlist::Netlist;
use crate::slots::Slot;

/// Thresholds past which the retry loop logs a performance warning
/// instead of failing outright.
pub const MAX_SECTIONS_RECOMMENDED: usize = 50;
pub const MAX_SLOTS_RECOMMENDED: u32 = 400;

/// A capacity-limited, contiguous group of boundary slots.
///
/// `slot_range` indexes into the orchestrator's global slot vector rather
/// than owning a copy, per the "cyclic references avoided" design note —
/// sections reference a range, not pointers.
pub struct Section {
    pub slot_range: Range<usize>,
    pub anchor: crate::geometry::Coordinate,
    pub net: Netlist,
    pub max_slots: usize,
    pub cur_slots: usize,
}

impl Section {
    pub fn has_room(&self) -> bool {
        self.cur_slots < self.max_slots
    }
}

/// Split `slots` into sections of at most `slots_per_section` slots each,
/// with per-section capacity `floor(slots_per_section * usage_per_section)`.
///
/// `usage_per_section` greater than `1.0` is a caller error; it is clamped
/// to `1.0` and `slots_per_section` is grown by the first non-zero of
/// `slots_increase_factor`, `usage_increase_factor`, or `0.1`, with a
/// warning logged.
pub fn build_sections(
    slots: &[Slot],
    slots_per_section: &mut u32,
    usage_per_section: &mut f32,
    slots_increase_factor: f32,
    usage_increase_factor: f32,
) -> Vec<Section> {
    if *usage_per_section > 1.0 {
        log::warn!("section usage exceeded max, clamping to 1.0");
        *usage_per_section = 1.0;
        if slots_increase_factor != 0.0 {
            *slots_per_section = (*slots_per_section as f32 * (1.0 + slots_increase_factor)) as u32;
        } else if usage_increase_factor != 0.0 {
            *slots_per_section = (*slots_per_section as f32 * (1.0 + usage_increase_factor)) as u32;
        } else {
            *slots_per_section = (*slots_per_section as f32 * 1.1) as u32;
        }
        log::warn!("forcing slots per section to increase to {slots_per_section}");
    }

    let uncapped_max_slots = ((*slots_per_section as f32) * (*usage_per_section)) as usize;
    let mut sections = Vec::new();
    let mut start = 0;
    while start < slots.len() {
        let end = (start + *slots_per_section as usize).min(slots.len());
        let anchor = slots[start + (end - start) / 2].pos;
        sections.push(Section {
            slot_range: start..end,
            anchor,
            net: Netlist::new(),
            // The last section in the run is usually partial (fewer
            // slots than slots_per_section) and must never be handed a
            // capacity bigger than the slots it actually has — the
            // matcher requires slots >= pins per section.
            max_slots: uncapped_max_slots.min(end - start),
            cur_slots: 0,
        });
        start = end;
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Core, Coordinate};
    use crate::slots::enumerate_slots;

    #[test]
    fn capacity_respects_usage_and_clamps_to_slot_count() {
        let core = Core::new(
            Coordinate::new(0, 0),
            Coordinate::new(1000, 1000),
            100,
            100,
            50,
            50,
        )
        .unwrap();
        let slots = enumerate_slots(&core).unwrap();
        let mut spp = 10u32;
        let mut usage = 0.8f32;
        let sections = build_sections(&slots, &mut spp, &mut usage, 0.01, 0.01);
        assert_eq!(sections.len(), 4);
        for s in &sections {
            assert!(s.max_slots <= s.slot_range.len());
        }
    }

    #[test]
    fn partial_final_section_caps_capacity_to_its_own_slot_count() {
        // 44 slots with slots_per_section = 20 yields [0..20], [20..40],
        // [40..44]; the last section only has 4 slots, so its max_slots
        // must never be floor(20 * 0.8) = 16.
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
        assert_eq!(slots.len(), 44);
        let mut spp = 20u32;
        let mut usage = 0.8f32;
        let sections = build_sections(&slots, &mut spp, &mut usage, 0.0, 0.0);
        assert_eq!(sections.len(), 3);
        let last = sections.last().unwrap();
        assert_eq!(last.slot_range.len(), 4);
        assert!(last.max_slots <= 4);
        for s in &sections {
            assert!(s.max_slots <= s.slot_range.len());
        }
    }

    #[test]
    fn clamps_overlarge_usage() {
        let core = Core::new(
            Coordinate::new(0, 0),
            Coordinate::new(1000, 1000),
            100,
            100,
            50,
            50,
        )
        .unwrap();
        let slots = enumerate_slots(&core).unwrap();
        let mut spp = 10u32;
        let mut usage = 1.5f32;
        let _ = build_sections(&slots, &mut spp, &mut usage, 0.01, 0.0);
        assert_eq!(usage, 1.0);
        assert!(spp > 10);
    }
}
