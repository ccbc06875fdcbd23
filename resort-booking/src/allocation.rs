//! Capacity derivation and room allocation over a catalog snapshot.
//!
//! Every function here backs a direct UI control, so nothing raises: edge
//! cases (decrementing an absent cottage, incrementing past availability,
//! toggling beds a cottage does not offer) resolve to no-ops or clamped
//! values. Derivations are pure and recomputed on every call.

use crate::selection::{CottageSelection, SelectionState};
use resort_catalog::{CatalogSnapshot, InventoryUnit};
use uuid::Uuid;

/// Total guest capacity covered by the current selections:
/// room_count × per-room capacity, plus one per requested extra bed.
/// Selections referencing cottages missing from the snapshot count zero.
pub fn total_capacity(state: &SelectionState, catalog: &CatalogSnapshot) -> u32 {
    state
        .cottage_selections
        .iter()
        .map(|sel| match catalog.cottage(&sel.cottage_id) {
            Some(cottage) => {
                let beds = if sel.extra_bed_requested { 1 } else { 0 };
                sel.room_count * cottage.capacity_per_room + beds
            }
            None => 0,
        })
        .sum()
}

pub fn is_capacity_sufficient(state: &SelectionState, catalog: &CatalogSnapshot) -> bool {
    total_capacity(state, catalog) >= state.guest_intent.normalized()
}

/// Suggests a single-cottage allocation for the stated guest count: the
/// available cottage with the largest per-room capacity (ties broken by
/// catalog order), with enough rooms to cover the intent.
///
/// Runs only while no manual selection exists; once the guest has touched
/// any selection the suggestion is suspended until an explicit reset. The
/// suggestion replaces prior auto entries and never spans cottages.
pub fn auto_allocate(state: &mut SelectionState, catalog: &CatalogSnapshot) {
    if state.has_manual_selection() {
        return;
    }

    let mut pick: Option<&InventoryUnit> = None;
    for cottage in catalog.cottages() {
        if !cottage.available || cottage.rooms_available == 0 {
            continue;
        }
        match pick {
            Some(best) if cottage.capacity_per_room <= best.capacity_per_room => {}
            _ => pick = Some(cottage),
        }
    }

    state.cottage_selections.clear();
    if let Some(cottage) = pick {
        let guests = state.guest_intent.normalized();
        let rooms = guests.div_ceil(cottage.capacity_per_room).max(1);
        state.cottage_selections.push(CottageSelection {
            cottage_id: cottage.id,
            room_count: rooms.min(cottage.rooms_available),
            extra_bed_requested: false,
            is_manual: false,
            explicit_room_ids: None,
        });
    }
}

/// Restores the invariants the selection controls maintain over entries
/// that arrived from outside them (deserialized request bodies): unknown
/// cottages and zero-room entries are dropped, room counts clamp to the
/// cottage's availability, and extra-bed requests clear where the policy
/// offers no beds.
pub fn normalize_selections(state: &mut SelectionState, catalog: &CatalogSnapshot) {
    state.cottage_selections.retain_mut(|sel| {
        let Some(cottage) = catalog.cottage(&sel.cottage_id) else {
            return false;
        };
        sel.room_count = sel.room_count.min(cottage.rooms_available);
        if !cottage.offers_extra_beds() {
            sel.extra_bed_requested = false;
        }
        sel.room_count > 0
    });
}

/// Adds the cottage at one room, or adds a room to it, clamped at the
/// cottage's available room count. Marks the entry manual.
pub fn increment_room(state: &mut SelectionState, cottage_id: Uuid, catalog: &CatalogSnapshot) {
    let Some(cottage) = catalog.cottage(&cottage_id) else {
        return;
    };
    match state
        .cottage_selections
        .iter()
        .position(|s| s.cottage_id == cottage_id)
    {
        Some(pos) => {
            let sel = &mut state.cottage_selections[pos];
            if sel.room_count < cottage.rooms_available {
                sel.room_count += 1;
            }
            sel.is_manual = true;
        }
        None => {
            if cottage.rooms_available > 0 {
                state.cottage_selections.push(CottageSelection {
                    cottage_id,
                    room_count: 1,
                    extra_bed_requested: false,
                    is_manual: true,
                    explicit_room_ids: None,
                });
            }
        }
    }
}

/// Removes a room from the cottage; at zero the entry is removed outright
/// (which also drops its extra-bed request). Absent cottages are a no-op.
pub fn decrement_room(state: &mut SelectionState, cottage_id: &Uuid) {
    let Some(pos) = state
        .cottage_selections
        .iter()
        .position(|s| &s.cottage_id == cottage_id)
    else {
        return;
    };
    if state.cottage_selections[pos].room_count <= 1 {
        state.cottage_selections.remove(pos);
    } else {
        let sel = &mut state.cottage_selections[pos];
        sel.room_count -= 1;
        sel.is_manual = true;
    }
}

/// Flips the extra-bed request for a selected cottage. No-op when the
/// cottage is not selected or its policy offers zero beds (the UI renders
/// the control disabled in both cases).
pub fn toggle_extra_bed(state: &mut SelectionState, cottage_id: &Uuid, catalog: &CatalogSnapshot) {
    let Some(cottage) = catalog.cottage(cottage_id) else {
        return;
    };
    if !cottage.offers_extra_beds() {
        return;
    }
    if let Some(sel) = state
        .cottage_selections
        .iter_mut()
        .find(|s| &s.cottage_id == cottage_id)
    {
        sel.extra_bed_requested = !sel.extra_bed_requested;
        sel.is_manual = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::GuestIntent;
    use resort_catalog::{ExtraBedPolicy, InventoryUnit};

    fn cottage(capacity: u32, rooms: u32, max_beds: u32) -> InventoryUnit {
        InventoryUnit {
            id: Uuid::new_v4(),
            name: "Lakeview".to_string(),
            slug: "lakeview".to_string(),
            capacity_per_room: capacity,
            price_per_night: 10_000_00,
            available: true,
            rooms_available: rooms,
            extra_bed: ExtraBedPolicy {
                max_beds,
                price_per_night: 1_500_00,
            },
            rooms: vec![],
        }
    }

    fn snapshot(cottages: Vec<InventoryUnit>) -> CatalogSnapshot {
        CatalogSnapshot::new(cottages, vec![])
    }

    #[test]
    fn test_auto_allocate_five_guests_two_per_room() {
        // One cottage, capacity 2/room, 5 rooms: 5 guests need ceil(5/2) = 3.
        let catalog = snapshot(vec![cottage(2, 5, 0)]);
        let mut state = SelectionState::new();
        state.guest_intent = GuestIntent::Numeric(5);

        auto_allocate(&mut state, &catalog);

        assert_eq!(state.cottage_selections.len(), 1);
        assert_eq!(state.cottage_selections[0].room_count, 3);
        assert!(!state.cottage_selections[0].is_manual);
        assert_eq!(total_capacity(&state, &catalog), 6);
        assert!(is_capacity_sufficient(&state, &catalog));
    }

    #[test]
    fn test_auto_allocate_prefers_largest_capacity_first_listed() {
        let big = cottage(4, 2, 0);
        let also_big = cottage(4, 2, 0);
        let small = cottage(2, 5, 0);
        let big_id = big.id;
        let catalog = snapshot(vec![big, also_big, small]);
        let mut state = SelectionState::new();
        state.guest_intent = GuestIntent::Numeric(4);

        auto_allocate(&mut state, &catalog);

        assert_eq!(state.cottage_selections[0].cottage_id, big_id);
        assert_eq!(state.cottage_selections[0].room_count, 1);
    }

    #[test]
    fn test_auto_allocate_skips_unavailable_cottages() {
        let mut closed = cottage(4, 2, 0);
        closed.available = false;
        let open = cottage(2, 5, 0);
        let open_id = open.id;
        let catalog = snapshot(vec![closed, open]);
        let mut state = SelectionState::new();
        state.guest_intent = GuestIntent::Numeric(2);

        auto_allocate(&mut state, &catalog);

        assert_eq!(state.cottage_selections[0].cottage_id, open_id);
    }

    #[test]
    fn test_auto_allocate_suspended_by_manual_entry() {
        let catalog = snapshot(vec![cottage(2, 5, 0)]);
        let id = catalog.cottages()[0].id;
        let mut state = SelectionState::new();
        state.guest_intent = GuestIntent::Numeric(5);

        increment_room(&mut state, id, &catalog);
        increment_room(&mut state, id, &catalog);
        assert!(state.has_manual_selection());

        // Intent changes must not override the manual choice.
        state.guest_intent = GuestIntent::Numeric(8);
        auto_allocate(&mut state, &catalog);

        assert_eq!(state.cottage_selections[0].room_count, 2);
        assert!(state.cottage_selections[0].is_manual);
    }

    #[test]
    fn test_manual_undersupply_blocks_without_override() {
        // Guest pins 2 rooms (capacity 4) against intent 5: insufficient,
        // and never silently corrected.
        let catalog = snapshot(vec![cottage(2, 5, 0)]);
        let id = catalog.cottages()[0].id;
        let mut state = SelectionState::new();
        state.guest_intent = GuestIntent::Numeric(5);

        increment_room(&mut state, id, &catalog);
        increment_room(&mut state, id, &catalog);

        assert_eq!(total_capacity(&state, &catalog), 4);
        assert!(!is_capacity_sufficient(&state, &catalog));
    }

    #[test]
    fn test_increment_clamps_at_available_rooms() {
        let catalog = snapshot(vec![cottage(2, 2, 0)]);
        let id = catalog.cottages()[0].id;
        let mut state = SelectionState::new();

        for _ in 0..10 {
            increment_room(&mut state, id, &catalog);
        }
        assert_eq!(state.cottage_selections[0].room_count, 2);
    }

    #[test]
    fn test_decrement_removes_entry_and_extra_bed() {
        let catalog = snapshot(vec![cottage(2, 5, 2)]);
        let id = catalog.cottages()[0].id;
        let mut state = SelectionState::new();

        increment_room(&mut state, id, &catalog);
        toggle_extra_bed(&mut state, &id, &catalog);
        assert!(state.cottage_selections[0].extra_bed_requested);
        assert_eq!(total_capacity(&state, &catalog), 3);

        decrement_room(&mut state, &id);
        assert!(state.cottage_selections.is_empty());
        assert_eq!(total_capacity(&state, &catalog), 0);

        // Decrementing the now-absent cottage stays a no-op.
        decrement_room(&mut state, &id);
        assert!(state.cottage_selections.is_empty());
    }

    #[test]
    fn test_toggle_extra_bed_noop_when_not_offered() {
        let catalog = snapshot(vec![cottage(2, 5, 0)]);
        let id = catalog.cottages()[0].id;
        let mut state = SelectionState::new();
        increment_room(&mut state, id, &catalog);

        for _ in 0..3 {
            toggle_extra_bed(&mut state, &id, &catalog);
        }
        assert!(!state.cottage_selections[0].extra_bed_requested);
    }

    #[test]
    fn test_toggle_extra_bed_noop_when_not_selected() {
        let catalog = snapshot(vec![cottage(2, 5, 2)]);
        let id = catalog.cottages()[0].id;
        let mut state = SelectionState::new();

        toggle_extra_bed(&mut state, &id, &catalog);
        assert!(state.cottage_selections.is_empty());
    }

    #[test]
    fn test_capacity_monotonic_under_increment_decrement() {
        let catalog = snapshot(vec![cottage(3, 4, 0)]);
        let id = catalog.cottages()[0].id;
        let mut state = SelectionState::new();

        let mut last = total_capacity(&state, &catalog);
        for _ in 0..6 {
            increment_room(&mut state, id, &catalog);
            let cap = total_capacity(&state, &catalog);
            assert!(cap >= last);
            last = cap;
        }
        for _ in 0..6 {
            decrement_room(&mut state, &id);
            let cap = total_capacity(&state, &catalog);
            assert!(cap <= last);
            last = cap;
        }
        assert_eq!(last, 0);
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let catalog = snapshot(vec![cottage(2, 5, 1)]);
        let id = catalog.cottages()[0].id;
        let mut state = SelectionState::new();
        increment_room(&mut state, id, &catalog);
        toggle_extra_bed(&mut state, &id, &catalog);

        assert_eq!(
            total_capacity(&state, &catalog),
            total_capacity(&state, &catalog)
        );
    }

    #[test]
    fn test_normalize_drops_zero_room_entries_and_their_beds() {
        let catalog = snapshot(vec![cottage(2, 5, 1)]);
        let id = catalog.cottages()[0].id;
        let mut state = SelectionState::new();
        state.cottage_selections.push(CottageSelection {
            cottage_id: id,
            room_count: 0,
            extra_bed_requested: true,
            is_manual: true,
            explicit_room_ids: None,
        });

        normalize_selections(&mut state, &catalog);

        assert!(state.cottage_selections.is_empty());
        assert_eq!(total_capacity(&state, &catalog), 0);
    }

    #[test]
    fn test_normalize_clamps_room_count_to_availability() {
        let catalog = snapshot(vec![cottage(2, 5, 0)]);
        let id = catalog.cottages()[0].id;
        let mut state = SelectionState::new();
        state.guest_intent = GuestIntent::Numeric(100);
        state.cottage_selections.push(CottageSelection {
            cottage_id: id,
            room_count: 50,
            extra_bed_requested: false,
            is_manual: true,
            explicit_room_ids: None,
        });

        normalize_selections(&mut state, &catalog);

        assert_eq!(state.cottage_selections[0].room_count, 5);
        assert_eq!(total_capacity(&state, &catalog), 10);
        assert!(!is_capacity_sufficient(&state, &catalog));
    }

    #[test]
    fn test_normalize_clears_beds_not_offered_and_unknown_cottages() {
        let catalog = snapshot(vec![cottage(2, 5, 0)]);
        let id = catalog.cottages()[0].id;
        let mut state = SelectionState::new();
        state.cottage_selections.push(CottageSelection {
            cottage_id: id,
            room_count: 2,
            extra_bed_requested: true,
            is_manual: true,
            explicit_room_ids: None,
        });
        state.cottage_selections.push(CottageSelection {
            cottage_id: Uuid::new_v4(),
            room_count: 3,
            extra_bed_requested: false,
            is_manual: true,
            explicit_room_ids: None,
        });

        normalize_selections(&mut state, &catalog);

        assert_eq!(state.cottage_selections.len(), 1);
        assert!(!state.cottage_selections[0].extra_bed_requested);
        assert_eq!(total_capacity(&state, &catalog), 4);
    }

    #[test]
    fn test_normalize_leaves_valid_entries_untouched() {
        let catalog = snapshot(vec![cottage(2, 5, 1)]);
        let id = catalog.cottages()[0].id;
        let mut state = SelectionState::new();
        increment_room(&mut state, id, &catalog);
        toggle_extra_bed(&mut state, &id, &catalog);
        let before = state.cottage_selections.clone();

        normalize_selections(&mut state, &catalog);

        assert_eq!(state.cottage_selections, before);
    }

    #[test]
    fn test_reset_reenables_auto_allocation() {
        let catalog = snapshot(vec![cottage(2, 5, 0)]);
        let id = catalog.cottages()[0].id;
        let mut state = SelectionState::new();
        state.guest_intent = GuestIntent::Numeric(4);

        increment_room(&mut state, id, &catalog);
        auto_allocate(&mut state, &catalog);
        assert_eq!(state.cottage_selections[0].room_count, 1);

        state.reset_cottage_selections();
        auto_allocate(&mut state, &catalog);
        assert_eq!(state.cottage_selections[0].room_count, 2);
        assert!(!state.cottage_selections[0].is_manual);
    }
}
