//! Expands a selection into the wire shape the booking collaborator
//! consumes. Assembly is pure: it never mutates the selection, and the
//! payload is built once at confirmation time and not retained afterwards.

use crate::pricing::{self, PriceBreakdown, ProgramLine};
use crate::selection::{GuestIntent, SelectionState};
use chrono::NaiveDate;
use resort_catalog::CatalogSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// One-shot payload for `BookingGateway::create_booking`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingSubmission {
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub guests: u32,
    pub entire_property: bool,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub nights: i64,
    /// Concrete room ids to book, in assignment order. Falls back to the
    /// parent cottage id where the catalog knows fewer rooms than were
    /// selected; the booking collaborator is the authority on final
    /// assignment and may reject.
    pub allocated_cottages: Vec<Uuid>,
    pub extra_bedding: bool,
    pub extra_beds_total: u32,
    pub extra_beds_by_cottage: HashMap<Uuid, u32>,
    pub special_requests: String,
    pub payment_method: Option<String>,
    pub programs: Vec<ProgramLine>,
    pub price_breakdown: PriceBreakdown,
}

pub fn assemble(state: &SelectionState, catalog: &CatalogSnapshot) -> BookingSubmission {
    let mut allocated: Vec<Uuid> = Vec::new();
    let mut covered: u32 = 0;
    let mut extra_beds_by_cottage: HashMap<Uuid, u32> = HashMap::new();

    for sel in &state.cottage_selections {
        let cottage = catalog.cottage(&sel.cottage_id);
        match (&sel.explicit_room_ids, cottage) {
            (Some(ids), Some(cottage)) => {
                for room_id in ids {
                    allocated.push(*room_id);
                    covered += cottage.room_capacity(room_id);
                }
            }
            (None, Some(cottage)) => {
                for i in 0..sel.room_count as usize {
                    match cottage.rooms.get(i) {
                        Some(room) => allocated.push(room.id),
                        None => allocated.push(cottage.id),
                    }
                }
                covered += sel.room_count * cottage.capacity_per_room;
            }
            // Unknown cottage: nothing to expand, the gate already failed it.
            (_, None) => {}
        }
        if sel.extra_bed_requested {
            extra_beds_by_cottage.insert(sel.cottage_id, 1);
            covered += 1;
        }
    }

    top_up(state, catalog, &mut allocated, covered);

    let extra_beds_total = extra_beds_by_cottage.values().sum();
    let breakdown = pricing::price_breakdown(state, catalog);

    BookingSubmission {
        guest_name: state.guest_details.full_name(),
        guest_email: state.guest_details.email.clone(),
        guest_phone: state.guest_details.phone.0.clone(),
        guests: state.guest_intent.normalized(),
        entire_property: matches!(state.guest_intent, GuestIntent::EntireProperty),
        check_in: state.check_in,
        check_out: state.check_out,
        nights: breakdown.nights,
        allocated_cottages: allocated,
        extra_bedding: extra_beds_total > 0,
        extra_beds_total,
        extra_beds_by_cottage,
        special_requests: state.guest_details.special_requests.clone(),
        payment_method: state.payment_choice.as_ref().map(|p| p.tag().to_string()),
        programs: breakdown.programs.clone(),
        price_breakdown: breakdown,
    }
}

/// Last-resort safety net, distinct from the interactive capacity gate:
/// explicit room-id selections can under-cover the guest count (deep-linked
/// room booking bypasses the gate), so after expansion we greedily append
/// available, unselected cottages largest-capacity-first until intent is
/// covered or inventory runs out. Each appended cottage contributes its
/// remaining rooms.
fn top_up(
    state: &SelectionState,
    catalog: &CatalogSnapshot,
    allocated: &mut Vec<Uuid>,
    mut covered: u32,
) {
    let intent = state.guest_intent.normalized();
    if covered >= intent {
        return;
    }

    let mut candidates: Vec<_> = catalog
        .cottages()
        .iter()
        .filter(|c| c.available && c.rooms_available > 0)
        .filter(|c| state.selection(&c.id).is_none())
        .collect();
    candidates.sort_by(|a, b| b.capacity_per_room.cmp(&a.capacity_per_room));

    for cottage in candidates {
        if covered >= intent {
            break;
        }
        allocated.push(cottage.id);
        covered += cottage.capacity_per_room * cottage.rooms_available;
    }
}
