//! Pure price derivation over a selection and a catalog snapshot.
//!
//! All arithmetic is exact integer paise; the single rounding point is the
//! tax computation, rounded half-up to the paisa. Totals are recomputed on
//! every read, never cached on the selection.

use crate::selection::SelectionState;
use chrono::NaiveDate;
use resort_catalog::CatalogSnapshot;
use resort_shared::money::{format_inr, Paise};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// GST applied to the combined subtotal. Policy constant, not per-booking
/// configuration.
pub const TAX_RATE_PERCENT: i64 = 18;

/// Whole nights between check-in and check-out. 0 when either date is
/// missing or the range is non-positive: "not yet computable", not an
/// error.
pub fn nights(check_in: Option<NaiveDate>, check_out: Option<NaiveDate>) -> i64 {
    match (check_in, check_out) {
        (Some(start), Some(end)) => (end - start).num_days().max(0),
        _ => 0,
    }
}

// Totals are previewed before dates are chosen, so a zero-night selection
// still prices as one night.
fn billable(nights: i64) -> i64 {
    nights.max(1)
}

pub fn rooms_subtotal(state: &SelectionState, catalog: &CatalogSnapshot, nights: i64) -> Paise {
    state
        .cottage_selections
        .iter()
        .filter_map(|sel| {
            let cottage = catalog.cottage(&sel.cottage_id)?;
            Some(sel.room_count as i64 * cottage.price_per_night * billable(nights))
        })
        .sum()
}

pub fn extra_bed_subtotal(state: &SelectionState, catalog: &CatalogSnapshot, nights: i64) -> Paise {
    state
        .cottage_selections
        .iter()
        .filter(|sel| sel.extra_bed_requested)
        .filter_map(|sel| {
            let cottage = catalog.cottage(&sel.cottage_id)?;
            Some(cottage.extra_bed.price_per_night * billable(nights))
        })
        .sum()
}

/// Included-with-stay offerings price at zero regardless of quantity.
pub fn programs_subtotal(state: &SelectionState, catalog: &CatalogSnapshot) -> Paise {
    state
        .program_selections
        .iter()
        .filter_map(|sel| {
            let offering = catalog.program(&sel.program_id)?;
            Some(sel.quantity as i64 * offering.effective_price())
        })
        .sum()
}

/// Fixed-rate tax on a combined subtotal, rounded half-up to the paisa.
pub fn tax(subtotal: Paise) -> Paise {
    (subtotal * TAX_RATE_PERCENT + 50) / 100
}

pub fn grand_total(state: &SelectionState, catalog: &CatalogSnapshot) -> Paise {
    let n = nights(state.check_in, state.check_out);
    let subtotal = rooms_subtotal(state, catalog, n)
        + extra_bed_subtotal(state, catalog, n)
        + programs_subtotal(state, catalog);
    subtotal + tax(subtotal)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomLine {
    pub cottage_id: Uuid,
    pub name: String,
    pub room_count: u32,
    pub price_per_night: Paise,
    pub line_total: Paise,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramLine {
    pub program_id: Uuid,
    pub title: String,
    pub quantity: u32,
    pub unit_price: Paise,
    pub line_total: Paise,
}

/// The itemized quote shown to the guest and attached to the submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub nights: i64,
    pub rooms_subtotal: Paise,
    pub extra_bed_subtotal: Paise,
    pub programs_subtotal: Paise,
    pub tax: Paise,
    pub grand_total: Paise,
    pub display_total: String,
    pub per_room: Vec<RoomLine>,
    pub programs: Vec<ProgramLine>,
}

pub fn price_breakdown(state: &SelectionState, catalog: &CatalogSnapshot) -> PriceBreakdown {
    let n = nights(state.check_in, state.check_out);
    let rooms = rooms_subtotal(state, catalog, n);
    let beds = extra_bed_subtotal(state, catalog, n);
    let programs = programs_subtotal(state, catalog);
    let tax_amount = tax(rooms + beds + programs);

    let per_room = state
        .cottage_selections
        .iter()
        .filter_map(|sel| {
            let cottage = catalog.cottage(&sel.cottage_id)?;
            Some(RoomLine {
                cottage_id: cottage.id,
                name: cottage.name.clone(),
                room_count: sel.room_count,
                price_per_night: cottage.price_per_night,
                line_total: sel.room_count as i64 * cottage.price_per_night * billable(n),
            })
        })
        .collect();

    let program_lines = state
        .program_selections
        .iter()
        .filter_map(|sel| {
            let offering = catalog.program(&sel.program_id)?;
            Some(ProgramLine {
                program_id: offering.id,
                title: offering.title.clone(),
                quantity: sel.quantity,
                unit_price: offering.effective_price(),
                line_total: sel.quantity as i64 * offering.effective_price(),
            })
        })
        .collect();

    let grand = rooms + beds + programs + tax_amount;
    PriceBreakdown {
        nights: n,
        rooms_subtotal: rooms,
        extra_bed_subtotal: beds,
        programs_subtotal: programs,
        tax: tax_amount,
        grand_total: grand,
        display_total: format_inr(grand),
        per_room,
        programs: program_lines,
    }
}
