use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use resort_booking::allocation;
use resort_booking::pricing::{self, PriceBreakdown};
use resort_booking::selection::{
    CottageSelection, GuestDetails, PaymentMethod, ProgramSelection, SelectionState,
};
use resort_booking::submission;
use resort_booking::{BookingFlow, FlowError, GuestIntent};
use resort_catalog::CatalogSnapshot;
use resort_shared::events::BookingCreatedEvent;
use resort_store::StoredBooking;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/bookings/quote", post(quote_booking))
        .route("/api/bookings", post(create_booking).get(list_bookings))
        .route("/api/bookings/{booking_id}", get(get_booking))
}

#[derive(Debug, Deserialize)]
struct QuoteRequest {
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
    guest_intent: GuestIntent,
    #[serde(default)]
    cottage_selections: Vec<CottageSelection>,
    #[serde(default)]
    program_selections: Vec<ProgramSelection>,
}

#[derive(Debug, Serialize)]
struct QuoteResponse {
    allocation: Vec<CottageSelection>,
    total_capacity: u32,
    price_breakdown: PriceBreakdown,
}

/// Mirrors the client-side derivation on the server: auto-allocate when the
/// guest has not chosen, validate capacity, price the result.
async fn quote_booking(
    State(state): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    let catalog = snapshot(&state).await?;

    let mut selection = SelectionState {
        check_in: req.check_in,
        check_out: req.check_out,
        guest_intent: req.guest_intent,
        cottage_selections: req.cottage_selections,
        program_selections: req.program_selections,
        ..SelectionState::default()
    };

    // Request bodies bypass the selection controls, so re-establish their
    // invariants before deriving anything from the state.
    allocation::normalize_selections(&mut selection, &catalog);
    if !selection.has_manual_selection() {
        allocation::auto_allocate(&mut selection, &catalog);
    }
    if !allocation::is_capacity_sufficient(&selection, &catalog) {
        return Err(AppError::ValidationError(
            FlowError::InsufficientCapacity.to_string(),
        ));
    }

    Ok(Json(QuoteResponse {
        total_capacity: allocation::total_capacity(&selection, &catalog),
        price_breakdown: pricing::price_breakdown(&selection, &catalog),
        allocation: selection.cottage_selections,
    }))
}

#[derive(Debug, Deserialize)]
struct CreateBookingRequest {
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
    guest_intent: GuestIntent,
    #[serde(default)]
    cottage_selections: Vec<CottageSelection>,
    #[serde(default)]
    program_selections: Vec<ProgramSelection>,
    guest_details: GuestDetails,
    payment: PaymentMethod,
}

#[derive(Debug, Serialize)]
struct CreateBookingResponse {
    id: Uuid,
    reference: String,
    status: String,
    allocated_cottages: Vec<Uuid>,
    price_breakdown: PriceBreakdown,
}

/// Runs the whole gated flow server-side: stay gate, guest-details gate,
/// then confirmation against the booking store.
async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Json<CreateBookingResponse>, AppError> {
    let catalog = snapshot(&state).await?;

    let mut flow = BookingFlow::new();
    flow.selection = SelectionState {
        check_in: req.check_in,
        check_out: req.check_out,
        guest_intent: req.guest_intent,
        cottage_selections: req.cottage_selections,
        program_selections: req.program_selections,
        guest_details: req.guest_details,
        payment_choice: Some(req.payment),
    };
    allocation::normalize_selections(&mut flow.selection, &catalog);

    flow.advance(&catalog).map_err(flow_error)?;
    flow.advance(&catalog).map_err(flow_error)?;
    let confirmed = flow.confirm(&catalog, &state.services).await.map_err(flow_error)?;

    // Expansion is pure, so re-running it for the response matches what the
    // gateway stored.
    let payload = submission::assemble(&flow.selection, &catalog);

    let _ = state.events_tx.send(BookingCreatedEvent {
        booking_id: confirmed.id,
        reference: confirmed.reference.clone(),
        guest_email: payload.guest_email.clone(),
        created_at: Utc::now().timestamp(),
    });
    info!(booking_id = %confirmed.id, "booking created");

    Ok(Json(CreateBookingResponse {
        id: confirmed.id,
        reference: confirmed.reference,
        status: "pending".to_string(),
        allocated_cottages: payload.allocated_cottages,
        price_breakdown: payload.price_breakdown,
    }))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<StoredBooking>, AppError> {
    state
        .store
        .get(&booking_id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError("Booking not found".to_string()))
}

async fn list_bookings(State(state): State<AppState>) -> Json<Vec<StoredBooking>> {
    Json(state.store.list().await)
}

async fn snapshot(state: &AppState) -> Result<CatalogSnapshot, AppError> {
    CatalogSnapshot::fetch(state.catalog.as_ref())
        .await
        .map_err(|e| AppError::ServiceUnavailable(e.to_string()))
}

/// Guard failures are correctable input; a failed booking creation is
/// retryable. Raw collaborator errors never reach the guest.
fn flow_error(err: FlowError) -> AppError {
    match err {
        FlowError::BookingFailed => AppError::ServiceUnavailable(err.to_string()),
        _ => AppError::ValidationError(err.to_string()),
    }
}
