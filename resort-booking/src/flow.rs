//! The gated, ordered progression of one booking attempt:
//! StaySelection → GuestDetails → Payment → Confirmation.
//!
//! Guards block advancement with a specific, recoverable error; `back`
//! never re-validates and never loses data. Confirmation is the only step
//! with side effects: the booking-creation call must succeed, after which
//! the remaining collaborator calls are fire-and-forget.

use crate::allocation;
use crate::collaborators::{BookingServices, ConfirmedBooking, NewGuestProfile, NewTransaction};
use crate::selection::SelectionState;
use crate::submission;
use resort_catalog::CatalogSnapshot;
use resort_shared::money::CURRENCY;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    StaySelection,
    GuestDetails,
    Payment,
    Confirmation,
}

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("check-in and check-out dates are required")]
    MissingDates,
    #[error("check-out must be after check-in")]
    InvalidDateRange,
    #[error("selected rooms cannot accommodate all guests")]
    InsufficientCapacity,
    #[error("guest name, email and phone are required")]
    IncompleteGuestDetails,
    #[error("select a payment method to continue")]
    MissingPaymentMethod,
    #[error("the payment step completes through confirmation")]
    ConfirmationRequired,
    #[error("confirmation is only available from the payment step")]
    NotAtPayment,
    #[error("this booking is already confirmed")]
    FlowComplete,
    #[error("booking could not be created, please try again")]
    BookingFailed,
}

/// Drives a single guest's booking attempt. Owns the SelectionState for the
/// attempt's duration; discarded once the submission is accepted or the
/// guest walks away.
#[derive(Debug, Clone)]
pub struct BookingFlow {
    step: BookingStep,
    pub selection: SelectionState,
}

impl BookingFlow {
    pub fn new() -> Self {
        Self {
            step: BookingStep::StaySelection,
            selection: SelectionState::new(),
        }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    /// Runs the current step's exit guard and advances on success. A failed
    /// guard leaves the flow where it is.
    pub fn advance(&mut self, catalog: &CatalogSnapshot) -> Result<BookingStep, FlowError> {
        match self.step {
            BookingStep::StaySelection => {
                match (self.selection.check_in, self.selection.check_out) {
                    (None, _) | (_, None) => return Err(FlowError::MissingDates),
                    (Some(check_in), Some(check_out)) if check_out <= check_in => {
                        return Err(FlowError::InvalidDateRange)
                    }
                    _ => {}
                }
                // Suggest an allocation only when the guest has not chosen;
                // manual selections are never overridden here, even when
                // insufficient.
                if !self.selection.has_manual_selection() {
                    allocation::auto_allocate(&mut self.selection, catalog);
                }
                if !allocation::is_capacity_sufficient(&self.selection, catalog) {
                    return Err(FlowError::InsufficientCapacity);
                }
                self.step = BookingStep::GuestDetails;
            }
            BookingStep::GuestDetails => {
                if !self.selection.guest_details.is_complete() {
                    return Err(FlowError::IncompleteGuestDetails);
                }
                self.step = BookingStep::Payment;
            }
            BookingStep::Payment => return Err(FlowError::ConfirmationRequired),
            BookingStep::Confirmation => return Err(FlowError::FlowComplete),
        }
        Ok(self.step)
    }

    /// Steps back without re-validating; nothing entered is lost. No-op on
    /// the first step and once the booking is confirmed: a confirmed
    /// attempt can never return to the payment step and submit again.
    pub fn back(&mut self) -> BookingStep {
        self.step = match self.step {
            BookingStep::StaySelection => BookingStep::StaySelection,
            BookingStep::GuestDetails => BookingStep::StaySelection,
            BookingStep::Payment => BookingStep::GuestDetails,
            BookingStep::Confirmation => BookingStep::Confirmation,
        };
        self.step
    }

    /// Completes the payment step: assembles the submission, creates the
    /// booking, then dispatches the best-effort side calls. A creation
    /// failure keeps the flow on the payment step with nothing committed.
    pub async fn confirm(
        &mut self,
        catalog: &CatalogSnapshot,
        services: &BookingServices,
    ) -> Result<ConfirmedBooking, FlowError> {
        if self.step != BookingStep::Payment {
            return Err(FlowError::NotAtPayment);
        }
        let payment = self
            .selection
            .payment_choice
            .clone()
            .ok_or(FlowError::MissingPaymentMethod)?;

        let payload = submission::assemble(&self.selection, catalog);
        let confirmed = services
            .bookings
            .create_booking(&payload)
            .await
            .map_err(|err| {
                error!(error = %err, "booking creation failed");
                FlowError::BookingFailed
            })?;
        info!(booking_id = %confirmed.id, reference = %confirmed.reference, "booking confirmed");

        // The reservation is secured; everything below is fire-and-forget
        // and must not block or fail the flow.
        let profiles = services.profiles.clone();
        let profile = NewGuestProfile {
            first_name: self.selection.guest_details.first_name.clone(),
            last_name: self.selection.guest_details.last_name.clone(),
            email: self.selection.guest_details.email.clone(),
            phone: self.selection.guest_details.phone.0.clone(),
            source: "booking_flow".to_string(),
        };
        tokio::spawn(async move {
            if let Err(err) = profiles.create_guest_profile(&profile).await {
                warn!(error = %err, "guest profile creation failed");
            }
        });

        let notifications = services.notifications.clone();
        let booking_id = confirmed.id;
        let email = self.selection.guest_details.email.clone();
        tokio::spawn(async move {
            if let Err(err) = notifications
                .send_booking_confirmation(booking_id, &email)
                .await
            {
                warn!(error = %err, "confirmation notification failed");
            }
        });

        if payment.is_deferred_settlement() {
            let transactions = services.transactions.clone();
            let transaction = NewTransaction {
                booking_id: confirmed.id,
                amount: payload.price_breakdown.grand_total,
                currency: CURRENCY.to_string(),
                method: payment.tag().to_string(),
                reference: confirmed.reference.clone(),
            };
            tokio::spawn(async move {
                if let Err(err) = transactions.create_pending_transaction(&transaction).await {
                    warn!(error = %err, "pending transaction record failed");
                }
            });
        }

        self.step = BookingStep::Confirmation;
        Ok(confirmed)
    }
}

impl Default for BookingFlow {
    fn default() -> Self {
        Self::new()
    }
}
