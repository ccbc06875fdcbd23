//! Boundary contracts for the external collaborators the flow talks to at
//! its edges. Transport, storage and retry policy live behind these traits.

use crate::submission::BookingSubmission;
use async_trait::async_trait;
use resort_shared::money::Paise;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// What the booking collaborator returns once a reservation is secured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmedBooking {
    pub id: Uuid,
    pub reference: String,
}

#[async_trait]
pub trait BookingGateway: Send + Sync {
    /// Creates the reservation. The one call that must succeed before the
    /// flow reaches confirmation.
    async fn create_booking(
        &self,
        submission: &BookingSubmission,
    ) -> Result<ConfirmedBooking, CollaboratorError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGuestProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub source: String,
}

#[async_trait]
pub trait GuestProfileService: Send + Sync {
    /// Best-effort CRM record; failures are logged, never surfaced.
    async fn create_guest_profile(
        &self,
        profile: &NewGuestProfile,
    ) -> Result<Uuid, CollaboratorError>;
}

#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Best-effort confirmation message to the guest.
    async fn send_booking_confirmation(
        &self,
        booking_id: Uuid,
        email: &str,
    ) -> Result<(), CollaboratorError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub booking_id: Uuid,
    pub amount: Paise,
    pub currency: String,
    pub method: String,
    pub reference: String,
}

#[async_trait]
pub trait TransactionService: Send + Sync {
    /// Records a pending settlement for deferred payment methods. The
    /// record starts in `pending` status; reconciliation is external.
    async fn create_pending_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> Result<Uuid, CollaboratorError>;
}

/// The bundle of collaborators a flow needs to confirm a booking.
#[derive(Clone)]
pub struct BookingServices {
    pub bookings: Arc<dyn BookingGateway>,
    pub profiles: Arc<dyn GuestProfileService>,
    pub notifications: Arc<dyn NotificationService>,
    pub transactions: Arc<dyn TransactionService>,
}
