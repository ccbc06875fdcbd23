//! In-memory stand-ins for the external collaborators: a catalog source, a
//! booking document store, guest profiles, a notification log, and pending
//! transactions. Used by the API binary and by tests; a production
//! deployment would back these traits with the real document store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use resort_booking::collaborators::{
    BookingGateway, CollaboratorError, ConfirmedBooking, GuestProfileService, NewGuestProfile,
    NewTransaction, NotificationService, TransactionService,
};
use resort_booking::submission::BookingSubmission;
use resort_catalog::{CatalogError, CatalogSource, InventoryUnit, ProgramOffering};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// Human-readable booking reference, e.g. `RB-20260301084512-4821`.
fn gen_reference() -> String {
    let mut rng = rand::thread_rng();
    format!(
        "RB-{}-{:04}",
        Utc::now().format("%Y%m%d%H%M%S"),
        rng.gen_range(0..10_000)
    )
}

/// Fixed catalog snapshot source.
pub struct InMemoryCatalog {
    cottages: Vec<InventoryUnit>,
    programs: Vec<ProgramOffering>,
}

impl InMemoryCatalog {
    pub fn new(cottages: Vec<InventoryUnit>, programs: Vec<ProgramOffering>) -> Self {
        Self { cottages, programs }
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn list_cottages(&self) -> Result<Vec<InventoryUnit>, CatalogError> {
        Ok(self.cottages.clone())
    }

    async fn list_programs(&self) -> Result<Vec<ProgramOffering>, CatalogError> {
        Ok(self.programs.clone())
    }
}

/// A booking as the store keeps it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredBooking {
    pub id: Uuid,
    pub reference: String,
    pub status: String,
    pub submission: BookingSubmission,
    pub created_at: DateTime<Utc>,
}

/// Booking document store. New bookings land in `pending` status.
#[derive(Default)]
pub struct InMemoryBookingStore {
    bookings: RwLock<HashMap<Uuid, StoredBooking>>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: &Uuid) -> Option<StoredBooking> {
        self.bookings.read().await.get(id).cloned()
    }

    pub async fn list(&self) -> Vec<StoredBooking> {
        let mut all: Vec<StoredBooking> = self.bookings.read().await.values().cloned().collect();
        all.sort_by_key(|b| b.created_at);
        all
    }
}

#[async_trait]
impl BookingGateway for InMemoryBookingStore {
    async fn create_booking(
        &self,
        submission: &BookingSubmission,
    ) -> Result<ConfirmedBooking, CollaboratorError> {
        if submission.allocated_cottages.is_empty() {
            return Err("no rooms allocated for booking".into());
        }
        let booking = StoredBooking {
            id: Uuid::new_v4(),
            reference: gen_reference(),
            status: "pending".to_string(),
            submission: submission.clone(),
            created_at: Utc::now(),
        };
        let confirmed = ConfirmedBooking {
            id: booking.id,
            reference: booking.reference.clone(),
        };
        self.bookings.write().await.insert(booking.id, booking);
        Ok(confirmed)
    }
}

#[derive(Default)]
pub struct InMemoryGuestProfiles {
    profiles: RwLock<Vec<(Uuid, NewGuestProfile)>>,
}

impl InMemoryGuestProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.profiles.read().await.len()
    }
}

#[async_trait]
impl GuestProfileService for InMemoryGuestProfiles {
    async fn create_guest_profile(
        &self,
        profile: &NewGuestProfile,
    ) -> Result<Uuid, CollaboratorError> {
        let id = Uuid::new_v4();
        self.profiles.write().await.push((id, profile.clone()));
        Ok(id)
    }
}

/// Notification stand-in: logs the send instead of talking to a mail
/// provider.
pub struct LoggingNotifier;

#[async_trait]
impl NotificationService for LoggingNotifier {
    async fn send_booking_confirmation(
        &self,
        booking_id: Uuid,
        email: &str,
    ) -> Result<(), CollaboratorError> {
        info!(booking_id = %booking_id, email = %email, "booking confirmation sent");
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryTransactions {
    transactions: RwLock<Vec<(Uuid, String, NewTransaction)>>,
}

impl InMemoryTransactions {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn pending(&self) -> Vec<NewTransaction> {
        self.transactions
            .read()
            .await
            .iter()
            .filter(|(_, status, _)| status == "pending")
            .map(|(_, _, tx)| tx.clone())
            .collect()
    }
}

#[async_trait]
impl TransactionService for InMemoryTransactions {
    async fn create_pending_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> Result<Uuid, CollaboratorError> {
        let id = Uuid::new_v4();
        self.transactions
            .write()
            .await
            .push((id, "pending".to_string(), transaction.clone()));
        Ok(id)
    }
}
