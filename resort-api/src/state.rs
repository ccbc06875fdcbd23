use resort_booking::BookingServices;
use resort_catalog::CatalogSource;
use resort_shared::events::BookingCreatedEvent;
use resort_store::InMemoryBookingStore;
use std::sync::Arc;
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogSource>,
    pub services: BookingServices,
    /// Read-back access to the booking store the gateway writes through.
    pub store: Arc<InMemoryBookingStore>,
    pub events_tx: broadcast::Sender<BookingCreatedEvent>,
}
