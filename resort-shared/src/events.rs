use uuid::Uuid;

/// Published on the in-process broadcast channel after a booking is
/// accepted by the booking store.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct BookingCreatedEvent {
    pub booking_id: Uuid,
    pub reference: String,
    pub guest_email: String,
    pub created_at: i64,
}
