pub mod app_config;
pub mod memory;

pub use memory::{
    InMemoryBookingStore, InMemoryCatalog, InMemoryGuestProfiles, InMemoryTransactions,
    LoggingNotifier, StoredBooking,
};
