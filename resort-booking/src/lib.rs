pub mod allocation;
pub mod collaborators;
pub mod flow;
pub mod pricing;
pub mod selection;
pub mod submission;

pub use collaborators::{BookingServices, ConfirmedBooking};
pub use flow::{BookingFlow, BookingStep, FlowError};
pub use pricing::PriceBreakdown;
pub use selection::{GuestIntent, SelectionState};
pub use submission::BookingSubmission;
