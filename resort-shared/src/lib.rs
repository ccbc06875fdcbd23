pub mod events;
pub mod money;
pub mod pii;

pub use money::{format_inr, Paise, CURRENCY};
pub use pii::Masked;
