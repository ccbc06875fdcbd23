use resort_shared::money::Paise;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An optional add-on service (wellness program, activity) priced and
/// selected independently of room booking. Immutable per session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramOffering {
    pub id: Uuid,
    pub title: String,
    pub price: Paise,
    /// Included offerings contribute zero price and keep quantity fixed at 1.
    pub included_with_stay: bool,
}

impl ProgramOffering {
    pub fn effective_price(&self) -> Paise {
        if self.included_with_stay {
            0
        } else {
            self.price
        }
    }
}
