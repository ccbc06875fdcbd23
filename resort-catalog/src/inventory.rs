use resort_shared::money::Paise;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Extra-bed policy for a cottage. Each extra bed adds exactly one guest of
/// capacity at a fixed nightly price, up to `max_beds` per selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraBedPolicy {
    pub max_beds: u32,
    pub price_per_night: Paise,
}

/// A concrete, individually bookable room inside a cottage. Capacity and
/// price fall back to the parent cottage when not overridden.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub capacity: Option<u32>,
    pub price_per_night: Option<Paise>,
}

/// A bookable accommodation unit offering one or more rooms. Immutable for
/// the duration of a booking session; owned by the catalog collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryUnit {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    /// Guests accommodated per room, before extra beds.
    pub capacity_per_room: u32,
    pub price_per_night: Paise,
    pub available: bool,
    /// How many rooms of this cottage may be selected at once.
    pub rooms_available: u32,
    pub extra_bed: ExtraBedPolicy,
    /// Known concrete rooms, in assignment order. May be empty when the
    /// catalog tracks the cottage only at unit granularity.
    pub rooms: Vec<Room>,
}

impl InventoryUnit {
    pub fn offers_extra_beds(&self) -> bool {
        self.extra_bed.max_beds > 0
    }

    /// Capacity of a specific known room, honoring its override.
    pub fn room_capacity(&self, room_id: &Uuid) -> u32 {
        self.rooms
            .iter()
            .find(|r| &r.id == room_id)
            .and_then(|r| r.capacity)
            .unwrap_or(self.capacity_per_room)
    }
}
