use chrono::NaiveDate;
use resort_catalog::ProgramOffering;
use resort_shared::pii::Masked;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How many guests the stay must cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "count", rename_all = "snake_case")]
pub enum GuestIntent {
    Numeric(u32),
    /// Exclusive use of the whole property. Normalizes to 1 for capacity
    /// math; callers wanting exclusive-use semantics match on the variant.
    EntireProperty,
}

impl GuestIntent {
    pub fn normalized(&self) -> u32 {
        match self {
            GuestIntent::Numeric(n) => (*n).max(1),
            GuestIntent::EntireProperty => 1,
        }
    }
}

impl Default for GuestIntent {
    fn default() -> Self {
        GuestIntent::Numeric(1)
    }
}

/// One cottage the guest has (or auto-allocation has) picked. Never exists
/// with `room_count` 0; removal is the zero state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CottageSelection {
    pub cottage_id: Uuid,
    pub room_count: u32,
    pub extra_bed_requested: bool,
    /// Manual entries are never overwritten by auto-allocation.
    pub is_manual: bool,
    /// Explicit room ids chosen by the guest (deep-linked room booking);
    /// used verbatim by the submission assembler when present.
    pub explicit_room_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramSelection {
    pub program_id: Uuid,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuestDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Masked<String>,
    #[serde(default)]
    pub special_requests: String,
}

impl GuestDetails {
    /// Name (first and last), email and phone are required from the
    /// guest-details step onward.
    pub fn is_complete(&self) -> bool {
        !self.first_name.trim().is_empty()
            && !self.last_name.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.phone.0.trim().is_empty()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentMethod {
    Card { card_holder: String, last_four: String },
    Upi { vpa: String },
}

impl PaymentMethod {
    pub fn tag(&self) -> &'static str {
        match self {
            PaymentMethod::Card { .. } => "card",
            PaymentMethod::Upi { .. } => "upi",
        }
    }

    /// UPI settles out of band; confirming with it additionally records a
    /// pending transaction.
    pub fn is_deferred_settlement(&self) -> bool {
        matches!(self, PaymentMethod::Upi { .. })
    }
}

/// Everything the guest has chosen so far. Owned by a single booking flow
/// for the duration of one attempt, never persisted mid-flow. Derived
/// totals (capacity, price) are never stored here; the allocation and
/// pricing modules recompute them on every read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionState {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guest_intent: GuestIntent,
    pub cottage_selections: Vec<CottageSelection>,
    pub program_selections: Vec<ProgramSelection>,
    pub guest_details: GuestDetails,
    pub payment_choice: Option<PaymentMethod>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dates_valid(&self) -> bool {
        matches!((self.check_in, self.check_out), (Some(ci), Some(co)) if co > ci)
    }

    pub fn selection(&self, cottage_id: &Uuid) -> Option<&CottageSelection> {
        self.cottage_selections
            .iter()
            .find(|s| &s.cottage_id == cottage_id)
    }

    pub fn has_manual_selection(&self) -> bool {
        self.cottage_selections.iter().any(|s| s.is_manual)
    }

    /// Drops every cottage selection, manual ones included, re-enabling
    /// auto-allocation. The explicit reset the guest asks for.
    pub fn reset_cottage_selections(&mut self) {
        self.cottage_selections.clear();
    }

    /// Adds the program at quantity 1, or removes it if already selected.
    pub fn toggle_program(&mut self, offering: &ProgramOffering) {
        if let Some(pos) = self.program_position(&offering.id) {
            self.program_selections.remove(pos);
        } else {
            self.program_selections.push(ProgramSelection {
                program_id: offering.id,
                quantity: 1,
            });
        }
    }

    /// Quantity +1. Included-with-stay offerings keep quantity fixed at 1,
    /// so incrementing one that is already selected is a no-op.
    pub fn increment_program(&mut self, offering: &ProgramOffering) {
        match self.program_position(&offering.id) {
            Some(pos) => {
                if !offering.included_with_stay {
                    self.program_selections[pos].quantity += 1;
                }
            }
            None => self.program_selections.push(ProgramSelection {
                program_id: offering.id,
                quantity: 1,
            }),
        }
    }

    /// Quantity −1; the entry is removed instead of reaching 0. Absent
    /// entries are a no-op.
    pub fn decrement_program(&mut self, program_id: &Uuid) {
        if let Some(pos) = self.program_position(program_id) {
            if self.program_selections[pos].quantity <= 1 {
                self.program_selections.remove(pos);
            } else {
                self.program_selections[pos].quantity -= 1;
            }
        }
    }

    fn program_position(&self, program_id: &Uuid) -> Option<usize> {
        self.program_selections
            .iter()
            .position(|p| &p.program_id == program_id)
    }
}
