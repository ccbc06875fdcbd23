pub mod inventory;
pub mod programs;
pub mod source;

pub use inventory::{ExtraBedPolicy, InventoryUnit, Room};
pub use programs::ProgramOffering;
pub use source::{CatalogError, CatalogSnapshot, CatalogSource};
