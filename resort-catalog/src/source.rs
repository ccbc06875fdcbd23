use crate::inventory::InventoryUnit;
use crate::programs::ProgramOffering;
use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read-only catalog access. Called once per session to take a snapshot;
/// re-fetchable on demand. A fetch failure is surfaced for retry, never
/// substituted with fabricated data.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn list_cottages(&self) -> Result<Vec<InventoryUnit>, CatalogError>;
    async fn list_programs(&self) -> Result<Vec<ProgramOffering>, CatalogError>;
}

/// Immutable per-session view of the catalog with id-indexed lookup.
/// All allocation and pricing derivations run against one snapshot.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    cottages: Vec<InventoryUnit>,
    programs: Vec<ProgramOffering>,
    cottage_index: HashMap<Uuid, usize>,
    program_index: HashMap<Uuid, usize>,
}

impl CatalogSnapshot {
    pub fn new(cottages: Vec<InventoryUnit>, programs: Vec<ProgramOffering>) -> Self {
        let cottage_index = cottages
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id, i))
            .collect();
        let program_index = programs
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id, i))
            .collect();
        Self {
            cottages,
            programs,
            cottage_index,
            program_index,
        }
    }

    pub async fn fetch(source: &dyn CatalogSource) -> Result<Self, CatalogError> {
        let cottages = source.list_cottages().await?;
        let programs = source.list_programs().await?;
        Ok(Self::new(cottages, programs))
    }

    /// Cottages in catalog order (the order auto-allocation ties break on).
    pub fn cottages(&self) -> &[InventoryUnit] {
        &self.cottages
    }

    pub fn programs(&self) -> &[ProgramOffering] {
        &self.programs
    }

    pub fn cottage(&self, id: &Uuid) -> Option<&InventoryUnit> {
        self.cottage_index.get(id).map(|&i| &self.cottages[i])
    }

    pub fn program(&self, id: &Uuid) -> Option<&ProgramOffering> {
        self.program_index.get(id).map(|&i| &self.programs[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{ExtraBedPolicy, Room};

    fn cottage(name: &str) -> InventoryUnit {
        InventoryUnit {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: name.to_lowercase(),
            capacity_per_room: 2,
            price_per_night: 10_000_00,
            available: true,
            rooms_available: 5,
            extra_bed: ExtraBedPolicy {
                max_beds: 0,
                price_per_night: 0,
            },
            rooms: vec![],
        }
    }

    #[test]
    fn test_snapshot_lookup() {
        let a = cottage("Lakeview");
        let b = cottage("Forest");
        let a_id = a.id;
        let snapshot = CatalogSnapshot::new(vec![a, b], vec![]);

        assert_eq!(snapshot.cottages().len(), 2);
        assert_eq!(snapshot.cottage(&a_id).unwrap().name, "Lakeview");
        assert!(snapshot.cottage(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_room_capacity_override() {
        let mut unit = cottage("Lakeview");
        let room_id = Uuid::new_v4();
        unit.rooms.push(Room {
            id: room_id,
            capacity: Some(4),
            price_per_night: None,
        });

        assert_eq!(unit.room_capacity(&room_id), 4);
        assert_eq!(unit.room_capacity(&Uuid::new_v4()), 2);
    }
}
