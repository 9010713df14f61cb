use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::data::CropCatalog;
use crate::error::InventoryError;
use crate::shared::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub crop_id: CropId,
    pub quantity: u32,
}

/// Seed counts keyed by crop, in first-insertion order.
///
/// Entries never hold zero: a remove that empties an entry deletes it.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    entries: Vec<InventoryEntry>,
}

impl Inventory {
    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    pub fn add(&mut self, crop_id: &str, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.entries.iter_mut().find(|e| e.crop_id == crop_id) {
            Some(entry) => entry.quantity = entry.quantity.saturating_add(quantity),
            None => self.entries.push(InventoryEntry {
                crop_id: crop_id.to_string(),
                quantity,
            }),
        }
    }

    pub fn remove(&mut self, crop_id: &str, quantity: u32) -> Result<(), InventoryError> {
        let held = self.quantity_of(crop_id);
        if held < quantity {
            return Err(InventoryError::InsufficientQuantity {
                crop: crop_id.to_string(),
                requested: quantity,
                held,
            });
        }
        if quantity == 0 {
            return Ok(());
        }
        if let Some(pos) = self.entries.iter().position(|e| e.crop_id == crop_id) {
            self.entries[pos].quantity -= quantity;
            if self.entries[pos].quantity == 0 {
                self.entries.remove(pos);
            }
        }
        Ok(())
    }

    pub fn has(&self, crop_id: &str, quantity: u32) -> bool {
        self.quantity_of(crop_id) >= quantity.max(1)
    }

    pub fn quantity_of(&self, crop_id: &str) -> u32 {
        self.entries
            .iter()
            .find(|e| e.crop_id == crop_id)
            .map(|e| e.quantity)
            .unwrap_or(0)
    }

    pub fn total_count(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Groups entries under their crop's category. Entries whose crop is not
    /// in the catalog are left out.
    pub fn group_by_category(
        &self,
        catalog: &CropCatalog,
    ) -> BTreeMap<CropCategory, Vec<InventoryEntry>> {
        let mut groups: BTreeMap<CropCategory, Vec<InventoryEntry>> = BTreeMap::new();
        for entry in &self.entries {
            match catalog.by_id(&entry.crop_id) {
                Some(def) => groups.entry(def.category).or_default().push(entry.clone()),
                None => debug!("[Inventory] '{}' not in catalog, ungrouped", entry.crop_id),
            }
        }
        groups
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Merges duplicate entries and drops empty ones. Applied to restored
    /// blobs, which are not trusted to hold the invariants.
    pub fn normalized(self) -> Self {
        let mut out = Inventory::default();
        for entry in self.entries {
            out.add(&entry.crop_id, entry.quantity);
        }
        out
    }
}
