//! Data layer: the crop catalog.
//!
//! `DataPlugin` fills the `CropCatalog` from the built-in crop table in
//! `OnEnter(SimState::Loading)`. The catalog is immutable afterwards; no
//! domain mutates it.

mod crops;

use bevy::prelude::*;
use crate::shared::*;

pub use crops::builtin_crops;

/// Immutable registry of every crop definition, in a stable display order.
#[derive(Resource, Debug, Clone, Default)]
pub struct CropCatalog {
    crops: Vec<CropDef>,
}

impl CropCatalog {
    pub fn new(crops: Vec<CropDef>) -> Self {
        Self { crops }
    }

    pub fn builtin() -> Self {
        Self::new(builtin_crops())
    }

    pub fn list_all(&self) -> &[CropDef] {
        &self.crops
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }

    pub fn by_id(&self, id: &str) -> Option<&CropDef> {
        self.crops.iter().find(|c| c.id == id)
    }

    pub fn by_name(&self, name: &str) -> Option<&CropDef> {
        self.crops.iter().find(|c| c.name == name)
    }

    pub fn by_category(&self, category: CropCategory) -> Vec<&CropDef> {
        self.crops.iter().filter(|c| c.category == category).collect()
    }

    /// Common crops plus the ones specific to `region`, in catalog order.
    pub fn for_region(&self, region: Region) -> Vec<&CropDef> {
        self.crops
            .iter()
            .filter(|c| c.is_common() || c.regions.contains(&region))
            .collect()
    }

    /// Crops the shop sells: the regional selection when a region is known,
    /// otherwise the whole catalog.
    pub fn offered(&self, region: Option<Region>) -> Vec<&CropDef> {
        match region {
            Some(region) => self.for_region(region),
            None => self.crops.iter().collect(),
        }
    }
}

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CropCatalog>()
            .add_systems(
                OnEnter(SimState::Loading),
                load_catalog.in_set(LoadingSet::Catalog),
            );
    }
}

/// Populates the catalog unless something (a test, an embedding app) already
/// inserted a non-empty one.
pub fn load_catalog(mut catalog: ResMut<CropCatalog>) {
    if !catalog.is_empty() {
        info!("[Data] Using pre-populated catalog ({} crops)", catalog.len());
        return;
    }
    *catalog = CropCatalog::builtin();
    info!("[Data] Crops loaded: {}", catalog.len());
}
