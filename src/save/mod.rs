//! Save domain: blob persistence and restore on boot.
//!
//! Each entity is persisted as its own JSON blob right after the operation
//! that changed it. On `OnEnter(SimState::Loading)` every blob that exists is
//! read back; a missing or corrupt blob leaves the default in place.

mod store;

pub use store::{
    decode_blob, encode_blob, BlobKey, FileStore, KeyValueStore, MemoryStore, SaveError,
    SaveStore,
};

use bevy::prelude::*;

use crate::calendar::{Calendar, CalendarBlob};
use crate::config::SimConfig;
use crate::economy::{Inventory, Ledger};
use crate::farming::{Donation, Farm, Plot};
use crate::shared::*;

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<SaveStore>() {
            let dir = app
                .world()
                .get_resource::<SimConfig>()
                .map(|c| c.save_dir.clone())
                .unwrap_or_else(|| SimConfig::default().save_dir);
            info!("[Save] Using file store at {}", dir.display());
            app.insert_resource(SaveStore::files(dir));
        }

        app.init_resource::<FarmProfile>().add_systems(
            OnEnter(SimState::Loading),
            restore_persisted_state.in_set(LoadingSet::Restore),
        );
    }
}

/// Reads every blob that exists into its resource.
pub fn restore_persisted_state(
    store: Res<SaveStore>,
    config: Res<SimConfig>,
    mut profile: ResMut<FarmProfile>,
    mut farm: ResMut<Farm>,
    mut ledger: ResMut<Ledger>,
    mut inventory: ResMut<Inventory>,
    mut calendar: ResMut<Calendar>,
) {
    let saved_profile = store.load::<FarmProfile>(BlobKey::FarmProfile);
    let columns = match saved_profile {
        Some(p) => {
            *profile = p;
            let (rows, columns) = p.land_size.grid();
            if (farm.rows(), farm.columns()) != (rows, columns) {
                farm.resize(rows, columns);
            }
            columns
        }
        None => config.grid_columns,
    };

    farm.restore(
        store.load::<Vec<Plot>>(BlobKey::FarmPlots),
        columns,
        store.load_or_default::<u32>(BlobKey::HarvestCount),
        store.load_or_default::<Vec<Donation>>(BlobKey::Donations),
    );

    if let Some(saved) = store.load::<Ledger>(BlobKey::Ledger) {
        *ledger = saved;
    }
    if let Some(saved) = store.load::<Inventory>(BlobKey::Inventory) {
        *inventory = saved.normalized();
    }
    if let Some(saved) = store.load::<CalendarBlob>(BlobKey::Calendar) {
        calendar.restore(saved);
    }

    info!(
        "[Save] Restored: {} plots, {} harvests, balance {}, {} seeds, Day {} {:?}",
        farm.len(),
        farm.harvest_count(),
        ledger.balance(),
        inventory.total_count(),
        calendar.day(),
        calendar.season()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CropCatalog;
    use crate::daycycle::TimerBlob;
    use crate::economy::InventoryEntry;

    #[test]
    fn test_plots_round_trip() {
        let catalog = CropCatalog::builtin();
        let mut farm = Farm::default();
        let mut inv = Inventory::default();
        inv.add("rose", 1);
        farm.till(1).unwrap();
        farm.plant(2, "rose", &catalog, &mut inv, 77).unwrap();
        farm.water(2).unwrap();

        let bytes = encode_blob(BlobKey::FarmPlots, farm.plots()).unwrap();
        let back: Vec<Plot> = decode_blob(BlobKey::FarmPlots, &bytes).unwrap();
        assert_eq!(back.as_slice(), farm.plots());
    }

    #[test]
    fn test_ledger_and_inventory_round_trip() {
        let mut ledger = Ledger::new(1000);
        ledger.debit(35, "Purchased 1 Rose seeds").unwrap();
        ledger.credit(60, "Harvested Rose");
        let bytes = encode_blob(BlobKey::Ledger, &ledger).unwrap();
        assert_eq!(decode_blob::<Ledger>(BlobKey::Ledger, &bytes).unwrap(), ledger);

        let mut inv = Inventory::default();
        inv.add("tomato", 3);
        inv.add("basil", 1);
        let bytes = encode_blob(BlobKey::Inventory, &inv).unwrap();
        assert_eq!(decode_blob::<Inventory>(BlobKey::Inventory, &bytes).unwrap(), inv);
    }

    #[test]
    fn test_small_blobs_round_trip() {
        let cal = CalendarBlob {
            day: 12,
            season: Season::Winter,
            weather: Weather::Storm,
        };
        let bytes = encode_blob(BlobKey::Calendar, &cal).unwrap();
        assert_eq!(decode_blob::<CalendarBlob>(BlobKey::Calendar, &bytes).unwrap(), cal);

        let donations = vec![Donation {
            amount: 10,
            organization: DONATION_ORGANIZATION.into(),
            timestamp: 5,
        }];
        let bytes = encode_blob(BlobKey::Donations, &donations).unwrap();
        assert_eq!(
            decode_blob::<Vec<Donation>>(BlobKey::Donations, &bytes).unwrap(),
            donations
        );

        let profile = FarmProfile {
            region: Some(Region::Brazil),
            land_size: LandSize::Medium,
        };
        let bytes = encode_blob(BlobKey::FarmProfile, &profile).unwrap();
        assert_eq!(
            decode_blob::<FarmProfile>(BlobKey::FarmProfile, &bytes).unwrap(),
            profile
        );
    }

    #[test]
    fn test_timer_and_harvest_count_round_trip() {
        let timer = TimerBlob {
            running: true,
            paused: true,
            remaining_ms: 73_250,
            days_elapsed: 41,
            anchor: Some(1_700_000_123),
        };
        let bytes = encode_blob(BlobKey::DayCycle, &timer).unwrap();
        assert_eq!(decode_blob::<TimerBlob>(BlobKey::DayCycle, &bytes).unwrap(), timer);

        let bytes = encode_blob(BlobKey::HarvestCount, &137u32).unwrap();
        assert_eq!(decode_blob::<u32>(BlobKey::HarvestCount, &bytes).unwrap(), 137);
    }

    #[test]
    fn test_inventory_blob_is_a_plain_entry_list() {
        let bytes = br#"[{"crop_id":"corn","quantity":2},{"crop_id":"corn","quantity":0}]"#;
        let inv = decode_blob::<Inventory>(BlobKey::Inventory, bytes)
            .unwrap()
            .normalized();
        assert_eq!(
            inv.entries(),
            &[InventoryEntry {
                crop_id: "corn".into(),
                quantity: 2
            }]
        );
    }

    #[test]
    fn test_decode_garbage_is_an_error() {
        assert!(matches!(
            decode_blob::<Ledger>(BlobKey::Ledger, b"[1,2,3]"),
            Err(SaveError::Decode { key: "ledger", .. })
        ));
    }
}
