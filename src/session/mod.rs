//! Session domain: full application reset and starting a new farm.
//!
//! Both requests wipe every domain in a fixed order and clear every blob.
//! Starting a new farm then lays out the grid for the chosen land size and
//! records the region.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::calendar::Calendar;
use crate::config::SimConfig;
use crate::daycycle::DayCycle;
use crate::economy::{Inventory, Ledger};
use crate::farming::Farm;
use crate::save::{BlobKey, SaveStore};
use crate::shared::*;

/// Resets the farm, inventory, calendar, ledger and day cycle, in that order,
/// then clears every persisted blob.
pub fn reset_all(
    farm: &mut Farm,
    inventory: &mut Inventory,
    calendar: &mut Calendar,
    ledger: &mut Ledger,
    cycle: &mut DayCycle,
    store: &mut SaveStore,
    starting_balance: Coins,
) {
    farm.reset_farm();
    inventory.clear();
    calendar.reset();
    ledger.reset(starting_balance);
    cycle.stop_and_reset();
    store.clear_all();
}

#[derive(SystemParam)]
pub struct Session<'w> {
    config: Res<'w, SimConfig>,
    profile: ResMut<'w, FarmProfile>,
    farm: ResMut<'w, Farm>,
    inventory: ResMut<'w, Inventory>,
    calendar: ResMut<'w, Calendar>,
    ledger: ResMut<'w, Ledger>,
    cycle: ResMut<'w, DayCycle>,
    store: ResMut<'w, SaveStore>,
}

impl Session<'_> {
    fn reset_all(&mut self) {
        reset_all(
            &mut self.farm,
            &mut self.inventory,
            &mut self.calendar,
            &mut self.ledger,
            &mut self.cycle,
            &mut self.store,
            self.config.starting_balance,
        );
    }

    /// Full reset, back to the configured grid with no region.
    pub fn reset_game(&mut self) {
        self.reset_all();
        let (rows, columns) = (self.config.grid_rows, self.config.grid_columns);
        self.farm.resize(rows, columns);
        *self.profile = FarmProfile::default();
        info!("[Session] Game reset");
    }

    /// Full reset, then a fresh grid for `land_size` in `region`. The new
    /// state is persisted straight away.
    pub fn start_new_farm(&mut self, region: Region, land_size: LandSize) {
        self.reset_all();
        let (rows, columns) = land_size.grid();
        self.farm.resize(rows, columns);
        *self.profile = FarmProfile {
            region: Some(region),
            land_size,
        };

        self.store.store(BlobKey::FarmProfile, &*self.profile);
        self.store.store(BlobKey::FarmPlots, self.farm.plots());
        self.store.store(BlobKey::HarvestCount, &self.farm.harvest_count());
        self.store.store(BlobKey::Donations, self.farm.donations());
        self.store.store(BlobKey::Inventory, &*self.inventory);
        self.store.store(BlobKey::Ledger, &*self.ledger);
        self.store.store(BlobKey::Calendar, &self.calendar.snapshot());
        self.store.store(BlobKey::DayCycle, &self.cycle.snapshot(now_unix()));

        info!(
            "[Session] New {:?} farm in {:?}: {}x{} plots, balance {}",
            land_size,
            region,
            rows,
            columns,
            self.ledger.balance()
        );
    }
}

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (handle_reset_requests, handle_new_farm_requests)
                .chain()
                .run_if(in_state(SimState::Running)),
        );
    }
}

pub fn handle_reset_requests(mut reset_events: EventReader<ResetGameEvent>, mut session: Session) {
    for _ in reset_events.read() {
        session.reset_game();
    }
}

pub fn handle_new_farm_requests(mut new_farm_events: EventReader<NewFarmEvent>, mut session: Session) {
    for ev in new_farm_events.read() {
        session.start_new_farm(ev.region, ev.land_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CropCatalog;
    use std::time::Duration;

    #[test]
    fn test_reset_all_wipes_every_domain_and_blob() {
        let catalog = CropCatalog::builtin();
        let mut farm = Farm::default();
        let mut inventory = Inventory::default();
        let mut calendar = Calendar::default();
        let mut ledger = Ledger::new(1000);
        let mut cycle = DayCycle::new(Duration::from_secs(180));
        let mut store = SaveStore::memory();

        inventory.add("tomato", 3);
        farm.plant(0, "tomato", &catalog, &mut inventory, 0).unwrap();
        calendar.set(9, Season::Summer, Weather::Hot);
        ledger.debit(100, "seeds").unwrap();
        cycle.start();
        cycle.tick(Duration::from_secs(400));
        for key in BlobKey::ALL {
            store.store(key, &0u8);
        }

        reset_all(
            &mut farm,
            &mut inventory,
            &mut calendar,
            &mut ledger,
            &mut cycle,
            &mut store,
            1000,
        );

        assert_eq!(farm, {
            let mut fresh = Farm::default();
            fresh.reset_farm();
            fresh
        });
        assert!(inventory.is_empty());
        assert_eq!(calendar, Calendar::default());
        assert_eq!(ledger, Ledger::new(1000));
        assert_eq!(cycle, DayCycle::new(Duration::from_secs(180)));
        assert!(BlobKey::ALL.iter().all(|k| !store.contains(*k)));
    }
}
