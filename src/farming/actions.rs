use bevy::prelude::*;

use crate::daycycle::DayCycle;
use crate::data::CropCatalog;
use crate::economy::{Inventory, Ledger};
use crate::rng::SimRng;
use crate::save::{BlobKey, SaveStore};
use crate::shared::*;

use super::farm::Farm;
use super::harvest::HarvestRules;

/// Applies player plot actions, persists whatever changed, and reports the
/// outcome. The first successful planting starts the day cycle.
#[allow(clippy::too_many_arguments)]
pub fn handle_plot_actions(
    mut action_events: EventReader<PlotActionEvent>,
    catalog: Res<CropCatalog>,
    rules: Res<HarvestRules>,
    mut farm: ResMut<Farm>,
    mut ledger: ResMut<Ledger>,
    mut inventory: ResMut<Inventory>,
    mut rng: ResMut<SimRng>,
    mut cycle: ResMut<DayCycle>,
    mut store: ResMut<SaveStore>,
    mut result_writer: EventWriter<PlotActionResultEvent>,
    mut harvest_writer: EventWriter<CropHarvestedEvent>,
    mut donation_writer: EventWriter<DonationRecordedEvent>,
) {
    for ev in action_events.read() {
        let index = ev.plot_index;
        let result = match &ev.action {
            PlotAction::Till => farm.till(index),
            PlotAction::Water => farm.water(index),
            PlotAction::Clear => farm.clear(index),
            PlotAction::Select => farm.select(index),
            PlotAction::Plant(crop_id) => {
                let planted = farm.plant(index, crop_id, &catalog, &mut inventory, now_unix());
                if planted.is_ok() {
                    store.store(BlobKey::Inventory, &*inventory);
                    if cycle.start() {
                        info!("[Farm] First planting started the day cycle");
                        store.store(BlobKey::DayCycle, &cycle.snapshot(now_unix()));
                    }
                }
                planted
            }
            PlotAction::Harvest => farm
                .harvest(
                    index,
                    &catalog,
                    &mut ledger,
                    &mut inventory,
                    &mut rng.0,
                    &rules,
                    now_unix(),
                )
                .map(|outcome| {
                    store.store(BlobKey::HarvestCount, &farm.harvest_count());
                    store.store(BlobKey::Ledger, &*ledger);
                    store.store(BlobKey::Inventory, &*inventory);
                    if let Some(donation) = &outcome.donation {
                        store.store(BlobKey::Donations, farm.donations());
                        donation_writer.send(DonationRecordedEvent {
                            amount: donation.amount,
                            organization: donation.organization.clone(),
                            total_harvests: farm.harvest_count(),
                        });
                    }
                    harvest_writer.send(CropHarvestedEvent {
                        plot_index: index,
                        crop_id: outcome.crop_id,
                        coins: outcome.coins,
                        bonus_seeds: outcome.bonus_seeds,
                    });
                }),
        };

        match &result {
            Ok(()) if ev.action != PlotAction::Select => {
                store.store(BlobKey::FarmPlots, farm.plots());
            }
            Ok(()) => {}
            Err(e) => debug!("[Farm] {:?} on plot {} refused: {}", ev.action, index, e),
        }

        result_writer.send(PlotActionResultEvent {
            plot_index: index,
            action: ev.action.clone(),
            result,
        });
    }
}
