//! Farming domain: the plot grid state machine, growth, harvest.
//!
//! `Farm` owns the plots, the harvest counter and the donation list. It
//! borrows the ledger, inventory, calendar and catalog for the length of a
//! single call and never holds on to them.

use bevy::prelude::*;
use crate::shared::*;

mod actions;
mod farm;
mod growth;
mod harvest;
mod plot;

pub use farm::Farm;
pub use harvest::{bonus_coins, HarvestOutcome, HarvestRules};
pub use plot::{Donation, GrowthStage, Plot, PlotStatus};

use crate::config::SimConfig;
use actions::handle_plot_actions;

pub struct FarmingPlugin;

impl Plugin for FarmingPlugin {
    fn build(&self, app: &mut App) {
        let (farm, rules) = match app.world().get_resource::<SimConfig>() {
            Some(config) => (Farm::from_config(config), HarvestRules::from_config(config)),
            None => (Farm::default(), HarvestRules::default()),
        };

        app.insert_resource(farm)
            .insert_resource(rules)
            .add_systems(
                Update,
                handle_plot_actions.run_if(in_state(SimState::Running)),
            );
    }
}
