//! Economy domain: currency ledger, seed inventory, seed shop.
//!
//! `Ledger` and `Inventory` are plain resources mutated only through their own
//! methods. Farming calls into them during plant and harvest; the shop flow
//! here handles `BuySeedsEvent`.

use bevy::prelude::*;
use crate::shared::*;

pub mod inventory;
pub mod ledger;
pub mod shop;

pub use inventory::{Inventory, InventoryEntry};
pub use ledger::{Direction, Ledger, Transaction};
pub use shop::purchase_seeds;

use crate::config::SimConfig;
use shop::handle_seed_purchases;

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        let starting_balance = app
            .world()
            .get_resource::<SimConfig>()
            .map(|c| c.starting_balance)
            .unwrap_or(STARTING_BALANCE);

        app.insert_resource(Ledger::new(starting_balance))
            .init_resource::<Inventory>()
            .add_systems(
                Update,
                handle_seed_purchases.run_if(in_state(SimState::Running)),
            );
    }
}
