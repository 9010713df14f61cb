//! Sproutfield: the state engine of a casual farming simulation.
//!
//! Plots are tilled, planted, watered and harvested on a grid; crops grow once
//! per in-game day under a weather/season multiplier; coins and seeds live in
//! a ledger and an inventory. Presentation is not part of this crate: a front
//! end sends the request events in [`shared`] and reads the resources back.
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy::state::app::StatesPlugin;
//! use sproutfield::SproutfieldPlugin;
//!
//! App::new()
//!     .add_plugins((MinimalPlugins, StatesPlugin))
//!     .add_plugins(SproutfieldPlugin::default())
//!     .run();
//! ```

pub mod calendar;
pub mod config;
pub mod data;
pub mod daycycle;
pub mod economy;
pub mod error;
pub mod farming;
pub mod rng;
pub mod save;
pub mod session;
pub mod shared;

use bevy::prelude::*;

use config::{SimConfig, CONFIG_FILE};
use rng::SimRng;
use shared::*;

/// Wires every domain plugin, the sim state machine and the shared events.
///
/// Uses, in order of preference: a `SimConfig` resource already in the app,
/// the config given here, or `sproutfield.ron` from the working directory.
/// A `SaveStore` inserted before this plugin replaces the default file store.
#[derive(Default)]
pub struct SproutfieldPlugin {
    pub config: Option<SimConfig>,
}

impl SproutfieldPlugin {
    pub fn with_config(config: SimConfig) -> Self {
        Self {
            config: Some(config),
        }
    }
}

impl Plugin for SproutfieldPlugin {
    fn build(&self, app: &mut App) {
        let config = match app.world().get_resource::<SimConfig>() {
            Some(existing) => existing.clone(),
            None => self
                .config
                .clone()
                .unwrap_or_else(|| SimConfig::load_or_default(CONFIG_FILE)),
        };
        if !app.world().contains_resource::<SimRng>() {
            app.insert_resource(SimRng::from_config(&config));
        }
        app.insert_resource(config);

        app.init_state::<SimState>().configure_sets(
            OnEnter(SimState::Loading),
            (
                LoadingSet::Catalog,
                LoadingSet::Restore,
                LoadingSet::CatchUp,
                LoadingSet::Finish,
            )
                .chain(),
        );

        // ── Requests ───────────────────────────────────────────────────────
        app.add_event::<PlotActionEvent>()
            .add_event::<BuySeedsEvent>()
            .add_event::<DayCycleControlEvent>()
            .add_event::<ResetGameEvent>()
            .add_event::<NewFarmEvent>();

        // ── Outcomes ───────────────────────────────────────────────────────
        app.add_event::<PlotActionResultEvent>()
            .add_event::<PurchaseResultEvent>()
            .add_event::<CropHarvestedEvent>()
            .add_event::<DonationRecordedEvent>()
            .add_event::<DayEndEvent>()
            .add_event::<SeasonChangeEvent>();

        app.add_plugins((
            data::DataPlugin,
            economy::EconomyPlugin,
            calendar::CalendarPlugin,
            farming::FarmingPlugin,
            daycycle::DayCyclePlugin,
            save::SavePlugin,
            session::SessionPlugin,
        ));

        app.add_systems(
            OnEnter(SimState::Loading),
            finish_loading.in_set(LoadingSet::Finish),
        );
    }
}

fn finish_loading(mut next_state: ResMut<NextState<SimState>>) {
    info!("[Sproutfield] Loading complete");
    next_state.set(SimState::Running);
}
