//! Day cycle: the countdown that ends each day, and the one-day orchestrator.
//!
//! Ending a day always runs farm growth first and the calendar second, so the
//! day that just finished grows under its own weather and season. The only
//! multi-plot mutation that happens without a direct player action comes
//! from here.
//!
//! Systems run one at a time on the main schedule and each expiry is applied
//! to completion before the next, so day advances never interleave.

mod timer;

pub use timer::{DayCycle, TimerBlob};

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use rand::Rng;
use std::time::Duration;

use crate::calendar::Calendar;
use crate::config::SimConfig;
use crate::data::CropCatalog;
use crate::farming::Farm;
use crate::rng::SimRng;
use crate::save::{BlobKey, SaveStore};
use crate::shared::*;

/// What one day advance did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayReport {
    pub ended_day: u8,
    pub ended_season: Season,
    pub plots_grown: usize,
    pub new_season: Option<Season>,
}

/// Farm growth for the ending day, then the calendar roll.
pub fn advance_one_day(
    farm: &mut Farm,
    calendar: &mut Calendar,
    catalog: &CropCatalog,
    rng: &mut impl Rng,
) -> DayReport {
    let plots_grown = farm.advance_day(calendar, catalog);
    let rollover = calendar.advance_day(rng);
    DayReport {
        ended_day: rollover.ended_day,
        ended_season: rollover.ended_season,
        plots_grown,
        new_season: rollover.new_season,
    }
}

/// Everything a day advance touches, bundled for the systems that run one.
#[derive(SystemParam)]
pub struct DayAdvance<'w> {
    farm: ResMut<'w, Farm>,
    calendar: ResMut<'w, Calendar>,
    catalog: Res<'w, CropCatalog>,
    rng: ResMut<'w, SimRng>,
    store: ResMut<'w, SaveStore>,
    day_end: EventWriter<'w, DayEndEvent>,
    season_change: EventWriter<'w, SeasonChangeEvent>,
}

impl DayAdvance<'_> {
    /// Advances one day, persists the farm and calendar, and announces it.
    pub fn run(&mut self) -> DayReport {
        let report = advance_one_day(
            &mut self.farm,
            &mut self.calendar,
            &self.catalog,
            &mut self.rng.0,
        );

        self.store.store(BlobKey::FarmPlots, self.farm.plots());
        self.store.store(BlobKey::Calendar, &self.calendar.snapshot());

        info!(
            "[DayCycle] Day {} {:?} ended, {} plots grew",
            report.ended_day, report.ended_season, report.plots_grown
        );
        self.day_end.send(DayEndEvent {
            day: report.ended_day,
            season: report.ended_season,
            plots_grown: report.plots_grown,
        });
        if let Some(new_season) = report.new_season {
            self.season_change.send(SeasonChangeEvent { new_season });
        }
        report
    }

    pub fn persist_timer(&mut self, cycle: &DayCycle) {
        self.store.store(BlobKey::DayCycle, &cycle.snapshot(now_unix()));
    }
}

pub struct DayCyclePlugin;

impl Plugin for DayCyclePlugin {
    fn build(&self, app: &mut App) {
        let day_length = app
            .world()
            .get_resource::<SimConfig>()
            .map(|c| c.day_length_secs)
            .unwrap_or(DAY_LENGTH_SECS);

        app.insert_resource(DayCycle::new(Duration::from_secs(day_length)))
            .add_systems(
                OnEnter(SimState::Loading),
                restore_day_cycle.in_set(LoadingSet::CatchUp),
            )
            .add_systems(
                Update,
                (handle_day_cycle_controls, tick_day_cycle)
                    .chain()
                    .run_if(in_state(SimState::Running)),
            );
    }
}

/// Counts the timer down by the frame delta and runs one day per expiry.
pub fn tick_day_cycle(time: Res<Time>, mut cycle: ResMut<DayCycle>, mut day: DayAdvance) {
    let expired = cycle.tick(time.delta());
    if expired == 0 {
        return;
    }
    for _ in 0..expired {
        day.run();
    }
    day.persist_timer(&cycle);
}

pub fn handle_day_cycle_controls(
    mut control_events: EventReader<DayCycleControlEvent>,
    mut cycle: ResMut<DayCycle>,
    mut day: DayAdvance,
) {
    for ev in control_events.read() {
        let changed = match ev.command {
            DayCycleCommand::Start => cycle.start(),
            DayCycleCommand::Pause => cycle.pause(),
            DayCycleCommand::Resume => cycle.resume(),
            DayCycleCommand::AdvanceNow => {
                if cycle.is_counting() {
                    info!("[DayCycle] Manual advance ignored while the countdown is running");
                    false
                } else {
                    day.run();
                    cycle.record_manual_day();
                    true
                }
            }
        };
        if changed {
            info!("[DayCycle] {:?} applied", ev.command);
            day.persist_timer(&cycle);
        }
    }
}

/// Rebuilds the countdown from its blob and replays the days that passed
/// while the app was closed.
pub fn restore_day_cycle(
    config: Res<SimConfig>,
    mut cycle: ResMut<DayCycle>,
    mut day: DayAdvance,
) {
    let Some(blob) = day.store.load::<TimerBlob>(BlobKey::DayCycle) else {
        return;
    };
    let (restored, catch_up) = DayCycle::restore(
        &blob,
        Duration::from_secs(config.day_length_secs),
        now_unix(),
        config.max_catch_up_days,
    );
    *cycle = restored;
    if catch_up > 0 {
        info!("[DayCycle] Catching up {} day(s) missed while closed", catch_up);
    }
    for _ in 0..catch_up {
        day.run();
    }
    day.persist_timer(&cycle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy::Inventory;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_growth_uses_calendar_before_the_roll() {
        let catalog = CropCatalog::builtin();
        let mut farm = Farm::default();
        let mut calendar = Calendar::new(28, 1.0);
        calendar.set(28, Season::Fall, Weather::Sunny);
        let mut inv = Inventory::default();
        inv.add("corn", 1);
        farm.plant(0, "corn", &catalog, &mut inv, 0).unwrap();
        farm.water(0).unwrap();

        let mut rng = StdRng::seed_from_u64(11);
        let report = advance_one_day(&mut farm, &mut calendar, &catalog, &mut rng);

        // Fall + Sunny is exactly the base rate for a 5-day crop.
        assert!((farm.plot(0).unwrap().growth_progress() - 0.2).abs() < 1e-9);
        assert_eq!(report.ended_day, 28);
        assert_eq!(report.ended_season, Season::Fall);
        assert_eq!(report.new_season, Some(Season::Winter));
        assert_eq!(report.plots_grown, 1);
        assert_eq!(calendar.day(), 1);
    }

    #[test]
    fn test_same_seed_same_days() {
        let catalog = CropCatalog::builtin();
        let run = |seed| {
            let mut farm = Farm::default();
            let mut calendar = Calendar::default();
            let mut rng = StdRng::seed_from_u64(seed);
            (0..40)
                .map(|_| {
                    advance_one_day(&mut farm, &mut calendar, &catalog, &mut rng);
                    calendar.weather()
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(5), run(5));
    }
}
