use bevy::prelude::*;

use crate::calendar::Calendar;
use crate::data::CropCatalog;

use super::farm::Farm;
use super::plot::PlotStatus;

impl Farm {
    /// Grid-wide end-of-day growth. Watered planted plots gain the calendar's
    /// daily growth for their crop, capped at 1.0. Every plot's watered flag
    /// is cleared afterwards whether it grew or not.
    ///
    /// Returns how many plots grew.
    pub fn advance_day(&mut self, calendar: &Calendar, catalog: &CropCatalog) -> usize {
        let mut grown = 0;
        for plot in &mut self.plots {
            if plot.status == PlotStatus::Planted && plot.watered {
                let def = plot.crop_id.as_deref().and_then(|id| catalog.by_id(id));
                match def {
                    Some(def) => {
                        let gain = calendar.daily_growth(def);
                        plot.growth_progress = (plot.growth_progress + gain).clamp(0.0, 1.0);
                        grown += 1;
                    }
                    None => warn!(
                        "[Farm] Plot {} holds unknown crop {:?}; no growth",
                        plot.id, plot.crop_id
                    ),
                }
            }
            plot.watered = false;
        }
        debug!("[Farm] Day advanced: {} plots grew", grown);
        grown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy::Inventory;
    use crate::shared::*;

    fn fall_sunny() -> Calendar {
        let mut cal = Calendar::default();
        cal.set(1, Season::Fall, Weather::Sunny);
        cal
    }

    #[test]
    fn test_watered_plot_grows_by_daily_rate() {
        let catalog = CropCatalog::builtin();
        let calendar = fall_sunny();
        let mut farm = Farm::default();
        let mut inv = Inventory::default();
        inv.add("corn", 1);

        farm.till(0).unwrap();
        farm.plant(0, "corn", &catalog, &mut inv, 0).unwrap();
        assert_eq!(inv.quantity_of("corn"), 0);
        assert!(inv.entries().is_empty());
        farm.water(0).unwrap();

        assert_eq!(farm.advance_day(&calendar, &catalog), 1);
        let plot = farm.plot(0).unwrap();
        assert!((plot.growth_progress() - 0.2).abs() < 1e-9);
        assert!(!plot.is_watered());
    }

    #[test]
    fn test_unwatered_plot_does_not_grow() {
        let catalog = CropCatalog::builtin();
        let calendar = fall_sunny();
        let mut farm = Farm::default();
        let mut inv = Inventory::default();
        inv.add("tomato", 1);
        farm.plant(0, "tomato", &catalog, &mut inv, 0).unwrap();

        assert_eq!(farm.advance_day(&calendar, &catalog), 0);
        assert_eq!(farm.plot(0).unwrap().growth_progress(), 0.0);
    }

    #[test]
    fn test_growth_is_clamped_at_one() {
        let catalog = CropCatalog::builtin();
        let mut calendar = Calendar::default();
        calendar.set(1, Season::Summer, Weather::Rainy);
        let mut farm = Farm::default();
        let mut inv = Inventory::default();
        inv.add("basil", 1);
        farm.plant(0, "basil", &catalog, &mut inv, 0).unwrap();

        for _ in 0..10 {
            let _ = farm.water(0);
            farm.advance_day(&calendar, &catalog);
            assert!(farm.plot(0).unwrap().growth_progress() <= 1.0);
        }
        assert_eq!(farm.plot(0).unwrap().growth_progress(), 1.0);
        assert!(farm.plot(0).unwrap().is_ready_to_harvest());
    }

    #[test]
    fn test_watered_flag_cleared_everywhere() {
        let catalog = CropCatalog::builtin();
        let calendar = fall_sunny();
        let mut farm = Farm::default();
        let mut inv = Inventory::default();
        inv.add("rose", 3);
        for i in 0..3 {
            farm.plant(i, "rose", &catalog, &mut inv, 0).unwrap();
            farm.water(i).unwrap();
        }
        farm.advance_day(&calendar, &catalog);
        assert!(farm.plots().iter().all(|p| !p.is_watered()));
    }
}
