use serde::{Deserialize, Serialize};

use crate::shared::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PlotStatus {
    #[default]
    Empty,
    Tilled,
    Planted,
}

/// Display stage derived from growth progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrowthStage {
    Seed,
    Sprout,
    Growing,
    Mature,
}

impl GrowthStage {
    pub fn from_progress(progress: f64) -> Self {
        if progress < 0.3 {
            GrowthStage::Seed
        } else if progress < 0.6 {
            GrowthStage::Sprout
        } else if progress < 1.0 {
            GrowthStage::Growing
        } else {
            GrowthStage::Mature
        }
    }
}

/// One cell of the farm grid. Fields change only through `Farm` operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    pub(super) id: usize,
    pub(super) status: PlotStatus,
    pub(super) crop_id: Option<CropId>,
    /// Unix seconds.
    pub(super) planted_at: Option<u64>,
    pub(super) watered: bool,
    pub(super) growth_progress: f64,
}

impl Plot {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            status: PlotStatus::Empty,
            crop_id: None,
            planted_at: None,
            watered: false,
            growth_progress: 0.0,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn status(&self) -> PlotStatus {
        self.status
    }

    pub fn crop_id(&self) -> Option<&str> {
        self.crop_id.as_deref()
    }

    pub fn planted_at(&self) -> Option<u64> {
        self.planted_at
    }

    pub fn is_watered(&self) -> bool {
        self.watered
    }

    pub fn growth_progress(&self) -> f64 {
        self.growth_progress
    }

    pub fn stage(&self) -> GrowthStage {
        GrowthStage::from_progress(self.growth_progress)
    }

    pub fn is_ready_to_harvest(&self) -> bool {
        self.status == PlotStatus::Planted && self.growth_progress >= 1.0
    }

    /// Back to bare ground with the given status, dropping any crop.
    pub(super) fn reset_to(&mut self, status: PlotStatus) {
        self.status = status;
        self.crop_id = None;
        self.planted_at = None;
        self.watered = false;
        self.growth_progress = 0.0;
    }
}

/// A pledge recorded when the harvest counter hits a milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donation {
    pub amount: Coins,
    pub organization: String,
    /// Unix seconds.
    pub timestamp: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_stage_thresholds() {
        assert_eq!(GrowthStage::from_progress(-0.5), GrowthStage::Seed);
        assert_eq!(GrowthStage::from_progress(0.0), GrowthStage::Seed);
        assert_eq!(GrowthStage::from_progress(0.29), GrowthStage::Seed);
        assert_eq!(GrowthStage::from_progress(0.3), GrowthStage::Sprout);
        assert_eq!(GrowthStage::from_progress(0.59), GrowthStage::Sprout);
        assert_eq!(GrowthStage::from_progress(0.6), GrowthStage::Growing);
        assert_eq!(GrowthStage::from_progress(0.999), GrowthStage::Growing);
        assert_eq!(GrowthStage::from_progress(1.0), GrowthStage::Mature);
    }

    #[test]
    fn test_new_plot_is_empty_and_not_ready() {
        let plot = Plot::new(4);
        assert_eq!(plot.id(), 4);
        assert_eq!(plot.status(), PlotStatus::Empty);
        assert!(plot.crop_id().is_none());
        assert!(!plot.is_ready_to_harvest());
        assert_eq!(plot.stage(), GrowthStage::Seed);
    }

    #[test]
    fn test_ready_requires_planted_status() {
        let mut plot = Plot::new(0);
        plot.growth_progress = 1.0;
        assert!(!plot.is_ready_to_harvest());
        plot.status = PlotStatus::Planted;
        assert!(plot.is_ready_to_harvest());
    }
}
