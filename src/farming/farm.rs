use bevy::prelude::*;

use crate::config::SimConfig;
use crate::data::CropCatalog;
use crate::economy::Inventory;
use crate::error::FarmError;
use crate::shared::*;

use super::plot::{Donation, Plot, PlotStatus};

/// The plot grid plus harvest-counter and donation state.
///
/// Plot transitions:
///   Empty --till--> Tilled --plant--> Planted --harvest--> Tilled
///   Empty --plant--> Planted
///   any non-Empty --clear--> Empty
///
/// Every operation validates first and mutates only on success, so a failed
/// call leaves the farm exactly as it was.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Farm {
    pub(super) plots: Vec<Plot>,
    pub(super) columns: usize,
    pub(super) selected: Option<usize>,
    pub(super) harvest_count: u32,
    pub(super) donations: Vec<Donation>,
}

impl Default for Farm {
    fn default() -> Self {
        let (rows, columns) = LandSize::Small.grid();
        Self::new(rows, columns)
    }
}

impl Farm {
    pub fn new(rows: usize, columns: usize) -> Self {
        let rows = rows.max(1);
        let columns = columns.max(1);
        Self {
            plots: (0..rows * columns).map(Plot::new).collect(),
            columns,
            selected: None,
            harvest_count: 0,
            donations: Vec::new(),
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.grid_rows, config.grid_columns)
    }

    // ── Read access ──────────────────────────────────────────────────────

    pub fn plots(&self) -> &[Plot] {
        &self.plots
    }

    pub fn plot(&self, index: usize) -> Option<&Plot> {
        self.plots.get(index)
    }

    pub fn len(&self) -> usize {
        self.plots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plots.is_empty()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.plots.len() / self.columns
    }

    /// (row, column) of a plot index, row-major.
    pub fn grid_position(&self, index: usize) -> Option<(usize, usize)> {
        (index < self.plots.len()).then(|| (index / self.columns, index % self.columns))
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn harvest_count(&self) -> u32 {
        self.harvest_count
    }

    pub fn donations(&self) -> &[Donation] {
        &self.donations
    }

    pub(super) fn plot_mut(&mut self, index: usize) -> Result<&mut Plot, FarmError> {
        let len = self.plots.len();
        self.plots
            .get_mut(index)
            .ok_or(FarmError::PlotOutOfRange { index, len })
    }

    fn plot_ref(&self, index: usize) -> Result<&Plot, FarmError> {
        self.plots.get(index).ok_or(FarmError::PlotOutOfRange {
            index,
            len: self.plots.len(),
        })
    }

    // ── Transitions ──────────────────────────────────────────────────────

    pub fn till(&mut self, index: usize) -> Result<(), FarmError> {
        let plot = self.plot_mut(index)?;
        if plot.status != PlotStatus::Empty {
            return Err(FarmError::NotEmpty);
        }
        plot.status = PlotStatus::Tilled;
        info!("[Farm] Tilled plot {}", index);
        Ok(())
    }

    /// Plants one seed from the inventory. Works on empty or tilled ground.
    pub fn plant(
        &mut self,
        index: usize,
        crop_id: &str,
        catalog: &CropCatalog,
        inventory: &mut Inventory,
        now: u64,
    ) -> Result<(), FarmError> {
        if self.plot_ref(index)?.status == PlotStatus::Planted {
            return Err(FarmError::Occupied);
        }
        if catalog.by_id(crop_id).is_none() {
            return Err(FarmError::UnknownCrop(crop_id.to_string()));
        }
        inventory
            .remove(crop_id, 1)
            .map_err(|_| FarmError::NoSeeds(crop_id.to_string()))?;

        let plot = self.plot_mut(index)?;
        plot.status = PlotStatus::Planted;
        plot.crop_id = Some(crop_id.to_string());
        plot.planted_at = Some(now);
        plot.watered = false;
        plot.growth_progress = 0.0;
        info!("[Farm] Planted '{}' in plot {}", crop_id, index);
        Ok(())
    }

    /// Marks today's watering. Growth is applied at the next day advance.
    pub fn water(&mut self, index: usize) -> Result<(), FarmError> {
        let plot = self.plot_mut(index)?;
        if plot.status != PlotStatus::Planted {
            return Err(FarmError::NotPlanted);
        }
        if plot.watered {
            return Err(FarmError::AlreadyWatered);
        }
        plot.watered = true;
        debug!("[Farm] Watered plot {}", index);
        Ok(())
    }

    pub fn clear(&mut self, index: usize) -> Result<(), FarmError> {
        let plot = self.plot_mut(index)?;
        if plot.status == PlotStatus::Empty {
            return Err(FarmError::AlreadyEmpty);
        }
        plot.reset_to(PlotStatus::Empty);
        info!("[Farm] Cleared plot {}", index);
        Ok(())
    }

    pub fn select(&mut self, index: usize) -> Result<(), FarmError> {
        self.plot_ref(index)?;
        self.selected = Some(index);
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    // ── Whole-farm ───────────────────────────────────────────────────────

    /// Every plot back to Empty, no selection, counters zeroed. Keeps the
    /// grid shape.
    pub fn reset_farm(&mut self) {
        for plot in &mut self.plots {
            plot.reset_to(PlotStatus::Empty);
        }
        self.selected = None;
        self.harvest_count = 0;
        self.donations.clear();
        info!("[Farm] Farm reset ({} plots)", self.plots.len());
    }

    /// Replaces the grid with a fresh one of the given shape. Counters and
    /// donations are kept; callers reset them separately.
    pub fn resize(&mut self, rows: usize, columns: usize) {
        let fresh = Farm::new(rows, columns);
        self.plots = fresh.plots;
        self.columns = fresh.columns;
        self.selected = None;
    }

    /// Replaces state with persisted blobs. Plot ids are renumbered to their
    /// index. A plot list that does not fit the `columns` grid is dropped in
    /// favour of the current grid.
    pub fn restore(
        &mut self,
        plots: Option<Vec<Plot>>,
        columns: usize,
        harvest_count: u32,
        donations: Vec<Donation>,
    ) {
        if let Some(mut plots) = plots {
            let columns = columns.max(1);
            if !plots.is_empty() && plots.len() % columns == 0 {
                for (i, plot) in plots.iter_mut().enumerate() {
                    plot.id = i;
                    plot.growth_progress = plot.growth_progress.clamp(0.0, 1.0);
                }
                self.plots = plots;
                self.columns = columns;
            } else {
                warn!(
                    "[Farm] Persisted grid of {} plots does not fit {} columns; keeping current grid",
                    plots.len(),
                    columns
                );
            }
        }
        self.selected = None;
        self.harvest_count = harvest_count;
        self.donations = donations;
    }
}
