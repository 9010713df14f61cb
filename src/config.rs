//! Tunable simulation settings, optionally read from a RON file.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::shared::*;

/// Default config file name, looked up relative to the working directory.
pub const CONFIG_FILE: &str = "sproutfield.ron";

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub grid_rows: usize,
    pub grid_columns: usize,
    pub starting_balance: Coins,
    pub days_in_season: u8,
    /// Probability that the weather is re-rolled on a day advance.
    pub weather_change_chance: f64,
    pub bonus_harvest_chance: f64,
    /// Upper bound (inclusive) of the bonus-seed roll; lower bound is 1.
    pub bonus_harvest_max: u32,
    pub donation_every: u32,
    pub donation_amount: Coins,
    pub donation_organization: String,
    pub day_length_secs: u64,
    /// Cap on days replayed when the day cycle catches up after a relaunch.
    pub max_catch_up_days: u32,
    pub save_dir: PathBuf,
    /// Fixed seed for reproducible runs. None = seed from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_rows: 3,
            grid_columns: 4,
            starting_balance: STARTING_BALANCE,
            days_in_season: DAYS_PER_SEASON,
            weather_change_chance: WEATHER_CHANGE_CHANCE,
            bonus_harvest_chance: BONUS_HARVEST_CHANCE,
            bonus_harvest_max: 3,
            donation_every: DONATION_EVERY_HARVESTS,
            donation_amount: DONATION_AMOUNT,
            donation_organization: DONATION_ORGANIZATION.to_string(),
            day_length_secs: DAY_LENGTH_SECS,
            max_catch_up_days: DAYS_PER_SEASON as u32,
            save_dir: PathBuf::from("saves"),
            rng_seed: None,
        }
    }
}

impl SimConfig {
    /// Reads `path` as RON. A missing file gives the defaults; a malformed one
    /// gives the defaults and a warning.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => return Self::default(),
        };
        Self::from_ron(&text).unwrap_or_else(|e| {
            warn!(
                "[Config] Could not parse {}: {}. Using defaults.",
                path.display(),
                e
            );
            Self::default()
        })
    }

    pub fn from_ron(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_grid(mut self, rows: usize, columns: usize) -> Self {
        self.grid_rows = rows.max(1);
        self.grid_columns = columns.max(1);
        self
    }

    pub fn with_day_length_secs(mut self, secs: u64) -> Self {
        self.day_length_secs = secs.max(1);
        self
    }

    pub fn with_save_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.save_dir = dir.into();
        self
    }

    pub fn plot_count(&self) -> usize {
        self.grid_rows * self.grid_columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_game_rules() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.plot_count(), 12);
        assert_eq!(cfg.starting_balance, 1000);
        assert_eq!(cfg.days_in_season, 28);
        assert_eq!(cfg.day_length_secs, 180);
        assert_eq!(cfg.donation_every, 10);
        assert_eq!(cfg.donation_amount, 10);
        assert!((cfg.weather_change_chance - 0.3).abs() < f64::EPSILON);
        assert!((cfg.bonus_harvest_chance - 0.2).abs() < f64::EPSILON);
        assert!(cfg.rng_seed.is_none());
    }

    #[test]
    fn test_partial_ron_keeps_other_defaults() {
        let cfg = SimConfig::from_ron("(grid_rows: 5, day_length_secs: 60, rng_seed: Some(7))")
            .unwrap();
        assert_eq!(cfg.grid_rows, 5);
        assert_eq!(cfg.grid_columns, 4);
        assert_eq!(cfg.day_length_secs, 60);
        assert_eq!(cfg.rng_seed, Some(7));
        assert_eq!(cfg.starting_balance, 1000);
    }

    #[test]
    fn test_malformed_ron_is_an_error() {
        assert!(SimConfig::from_ron("(grid_rows: \"many\")").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let cfg = SimConfig::load_or_default("/nonexistent/sproutfield.ron");
        assert_eq!(cfg, SimConfig::default());
    }

    #[test]
    fn test_builders_clamp_to_one() {
        let cfg = SimConfig::default().with_grid(0, 0).with_day_length_secs(0);
        assert_eq!(cfg.plot_count(), 1);
        assert_eq!(cfg.day_length_secs, 1);
    }
}
