//! Calendar domain: day of season, season, weather, growth multipliers.
//!
//! The calendar never advances by itself. The day-cycle orchestrator calls
//! `Calendar::advance_day` after the farm has grown the ending day, so the
//! growth for that day uses the weather and season it actually had.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::shared::*;

/// The persisted calendar triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarBlob {
    pub day: u8,
    pub season: Season,
    pub weather: Weather,
}

impl Default for CalendarBlob {
    fn default() -> Self {
        Self {
            day: 1,
            season: Season::Spring,
            weather: Weather::Sunny,
        }
    }
}

/// What one `advance_day` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRollover {
    pub ended_day: u8,
    pub ended_season: Season,
    pub weather_changed: bool,
    /// Set when the day wrapped past the end of the season.
    pub new_season: Option<Season>,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Calendar {
    day: u8,
    season: Season,
    weather: Weather,
    days_in_season: u8,
    weather_change_chance: f64,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(DAYS_PER_SEASON, WEATHER_CHANGE_CHANCE)
    }
}

impl Calendar {
    pub fn new(days_in_season: u8, weather_change_chance: f64) -> Self {
        Self {
            day: 1,
            season: Season::Spring,
            weather: Weather::Sunny,
            days_in_season: days_in_season.max(1),
            weather_change_chance: chance_or(weather_change_chance, WEATHER_CHANGE_CHANCE),
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.days_in_season, config.weather_change_chance)
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn season(&self) -> Season {
        self.season
    }

    pub fn weather(&self) -> Weather {
        self.weather
    }

    pub fn days_in_season(&self) -> u8 {
        self.days_in_season
    }

    /// Moves to the next day. The weather re-roll and the season rollover
    /// are evaluated independently on every call; a re-roll may land on the
    /// same weather.
    pub fn advance_day(&mut self, rng: &mut impl Rng) -> DayRollover {
        let ended_day = self.day;
        let ended_season = self.season;

        let weather_changed = rng.gen_bool(self.weather_change_chance);
        if weather_changed {
            self.weather = Weather::ALL[rng.gen_range(0..Weather::ALL.len())];
        }

        let mut new_season = None;
        if self.day >= self.days_in_season {
            self.day = 1;
            self.season = self.season.next();
            new_season = Some(self.season);
            info!("[Calendar] Season changed: {:?} -> {:?}", ended_season, self.season);
        } else {
            self.day += 1;
        }

        info!(
            "[Calendar] New day: Day {} {:?}, weather {:?}",
            self.day, self.season, self.weather
        );

        DayRollover {
            ended_day,
            ended_season,
            weather_changed,
            new_season,
        }
    }

    pub fn growth_multiplier(&self) -> f64 {
        self.weather.growth_multiplier() * self.season.growth_multiplier()
    }

    /// Growth fraction a watered plot of `crop` gains today.
    pub fn daily_growth(&self, crop: &CropDef) -> f64 {
        let base = 1.0 / f64::from(crop.growth_days.max(1));
        let adjustment = match (crop.water_needs, self.weather) {
            (WaterNeeds::High, Weather::Rainy) => 1.2,
            (WaterNeeds::Low, Weather::Hot) => 1.1,
            _ => 1.0,
        };
        base * self.growth_multiplier() * adjustment
    }

    pub fn reset(&mut self) {
        self.day = 1;
        self.season = Season::Spring;
        self.weather = Weather::Sunny;
    }

    /// Directly sets the date and weather. Used by restore and by tests.
    pub fn set(&mut self, day: u8, season: Season, weather: Weather) {
        self.day = day.clamp(1, self.days_in_season);
        self.season = season;
        self.weather = weather;
    }

    pub fn snapshot(&self) -> CalendarBlob {
        CalendarBlob {
            day: self.day,
            season: self.season,
            weather: self.weather,
        }
    }

    pub fn restore(&mut self, blob: CalendarBlob) {
        self.set(blob.day, blob.season, blob.weather);
    }
}

pub struct CalendarPlugin;

impl Plugin for CalendarPlugin {
    fn build(&self, app: &mut App) {
        let calendar = app
            .world()
            .get_resource::<SimConfig>()
            .map(Calendar::from_config)
            .unwrap_or_default();
        app.insert_resource(calendar);
    }
}
