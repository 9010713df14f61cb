//! Shared types, events, and states for Sproutfield.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain reaches into another domain's fields directly; cross-domain
//! work goes through the public operations of each resource.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{FarmError, ShopError};

// ═══════════════════════════════════════════════════════════════════════
// SIM STATE: top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum SimState {
    /// Catalog population and persisted-state restore.
    #[default]
    Loading,
    Running,
}

/// Ordering of the `OnEnter(SimState::Loading)` work.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum LoadingSet {
    /// Populate the crop catalog.
    Catalog,
    /// Read persisted blobs into resources.
    Restore,
    /// Rebuild the day cycle and replay missed days.
    CatchUp,
    /// Move to `SimState::Running`.
    Finish,
}

// ═══════════════════════════════════════════════════════════════════════
// CALENDAR
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub fn next(self) -> Self {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Fall,
            Season::Fall => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }

    pub fn growth_multiplier(self) -> f64 {
        match self {
            Season::Spring => 1.2,
            Season::Summer => 1.5,
            Season::Fall => 1.0,
            Season::Winter => 0.7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Weather {
    #[default]
    Sunny,
    Hot,
    Rainy,
    Storm,
}

impl Weather {
    pub const ALL: [Weather; 4] = [Weather::Sunny, Weather::Hot, Weather::Rainy, Weather::Storm];

    pub fn growth_multiplier(self) -> f64 {
        match self {
            Weather::Sunny => 1.0,
            Weather::Hot => 0.8,   // heat stress
            Weather::Rainy => 1.3,
            Weather::Storm => 0.5,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CROPS: static reference data
// ═══════════════════════════════════════════════════════════════════════

/// Stable crop identifier (a lowercase slug such as `"tomato"`).
pub type CropId = String;

/// In-game currency units.
pub type Coins = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaterNeeds {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SunNeeds {
    FullSun,
    PartialShade,
    Shade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CropCategory {
    Vegetable,
    Fruit,
    Herb,
    Flower,
}

impl fmt::Display for CropCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CropCategory::Vegetable => "Vegetable",
            CropCategory::Fruit => "Fruit",
            CropCategory::Herb => "Herb",
            CropCategory::Flower => "Flower",
        };
        f.write_str(label)
    }
}

/// Country a farm is started in. Selects which regional crops the shop offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Usa,
    Canada,
    Mexico,
    Brazil,
    Uk,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Usa,
        Region::Canada,
        Region::Mexico,
        Region::Brazil,
        Region::Uk,
    ];
}

/// Land size picked when starting a farm. Determines the plot grid shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LandSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl LandSize {
    /// Grid shape as (rows, columns).
    pub fn grid(self) -> (usize, usize) {
        match self {
            LandSize::Small => (3, 4),
            LandSize::Medium => (4, 5),
            LandSize::Large => (5, 6),
        }
    }
}

/// Region and land size picked when the farm was started.
/// `region: None` means no region was chosen; the shop then sells everything.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmProfile {
    pub region: Option<Region>,
    pub land_size: LandSize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropDef {
    pub id: CropId,
    pub name: String,
    pub description: String,
    pub care_instructions: String,
    /// Seed price per unit.
    pub price: Coins,
    /// Days of watered growth under a 1.0 multiplier. Always >= 1.
    pub growth_days: u32,
    pub water_needs: WaterNeeds,
    pub sun_needs: SunNeeds,
    pub category: CropCategory,
    /// Coins paid out per harvest.
    pub harvest_value: Coins,
    /// Regions this crop is specific to. Empty = common crop, offered everywhere.
    pub regions: Vec<Region>,
}

impl CropDef {
    pub fn is_common(&self) -> bool {
        self.regions.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS: requests from presentation
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlotAction {
    Till,
    Plant(CropId),
    Water,
    Harvest,
    Clear,
    Select,
}

/// Player acted on a plot.
#[derive(Event, Debug, Clone)]
pub struct PlotActionEvent {
    pub plot_index: usize,
    pub action: PlotAction,
}

/// Player confirmed a seed purchase in the shop.
#[derive(Event, Debug, Clone)]
pub struct BuySeedsEvent {
    pub crop_id: CropId,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCycleCommand {
    Start,
    Pause,
    Resume,
    /// Advance one day right now. Only honoured while the countdown is not running.
    AdvanceNow,
}

#[derive(Event, Debug, Clone)]
pub struct DayCycleControlEvent {
    pub command: DayCycleCommand,
}

/// Wipe every domain back to its initial state and clear all persisted blobs.
#[derive(Event, Debug, Clone)]
pub struct ResetGameEvent;

/// Start a fresh farm in a region. Always performs a full reset first.
#[derive(Event, Debug, Clone)]
pub struct NewFarmEvent {
    pub region: Region,
    pub land_size: LandSize,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS: outcomes for presentation
// ═══════════════════════════════════════════════════════════════════════

#[derive(Event, Debug, Clone)]
pub struct PlotActionResultEvent {
    pub plot_index: usize,
    pub action: PlotAction,
    pub result: Result<(), FarmError>,
}

#[derive(Event, Debug, Clone)]
pub struct PurchaseResultEvent {
    pub crop_id: CropId,
    pub quantity: u32,
    pub result: Result<Coins, ShopError>,
}

#[derive(Event, Debug, Clone)]
pub struct CropHarvestedEvent {
    pub plot_index: usize,
    pub crop_id: CropId,
    /// Total coins credited, bonus included.
    pub coins: Coins,
    pub bonus_seeds: u32,
}

#[derive(Event, Debug, Clone)]
pub struct DonationRecordedEvent {
    pub amount: Coins,
    pub organization: String,
    pub total_harvests: u32,
}

/// A simulated day finished. Carries the day that just ended.
#[derive(Event, Debug, Clone)]
pub struct DayEndEvent {
    pub day: u8,
    pub season: Season,
    pub plots_grown: usize,
}

#[derive(Event, Debug, Clone)]
pub struct SeasonChangeEvent {
    pub new_season: Season,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const DAYS_PER_SEASON: u8 = 28;
pub const STARTING_BALANCE: Coins = 1_000;
pub const DAY_LENGTH_SECS: u64 = 180;

pub const WEATHER_CHANGE_CHANCE: f64 = 0.3;
pub const BONUS_HARVEST_CHANCE: f64 = 0.2;

pub const DONATION_EVERY_HARVESTS: u32 = 10;
pub const DONATION_AMOUNT: Coins = 10;
pub const DONATION_ORGANIZATION: &str = "Green Earth Foundation";

/// A probability usable with `gen_bool`. Non-finite input falls back.
pub fn chance_or(chance: f64, fallback: f64) -> f64 {
    if chance.is_finite() {
        chance.clamp(0.0, 1.0)
    } else {
        fallback
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CLOCK
// ═══════════════════════════════════════════════════════════════════════

/// Wall-clock seconds since the unix epoch.
pub fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
