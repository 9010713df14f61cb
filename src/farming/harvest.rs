use bevy::prelude::*;
use rand::Rng;

use crate::config::SimConfig;
use crate::data::CropCatalog;
use crate::economy::{Inventory, Ledger};
use crate::error::FarmError;
use crate::shared::*;

use super::farm::Farm;
use super::plot::{Donation, PlotStatus};

/// Tunables for the bonus roll and the donation milestone.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct HarvestRules {
    pub bonus_chance: f64,
    /// Bonus seeds are rolled uniformly in `1..=bonus_max`.
    pub bonus_max: u32,
    pub donation_every: u32,
    pub donation_amount: Coins,
    pub donation_organization: String,
}

impl Default for HarvestRules {
    fn default() -> Self {
        Self {
            bonus_chance: BONUS_HARVEST_CHANCE,
            bonus_max: 3,
            donation_every: DONATION_EVERY_HARVESTS,
            donation_amount: DONATION_AMOUNT,
            donation_organization: DONATION_ORGANIZATION.to_string(),
        }
    }
}

impl HarvestRules {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            bonus_chance: chance_or(config.bonus_harvest_chance, BONUS_HARVEST_CHANCE),
            bonus_max: config.bonus_harvest_max,
            donation_every: config.donation_every,
            donation_amount: config.donation_amount,
            donation_organization: config.donation_organization.clone(),
        }
    }

    /// 0 when the roll misses.
    pub fn roll_bonus(&self, rng: &mut impl Rng) -> u32 {
        let chance = chance_or(self.bonus_chance, BONUS_HARVEST_CHANCE);
        if self.bonus_max == 0 || !rng.gen_bool(chance) {
            return 0;
        }
        rng.gen_range(1..=self.bonus_max)
    }
}

/// Coins paid for `bonus` extra units. Half the payout per unit, truncated.
pub fn bonus_coins(harvest_value: Coins, bonus: u32) -> Coins {
    Coins::from(bonus).saturating_mul(harvest_value / 2)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestOutcome {
    pub crop_id: CropId,
    /// Base payout plus bonus coins.
    pub coins: Coins,
    pub bonus_seeds: u32,
    pub donation: Option<Donation>,
}

impl Farm {
    /// Harvests a mature crop: pays out, maybe returns bonus seeds, bumps the
    /// harvest counter, and records a donation on every milestone. The plot
    /// goes back to Tilled.
    ///
    /// All checks and the random roll happen before the first mutation.
    #[allow(clippy::too_many_arguments)]
    pub fn harvest(
        &mut self,
        index: usize,
        catalog: &CropCatalog,
        ledger: &mut Ledger,
        inventory: &mut Inventory,
        rng: &mut impl Rng,
        rules: &HarvestRules,
        now: u64,
    ) -> Result<HarvestOutcome, FarmError> {
        let plot = self.plot_mut(index)?;
        if plot.status != PlotStatus::Planted {
            return Err(FarmError::NotPlanted);
        }
        if !plot.is_ready_to_harvest() {
            return Err(FarmError::NotReady);
        }
        let crop_id = plot.crop_id.clone().ok_or(FarmError::NotPlanted)?;
        let def = catalog
            .by_id(&crop_id)
            .ok_or_else(|| FarmError::UnknownCrop(crop_id.clone()))?;

        let bonus = rules.roll_bonus(rng);

        plot.reset_to(PlotStatus::Tilled);

        ledger.credit(def.harvest_value, format!("Harvested {}", def.name));
        let mut coins = def.harvest_value;
        if bonus > 0 {
            let extra = bonus_coins(def.harvest_value, bonus);
            ledger.credit(extra, format!("Bonus harvest from {}!", def.name));
            coins = coins.saturating_add(extra);
            inventory.add(&def.id, bonus);
            info!("[Farm] Bonus harvest: +{} '{}' seeds, +{} coins", bonus, def.id, extra);
        }

        self.harvest_count = self.harvest_count.saturating_add(1);
        let donation = (rules.donation_every > 0 && self.harvest_count % rules.donation_every == 0)
            .then(|| Donation {
                amount: rules.donation_amount,
                organization: rules.donation_organization.clone(),
                timestamp: now,
            });
        if let Some(donation) = &donation {
            info!(
                "[Farm] Harvest #{}: donated {} to {}",
                self.harvest_count, donation.amount, donation.organization
            );
            self.donations.push(donation.clone());
        }

        info!("[Farm] Harvested '{}' from plot {} for {}", crop_id, index, coins);
        Ok(HarvestOutcome {
            crop_id,
            coins,
            bonus_seeds: bonus,
            donation,
        })
    }
}
