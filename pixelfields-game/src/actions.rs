//! Player purchase and market actions, and the shared action error
//! taxonomy. Every failure is a recoverable no-op: state is untouched
//! unless the action fully succeeds.
use thiserror::Error;

use crate::constants::{
    BUILDING_COST_CURVE, CART_BASE_COST, COOP_BASE_COST, PLOT_BASE_COST, PLOT_UPGRADE_COST_STEP,
    SHOVEL_BASE_COST, SPRINKLER_BASE_COST, UPGRADE_COST_CURVE,
};
use crate::content::ContentConfig;
use crate::numbers::{i64_to_f64, round_f64_to_i64, u32_to_f64};
use crate::state::{BuildingKey, PlayerState, Plot, UpgradeKey};

/// Recoverable, user-facing failures of player intents. None of these is
/// fatal and none leaves partial mutations behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("need {needed} coins")]
    InsufficientFunds { needed: i64 },
    #[error("no seed for the selected crop")]
    InsufficientSeed,
    #[error("plot cannot do that right now")]
    InvalidPlotTransition,
    #[error("nothing to sell")]
    NothingToSell,
    #[error("no plots are ready")]
    NothingToHarvest,
    #[error("no empty plot available")]
    NoEmptyPlot,
    #[error("already at max level")]
    AtCapacity,
    #[error("unknown crop {0}")]
    UnknownCrop(String),
    #[error("building not in catalog")]
    UnknownBuilding,
    #[error("unknown quest {0}")]
    UnknownQuest(String),
    #[error("quest already claimed")]
    QuestAlreadyClaimed,
    #[error("quest goal not reached")]
    QuestIncomplete,
}

/// Outcome of a successful sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SellOutcome {
    pub units: u32,
    pub earned: i64,
}

const fn upgrade_base_cost(key: UpgradeKey) -> i64 {
    match key {
        UpgradeKey::Shovel => SHOVEL_BASE_COST,
        UpgradeKey::Sprinkler => SPRINKLER_BASE_COST,
        UpgradeKey::Cart => CART_BASE_COST,
        UpgradeKey::Coop => COOP_BASE_COST,
        UpgradeKey::Plot => PLOT_BASE_COST,
    }
}

/// Coin cost of the next level of an upgrade. Extra plots climb on a flat
/// step; the rest scale on their own base.
#[must_use]
pub fn upgrade_cost(key: UpgradeKey, level: u32) -> i64 {
    let base = upgrade_base_cost(key);
    if matches!(key, UpgradeKey::Plot) {
        return base + i64::from(level) * PLOT_UPGRADE_COST_STEP;
    }
    round_f64_to_i64(i64_to_f64(base) + u32_to_f64(level) * (i64_to_f64(base) * UPGRADE_COST_CURVE))
}

/// Coin cost of the next level of a building.
#[must_use]
pub fn building_cost(base_cost: i64, level: u32) -> i64 {
    round_f64_to_i64(
        i64_to_f64(base_cost) + u32_to_f64(level) * (i64_to_f64(base_cost) * BUILDING_COST_CURVE),
    )
}

fn spend(state: &mut PlayerState, cost: i64) -> Result<(), ActionError> {
    if state.coins < cost {
        return Err(ActionError::InsufficientFunds { needed: cost });
    }
    state.coins -= cost;
    Ok(())
}

/// Buy `count` seeds of a crop at its catalog seed cost.
///
/// # Errors
///
/// `UnknownCrop` for ids outside the catalog, `InsufficientFunds` when the
/// balance cannot cover the full count.
pub fn buy_seeds(
    state: &mut PlayerState,
    content: &ContentConfig,
    crop_id: &str,
    count: u32,
) -> Result<i64, ActionError> {
    let crop = content
        .crop(crop_id)
        .ok_or_else(|| ActionError::UnknownCrop(crop_id.to_string()))?;
    let cost = crop.seed_cost * i64::from(count);
    spend(state, cost)?;
    let stock = state.seeds.entry(crop.id.clone()).or_insert(0);
    *stock = stock.saturating_add(count);
    Ok(cost)
}

/// Buy the next level of an upgrade. Buying an extra plot appends an empty
/// plot to the field.
///
/// # Errors
///
/// `InsufficientFunds` when the balance cannot cover the next level.
pub fn buy_upgrade(state: &mut PlayerState, key: UpgradeKey) -> Result<i64, ActionError> {
    let cost = upgrade_cost(key, state.upgrades.level(key));
    spend(state, cost)?;
    state.upgrades.raise(key);
    if matches!(key, UpgradeKey::Plot) {
        state.plots.push(Plot::Empty);
    }
    Ok(cost)
}

/// Buy the next level of a building.
///
/// # Errors
///
/// `UnknownBuilding` when the catalog has no definition, `AtCapacity` at
/// the definition's max level, `InsufficientFunds` otherwise short.
pub fn buy_building(
    state: &mut PlayerState,
    content: &ContentConfig,
    key: BuildingKey,
) -> Result<i64, ActionError> {
    let def = content.building(key).ok_or(ActionError::UnknownBuilding)?;
    let level = state.buildings.level(key);
    if level >= def.max_level {
        return Err(ActionError::AtCapacity);
    }
    let cost = building_cost(def.base_cost, level);
    spend(state, cost)?;
    state.buildings.raise(key);
    Ok(cost)
}

/// Sell up to `count` units of one crop at the cached day price. The count
/// clamps to the current inventory.
///
/// # Errors
///
/// `NothingToSell` when the inventory for the crop is empty.
pub fn sell_crop(
    state: &mut PlayerState,
    content: &ContentConfig,
    crop_id: &str,
    count: u32,
) -> Result<SellOutcome, ActionError> {
    let stock = state.crop_count(crop_id);
    let units = count.min(stock);
    if units == 0 {
        return Err(ActionError::NothingToSell);
    }
    let price = state.day_price(crop_id, content);
    let earned = i64::from(units) * price;
    if let Some(held) = state.crops.get_mut(crop_id) {
        *held -= units;
    }
    state.coins += earned;
    state.progress.sold = state.progress.sold.saturating_add(units);
    Ok(SellOutcome { units, earned })
}

/// Sell the entire harvested inventory at cached day prices.
///
/// # Errors
///
/// `NothingToSell` when every crop inventory is empty.
pub fn sell_all(state: &mut PlayerState, content: &ContentConfig) -> Result<SellOutcome, ActionError> {
    let mut units = 0u32;
    let mut earned = 0i64;
    for crop in content.crops() {
        let stock = state.crop_count(&crop.id);
        if stock == 0 {
            continue;
        }
        let price = state.day_price(&crop.id, content);
        earned += i64::from(stock) * price;
        units = units.saturating_add(stock);
        state.crops.insert(crop.id.clone(), 0);
    }
    if units == 0 {
        return Err(ActionError::NothingToSell);
    }
    state.coins += earned;
    state.progress.sold = state.progress.sold.saturating_add(units);
    Ok(SellOutcome { units, earned })
}

/// Claim a quest reward: requires the quest to exist, be unclaimed, and
/// have its goal met. Pays farmhouse-boosted coins plus flat potato seeds.
///
/// # Errors
///
/// `UnknownQuest`, `QuestAlreadyClaimed`, or `QuestIncomplete`; all leave
/// the quest and the player untouched.
pub fn claim_quest(state: &mut PlayerState, quest_id: &str) -> Result<i64, ActionError> {
    let Some(idx) = state.quests.iter().position(|q| q.id == quest_id) else {
        return Err(ActionError::UnknownQuest(quest_id.to_string()));
    };
    let quest = &state.quests[idx];
    if quest.claimed {
        return Err(ActionError::QuestAlreadyClaimed);
    }
    if quest.progress_key.value(&state.progress) < quest.goal {
        return Err(ActionError::QuestIncomplete);
    }

    let coins = crate::quests::boosted_coins(state, quest.reward);
    let seeds = quest.reward.seeds;
    state.coins += coins;
    if seeds > 0 {
        let stock = state
            .seeds
            .entry(crate::constants::DEFAULT_CROP_ID.to_string())
            .or_insert(0);
        *stock = stock.saturating_add(seeds);
    }
    state.quests[idx].claimed = true;
    Ok(coins)
}
