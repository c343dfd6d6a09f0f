//! Daily market pricing.
//!
//! Prices are computed once per crop per day from the market stream and
//! cached in player state; a generator draw is consumed per crop, so
//! callers must walk the crop catalog in canonical order exactly once per
//! rollover rather than re-rolling on render.
use std::collections::HashMap;

use crate::constants::{
    CART_PRICE_BONUS_CAP, CART_PRICE_BONUS_PER_LEVEL, PRICE_HISTORY_POINTS, PRICE_HISTORY_STEP,
    PRICE_MAX, PRICE_MIN, PRICE_SWING_BASE, PRICE_SWING_SPAN, SILO_PRICE_BONUS_CAP,
    SILO_PRICE_BONUS_PER_LEVEL,
};
use crate::content::{ContentConfig, CropDefinition, SeasonDefinition, WeatherDefinition};
use crate::numbers::{i64_to_f64, round_f64_to_i64, u32_to_f64};
use crate::rng::{DayRng, history_stream};
use crate::state::{BuildingLevels, UpgradeLevels};

/// Cart upgrade price bonus, capped.
fn cart_bonus(upgrades: &UpgradeLevels) -> f64 {
    1.0 + (u32_to_f64(upgrades.cart) * CART_PRICE_BONUS_PER_LEVEL).min(CART_PRICE_BONUS_CAP)
}

/// Silo building price bonus, capped.
fn silo_bonus(buildings: &BuildingLevels) -> f64 {
    1.0 + (u32_to_f64(buildings.silo) * SILO_PRICE_BONUS_PER_LEVEL).min(SILO_PRICE_BONUS_CAP)
}

/// Today's price for one crop, in coins.
///
/// Consumes one draw from the market stream for the random swing. The
/// result is always within `[1, 10]`.
#[must_use]
pub fn price_for(
    crop: &CropDefinition,
    weather: &WeatherDefinition,
    season: &SeasonDefinition,
    upgrades: &UpgradeLevels,
    buildings: &BuildingLevels,
    rng: &mut DayRng,
) -> i64 {
    let swing = rng.next_f64() * PRICE_SWING_SPAN + PRICE_SWING_BASE;
    let price = i64_to_f64(crop.base_price)
        * swing
        * weather.market_mult
        * season.market_mult
        * cart_bonus(upgrades)
        * silo_bonus(buildings);
    round_f64_to_i64(price).clamp(PRICE_MIN, PRICE_MAX)
}

/// Compute the full day price table in one pass over the crop catalog.
#[must_use]
pub fn compute_day_prices(
    content: &ContentConfig,
    weather: &WeatherDefinition,
    season: &SeasonDefinition,
    upgrades: &UpgradeLevels,
    buildings: &BuildingLevels,
    rng: &mut DayRng,
) -> HashMap<String, i64> {
    content
        .crops()
        .iter()
        .map(|crop| {
            let price = price_for(crop, weather, season, upgrades, buildings, rng);
            (crop.id.clone(), price)
        })
        .collect()
}

/// Cosmetic price-history series for sparkline displays.
///
/// A seeded random walk from the crop's base price, clamped to the price
/// band. Runs on its own per-crop stream and never feeds actual pricing.
#[must_use]
pub fn price_history(crop: &CropDefinition, day_seed: u32) -> Vec<f64> {
    let mut rng = history_stream(day_seed, &crop.id);
    let mut value = i64_to_f64(crop.base_price);
    let mut points = Vec::with_capacity(PRICE_HISTORY_POINTS);
    for _ in 0..PRICE_HISTORY_POINTS {
        value += (rng.next_f64() - 0.5) * PRICE_HISTORY_STEP;
        value = value.clamp(i64_to_f64(PRICE_MIN), i64_to_f64(PRICE_MAX));
        points.push(value);
    }
    points
}
