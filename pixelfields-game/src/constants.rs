//! Centralized balance and tuning constants for Pixel Fields game logic.
//!
//! These values define the deterministic math for the core simulation.
//! Keeping them together ensures that gameplay can only be adjusted via
//! code changes reviewed in version control, rather than through external
//! JSON assets.

// Starting state -----------------------------------------------------------
pub(crate) const START_COINS: i64 = 5;
pub(crate) const START_POTATO_SEEDS: u32 = 10;
pub(crate) const START_CARROT_SEEDS: u32 = 2;
pub(crate) const START_PLOTS: usize = 10;
pub(crate) const DEFAULT_CROP_ID: &str = "potato";

// Day cycle ----------------------------------------------------------------
pub(crate) const SEASON_LENGTH_DAYS: u32 = 7;

// RNG stream domains -------------------------------------------------------
// Each per-day stream is seeded from the day seed XORed with one of these,
// so market, weather, and quest draws stay independent.
pub(crate) const MARKET_STREAM_DOMAIN: u32 = 0xA5A5_A5A5;
pub(crate) const WEATHER_STREAM_DOMAIN: u32 = 0x00C0_FFEE;
pub(crate) const QUEST_STREAM_DOMAIN: u32 = 0x0000_BEEF;
pub(crate) const HISTORY_STREAM_DOMAIN: u32 = 0x0000_1234;
pub(crate) const HISTORY_CROP_SHIFT: u32 = 16;

// Market tuning ------------------------------------------------------------
pub(crate) const PRICE_SWING_BASE: f64 = 0.6;
pub(crate) const PRICE_SWING_SPAN: f64 = 0.8;
pub(crate) const PRICE_MIN: i64 = 1;
pub(crate) const PRICE_MAX: i64 = 10;
pub(crate) const CART_PRICE_BONUS_PER_LEVEL: f64 = 0.02;
pub(crate) const CART_PRICE_BONUS_CAP: f64 = 0.20;
pub(crate) const SILO_PRICE_BONUS_PER_LEVEL: f64 = 0.02;
pub(crate) const SILO_PRICE_BONUS_CAP: f64 = 0.20;
pub(crate) const PRICE_HISTORY_POINTS: usize = 24;
pub(crate) const PRICE_HISTORY_STEP: f64 = 1.0;

// Growth tuning ------------------------------------------------------------
pub(crate) const SPRINKLER_GROWTH_BONUS_PER_LEVEL: f64 = 0.035;
pub(crate) const SPRINKLER_GROWTH_BONUS_CAP: f64 = 0.35;
pub(crate) const WINDMILL_GROWTH_BONUS_PER_LEVEL: f64 = 0.02;
pub(crate) const WINDMILL_GROWTH_BONUS_CAP: f64 = 0.20;
pub(crate) const SHOVEL_YIELD_LEVEL_DIVISOR: u32 = 2;
pub(crate) const BARN_YIELD_LEVEL_DIVISOR: u32 = 3;
pub(crate) const AUTO_HARVEST_LEVEL_DIVISOR: u32 = 3;

// Quest tuning -------------------------------------------------------------
pub(crate) const QUEST_PLANT_GOAL_LOW: u32 = 6;
pub(crate) const QUEST_PLANT_GOAL_SPAN: u32 = 7;
pub(crate) const QUEST_HARVEST_GOAL_LOW: u32 = 6;
pub(crate) const QUEST_HARVEST_GOAL_SPAN: u32 = 8;
pub(crate) const QUEST_SELL_GOAL_LOW: u32 = 12;
pub(crate) const QUEST_SELL_GOAL_SPAN: u32 = 29;
pub(crate) const QUEST_PLANT_REWARD_COINS: i64 = 8;
pub(crate) const QUEST_PLANT_REWARD_SEEDS: u32 = 3;
pub(crate) const QUEST_HARVEST_REWARD_COINS: i64 = 10;
pub(crate) const QUEST_HARVEST_REWARD_SEEDS: u32 = 0;
pub(crate) const QUEST_SELL_REWARD_COINS: i64 = 14;
pub(crate) const QUEST_SELL_REWARD_SEEDS: u32 = 2;
pub(crate) const FARMHOUSE_QUEST_BONUS_PER_LEVEL: f64 = 0.03;
pub(crate) const FARMHOUSE_QUEST_BONUS_CAP: f64 = 0.30;

// Store tuning -------------------------------------------------------------
pub(crate) const UPGRADE_COST_CURVE: f64 = 0.55;
pub(crate) const BUILDING_COST_CURVE: f64 = 0.60;
pub(crate) const PLOT_UPGRADE_COST_STEP: i64 = 8;
pub(crate) const SHOVEL_BASE_COST: i64 = 12;
pub(crate) const SPRINKLER_BASE_COST: i64 = 18;
pub(crate) const CART_BASE_COST: i64 = 22;
pub(crate) const COOP_BASE_COST: i64 = 14;
pub(crate) const PLOT_BASE_COST: i64 = 10;

// Achievement thresholds ---------------------------------------------------
pub(crate) const ACH_COINS_SMALL: i64 = 100;
pub(crate) const ACH_COINS_LARGE: i64 = 1_000;
pub(crate) const ACH_CROP_STOCKPILE: u32 = 100;
pub(crate) const ACH_PLANTS_IN_A_DAY: u32 = 50;

// Host tick cadence --------------------------------------------------------
// The core exposes pure tick entry points; hosts own the timers and are
// expected to drive them at these intervals.
pub const DAY_CHECK_TICK_MS: u64 = 2_500;
pub const AUTO_PROGRESS_TICK_MS: u64 = 1_500;
pub const SAVE_DEBOUNCE_MS: u64 = 500;
