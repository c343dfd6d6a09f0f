//! Daily quest generation and claim handling.
//!
//! Three quests are generated at every rollover from the quest-domain
//! stream, one per tracked counter. Goals are drawn first, in a fixed
//! order, so the draw sequence is part of the deterministic day contract.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{
    FARMHOUSE_QUEST_BONUS_CAP, FARMHOUSE_QUEST_BONUS_PER_LEVEL, QUEST_HARVEST_GOAL_LOW,
    QUEST_HARVEST_GOAL_SPAN, QUEST_HARVEST_REWARD_COINS, QUEST_HARVEST_REWARD_SEEDS,
    QUEST_PLANT_GOAL_LOW, QUEST_PLANT_GOAL_SPAN, QUEST_PLANT_REWARD_COINS,
    QUEST_PLANT_REWARD_SEEDS, QUEST_SELL_GOAL_LOW, QUEST_SELL_GOAL_SPAN, QUEST_SELL_REWARD_COINS,
    QUEST_SELL_REWARD_SEEDS,
};
use crate::content::Reward;
use crate::numbers::{floor_f64_to_u32, i64_to_f64, round_f64_to_i64, u32_to_f64};
use crate::rng::DayRng;
use crate::state::{PlayerState, QuestProgress};

/// Which progress counter a quest tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressKey {
    Planted,
    Harvested,
    Sold,
}

impl ProgressKey {
    /// Read the tracked counter out of the day's progress.
    #[must_use]
    pub const fn value(self, progress: &QuestProgress) -> u32 {
        match self {
            Self::Planted => progress.planted,
            Self::Harvested => progress.harvested,
            Self::Sold => progress.sold,
        }
    }
}

/// One daily quest. Created at rollover, claimable once, discarded at the
/// next rollover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub progress_key: ProgressKey,
    pub goal: u32,
    pub reward: Reward,
    pub claimed: bool,
}

fn draw_goal(rng: &mut DayRng, low: u32, span: u32) -> u32 {
    low + floor_f64_to_u32(rng.next_f64() * u32_to_f64(span))
}

/// Generate the day's three quests from the quest stream.
#[must_use]
pub fn make_daily_quests(rng: &mut DayRng) -> SmallVec<[Quest; 3]> {
    let plant_goal = draw_goal(rng, QUEST_PLANT_GOAL_LOW, QUEST_PLANT_GOAL_SPAN);
    let harvest_goal = draw_goal(rng, QUEST_HARVEST_GOAL_LOW, QUEST_HARVEST_GOAL_SPAN);
    let sell_goal = draw_goal(rng, QUEST_SELL_GOAL_LOW, QUEST_SELL_GOAL_SPAN);

    SmallVec::from_vec(vec![
        Quest {
            id: "plant".to_string(),
            name: format!("Plant {plant_goal} plots"),
            desc: "Get the field started.".to_string(),
            progress_key: ProgressKey::Planted,
            goal: plant_goal,
            reward: Reward {
                coins: QUEST_PLANT_REWARD_COINS,
                seeds: QUEST_PLANT_REWARD_SEEDS,
            },
            claimed: false,
        },
        Quest {
            id: "harvest".to_string(),
            name: format!("Harvest {harvest_goal} plots"),
            desc: "Bring crops in.".to_string(),
            progress_key: ProgressKey::Harvested,
            goal: harvest_goal,
            reward: Reward {
                coins: QUEST_HARVEST_REWARD_COINS,
                seeds: QUEST_HARVEST_REWARD_SEEDS,
            },
            claimed: false,
        },
        Quest {
            id: "sell".to_string(),
            name: format!("Sell {sell_goal} crops"),
            desc: "Cash in at the market.".to_string(),
            progress_key: ProgressKey::Sold,
            goal: sell_goal,
            reward: Reward {
                coins: QUEST_SELL_REWARD_COINS,
                seeds: QUEST_SELL_REWARD_SEEDS,
            },
            claimed: false,
        },
    ])
}

/// Farmhouse quest-reward coin boost, capped.
fn farmhouse_boost(state: &PlayerState) -> f64 {
    1.0 + (u32_to_f64(state.buildings.farmhouse) * FARMHOUSE_QUEST_BONUS_PER_LEVEL)
        .min(FARMHOUSE_QUEST_BONUS_CAP)
}

/// Coins a quest would pay the player right now, farmhouse boost applied.
#[must_use]
pub fn boosted_coins(state: &PlayerState, reward: Reward) -> i64 {
    round_f64_to_i64(i64_to_f64(reward.coins) * farmhouse_boost(state))
}
