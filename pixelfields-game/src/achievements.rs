//! Achievement unlock tracking: threshold watching over cumulative player
//! stats plus first-action unlocks. Unlocks happen exactly once and never
//! revert.
use crate::constants::{ACH_COINS_LARGE, ACH_COINS_SMALL, ACH_CROP_STOCKPILE, ACH_PLANTS_IN_A_DAY};
use crate::content::ContentConfig;
use crate::state::PlayerState;

/// Unlock a single achievement by id if it is known and still locked.
/// Grants the flat reward (coins plus potato seeds) on the first unlock
/// and returns the id; `None` when already unlocked or unknown.
pub fn unlock(
    state: &mut PlayerState,
    content: &ContentConfig,
    id: &str,
) -> Option<String> {
    if state.achievements.contains(id) {
        return None;
    }
    let def = content.achievement(id)?;
    state.achievements.insert(def.id.clone());
    state.coins += def.reward.coins;
    if def.reward.seeds > 0 {
        let stock = state
            .seeds
            .entry(crate::constants::DEFAULT_CROP_ID.to_string())
            .or_insert(0);
        *stock = stock.saturating_add(def.reward.seeds);
    }
    log::debug!("achievement unlocked: {}", def.id);
    Some(def.id.clone())
}

/// Evaluate every threshold predicate against cumulative state and unlock
/// whichever newly hold. Returns the ids unlocked by this pass, in
/// evaluation order. Safe to call after every mutating action; already
/// unlocked ids are skipped.
pub fn check_achievements(state: &mut PlayerState, content: &ContentConfig) -> Vec<String> {
    let mut unlocked = Vec::new();
    let mut grant = |state: &mut PlayerState, id: &str| {
        if let Some(id) = unlock(state, content, id) {
            unlocked.push(id);
        }
    };

    if state.coins >= ACH_COINS_SMALL {
        grant(state, "hundred_coins");
    }
    if state.coins >= ACH_COINS_LARGE {
        grant(state, "thousand_coins");
    }
    if state.total_crops() >= ACH_CROP_STOCKPILE {
        grant(state, "100_crops");
    }
    if state.progress.planted_today >= ACH_PLANTS_IN_A_DAY {
        grant(state, "50_plants_day");
    }
    let all_harvested = content
        .crops()
        .iter()
        .all(|c| state.progress.harvest_types.contains(&c.id));
    if all_harvested {
        grant(state, "all_crops");
    }

    unlocked
}
