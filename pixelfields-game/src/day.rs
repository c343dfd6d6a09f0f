//! Day rollover: detecting a calendar-day change and re-deriving the
//! day's world state (season, weather, prices, quests) from the day seed.
use crate::content::ContentConfig;
use crate::market::compute_day_prices;
use crate::quests::make_daily_quests;
use crate::rng::DayRngBundle;
use crate::seed::derive_day_seed;
use crate::state::{PlayerState, QuestProgress};
use crate::weather::select_weather;

/// Whether the host-supplied calendar day differs from the stored one.
/// Pure check; never mutates. Rollover is detected by string inequality,
/// not elapsed time.
#[must_use]
pub fn has_rolled_over(state: &PlayerState, day_key: &str) -> bool {
    state.day_key != day_key
}

/// Commit a pending rollover: advance the day counter, recompute the
/// season, and re-derive all seeded day state. Returns the fresh RNG
/// bundle for the new day, or `None` when no rollover was pending (the
/// call is then a no-op safeguard, never an error).
pub fn commit_rollover(
    state: &mut PlayerState,
    content: &ContentConfig,
    day_key: &str,
) -> Option<DayRngBundle> {
    if !has_rolled_over(state, day_key) {
        return None;
    }
    state.day_key = day_key.to_string();
    state.day_num = state.day_num.saturating_add(1);
    state.season = content.season_for_day(state.day_num);
    Some(derive_day(state, content))
}

/// Re-derive all seeded per-day state from the stored day key: seed,
/// weather, the full price table, and the quest slate. Also resets the
/// per-day progress counters.
fn derive_day(state: &mut PlayerState, content: &ContentConfig) -> DayRngBundle {
    let seed = derive_day_seed(&state.day_key);
    state.day_seed = seed;
    let bundle = DayRngBundle::from_day_seed(seed);

    if let Some(season) = content.season(state.season) {
        state.weather = select_weather(&season.weather_weights, &mut bundle.weather());
    }

    if let (Some(weather), Some(season)) =
        (content.weather(state.weather), content.season(state.season))
    {
        state.prices = compute_day_prices(
            content,
            weather,
            season,
            &state.upgrades,
            &state.buildings,
            &mut bundle.market(),
        );
    }

    state.progress = QuestProgress::default();
    state.quests = make_daily_quests(&mut bundle.quest());

    log::debug!(
        "day {} ({}): season={} weather={} seed={seed:#010x}",
        state.day_num,
        state.day_key,
        state.season,
        state.weather,
    );
    bundle
}

/// Rebuild the transient RNG bundle from the persisted day seed, for use
/// after loading a save mid-day.
#[must_use]
pub fn rehydrate_rng(state: &PlayerState) -> DayRngBundle {
    DayRngBundle::from_day_seed(state.day_seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> (PlayerState, ContentConfig) {
        let content = ContentConfig::default_config();
        let state = PlayerState::starting(&content);
        (state, content)
    }

    #[test]
    fn first_commit_brings_day_one() {
        let (mut state, content) = fresh();
        assert!(has_rolled_over(&state, "2024-01-01"));
        let bundle = commit_rollover(&mut state, &content, "2024-01-01");
        assert!(bundle.is_some());
        assert_eq!(state.day_num, 1);
        assert_eq!(state.day_key, "2024-01-01");
        assert_eq!(state.day_seed, derive_day_seed("2024-01-01"));
        assert_eq!(state.quests.len(), 3);
        assert_eq!(state.prices.len(), content.crops().len());
    }

    #[test]
    fn repeat_commit_for_same_key_is_a_no_op() {
        let (mut state, content) = fresh();
        commit_rollover(&mut state, &content, "2024-01-01");
        let snapshot = state.clone();

        assert!(!has_rolled_over(&state, "2024-01-01"));
        assert!(commit_rollover(&mut state, &content, "2024-01-01").is_none());
        assert_eq!(state, snapshot, "no-op safeguard must not disturb day state");
    }

    #[test]
    fn same_key_always_derives_identical_day_state() {
        let (mut one, content) = fresh();
        let (mut two, _) = fresh();
        commit_rollover(&mut one, &content, "2024-03-15");
        commit_rollover(&mut two, &content, "2024-03-15");
        assert_eq!(one.weather, two.weather);
        assert_eq!(one.prices, two.prices);
        assert_eq!(one.quests, two.quests);
    }

    #[test]
    fn rollover_resets_progress_and_quests() {
        let (mut state, content) = fresh();
        commit_rollover(&mut state, &content, "2024-01-01");
        state.progress.planted = 9;
        state.progress.harvest_types.insert("potato".to_string());
        state.quests[0].claimed = true;

        commit_rollover(&mut state, &content, "2024-01-02");
        assert_eq!(state.day_num, 2);
        assert_eq!(state.progress, QuestProgress::default());
        assert!(state.quests.iter().all(|q| !q.claimed));
    }

    #[test]
    fn seasons_advance_on_the_weekly_cycle() {
        let (mut state, content) = fresh();
        for day in 1..=8u32 {
            commit_rollover(&mut state, &content, &format!("key-{day}"));
        }
        assert_eq!(state.day_num, 8);
        assert_eq!(state.season, crate::state::Season::Summer);
    }

    #[test]
    fn rehydrated_bundle_matches_fresh_bundle() {
        let (mut state, content) = fresh();
        commit_rollover(&mut state, &content, "2024-01-01");
        let a = rehydrate_rng(&state);
        let b = DayRngBundle::from_day_seed(state.day_seed);
        assert!((a.market().next_f64() - b.market().next_f64()).abs() < f64::EPSILON);
    }
}
