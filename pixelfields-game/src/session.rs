//! High-level game session binding player state to the content catalog
//! and the day's transient RNG streams.
use serde::{Deserialize, Serialize};

use crate::actions::{self, ActionError, SellOutcome};
use crate::achievements;
use crate::constants::SAVE_DEBOUNCE_MS;
use crate::content::ContentConfig;
use crate::day;
use crate::events::FeedbackEvent;
use crate::growth::duration_for;
use crate::market;
use crate::numbers::u64_to_f64;
use crate::plots::{self, HarvestSummary};
use crate::rng::DayRngBundle;
use crate::save::encode_save;
use crate::state::{BuildingKey, PlayerState, Plot, UpgradeKey};

/// Result of one day-systems tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Whether a day rollover was committed by this tick.
    pub rolled_over: bool,
    /// Whether the host should persist a snapshot now (debounced).
    pub save_due: bool,
}

/// Read-only view of one plot for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotView {
    pub index: usize,
    pub status: PlotStatus,
    pub crop: Option<String>,
    /// Growth completion in `[0, 1]`; 0 for empty plots, 1 when ready.
    pub progress: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotStatus {
    Empty,
    Growing,
    Ready,
}

/// One running game: host-owned state plus the catalog and the day's RNG
/// streams. Every player intent flows through here so that feedback
/// events, achievement checks, and the save debounce stay consistent.
#[derive(Debug)]
pub struct GameSession {
    content: ContentConfig,
    state: PlayerState,
    rng: DayRngBundle,
    events: Vec<FeedbackEvent>,
    dirty: bool,
    last_save_ms: Option<u64>,
}

impl GameSession {
    /// Start a brand-new game on the given calendar day.
    #[must_use]
    pub fn new_game(content: ContentConfig, day_key: &str) -> Self {
        let mut state = PlayerState::starting(&content);
        let rng = day::commit_rollover(&mut state, &content, day_key)
            .unwrap_or_else(|| day::rehydrate_rng(&state));
        Self {
            content,
            state,
            rng,
            events: Vec::new(),
            dirty: true,
            last_save_ms: None,
        }
    }

    /// Resume a session from previously persisted state, rehydrating the
    /// RNG streams from the persisted day seed.
    #[must_use]
    pub fn from_state(content: ContentConfig, state: PlayerState) -> Self {
        let rng = day::rehydrate_rng(&state);
        Self {
            content,
            state,
            rng,
            events: Vec::new(),
            dirty: false,
            last_save_ms: None,
        }
    }

    /// Borrow the underlying immutable player state.
    #[must_use]
    pub const fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Apply a closure to the mutable player state. Host-side escape
    /// hatch; core actions below keep events and achievements coherent.
    pub fn with_state_mut<R>(&mut self, f: impl FnOnce(&mut PlayerState) -> R) -> R {
        self.dirty = true;
        f(&mut self.state)
    }

    /// Consume the session, returning the player state.
    #[must_use]
    pub fn into_state(self) -> PlayerState {
        self.state
    }

    /// The static content catalog backing this session.
    #[must_use]
    pub const fn content(&self) -> &ContentConfig {
        &self.content
    }

    /// The day's live RNG streams. Transient: rebuilt at every rollover
    /// and rehydrated from the persisted day seed on load, never saved.
    #[must_use]
    pub const fn rng_bundle(&self) -> &DayRngBundle {
        &self.rng
    }

    /// Day-systems tick: commit a pending rollover and ripen plots. Call
    /// on the host's periodic re-evaluation timer with the current
    /// calendar day key.
    pub fn tick(&mut self, now_ms: u64, day_key: &str) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if let Some(rng) = day::commit_rollover(&mut self.state, &self.content, day_key) {
            self.rng = rng;
            self.dirty = true;
            outcome.rolled_over = true;
        }
        plots::refresh_plots(&mut self.state, &self.content, now_ms);
        outcome.save_due = self.save_due(now_ms);
        outcome
    }

    /// Auto-progress tick: sprinkler-driven harvest of ready plots. Call
    /// on the host's auto-progress timer.
    pub fn auto_tick(&mut self, now_ms: u64) -> HarvestSummary {
        let summary = plots::auto_harvest(&mut self.state, &self.content, now_ms);
        if summary.plots > 0 {
            self.events.push(FeedbackEvent::Harvested {
                plots: summary.plots,
                units: summary.units,
            });
            self.after_mutation();
        }
        summary
    }

    /// Plant the selected crop on one plot.
    ///
    /// # Errors
    ///
    /// Propagates the plot/seed failure as a rejected no-op.
    pub fn plant(&mut self, index: usize, now_ms: u64) -> Result<(), ActionError> {
        plots::plant(&mut self.state, index, now_ms)
            .map_err(|e| self.fail(e))?;
        self.events.push(FeedbackEvent::Planted { count: 1 });
        self.unlock("first_plant");
        self.after_mutation();
        Ok(())
    }

    /// Plant every empty plot until the seed stock runs out.
    ///
    /// # Errors
    ///
    /// Fails when zero plots were planted.
    pub fn plant_all(&mut self, now_ms: u64) -> Result<u32, ActionError> {
        let planted = plots::plant_all(&mut self.state, now_ms).map_err(|e| self.fail(e))?;
        self.events.push(FeedbackEvent::Planted { count: planted });
        self.unlock("first_plant");
        self.after_mutation();
        Ok(planted)
    }

    /// Harvest one ready plot.
    ///
    /// # Errors
    ///
    /// Fails when the plot is not ready.
    pub fn harvest(&mut self, index: usize, now_ms: u64) -> Result<u32, ActionError> {
        plots::refresh_plots(&mut self.state, &self.content, now_ms);
        let units = plots::harvest(&mut self.state, index).map_err(|e| self.fail(e))?;
        self.events.push(FeedbackEvent::Harvested { plots: 1, units });
        self.unlock("first_harvest");
        self.after_mutation();
        Ok(units)
    }

    /// Harvest every ready plot.
    ///
    /// # Errors
    ///
    /// Fails when no plot was ready.
    pub fn harvest_all(&mut self, now_ms: u64) -> Result<HarvestSummary, ActionError> {
        plots::refresh_plots(&mut self.state, &self.content, now_ms);
        let summary = plots::harvest_all(&mut self.state).map_err(|e| self.fail(e))?;
        self.events.push(FeedbackEvent::Harvested {
            plots: summary.plots,
            units: summary.units,
        });
        self.unlock("first_harvest");
        self.after_mutation();
        Ok(summary)
    }

    /// Sell up to `count` units of one crop at the cached day price.
    ///
    /// # Errors
    ///
    /// Fails when the crop inventory is empty.
    pub fn sell(&mut self, crop_id: &str, count: u32) -> Result<SellOutcome, ActionError> {
        let outcome =
            actions::sell_crop(&mut self.state, &self.content, crop_id, count)
                .map_err(|e| self.fail(e))?;
        self.events.push(FeedbackEvent::Sold {
            units: outcome.units,
            earned: outcome.earned,
        });
        self.unlock("first_sell");
        self.after_mutation();
        Ok(outcome)
    }

    /// Sell the whole harvested inventory at cached day prices.
    ///
    /// # Errors
    ///
    /// Fails when there is nothing to sell.
    pub fn sell_all(&mut self) -> Result<SellOutcome, ActionError> {
        let outcome =
            actions::sell_all(&mut self.state, &self.content).map_err(|e| self.fail(e))?;
        self.events.push(FeedbackEvent::Sold {
            units: outcome.units,
            earned: outcome.earned,
        });
        self.unlock("first_sell");
        self.after_mutation();
        Ok(outcome)
    }

    /// Buy seeds at the catalog seed cost.
    ///
    /// # Errors
    ///
    /// Fails on unknown crops or insufficient funds.
    pub fn buy_seeds(&mut self, crop_id: &str, count: u32) -> Result<i64, ActionError> {
        let cost = actions::buy_seeds(&mut self.state, &self.content, crop_id, count)
            .map_err(|e| self.fail(e))?;
        self.events.push(FeedbackEvent::SeedsBought {
            crop: crop_id.to_string(),
            count,
        });
        self.after_mutation();
        Ok(cost)
    }

    /// Buy the next level of an upgrade.
    ///
    /// # Errors
    ///
    /// Fails on insufficient funds.
    pub fn buy_upgrade(&mut self, key: UpgradeKey) -> Result<i64, ActionError> {
        let cost = actions::buy_upgrade(&mut self.state, key).map_err(|e| self.fail(e))?;
        self.events.push(FeedbackEvent::Upgraded { key });
        self.after_mutation();
        Ok(cost)
    }

    /// Buy the next level of a building.
    ///
    /// # Errors
    ///
    /// Fails at max level or on insufficient funds.
    pub fn buy_building(&mut self, key: BuildingKey) -> Result<i64, ActionError> {
        let cost = actions::buy_building(&mut self.state, &self.content, key)
            .map_err(|e| self.fail(e))?;
        self.events.push(FeedbackEvent::Built { key });
        self.after_mutation();
        Ok(cost)
    }

    /// Claim a completed quest's reward.
    ///
    /// # Errors
    ///
    /// Fails for unknown, already claimed, or incomplete quests.
    pub fn claim_quest(&mut self, quest_id: &str) -> Result<i64, ActionError> {
        let coins = actions::claim_quest(&mut self.state, quest_id).map_err(|e| self.fail(e))?;
        self.events.push(FeedbackEvent::QuestClaimed {
            id: quest_id.to_string(),
            coins,
        });
        self.after_mutation();
        Ok(coins)
    }

    /// Change the crop planted by plant actions.
    ///
    /// # Errors
    ///
    /// Fails for crops outside the catalog.
    pub fn select_crop(&mut self, crop_id: &str) -> Result<(), ActionError> {
        if self.content.crop(crop_id).is_none() {
            return Err(self.fail(ActionError::UnknownCrop(crop_id.to_string())));
        }
        self.state.selected_crop = crop_id.to_string();
        self.dirty = true;
        Ok(())
    }

    /// Change the crop highlighted by the market panel.
    ///
    /// # Errors
    ///
    /// Fails for crops outside the catalog.
    pub fn select_sell(&mut self, crop_id: &str) -> Result<(), ActionError> {
        if self.content.crop(crop_id).is_none() {
            return Err(self.fail(ActionError::UnknownCrop(crop_id.to_string())));
        }
        self.state.selected_sell = crop_id.to_string();
        self.dirty = true;
        Ok(())
    }

    /// Record tutorial completion.
    pub fn complete_tutorial(&mut self) {
        self.state.tutorial_done = true;
        self.dirty = true;
    }

    /// Read-only plot views with growth progress, evaluated lazily
    /// against the supplied timestamp without mutating any plot.
    #[must_use]
    pub fn plot_views(&self, now_ms: u64) -> Vec<PlotView> {
        self.state
            .plots
            .iter()
            .enumerate()
            .map(|(index, plot)| match plot {
                Plot::Empty => PlotView {
                    index,
                    status: PlotStatus::Empty,
                    crop: None,
                    progress: 0.0,
                },
                Plot::Ready { crop } => PlotView {
                    index,
                    status: PlotStatus::Ready,
                    crop: Some(crop.clone()),
                    progress: 1.0,
                },
                Plot::Growing { crop, planted_at_ms } => {
                    let elapsed = now_ms.saturating_sub(*planted_at_ms);
                    let progress = duration_for(&self.content, &self.state, crop)
                        .map_or(0.0, |d| (u64_to_f64(elapsed) / u64_to_f64(d)).clamp(0.0, 1.0));
                    let status = if progress >= 1.0 {
                        PlotStatus::Ready
                    } else {
                        PlotStatus::Growing
                    };
                    PlotView {
                        index,
                        status,
                        crop: Some(crop.clone()),
                        progress,
                    }
                }
            })
            .collect()
    }

    /// Cosmetic price-history series for one crop's sparkline.
    #[must_use]
    pub fn price_history(&self, crop_id: &str) -> Option<Vec<f64>> {
        self.content
            .crop(crop_id)
            .map(|crop| market::price_history(crop, self.state.day_seed))
    }

    /// Drain feedback events collected since the last drain.
    pub fn drain_events(&mut self) -> Vec<FeedbackEvent> {
        std::mem::take(&mut self.events)
    }

    /// Serialize the current state into a persistable blob.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn snapshot(&self) -> Result<String, serde_json::Error> {
        encode_save(&self.state)
    }

    /// Whether a debounced save is due at this timestamp.
    #[must_use]
    pub fn save_due(&self, now_ms: u64) -> bool {
        self.dirty
            && self
                .last_save_ms
                .is_none_or(|t| now_ms.saturating_sub(t) >= SAVE_DEBOUNCE_MS)
    }

    /// Record a completed save, resetting the debounce window.
    pub const fn mark_saved(&mut self, now_ms: u64) {
        self.dirty = false;
        self.last_save_ms = Some(now_ms);
    }

    fn unlock(&mut self, id: &str) {
        if let Some(id) = achievements::unlock(&mut self.state, &self.content, id) {
            self.events.push(FeedbackEvent::AchievementUnlocked { id });
        }
    }

    fn after_mutation(&mut self) {
        let unlocked = achievements::check_achievements(&mut self.state, &self.content);
        for id in unlocked {
            self.events.push(FeedbackEvent::AchievementUnlocked { id });
        }
        self.dirty = true;
    }

    fn fail(&mut self, err: ActionError) -> ActionError {
        self.events.push(FeedbackEvent::ActionFailed {
            message: err.to_string(),
        });
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new_game(ContentConfig::default_config(), "2024-01-01")
    }

    #[test]
    fn new_game_lands_on_day_one_with_quests_and_prices() {
        let session = session();
        assert_eq!(session.state().day_num, 1);
        assert_eq!(session.state().quests.len(), 3);
        assert_eq!(session.state().prices.len(), 4);
    }

    #[test]
    fn tick_rolls_over_once_per_day_key() {
        let mut session = session();
        let outcome = session.tick(0, "2024-01-01");
        assert!(!outcome.rolled_over);

        let outcome = session.tick(1_000, "2024-01-02");
        assert!(outcome.rolled_over);
        assert_eq!(session.state().day_num, 2);

        let outcome = session.tick(2_000, "2024-01-02");
        assert!(!outcome.rolled_over, "second check must not re-roll");
    }

    #[test]
    fn plant_grow_harvest_emits_events_and_unlocks() {
        let mut session = session();
        session.plant(0, 0).unwrap();
        let duration = duration_for(session.content(), session.state(), "potato").unwrap();
        let units = session.harvest(0, duration).unwrap();
        assert_eq!(units, 1);

        let events = session.drain_events();
        assert!(events.contains(&FeedbackEvent::Planted { count: 1 }));
        assert!(events.contains(&FeedbackEvent::Harvested { plots: 1, units: 1 }));
        assert!(events.contains(&FeedbackEvent::AchievementUnlocked {
            id: "first_plant".to_string()
        }));
        assert!(events.contains(&FeedbackEvent::AchievementUnlocked {
            id: "first_harvest".to_string()
        }));
    }

    #[test]
    fn failures_emit_feedback_and_leave_state_alone() {
        let mut session = session();
        let before = session.state().clone();
        assert!(session.harvest(0, 0).is_err());
        assert_eq!(session.state(), &before);
        let events = session.drain_events();
        assert!(matches!(events[0], FeedbackEvent::ActionFailed { .. }));
    }

    #[test]
    fn plot_views_report_progress_without_mutation() {
        let mut session = session();
        session.plant(0, 0).unwrap();
        let duration = duration_for(session.content(), session.state(), "potato").unwrap();

        let views = session.plot_views(duration / 2);
        assert_eq!(views[0].status, PlotStatus::Growing);
        assert!((views[0].progress - 0.5).abs() < 0.01);

        let views = session.plot_views(duration);
        assert_eq!(views[0].status, PlotStatus::Ready);
        assert!(matches!(
            session.state().plots[0],
            Plot::Growing { .. }
        ), "views never mutate the plot");
    }

    #[test]
    fn save_debounce_gates_repeat_saves() {
        let mut session = session();
        assert!(session.save_due(0), "fresh game wants an initial save");
        session.mark_saved(1_000);
        assert!(!session.save_due(1_100));

        session.complete_tutorial();
        assert!(!session.save_due(1_100), "inside the debounce window");
        assert!(session.save_due(1_500));
    }

    #[test]
    fn from_state_rehydrates_rng_from_persisted_seed() {
        let mut session = session();
        session.plant(0, 0).unwrap();
        let state = session.into_state();
        let seed = state.day_seed;

        let resumed = GameSession::from_state(ContentConfig::default_config(), state);
        assert_eq!(resumed.state().day_seed, seed);
        let history = resumed.price_history("potato").unwrap();
        assert_eq!(history.len(), 24);
    }
}
