//! Pixel Fields Game Engine
//!
//! Platform-agnostic core game logic for the Pixel Fields farming game.
//! This crate provides all simulation mechanics without UI or
//! platform-specific dependencies: per-day world derivation (season,
//! weather, prices, quests) from a date-keyed seed, plot growth over
//! host-supplied timestamps, and player progression tracking.

pub mod achievements;
pub mod actions;
pub mod constants;
pub mod content;
pub mod day;
pub mod events;
pub mod growth;
pub mod market;
pub mod numbers;
pub mod plots;
pub mod quests;
pub mod rng;
pub mod save;
pub mod seed;
pub mod session;
pub mod state;
pub mod weather;

// Re-export commonly used types
pub use actions::{ActionError, SellOutcome, building_cost, upgrade_cost};
pub use content::{
    AchievementDefinition, BuildingDefinition, ContentConfig, CropDefinition, Reward,
    SeasonDefinition, WeatherDefinition,
};
pub use events::FeedbackEvent;
pub use growth::{grow_duration_ms, harvest_yield};
pub use market::{price_for, price_history};
pub use plots::HarvestSummary;
pub use quests::{ProgressKey, Quest};
pub use rng::{DayRng, DayRngBundle};
pub use save::{decode_save, encode_save};
pub use seed::derive_day_seed;
pub use session::{GameSession, PlotStatus, PlotView, TickOutcome};
pub use state::{
    BuildingKey, BuildingLevels, PlayerState, Plot, QuestProgress, SAVE_VERSION, Season,
    UpgradeKey, UpgradeLevels,
};
pub use weather::{WEATHER_ORDER, Weather, select_weather};

/// Trait for abstracting save/load operations.
/// Platform-specific implementations should provide this.
pub trait GameStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the persisted blob, `None` when no save exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn load(&self) -> Result<Option<String>, Self::Error>;

    /// Persist a blob, replacing any prior save.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob cannot be written.
    fn save(&self, blob: &str) -> Result<(), Self::Error>;

    /// Delete the persisted save.
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    fn clear(&self) -> Result<(), Self::Error>;
}

/// Main game engine binding the static content catalog to a storage
/// backend and handing out sessions.
pub struct GameEngine<S>
where
    S: GameStorage,
{
    content: ContentConfig,
    storage: S,
}

impl<S> GameEngine<S>
where
    S: GameStorage,
{
    /// Create an engine over the embedded default catalog.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            content: ContentConfig::default_config(),
            storage,
        }
    }

    /// Create an engine over a custom catalog.
    pub const fn with_content(content: ContentConfig, storage: S) -> Self {
        Self { content, storage }
    }

    /// The engine's content catalog.
    #[must_use]
    pub const fn content(&self) -> &ContentConfig {
        &self.content
    }

    /// Start a fresh game on the given calendar day.
    #[must_use]
    pub fn new_game(&self, day_key: &str) -> GameSession {
        GameSession::new_game(self.content.clone(), day_key)
    }

    /// Resume from storage, or start fresh when no usable save exists.
    /// Malformed or unknown-version blobs count as "no save".
    ///
    /// # Errors
    ///
    /// Returns an error only for storage-layer read failures.
    pub fn load_or_new(&self, day_key: &str) -> Result<GameSession, S::Error> {
        let session = match self.storage.load()? {
            Some(raw) => match decode_save(&raw, &self.content) {
                Some(state) => GameSession::from_state(self.content.clone(), state),
                None => self.new_game(day_key),
            },
            None => self.new_game(day_key),
        };
        Ok(session)
    }

    /// Persist a snapshot of the session and reset its save debounce.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the storage write fails.
    pub fn save(&self, session: &mut GameSession, now_ms: u64) -> Result<(), anyhow::Error> {
        let blob = session.snapshot()?;
        self.storage.save(&blob)?;
        session.mark_saved(now_ms);
        Ok(())
    }

    /// Wipe the save and start over on the given calendar day.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage clear fails.
    pub fn reset(&self, day_key: &str) -> Result<GameSession, S::Error> {
        self.storage.clear()?;
        Ok(self.new_game(day_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::convert::Infallible;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MemoryStorage {
        slot: Rc<RefCell<Option<String>>>,
    }

    impl GameStorage for MemoryStorage {
        type Error = Infallible;

        fn load(&self) -> Result<Option<String>, Self::Error> {
            Ok(self.slot.borrow().clone())
        }

        fn save(&self, blob: &str) -> Result<(), Self::Error> {
            *self.slot.borrow_mut() = Some(blob.to_string());
            Ok(())
        }

        fn clear(&self) -> Result<(), Self::Error> {
            *self.slot.borrow_mut() = None;
            Ok(())
        }
    }

    #[test]
    fn engine_creates_saves_and_reloads_state() {
        let storage = MemoryStorage::default();
        let engine = GameEngine::new(storage.clone());
        let mut session = engine.new_game("2024-01-01");
        session.with_state_mut(|state| state.coins = 250);
        engine.save(&mut session, 1_000).unwrap();

        let loaded = engine.load_or_new("2024-01-02").unwrap();
        assert_eq!(loaded.state().coins, 250);
        assert_eq!(loaded.state().day_key, "2024-01-01");
    }

    #[test]
    fn missing_save_starts_fresh() {
        let engine = GameEngine::new(MemoryStorage::default());
        let session = engine.load_or_new("2024-02-02").unwrap();
        assert_eq!(session.state().day_num, 1);
        assert_eq!(session.state().coins, 5);
    }

    #[test]
    fn corrupt_save_falls_back_to_fresh_state() {
        let storage = MemoryStorage::default();
        storage.save("{definitely-not-json").unwrap();
        let engine = GameEngine::new(storage);
        let session = engine.load_or_new("2024-02-02").unwrap();
        assert_eq!(session.state().day_num, 1, "corrupt blob means no save");
    }

    #[test]
    fn reset_clears_storage_and_restarts() {
        let storage = MemoryStorage::default();
        let engine = GameEngine::new(storage.clone());
        let mut session = engine.new_game("2024-01-01");
        session.with_state_mut(|state| state.coins = 9_999);
        engine.save(&mut session, 0).unwrap();

        let fresh = engine.reset("2024-01-05").unwrap();
        assert_eq!(fresh.state().coins, 5);
        assert!(storage.load().unwrap().is_none());
    }
}
