//! Discrete feedback events for the audio/notification collaborator.
//!
//! The core emits these fire-and-forget; whether anything renders them as
//! sound or toast is the collaborator's business, and the core never
//! depends on it succeeding.
use serde::{Deserialize, Serialize};

use crate::state::{BuildingKey, UpgradeKey};

/// A named event a host may surface as sound, toast, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackEvent {
    Planted { count: u32 },
    Harvested { plots: u32, units: u32 },
    Sold { units: u32, earned: i64 },
    SeedsBought { crop: String, count: u32 },
    Upgraded { key: UpgradeKey },
    Built { key: BuildingKey },
    QuestClaimed { id: String, coins: i64 },
    AchievementUnlocked { id: String },
    ActionFailed { message: String },
}
