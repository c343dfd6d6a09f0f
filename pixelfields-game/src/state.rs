use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_CROP_ID, START_CARROT_SEEDS, START_COINS, START_PLOTS, START_POTATO_SEEDS,
};
use crate::content::ContentConfig;
use crate::quests::Quest;
use crate::weather::Weather;

/// Current persisted schema version.
pub const SAVE_VERSION: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            "autumn" => Ok(Self::Autumn),
            "winter" => Ok(Self::Winter),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeKey {
    Shovel,
    Sprinkler,
    Cart,
    Coop,
    Plot,
}

impl UpgradeKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shovel => "shovel",
            Self::Sprinkler => "sprinkler",
            Self::Cart => "cart",
            Self::Coop => "coop",
            Self::Plot => "plot",
        }
    }
}

impl fmt::Display for UpgradeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpgradeKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shovel" => Ok(Self::Shovel),
            "sprinkler" => Ok(Self::Sprinkler),
            "cart" => Ok(Self::Cart),
            "coop" => Ok(Self::Coop),
            "plot" => Ok(Self::Plot),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingKey {
    Barn,
    Silo,
    Windmill,
    Farmhouse,
}

impl BuildingKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Barn => "barn",
            Self::Silo => "silo",
            Self::Windmill => "windmill",
            Self::Farmhouse => "farmhouse",
        }
    }
}

impl fmt::Display for BuildingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildingKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "barn" => Ok(Self::Barn),
            "silo" => Ok(Self::Silo),
            "windmill" => Ok(Self::Windmill),
            "farmhouse" => Ok(Self::Farmhouse),
            _ => Err(()),
        }
    }
}

/// Player upgrade levels, one named counter per purchasable upgrade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeLevels {
    #[serde(default)]
    pub shovel: u32,
    #[serde(default)]
    pub sprinkler: u32,
    #[serde(default)]
    pub cart: u32,
    #[serde(default)]
    pub coop: u32,
    #[serde(default)]
    pub plot: u32,
}

impl UpgradeLevels {
    #[must_use]
    pub const fn level(&self, key: UpgradeKey) -> u32 {
        match key {
            UpgradeKey::Shovel => self.shovel,
            UpgradeKey::Sprinkler => self.sprinkler,
            UpgradeKey::Cart => self.cart,
            UpgradeKey::Coop => self.coop,
            UpgradeKey::Plot => self.plot,
        }
    }

    pub const fn raise(&mut self, key: UpgradeKey) {
        match key {
            UpgradeKey::Shovel => self.shovel = self.shovel.saturating_add(1),
            UpgradeKey::Sprinkler => self.sprinkler = self.sprinkler.saturating_add(1),
            UpgradeKey::Cart => self.cart = self.cart.saturating_add(1),
            UpgradeKey::Coop => self.coop = self.coop.saturating_add(1),
            UpgradeKey::Plot => self.plot = self.plot.saturating_add(1),
        }
    }
}

/// Player building levels, each capped by its catalog definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingLevels {
    #[serde(default)]
    pub barn: u32,
    #[serde(default)]
    pub silo: u32,
    #[serde(default)]
    pub windmill: u32,
    #[serde(default)]
    pub farmhouse: u32,
}

impl BuildingLevels {
    #[must_use]
    pub const fn level(&self, key: BuildingKey) -> u32 {
        match key {
            BuildingKey::Barn => self.barn,
            BuildingKey::Silo => self.silo,
            BuildingKey::Windmill => self.windmill,
            BuildingKey::Farmhouse => self.farmhouse,
        }
    }

    pub const fn raise(&mut self, key: BuildingKey) {
        match key {
            BuildingKey::Barn => self.barn = self.barn.saturating_add(1),
            BuildingKey::Silo => self.silo = self.silo.saturating_add(1),
            BuildingKey::Windmill => self.windmill = self.windmill.saturating_add(1),
            BuildingKey::Farmhouse => self.farmhouse = self.farmhouse.saturating_add(1),
        }
    }
}

/// One field plot. The variant payloads make the lifecycle invariants
/// structural: an empty plot carries no crop or timestamp, a ready plot
/// always names its crop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Plot {
    #[default]
    Empty,
    Growing { crop: String, planted_at_ms: u64 },
    Ready { crop: String },
}

impl Plot {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    /// Crop id currently occupying the plot, if any.
    #[must_use]
    pub fn crop_id(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Growing { crop, .. } | Self::Ready { crop } => Some(crop.as_str()),
        }
    }
}

/// Per-day quest progress counters. All counters accumulate monotonically
/// between rollovers and reset to zero at the next rollover.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestProgress {
    #[serde(default)]
    pub planted: u32,
    #[serde(default)]
    pub harvested: u32,
    #[serde(default)]
    pub sold: u32,
    #[serde(default)]
    pub planted_today: u32,
    #[serde(default)]
    pub harvest_types: HashSet<String>,
}

/// Complete mutable player state. Owned by the host application and passed
/// by mutable reference into every core operation; the core never keeps a
/// copy. The live RNG bundle is intentionally not a field here, so a
/// serialized snapshot of this struct is exactly the persisted blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub version: u32,
    pub coins: i64,
    #[serde(default)]
    pub seeds: HashMap<String, u32>,
    #[serde(default)]
    pub crops: HashMap<String, u32>,
    #[serde(default)]
    pub selected_crop: String,
    #[serde(default)]
    pub selected_sell: String,
    #[serde(default)]
    pub plots: Vec<Plot>,
    #[serde(default)]
    pub upgrades: UpgradeLevels,
    #[serde(default)]
    pub buildings: BuildingLevels,
    #[serde(default)]
    pub day_key: String,
    #[serde(default)]
    pub day_num: u32,
    #[serde(default)]
    pub season: Season,
    #[serde(default)]
    pub weather: Weather,
    #[serde(default)]
    pub day_seed: u32,
    #[serde(default)]
    pub prices: HashMap<String, i64>,
    #[serde(default)]
    pub quests: SmallVec<[Quest; 3]>,
    #[serde(default)]
    pub progress: QuestProgress,
    #[serde(default)]
    pub achievements: HashSet<String>,
    #[serde(default)]
    pub tutorial_done: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION,
            coins: 0,
            seeds: HashMap::new(),
            crops: HashMap::new(),
            selected_crop: String::new(),
            selected_sell: String::new(),
            plots: Vec::new(),
            upgrades: UpgradeLevels::default(),
            buildings: BuildingLevels::default(),
            day_key: String::new(),
            day_num: 0,
            season: Season::default(),
            weather: Weather::default(),
            day_seed: 0,
            prices: HashMap::new(),
            quests: SmallVec::new(),
            progress: QuestProgress::default(),
            achievements: HashSet::new(),
            tutorial_done: false,
        }
    }
}

impl PlayerState {
    /// Fresh pre-rollover starting state: starter coins and seeds, empty
    /// field, no day derived yet (`day_num` 0, blank day key). The first
    /// rollover commit brings it to day 1.
    #[must_use]
    pub fn starting(content: &ContentConfig) -> Self {
        let mut seeds = HashMap::new();
        let mut crops = HashMap::new();
        for crop in content.crops() {
            seeds.insert(crop.id.clone(), 0);
            crops.insert(crop.id.clone(), 0);
        }
        if seeds.contains_key(DEFAULT_CROP_ID) {
            seeds.insert(DEFAULT_CROP_ID.to_string(), START_POTATO_SEEDS);
        }
        if seeds.contains_key("carrot") {
            seeds.insert("carrot".to_string(), START_CARROT_SEEDS);
        }
        let selected = content
            .crops()
            .iter()
            .find(|c| c.id == DEFAULT_CROP_ID)
            .or_else(|| content.crops().first())
            .map_or_else(String::new, |c| c.id.clone());

        Self {
            coins: START_COINS,
            seeds,
            crops,
            selected_crop: selected.clone(),
            selected_sell: selected,
            plots: vec![Plot::Empty; START_PLOTS],
            ..Self::default()
        }
    }

    /// Ensure every catalog crop has inventory entries and the selected
    /// ids are valid. Run after loading a save whose catalog may predate
    /// the current one.
    pub fn normalize(&mut self, content: &ContentConfig) {
        for crop in content.crops() {
            self.seeds.entry(crop.id.clone()).or_insert(0);
            self.crops.entry(crop.id.clone()).or_insert(0);
        }
        let valid = |id: &str| content.crop(id).is_some();
        if !valid(&self.selected_crop) {
            self.selected_crop = content
                .crops()
                .first()
                .map_or_else(String::new, |c| c.id.clone());
        }
        if !valid(&self.selected_sell) {
            self.selected_sell = self.selected_crop.clone();
        }
        for building in content.buildings() {
            let level = self.buildings.level(building.key);
            if level > building.max_level {
                match building.key {
                    BuildingKey::Barn => self.buildings.barn = building.max_level,
                    BuildingKey::Silo => self.buildings.silo = building.max_level,
                    BuildingKey::Windmill => self.buildings.windmill = building.max_level,
                    BuildingKey::Farmhouse => self.buildings.farmhouse = building.max_level,
                }
            }
        }
        self.version = SAVE_VERSION;
    }

    /// Seed stock for one crop.
    #[must_use]
    pub fn seed_count(&self, crop_id: &str) -> u32 {
        self.seeds.get(crop_id).copied().unwrap_or(0)
    }

    /// Harvested inventory for one crop.
    #[must_use]
    pub fn crop_count(&self, crop_id: &str) -> u32 {
        self.crops.get(crop_id).copied().unwrap_or(0)
    }

    /// Total harvested inventory across all crops.
    #[must_use]
    pub fn total_crops(&self) -> u32 {
        self.crops.values().fold(0u32, |a, b| a.saturating_add(*b))
    }

    /// Total seed stock across all crops.
    #[must_use]
    pub fn total_seeds(&self) -> u32 {
        self.seeds.values().fold(0u32, |a, b| a.saturating_add(*b))
    }

    /// Cached day price for one crop, falling back to the catalog base
    /// price when the table has no entry yet.
    #[must_use]
    pub fn day_price(&self, crop_id: &str, content: &ContentConfig) -> i64 {
        self.prices.get(crop_id).copied().unwrap_or_else(|| {
            content.crop(crop_id).map_or(crate::constants::PRICE_MIN, |c| c.base_price)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentConfig;

    #[test]
    fn starting_state_matches_initial_grant() {
        let content = ContentConfig::default_config();
        let state = PlayerState::starting(&content);
        assert_eq!(state.coins, 5);
        assert_eq!(state.seed_count("potato"), 10);
        assert_eq!(state.seed_count("carrot"), 2);
        assert_eq!(state.seed_count("corn"), 0);
        assert_eq!(state.plots.len(), 10);
        assert!(state.plots.iter().all(Plot::is_empty));
        assert_eq!(state.day_num, 0);
        assert_eq!(state.selected_crop, "potato");
    }

    #[test]
    fn normalize_backfills_missing_crops_and_selection() {
        let content = ContentConfig::default_config();
        let mut state = PlayerState::default();
        state.selected_crop = "tomato".to_string();
        state.buildings.barn = 99;
        state.normalize(&content);
        assert_eq!(state.seed_count("pumpkin"), 0);
        assert!(state.seeds.contains_key("pumpkin"));
        assert_eq!(state.selected_crop, "potato");
        assert_eq!(state.buildings.barn, 12);
    }

    #[test]
    fn plot_variants_expose_crop_ids() {
        let growing = Plot::Growing {
            crop: "corn".to_string(),
            planted_at_ms: 10,
        };
        assert_eq!(growing.crop_id(), Some("corn"));
        assert!(Plot::Empty.crop_id().is_none());
        assert!(Plot::Ready { crop: "corn".to_string() }.is_ready());
    }

    #[test]
    fn key_enums_roundtrip_strings() {
        for key in [
            UpgradeKey::Shovel,
            UpgradeKey::Sprinkler,
            UpgradeKey::Cart,
            UpgradeKey::Coop,
            UpgradeKey::Plot,
        ] {
            assert_eq!(key.as_str().parse::<UpgradeKey>(), Ok(key));
        }
        for key in [
            BuildingKey::Barn,
            BuildingKey::Silo,
            BuildingKey::Windmill,
            BuildingKey::Farmhouse,
        ] {
            assert_eq!(key.as_str().parse::<BuildingKey>(), Ok(key));
        }
        assert!("granary".parse::<BuildingKey>().is_err());
    }
}
