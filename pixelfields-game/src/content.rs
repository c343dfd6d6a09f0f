//! Static game content: crop, season, weather, building, and achievement
//! catalogs. Loaded once from an embedded JSON asset and validated for
//! completeness; immutable for the life of the process.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::state::{BuildingKey, Season};
use crate::weather::{WEATHER_ORDER, Weather};

/// A crop in the planting catalog.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CropDefinition {
    pub id: String,
    pub name: String,
    /// Base market price in coins before daily modifiers.
    pub base_price: i64,
    /// Base grow duration in milliseconds before modifiers.
    pub grow_ms: u64,
    /// Units granted per harvest before yield bonuses.
    pub base_yield: u32,
    /// Coins per seed in the store.
    pub seed_cost: i64,
    /// Display color for the host's field rendering.
    pub color: String,
}

/// A season's weather odds and market/growth modifiers.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SeasonDefinition {
    pub id: Season,
    pub label: String,
    /// Weather-id to probability weight. Weights need not sum to 1.
    pub weather_weights: HashMap<Weather, f64>,
    pub market_mult: f64,
    pub grow_mult: f64,
}

/// A weather condition's growth and market modifiers.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WeatherDefinition {
    pub id: Weather,
    pub label: String,
    pub grow_mult: f64,
    pub market_mult: f64,
}

/// A constructible building.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BuildingDefinition {
    pub key: BuildingKey,
    pub name: String,
    pub desc: String,
    pub base_cost: i64,
    pub max_level: u32,
}

/// Flat coin-and-seed payout attached to quests and achievements.
/// Seed payouts are always potato seeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Reward {
    #[serde(default)]
    pub coins: i64,
    #[serde(default)]
    pub seeds: u32,
}

/// A static achievement definition; unlock status lives in player state.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AchievementDefinition {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub reward: Reward,
}

/// Complete static content catalog.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ContentConfig {
    crops: Vec<CropDefinition>,
    seasons: Vec<SeasonDefinition>,
    weather: Vec<WeatherDefinition>,
    buildings: Vec<BuildingDefinition>,
    achievements: Vec<AchievementDefinition>,
}

impl ContentConfig {
    /// Load a content catalog from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or validation fails.
    pub fn from_json(json_str: &str) -> Result<Self, String> {
        let config: Self =
            serde_json::from_str(json_str).map_err(|e| format!("JSON parse error: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate catalog completeness.
    fn validate(&self) -> Result<(), String> {
        if self.crops.is_empty() {
            return Err("Catalog must define at least one crop".to_string());
        }
        for crop in &self.crops {
            if crop.grow_ms == 0 {
                return Err(format!("Crop {} must have a nonzero grow time", crop.id));
            }
            if crop.base_yield == 0 {
                return Err(format!("Crop {} must have a nonzero base yield", crop.id));
            }
        }
        for season in [Season::Spring, Season::Summer, Season::Autumn, Season::Winter] {
            let Some(def) = self.seasons.iter().find(|s| s.id == season) else {
                return Err(format!("Missing season definition: {season}"));
            };
            for weather in WEATHER_ORDER {
                if !def.weather_weights.contains_key(&weather) {
                    return Err(format!("Missing weight for {weather} in {season}"));
                }
            }
        }
        for weather in WEATHER_ORDER {
            if !self.weather.iter().any(|w| w.id == weather) {
                return Err(format!("Missing weather definition: {weather}"));
            }
        }
        for key in [
            BuildingKey::Barn,
            BuildingKey::Silo,
            BuildingKey::Windmill,
            BuildingKey::Farmhouse,
        ] {
            if !self.buildings.iter().any(|b| b.key == key) {
                return Err(format!("Missing building definition: {key}"));
            }
        }
        Ok(())
    }

    /// Get embedded default catalog, falling back to a minimal one-crop
    /// catalog if the embedded asset fails to parse.
    #[must_use]
    pub fn default_config() -> Self {
        Self::from_json(include_str!("../assets/content.json"))
            .unwrap_or_else(|_| Self::minimal())
    }

    /// Smallest valid catalog: one crop, neutral season/weather tables.
    fn minimal() -> Self {
        let neutral_weights: HashMap<Weather, f64> =
            WEATHER_ORDER.iter().map(|w| (*w, 0.2)).collect();
        Self {
            crops: vec![CropDefinition {
                id: "potato".to_string(),
                name: "Potato".to_string(),
                base_price: 2,
                grow_ms: 5_200,
                base_yield: 1,
                seed_cost: 1,
                color: "#d3a55b".to_string(),
            }],
            seasons: [Season::Spring, Season::Summer, Season::Autumn, Season::Winter]
                .into_iter()
                .map(|id| SeasonDefinition {
                    id,
                    label: id.as_str().to_string(),
                    weather_weights: neutral_weights.clone(),
                    market_mult: 1.0,
                    grow_mult: 1.0,
                })
                .collect(),
            weather: WEATHER_ORDER
                .iter()
                .map(|id| WeatherDefinition {
                    id: *id,
                    label: id.as_str().to_string(),
                    grow_mult: 1.0,
                    market_mult: 1.0,
                })
                .collect(),
            buildings: [
                BuildingKey::Barn,
                BuildingKey::Silo,
                BuildingKey::Windmill,
                BuildingKey::Farmhouse,
            ]
            .into_iter()
            .map(|key| BuildingDefinition {
                key,
                name: key.as_str().to_string(),
                desc: String::new(),
                base_cost: 30,
                max_level: 12,
            })
            .collect(),
            achievements: Vec::new(),
        }
    }

    /// Crop catalog in canonical order (the daily price-table pass order).
    #[must_use]
    pub fn crops(&self) -> &[CropDefinition] {
        &self.crops
    }

    #[must_use]
    pub fn crop(&self, id: &str) -> Option<&CropDefinition> {
        self.crops.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn season(&self, id: Season) -> Option<&SeasonDefinition> {
        self.seasons.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn weather(&self, id: Weather) -> Option<&WeatherDefinition> {
        self.weather.iter().find(|w| w.id == id)
    }

    #[must_use]
    pub fn building(&self, key: BuildingKey) -> Option<&BuildingDefinition> {
        self.buildings.iter().find(|b| b.key == key)
    }

    #[must_use]
    pub fn buildings(&self) -> &[BuildingDefinition] {
        &self.buildings
    }

    #[must_use]
    pub fn achievements(&self) -> &[AchievementDefinition] {
        &self.achievements
    }

    #[must_use]
    pub fn achievement(&self, id: &str) -> Option<&AchievementDefinition> {
        self.achievements.iter().find(|a| a.id == id)
    }

    /// Season for a given day number. Seasons run a fixed number of days
    /// and cycle in catalog order.
    #[must_use]
    pub fn season_for_day(&self, day_num: u32) -> Season {
        if self.seasons.is_empty() {
            return Season::default();
        }
        let idx = (day_num.saturating_sub(1) / crate::constants::SEASON_LENGTH_DAYS) as usize
            % self.seasons.len();
        self.seasons.get(idx).map_or_else(Season::default, |s| s.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_parses_and_validates() {
        let content = ContentConfig::default_config();
        assert_eq!(content.crops().len(), 4);
        assert!(content.crop("pumpkin").is_some());
        assert!(content.season(Season::Winter).is_some());
        assert!(content.weather(Weather::Snow).is_some());
        assert_eq!(content.achievements().len(), 8);
    }

    #[test]
    fn catalog_values_match_balance_sheet() {
        let content = ContentConfig::default_config();
        let potato = content.crop("potato").unwrap();
        assert_eq!(potato.base_price, 2);
        assert_eq!(potato.grow_ms, 5_200);
        let spring = content.season(Season::Spring).unwrap();
        assert!((spring.grow_mult - 0.95).abs() < f64::EPSILON);
        assert!((spring.weather_weights[&Weather::Sunny] - 0.35).abs() < f64::EPSILON);
        let snow = content.weather(Weather::Snow).unwrap();
        assert!((snow.grow_mult - 1.28).abs() < f64::EPSILON);
        let barn = content.building(BuildingKey::Barn).unwrap();
        assert_eq!(barn.base_cost, 30);
        assert_eq!(barn.max_level, 12);
    }

    #[test]
    fn seasons_cycle_weekly() {
        let content = ContentConfig::default_config();
        assert_eq!(content.season_for_day(1), Season::Spring);
        assert_eq!(content.season_for_day(7), Season::Spring);
        assert_eq!(content.season_for_day(8), Season::Summer);
        assert_eq!(content.season_for_day(22), Season::Winter);
        assert_eq!(content.season_for_day(29), Season::Spring);
    }

    #[test]
    fn incomplete_catalog_is_rejected() {
        let err = ContentConfig::from_json("{\"crops\":[],\"seasons\":[],\"weather\":[],\"buildings\":[],\"achievements\":[]}");
        assert!(err.is_err());
    }
}
