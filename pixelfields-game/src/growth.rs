//! Crop growth timing and harvest yield. Pure functions of current state,
//! no randomness.
use crate::constants::{
    AUTO_HARVEST_LEVEL_DIVISOR, BARN_YIELD_LEVEL_DIVISOR, SHOVEL_YIELD_LEVEL_DIVISOR,
    SPRINKLER_GROWTH_BONUS_CAP, SPRINKLER_GROWTH_BONUS_PER_LEVEL, WINDMILL_GROWTH_BONUS_CAP,
    WINDMILL_GROWTH_BONUS_PER_LEVEL,
};
use crate::content::{ContentConfig, CropDefinition, SeasonDefinition, WeatherDefinition};
use crate::numbers::{round_f64_to_u64, u32_to_f64, u64_to_f64};
use crate::state::{BuildingLevels, PlayerState, UpgradeLevels};

/// Sprinkler speed-up factor. Capped strictly below 1 so duration keeps a
/// positive floor.
fn sprinkler_bonus(upgrades: &UpgradeLevels) -> f64 {
    1.0 - (u32_to_f64(upgrades.sprinkler) * SPRINKLER_GROWTH_BONUS_PER_LEVEL)
        .min(SPRINKLER_GROWTH_BONUS_CAP)
}

/// Windmill speed-up factor, same capped shape as the sprinkler.
fn windmill_bonus(buildings: &BuildingLevels) -> f64 {
    1.0 - (u32_to_f64(buildings.windmill) * WINDMILL_GROWTH_BONUS_PER_LEVEL)
        .min(WINDMILL_GROWTH_BONUS_CAP)
}

/// Grow duration for a crop under the given weather/season and bonuses,
/// in milliseconds. Always positive.
#[must_use]
pub fn grow_duration_ms(
    crop: &CropDefinition,
    weather: &WeatherDefinition,
    season: &SeasonDefinition,
    upgrades: &UpgradeLevels,
    buildings: &BuildingLevels,
) -> u64 {
    let duration = u64_to_f64(crop.grow_ms)
        * weather.grow_mult
        * season.grow_mult
        * sprinkler_bonus(upgrades)
        * windmill_bonus(buildings);
    round_f64_to_u64(duration).max(1)
}

/// Grow duration for a crop id under the player's current day conditions.
/// `None` when the crop or the current weather/season is not in catalog.
#[must_use]
pub fn duration_for(content: &ContentConfig, state: &PlayerState, crop_id: &str) -> Option<u64> {
    let crop = content.crop(crop_id)?;
    let weather = content.weather(state.weather)?;
    let season = content.season(state.season)?;
    Some(grow_duration_ms(
        crop,
        weather,
        season,
        &state.upgrades,
        &state.buildings,
    ))
}

/// Units gained per harvested plot: base 1, +1 per two shovel levels,
/// +1 per three barn levels.
#[must_use]
pub const fn harvest_yield(upgrades: &UpgradeLevels, buildings: &BuildingLevels) -> u32 {
    (1 + upgrades.shovel / SHOVEL_YIELD_LEVEL_DIVISOR) + buildings.barn / BARN_YIELD_LEVEL_DIVISOR
}

/// Plots the sprinkler auto-harvests per auto-progress tick.
#[must_use]
pub const fn auto_harvest_capacity(upgrades: &UpgradeLevels) -> u32 {
    upgrades.sprinkler / AUTO_HARVEST_LEVEL_DIVISOR
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Season;
    use crate::weather::Weather;

    #[test]
    fn potato_in_sunny_spring_matches_pinned_duration() {
        let content = ContentConfig::default_config();
        let crop = content.crop("potato").unwrap();
        let weather = content.weather(Weather::Sunny).unwrap();
        let season = content.season(Season::Spring).unwrap();
        let upgrades = UpgradeLevels::default();
        let buildings = BuildingLevels::default();
        assert_eq!(
            grow_duration_ms(crop, weather, season, &upgrades, &buildings),
            4_940
        );
    }

    #[test]
    fn higher_levels_never_slow_growth() {
        let content = ContentConfig::default_config();
        let crop = content.crop("pumpkin").unwrap();
        let weather = content.weather(Weather::Snow).unwrap();
        let season = content.season(Season::Winter).unwrap();
        let mut upgrades = UpgradeLevels::default();
        let mut buildings = BuildingLevels::default();

        let mut last = u64::MAX;
        for level in 0..30 {
            upgrades.sprinkler = level;
            buildings.windmill = level;
            let duration = grow_duration_ms(crop, weather, season, &upgrades, &buildings);
            assert!(duration > 0);
            assert!(duration <= last, "level {level} slowed growth");
            last = duration;
        }

        // Both caps engaged: duration bottoms out but never hits zero.
        upgrades.sprinkler = 1_000;
        buildings.windmill = 1_000;
        assert!(grow_duration_ms(crop, weather, season, &upgrades, &buildings) > 0);
    }

    #[test]
    fn yield_combines_shovel_and_barn() {
        let mut upgrades = UpgradeLevels::default();
        let mut buildings = BuildingLevels::default();
        assert_eq!(harvest_yield(&upgrades, &buildings), 1);
        upgrades.shovel = 4;
        buildings.barn = 6;
        assert_eq!(harvest_yield(&upgrades, &buildings), 5);
    }

    #[test]
    fn auto_harvest_needs_level_three() {
        let mut upgrades = UpgradeLevels::default();
        assert_eq!(auto_harvest_capacity(&upgrades), 0);
        upgrades.sprinkler = 2;
        assert_eq!(auto_harvest_capacity(&upgrades), 0);
        upgrades.sprinkler = 3;
        assert_eq!(auto_harvest_capacity(&upgrades), 1);
        upgrades.sprinkler = 7;
        assert_eq!(auto_harvest_capacity(&upgrades), 2);
    }
}
