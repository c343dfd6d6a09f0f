//! Weather identifiers and seeded weighted selection.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::rng::DayRng;

/// Weather conditions affecting daily growth and prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    #[default]
    Sunny,
    Rain,
    Wind,
    Storm,
    Snow,
}

/// Fixed enumeration order for weighted walks. Matching the catalog order
/// keeps selection deterministic regardless of map iteration order.
pub const WEATHER_ORDER: [Weather; 5] = [
    Weather::Sunny,
    Weather::Rain,
    Weather::Wind,
    Weather::Storm,
    Weather::Snow,
];

impl Weather {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::Rain => "rain",
            Self::Wind => "wind",
            Self::Storm => "storm",
            Self::Snow => "snow",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weather {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sunny" => Ok(Self::Sunny),
            "rain" => Ok(Self::Rain),
            "wind" => Ok(Self::Wind),
            "storm" => Ok(Self::Storm),
            "snow" => Ok(Self::Snow),
            _ => Err(()),
        }
    }
}

fn weight_of(weights: &HashMap<Weather, f64>, weather: Weather) -> f64 {
    weights.get(&weather).copied().unwrap_or(0.0).max(0.0)
}

/// Select today's weather from a season's weight table.
///
/// Weights need not sum to 1. One draw from the weather-domain stream is
/// scaled by the weight total, then the entries are walked in
/// [`WEATHER_ORDER`] subtracting each weight until the remainder drops to
/// zero or below. If floating-point error leaves a remainder after the
/// walk, the first weighted entry wins, so selection always terminates.
#[must_use]
pub fn select_weather(weights: &HashMap<Weather, f64>, rng: &mut DayRng) -> Weather {
    let total: f64 = WEATHER_ORDER.iter().map(|w| weight_of(weights, *w)).sum();
    let fallback = WEATHER_ORDER
        .iter()
        .copied()
        .find(|w| weight_of(weights, *w) > 0.0)
        .unwrap_or_default();
    if total <= 0.0 {
        return fallback;
    }

    let mut remainder = rng.next_f64() * total;
    for weather in WEATHER_ORDER {
        let weight = weight_of(weights, weather);
        if weight <= 0.0 {
            continue;
        }
        remainder -= weight;
        if remainder <= 0.0 {
            return weather;
        }
    }
    fallback
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spring_weights() -> HashMap<Weather, f64> {
        HashMap::from([
            (Weather::Sunny, 0.35),
            (Weather::Rain, 0.35),
            (Weather::Wind, 0.2),
            (Weather::Storm, 0.07),
            (Weather::Snow, 0.03),
        ])
    }

    #[test]
    fn selection_is_seed_stable() {
        let weights = spring_weights();
        let a = select_weather(&weights, &mut DayRng::new(123));
        let b = select_weather(&weights, &mut DayRng::new(123));
        assert_eq!(a, b);
    }

    #[test]
    fn zero_total_falls_back_to_first_enumerated() {
        let weights = HashMap::new();
        assert_eq!(select_weather(&weights, &mut DayRng::new(5)), Weather::Sunny);
    }

    #[test]
    fn single_weighted_entry_always_wins() {
        let weights = HashMap::from([(Weather::Snow, 2.5)]);
        for seed in 0..50 {
            assert_eq!(
                select_weather(&weights, &mut DayRng::new(seed)),
                Weather::Snow
            );
        }
    }

    #[test]
    fn all_weighted_entries_are_reachable() {
        let weights = spring_weights();
        let mut seen = std::collections::HashSet::new();
        for seed in 0..500 {
            seen.insert(select_weather(&weights, &mut DayRng::new(seed)));
        }
        assert!(seen.contains(&Weather::Sunny));
        assert!(seen.contains(&Weather::Rain));
        assert!(seen.contains(&Weather::Wind));
    }
}
