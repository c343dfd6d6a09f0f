//! Persisted-state codec: versioned-union decode with one pure mapping
//! function per historical schema version.
//!
//! The blob is an opaque JSON record to the storage collaborator. Version
//! 2 is the current `PlayerState` shape; version 1 is the legacy
//! single-crop schema. Anything else — unknown version, missing tag,
//! malformed JSON — decodes to `None`, which callers treat as "no prior
//! save", never as an error.
use serde::Deserialize;
use serde_json::Value;

use crate::constants::{START_CARROT_SEEDS, START_COINS, START_POTATO_SEEDS};
use crate::content::ContentConfig;
use crate::state::{PlayerState, Plot, SAVE_VERSION, UpgradeLevels};

/// Serialize the current player state into the persisted blob. The live
/// RNG bundle is not part of `PlayerState`, so the snapshot automatically
/// excludes it; loads rehydrate the bundle from the persisted day seed.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_save(state: &PlayerState) -> Result<String, serde_json::Error> {
    serde_json::to_string(state)
}

/// Decode a persisted blob from any accepted schema version into the
/// current shape. `None` means "start fresh".
#[must_use]
pub fn decode_save(raw: &str, content: &ContentConfig) -> Option<PlayerState> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("discarding malformed save: {err}");
            return None;
        }
    };
    let version = value.get("version").and_then(Value::as_u64);
    let mut state = match version {
        Some(v) if v == u64::from(SAVE_VERSION) => serde_json::from_value::<PlayerState>(value)
            .map_err(|err| log::warn!("discarding v2 save with bad shape: {err}"))
            .ok()?,
        Some(1) => {
            let legacy = serde_json::from_value::<SaveV1>(value)
                .map_err(|err| log::warn!("discarding v1 save with bad shape: {err}"))
                .ok()?;
            migrate_v1(legacy)
        }
        _ => {
            log::debug!("no usable version tag in save; starting fresh");
            return None;
        }
    };
    state.normalize(content);
    Some(state)
}

/// Legacy v1 save: one implicit crop (potato), flat plot records, no
/// buildings, no day-derived state worth keeping.
#[derive(Debug, Deserialize)]
struct SaveV1 {
    #[serde(default)]
    coins: Option<i64>,
    #[serde(default)]
    potatoes: Option<u32>,
    #[serde(default)]
    plots: Vec<PlotV1>,
    #[serde(default)]
    upgrades: Option<UpgradeLevels>,
    #[serde(default, rename = "tutorialDone")]
    tutorial_done: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct PlotV1 {
    #[serde(default)]
    state: u8,
    #[serde(default, rename = "plantedAt")]
    planted_at: Option<u64>,
}

const PLOT_V1_GROWING: u8 = 1;
const PLOT_V1_READY: u8 = 2;

fn migrate_plot_v1(plot: &PlotV1) -> Plot {
    match plot.state {
        PLOT_V1_GROWING => Plot::Growing {
            crop: crate::constants::DEFAULT_CROP_ID.to_string(),
            planted_at_ms: plot.planted_at.unwrap_or(0),
        },
        PLOT_V1_READY => Plot::Ready {
            crop: crate::constants::DEFAULT_CROP_ID.to_string(),
        },
        _ => Plot::Empty,
    }
}

/// Map the v1 shape onto the current schema, defaulting every net-new
/// field. Day-derived fields stay blank so the next tick re-rolls the day.
fn migrate_v1(legacy: SaveV1) -> PlayerState {
    let mut seeds = std::collections::HashMap::new();
    seeds.insert(
        crate::constants::DEFAULT_CROP_ID.to_string(),
        START_POTATO_SEEDS,
    );
    seeds.insert("carrot".to_string(), START_CARROT_SEEDS);
    let mut crops = std::collections::HashMap::new();
    crops.insert(
        crate::constants::DEFAULT_CROP_ID.to_string(),
        legacy.potatoes.unwrap_or(0),
    );
    log::info!("migrating v1 save: {} plots", legacy.plots.len());
    PlayerState {
        coins: legacy.coins.unwrap_or(START_COINS),
        seeds,
        crops,
        plots: legacy.plots.iter().map(migrate_plot_v1).collect(),
        upgrades: legacy.upgrades.unwrap_or_default(),
        tutorial_done: legacy.tutorial_done.unwrap_or(false),
        ..PlayerState::default()
    }
}
