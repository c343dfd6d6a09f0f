//! Plot lifecycle: Empty -> Growing -> Ready -> Empty.
//!
//! Ripeness is evaluated lazily against host-supplied timestamps; nothing
//! in here reads a clock. Failed transitions are rejected no-ops.
use crate::actions::ActionError;
use crate::content::ContentConfig;
use crate::growth::{auto_harvest_capacity, duration_for, harvest_yield};
use crate::state::{PlayerState, Plot};

/// Outcome of a bulk harvest: plots cleared and units banked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HarvestSummary {
    pub plots: u32,
    pub units: u32,
}

/// Promote any grown plots to Ready. Growth duration is evaluated under
/// the day's current weather/season at check time, not at planting time.
pub fn refresh_plots(state: &mut PlayerState, content: &ContentConfig, now_ms: u64) {
    for idx in 0..state.plots.len() {
        let Plot::Growing { crop, planted_at_ms } = &state.plots[idx] else {
            continue;
        };
        let Some(duration) = duration_for(content, state, crop) else {
            continue;
        };
        if now_ms.saturating_sub(*planted_at_ms) >= duration {
            let crop = crop.clone();
            state.plots[idx] = Plot::Ready { crop };
        }
    }
}

/// Plant the selected crop on one empty plot.
///
/// # Errors
///
/// `InvalidPlotTransition` when the plot is missing or not empty,
/// `InsufficientSeed` when the selected crop has no seed stock.
pub fn plant(
    state: &mut PlayerState,
    index: usize,
    now_ms: u64,
) -> Result<(), ActionError> {
    let Some(plot) = state.plots.get(index) else {
        return Err(ActionError::InvalidPlotTransition);
    };
    if !plot.is_empty() {
        return Err(ActionError::InvalidPlotTransition);
    }
    let crop_id = state.selected_crop.clone();
    if state.seed_count(&crop_id) == 0 {
        return Err(ActionError::InsufficientSeed);
    }

    if let Some(stock) = state.seeds.get_mut(&crop_id) {
        *stock -= 1;
    }
    state.plots[index] = Plot::Growing {
        crop: crop_id,
        planted_at_ms: now_ms,
    };
    state.progress.planted = state.progress.planted.saturating_add(1);
    state.progress.planted_today = state.progress.planted_today.saturating_add(1);
    Ok(())
}

/// Harvest one ready plot, banking its yield.
///
/// # Errors
///
/// `InvalidPlotTransition` when the plot is missing or not ready.
pub fn harvest(state: &mut PlayerState, index: usize) -> Result<u32, ActionError> {
    let Some(Plot::Ready { crop }) = state.plots.get(index) else {
        return Err(ActionError::InvalidPlotTransition);
    };
    let crop_id = crop.clone();
    let units = harvest_yield(&state.upgrades, &state.buildings);
    let held = state.crops.entry(crop_id.clone()).or_insert(0);
    *held = held.saturating_add(units);
    state.plots[index] = Plot::Empty;
    state.progress.harvested = state.progress.harvested.saturating_add(1);
    state.progress.harvest_types.insert(crop_id);
    Ok(units)
}

/// Plant the selected crop on every empty plot in field order, stopping
/// early once the seed stock runs out.
///
/// # Errors
///
/// `InsufficientSeed` when the stock was empty from the start, otherwise
/// `NoEmptyPlot` when no plot was eligible.
pub fn plant_all(state: &mut PlayerState, now_ms: u64) -> Result<u32, ActionError> {
    let crop_id = state.selected_crop.clone();
    let mut planted = 0u32;
    for idx in 0..state.plots.len() {
        if state.seed_count(&crop_id) == 0 {
            break;
        }
        if !state.plots[idx].is_empty() {
            continue;
        }
        if let Some(stock) = state.seeds.get_mut(&crop_id) {
            *stock -= 1;
        }
        state.plots[idx] = Plot::Growing {
            crop: crop_id.clone(),
            planted_at_ms: now_ms,
        };
        planted += 1;
    }
    if planted == 0 {
        return if state.seed_count(&crop_id) == 0 {
            Err(ActionError::InsufficientSeed)
        } else {
            Err(ActionError::NoEmptyPlot)
        };
    }
    state.progress.planted = state.progress.planted.saturating_add(planted);
    state.progress.planted_today = state.progress.planted_today.saturating_add(planted);
    Ok(planted)
}

/// Harvest every ready plot in field order.
///
/// # Errors
///
/// `NothingToHarvest` when no plot was ready.
pub fn harvest_all(state: &mut PlayerState) -> Result<HarvestSummary, ActionError> {
    let mut summary = HarvestSummary::default();
    for idx in 0..state.plots.len() {
        let Plot::Ready { crop } = &state.plots[idx] else {
            continue;
        };
        let crop_id = crop.clone();
        let units = harvest_yield(&state.upgrades, &state.buildings);
        let held = state.crops.entry(crop_id.clone()).or_insert(0);
        *held = held.saturating_add(units);
        state.plots[idx] = Plot::Empty;
        summary.plots += 1;
        summary.units = summary.units.saturating_add(units);
        state.progress.harvest_types.insert(crop_id);
    }
    if summary.plots == 0 {
        return Err(ActionError::NothingToHarvest);
    }
    state.progress.harvested = state.progress.harvested.saturating_add(summary.plots);
    Ok(summary)
}

/// Sprinkler auto-harvest: clears up to the sprinkler's per-tick capacity
/// of ready plots. Zero eligible plots is a quiet no-op here, not an
/// error, since no player intent is behind the trigger.
pub fn auto_harvest(
    state: &mut PlayerState,
    content: &ContentConfig,
    now_ms: u64,
) -> HarvestSummary {
    let capacity = auto_harvest_capacity(&state.upgrades);
    let mut summary = HarvestSummary::default();
    if capacity == 0 {
        return summary;
    }
    refresh_plots(state, content, now_ms);
    for idx in 0..state.plots.len() {
        if summary.plots >= capacity {
            break;
        }
        let Plot::Ready { crop } = &state.plots[idx] else {
            continue;
        };
        let crop_id = crop.clone();
        let units = harvest_yield(&state.upgrades, &state.buildings);
        let held = state.crops.entry(crop_id).or_insert(0);
        *held = held.saturating_add(units);
        state.plots[idx] = Plot::Empty;
        summary.plots += 1;
        summary.units = summary.units.saturating_add(units);
    }
    state.progress.harvested = state.progress.harvested.saturating_add(summary.plots);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grown_state() -> (PlayerState, ContentConfig) {
        let content = ContentConfig::default_config();
        let mut state = PlayerState::starting(&content);
        // Deterministic day context so growth durations resolve.
        state.day_num = 1;
        (state, content)
    }

    #[test]
    fn plant_moves_seed_into_plot() {
        let (mut state, _content) = grown_state();
        plant(&mut state, 0, 1_000).unwrap();
        assert_eq!(state.seed_count("potato"), 9);
        assert_eq!(
            state.plots[0],
            Plot::Growing {
                crop: "potato".to_string(),
                planted_at_ms: 1_000
            }
        );
        assert_eq!(state.progress.planted, 1);
        assert_eq!(state.progress.planted_today, 1);
    }

    #[test]
    fn planting_occupied_plot_is_rejected() {
        let (mut state, _content) = grown_state();
        plant(&mut state, 0, 1_000).unwrap();
        assert_eq!(
            plant(&mut state, 0, 2_000).unwrap_err(),
            ActionError::InvalidPlotTransition
        );
        assert_eq!(state.seed_count("potato"), 9, "rejected plant keeps seeds");
    }

    #[test]
    fn planting_without_seed_is_rejected() {
        let (mut state, _content) = grown_state();
        state.seeds.insert("potato".to_string(), 0);
        assert_eq!(
            plant(&mut state, 0, 1_000).unwrap_err(),
            ActionError::InsufficientSeed
        );
    }

    #[test]
    fn growth_ripens_exactly_at_duration() {
        let (mut state, content) = grown_state();
        plant(&mut state, 0, 0).unwrap();
        let duration = duration_for(&content, &state, "potato").unwrap();

        refresh_plots(&mut state, &content, duration - 1);
        assert!(!state.plots[0].is_ready());

        refresh_plots(&mut state, &content, duration);
        assert!(state.plots[0].is_ready());
    }

    #[test]
    fn harvest_returns_plot_to_empty_with_yield() {
        let (mut state, content) = grown_state();
        plant(&mut state, 0, 0).unwrap();
        refresh_plots(&mut state, &content, u64::MAX / 2);

        let units = harvest(&mut state, 0).unwrap();
        assert_eq!(units, 1);
        assert_eq!(state.crop_count("potato"), 1);
        assert!(state.plots[0].is_empty());
        assert!(state.plots[0].crop_id().is_none());
        assert!(state.progress.harvest_types.contains("potato"));

        assert_eq!(
            harvest(&mut state, 0).unwrap_err(),
            ActionError::InvalidPlotTransition
        );
    }

    #[test]
    fn plant_all_stops_at_seed_stock() {
        let (mut state, _content) = grown_state();
        state.seeds.insert("potato".to_string(), 3);
        let planted = plant_all(&mut state, 500).unwrap();
        assert_eq!(planted, 3);
        assert_eq!(state.seed_count("potato"), 0);
        assert!(state.plots[3].is_empty());

        assert_eq!(
            plant_all(&mut state, 600).unwrap_err(),
            ActionError::InsufficientSeed
        );
    }

    #[test]
    fn plant_all_reports_full_field() {
        let (mut state, _content) = grown_state();
        for plot in &mut state.plots {
            *plot = Plot::Ready {
                crop: "potato".to_string(),
            };
        }
        assert_eq!(
            plant_all(&mut state, 0).unwrap_err(),
            ActionError::NoEmptyPlot
        );
    }

    #[test]
    fn harvest_all_sweeps_only_ready_plots() {
        let (mut state, content) = grown_state();
        plant(&mut state, 0, 0).unwrap();
        plant(&mut state, 1, 0).unwrap();
        plant(&mut state, 2, u64::MAX / 2).unwrap();
        refresh_plots(&mut state, &content, u64::MAX / 2);

        let summary = harvest_all(&mut state).unwrap();
        assert_eq!(summary.plots, 2);
        assert_eq!(state.crop_count("potato"), 2);
        assert!(!state.plots[2].is_empty(), "still-growing plot untouched");

        assert_eq!(
            harvest_all(&mut state).unwrap_err(),
            ActionError::NothingToHarvest
        );
    }

    #[test]
    fn auto_harvest_respects_capacity() {
        let (mut state, content) = grown_state();
        state.upgrades.sprinkler = 3;
        state.seeds.insert("potato".to_string(), 5);
        plant_all(&mut state, 0).unwrap();

        let summary = auto_harvest(&mut state, &content, u64::MAX / 2);
        assert_eq!(summary.plots, 1, "level 3 sprinkler clears one per tick");
        assert_eq!(state.crop_count("potato"), 1);

        state.upgrades.sprinkler = 0;
        let summary = auto_harvest(&mut state, &content, u64::MAX / 2);
        assert_eq!(summary.plots, 0);
    }
}
