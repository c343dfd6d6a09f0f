//! Headless campaign simulation: a scripted greedy player run over real
//! calendar day keys, with a canonical per-day state digest so two runs
//! can be compared bit for bit.

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use std::hash::Hasher;
use twox_hash::XxHash64;

use pixelfields_game::{BuildingKey, ContentConfig, GameSession, PlayerState, UpgradeKey};

const DIGEST_SEED: u64 = 0;
/// Simulated wall-clock step after planting, generous enough to ripen the
/// slowest crop under the harshest season/weather combination.
const RIPEN_STEP_MS: u64 = 60_000;
const DAY_PAD_MS: u64 = 5_000;
const SEED_RESTOCK_TARGET: u32 = 12;

/// Summary of one simulated campaign.
#[derive(Debug, Clone)]
pub struct CampaignReport {
    pub days: u32,
    pub final_day_num: u32,
    pub final_coins: i64,
    pub achievements: usize,
    pub quests_claimed: u32,
    pub daily_digests: Vec<u64>,
    pub digest: u64,
}

/// Run a fully deterministic campaign of `days` in-game days starting at
/// the given calendar date.
///
/// # Errors
///
/// Returns an error if the calendar arithmetic runs off the end of the
/// supported date range.
pub fn run_campaign(start: NaiveDate, days: u32) -> Result<CampaignReport> {
    let content = ContentConfig::default_config();
    let start_key = start.format("%Y-%m-%d").to_string();
    let mut session = GameSession::new_game(content, &start_key);
    let mut now_ms = 0u64;
    let mut quests_claimed = 0u32;
    let mut daily_digests = Vec::with_capacity(days as usize);

    for day_offset in 0..days {
        let date = start
            .checked_add_days(Days::new(u64::from(day_offset)))
            .context("campaign ran past the calendar range")?;
        let key = date.format("%Y-%m-%d").to_string();
        session.tick(now_ms, &key);

        play_one_day(&mut session, &mut now_ms);
        quests_claimed += claim_ready_quests(&mut session);
        let _ = session.drain_events();

        log::debug!(
            "day {} [{key}]: coins={} weather={}",
            session.state().day_num,
            session.state().coins,
            session.state().weather,
        );
        daily_digests.push(digest_state(session.state()));
        now_ms += DAY_PAD_MS;
    }

    let digest = combine_digests(&daily_digests);
    let state = session.state();
    Ok(CampaignReport {
        days,
        final_day_num: state.day_num,
        final_coins: state.coins,
        achievements: state.achievements.len(),
        quests_claimed,
        daily_digests,
        digest,
    })
}

/// Greedy day script: plant everything, ripen, auto-tick once, harvest,
/// sell, then restock and invest leftover coins on a fixed rotation.
fn play_one_day(session: &mut GameSession, now_ms: &mut u64) {
    if session.plant_all(*now_ms).is_ok() {
        *now_ms += RIPEN_STEP_MS;
        let key = session.state().day_key.clone();
        session.tick(*now_ms, &key);
        let _ = session.auto_tick(*now_ms);
        let _ = session.harvest_all(*now_ms);
    }
    let _ = session.sell_all();

    let selected = session.state().selected_crop.clone();
    let stock = session.state().seed_count(&selected);
    if stock < SEED_RESTOCK_TARGET {
        let _ = session.buy_seeds(&selected, SEED_RESTOCK_TARGET - stock);
    }

    // Rotate cheap investments so upgrade and building math both get
    // exercised; failures are ordinary when coins run short.
    match session.state().day_num % 4 {
        0 => {
            let _ = session.buy_upgrade(UpgradeKey::Shovel);
        }
        1 => {
            let _ = session.buy_upgrade(UpgradeKey::Sprinkler);
        }
        2 => {
            let _ = session.buy_building(BuildingKey::Barn);
        }
        _ => {
            let _ = session.buy_building(BuildingKey::Silo);
        }
    }
}

fn claim_ready_quests(session: &mut GameSession) -> u32 {
    let claimable: Vec<String> = session
        .state()
        .quests
        .iter()
        .filter(|q| !q.claimed && q.progress_key.value(&session.state().progress) >= q.goal)
        .map(|q| q.id.clone())
        .collect();
    let mut claimed = 0u32;
    for id in claimable {
        if session.claim_quest(&id).is_ok() {
            claimed += 1;
        }
    }
    claimed
}

/// Canonical digest over the logical state. Map and set fields are walked
/// in sorted order so the digest is independent of hash-map iteration
/// order within a process.
#[must_use]
pub fn digest_state(state: &PlayerState) -> u64 {
    let mut hasher = XxHash64::with_seed(DIGEST_SEED);
    hasher.write_i64(state.coins);
    hasher.write_u32(state.day_num);
    hasher.write(state.day_key.as_bytes());
    hasher.write_u32(state.day_seed);
    hasher.write(state.season.as_str().as_bytes());
    hasher.write(state.weather.as_str().as_bytes());

    write_sorted_u32_map(&mut hasher, &state.seeds);
    write_sorted_u32_map(&mut hasher, &state.crops);
    let mut prices: Vec<(&String, &i64)> = state.prices.iter().collect();
    prices.sort();
    for (id, price) in prices {
        hasher.write(id.as_bytes());
        hasher.write_i64(*price);
    }

    for plot in &state.plots {
        match plot {
            pixelfields_game::Plot::Empty => hasher.write_u8(0),
            pixelfields_game::Plot::Growing { crop, planted_at_ms } => {
                hasher.write_u8(1);
                hasher.write(crop.as_bytes());
                hasher.write_u64(*planted_at_ms);
            }
            pixelfields_game::Plot::Ready { crop } => {
                hasher.write_u8(2);
                hasher.write(crop.as_bytes());
            }
        }
    }

    for quest in &state.quests {
        hasher.write(quest.id.as_bytes());
        hasher.write_u32(quest.goal);
        hasher.write_u8(u8::from(quest.claimed));
    }

    hasher.write_u32(state.progress.planted);
    hasher.write_u32(state.progress.harvested);
    hasher.write_u32(state.progress.sold);
    hasher.write_u32(state.progress.planted_today);
    let mut types: Vec<&String> = state.progress.harvest_types.iter().collect();
    types.sort();
    for id in types {
        hasher.write(id.as_bytes());
    }

    let mut unlocked: Vec<&String> = state.achievements.iter().collect();
    unlocked.sort();
    for id in unlocked {
        hasher.write(id.as_bytes());
    }

    hasher.finish()
}

fn write_sorted_u32_map(hasher: &mut XxHash64, map: &std::collections::HashMap<String, u32>) {
    let mut entries: Vec<(&String, &u32)> = map.iter().collect();
    entries.sort();
    for (id, count) in entries {
        hasher.write(id.as_bytes());
        hasher.write_u32(*count);
    }
}

fn combine_digests(digests: &[u64]) -> u64 {
    let mut hasher = XxHash64::with_seed(DIGEST_SEED);
    for digest in digests {
        hasher.write_u64(*digest);
    }
    hasher.finish()
}
