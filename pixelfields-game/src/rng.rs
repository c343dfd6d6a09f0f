//! Deterministic pseudo-random streams for per-day world derivation.
//!
//! `DayRng` is a mulberry32 generator: tiny, seedable from any u32, and
//! bit-for-bit reproducible across platforms. Every piece of daily
//! randomness (weather, market swing, quest goals) draws from a stream in
//! a [`DayRngBundle`], never from ambient entropy.

use rand::RngCore;
use std::cell::{RefCell, RefMut};

use crate::constants::{
    HISTORY_CROP_SHIFT, HISTORY_STREAM_DOMAIN, MARKET_STREAM_DOMAIN, QUEST_STREAM_DOMAIN,
    WEATHER_STREAM_DOMAIN,
};

const MULBERRY_INCREMENT: u32 = 0x6D2B_79F5;
const U32_RANGE: f64 = 4_294_967_296.0;

/// Deterministic generator over a single seeded stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRng {
    state: u32,
}

impl DayRng {
    /// Construct a generator from a seed. Any u32 is valid, including 0.
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance the stream one step and return the mixed 32-bit output.
    fn step(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        let mut x = self.state;
        x = (x ^ (x >> 15)).wrapping_mul(x | 1);
        x ^= x.wrapping_add((x ^ (x >> 7)).wrapping_mul(x | 61));
        x ^ (x >> 14)
    }

    /// Next draw in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.step()) / U32_RANGE
    }
}

impl RngCore for DayRng {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.step()) << 32) | u64::from(self.step())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Named per-day random streams derived from a single day seed.
///
/// Market, weather, and quest draws are independent streams so that one
/// system's draw count never shifts another system's outcomes. The bundle
/// is transient: it is never serialized and is rehydrated from the
/// persisted day seed on load.
#[derive(Debug)]
pub struct DayRngBundle {
    market: RefCell<DayRng>,
    weather: RefCell<DayRng>,
    quest: RefCell<DayRng>,
}

impl DayRngBundle {
    /// Construct the bundle from the day seed.
    #[must_use]
    pub fn from_day_seed(day_seed: u32) -> Self {
        Self {
            market: RefCell::new(DayRng::new(day_seed ^ MARKET_STREAM_DOMAIN)),
            weather: RefCell::new(DayRng::new(day_seed ^ WEATHER_STREAM_DOMAIN)),
            quest: RefCell::new(DayRng::new(day_seed ^ QUEST_STREAM_DOMAIN)),
        }
    }

    /// Access the market price stream.
    #[must_use]
    pub fn market(&self) -> RefMut<'_, DayRng> {
        self.market.borrow_mut()
    }

    /// Access the weather selection stream.
    #[must_use]
    pub fn weather(&self) -> RefMut<'_, DayRng> {
        self.weather.borrow_mut()
    }

    /// Access the quest generation stream.
    #[must_use]
    pub fn quest(&self) -> RefMut<'_, DayRng> {
        self.quest.borrow_mut()
    }
}

/// Derive the cosmetic price-history stream for one crop.
///
/// Independent of the pricing stream: display widgets can draw from it
/// freely without perturbing actual market outcomes.
#[must_use]
pub fn history_stream(day_seed: u32, crop_id: &str) -> DayRng {
    let tag = u32::from(crop_id.as_bytes().first().copied().unwrap_or(0)) << HISTORY_CROP_SHIFT;
    DayRng::new(day_seed ^ tag ^ HISTORY_STREAM_DOMAIN)
}
