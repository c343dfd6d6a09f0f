//! Cross-module determinism guarantees: identical day keys must derive
//! identical world state, and repeated checks must never re-roll a day.

use std::collections::HashMap;

use pixelfields_game::{
    ContentConfig, DayRng, DayRngBundle, GameSession, Season, Weather, derive_day_seed,
    select_weather,
};

#[test]
fn generators_from_one_seed_match_for_many_draws() {
    for seed in [0u32, 1, 0xC0FF_EE00, u32::MAX] {
        let mut a = DayRng::new(seed);
        let mut b = DayRng::new(seed);
        for _ in 0..10_000 {
            assert!((a.next_f64() - b.next_f64()).abs() < f64::EPSILON);
        }
    }
}

#[test]
fn new_year_day_selects_one_weather_under_spring_weights() {
    // Fixed spring weight table; the day seed comes from the calendar key
    // and the weather stream is domain-separated from the market stream.
    let weights: HashMap<Weather, f64> = HashMap::from([
        (Weather::Sunny, 0.35),
        (Weather::Rain, 0.35),
        (Weather::Wind, 0.2),
        (Weather::Storm, 0.07),
        (Weather::Snow, 0.03),
    ]);
    let seed = derive_day_seed("2024-01-01");

    let mut picks = Vec::new();
    for _ in 0..10 {
        let bundle = DayRngBundle::from_day_seed(seed);
        picks.push(select_weather(&weights, &mut bundle.weather()));
    }
    assert!(
        picks.windows(2).all(|w| w[0] == w[1]),
        "same day key must select the same weather on every run"
    );

    // Draining the market stream first must not influence the pick.
    let bundle = DayRngBundle::from_day_seed(seed);
    for _ in 0..64 {
        let _ = bundle.market().next_f64();
    }
    assert_eq!(select_weather(&weights, &mut bundle.weather()), picks[0]);
}

#[test]
fn two_sessions_on_the_same_calendar_agree_all_week() {
    let content = ContentConfig::default_config();
    let mut one = GameSession::new_game(content.clone(), "2024-06-01");
    let mut two = GameSession::new_game(content, "2024-06-01");

    for day in 2u32..=7 {
        let key = format!("2024-06-{day:02}");
        one.tick(u64::from(day) * 1_000, &key);
        two.tick(u64::from(day) * 9_999, &key);
        assert_eq!(one.state().weather, two.state().weather, "day {day}");
        assert_eq!(one.state().prices, two.state().prices, "day {day}");
        assert_eq!(one.state().quests, two.state().quests, "day {day}");
        assert_eq!(one.state().season, two.state().season, "day {day}");
    }
}

#[test]
fn rollover_checks_are_idempotent_within_a_day() {
    let content = ContentConfig::default_config();
    let mut session = GameSession::new_game(content, "2024-06-01");
    session.tick(10, "2024-06-02");

    let weather = session.state().weather;
    let prices = session.state().prices.clone();
    let quests = session.state().quests.clone();
    let day_num = session.state().day_num;

    for now in [20u64, 30, 40, 50] {
        let outcome = session.tick(now, "2024-06-02");
        assert!(!outcome.rolled_over);
    }
    assert_eq!(session.state().weather, weather);
    assert_eq!(session.state().prices, prices);
    assert_eq!(session.state().quests, quests);
    assert_eq!(session.state().day_num, day_num);
}

#[test]
fn seasons_cycle_through_the_calendar() {
    let content = ContentConfig::default_config();
    let mut session = GameSession::new_game(content, "day-1");
    assert_eq!(session.state().season, Season::Spring);

    let mut seen = Vec::new();
    for day in 2..=29u32 {
        session.tick(0, &format!("day-{day}"));
        let season = session.state().season;
        if seen.last() != Some(&season) {
            seen.push(season);
        }
    }
    assert_eq!(
        seen,
        vec![Season::Summer, Season::Autumn, Season::Winter, Season::Spring],
        "fixed 7-day seasons cycle in catalog order"
    );
}
