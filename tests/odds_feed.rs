use std::sync::mpsc;
use std::time::Duration;

use match_trends::odds_feed::{
    GOAL_MARKET_DELTA, OddsSource, RESULT_MARKET_DELTA, SimulatedOddsSource, jitter_odds,
    market_delta, spawn_odds_feed,
};
use match_trends::state::{Delta, Odds, OddsMarket};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn sample() -> Odds {
    Odds {
        home: 2.10,
        draw: 3.40,
        away: 3.20,
        over25: 1.65,
        under25: 2.15,
        both_teams_score: 1.75,
    }
}

fn assert_within_delta(before: &Odds, after: &Odds) {
    for market in OddsMarket::ALL {
        let moved = (after.get(market) - before.get(market)).abs();
        assert!(
            moved <= market_delta(market) + 1e-9,
            "{market:?} moved {moved}"
        );
    }
}

#[test]
fn one_jitter_stays_within_each_delta() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let before = sample();
        let mut after = before;
        jitter_odds(&mut after, &mut rng);
        assert_within_delta(&before, &after);
    }
    assert_eq!(RESULT_MARKET_DELTA, 0.05);
    assert_eq!(GOAL_MARKET_DELTA, 0.025);
}

#[test]
fn simulated_source_walks_from_the_current_price() {
    let mut source = SimulatedOddsSource::seeded(3);
    let first = source.next_odds(&sample());
    let second = source.next_odds(&first);
    assert_within_delta(&sample(), &first);
    assert_within_delta(&first, &second);
}

#[test]
fn feed_ticks_then_stops_cleanly() {
    let (tx, rx) = mpsc::channel();
    let handle = spawn_odds_feed(
        SimulatedOddsSource::seeded(9),
        "1",
        Some(sample()),
        Duration::from_millis(10),
        tx,
    )
    .expect("feed for priced match");
    assert_eq!(handle.match_id(), "1");

    let tick = loop {
        match rx.recv_timeout(Duration::from_secs(2)).expect("delta from feed") {
            Delta::OddsTick { match_id, odds } => break (match_id, odds),
            Delta::Log(_) => continue,
            other => panic!("unexpected delta {other:?}"),
        }
    };
    assert_eq!(tick.0, "1");
    assert_within_delta(&sample(), &tick.1);

    handle.stop();

    let drained: Vec<Delta> = rx.try_iter().collect();
    assert!(matches!(drained.last(), Some(Delta::FeedStopped { match_id }) if match_id == "1"));

    std::thread::sleep(Duration::from_millis(60));
    assert!(rx.try_recv().is_err(), "no ticks after stop");
}

#[test]
fn dropping_the_handle_cancels_the_feed() {
    let (tx, rx) = mpsc::channel();
    let handle = spawn_odds_feed(
        SimulatedOddsSource::seeded(5),
        "2",
        Some(sample()),
        Duration::from_millis(5),
        tx,
    );
    drop(handle);

    let drained: Vec<Delta> = rx.try_iter().collect();
    assert!(matches!(drained.last(), Some(Delta::FeedStopped { .. })));
    std::thread::sleep(Duration::from_millis(30));
    assert!(rx.try_recv().is_err());
}

#[test]
fn no_odds_no_feed() {
    let (tx, rx) = mpsc::channel();
    let handle = spawn_odds_feed(
        SimulatedOddsSource::seeded(1),
        "5",
        None,
        Duration::from_millis(5),
        tx,
    );
    assert!(handle.is_none());
    assert!(rx.recv_timeout(Duration::from_millis(30)).is_err());
}
