use std::env;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::state::{Delta, Odds, OddsMarket};

pub const RESULT_MARKET_DELTA: f64 = 0.05;
pub const GOAL_MARKET_DELTA: f64 = 0.025;
pub const DEFAULT_TICK_SECS: u64 = 5;

/// Anything that can produce the next set of prices for an open match.
pub trait OddsSource: Send + 'static {
    fn label(&self) -> &'static str;
    fn next_odds(&mut self, current: &Odds) -> Odds;
}

/// Stub source: random walk around the fixture prices. Not market data.
pub struct SimulatedOddsSource {
    rng: StdRng,
}

impl SimulatedOddsSource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// `MATCH_TRENDS_SEED` pins the walk; unset or invalid means entropy.
    pub fn from_env() -> Self {
        env::var("MATCH_TRENDS_SEED")
            .ok()
            .and_then(|val| val.trim().parse::<u64>().ok())
            .map(Self::seeded)
            .unwrap_or_else(Self::new)
    }
}

impl Default for SimulatedOddsSource {
    fn default() -> Self {
        Self::new()
    }
}

impl OddsSource for SimulatedOddsSource {
    fn label(&self) -> &'static str {
        "simulated"
    }

    fn next_odds(&mut self, current: &Odds) -> Odds {
        let mut next = *current;
        jitter_odds(&mut next, &mut self.rng);
        next
    }
}

pub fn market_delta(market: OddsMarket) -> f64 {
    if market.is_result_market() {
        RESULT_MARKET_DELTA
    } else {
        GOAL_MARKET_DELTA
    }
}

/// Moves every market by a uniform step within its delta. No clamping.
pub fn jitter_odds(odds: &mut Odds, rng: &mut impl Rng) {
    for market in OddsMarket::ALL {
        let delta = market_delta(market);
        let value = odds.get(market) + rng.gen_range(-delta..=delta);
        odds.set(market, value);
    }
}

pub fn tick_interval_from_env() -> Duration {
    Duration::from_secs(
        env::var("ODDS_TICK_SECS")
            .ok()
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TICK_SECS)
            .max(1),
    )
}

/// Running feed for one match. Stopping (or dropping) cancels the timer and
/// joins the worker, so no tick is sent afterwards.
pub struct OddsFeedHandle {
    match_id: String,
    stop_tx: Option<Sender<()>>,
    join: Option<JoinHandle<()>>,
}

impl OddsFeedHandle {
    pub fn match_id(&self) -> &str {
        &self.match_id
    }

    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

impl Drop for OddsFeedHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Starts ticking `initial` through `source` every `interval`.
/// Returns `None` for a match with no prices.
pub fn spawn_odds_feed<S: OddsSource>(
    mut source: S,
    match_id: &str,
    initial: Option<Odds>,
    interval: Duration,
    tx: Sender<Delta>,
) -> Option<OddsFeedHandle> {
    let mut odds = initial?;
    let (stop_tx, stop_rx) = mpsc::channel::<()>();
    let id = match_id.to_string();

    let join = thread::spawn(move || {
        let _ = tx.send(Delta::Log(format!(
            "[INFO] Odds feed ({}) started for {id}, every {}s",
            source.label(),
            interval.as_secs_f64()
        )));
        loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    odds = source.next_odds(&odds);
                    let tick = Delta::OddsTick {
                        match_id: id.clone(),
                        odds,
                    };
                    if tx.send(tick).is_err() {
                        return;
                    }
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        let _ = tx.send(Delta::FeedStopped { match_id: id });
    });

    Some(OddsFeedHandle {
        match_id: match_id.to_string(),
        stop_tx: Some(stop_tx),
        join: Some(join),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Odds {
        Odds {
            home: 2.10,
            draw: 3.40,
            away: 3.20,
            over25: 1.85,
            under25: 1.95,
            both_teams_score: 1.75,
        }
    }

    #[test]
    fn seeded_sources_repeat() {
        let mut a = SimulatedOddsSource::seeded(7);
        let mut b = SimulatedOddsSource::seeded(7);
        assert_eq!(a.next_odds(&sample()), b.next_odds(&sample()));
    }

    #[test]
    fn goal_markets_move_less() {
        assert_eq!(market_delta(OddsMarket::Draw), 0.05);
        assert_eq!(market_delta(OddsMarket::BothTeamsScore), 0.025);
    }

    #[test]
    fn match_without_odds_spawns_nothing() {
        let (tx, _rx) = mpsc::channel();
        let handle = spawn_odds_feed(
            SimulatedOddsSource::seeded(1),
            "9",
            None,
            Duration::from_millis(5),
            tx,
        );
        assert!(handle.is_none());
    }
}
