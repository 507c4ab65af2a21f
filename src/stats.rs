use std::fmt;

use crate::state::{
    AiPrediction, BetPick, ConfidenceLevel, HeadToHeadStats, OddsMarket, RecordSplit, Side,
    TeamStats, ValueBet,
};

/// Whole-number percentage for display. A zero denominator is `NotAvailable`
/// so the view never sees NaN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Percent {
    Value(u32),
    NotAvailable,
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Percent::Value(v) => write!(f, "%{v}"),
            Percent::NotAvailable => f.write_str("N/A"),
        }
    }
}

/// `round(part / whole * 100)`, halves rounded up.
pub fn percentage(part: u32, whole: u32) -> Percent {
    if whole == 0 {
        return Percent::NotAvailable;
    }
    let ratio = f64::from(part) / f64::from(whole) * 100.0;
    Percent::Value((ratio + 0.5).floor() as u32)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamRates {
    pub win: Percent,
    pub over25: Percent,
    pub both_teams_score: Percent,
    pub clean_sheets: Percent,
}

pub fn team_rates(stats: &TeamStats) -> TeamRates {
    TeamRates {
        win: percentage(stats.won, stats.played),
        over25: percentage(stats.over25_games, stats.played),
        both_teams_score: percentage(stats.both_teams_score_games, stats.played),
        clean_sheets: percentage(stats.clean_sheets, stats.played),
    }
}

pub fn record_win_rate(record: &RecordSplit) -> Percent {
    percentage(record.won, record.played)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadToHeadRates {
    pub home_wins: Percent,
    pub draws: Percent,
    pub away_wins: Percent,
    pub over25: Percent,
    pub both_teams_score: Percent,
}

pub fn head_to_head_rates(h2h: &HeadToHeadStats) -> HeadToHeadRates {
    HeadToHeadRates {
        home_wins: percentage(h2h.home_wins, h2h.total_games),
        draws: percentage(h2h.draws, h2h.total_games),
        away_wins: percentage(h2h.away_wins, h2h.total_games),
        over25: percentage(h2h.over25_games, h2h.total_games),
        both_teams_score: percentage(h2h.both_teams_score_games, h2h.total_games),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormResult {
    Win,
    Draw,
    Loss,
}

/// Anything other than `W` or `D` counts as a loss, as the badges show it.
pub fn parse_form(form: &str) -> Vec<FormResult> {
    form.chars()
        .map(|c| match c {
            'W' => FormResult::Win,
            'D' => FormResult::Draw,
            _ => FormResult::Loss,
        })
        .collect()
}

pub fn form_win_rate(form: &str) -> Percent {
    let results = parse_form(form);
    let wins = results.iter().filter(|r| **r == FormResult::Win).count();
    percentage(wins as u32, results.len() as u32)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormBand {
    Hot,
    Steady,
    Cold,
}

pub fn form_band(form: &str) -> Option<FormBand> {
    let results = parse_form(form);
    if results.is_empty() {
        return None;
    }
    let wins = results.iter().filter(|r| **r == FormResult::Win).count();
    let rate = wins as f64 / results.len() as f64;
    Some(if rate >= 0.8 {
        FormBand::Hot
    } else if rate >= 0.6 {
        FormBand::Steady
    } else {
        FormBand::Cold
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeBreakdown {
    pub home: u32,
    pub draw: u32,
    pub away: u32,
}

/// Home/draw/away split shown next to the model pick.
pub fn outcome_breakdown(prediction: &AiPrediction) -> OutcomeBreakdown {
    let conf = prediction.confidence.min(100);
    let rest = f64::from(100 - conf);
    let home = if prediction.winner == Side::Home {
        conf
    } else {
        100 - conf
    };
    let draw = round_half_up(rest / 3.0);
    let away = if prediction.winner == Side::Away {
        conf
    } else {
        round_half_up(rest / 2.0)
    };
    OutcomeBreakdown { home, draw, away }
}

fn round_half_up(value: f64) -> u32 {
    (value + 0.5).floor() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

pub fn confidence_band(confidence: u32) -> ConfidenceBand {
    if confidence >= 70 {
        ConfidenceBand::High
    } else if confidence >= 50 {
        ConfidenceBand::Medium
    } else {
        ConfidenceBand::Low
    }
}

/// Risk reads inversely to model confidence.
pub fn risk_label(confidence: u32) -> &'static str {
    match confidence_band(confidence) {
        ConfidenceBand::High => "Düşük",
        ConfidenceBand::Medium => "Orta",
        ConfidenceBand::Low => "Yüksek",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OddsBand {
    Strong,
    Good,
    Fair,
    Long,
}

pub fn odds_band(odds: f64) -> OddsBand {
    if odds <= 1.5 {
        OddsBand::Strong
    } else if odds <= 2.0 {
        OddsBand::Good
    } else if odds <= 3.0 {
        OddsBand::Fair
    } else {
        OddsBand::Long
    }
}

/// Price the model considers fair for a flagged value bet.
pub fn fair_odds(bet: &ValueBet) -> f64 {
    bet.odds - bet.odds * f64::from(bet.value) / 100.0
}

pub fn pick_label(pick: BetPick) -> &'static str {
    match pick {
        BetPick::Home => "1 (Ev Sahibi Kazanır)",
        BetPick::Draw => "X (Beraberlik)",
        BetPick::Away => "2 (Deplasman Kazanır)",
        BetPick::Over25 => "Üst 2.5 Gol",
        BetPick::Under25 => "Alt 2.5 Gol",
        BetPick::BothTeamsScore => "İki Takım da Gol Atar",
        BetPick::OneSideScores => "Tek Taraf Gol",
    }
}

/// Short code for the compose hint; priced picks share their market's code.
pub fn pick_code(pick: BetPick) -> &'static str {
    pick.market().map(OddsMarket::code).unwrap_or("TT")
}

pub fn confidence_label(level: ConfidenceLevel) -> &'static str {
    match level {
        ConfidenceLevel::VeryHigh => "Çok Yüksek (%80+)",
        ConfidenceLevel::High => "Yüksek (%60-80)",
        ConfidenceLevel::Medium => "Orta (%40-60)",
        ConfidenceLevel::Low => "Düşük (%20-40)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::GoalsPrediction;

    fn prediction(winner: Side, confidence: u32) -> AiPrediction {
        AiPrediction {
            winner,
            confidence,
            score_prediction: "1-0".to_string(),
            goals_prediction: GoalsPrediction {
                over25: 50,
                under25: 50,
                both_teams_score: 50,
            },
            recommendations: Vec::new(),
        }
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(14, 20), Percent::Value(70));
        assert_eq!(percentage(0, 20), Percent::Value(0));
        assert_eq!(percentage(1, 8), Percent::Value(13));
        assert_eq!(percentage(2, 3), Percent::Value(67));
        assert_eq!(percentage(3, 0), Percent::NotAvailable);
    }

    #[test]
    fn percent_display() {
        assert_eq!(percentage(13, 20).to_string(), "%65");
        assert_eq!(percentage(1, 0).to_string(), "N/A");
    }

    #[test]
    fn form_rates() {
        assert_eq!(form_win_rate("WWDWL"), Percent::Value(60));
        assert_eq!(form_win_rate(""), Percent::NotAvailable);
        assert_eq!(form_band("WWWWD"), Some(FormBand::Hot));
        assert_eq!(form_band("WLWWW"), Some(FormBand::Hot));
        assert_eq!(form_band("WDWLW"), Some(FormBand::Steady));
        assert_eq!(form_band("LLDWW"), Some(FormBand::Cold));
        assert_eq!(form_band(""), None);
    }

    #[test]
    fn breakdown_for_home_pick() {
        let out = outcome_breakdown(&prediction(Side::Home, 68));
        assert_eq!(out, OutcomeBreakdown { home: 68, draw: 11, away: 16 });
        assert_eq!(risk_label(68), "Orta");
    }

    #[test]
    fn breakdown_for_away_pick() {
        let out = outcome_breakdown(&prediction(Side::Away, 75));
        assert_eq!(out, OutcomeBreakdown { home: 25, draw: 8, away: 75 });
        assert_eq!(risk_label(75), "Düşük");
        assert_eq!(risk_label(40), "Yüksek");
    }

    #[test]
    fn odds_bands_follow_thresholds() {
        assert_eq!(odds_band(1.5), OddsBand::Strong);
        assert_eq!(odds_band(1.85), OddsBand::Good);
        assert_eq!(odds_band(2.0), OddsBand::Good);
        assert_eq!(odds_band(3.0), OddsBand::Fair);
        assert_eq!(odds_band(4.5), OddsBand::Long);
    }

    #[test]
    fn fair_odds_discounts_by_value() {
        let bet = ValueBet {
            market: "Üst 3.5 Gol".to_string(),
            odds: 2.40,
            value: 8,
            confidence: 65,
        };
        assert!((fair_odds(&bet) - 2.208).abs() < 1e-9);
    }

    #[test]
    fn priced_picks_share_market_codes() {
        for pick in BetPick::ALL {
            match pick.market() {
                Some(market) => assert_eq!(pick_code(pick), market.code()),
                None => assert_eq!(pick_code(pick), "TT"),
            }
        }
        assert_eq!(pick_code(BetPick::Over25), "Ü2.5");
        assert_eq!(pick_label(BetPick::OneSideScores), "Tek Taraf Gol");
        assert_eq!(confidence_label(ConfidenceLevel::High), "Yüksek (%60-80)");
    }
}
