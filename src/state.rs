use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::fixtures::FixtureStore;
use crate::search::{self, LeagueFilter, SearchableItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Upcoming,
    Live,
    Finished,
}

/// Decimal prices for the six markets shown on every bulletin row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Odds {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
    pub over25: f64,
    pub under25: f64,
    pub both_teams_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OddsMarket {
    Home,
    Draw,
    Away,
    Over25,
    Under25,
    BothTeamsScore,
}

impl OddsMarket {
    pub const ALL: [OddsMarket; 6] = [
        OddsMarket::Home,
        OddsMarket::Draw,
        OddsMarket::Away,
        OddsMarket::Over25,
        OddsMarket::Under25,
        OddsMarket::BothTeamsScore,
    ];

    pub fn is_result_market(self) -> bool {
        matches!(self, OddsMarket::Home | OddsMarket::Draw | OddsMarket::Away)
    }

    /// Short code shown in table headers, tickers and pick chips.
    pub fn code(self) -> &'static str {
        match self {
            OddsMarket::Home => "1",
            OddsMarket::Draw => "X",
            OddsMarket::Away => "2",
            OddsMarket::Over25 => "Ü2.5",
            OddsMarket::Under25 => "A2.5",
            OddsMarket::BothTeamsScore => "KG",
        }
    }
}

impl Odds {
    pub fn get(&self, market: OddsMarket) -> f64 {
        match market {
            OddsMarket::Home => self.home,
            OddsMarket::Draw => self.draw,
            OddsMarket::Away => self.away,
            OddsMarket::Over25 => self.over25,
            OddsMarket::Under25 => self.under25,
            OddsMarket::BothTeamsScore => self.both_teams_score,
        }
    }

    pub fn set(&mut self, market: OddsMarket, value: f64) {
        match market {
            OddsMarket::Home => self.home = value,
            OddsMarket::Draw => self.draw = value,
            OddsMarket::Away => self.away = value,
            OddsMarket::Over25 => self.over25 = value,
            OddsMarket::Under25 => self.under25 = value,
            OddsMarket::BothTeamsScore => self.both_teams_score = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    pub home_team_logo: String,
    pub away_team_logo: String,
    pub kickoff_time: String,
    pub league: String,
    pub stadium: String,
    pub slug: String,
    pub status: MatchStatus,
    #[serde(default)]
    pub odds: Option<Odds>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSplit {
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub avg_goals_for: f64,
    pub avg_goals_against: f64,
    pub clean_sheets: u32,
    pub failed_to_score: u32,
    pub over25_games: u32,
    pub under25_games: u32,
    pub both_teams_score_games: u32,
    #[serde(default)]
    pub home_record: Option<RecordSplit>,
    #[serde(default)]
    pub away_record: Option<RecordSplit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentGame {
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    pub score: String,
    pub competition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadToHeadStats {
    pub total_games: u32,
    pub home_wins: u32,
    pub draws: u32,
    pub away_wins: u32,
    pub avg_goals: f64,
    pub over25_games: u32,
    pub both_teams_score_games: u32,
    pub recent_games: Vec<RecentGame>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Draw,
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Bet,
    Avoid,
    Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub market: String,
    pub description: String,
    pub confidence: u32,
    pub reasoning: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalsPrediction {
    pub over25: u32,
    pub under25: u32,
    pub both_teams_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiPrediction {
    pub winner: Side,
    pub confidence: u32,
    pub score_prediction: String,
    pub goals_prediction: GoalsPrediction,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStatistics {
    pub home_stats: TeamStats,
    pub away_stats: TeamStats,
    pub head_to_head: HeadToHeadStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InjurySeverity {
    Minor,
    Major,
    Doubtful,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInjury {
    pub name: String,
    pub position: String,
    pub severity: InjurySeverity,
    #[serde(default)]
    pub expected_return: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSuspension {
    pub name: String,
    pub position: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherInfo {
    pub condition: String,
    pub temperature: i32,
    pub humidity: u32,
    pub wind_speed: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveData {
    pub home_form: String,
    pub away_form: String,
    pub injuries: Vec<PlayerInjury>,
    pub suspensions: Vec<PlayerSuspension>,
    #[serde(default)]
    pub weather: Option<WeatherInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub user: String,
    pub avatar: String,
    pub content: String,
    pub timestamp: String,
    pub likes: u32,
    #[serde(default)]
    pub prediction: Option<String>,
    #[serde(default)]
    pub confidence: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularBet {
    pub market: String,
    pub percentage: u32,
    pub volume: String,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueBet {
    pub market: String,
    pub odds: f64,
    pub value: u32,
    pub confidence: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpertPick {
    pub expert: String,
    pub prediction: String,
    pub confidence: u32,
    pub followers: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetVolume {
    pub home: u32,
    pub draw: u32,
    pub away: u32,
    pub over25: u32,
    pub under25: u32,
    pub both_teams_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidePair {
    pub home: u32,
    pub away: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveStats {
    pub possession: SidePair,
    pub shots: SidePair,
    pub shots_on_target: SidePair,
    pub corners: SidePair,
    pub fouls: SidePair,
    pub yellow_cards: SidePair,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentiment {
    pub platform: String,
    pub positive: u32,
    pub negative: u32,
    pub neutral: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialPulse {
    pub sentiment: Vec<Sentiment>,
    pub hashtags: Vec<String>,
}

/// Betting-tab material that accompanies an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketBoard {
    pub popular_bets: Vec<PopularBet>,
    pub value_bets: Vec<ValueBet>,
    pub bet_volume: BetVolume,
    pub expert_predictions: Vec<ExpertPick>,
    pub live_stats: LiveStats,
    pub social: SocialPulse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchAnalysis {
    pub id: String,
    #[serde(rename = "match")]
    pub fixture: Match,
    pub ai_prediction: AiPrediction,
    pub statistics: MatchStatistics,
    pub live_data: LiveData,
    pub expert_analysis: String,
    pub user_comments: Vec<Comment>,
    #[serde(default)]
    pub market_board: Option<MarketBoard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBulletin {
    pub date: String,
    pub matches: Vec<Match>,
    pub featured_matches: Vec<String>,
    pub total_matches: u32,
}

impl DailyBulletin {
    pub fn is_featured(&self, match_id: &str) -> bool {
        self.featured_matches.iter().any(|id| id == match_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreviewMetrics {
    #[serde(rename = "homeXG")]
    pub home_xg: f64,
    #[serde(rename = "awayXG")]
    pub away_xg: f64,
    #[serde(rename = "homePossession")]
    pub home_possession: u32,
    #[serde(rename = "awayPossession")]
    pub away_possession: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPreview {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub published_at: String,
    #[serde(rename = "match")]
    pub fixture: Match,
    pub metrics: PreviewMetrics,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub published_at: String,
    pub featured_image: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub league: String,
    pub recent_form: String,
    pub position: u32,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Bulletin,
    Analysis { match_id: String },
    Search,
    Previews,
    News,
    Teams,
    Tags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisTab {
    Overview,
    Prediction,
    Betting,
    Live,
    Stats,
    HeadToHead,
    Social,
    Comments,
}

impl AnalysisTab {
    pub const ALL: [AnalysisTab; 8] = [
        AnalysisTab::Overview,
        AnalysisTab::Prediction,
        AnalysisTab::Betting,
        AnalysisTab::Live,
        AnalysisTab::Stats,
        AnalysisTab::HeadToHead,
        AnalysisTab::Social,
        AnalysisTab::Comments,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Pick attached to a locally composed comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetPick {
    Home,
    Draw,
    Away,
    Over25,
    Under25,
    BothTeamsScore,
    OneSideScores,
}

impl BetPick {
    pub const ALL: [BetPick; 7] = [
        BetPick::Home,
        BetPick::Draw,
        BetPick::Away,
        BetPick::Over25,
        BetPick::Under25,
        BetPick::BothTeamsScore,
        BetPick::OneSideScores,
    ];

    /// Priced market behind the pick. One-side-scores has no column in the bulletin.
    pub fn market(self) -> Option<OddsMarket> {
        match self {
            BetPick::Home => Some(OddsMarket::Home),
            BetPick::Draw => Some(OddsMarket::Draw),
            BetPick::Away => Some(OddsMarket::Away),
            BetPick::Over25 => Some(OddsMarket::Over25),
            BetPick::Under25 => Some(OddsMarket::Under25),
            BetPick::BothTeamsScore => Some(OddsMarket::BothTeamsScore),
            BetPick::OneSideScores => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceLevel {
    VeryHigh,
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub const ALL: [ConfidenceLevel; 4] = [
        ConfidenceLevel::VeryHigh,
        ConfidenceLevel::High,
        ConfidenceLevel::Medium,
        ConfidenceLevel::Low,
    ];
}

/// Steps `current` through `all`, wrapping back to nothing after the last entry.
fn cycle_option<T: Copy + PartialEq>(current: Option<T>, all: &[T]) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(current) => {
            let idx = all.iter().position(|p| *p == current).unwrap_or(0);
            all.get(idx + 1).copied()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentDraft {
    pub text: String,
    pub pick: Option<BetPick>,
    pub confidence: Option<ConfidenceLevel>,
}

impl CommentDraft {
    pub fn cycle_pick(&mut self) {
        self.pick = cycle_option(self.pick, &BetPick::ALL);
    }

    pub fn cycle_confidence(&mut self) {
        self.confidence = cycle_option(self.confidence, &ConfidenceLevel::ALL);
    }
}

pub const LOCAL_COMMENT_USER: &str = "Misafir";

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub fixtures: FixtureStore,
    pub league_filter: LeagueFilter,
    pub selected: usize,
    pub list_selected: usize,
    pub analysis_tab: AnalysisTab,
    pub live_odds: Option<Odds>,
    pub odds_ticks: u64,
    pub search_query: String,
    pub search_selected: usize,
    pub comment_draft: Option<CommentDraft>,
    pub local_comment_seq: u32,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl AppState {
    pub fn new(fixtures: FixtureStore) -> Self {
        Self {
            screen: Screen::Bulletin,
            fixtures,
            league_filter: LeagueFilter::All,
            selected: 0,
            list_selected: 0,
            analysis_tab: AnalysisTab::Overview,
            live_odds: None,
            odds_ticks: 0,
            search_query: String::new(),
            search_selected: 0,
            comment_draft: None,
            local_comment_seq: 0,
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn filtered_matches(&self) -> Vec<&Match> {
        search::filter_by_league(&self.league_filter, &self.fixtures.bulletin.matches)
    }

    pub fn leagues(&self) -> Vec<&str> {
        search::leagues(&self.fixtures.bulletin.matches)
    }

    pub fn selected_match(&self) -> Option<&Match> {
        self.filtered_matches().get(self.selected).copied()
    }

    /// All, then each league in first-appearance order, wrapping around.
    pub fn cycle_league_filter(&mut self) {
        let leagues = self.leagues();
        let next = match &self.league_filter {
            LeagueFilter::All => leagues.first().map(|l| LeagueFilter::league(*l)),
            LeagueFilter::League(current) => leagues
                .iter()
                .position(|l| *l == current.as_str())
                .and_then(|idx| leagues.get(idx + 1))
                .map(|l| LeagueFilter::league(*l)),
        };
        self.league_filter = next.unwrap_or(LeagueFilter::All);
        self.selected = 0;
        self.push_log(format!("[INFO] League filter: {}", self.league_filter.label()));
    }

    pub fn select_next(&mut self) {
        let total = self.current_list_len();
        let cursor = self.cursor_mut();
        if total == 0 {
            *cursor = 0;
            return;
        }
        *cursor = (*cursor + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let total = self.current_list_len();
        let cursor = self.cursor_mut();
        if total == 0 {
            *cursor = 0;
            return;
        }
        if *cursor == 0 {
            *cursor = total - 1;
        } else {
            *cursor -= 1;
        }
    }

    fn current_list_len(&self) -> usize {
        match &self.screen {
            Screen::Bulletin => self.filtered_matches().len(),
            Screen::Search => self.search_results().len(),
            Screen::Previews => self.fixtures.previews.len(),
            Screen::News => self.fixtures.articles.len(),
            Screen::Teams => self.fixtures.teams.len(),
            Screen::Tags => self.fixtures.trending_tags.len(),
            Screen::Analysis { .. } => 0,
        }
    }

    fn cursor_mut(&mut self) -> &mut usize {
        match self.screen {
            Screen::Bulletin => &mut self.selected,
            Screen::Search => &mut self.search_selected,
            _ => &mut self.list_selected,
        }
    }

    pub fn open_selected_match(&mut self) -> Option<String> {
        let m = self.selected_match()?;
        let match_id = m.id.clone();
        let odds = m.odds;
        self.screen = Screen::Analysis {
            match_id: match_id.clone(),
        };
        self.analysis_tab = AnalysisTab::Overview;
        self.live_odds = odds;
        self.odds_ticks = 0;
        self.comment_draft = None;
        Some(match_id)
    }

    pub fn back_to_bulletin(&mut self) {
        self.screen = Screen::Bulletin;
        self.live_odds = None;
        self.comment_draft = None;
    }

    pub fn open_list(&mut self, screen: Screen) {
        self.screen = screen;
        self.list_selected = 0;
        self.live_odds = None;
        self.comment_draft = None;
    }

    pub fn analysis_match_id(&self) -> Option<&str> {
        match &self.screen {
            Screen::Analysis { match_id } => Some(match_id.as_str()),
            _ => None,
        }
    }

    pub fn current_analysis(&self) -> Option<&MatchAnalysis> {
        self.analysis_match_id()
            .and_then(|id| self.fixtures.analysis_for(id))
    }

    pub fn cycle_tab_next(&mut self) {
        self.analysis_tab = self.analysis_tab.next();
    }

    pub fn cycle_tab_prev(&mut self) {
        self.analysis_tab = self.analysis_tab.prev();
    }

    pub fn searchable_items(&self) -> Vec<SearchableItem> {
        search::searchable_items(&self.fixtures.previews, &self.fixtures.articles)
    }

    pub fn search_results(&self) -> Vec<SearchableItem> {
        search::search(&self.search_query, &self.searchable_items())
    }

    pub fn open_search(&mut self) {
        self.screen = Screen::Search;
        self.search_selected = 0;
        self.live_odds = None;
        self.comment_draft = None;
    }

    /// Jumps from the trending-tags list into a search for the selected tag.
    pub fn search_selected_tag(&mut self) -> bool {
        let Some(tag) = self.fixtures.trending_tags.get(self.list_selected).cloned() else {
            return false;
        };
        self.open_search();
        self.search_query = tag;
        true
    }

    pub fn search_push(&mut self, ch: char) {
        self.search_query.push(ch);
        self.search_selected = 0;
    }

    pub fn search_pop(&mut self) {
        self.search_query.pop();
        self.search_selected = 0;
    }

    pub fn start_comment(&mut self) {
        if self.current_analysis().is_some() {
            self.comment_draft = Some(CommentDraft::default());
        }
    }

    /// Appends the draft to the open analysis. Local only; nothing is persisted.
    pub fn submit_comment(&mut self, timestamp: String) -> bool {
        let Some(draft) = self.comment_draft.take() else {
            return false;
        };
        let text = draft.text.trim();
        if text.is_empty() {
            self.push_log("[WARN] Empty comment ignored");
            return false;
        }
        let Some(match_id) = self.analysis_match_id().map(str::to_string) else {
            return false;
        };
        self.local_comment_seq += 1;
        let comment = Comment {
            id: format!("local-{}", self.local_comment_seq),
            user: LOCAL_COMMENT_USER.to_string(),
            avatar: String::new(),
            content: text.to_string(),
            timestamp,
            likes: 0,
            prediction: draft.pick.map(|p| crate::stats::pick_label(p).to_string()),
            confidence: draft
                .confidence
                .map(|c| crate::stats::confidence_label(c).to_string()),
        };
        let Some(analysis) = self.fixtures.analysis_for_mut(&match_id) else {
            return false;
        };
        analysis.user_comments.push(comment);
        self.push_log("[INFO] Comment posted");
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Delta {
    OddsTick { match_id: String, odds: Odds },
    FeedStopped { match_id: String },
    Log(String),
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::OddsTick { match_id, odds } => {
            // Ticks can still be in the channel after the view closed.
            if state.analysis_match_id() != Some(match_id.as_str()) {
                return;
            }
            if state.live_odds.is_none() {
                return;
            }
            state.live_odds = Some(odds);
            state.odds_ticks += 1;
        }
        Delta::FeedStopped { match_id } => {
            state.push_log(format!("[INFO] Odds feed stopped for {match_id}"));
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
