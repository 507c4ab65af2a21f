use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::{FixedOffset, SecondsFormat, Utc};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap};

use match_trends::fixtures::{self, FixtureStore};
use match_trends::format::{
    display_offset_from_env, format_date, format_date_long, format_date_short, format_odds,
    format_time,
};
use match_trends::odds_feed::{self, OddsFeedHandle, SimulatedOddsSource};
use match_trends::persist::{FilePrefs, MemoryPrefs, PreferenceStore};
use match_trends::search::{ItemKind, LeagueFilter, league_count};
use match_trends::state::{
    AnalysisTab, AppState, Delta, InjurySeverity, Match, MatchAnalysis, Odds, OddsMarket,
    RecommendationKind, RecordSplit, Screen, Side, TeamStats, Trend, apply_delta,
};
use match_trends::stats::{
    self, FormBand, FormResult, OddsBand, confidence_label, fair_odds, form_band,
    head_to_head_rates, outcome_breakdown, parse_form, pick_code, pick_label, record_win_rate,
    risk_label, team_rates,
};
use match_trends::theme::{Palette, ThemeFlag};

const QUICK_STATS: [(&str, &str); 4] = [
    ("Başarılı Tahmin", "78%"),
    ("Günlük Analiz", "25+"),
    ("Aktif Kullanıcı", "15K+"),
    ("Uzman Puanı", "4.8"),
];

const QUICK_COUNT_LEAGUES: [&str; 3] = ["Süper Lig", "Premier League", "La Liga"];

struct App {
    state: AppState,
    should_quit: bool,
    theme: ThemeFlag,
    prefs: Box<dyn PreferenceStore>,
    display_offset: FixedOffset,
    tick_interval: Duration,
    delta_tx: mpsc::Sender<Delta>,
    feed: Option<OddsFeedHandle>,
    scroll: u16,
}

impl App {
    fn new(
        fixtures: FixtureStore,
        prefs: Box<dyn PreferenceStore>,
        delta_tx: mpsc::Sender<Delta>,
    ) -> Self {
        let mut state = AppState::new(fixtures);
        let (theme, prefs_err) = ThemeFlag::load(prefs.as_ref());
        if let Some(err) = prefs_err {
            state.push_log(format!("[WARN] Preferences unreadable: {err:#}"));
        }
        Self {
            state,
            should_quit: false,
            theme,
            prefs,
            display_offset: display_offset_from_env(),
            tick_interval: odds_feed::tick_interval_from_env(),
            delta_tx,
            feed: None,
            scroll: 0,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.state.comment_draft.is_some() {
            self.on_compose_key(key);
            return;
        }
        if matches!(self.state.screen, Screen::Search) {
            self.on_search_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Char('t') | KeyCode::Char('T') => self.toggle_theme(),
            KeyCode::Char('/') => self.navigate(Screen::Search),
            KeyCode::Char('1') => self.navigate(Screen::Bulletin),
            KeyCode::Char('2') => self.navigate(Screen::Previews),
            KeyCode::Char('3') => self.navigate(Screen::News),
            KeyCode::Char('4') => self.navigate(Screen::Teams),
            KeyCode::Char('5') => self.navigate(Screen::Tags),
            KeyCode::Char('b') | KeyCode::Esc => self.navigate(Screen::Bulletin),
            _ => match self.state.screen {
                Screen::Bulletin => self.on_bulletin_key(key),
                Screen::Analysis { .. } => self.on_analysis_key(key),
                Screen::Tags => self.on_tags_key(key),
                _ => self.on_list_key(key),
            },
        }
    }

    fn on_bulletin_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('l') | KeyCode::Char('L') => self.state.cycle_league_filter(),
            KeyCode::Char('d') | KeyCode::Enter => self.open_analysis(),
            _ => {}
        }
    }

    fn on_analysis_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                self.state.cycle_tab_next();
                self.scroll = 0;
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.state.cycle_tab_prev();
                self.scroll = 0;
            }
            KeyCode::Char('j') | KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Char('c') | KeyCode::Char('C') => {
                if self.state.current_analysis().is_none() {
                    self.state.push_log("[INFO] No analysis to comment on");
                    return;
                }
                self.state.analysis_tab = AnalysisTab::Comments;
                self.scroll = 0;
                self.state.start_comment();
            }
            _ => {}
        }
    }

    fn on_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            _ => {}
        }
    }

    fn on_tags_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                if !self.state.search_selected_tag() {
                    self.state.push_log("[INFO] No tag selected");
                }
            }
            _ => self.on_list_key(key),
        }
    }

    fn on_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.navigate(Screen::Bulletin),
            KeyCode::Down => self.state.select_next(),
            KeyCode::Up => self.state.select_prev(),
            KeyCode::Backspace => self.state.search_pop(),
            KeyCode::Char(ch) => self.state.search_push(ch),
            _ => {}
        }
    }

    fn on_compose_key(&mut self, key: KeyEvent) {
        let Some(draft) = self.state.comment_draft.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.state.comment_draft = None;
                self.state.push_log("[INFO] Comment discarded");
            }
            KeyCode::Enter => {
                let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
                self.state.submit_comment(timestamp);
            }
            KeyCode::Tab => draft.cycle_pick(),
            KeyCode::BackTab => draft.cycle_confidence(),
            KeyCode::Backspace => {
                draft.text.pop();
            }
            KeyCode::Char(ch) => draft.text.push(ch),
            _ => {}
        }
    }

    fn navigate(&mut self, screen: Screen) {
        self.stop_feed();
        self.scroll = 0;
        match screen {
            Screen::Bulletin => self.state.back_to_bulletin(),
            Screen::Search => self.state.open_search(),
            Screen::Analysis { .. } => self.open_analysis(),
            other => self.state.open_list(other),
        }
    }

    fn open_analysis(&mut self) {
        self.stop_feed();
        let Some(match_id) = self.state.open_selected_match() else {
            self.state.push_log("[INFO] No match selected");
            return;
        };
        self.scroll = 0;
        if self.state.current_analysis().is_none() {
            self.state
                .push_log(format!("[INFO] No analysis published for match {match_id}"));
        }
        self.feed = odds_feed::spawn_odds_feed(
            SimulatedOddsSource::from_env(),
            &match_id,
            self.state.live_odds,
            self.tick_interval,
            self.delta_tx.clone(),
        );
        if self.feed.is_none() {
            self.state
                .push_log(format!("[INFO] Match {match_id} has no odds; feed not started"));
        }
    }

    fn stop_feed(&mut self) {
        if let Some(feed) = self.feed.take() {
            feed.stop();
        }
    }

    fn toggle_theme(&mut self) {
        match self.theme.toggle(self.prefs.as_mut()) {
            Ok(()) => self
                .state
                .push_log(format!("[INFO] Theme: {}", self.theme.label())),
            Err(err) => self
                .state
                .push_log(format!("[WARN] Theme not saved: {err:#}")),
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let (fixtures, fixture_warning) =
        fixtures::load().map_err(|err| io::Error::other(format!("{err:#}")))?;
    let prefs: Box<dyn PreferenceStore> = match FilePrefs::from_env() {
        Some(store) => Box::new(store),
        None => Box::new(MemoryPrefs::default()),
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let mut app = App::new(fixtures, prefs, tx);
    if let Some(warning) = fixture_warning {
        app.state.push_log(warning);
    }
    let res = run_app(&mut terminal, &mut app, rx);
    app.stop_feed();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Everything a renderer needs besides the frame.
struct View<'a> {
    state: &'a AppState,
    palette: Palette,
    offset: FixedOffset,
}

fn ui(frame: &mut Frame, app: &App) {
    let view = View {
        state: &app.state,
        palette: app.theme.palette(),
        offset: app.display_offset,
    };
    frame.render_widget(Block::default().style(view.palette.base()), frame.size());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&view, &app.theme))
        .style(view.palette.heading())
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match &app.state.screen {
        Screen::Bulletin => render_bulletin(frame, chunks[1], &view),
        Screen::Analysis { match_id } => render_analysis(frame, chunks[1], &view, match_id, app.scroll),
        Screen::Search => render_search(frame, chunks[1], &view),
        Screen::Previews => render_previews(frame, chunks[1], &view),
        Screen::News => render_news(frame, chunks[1], &view),
        Screen::Teams => render_teams(frame, chunks[1], &view),
        Screen::Tags => render_tags(frame, chunks[1], &view),
    }

    let console = Paragraph::new(console_text(&app.state))
        .style(view.palette.muted())
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state))
        .style(view.palette.muted())
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size(), &view.palette);
    }
}

fn header_text(view: &View, theme: &ThemeFlag) -> String {
    let title = match &view.state.screen {
        Screen::Bulletin => format!(
            "Günlük Bülten | Lig: {}",
            view.state.league_filter.label()
        ),
        Screen::Analysis { .. } => "Maç Analizi".to_string(),
        Screen::Search => "Arama".to_string(),
        Screen::Previews => "Maç Önizlemeleri".to_string(),
        Screen::News => "Son Haberler".to_string(),
        Screen::Teams => "Takımlar".to_string(),
        Screen::Tags => "Trend Etiketler".to_string(),
    };
    let line1 = format!("  .-.  MATCH TRENDS | {title} | Tema: {}", theme.label());
    let line2 = " ( o ) Maç öncesi analiz, form ve oranlar".to_string();
    format!("{line1}\n{line2}")
}

fn footer_text(state: &AppState) -> String {
    if state.comment_draft.is_some() {
        return "Yaz | Tab Tahmin | Shift+Tab Güven | Enter Gönder | Esc Vazgeç".to_string();
    }
    match state.screen {
        Screen::Bulletin => {
            "j/k Seç | l Lig | Enter/d Analiz | / Ara | 2-5 Bölümler | t Tema | ? Yardım | q Çıkış"
                .to_string()
        }
        Screen::Analysis { .. } => {
            "Tab/←/→ Sekme | j/k Kaydır | c Yorum | b/Esc Bülten | t Tema | ? Yardım | q Çıkış"
                .to_string()
        }
        Screen::Search => "Yaz Ara | ↑/↓ Seç | Backspace Sil | Esc Bülten".to_string(),
        Screen::Tags => "j/k Seç | Enter Etiketi ara | 1 Bülten | b/Esc Geri | q Çıkış".to_string(),
        _ => "j/k Seç | 1 Bülten | / Ara | b/Esc Geri | t Tema | q Çıkış".to_string(),
    }
}

fn render_bulletin(frame: &mut Frame, area: Rect, view: &View) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(area);

    let bulletin = &view.state.fixtures.bulletin;
    let summary = vec![
        Line::from(format!(
            "{} • {} maç",
            format_date_long(&bulletin.date, view.offset),
            bulletin.total_matches
        )),
        league_chips(view),
    ];
    let summary = Paragraph::new(summary)
        .block(Block::default().title("Günlük Bülten").borders(Borders::ALL));
    frame.render_widget(summary, sections[0]);

    let widths = bulletin_columns();
    render_bulletin_header(frame, sections[1], &widths);

    let list_area = sections[2];
    let filtered = view.state.filtered_matches();
    if filtered.is_empty() {
        let empty = Paragraph::new("Bu ligde maç bulunamadı").style(view.palette.muted());
        frame.render_widget(empty, list_area);
    } else if list_area.height > 0 {
        let visible = list_area.height as usize;
        let (start, end) = visible_range(view.state.selected, filtered.len(), visible);
        for (i, idx) in (start..end).enumerate() {
            let row_area = Rect {
                x: list_area.x,
                y: list_area.y + i as u16,
                width: list_area.width,
                height: 1,
            };
            let selected = idx == view.state.selected;
            let row_style = if selected {
                view.palette.selected()
            } else {
                Style::default()
            };
            if selected {
                frame.render_widget(Block::default().style(row_style), row_area);
            }
            render_bulletin_row(frame, row_area, &widths, filtered[idx], view, row_style);
        }
    }

    let mut counts: Vec<String> = QUICK_COUNT_LEAGUES
        .iter()
        .map(|league| format!("{league}: {}", league_count(league, &bulletin.matches)))
        .collect();
    counts.push(format!("Öne Çıkan: {}", bulletin.featured_matches.len()));
    let quick_stats = QUICK_STATS
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join(" | ");
    let footer = Paragraph::new(vec![Line::from(counts.join(" | ")), Line::from(quick_stats)])
        .block(Block::default().title("Hızlı İstatistikler").borders(Borders::ALL));
    frame.render_widget(footer, sections[3]);
}

/// "Tümü" carries the bulletin's day total; league chips count listed matches.
fn league_chip_counts(state: &AppState) -> Vec<(LeagueFilter, usize)> {
    let bulletin = &state.fixtures.bulletin;
    let mut chips = vec![(LeagueFilter::All, bulletin.total_matches as usize)];
    chips.extend(
        state
            .leagues()
            .into_iter()
            .map(|league| (LeagueFilter::league(league), league_count(league, &bulletin.matches))),
    );
    chips
}

fn league_chips(view: &View) -> Line<'static> {
    let mut spans = Vec::new();
    for (filter, count) in league_chip_counts(view.state) {
        let active = filter == view.state.league_filter;
        let text = format!(" {} ({count}) ", filter.label());
        let style = if active {
            view.palette.heading().add_modifier(Modifier::REVERSED)
        } else {
            view.palette.muted()
        };
        spans.push(Span::styled(text, style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn bulletin_columns() -> [Constraint; 10] {
    [
        Constraint::Length(7),
        Constraint::Length(16),
        Constraint::Min(28),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(2),
    ]
}

fn render_bulletin_header(frame: &mut Frame, area: Rect, widths: &[Constraint]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(area);
    let style = Style::default().add_modifier(Modifier::BOLD);
    let titles = ["Saat", "Lig", "Maç"]
        .into_iter()
        .chain(OddsMarket::ALL.map(OddsMarket::code))
        .chain(["★"]);
    for (col, title) in cols.iter().zip(titles) {
        render_cell_text(frame, *col, title, style);
    }
}

/// One cell per market; an unpriced match shows a dash in every column.
fn bulletin_odds_cells(m: &Match) -> [String; 6] {
    OddsMarket::ALL.map(|market| {
        m.odds
            .map(|odds| format_odds(odds.get(market)))
            .unwrap_or_else(|| "-".to_string())
    })
}

fn render_bulletin_row(
    frame: &mut Frame,
    area: Rect,
    widths: &[Constraint],
    m: &Match,
    view: &View,
    style: Style,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(area);

    render_cell_text(frame, cols[0], &format_time(&m.kickoff_time, view.offset), style);
    render_cell_text(frame, cols[1], &m.league, style);
    render_cell_text(frame, cols[2], &format!("{} - {}", m.home_team, m.away_team), style);
    for (offset, text) in bulletin_odds_cells(m).iter().enumerate() {
        render_cell_text(frame, cols[3 + offset], text, style);
    }
    if view.state.fixtures.bulletin.is_featured(&m.id) {
        render_cell_text(
            frame,
            cols[9],
            "★",
            style.fg(view.palette.warning),
        );
    }
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let text_area = Rect {
        x: area.x,
        y: area.y + (area.height / 2),
        width: area.width,
        height: 1,
    };
    let paragraph = Paragraph::new(text.to_string()).style(style);
    frame.render_widget(paragraph, text_area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

type TabRenderer = fn(&MatchAnalysis, &View<'_>) -> Vec<Line<'static>>;

/// Tab order, title and renderer; indexed by `AnalysisTab::index`.
const ANALYSIS_TABS: [(AnalysisTab, &str, TabRenderer); 8] = [
    (AnalysisTab::Overview, "Genel Bakış", overview_lines),
    (AnalysisTab::Prediction, "AI Tahminleri", prediction_lines),
    (AnalysisTab::Betting, "Bahis Analizi", betting_lines),
    (AnalysisTab::Live, "Canlı Veriler", live_lines),
    (AnalysisTab::Stats, "İstatistikler", stats_lines),
    (AnalysisTab::HeadToHead, "Karşılıklı", head_to_head_lines),
    (AnalysisTab::Social, "Sosyal Analiz", social_lines),
    (AnalysisTab::Comments, "Yorumlar", comment_lines),
];

fn tab_entry(tab: AnalysisTab) -> (&'static str, TabRenderer) {
    let (_, title, render) = ANALYSIS_TABS[tab.index()];
    (title, render)
}

fn render_analysis(frame: &mut Frame, area: Rect, view: &View, match_id: &str, scroll: u16) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    let analysis = view.state.current_analysis();
    let fixture = analysis.map(|a| &a.fixture).or_else(|| {
        view.state
            .fixtures
            .bulletin
            .matches
            .iter()
            .find(|m| m.id == match_id)
    });

    let mut header = Vec::new();
    if let Some(m) = fixture {
        header.push(Line::styled(
            format!("{} vs {}", m.home_team, m.away_team),
            view.palette.heading(),
        ));
        header.push(Line::from(format!(
            "{} • {} • {} {}",
            m.league,
            m.stadium,
            format_date(&m.kickoff_time, view.offset),
            format_time(&m.kickoff_time, view.offset)
        )));
    }
    header.push(match view.state.live_odds {
        Some(odds) => Line::from(format!(
            "{}  (simülasyon, {} güncelleme)",
            odds_summary(&odds),
            view.state.odds_ticks
        )),
        None => Line::styled("Oran bilgisi yok", view.palette.muted()),
    });
    let header = Paragraph::new(header).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, sections[0]);

    let Some(analysis) = analysis else {
        let empty = Paragraph::new("Bu maç için henüz analiz yayınlanmadı.")
            .style(view.palette.muted())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, sections[1].union(sections[2]));
        return;
    };

    let titles = ANALYSIS_TABS
        .iter()
        .map(|(_, title, _)| *title)
        .collect::<Vec<_>>();
    let tabs = Tabs::new(titles)
        .select(view.state.analysis_tab.index())
        .style(view.palette.muted())
        .highlight_style(view.palette.heading().add_modifier(Modifier::REVERSED))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(tabs, sections[1]);

    let (title, render) = tab_entry(view.state.analysis_tab);
    let mut content_area = sections[2];
    if view.state.comment_draft.is_some() {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(5)])
            .split(sections[2]);
        content_area = split[0];
        render_compose(frame, split[1], view);
    }

    let body = Paragraph::new(render(analysis, view))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(body, content_area);
}

fn odds_summary(odds: &Odds) -> String {
    OddsMarket::ALL
        .iter()
        .map(|market| format!("{} {}", market.code(), format_odds(odds.get(*market))))
        .collect::<Vec<_>>()
        .join("  ")
}

fn heading(text: &str, view: &View) -> Line<'static> {
    Line::styled(text.to_string(), view.palette.heading())
}

fn overview_lines(analysis: &MatchAnalysis, view: &View<'_>) -> Vec<Line<'static>> {
    let m = &analysis.fixture;
    let home = &analysis.statistics.home_stats;
    let away = &analysis.statistics.away_stats;
    let live = &analysis.live_data;

    let mut lines = vec![
        heading("Kazanma Oranı", view),
        Line::from(format!(
            "{}: {}   {}: {}",
            m.home_team,
            team_rates(home).win,
            m.away_team,
            team_rates(away).win
        )),
        Line::default(),
        heading("Gol Ortalaması (atılan / yenilen)", view),
        Line::from(format!(
            "{}: {:.1} / {:.1}   {}: {:.1} / {:.1}",
            m.home_team,
            home.avg_goals_for,
            home.avg_goals_against,
            m.away_team,
            away.avg_goals_for,
            away.avg_goals_against
        )),
        Line::default(),
        heading("Son Form", view),
        form_line(&m.home_team, &live.home_form, view),
        form_line(&m.away_team, &live.away_form, view),
        Line::default(),
        heading("Sakatlıklar", view),
    ];

    if live.injuries.is_empty() {
        lines.push(Line::styled("Sakat oyuncu yok", view.palette.muted()));
    }
    for injury in &live.injuries {
        let (label, color) = match injury.severity {
            InjurySeverity::Major => ("Ciddi", view.palette.negative),
            InjurySeverity::Minor => ("Hafif", view.palette.warning),
            InjurySeverity::Doubtful => ("Şüpheli", view.palette.warning),
        };
        let mut spans = vec![
            Span::raw(format!("{} ({}) - ", injury.name, injury.position)),
            Span::styled(label, Style::default().fg(color)),
        ];
        if let Some(back) = &injury.expected_return {
            spans.push(Span::raw(format!(
                " | Dönüş: {}",
                format_date(back, view.offset)
            )));
        }
        lines.push(Line::from(spans));
    }

    if !live.suspensions.is_empty() {
        lines.push(Line::default());
        lines.push(heading("Cezalılar", view));
        for suspension in &live.suspensions {
            lines.push(Line::from(format!(
                "{} ({}) - {}",
                suspension.name, suspension.position, suspension.reason
            )));
        }
    }

    if let Some(weather) = &live.weather {
        lines.push(Line::default());
        lines.push(heading("Hava Durumu", view));
        lines.push(Line::from(format!(
            "{} | {}°C | Nem %{} | Rüzgar {} km/s",
            weather.condition, weather.temperature, weather.humidity, weather.wind_speed
        )));
    }
    lines
}

fn form_line(team: &str, form: &str, view: &View) -> Line<'static> {
    let mut spans = vec![Span::raw(format!("{team:<16}"))];
    for result in parse_form(form) {
        let (text, color) = match result {
            FormResult::Win => (" G ", view.palette.positive),
            FormResult::Draw => (" B ", view.palette.warning),
            FormResult::Loss => (" M ", view.palette.negative),
        };
        spans.push(Span::styled(
            text,
            Style::default().fg(Color::Black).bg(color),
        ));
        spans.push(Span::raw(" "));
    }
    let band = match form_band(form) {
        Some(FormBand::Hot) => "formda",
        Some(FormBand::Steady) => "istikrarlı",
        Some(FormBand::Cold) => "formsuz",
        None => "veri yok",
    };
    spans.push(Span::styled(
        format!(" {} galibiyet, {band}", stats::form_win_rate(form)),
        view.palette.muted(),
    ));
    Line::from(spans)
}

fn prediction_lines(analysis: &MatchAnalysis, view: &View<'_>) -> Vec<Line<'static>> {
    let prediction = &analysis.ai_prediction;
    let m = &analysis.fixture;
    let winner = match prediction.winner {
        Side::Home => format!("1 - {}", m.home_team),
        Side::Draw => "X - Beraberlik".to_string(),
        Side::Away => format!("2 - {}", m.away_team),
    };
    let breakdown = outcome_breakdown(prediction);
    let goals = &prediction.goals_prediction;

    let mut lines = vec![
        heading("Model Tahmini", view),
        Line::from(format!(
            "{winner} | Güven %{} | Risk: {}",
            prediction.confidence,
            risk_label(prediction.confidence)
        )),
        Line::from(format!("Skor tahmini: {}", prediction.score_prediction)),
        Line::from(format!(
            "Olasılıklar: 1 %{}  X %{}  2 %{}",
            breakdown.home, breakdown.draw, breakdown.away
        )),
        Line::default(),
        heading("Gol Tahmini", view),
        Line::from(format!(
            "Üst 2.5 %{}  Alt 2.5 %{}  İki Takım Gol %{}",
            goals.over25, goals.under25, goals.both_teams_score
        )),
        Line::default(),
        heading("Öneriler", view),
    ];

    if prediction.recommendations.is_empty() {
        lines.push(Line::styled("Öneri yok", view.palette.muted()));
    }
    for rec in &prediction.recommendations {
        let (tag, color) = match rec.kind {
            RecommendationKind::Bet => ("[OYNA]", view.palette.positive),
            RecommendationKind::Avoid => ("[KAÇIN]", view.palette.negative),
            RecommendationKind::Value => ("[DEĞER]", view.palette.accent),
        };
        lines.push(Line::from(vec![
            Span::styled(tag, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::raw(format!(
                " {}: {} (güven %{})",
                rec.market, rec.description, rec.confidence
            )),
        ]));
        lines.push(Line::styled(
            format!("    {}", rec.reasoning),
            view.palette.muted(),
        ));
    }

    lines.push(Line::default());
    lines.push(heading("Uzman Yorumu", view));
    lines.push(Line::from(analysis.expert_analysis.clone()));
    lines
}

fn betting_lines(analysis: &MatchAnalysis, view: &View<'_>) -> Vec<Line<'static>> {
    let Some(board) = &analysis.market_board else {
        return vec![Line::styled("Bahis verisi yok", view.palette.muted())];
    };

    let mut lines = vec![heading("Popüler Bahisler", view)];
    for bet in &board.popular_bets {
        let (arrow, color) = match bet.trend {
            Trend::Up => ("↑", view.palette.positive),
            Trend::Down => ("↓", view.palette.negative),
            Trend::Neutral => ("-", view.palette.muted),
        };
        lines.push(Line::from(vec![
            Span::raw(format!(
                "{:<24} %{:<3} {:>7} ",
                bet.market, bet.percentage, bet.volume
            )),
            Span::styled(arrow, Style::default().fg(color)),
        ]));
    }

    lines.push(Line::default());
    lines.push(heading("Değerli Bahisler", view));
    for bet in &board.value_bets {
        let band = match stats::odds_band(bet.odds) {
            OddsBand::Strong => "güçlü favori",
            OddsBand::Good => "iyi oran",
            OddsBand::Fair => "makul",
            OddsBand::Long => "sürpriz",
        };
        lines.push(Line::from(format!(
            "{:<20} oran {} (+%{} değer, adil {}) güven %{} | {band}",
            bet.market,
            format_odds(bet.odds),
            bet.value,
            format_odds(fair_odds(bet)),
            bet.confidence
        )));
    }

    let volume = &board.bet_volume;
    lines.push(Line::default());
    lines.push(heading("Bahis Hacmi", view));
    lines.push(Line::from(format!(
        "1 %{}  X %{}  2 %{}",
        volume.home, volume.draw, volume.away
    )));
    lines.push(Line::from(format!(
        "Ü2.5 %{}  A2.5 %{}  KG %{}",
        volume.over25, volume.under25, volume.both_teams_score
    )));

    lines.push(Line::default());
    lines.push(heading("Uzman Tahminleri", view));
    for pick in &board.expert_predictions {
        lines.push(Line::from(format!(
            "{}: {} (güven %{}, {} takipçi)",
            pick.expert, pick.prediction, pick.confidence, pick.followers
        )));
    }
    lines
}

fn live_lines(analysis: &MatchAnalysis, view: &View<'_>) -> Vec<Line<'static>> {
    let mut lines = vec![heading("Anlık Oranlar", view)];
    match view.state.live_odds {
        Some(odds) => {
            for market in OddsMarket::ALL {
                lines.push(Line::from(format!(
                    "{:<5} {}",
                    market.code(),
                    format_odds(odds.get(market))
                )));
            }
            lines.push(Line::styled(
                format!(
                    "Simüle edilmiş oranlar, {} güncelleme",
                    view.state.odds_ticks
                ),
                view.palette.muted(),
            ));
        }
        None => lines.push(Line::styled("Oran bilgisi yok", view.palette.muted())),
    }

    let Some(board) = &analysis.market_board else {
        return lines;
    };
    let live = &board.live_stats;
    let m = &analysis.fixture;
    lines.push(Line::default());
    lines.push(heading(
        &format!("Maç İstatistikleri ({} - {})", m.home_team, m.away_team),
        view,
    ));
    let rows = [
        ("Topa Sahip Olma", live.possession),
        ("Şut", live.shots),
        ("İsabetli Şut", live.shots_on_target),
        ("Korner", live.corners),
        ("Faul", live.fouls),
        ("Sarı Kart", live.yellow_cards),
    ];
    for (label, pair) in rows {
        lines.push(Line::from(format!(
            "{:<16} {:>3} - {:<3}",
            label, pair.home, pair.away
        )));
    }
    lines
}

fn stats_lines(analysis: &MatchAnalysis, view: &View<'_>) -> Vec<Line<'static>> {
    let m = &analysis.fixture;
    let mut lines = team_stat_lines(&m.home_team, &analysis.statistics.home_stats, view);
    lines.push(Line::default());
    lines.extend(team_stat_lines(
        &m.away_team,
        &analysis.statistics.away_stats,
        view,
    ));
    lines
}

fn team_stat_lines(team: &str, stats: &TeamStats, view: &View) -> Vec<Line<'static>> {
    let rates = team_rates(stats);
    let mut lines = vec![
        heading(team, view),
        Line::from(format!(
            "{} maç: {}G {}B {}M | Gol {}-{}",
            stats.played, stats.won, stats.drawn, stats.lost, stats.goals_for, stats.goals_against
        )),
        Line::from(format!(
            "Galibiyet {} | Üst 2.5 {} | KG {} | Gol yememe {}",
            rates.win, rates.over25, rates.both_teams_score, rates.clean_sheets
        )),
        Line::from(format!(
            "Gol atamadığı maç: {} | Alt 2.5: {}",
            stats.failed_to_score, stats.under25_games
        )),
    ];
    if let Some(record) = &stats.home_record {
        lines.push(record_line("İç saha", record));
    }
    if let Some(record) = &stats.away_record {
        lines.push(record_line("Deplasman", record));
    }
    lines
}

fn record_line(label: &str, record: &RecordSplit) -> Line<'static> {
    Line::from(format!(
        "{label}: {} maç {}G {}B {}M ({})",
        record.played,
        record.won,
        record.drawn,
        record.lost,
        record_win_rate(record)
    ))
}

fn head_to_head_lines(analysis: &MatchAnalysis, view: &View<'_>) -> Vec<Line<'static>> {
    let h2h = &analysis.statistics.head_to_head;
    let rates = head_to_head_rates(h2h);
    let m = &analysis.fixture;
    let mut lines = vec![
        heading(&format!("Son {} karşılaşma", h2h.total_games), view),
        Line::from(format!(
            "{} {} ({}) | Beraberlik {} ({}) | {} {} ({})",
            m.home_team,
            h2h.home_wins,
            rates.home_wins,
            h2h.draws,
            rates.draws,
            m.away_team,
            h2h.away_wins,
            rates.away_wins
        )),
        Line::from(format!(
            "Maç başı gol {:.1} | Üst 2.5 {} | KG {}",
            h2h.avg_goals, rates.over25, rates.both_teams_score
        )),
        Line::default(),
        heading("Son Maçlar", view),
    ];
    if h2h.recent_games.is_empty() {
        lines.push(Line::styled("Kayıt yok", view.palette.muted()));
    }
    for game in &h2h.recent_games {
        lines.push(Line::from(format!(
            "{:<12} {} {} {} ({})",
            format_date(&game.date, view.offset),
            game.home_team,
            game.score,
            game.away_team,
            game.competition
        )));
    }
    lines
}

fn social_lines(analysis: &MatchAnalysis, view: &View<'_>) -> Vec<Line<'static>> {
    let Some(board) = &analysis.market_board else {
        return vec![Line::styled("Sosyal veri yok", view.palette.muted())];
    };
    let mut lines = vec![heading("Duygu Analizi", view)];
    for entry in &board.social.sentiment {
        lines.push(Line::from(vec![
            Span::raw(format!("{:<12}", entry.platform)),
            Span::styled(
                format!("olumlu %{:<3} ", entry.positive),
                Style::default().fg(view.palette.positive),
            ),
            Span::styled(
                format!("olumsuz %{:<3} ", entry.negative),
                Style::default().fg(view.palette.negative),
            ),
            Span::styled(format!("nötr %{}", entry.neutral), view.palette.muted()),
        ]));
    }
    lines.push(Line::default());
    lines.push(heading("Trend Hashtagler", view));
    lines.push(Line::from(board.social.hashtags.join("  ")));
    lines
}

fn comment_lines(analysis: &MatchAnalysis, view: &View<'_>) -> Vec<Line<'static>> {
    if analysis.user_comments.is_empty() {
        return vec![Line::styled(
            "Henüz yorum yok. İlk yorumu yazmak için c.",
            view.palette.muted(),
        )];
    }
    let mut lines = Vec::new();
    for comment in &analysis.user_comments {
        lines.push(Line::from(vec![
            Span::styled(
                comment.user.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    " • {} • {}  ♥ {}",
                    format_date(&comment.timestamp, view.offset),
                    format_time(&comment.timestamp, view.offset),
                    comment.likes
                ),
                view.palette.muted(),
            ),
        ]));
        lines.push(Line::from(comment.content.clone()));
        if let Some(prediction) = &comment.prediction {
            lines.push(Line::styled(
                format!("Tahmin: {prediction}"),
                Style::default().fg(view.palette.accent),
            ));
        }
        if let Some(confidence) = &comment.confidence {
            lines.push(Line::styled(format!("Güven: {confidence}"), view.palette.muted()));
        }
        lines.push(Line::default());
    }
    lines
}

fn render_compose(frame: &mut Frame, area: Rect, view: &View) {
    let Some(draft) = &view.state.comment_draft else {
        return;
    };
    let pick = match draft.pick {
        Some(pick) => format!("{} - {}", pick_code(pick), pick_label(pick)),
        None => "Tahminim Seç (Tab)".to_string(),
    };
    let confidence = draft
        .confidence
        .map(confidence_label)
        .unwrap_or("Güven Seviyesi (Shift+Tab)");
    let text = vec![
        Line::from(format!("{}▏", draft.text)),
        Line::styled(format!("Tahmin: {pick}"), view.palette.muted()),
        Line::styled(format!("Güven: {confidence}"), view.palette.muted()),
    ];
    let compose = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Yorum Yaz").borders(Borders::ALL));
    frame.render_widget(compose, area);
}

fn render_search(frame: &mut Frame, area: Rect, view: &View) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let input = Paragraph::new(format!("{}▏", view.state.search_query))
        .block(Block::default().title("Ara").borders(Borders::ALL));
    frame.render_widget(input, sections[0]);

    if view.state.search_query.trim().is_empty() {
        let hint = Paragraph::new("Önizleme ve haberlerde aramak için yazmaya başlayın.")
            .style(view.palette.muted());
        frame.render_widget(hint, sections[1]);
        return;
    }

    let results = view.state.search_results();
    if results.is_empty() {
        let empty = Paragraph::new(format!(
            "\"{}\" için sonuç bulunamadı.",
            view.state.search_query
        ))
        .style(view.palette.muted());
        frame.render_widget(empty, sections[1]);
        return;
    }

    let rows = results
        .iter()
        .map(|item| {
            let kind = match item.kind {
                ItemKind::Preview => "[Önizleme]",
                ItemKind::News => "[Haber]",
            };
            vec![
                Line::from(vec![
                    Span::styled(kind, Style::default().fg(view.palette.accent)),
                    Span::raw(format!(" {}", item.title)),
                ]),
                Line::styled(item.excerpt.clone(), view.palette.muted()),
            ]
        })
        .collect::<Vec<_>>();
    render_rows(frame, sections[1], view, &rows, view.state.search_selected, 2);
}

fn render_previews(frame: &mut Frame, area: Rect, view: &View) {
    let previews = &view.state.fixtures.previews;
    if previews.is_empty() {
        render_empty(frame, area, view, "Önizleme yok");
        return;
    }
    let rows = previews
        .iter()
        .map(|preview| {
            let m = &preview.fixture;
            vec![
                Line::styled(preview.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Line::from(format!(
                    "{} - {} | {} | {} {}",
                    m.home_team,
                    m.away_team,
                    m.league,
                    format_date_short(&m.kickoff_time, view.offset),
                    format_time(&m.kickoff_time, view.offset)
                )),
                Line::from(format!(
                    "xG {:.1} - {:.1} | Topa sahip olma %{} - %{}",
                    preview.metrics.home_xg,
                    preview.metrics.away_xg,
                    preview.metrics.home_possession,
                    preview.metrics.away_possession
                )),
                Line::styled(
                    format!(
                        "{} • {} • {}",
                        preview.author,
                        format_date(&preview.published_at, view.offset),
                        preview.tags.join(", ")
                    ),
                    view.palette.muted(),
                ),
            ]
        })
        .collect::<Vec<_>>();
    render_rows(frame, area, view, &rows, view.state.list_selected, 4);
}

fn render_news(frame: &mut Frame, area: Rect, view: &View) {
    let articles = &view.state.fixtures.articles;
    if articles.is_empty() {
        render_empty(frame, area, view, "Haber yok");
        return;
    }
    let rows = articles
        .iter()
        .map(|article| {
            vec![
                Line::styled(article.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Line::from(article.excerpt.clone()),
                Line::styled(
                    format!(
                        "{} • {} • {}",
                        article.author,
                        format_date_short(&article.published_at, view.offset),
                        article.tags.join(", ")
                    ),
                    view.palette.muted(),
                ),
            ]
        })
        .collect::<Vec<_>>();
    render_rows(frame, area, view, &rows, view.state.list_selected, 3);
}

fn render_teams(frame: &mut Frame, area: Rect, view: &View) {
    let teams = &view.state.fixtures.teams;
    if teams.is_empty() {
        render_empty(frame, area, view, "Takım yok");
        return;
    }
    let rows = teams
        .iter()
        .map(|team| {
            vec![
                Line::from(format!(
                    "{}. {} | {} | {} puan",
                    team.position, team.name, team.league, team.points
                )),
                form_line("Form", &team.recent_form, view),
            ]
        })
        .collect::<Vec<_>>();
    render_rows(frame, area, view, &rows, view.state.list_selected, 2);
}

fn render_tags(frame: &mut Frame, area: Rect, view: &View) {
    let tags = &view.state.fixtures.trending_tags;
    if tags.is_empty() {
        render_empty(frame, area, view, "Trend etiket yok");
        return;
    }
    let rows = tags
        .iter()
        .map(|tag| vec![Line::from(format!("#{tag}"))])
        .collect::<Vec<_>>();
    render_rows(frame, area, view, &rows, view.state.list_selected, 1);
}

fn render_empty(frame: &mut Frame, area: Rect, view: &View, text: &str) {
    let empty = Paragraph::new(text.to_string()).style(view.palette.muted());
    frame.render_widget(empty, area);
}

/// Fixed-height rows with the selected one highlighted and kept in view.
fn render_rows(
    frame: &mut Frame,
    area: Rect,
    view: &View,
    rows: &[Vec<Line<'static>>],
    selected: usize,
    row_height: u16,
) {
    let row_height = row_height + 1;
    if area.height < row_height {
        return;
    }
    let visible = (area.height / row_height) as usize;
    let (start, end) = visible_range(selected, rows.len(), visible);
    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: area.x,
            y: area.y + (i as u16) * row_height,
            width: area.width,
            height: row_height - 1,
        };
        let style = if idx == selected {
            view.palette.selected()
        } else {
            Style::default()
        };
        let row = Paragraph::new(rows[idx].clone()).style(style);
        frame.render_widget(row, row_area);
    }
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    let start = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect, palette: &Palette) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Match Trends - Yardım",
        "",
        "Genel:",
        "  1            Günlük bülten",
        "  2 / 3        Önizlemeler / Haberler",
        "  4 / 5        Takımlar / Trend etiketler",
        "  /            Ara",
        "  b / Esc      Geri",
        "  t            Açık/koyu tema",
        "  ?            Yardım",
        "  q            Çıkış",
        "",
        "Bülten:",
        "  j/k or ↑/↓   Seç",
        "  l            Lig filtresi",
        "  Enter / d    Maç analizi",
        "",
        "Analiz:",
        "  Tab / ←/→    Sekme değiştir",
        "  j/k          Kaydır",
        "  c            Yorum yaz (Tab tahmin, Shift+Tab güven, Enter gönder)",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(palette.base());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use match_trends::format::offset_hours;

    #[test]
    fn tab_table_follows_tab_order() {
        for (idx, (tab, _, _)) in ANALYSIS_TABS.iter().enumerate() {
            assert_eq!(tab.index(), idx);
        }
        assert_eq!(tab_entry(AnalysisTab::HeadToHead).0, "Karşılıklı");
    }

    #[test]
    fn visible_range_keeps_selection_in_window() {
        assert_eq!(visible_range(0, 0, 5), (0, 0));
        assert_eq!(visible_range(3, 4, 10), (0, 4));
        assert_eq!(visible_range(9, 10, 4), (6, 10));
        assert_eq!(visible_range(5, 10, 4), (3, 7));
    }

    #[test]
    fn odds_summary_lists_every_market() {
        let odds = Odds {
            home: 2.1,
            draw: 3.4,
            away: 3.2,
            over25: 1.65,
            under25: 2.15,
            both_teams_score: 1.75,
        };
        assert_eq!(
            odds_summary(&odds),
            "1 2.10  X 3.40  2 3.20  Ü2.5 1.65  A2.5 2.15  KG 1.75"
        );
    }

    fn sample_state() -> AppState {
        AppState::new(fixtures::embedded().expect("embedded fixtures").clone())
    }

    fn rendered(lines: &[Line<'static>]) -> String {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn strip_optional_sections(state: &mut AppState) {
        let analysis = state.fixtures.analysis_for_mut("1").expect("analysis 1");
        for stats in [
            &mut analysis.statistics.home_stats,
            &mut analysis.statistics.away_stats,
        ] {
            stats.home_record = None;
            stats.away_record = None;
        }
        analysis.live_data.weather = None;
        analysis.live_data.suspensions.clear();
        for injury in &mut analysis.live_data.injuries {
            injury.expected_return = None;
        }
        for comment in &mut analysis.user_comments {
            comment.prediction = None;
            comment.confidence = None;
        }
    }

    #[test]
    fn optional_sections_render_when_present() {
        let state = sample_state();
        let view = View {
            state: &state,
            palette: Palette::light(),
            offset: offset_hours(3),
        };
        let analysis = state.fixtures.analysis_for("1").expect("analysis 1");

        let overview = rendered(&overview_lines(analysis, &view));
        assert!(overview.contains("Dönüş:"));
        assert!(overview.contains("Cezalılar"));
        assert!(overview.contains("Hava Durumu"));

        let stats = rendered(&stats_lines(analysis, &view));
        assert!(stats.contains("İç saha:"));
        assert!(stats.contains("Deplasman:"));

        assert!(rendered(&comment_lines(analysis, &view)).contains("Tahmin:"));
    }

    #[test]
    fn missing_optional_sections_are_left_out() {
        let mut state = sample_state();
        strip_optional_sections(&mut state);
        let view = View {
            state: &state,
            palette: Palette::light(),
            offset: offset_hours(3),
        };
        let analysis = state.fixtures.analysis_for("1").expect("analysis 1");

        let overview = rendered(&overview_lines(analysis, &view));
        assert!(overview.contains("Sakatlıklar"));
        assert!(!overview.contains("Dönüş:"));
        assert!(!overview.contains("Cezalılar"));
        assert!(!overview.contains("Hava Durumu"));

        let stats = rendered(&stats_lines(analysis, &view));
        assert!(!stats.contains("İç saha:"));
        assert!(!stats.contains("Deplasman:"));

        let comments = rendered(&comment_lines(analysis, &view));
        assert!(!comments.contains("Tahmin:"));
        assert!(!comments.contains("Güven:"));
    }

    #[test]
    fn unpriced_match_shows_dashes_only() {
        let state = sample_state();
        let priced = &state.fixtures.bulletin.matches[0];
        assert_eq!(bulletin_odds_cells(priced)[0], format_odds(priced.odds.expect("odds").home));

        let unpriced = Match {
            odds: None,
            ..priced.clone()
        };
        let cells = bulletin_odds_cells(&unpriced);
        assert!(cells.iter().all(|cell| cell == "-"));
        assert!(!cells.iter().any(|cell| cell.chars().any(|c| c.is_ascii_digit())));
    }

    #[test]
    fn all_chip_uses_bulletin_day_total() {
        let state = sample_state();
        let chips = league_chip_counts(&state);
        assert_eq!(chips[0], (LeagueFilter::All, 12));
        assert!(chips.contains(&(LeagueFilter::league("Süper Lig"), 2)));
        let listed: usize = chips[1..].iter().map(|(_, count)| count).sum();
        assert_eq!(listed, state.fixtures.bulletin.matches.len());
    }

    #[test]
    fn posted_confidence_is_shown_under_the_comment() {
        let mut state = sample_state();
        state.open_selected_match();
        state.start_comment();
        let draft = state.comment_draft.as_mut().expect("draft open");
        draft.text = "Ev sahibi rahat kazanır".to_string();
        draft.cycle_pick();
        draft.cycle_confidence();
        draft.cycle_confidence();
        assert!(state.submit_comment("2024-01-20T12:00:00Z".to_string()));

        let view = View {
            state: &state,
            palette: Palette::dark(),
            offset: offset_hours(3),
        };
        let analysis = state.current_analysis().expect("analysis");
        let comments = rendered(&comment_lines(analysis, &view));
        assert!(comments.contains("Tahmin: 1 (Ev Sahibi Kazanır)"));
        assert!(comments.contains("Güven: Yüksek (%60-80)"));
    }

    #[test]
    fn bulletin_headers_use_market_codes() {
        let codes = OddsMarket::ALL.map(OddsMarket::code);
        assert_eq!(codes, ["1", "X", "2", "Ü2.5", "A2.5", "KG"]);
    }
}
