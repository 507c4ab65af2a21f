use crate::state::{Match, MatchPreview, NewsArticle};

pub const ALL_LEAGUES_KEY: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Preview,
    News,
}

/// Uniform projection of previews and articles used by [`search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchableItem {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub kind: ItemKind,
}

impl From<&MatchPreview> for SearchableItem {
    fn from(preview: &MatchPreview) -> Self {
        Self {
            id: preview.id.clone(),
            title: preview.title.clone(),
            excerpt: preview.excerpt.clone(),
            tags: preview.tags.clone(),
            kind: ItemKind::Preview,
        }
    }
}

impl From<&NewsArticle> for SearchableItem {
    fn from(article: &NewsArticle) -> Self {
        Self {
            id: article.id.clone(),
            title: article.title.clone(),
            excerpt: article.excerpt.clone(),
            tags: article.tags.clone(),
            kind: ItemKind::News,
        }
    }
}

/// Previews first, then articles.
pub fn searchable_items(previews: &[MatchPreview], articles: &[NewsArticle]) -> Vec<SearchableItem> {
    previews
        .iter()
        .map(SearchableItem::from)
        .chain(articles.iter().map(SearchableItem::from))
        .collect()
}

/// Case-insensitive substring match over title, excerpt and tags.
///
/// A blank query yields nothing rather than the whole corpus. Input order is kept.
pub fn search(query: &str, items: &[SearchableItem]) -> Vec<SearchableItem> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| item_matches(item, &needle))
        .cloned()
        .collect()
}

fn item_matches(item: &SearchableItem, needle: &str) -> bool {
    item.title.to_lowercase().contains(needle)
        || item.excerpt.to_lowercase().contains(needle)
        || item.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LeagueFilter {
    #[default]
    All,
    League(String),
}

impl LeagueFilter {
    pub fn league(name: &str) -> Self {
        LeagueFilter::League(name.to_string())
    }

    /// `"all"` selects everything; anything else names a league exactly.
    pub fn from_key(key: &str) -> Self {
        if key == ALL_LEAGUES_KEY {
            LeagueFilter::All
        } else {
            LeagueFilter::League(key.to_string())
        }
    }

    pub fn key(&self) -> &str {
        match self {
            LeagueFilter::All => ALL_LEAGUES_KEY,
            LeagueFilter::League(name) => name,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            LeagueFilter::All => "Tümü",
            LeagueFilter::League(name) => name,
        }
    }
}

pub fn filter_by_league<'a>(filter: &LeagueFilter, matches: &'a [Match]) -> Vec<&'a Match> {
    match filter {
        LeagueFilter::All => matches.iter().collect(),
        LeagueFilter::League(name) => matches.iter().filter(|m| m.league == *name).collect(),
    }
}

pub fn filter_by_league_key<'a>(key: &str, matches: &'a [Match]) -> Vec<&'a Match> {
    filter_by_league(&LeagueFilter::from_key(key), matches)
}

/// Distinct leagues in first-appearance order.
pub fn leagues(matches: &[Match]) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    for m in matches {
        if !out.contains(&m.league.as_str()) {
            out.push(m.league.as_str());
        }
    }
    out
}

pub fn league_count(league: &str, matches: &[Match]) -> usize {
    matches.iter().filter(|m| m.league == league).count()
}
