use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::state::{DailyBulletin, MatchAnalysis, MatchPreview, NewsArticle, Team};

const EMBEDDED_FIXTURES: &str = include_str!("../data/fixtures.json");

static EMBEDDED: OnceCell<FixtureStore> = OnceCell::new();

/// The whole static dataset the portal renders. Loaded once, never refreshed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureStore {
    pub bulletin: DailyBulletin,
    #[serde(default)]
    pub analyses: Vec<MatchAnalysis>,
    #[serde(default)]
    pub previews: Vec<MatchPreview>,
    #[serde(default)]
    pub articles: Vec<NewsArticle>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub trending_tags: Vec<String>,
}

impl FixtureStore {
    pub fn analysis_for(&self, match_id: &str) -> Option<&MatchAnalysis> {
        self.analyses.iter().find(|a| a.fixture.id == match_id)
    }

    pub fn analysis_for_mut(&mut self, match_id: &str) -> Option<&mut MatchAnalysis> {
        self.analyses.iter_mut().find(|a| a.fixture.id == match_id)
    }
}

pub fn parse_fixtures_json(raw: &str) -> Result<FixtureStore> {
    serde_json::from_str::<FixtureStore>(raw).context("parse fixture json")
}

/// Dataset compiled into the binary.
pub fn embedded() -> Result<&'static FixtureStore> {
    EMBEDDED.get_or_try_init(|| parse_fixtures_json(EMBEDDED_FIXTURES))
}

pub fn load_from_path(path: &Path) -> Result<FixtureStore> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read fixtures from {}", path.display()))?;
    parse_fixtures_json(&raw).with_context(|| format!("fixtures at {}", path.display()))
}

/// Honors `MATCH_TRENDS_FIXTURES`; a broken override falls back to the
/// embedded dataset and the reason is returned for the console.
pub fn load() -> Result<(FixtureStore, Option<String>)> {
    let override_path = env::var("MATCH_TRENDS_FIXTURES")
        .ok()
        .filter(|val| !val.trim().is_empty());
    if let Some(path) = override_path {
        match load_from_path(Path::new(path.trim())) {
            Ok(store) => return Ok((store, None)),
            Err(err) => {
                let store = embedded()?.clone();
                return Ok((store, Some(format!("[WARN] Fixture override ignored: {err:#}"))));
            }
        }
    }
    Ok((embedded()?.clone(), None))
}

#[cfg(test)]
mod tests {
    use super::{embedded, parse_fixtures_json};

    #[test]
    fn embedded_fixtures_parse() {
        let store = embedded().expect("embedded fixtures should parse");
        assert_eq!(store.bulletin.matches.len(), 5);
        assert_eq!(store.bulletin.total_matches, 12);
        assert!(store.analysis_for("1").is_some());
        assert!(store.analysis_for("2").is_none());
    }

    #[test]
    fn optional_sections_default_to_empty() {
        let raw = r#"{"bulletin":{"date":"2024-01-20","matches":[],"featuredMatches":[],"totalMatches":0}}"#;
        let store = parse_fixtures_json(raw).expect("minimal fixture should parse");
        assert!(store.analyses.is_empty());
        assert!(store.previews.is_empty());
        assert!(store.trending_tags.is_empty());
    }

    #[test]
    fn malformed_fixture_is_an_error() {
        assert!(parse_fixtures_json("{\"bulletin\": 3}").is_err());
    }
}
