use match_trends::fixtures;
use match_trends::search::{
    ItemKind, LeagueFilter, filter_by_league, filter_by_league_key, leagues, search,
    searchable_items,
};

fn ids<T: AsRef<str>>(items: impl IntoIterator<Item = T>) -> Vec<String> {
    items.into_iter().map(|id| id.as_ref().to_string()).collect()
}

#[test]
fn derbi_finds_previews_and_articles() {
    let store = fixtures::embedded().expect("embedded fixtures");
    let items = searchable_items(&store.previews, &store.articles);
    let results = search("derbi", &items);

    assert_eq!(ids(results.iter().map(|i| &i.id)), vec!["p1", "n1", "n4"]);
    assert_eq!(results[0].kind, ItemKind::Preview);
    assert_eq!(results[1].kind, ItemKind::News);
}

#[test]
fn search_ignores_case() {
    let store = fixtures::embedded().expect("embedded fixtures");
    let items = searchable_items(&store.previews, &store.articles);

    assert_eq!(ids(search("EL CLASICO", &items).iter().map(|i| &i.id)), vec!["p2"]);
    assert_eq!(ids(search("Süper", &items).iter().map(|i| &i.id)), vec!["p1", "n1"]);
}

#[test]
fn nonsense_and_blank_queries_are_empty() {
    let store = fixtures::embedded().expect("embedded fixtures");
    let items = searchable_items(&store.previews, &store.articles);

    assert!(search("zzqx", &items).is_empty());
    assert!(search("", &items).is_empty());
    assert!(search("   ", &items).is_empty());
}

#[test]
fn results_are_a_subset_that_contain_the_query() {
    let store = fixtures::embedded().expect("embedded fixtures");
    let items = searchable_items(&store.previews, &store.articles);

    for query in ["a", "gol", "transfer", "Lig", "derbi"] {
        let needle = query.to_lowercase();
        for hit in search(query, &items) {
            assert!(items.contains(&hit), "{query}: {} not in input", hit.id);
            let found = hit.title.to_lowercase().contains(&needle)
                || hit.excerpt.to_lowercase().contains(&needle)
                || hit.tags.iter().any(|t| t.to_lowercase().contains(&needle));
            assert!(found, "{query}: {} does not contain the query", hit.id);
        }
    }
}

#[test]
fn super_lig_filter_keeps_the_two_turkish_matches() {
    let store = fixtures::embedded().expect("embedded fixtures");
    let matches = &store.bulletin.matches;

    let filtered = filter_by_league_key("Süper Lig", matches);
    assert_eq!(ids(filtered.iter().map(|m| &m.id)), vec!["1", "2"]);
    assert_eq!(filtered[0].home_team, "Galatasaray");
    assert_eq!(filtered[1].home_team, "Beşiktaş");
}

#[test]
fn all_key_returns_every_match_in_order() {
    let store = fixtures::embedded().expect("embedded fixtures");
    let matches = &store.bulletin.matches;

    let all = filter_by_league_key("all", matches);
    assert_eq!(all.len(), 5);
    assert!(all.iter().zip(matches.iter()).all(|(a, b)| *a == b));
}

#[test]
fn unknown_league_is_empty_and_names_are_exact() {
    let store = fixtures::embedded().expect("embedded fixtures");
    let matches = &store.bulletin.matches;

    assert!(filter_by_league(&LeagueFilter::league("Serie A"), matches).is_empty());
    assert!(filter_by_league_key("süper lig", matches).is_empty());
}

#[test]
fn league_sets_partition_the_bulletin() {
    let store = fixtures::embedded().expect("embedded fixtures");
    let matches = &store.bulletin.matches;

    let names = leagues(matches);
    assert_eq!(
        names,
        vec!["Süper Lig", "La Liga", "Premier League", "Bundesliga"]
    );
    let mut seen: Vec<&str> = names
        .iter()
        .flat_map(|league| filter_by_league_key(league, matches))
        .map(|m| m.id.as_str())
        .collect();
    seen.sort();
    assert_eq!(seen, vec!["1", "2", "3", "4", "5"]);
}
