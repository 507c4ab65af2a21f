use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use match_trends::fixtures;
use match_trends::search::{
    SearchableItem, filter_by_league_key, leagues, search, searchable_items,
};
use match_trends::state::Match;

fn scaled_items(copies: usize) -> Vec<SearchableItem> {
    let store = fixtures::embedded().expect("embedded fixtures");
    let base = searchable_items(&store.previews, &store.articles);
    let mut out = Vec::with_capacity(base.len() * copies);
    for i in 0..copies {
        out.extend(base.iter().cloned().map(|mut item| {
            item.id = format!("{}-{i}", item.id);
            item
        }));
    }
    out
}

fn scaled_matches(copies: usize) -> Vec<Match> {
    let store = fixtures::embedded().expect("embedded fixtures");
    let mut out = Vec::with_capacity(store.bulletin.matches.len() * copies);
    for i in 0..copies {
        out.extend(store.bulletin.matches.iter().cloned().map(|mut m| {
            m.id = format!("{}-{i}", m.id);
            m
        }));
    }
    out
}

fn bench_perf(c: &mut Criterion) {
    let items = scaled_items(500);
    let matches = scaled_matches(1_000);

    c.bench_function("search_derbi_3500_items", |b| {
        b.iter(|| {
            let results = search(black_box("derbi"), black_box(&items));
            black_box(results.len());
        })
    });

    c.bench_function("search_no_hits_3500_items", |b| {
        b.iter(|| {
            let results = search(black_box("zzqx"), black_box(&items));
            black_box(results.len());
        })
    });

    c.bench_function("filter_super_lig_5000_matches", |b| {
        b.iter(|| {
            let filtered = filter_by_league_key(black_box("Süper Lig"), black_box(&matches));
            black_box(filtered.len());
        })
    });

    c.bench_function("distinct_leagues_5000_matches", |b| {
        b.iter(|| {
            let names = leagues(black_box(&matches));
            black_box(names.len());
        })
    });
}

criterion_group!(benches, bench_perf);
criterion_main!(benches);
