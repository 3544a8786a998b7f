// Criterion benchmarks for Match Desk

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use match_desk::core::{
    age::birth_date,
    filters::potential_matches,
    preferences::{criteria_for, parse_age_range},
    Matcher,
};
use match_desk::models::Profile;

const CITIES: [&str; 4] = ["Jerusalem", "Haifa", "Tel Aviv", "Beersheba"];
const GROUPS: [&str; 3] = ["Ashkenazi", "Sephardi", "Ethiopian"];

fn create_candidate(id: usize) -> Profile {
    Profile {
        id: id as i64 + 1,
        full_name: Some(format!("User {}", id)),
        gender: Some(if id % 2 == 0 { "Female" } else { "Male" }.to_string()),
        dob: Some(format!("{}-{:02}-{:02}", 1975 + id % 30, 1 + id % 12, 1 + id % 28)),
        city: Some(CITIES[id % CITIES.len()].to_string()),
        ethnicity: Some(GROUPS[id % GROUPS.len()].to_string()),
        education_level: Some(if id % 3 == 0 { "Master" } else { "Bachelor" }.to_string()),
        children_under_18: Some(id % 7 == 0),
        ..Default::default()
    }
}

fn create_primary() -> Profile {
    Profile {
        id: 0,
        gender: Some("Male".to_string()),
        partner_gender: Some("Female".to_string()),
        dob: Some("1991-04-12".to_string()),
        city: Some("Haifa".to_string()),
        ethnic_preferences: Some("Ashkenazi, Sephardi".to_string()),
        age_ranges: Some("25-30, 31-40".to_string()),
        education_level: Some("Master".to_string()),
        accept_partner_with_children: Some(false),
        ..Default::default()
    }
}

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap_or_default()
}

fn bench_parse_age_range(c: &mut Criterion) {
    c.bench_function("parse_age_range", |b| {
        b.iter(|| parse_age_range(black_box(Some("20-25, 26-30, 31-35"))));
    });
}

fn bench_birth_date(c: &mut Criterion) {
    let profile = create_candidate(42);

    c.bench_function("birth_date", |b| {
        b.iter(|| birth_date(black_box(&profile)));
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let primary = create_primary();
    let today = reference_date();

    let mut group = c.benchmark_group("matching");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let candidates: Vec<Profile> = (0..*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("top_matches", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    matcher.top_matches_on(black_box(&primary), black_box(&candidates), black_box(today))
                });
            },
        );
    }

    group.finish();
}

fn bench_potential_matches(c: &mut Criterion) {
    let primary = create_primary();
    let candidates: Vec<Profile> = (0..1000).map(create_candidate).collect();

    c.bench_function("potential_matches_1000_candidates", |b| {
        b.iter(|| black_box(potential_matches(black_box(&primary), black_box(&candidates))));
    });

    c.bench_function("criteria_for", |b| {
        b.iter(|| criteria_for(black_box(&primary)));
    });
}

criterion_group!(
    benches,
    bench_parse_age_range,
    bench_birth_date,
    bench_matching,
    bench_potential_matches
);

criterion_main!(benches);
