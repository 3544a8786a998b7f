// Integration tests for the ranking engine

use chrono::NaiveDate;
use match_desk::core::{check_eligibility, criteria_for, Matcher};
use match_desk::models::{Profile, ScoringWeights};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

/// Birth date that makes someone `age` years old on `today()`
fn dob_for_age(age: i32) -> String {
    format!("{}-01-15", 2026 - age)
}

fn create_test_profile(id: i64, gender: &str, age: i32, city: &str) -> Profile {
    Profile {
        id,
        full_name: Some(format!("User {}", id)),
        gender: Some(gender.to_string()),
        dob: Some(dob_for_age(age)),
        city: Some(city.to_string()),
        ..Default::default()
    }
}

fn create_primary(partner_gender: &str, age_ranges: &str) -> Profile {
    Profile {
        id: 500,
        full_name: Some("Primary".to_string()),
        gender: Some("Male".to_string()),
        partner_gender: Some(partner_gender.to_string()),
        dob: Some(dob_for_age(29)),
        city: Some("Jerusalem".to_string()),
        ethnicity: Some("Sephardi".to_string()),
        ethnic_preferences: Some("Ashkenazi, Sephardi".to_string()),
        age_ranges: Some(age_ranges.to_string()),
        education_level: Some("Master".to_string()),
        accept_partner_with_children: Some(false),
        ..Default::default()
    }
}

#[test]
fn test_reference_ranking_example() {
    let matcher = Matcher::with_default_weights();
    let primary = create_primary("Female", "25-30");

    let a = Profile {
        ethnicity: Some("Ashkenazi".to_string()),
        education_level: Some("Master".to_string()),
        ..create_test_profile(1, "Female", 27, "Jerusalem")
    };
    let b = Profile {
        ethnicity: Some("Ethiopian".to_string()),
        education_level: Some("High school".to_string()),
        ..create_test_profile(2, "Female", 29, "Beersheba")
    };

    // B listed first to show ranking is by score, not input order
    let result = matcher.top_matches_on(&primary, &[b, a], today());

    let ranked: Vec<(i64, u32)> = result.matches.iter().map(|m| (m.profile.id, m.score)).collect();
    assert_eq!(ranked, vec![(1, 14), (2, 5)]);
    assert!(result.matches.iter().all(|m| m.eligible));
}

#[test]
fn test_integration_end_to_end_ranking() {
    let matcher = Matcher::with_default_weights();
    let primary = create_primary("Female", "20-25, 26-35");

    let mut with_children = create_test_profile(7, "Female", 28, "Jerusalem");
    with_children.children_under_18 = Some(true);
    let mut no_birth_date = create_test_profile(8, "Female", 28, "Jerusalem");
    no_birth_date.dob = None;

    let candidates = vec![
        create_test_profile(1, "Female", 22, "Jerusalem"), // Good match
        create_test_profile(2, "Female", 34, "Haifa"),     // Good match
        create_test_profile(3, "Female", 30, "Jerusalem"), // Good match
        create_test_profile(4, "Female", 19, "Jerusalem"), // Too young
        create_test_profile(5, "Female", 36, "Jerusalem"), // Too old
        create_test_profile(6, "Male", 25, "Jerusalem"),   // Wrong gender
        with_children,                                     // Children not accepted
        no_birth_date,                                     // Unknown age
        primary.clone(),                                   // Self
    ];

    let result = matcher.top_matches_on(&primary, &candidates, today());
    let criteria = criteria_for(&primary);

    assert_eq!(result.eligible_candidates, 3);
    assert_eq!(result.total_candidates, candidates.len());

    for m in &result.matches {
        assert_ne!(m.profile.id, primary.id);
        assert!(check_eligibility(&m.profile, &criteria, today()).is_ok());
    }

    for pair in result.matches.windows(2) {
        assert!(pair[0].score >= pair[1].score, "Matches not sorted by score");
    }

    let ids: Vec<i64> = result.matches.iter().map(|m| m.profile.id).collect();
    assert_eq!(ids, vec![1, 3, 2]);
}

#[test]
fn test_children_never_ranked() {
    let matcher = Matcher::with_default_weights();
    let primary = create_primary("Female", "25-30");

    let mut ideal_but_parent = Profile {
        ethnicity: Some("Sephardi".to_string()),
        education_level: Some("Master".to_string()),
        ..create_test_profile(1, "Female", 27, "Jerusalem")
    };
    ideal_but_parent.children_under_18 = Some(true);

    let plain = create_test_profile(2, "Female", 27, "Ashdod");

    let result = matcher.top_matches_on(&primary, &[ideal_but_parent, plain], today());

    assert_eq!(result.matches.len(), 1);
    assert_eq!(result.matches[0].profile.id, 2);
}

#[test]
fn test_any_gender_scores_everyone_alike() {
    let matcher = Matcher::with_default_weights();
    let primary = create_primary("Any", "25-30");

    let candidates = vec![
        create_test_profile(1, "Female", 26, "Eilat"),
        create_test_profile(2, "Male", 27, "Eilat"),
        create_test_profile(3, "Non-binary", 28, "Eilat"),
    ];

    let result = matcher.top_matches_on(&primary, &candidates, today());

    assert_eq!(result.matches.len(), 3);
    assert!(result.matches.iter().all(|m| m.score == 5));
    let ids: Vec<i64> = result.matches.iter().map(|m| m.profile.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn test_empty_snapshot_returns_nothing() {
    let matcher = Matcher::with_default_weights();
    let primary = create_primary("Female", "25-30");

    let result = matcher.top_matches_on(&primary, &[], today());

    assert!(result.matches.is_empty());
    assert_eq!(result.eligible_candidates, 0);
}

#[test]
fn test_max_limit_enforcement() {
    let matcher = Matcher::with_default_weights();
    let primary = create_primary("Female", "18-99");

    let candidates: Vec<Profile> = (0..50)
        .map(|i| create_test_profile(i, "Female", 20 + (i % 30) as i32, "Jerusalem"))
        .collect();

    let result = matcher.top_matches_on(&primary, &candidates, today());

    assert_eq!(result.matches.len(), 5, "Should not exceed limit of 5");
    assert_eq!(result.eligible_candidates, 50);
    // All tie at 8, so the first five of the snapshot win
    let ids: Vec<i64> = result.matches.iter().map(|m| m.profile.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_ranking_does_not_mutate_snapshot() {
    let matcher = Matcher::with_default_weights();
    let primary = create_primary("Female", "25-30");
    let candidates = vec![
        create_test_profile(1, "Female", 26, "Jerusalem"),
        create_test_profile(2, "Female", 40, "Jerusalem"),
    ];
    let before = candidates.clone();

    let _ = matcher.top_matches_on(&primary, &candidates, today());

    assert_eq!(candidates, before);
}

#[test]
fn test_configured_limit_never_exceeds_five() {
    let matcher = Matcher::new(ScoringWeights::default(), 12);
    let primary = create_primary("Female", "18-99");

    let candidates: Vec<Profile> = (0..20)
        .map(|i| create_test_profile(i, "Female", 25, "Haifa"))
        .collect();

    let result = matcher.top_matches_on(&primary, &candidates, today());

    assert_eq!(result.eligible_candidates, 20);
    assert_eq!(result.matches.len(), 5);
}
