// Integration tests for peermatch
use peermatch_core::{Error, UserProfile, UserRecord};
use peermatch_engine::Recommender;
use peermatch_store::{MemoryUserStore, UserStore};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn user(
    id: &str,
    education: &str,
    skills: &[&str],
    badges: &[&str],
    numbers: [f64; 4],
) -> UserRecord {
    UserRecord::new(
        id,
        UserProfile {
            education_level: Some(education.to_string()),
            skills_can_teach: skills.iter().map(|s| (*s).to_string()).collect(),
            badges: badges.iter().map(|s| (*s).to_string()).collect(),
            points: Some(numbers[0]),
            sessions_completed: Some(numbers[1]),
            questions_answered: Some(numbers[2]),
            rating: Some(numbers[3]),
        },
    )
}

fn population_of_eight() -> Vec<UserRecord> {
    vec![
        user("u1", "Bachelors", &["Math"], &[], [50.0, 3.0, 10.0, 4.2]),
        user("u2", "Bachelors", &["Math"], &["Helper"], [60.0, 5.0, 14.0, 4.0]),
        user("u3", "Masters", &["Physics"], &[], [220.0, 25.0, 80.0, 4.7]),
        user("u4", "Masters", &["Physics"], &["Mentor"], [210.0, 24.0, 75.0, 4.9]),
        user("u5", "HighSchool", &["Art"], &[], [5.0, 1.0, 2.0, 3.1]),
        user("u6", "HighSchool", &["Art", "Music"], &[], [9.0, 2.0, 3.0, 3.4]),
        user("u7", "PhD", &["Chemistry"], &["Mentor"], [400.0, 55.0, 140.0, 5.0]),
        user("u8", "PhD", &["Chemistry"], &[], [390.0, 52.0, 135.0, 4.9]),
    ]
}

#[tokio::test]
async fn test_fetch_then_recommend() {
    let population = population_of_eight();
    let store = MemoryUserStore::new(population.clone());

    let fetched = store.fetch_all_users().await.unwrap();
    assert_eq!(fetched.len(), 8);

    let query = population[0].profile.clone();
    let mut rng = StdRng::seed_from_u64(42);
    let result = Recommender::new()
        .recommend(&fetched, &query, 5, &mut rng)
        .unwrap();

    assert!(!result.is_empty());
    assert!(result.len() <= 5);
    for rec in &result {
        assert!(rec.similarity >= 0.0 && rec.similarity <= 100.0);
    }
}

#[test]
fn test_exact_member_is_top_match_with_full_score() {
    let population = population_of_eight();
    let query = population[0].profile.clone();

    let mut rng = StdRng::seed_from_u64(7);
    let result = Recommender::new()
        .recommend(&population, &query, population.len(), &mut rng)
        .unwrap();

    assert_eq!(result[0].id, "u1");
    assert!((result[0].similarity - 100.0).abs() < 0.01);
}

#[test]
fn test_full_limit_result_is_sorted_cluster() {
    // With the limit at the population size, the sample covers the
    // query's whole cluster: the identical member leads and scores
    // descend from there.
    let population = population_of_eight();
    let query = population[0].profile.clone();

    let mut rng = StdRng::seed_from_u64(11);
    let result = Recommender::new()
        .recommend(&population, &query, population.len(), &mut rng)
        .unwrap();

    assert!(result.iter().any(|rec| rec.id == "u1"));
    for pair in result.windows(2) {
        assert!(pair[0].similarity >= pair[1].similarity);
    }
}

#[test]
fn test_three_users_with_four_clusters_is_config_error() {
    let population = population_of_eight()[0..3].to_vec();
    let query = population[0].profile.clone();

    let mut rng = StdRng::seed_from_u64(42);
    let err = Recommender::new()
        .recommend(&population, &query, 5, &mut rng)
        .unwrap_err();

    assert!(matches!(err, Error::InvalidConfig(_)));
    assert!(err.to_string().contains("exceeds population size"));
}

#[test]
fn test_zero_nums_yields_empty_result() {
    let population = population_of_eight();
    let query = population[0].profile.clone();

    let mut rng = StdRng::seed_from_u64(42);
    let result = Recommender::new()
        .recommend(&population, &query, 0, &mut rng)
        .unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_empty_query_is_rejected_before_fetch_results_are_used() {
    let population = population_of_eight();
    let mut rng = StdRng::seed_from_u64(42);

    let err = Recommender::new()
        .recommend(&population, &UserProfile::default(), 5, &mut rng)
        .unwrap_err();
    assert!(matches!(err, Error::EmptyQuery));
}

#[test]
fn test_incomplete_population_row_is_data_quality_error() {
    let mut population = population_of_eight();
    population[3].profile.points = None;
    let query = population[0].profile.clone();

    let mut rng = StdRng::seed_from_u64(42);
    let err = Recommender::new()
        .recommend(&population, &query, 5, &mut rng)
        .unwrap_err();

    assert!(matches!(err, Error::IncompleteRecord { ref id, .. } if id == "u4"));
}

#[test]
fn test_unknown_query_education_level_is_tolerated() {
    let population = population_of_eight();
    let mut query = population[0].profile.clone();
    query.education_level = Some("Bootcamp".to_string());

    let mut rng = StdRng::seed_from_u64(42);
    assert!(Recommender::new()
        .recommend(&population, &query, 5, &mut rng)
        .is_ok());
}

#[tokio::test]
async fn test_empty_population_is_distinct_from_store_failure() {
    let store = MemoryUserStore::default();
    let fetched = store.fetch_all_users().await.unwrap();
    assert!(fetched.is_empty());

    // An empty population then fails the pipeline as a configuration
    // problem, not a store error.
    let query = population_of_eight()[0].profile.clone();
    let mut rng = StdRng::seed_from_u64(42);
    let err = Recommender::new()
        .recommend(&fetched, &query, 5, &mut rng)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}
