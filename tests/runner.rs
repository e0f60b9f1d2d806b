use std::collections::HashMap;

use ticket_seeder::config::Config;
use ticket_seeder::{runner, Job, SkipReason};

// Пробный прогон: без учётных данных и без соединения с базой
fn dry_run_config(extra: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("SEED_DRY_RUN".to_string(), "true".to_string()),
        ("SEED_BCRYPT_COST".to_string(), "4".to_string()),
    ]);
    vars.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));

    Config::from_lookup(move |key: &str| vars.get(key).cloned()).unwrap()
}

#[tokio::test]
async fn dry_run_seeds_every_job_with_stock_counts() {
    let config = dry_run_config(&[]);

    let report = runner::run(Job::All, &config).await.unwrap();

    assert_eq!(report.venues, 5);
    assert_eq!(report.halls, 5);
    assert_eq!(report.seats, 500);
    assert_eq!(report.shows, 10);
    assert_eq!(report.users, 10);
    assert_eq!(report.credentials.len(), 10);
    assert!(report.skipped.is_empty());
}

#[tokio::test]
async fn dry_run_shows_alone_are_skipped_for_lack_of_halls() {
    let config = dry_run_config(&[]);

    let report = runner::run(Job::Shows, &config).await.unwrap();

    assert_eq!(report.shows, 0);
    assert_eq!(report.skipped, vec![SkipReason::NoVenueHalls]);
}

#[tokio::test]
async fn fixed_rng_seed_gives_identical_reports() {
    let config = dry_run_config(&[
        ("SEED_RNG_SEED", "4242"),
        ("SEED_VENUES", "2"),
        ("SEED_SHOWS", "3"),
        ("SEED_USERS", "3"),
    ]);

    let first = runner::run(Job::All, &config).await.unwrap();
    let second = runner::run(Job::All, &config).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.users, 3);
}
