//! seeder.rs
//!
//! Наполнение базы синтетическими данными.
//!
//! Три независимых задания, каждое со своим бинарником:
//! 1.  **Площадки**: площадка, один зал и 100 мест в нём. Каждая площадка
//!     пишется своей транзакцией, цена категории запоминается в пределах зала.
//! 2.  **Шоу**: требуют уже существующих пар площадка/зал. Если их нет,
//!     задание пропускается с предупреждением, а не падает.
//! 3.  **Пользователи**: логин и пароль, в базу пишется bcrypt-хеш.

use chrono::NaiveDateTime;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::SeedConfig;
use crate::error::SeedResult;
use crate::generate::{generate_hall_seats, generate_show, generate_user, generate_venue};
use crate::models::NewUser;
use crate::store::{SeedBatch, SeedStore};

/// Какое задание запускать.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    Venues,
    Shows,
    Users,
    /// Площадки, затем шоу, затем пользователи.
    All,
}

impl Job {
    fn includes(self, other: Job) -> bool {
        self == Job::All || self == other
    }
}

/// Почему задание ничего не вставило, но и не упало.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoVenueHalls,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoVenueHalls => {
                f.write_str("No existing venues and halls found. Please generate venues and halls first.")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SeedOutcome {
    Completed(SeedReport),
    Skipped(SkipReason),
}

/// Итог прогона. В `credentials` открытые пароли созданных пользователей,
/// в базе лежат только их хеши.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeedReport {
    pub venues: u64,
    pub halls: u64,
    pub seats: u64,
    pub shows: u64,
    pub users: u64,
    pub skipped: Vec<SkipReason>,
    pub credentials: Vec<NewUser>,
}

impl SeedReport {
    pub fn merge(&mut self, other: SeedReport) {
        self.venues += other.venues;
        self.halls += other.halls;
        self.seats += other.seats;
        self.shows += other.shows;
        self.users += other.users;
        self.skipped.extend(other.skipped);
        self.credentials.extend(other.credentials);
    }

    fn record(&mut self, outcome: SeedOutcome) {
        match outcome {
            SeedOutcome::Completed(report) => self.merge(report),
            SeedOutcome::Skipped(reason) => self.skipped.push(reason),
        }
    }
}

pub struct SeederService<'a, S> {
    store: &'a S,
    config: &'a SeedConfig,
}

impl<'a, S: SeedStore> SeederService<'a, S> {
    pub fn new(store: &'a S, config: &'a SeedConfig) -> Self {
        Self { store, config }
    }

    /// Запускает выбранные задания в порядке зависимостей.
    pub async fn run<R: Rng + ?Sized>(&self, job: Job, rng: &mut R, now: NaiveDateTime) -> SeedResult<SeedReport> {
        let mut report = SeedReport::default();

        if job.includes(Job::Venues) {
            report.merge(self.seed_venues(rng).await?);
        }
        if job.includes(Job::Shows) {
            report.record(self.seed_shows(rng, now).await?);
        }
        if job.includes(Job::Users) {
            report.merge(self.seed_users(rng).await?);
        }

        info!(
            "🌱 Seeding finished: {} venues, {} halls, {} seats, {} shows, {} users",
            report.venues, report.halls, report.seats, report.shows, report.users
        );
        Ok(report)
    }

    /// Площадка + зал + места, одна транзакция на площадку
    pub async fn seed_venues<R: Rng + ?Sized>(&self, rng: &mut R) -> SeedResult<SeedReport> {
        let mut report = SeedReport::default();
        info!("🏟️ Seeding {} venues", self.config.venues);

        for _ in 0..self.config.venues {
            let venue = generate_venue(rng);

            let mut batch = self.store.begin().await?;
            let venue_id = batch.insert_venue(&venue).await?;
            let hall_id = batch.insert_hall(venue_id).await?;

            // id зала нужен до генерации мест: он входит в ключ места
            let seats = generate_hall_seats(rng, venue_id, hall_id);
            for seat in &seats {
                batch.insert_seat(seat).await?;
            }
            batch.commit().await?;

            debug!(
                venue_id = %venue_id,
                hall_id = %hall_id,
                "Venue '{}' in {} seeded with {} seats",
                venue.name, venue.location, seats.len()
            );
            report.venues += 1;
            report.halls += 1;
            report.seats += seats.len() as u64;
        }

        Ok(report)
    }

    pub async fn seed_shows<R: Rng + ?Sized>(&self, rng: &mut R, now: NaiveDateTime) -> SeedResult<SeedOutcome> {
        if self.config.shows == 0 {
            info!("🎭 No shows requested");
            return Ok(SeedOutcome::Completed(SeedReport::default()));
        }

        let (venues, halls) = self.store.count_venues_and_halls().await?;
        let pairs = if venues > 0 && halls > 0 {
            self.store.venue_hall_pairs().await?
        } else {
            Vec::new()
        };
        if pairs.is_empty() {
            let reason = SkipReason::NoVenueHalls;
            warn!("🎭 {}", reason);
            return Ok(SeedOutcome::Skipped(reason));
        }

        info!("🎭 Seeding {} shows across {} halls", self.config.shows, pairs.len());

        let mut batch = self.store.begin().await?;
        let mut inserted = 0u64;
        for show in (0..self.config.shows).filter_map(|_| generate_show(rng, &pairs, now)) {
            batch.insert_show(&show).await?;
            inserted += 1;
        }
        batch.commit().await?;

        Ok(SeedOutcome::Completed(SeedReport {
            shows: inserted,
            ..SeedReport::default()
        }))
    }

    pub async fn seed_users<R: Rng + ?Sized>(&self, rng: &mut R) -> SeedResult<SeedReport> {
        let mut report = SeedReport::default();
        if self.config.users == 0 {
            info!("👤 No users requested");
            return Ok(report);
        }

        info!("👤 Seeding {} users", self.config.users);

        let mut batch = self.store.begin().await?;
        for _ in 0..self.config.users {
            let user = generate_user(rng);
            let password_hash = user.hash_password(self.config.bcrypt_cost)?;
            batch.insert_user(&user.username, &password_hash).await?;

            report.users += 1;
            report.credentials.push(user);
        }
        batch.commit().await?;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_covers_every_job() {
        for job in [Job::Venues, Job::Shows, Job::Users] {
            assert!(Job::All.includes(job));
            assert!(job.includes(job));
        }
        assert!(!Job::Venues.includes(Job::Users));
    }

    #[test]
    fn skipped_jobs_are_kept_in_the_report() {
        let mut report = SeedReport { venues: 2, halls: 2, seats: 200, ..SeedReport::default() };
        report.record(SeedOutcome::Skipped(SkipReason::NoVenueHalls));
        report.record(SeedOutcome::Completed(SeedReport { users: 3, ..SeedReport::default() }));

        assert_eq!(report.skipped, vec![SkipReason::NoVenueHalls]);
        assert_eq!((report.venues, report.seats, report.users), (2, 200, 3));
    }

    #[test]
    fn skip_reason_tells_what_to_run_first() {
        assert_eq!(
            SkipReason::NoVenueHalls.to_string(),
            "No existing venues and halls found. Please generate venues and halls first."
        );
    }
}
