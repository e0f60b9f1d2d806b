use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use super::{SeedBatch, SeedStore};
use crate::error::{SeedError, SeedResult};
use crate::models::{HallId, NewSeat, NewShow, NewVenue, VenueHall, VenueId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredVenue {
    pub id: VenueId,
    pub name: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredUser {
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Default)]
struct Tables {
    venues: Vec<StoredVenue>,
    halls: Vec<VenueHall>,
    seats: Vec<NewSeat>,
    shows: Vec<NewShow>,
    users: Vec<StoredUser>,
}

impl Tables {
    fn append(&mut self, other: Tables) {
        self.venues.extend(other.venues);
        self.halls.extend(other.halls);
        self.seats.extend(other.seats);
        self.shows.extend(other.shows);
        self.users.extend(other.users);
    }
}

#[derive(Debug, Default)]
struct State {
    committed: Tables,
    // Как последовательности в Postgres: откат не возвращает номера
    last_venue_id: i32,
    last_hall_id: i32,
    batches_opened: usize,
    commits: usize,
    inserts: usize,
    fail_at_insert: Option<usize>,
}

fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Хранилище в памяти с той же семантикой пакетов, что и у Postgres:
/// id выдаёт хранилище, внешние ключи проверяются, незакоммиченный
/// пакет откатывается при drop.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `n`-я вставка (с единицы, сквозной счёт по пакетам) отвергается
    /// как нарушение ограничения.
    pub fn failing_at_insert(n: usize) -> Self {
        let store = Self::default();
        lock(&store.state).fail_at_insert = Some(n);
        store
    }

    pub fn venues(&self) -> Vec<StoredVenue> {
        lock(&self.state).committed.venues.clone()
    }

    pub fn halls(&self) -> Vec<VenueHall> {
        lock(&self.state).committed.halls.clone()
    }

    pub fn seats(&self) -> Vec<NewSeat> {
        lock(&self.state).committed.seats.clone()
    }

    pub fn shows(&self) -> Vec<NewShow> {
        lock(&self.state).committed.shows.clone()
    }

    pub fn users(&self) -> Vec<StoredUser> {
        lock(&self.state).committed.users.clone()
    }

    pub fn batches_opened(&self) -> usize {
        lock(&self.state).batches_opened
    }

    pub fn commits(&self) -> usize {
        lock(&self.state).commits
    }
}

impl SeedStore for MemoryStore {
    type Batch = MemoryBatch;

    async fn begin(&self) -> SeedResult<MemoryBatch> {
        lock(&self.state).batches_opened += 1;
        Ok(MemoryBatch {
            state: Arc::clone(&self.state),
            pending: Tables::default(),
        })
    }

    async fn count_venues_and_halls(&self) -> SeedResult<(i64, i64)> {
        let state = lock(&self.state);
        Ok((state.committed.venues.len() as i64, state.committed.halls.len() as i64))
    }

    async fn venue_hall_pairs(&self) -> SeedResult<Vec<VenueHall>> {
        let state = lock(&self.state);
        let venues = &state.committed.venues;
        Ok(state
            .committed
            .halls
            .iter()
            .filter(|h| venues.iter().any(|v| v.id == h.venue_id))
            .copied()
            .collect())
    }
}

/// Строки пакета не видны до [`SeedBatch::commit`].
#[derive(Debug)]
pub struct MemoryBatch {
    state: Arc<Mutex<State>>,
    pending: Tables,
}

impl MemoryBatch {
    fn admit(&self, entity: &'static str) -> SeedResult<MutexGuard<'_, State>> {
        let mut state = lock(&self.state);
        state.inserts += 1;
        if state.fail_at_insert == Some(state.inserts) {
            return Err(SeedError::Constraint {
                entity,
                detail: format!("insert #{} rejected", state.inserts),
            });
        }
        Ok(state)
    }

    fn venue_exists(&self, state: &State, id: VenueId) -> bool {
        state.committed.venues.iter().chain(&self.pending.venues).any(|v| v.id == id)
    }

    fn pair_exists(&self, state: &State, pair: VenueHall) -> bool {
        state.committed.halls.iter().chain(&self.pending.halls).any(|h| *h == pair)
    }
}

impl SeedBatch for MemoryBatch {
    async fn insert_venue(&mut self, venue: &NewVenue) -> SeedResult<VenueId> {
        let mut state = self.admit("venue")?;
        state.last_venue_id += 1;
        let id = VenueId(state.last_venue_id);
        drop(state);

        self.pending.venues.push(StoredVenue {
            id,
            name: venue.name.clone(),
            location: venue.location.clone(),
        });
        Ok(id)
    }

    async fn insert_hall(&mut self, venue_id: VenueId) -> SeedResult<HallId> {
        let mut state = self.admit("hall")?;
        if !self.venue_exists(&state, venue_id) {
            return Err(SeedError::Constraint {
                entity: "hall",
                detail: format!("venue {venue_id} does not exist"),
            });
        }
        state.last_hall_id += 1;
        let hall_id = HallId(state.last_hall_id);
        drop(state);

        self.pending.halls.push(VenueHall { venue_id, hall_id });
        Ok(hall_id)
    }

    async fn insert_seat(&mut self, seat: &NewSeat) -> SeedResult<()> {
        let state = self.admit("seat")?;
        let pair = VenueHall { venue_id: seat.key.venue_id, hall_id: seat.key.hall_id };
        if !self.pair_exists(&state, pair) {
            return Err(SeedError::Constraint {
                entity: "seat",
                detail: format!("hall {} does not belong to venue {}", pair.hall_id, pair.venue_id),
            });
        }
        drop(state);

        self.pending.seats.push(seat.clone());
        Ok(())
    }

    async fn insert_show(&mut self, show: &NewShow) -> SeedResult<()> {
        let state = self.admit("show")?;
        let pair = VenueHall { venue_id: show.venue_id, hall_id: show.hall_id };
        if !self.pair_exists(&state, pair) {
            return Err(SeedError::Constraint {
                entity: "show",
                detail: format!("hall {} does not belong to venue {}", pair.hall_id, pair.venue_id),
            });
        }
        drop(state);

        self.pending.shows.push(show.clone());
        Ok(())
    }

    async fn insert_user(&mut self, username: &str, password_hash: &str) -> SeedResult<()> {
        drop(self.admit("user")?);
        self.pending.users.push(StoredUser {
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        });
        Ok(())
    }

    async fn commit(self) -> SeedResult<()> {
        let mut state = lock(&self.state);
        state.committed.append(self.pending);
        state.commits += 1;
        Ok(())
    }
}
