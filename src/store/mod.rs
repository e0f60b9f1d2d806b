//! Seam between the seeding workflow and wherever the rows end up.
//!
//! [`crate::database::Database`] writes to PostgreSQL, [`MemoryStore`] keeps
//! everything in process for dry runs and tests.

pub mod memory;

pub use memory::MemoryStore;

use crate::error::SeedResult;
use crate::models::{HallId, NewSeat, NewShow, NewVenue, VenueHall, VenueId};

/// Чтение и открытие пакета на запись.
#[allow(async_fn_in_trait)]
pub trait SeedStore {
    type Batch: SeedBatch;

    /// Открывает пакет. Без [`SeedBatch::commit`] все записанные через него
    /// строки теряются при drop.
    async fn begin(&self) -> SeedResult<Self::Batch>;

    /// Количество строк в `Venue` и в `Hall`.
    async fn count_venues_and_halls(&self) -> SeedResult<(i64, i64)>;

    /// Все залы вместе с их площадками.
    async fn venue_hall_pairs(&self) -> SeedResult<Vec<VenueHall>>;
}

/// Вставки в пределах одной транзакции.
#[allow(async_fn_in_trait)]
pub trait SeedBatch {
    async fn insert_venue(&mut self, venue: &NewVenue) -> SeedResult<VenueId>;

    async fn insert_hall(&mut self, venue_id: VenueId) -> SeedResult<HallId>;

    async fn insert_seat(&mut self, seat: &NewSeat) -> SeedResult<()>;

    async fn insert_show(&mut self, show: &NewShow) -> SeedResult<()>;

    async fn insert_user(&mut self, username: &str, password_hash: &str) -> SeedResult<()>;

    async fn commit(self) -> SeedResult<()>
    where
        Self: Sized;
}
