use sqlx::{postgres::PgPoolOptions, Pool, Postgres, Transaction};
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::error::{SeedError, SeedResult};
use crate::models::{HallId, NewSeat, NewShow, NewVenue, VenueHall, VenueId};
use crate::store::{SeedBatch, SeedStore};

/// Единственное соединение с базой на всё время работы сидера.
#[derive(Clone)]
pub struct Database {
    pub pool: Pool<Postgres>,
}

impl Database {
    pub async fn connect(config: &DatabaseConfig) -> SeedResult<Self> {
        let options = config.connect_options()?;

        // Пул на одно соединение: все запросы идут строго последовательно
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .acquire_timeout(config.connect_timeout())
            .connect_with(options)
            .await
            .map_err(SeedError::Connect)?;

        info!("Database connected");
        Ok(Database { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database connection closed");
    }
}

impl SeedStore for Database {
    type Batch = PgBatch;

    async fn begin(&self) -> SeedResult<PgBatch> {
        let tx = self.pool.begin().await?;
        Ok(PgBatch { tx })
    }

    async fn count_venues_and_halls(&self) -> SeedResult<(i64, i64)> {
        let counts = sqlx::query_as::<_, (i64, i64)>(
            "SELECT (SELECT COUNT(*) FROM Venue), (SELECT COUNT(*) FROM Hall)"
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(counts)
    }

    async fn venue_hall_pairs(&self) -> SeedResult<Vec<VenueHall>> {
        let pairs = sqlx::query_as::<_, VenueHall>(
            r#"
            SELECT Venue.VenueID AS venue_id, Hall.HallID AS hall_id
            FROM Venue
            JOIN Hall ON Hall.VenueID = Venue.VenueID
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(pairs)
    }
}

/// Открытая транзакция. Без `commit` при drop всё откатывается.
pub struct PgBatch {
    tx: Transaction<'static, Postgres>,
}

impl SeedBatch for PgBatch {
    async fn insert_venue(&mut self, venue: &NewVenue) -> SeedResult<VenueId> {
        sqlx::query_scalar::<_, VenueId>(
            "INSERT INTO Venue (VenueName, VenueLocation) VALUES ($1, $2) RETURNING VenueID"
        )
        .bind(&venue.name)
        .bind(&venue.location)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| SeedError::insert("venue", e))
    }

    async fn insert_hall(&mut self, venue_id: VenueId) -> SeedResult<HallId> {
        sqlx::query_scalar::<_, HallId>(
            "INSERT INTO Hall (VenueID) VALUES ($1) RETURNING HallID"
        )
        .bind(venue_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| SeedError::insert("hall", e))
    }

    async fn insert_seat(&mut self, seat: &NewSeat) -> SeedResult<()> {
        sqlx::query(
            "INSERT INTO Seat (SeatID, HallID, VenueID, Price, Category) VALUES ($1, $2, $3, $4, $5)"
        )
        .bind(seat.key.to_string())
        .bind(seat.key.hall_id)
        .bind(seat.key.venue_id)
        .bind(seat.price)
        .bind(seat.category.as_str())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| SeedError::insert("seat", e))?;

        Ok(())
    }

    async fn insert_show(&mut self, show: &NewShow) -> SeedResult<()> {
        sqlx::query(
            r#"
            INSERT INTO Show (ShowName, VenueID, HallID, Capacity, Time_start, Time_end)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#
        )
        .bind(&show.name)
        .bind(show.venue_id)
        .bind(show.hall_id)
        .bind(show.capacity)
        .bind(show.time_start)
        .bind(show.time_end)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| SeedError::insert("show", e))?;

        Ok(())
    }

    async fn insert_user(&mut self, username: &str, password_hash: &str) -> SeedResult<()> {
        sqlx::query("INSERT INTO Users (username, password) VALUES ($1, $2)")
            .bind(username)
            .bind(password_hash)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| SeedError::insert("user", e))?;

        Ok(())
    }

    async fn commit(self) -> SeedResult<()> {
        self.tx.commit().await?;
        debug!("Batch committed");
        Ok(())
    }
}
