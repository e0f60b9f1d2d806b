use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::VenueId;

/// Первичный ключ, который выдаёт база (`Hall.HallID`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct HallId(pub i32);

impl std::fmt::Display for HallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Зал вместе с его площадкой. Шоу ставятся только на пары,
/// которые уже есть в базе.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRow, Serialize)]
pub struct VenueHall {
    pub venue_id: VenueId,
    pub hall_id: HallId,
}
