use fake::faker::address::en::CityName;
use fake::faker::company::en::CompanyName;
use fake::Dummy;
use serde::{Deserialize, Serialize};

/// Первичный ключ, который выдаёт база (`Venue.VenueID`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct VenueId(pub i32);

impl std::fmt::Display for VenueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// Названия не уникальны, дубли допустимы
#[derive(Debug, Clone, Serialize, Dummy)]
pub struct NewVenue {
    #[dummy(faker = "CompanyName()")]
    pub name: String,
    #[dummy(faker = "CityName()")]
    pub location: String,
}
