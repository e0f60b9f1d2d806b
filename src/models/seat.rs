use rand::distributions::{Distribution, Standard};
use rand::Rng;
use serde::Serialize;

use super::{HallId, VenueId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SeatCategory {
    #[serde(rename = "VIP")]
    Vip,
    Regular,
    Economy,
}

impl SeatCategory {
    pub const ALL: [SeatCategory; 3] = [SeatCategory::Vip, SeatCategory::Regular, SeatCategory::Economy];

    /// Значение для колонки `Seat.Category`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatCategory::Vip => "VIP",
            SeatCategory::Regular => "Regular",
            SeatCategory::Economy => "Economy",
        }
    }
}

impl std::fmt::Display for SeatCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Равномерный выбор категории: rng.gen::<SeatCategory>()
impl Distribution<SeatCategory> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SeatCategory {
        SeatCategory::ALL[rng.gen_range(0..SeatCategory::ALL.len())]
    }
}

/// Составной ключ места. Везде хранится тремя полями и превращается
/// в строку `venue-hall-number` только для текстовой колонки `SeatID`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SeatKey {
    pub venue_id: VenueId,
    pub hall_id: HallId,
    pub number: u32,
}

impl std::fmt::Display for SeatKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.venue_id, self.hall_id, self.number)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSeat {
    pub key: SeatKey,
    pub category: SeatCategory,
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_key_renders_for_the_text_column() {
        let key = SeatKey { venue_id: VenueId(3), hall_id: HallId(7), number: 42 };
        assert_eq!(key.to_string(), "3-7-42");
    }

    #[test]
    fn category_names_match_the_stored_values() {
        let names: Vec<_> = SeatCategory::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, ["VIP", "Regular", "Economy"]);
    }
}
