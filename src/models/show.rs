use chrono::NaiveDateTime;
use serde::Serialize;

use super::{HallId, VenueId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewShow {
    pub name: String,
    pub venue_id: VenueId,
    pub hall_id: HallId,
    pub capacity: i32,
    pub time_start: NaiveDateTime,
    pub time_end: NaiveDateTime,
}
