//! Генерация синтетических записей.
//!
//! Здесь только чистые функции над `Rng`: никакого доступа к базе.
//! Идентификаторы, которые выдаёт база, передаются снаружи.

use std::collections::HashMap;
use std::ops::{Range, RangeInclusive};

use chrono::{Duration, NaiveDateTime};
use fake::faker::lorem::en::Word;
use fake::{Fake, Faker};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{HallId, NewSeat, NewShow, NewUser, NewVenue, SeatCategory, SeatKey, VenueHall, VenueId};

/// Ровно столько мест в каждом зале, нумерация с 1.
pub const SEATS_PER_HALL: u32 = 100;
/// Диапазон новой цены для пары (зал, категория).
pub const PRICE_RANGE: Range<f64> = 20.0..100.0;
pub const CAPACITY_RANGE: RangeInclusive<i32> = 50..=200;
/// Начало шоу не дальше стольких дней до или после момента генерации.
pub const SHOW_WINDOW_DAYS: i64 = 30;
pub const SHOW_DURATION_HOURS: RangeInclusive<i64> = 1..=5;

pub fn generate_venue<R: Rng + ?Sized>(rng: &mut R) -> NewVenue {
    Faker.fake_with_rng(rng)
}

/// Места для только что вставленного зала.
///
/// Цена категории выбирается при её первом появлении в зале и дальше
/// переиспользуется, поэтому у всех мест с одной парой (зал, категория)
/// одинаковая цена.
pub fn generate_hall_seats<R: Rng + ?Sized>(rng: &mut R, venue_id: VenueId, hall_id: HallId) -> Vec<NewSeat> {
    let mut category_prices: HashMap<SeatCategory, f64> = HashMap::with_capacity(SeatCategory::ALL.len());

    (1..=SEATS_PER_HALL)
        .map(|number| {
            let category: SeatCategory = rng.gen();
            let price = *category_prices
                .entry(category)
                .or_insert_with(|| rng.gen_range(PRICE_RANGE));

            NewSeat {
                key: SeatKey { venue_id, hall_id, number },
                category,
                price,
            }
        })
        .collect()
}

/// Шоу на случайной существующей паре площадка/зал.
/// `None`, если пар нет.
pub fn generate_show<R: Rng + ?Sized>(rng: &mut R, pairs: &[VenueHall], now: NaiveDateTime) -> Option<NewShow> {
    let pair = *pairs.choose(rng)?;

    let window = Duration::days(SHOW_WINDOW_DAYS).num_seconds();
    let time_start = now + Duration::seconds(rng.gen_range(-window..=window));
    let time_end = time_start + Duration::hours(rng.gen_range(SHOW_DURATION_HOURS));

    Some(NewShow {
        name: Word().fake_with_rng(rng),
        venue_id: pair.venue_id,
        hall_id: pair.hall_id,
        capacity: rng.gen_range(CAPACITY_RANGE),
        time_start,
        time_end,
    })
}

pub fn generate_user<R: Rng + ?Sized>(rng: &mut R) -> NewUser {
    Faker.fake_with_rng(rng)
}
