pub mod venue;
pub mod hall;
pub mod seat;
pub mod show;
pub mod user;

pub use venue::{NewVenue, VenueId};
pub use hall::{HallId, VenueHall};
pub use seat::{NewSeat, SeatCategory, SeatKey};
pub use show::NewShow;
pub use user::NewUser;
