pub mod booking;
pub mod hold;
pub mod id;
pub mod money;
pub mod movie;
pub mod seat;
pub mod showtime;

pub use booking::{BookedSeat, Booking, BookingDetails, BookingHistory, BookingRequest, BookingStatus};
pub use hold::SeatHold;
pub use id::{BookingId, HoldId, MovieId, SeatId, ShowtimeId, UserId};
pub use money::{Money, MoneyParseError};
pub use movie::Movie;
pub use seat::{Seat, SeatStatus, SeatType};
pub use showtime::{Showtime, ShowtimeSummary, Theater};
