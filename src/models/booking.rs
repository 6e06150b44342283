use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    BookingId, HoldId, Money, Movie, MovieId, Seat, SeatId, SeatType, ShowtimeId, ShowtimeSummary,
    UserId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

/// Seat position as it was at booking time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedSeat {
    pub seat_id: SeatId,
    pub row: char,
    pub number: u32,
    #[serde(rename = "type")]
    pub seat_type: SeatType,
}

impl From<&Seat> for BookedSeat {
    fn from(seat: &Seat) -> Self {
        Self {
            seat_id: seat.id,
            row: seat.row,
            number: seat.number,
            seat_type: seat.seat_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub reference: String,
    pub movie_id: MovieId,
    pub showtime_id: ShowtimeId,
    pub user_id: UserId,
    pub seats: Vec<BookedSeat>,
    pub total_amount: Money,
    pub payment_method: String,
    pub booking_date: DateTime<Utc>,
    pub status: BookingStatus,
}

impl Booking {
    pub fn seat_ids(&self) -> impl Iterator<Item = SeatId> + '_ {
        self.seats.iter().map(|s| s.seat_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub movie_id: MovieId,
    pub showtime_id: ShowtimeId,
    pub user_id: UserId,
    pub seat_ids: Vec<SeatId>,
    /// Total shown to the customer at checkout, checked against the server-side price.
    pub total_amount: Option<Money>,
    pub payment_method: String,
    pub booking_date: DateTime<Utc>,
    /// Hold taken for these seats before checkout, if any.
    pub hold_id: Option<HoldId>,
}

/// A booking joined with its movie and showtime for confirmation/history views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingDetails {
    #[serde(flatten)]
    pub booking: Booking,
    pub movie: Movie,
    pub showtime: ShowtimeSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookingHistory {
    pub upcoming: Vec<BookingDetails>,
    pub past: Vec<BookingDetails>,
}
