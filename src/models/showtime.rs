use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{MovieId, Seat, SeatId, SeatStatus, ShowtimeId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theater {
    pub id: String,
    pub name: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Showtime {
    pub id: ShowtimeId,
    pub movie_id: MovieId,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub theater: Theater,
    pub seats: Vec<Seat>,
}

/// Showtime without its seat map, used in listings and booking views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowtimeSummary {
    pub id: ShowtimeId,
    pub movie_id: MovieId,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub theater: Theater,
    pub available_seats: usize,
}

impl Showtime {
    pub fn seat(&self, seat_id: SeatId) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == seat_id)
    }

    pub fn seat_mut(&mut self, seat_id: SeatId) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|s| s.id == seat_id)
    }

    pub fn count_with_status(&self, status: SeatStatus) -> usize {
        self.seats.iter().filter(|s| s.status == status).count()
    }

    pub fn summary(&self) -> ShowtimeSummary {
        ShowtimeSummary {
            id: self.id,
            movie_id: self.movie_id.clone(),
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            theater: self.theater.clone(),
            available_seats: self.count_with_status(SeatStatus::Available),
        }
    }
}
