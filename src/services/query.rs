use chrono::{DateTime, NaiveTime, Utc};
use std::sync::Arc;
use tracing::debug;

use crate::error::{BookingError, BookingResult};
use crate::models::{Booking, BookingDetails, BookingHistory, BookingId, UserId};
use crate::services::catalog::Catalog;
use crate::store::Repository;

/// Read side for confirmation and profile views.
#[derive(Clone)]
pub struct BookingQueryService {
    bookings: Arc<dyn Repository<Booking>>,
    catalog: Arc<Catalog>,
}

impl BookingQueryService {
    pub fn new(bookings: Arc<dyn Repository<Booking>>, catalog: Arc<Catalog>) -> Self {
        Self { bookings, catalog }
    }

    pub async fn get_booking_by_id(&self, id: BookingId) -> BookingResult<Booking> {
        self.bookings
            .get(&id)
            .await?
            .ok_or(BookingError::BookingNotFound(id))
    }

    /// Newest booking first.
    pub async fn get_user_bookings(&self, user_id: &UserId) -> BookingResult<Vec<Booking>> {
        let owner = user_id.clone();
        let mut bookings = self
            .bookings
            .query(&move |b: &Booking| b.user_id == owner)
            .await?;
        bookings.sort_by(|a, b| b.booking_date.cmp(&a.booking_date));
        debug!("Found {} bookings for user {}", bookings.len(), user_id);
        Ok(bookings)
    }

    pub async fn get_booking_details(&self, id: BookingId) -> BookingResult<BookingDetails> {
        let booking = self.get_booking_by_id(id).await?;
        self.join(booking).await
    }

    pub async fn get_user_booking_history(
        &self,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> BookingResult<BookingHistory> {
        let mut details = Vec::new();
        for booking in self.get_user_bookings(user_id).await? {
            details.push(self.join(booking).await?);
        }
        Ok(partition_by_showtime_date(details, now))
    }

    async fn join(&self, booking: Booking) -> BookingResult<BookingDetails> {
        let movie = self.catalog.get_movie_by_id(&booking.movie_id).await?;
        let showtime = self.catalog.get_showtime_by_id(booking.showtime_id).await?;
        Ok(BookingDetails {
            booking,
            movie,
            showtime: showtime.summary(),
        })
    }
}

/// Splits bookings by the showtime's date, not the booking date. The date
/// stands for midnight UTC, so a showtime dated today is already past once
/// the day has started. Input order is kept.
pub fn partition_by_showtime_date(details: Vec<BookingDetails>, now: DateTime<Utc>) -> BookingHistory {
    let (upcoming, past): (Vec<_>, Vec<_>) = details
        .into_iter()
        .partition(|d| d.showtime.date.and_time(NaiveTime::MIN).and_utc() >= now);
    BookingHistory { upcoming, past }
}
