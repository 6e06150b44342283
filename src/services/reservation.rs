//! Seat holds and booking creation.
//!
//! Every seat status transition for a showtime happens while holding that
//! showtime's lock, so the availability check and the write that follows it
//! are atomic with respect to other holds and bookings on the same showtime.

use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{error, info, warn};

use crate::error::{BookingError, BookingResult};
use crate::models::{
    BookedSeat, Booking, BookingId, BookingRequest, BookingStatus, HoldId, Seat, SeatHold, SeatId,
    SeatStatus, Showtime, ShowtimeId, UserId,
};
use crate::services::catalog::Catalog;
use crate::services::clock::Clock;
use crate::services::pricing::{PriceQuote, PricingPolicy};
use crate::services::reference::ReferenceGenerator;
use crate::store::Stores;

#[derive(Default)]
struct ShowtimeLocks {
    locks: StdMutex<HashMap<ShowtimeId, Arc<Mutex<()>>>>,
}

impl ShowtimeLocks {
    async fn acquire(&self, showtime_id: ShowtimeId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.entry(showtime_id).or_default().clone()
        };
        lock.lock_owned().await
    }
}

pub struct ReservationEngine {
    stores: Stores,
    catalog: Arc<Catalog>,
    pricing: PricingPolicy,
    references: ReferenceGenerator,
    clock: Arc<dyn Clock>,
    hold_ttl: Duration,
    locks: ShowtimeLocks,
}

impl ReservationEngine {
    pub fn new(
        stores: Stores,
        catalog: Arc<Catalog>,
        pricing: PricingPolicy,
        references: ReferenceGenerator,
        clock: Arc<dyn Clock>,
        hold_ttl: Duration,
    ) -> Self {
        Self {
            stores,
            catalog,
            pricing,
            references,
            clock,
            hold_ttl,
            locks: ShowtimeLocks::default(),
        }
    }

    /// Price of a prospective selection. Does not check availability.
    pub async fn quote(&self, showtime_id: ShowtimeId, seat_ids: &[SeatId]) -> BookingResult<PriceQuote> {
        let seat_ids = distinct(seat_ids);
        if seat_ids.is_empty() {
            return Err(BookingError::EmptySelection);
        }

        let showtime = self.catalog.get_showtime_by_id(showtime_id).await?;
        ensure_seats_exist(&showtime, &seat_ids)?;
        self.pricing.quote(seat_ids.len())
    }

    /* ---------- HOLDS ---------- */

    pub async fn hold_seats(
        &self,
        showtime_id: ShowtimeId,
        user_id: &UserId,
        seat_ids: &[SeatId],
    ) -> BookingResult<SeatHold> {
        let seat_ids = distinct(seat_ids);
        if seat_ids.is_empty() {
            return Err(BookingError::EmptySelection);
        }

        let _guard = self.locks.acquire(showtime_id).await;
        let now = self.clock.now();

        let mut showtime = self.catalog.get_showtime_by_id(showtime_id).await?;
        self.sweep_showtime_locked(&mut showtime, now).await?;
        ensure_seats_exist(&showtime, &seat_ids)?;

        let conflicts: Vec<SeatId> = seat_ids
            .iter()
            .copied()
            .filter(|id| !showtime.seat(*id).is_some_and(Seat::is_available))
            .collect();
        if !conflicts.is_empty() {
            warn!(
                "Hold rejected for user {} on showtime {}: {} seats unavailable",
                user_id,
                showtime_id,
                conflicts.len()
            );
            return Err(BookingError::SeatUnavailable(conflicts));
        }

        for id in &seat_ids {
            if let Some(seat) = showtime.seat_mut(*id) {
                seat.status = SeatStatus::Reserved;
            }
        }

        let hold = SeatHold {
            id: HoldId::new(),
            showtime_id,
            user_id: user_id.clone(),
            seat_ids,
            created_at: now,
            expires_at: now + self.hold_ttl,
        };

        self.stores.holds.put(hold.clone()).await?;
        if let Err(e) = self.stores.showtimes.put(showtime).await {
            if let Err(undo) = self.stores.holds.remove(&hold.id).await {
                error!("Failed to drop hold {} after seat write failure: {}", hold.id, undo);
            }
            return Err(e.into());
        }

        info!(
            "Hold {} placed by user {} on {} seats of showtime {} until {}",
            hold.id,
            user_id,
            hold.seat_ids.len(),
            showtime_id,
            hold.expires_at
        );
        Ok(hold)
    }

    pub async fn release_hold(&self, hold_id: HoldId, user_id: &UserId) -> BookingResult<SeatHold> {
        let showtime_id = self.owned_hold(hold_id, user_id).await?.showtime_id;

        let _guard = self.locks.acquire(showtime_id).await;
        // Re-read under the lock: the hold may have been consumed or swept meanwhile.
        let hold = self.owned_hold(hold_id, user_id).await?;

        let mut showtime = self.catalog.get_showtime_by_id(showtime_id).await?;
        release_held_seats(&mut showtime, &hold);
        self.stores.showtimes.put(showtime).await?;
        self.stores.holds.remove(&hold_id).await?;

        info!("Hold {} released by user {}", hold_id, user_id);
        Ok(hold)
    }

    /// Releases every hold whose expiry has passed. Returns how many holds
    /// were released.
    pub async fn expire_holds(&self) -> BookingResult<usize> {
        let now = self.clock.now();
        let expired = self
            .stores
            .holds
            .query(&move |h: &SeatHold| h.is_expired(now))
            .await?;

        let mut seen = HashSet::new();
        let showtime_ids: Vec<ShowtimeId> = expired
            .iter()
            .map(|h| h.showtime_id)
            .filter(|id| seen.insert(*id))
            .collect();

        let mut released = 0;
        for showtime_id in showtime_ids {
            let _guard = self.locks.acquire(showtime_id).await;
            match self.catalog.get_showtime_by_id(showtime_id).await {
                Ok(mut showtime) => {
                    released += self.sweep_showtime_locked(&mut showtime, now).await?;
                }
                Err(BookingError::ShowtimeNotFound(_)) => {
                    for hold in expired.iter().filter(|h| h.showtime_id == showtime_id) {
                        warn!("Dropping hold {} for missing showtime {}", hold.id, showtime_id);
                        self.stores.holds.remove(&hold.id).await?;
                        released += 1;
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Ok(released)
    }

    /* ---------- BOOKINGS ---------- */

    /// Validates the selection against the live seat map and commits it.
    ///
    /// Either every requested seat becomes `booked` and the booking is
    /// stored, or nothing changes.
    pub async fn create_booking(&self, request: BookingRequest) -> BookingResult<Booking> {
        let seat_ids = distinct(&request.seat_ids);
        if seat_ids.is_empty() {
            return Err(BookingError::EmptySelection);
        }

        let movie = self.catalog.get_movie_by_id(&request.movie_id).await?;

        let _guard = self.locks.acquire(request.showtime_id).await;
        let now = self.clock.now();

        let mut showtime = self.catalog.get_showtime_by_id(request.showtime_id).await?;
        if showtime.movie_id != movie.id {
            return Err(BookingError::ShowtimeMovieMismatch {
                showtime_id: showtime.id,
                movie_id: movie.id,
            });
        }
        self.sweep_showtime_locked(&mut showtime, now).await?;

        let hold = match request.hold_id {
            Some(hold_id) => {
                let hold = self.owned_hold(hold_id, &request.user_id).await?;
                if hold.showtime_id != showtime.id {
                    return Err(BookingError::HoldNotFound(hold_id));
                }
                Some(hold)
            }
            None => None,
        };

        ensure_seats_exist(&showtime, &seat_ids)?;

        let conflicts: Vec<SeatId> = seat_ids
            .iter()
            .copied()
            .filter(|id| !is_bookable(showtime.seat(*id), hold.as_ref()))
            .collect();
        if !conflicts.is_empty() {
            warn!(
                "Booking rejected for user {} on showtime {}: {} seats unavailable",
                request.user_id,
                showtime.id,
                conflicts.len()
            );
            return Err(BookingError::SeatUnavailable(conflicts));
        }

        let quote = self.pricing.quote(seat_ids.len())?;
        if let Some(quoted) = request.total_amount {
            if quoted != quote.total {
                warn!("Quoted total {} differs from computed {}", quoted, quote.total);
                return Err(BookingError::TotalMismatch {
                    quoted,
                    computed: quote.total,
                });
            }
        }

        let reference = self.references.issue(self.stores.bookings.as_ref()).await?;

        let previous = showtime.clone();
        let mut seats = Vec::with_capacity(seat_ids.len());
        for id in &seat_ids {
            if let Some(seat) = showtime.seat_mut(*id) {
                seat.status = SeatStatus::Booked;
                seats.push(BookedSeat::from(&*seat));
            }
        }
        if let Some(hold) = &hold {
            // Held seats left out of the booking go back on sale.
            release_held_seats(&mut showtime, hold);
        }

        let booking = Booking {
            id: BookingId::new(),
            reference,
            movie_id: movie.id,
            showtime_id: showtime.id,
            user_id: request.user_id,
            seats,
            total_amount: quote.total,
            payment_method: request.payment_method,
            booking_date: request.booking_date,
            status: BookingStatus::Confirmed,
        };

        if let Err(e) = self.stores.showtimes.put(showtime).await {
            self.references.release(&booking.reference);
            return Err(e.into());
        }
        let stored = self.stores.bookings.put(booking.clone()).await;
        // Once stored, the bookings lookup guards the code; drop the claim either way.
        self.references.release(&booking.reference);
        if let Err(e) = stored {
            if let Err(restore) = self.stores.showtimes.put(previous).await {
                error!(
                    "Failed to restore seat map of showtime {} after booking write failure: {}",
                    booking.showtime_id, restore
                );
            }
            return Err(e.into());
        }

        if let Some(hold) = hold {
            if let Err(e) = self.stores.holds.remove(&hold.id).await {
                warn!("Booking {} committed but hold {} was not removed: {}", booking.id, hold.id, e);
            }
        }

        info!(
            "Booking {} ({}) confirmed for user {}: {} seats on showtime {}, total {}",
            booking.id,
            booking.reference,
            booking.user_id,
            booking.seats.len(),
            booking.showtime_id,
            booking.total_amount
        );
        Ok(booking)
    }

    /* ---------- helpers ---------- */

    async fn owned_hold(&self, hold_id: HoldId, user_id: &UserId) -> BookingResult<SeatHold> {
        self.stores
            .holds
            .get(&hold_id)
            .await?
            .filter(|h| &h.user_id == user_id)
            .ok_or(BookingError::HoldNotFound(hold_id))
    }

    /// Releases expired holds on `showtime`. Caller must hold the showtime lock.
    async fn sweep_showtime_locked(
        &self,
        showtime: &mut Showtime,
        now: DateTime<Utc>,
    ) -> BookingResult<usize> {
        let showtime_id = showtime.id;
        let expired = self
            .stores
            .holds
            .query(&move |h: &SeatHold| h.showtime_id == showtime_id && h.is_expired(now))
            .await?;
        if expired.is_empty() {
            return Ok(0);
        }

        for hold in &expired {
            release_held_seats(showtime, hold);
        }
        self.stores.showtimes.put(showtime.clone()).await?;
        for hold in &expired {
            self.stores.holds.remove(&hold.id).await?;
        }

        info!("Released {} expired holds on showtime {}", expired.len(), showtime_id);
        Ok(expired.len())
    }
}

fn distinct(seat_ids: &[SeatId]) -> Vec<SeatId> {
    let mut seen = HashSet::with_capacity(seat_ids.len());
    seat_ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

fn ensure_seats_exist(showtime: &Showtime, seat_ids: &[SeatId]) -> BookingResult<()> {
    match seat_ids.iter().find(|id| showtime.seat(**id).is_none()) {
        Some(missing) => Err(BookingError::SeatNotFound {
            showtime_id: showtime.id,
            seat_id: *missing,
        }),
        None => Ok(()),
    }
}

fn is_bookable(seat: Option<&Seat>, hold: Option<&SeatHold>) -> bool {
    match seat {
        Some(seat) => match seat.status {
            SeatStatus::Available => true,
            SeatStatus::Reserved => hold.is_some_and(|h| h.covers(seat.id)),
            SeatStatus::Booked => false,
        },
        None => false,
    }
}

fn release_held_seats(showtime: &mut Showtime, hold: &SeatHold) {
    for seat in showtime
        .seats
        .iter_mut()
        .filter(|s| s.status == SeatStatus::Reserved && hold.covers(s.id))
    {
        seat.status = SeatStatus::Available;
    }
}
