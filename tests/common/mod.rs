#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use cinema_booking::config::Config;
use cinema_booking::models::{BookingRequest, MovieId, SeatId, Showtime, UserId};
use cinema_booking::services::{FixedClock, RandomSource, SeededRandom};
use cinema_booking::store::{Entity, InMemoryRepository, Repository, StoreError, StoreResult, Stores};
use cinema_booking::AppState;

pub const MOVIE: &str = "1";

pub fn start_of_test() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
}

pub struct Harness {
    pub state: Arc<AppState>,
    pub clock: Arc<FixedClock>,
}

/// Fully available seat maps, deterministic schedule, clock pinned at
/// [`start_of_test`].
pub async fn harness() -> Harness {
    harness_with(|_| {}, Arc::new(SeededRandom::new(7))).await
}

pub async fn harness_with(tweak: impl FnOnce(&mut Config), random: Arc<dyn RandomSource>) -> Harness {
    harness_on(Stores::in_memory(), tweak, random).await
}

pub async fn harness_on(
    stores: Stores,
    tweak: impl FnOnce(&mut Config),
    random: Arc<dyn RandomSource>,
) -> Harness {
    let mut config = Config::defaults().unwrap();
    config.inventory.booked_probability = 0.0;
    tweak(&mut config);

    let clock = Arc::new(FixedClock::new(start_of_test()));
    let state = AppState::with_environment(config, stores, clock.clone(), random)
        .await
        .unwrap();
    Harness { state, clock }
}

impl Harness {
    pub async fn showtimes(&self) -> Vec<Showtime> {
        self.state
            .catalog
            .get_showtimes_by_movie_id(&MovieId::from(MOVIE))
            .await
            .unwrap()
    }

    pub async fn first_showtime(&self) -> Showtime {
        self.showtimes().await.remove(0)
    }

    pub fn request(&self, showtime: &Showtime, seat_ids: Vec<SeatId>, user: &str) -> BookingRequest {
        BookingRequest {
            movie_id: showtime.movie_id.clone(),
            showtime_id: showtime.id,
            user_id: UserId::from(user),
            seat_ids,
            total_amount: None,
            payment_method: "card".to_string(),
            booking_date: start_of_test(),
            hold_id: None,
        }
    }
}

pub fn seat_ids(showtime: &Showtime, count: usize) -> Vec<SeatId> {
    showtime.seats.iter().take(count).map(|s| s.id).collect()
}

/// Replays a fixed sequence of indices, wrapping around.
pub struct ScriptedRandom {
    indices: Vec<usize>,
    cursor: AtomicUsize,
}

impl ScriptedRandom {
    pub fn new(indices: Vec<usize>) -> Self {
        Self {
            indices,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Always index zero: every reference comes out identical.
    pub fn constant() -> Self {
        Self::new(vec![0])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&self) -> f64 {
        0.5
    }

    fn next_below(&self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.indices[i % self.indices.len()] % bound
    }
}

/// In-memory repository whose writes can be switched off.
pub struct FlakyRepository<T: Entity> {
    inner: InMemoryRepository<T>,
    fail_puts: AtomicBool,
}

impl<T: Entity> FlakyRepository<T> {
    pub fn new() -> Self {
        Self {
            inner: InMemoryRepository::new(),
            fail_puts: AtomicBool::new(false),
        }
    }

    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    pub async fn all(&self) -> Vec<T> {
        self.inner.query(&|_: &T| true).await.unwrap()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for FlakyRepository<T> {
    async fn get(&self, id: &T::Id) -> StoreResult<Option<T>> {
        self.inner.get(id).await
    }

    async fn put(&self, item: T) -> StoreResult<()> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        self.inner.put(item).await
    }

    async fn query(&self, filter: &(dyn for<'a> Fn(&'a T) -> bool + Send + Sync)) -> StoreResult<Vec<T>> {
        self.inner.query(filter).await
    }

    async fn remove(&self, id: &T::Id) -> StoreResult<Option<T>> {
        self.inner.remove(id).await
    }
}
