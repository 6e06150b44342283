//! Storage seam for catalog, booking and hold collections.
//!
//! Every collection is keyed by its entity id and accessed through
//! [`Repository`], so services never touch process-global state and tests can
//! swap in their own backend.

use async_trait::async_trait;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use thiserror::Error;

use crate::models::{Booking, BookingId, HoldId, Movie, MovieId, SeatHold, Showtime, ShowtimeId};

pub mod memory;

pub use memory::InMemoryRepository;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A record that can live in a [`Repository`].
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    fn id(&self) -> Self::Id;
}

#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    async fn get(&self, id: &T::Id) -> StoreResult<Option<T>>;

    /// Inserts or replaces the record with the same id.
    async fn put(&self, item: T) -> StoreResult<()>;

    /// Records matching `filter`, in insertion order.
    async fn query(&self, filter: &(dyn for<'a> Fn(&'a T) -> bool + Send + Sync)) -> StoreResult<Vec<T>>;

    async fn remove(&self, id: &T::Id) -> StoreResult<Option<T>>;
}

impl Entity for Movie {
    type Id = MovieId;

    fn id(&self) -> MovieId {
        self.id.clone()
    }
}

impl Entity for Showtime {
    type Id = ShowtimeId;

    fn id(&self) -> ShowtimeId {
        self.id
    }
}

impl Entity for Booking {
    type Id = BookingId;

    fn id(&self) -> BookingId {
        self.id
    }
}

impl Entity for SeatHold {
    type Id = HoldId;

    fn id(&self) -> HoldId {
        self.id
    }
}

/// The four collections the service works with.
#[derive(Clone)]
pub struct Stores {
    pub movies: Arc<dyn Repository<Movie>>,
    pub showtimes: Arc<dyn Repository<Showtime>>,
    pub bookings: Arc<dyn Repository<Booking>>,
    pub holds: Arc<dyn Repository<SeatHold>>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            movies: Arc::new(InMemoryRepository::<Movie>::new()),
            showtimes: Arc::new(InMemoryRepository::<Showtime>::new()),
            bookings: Arc::new(InMemoryRepository::<Booking>::new()),
            holds: Arc::new(InMemoryRepository::<SeatHold>::new()),
        }
    }
}
