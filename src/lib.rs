pub mod config;
pub mod controllers;
pub mod error;
pub mod middleware;
pub mod models;
pub mod seed;
pub mod services;
pub mod store;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::error::BookingResult;
use crate::services::{
    BookingQueryService, Catalog, Clock, PricingPolicy, RandomSource, ReferenceGenerator,
    ReservationEngine, SeatMapGenerator, SeededRandom, SystemClock, ThreadRandom,
};
use crate::store::Stores;

// Shared state for the whole application
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub reservations: Arc<ReservationEngine>,
    pub bookings: BookingQueryService,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// In-memory stores, wall clock, and a seeded or thread-local random source.
    pub async fn new(config: config::Config) -> BookingResult<Arc<Self>> {
        let random: Arc<dyn RandomSource> = match config.inventory.seed {
            Some(seed) => {
                info!("Using fixed random seed {}", seed);
                Arc::new(SeededRandom::new(seed))
            }
            None => Arc::new(ThreadRandom),
        };

        Self::with_environment(config, Stores::in_memory(), Arc::new(SystemClock), random).await
    }

    /// Wires the services over the given stores, clock and random source and
    /// seeds the movie catalog.
    pub async fn with_environment(
        config: config::Config,
        stores: Stores,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
    ) -> BookingResult<Arc<Self>> {
        let seat_maps = SeatMapGenerator::new(random.clone(), config.inventory.booked_probability);
        let catalog = Arc::new(Catalog::new(
            &stores,
            seat_maps,
            random.clone(),
            clock.clone(),
            &config.catalog,
        ));
        catalog.seed(seed::movies()).await?;

        let pricing = PricingPolicy::new(config.pricing.base_price, config.pricing.booking_fee);
        let references = ReferenceGenerator::new(
            &config.reference.alphabet,
            config.reference.length,
            config.reference.max_attempts,
            random,
        );
        let bookings = BookingQueryService::new(stores.bookings.clone(), catalog.clone());
        let reservations = Arc::new(ReservationEngine::new(
            stores,
            catalog.clone(),
            pricing,
            references,
            clock.clone(),
            config.holds.ttl(),
        ));

        Ok(Arc::new(Self {
            catalog,
            reservations,
            bookings,
            clock,
        }))
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Cinema Booking API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
