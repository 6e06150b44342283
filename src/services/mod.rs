pub mod catalog;
pub mod cleanup;
pub mod clock;
pub mod inventory;
pub mod pricing;
pub mod query;
pub mod random;
pub mod reference;
pub mod reservation;

pub use catalog::Catalog;
pub use cleanup::CleanupService;
pub use clock::{Clock, FixedClock, SystemClock};
pub use inventory::SeatMapGenerator;
pub use pricing::{PriceQuote, PricingPolicy};
pub use query::BookingQueryService;
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use reference::ReferenceGenerator;
pub use reservation::ReservationEngine;
