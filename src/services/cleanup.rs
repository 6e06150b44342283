use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::services::reservation::ReservationEngine;

/// Periodically returns seats of expired holds to sale.
pub struct CleanupService {
    reservations: Arc<ReservationEngine>,
    interval: Duration,
}

impl CleanupService {
    pub fn new(reservations: Arc<ReservationEngine>, interval: Duration) -> Self {
        Self {
            reservations,
            interval,
        }
    }

    /// One sweep over all holds. Returns the number of holds released.
    pub async fn run_full_cleanup(&self) -> usize {
        match self.reservations.expire_holds().await {
            Ok(0) => {
                debug!("No expired seat holds to clean up");
                0
            }
            Ok(released) => {
                info!("Released {} expired seat holds", released);
                released
            }
            Err(e) => {
                error!("Seat hold cleanup failed: {}", e);
                0
            }
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            loop {
                ticker.tick().await;
                self.run_full_cleanup().await;
            }
        })
    }
}
