use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{HoldId, SeatId, ShowtimeId, UserId};

/// Temporary claim on seats while the customer completes checkout.
///
/// Held seats are `reserved` in the showtime's seat map until the hold is
/// consumed by a booking, released, or expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatHold {
    pub id: HoldId,
    pub showtime_id: ShowtimeId,
    pub user_id: UserId,
    pub seat_ids: Vec<SeatId>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SeatHold {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    pub fn covers(&self, seat_id: SeatId) -> bool {
        self.seat_ids.contains(&seat_id)
    }
}
