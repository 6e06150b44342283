use serde::{Deserialize, Serialize};

use super::SeatId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Booked,
    /// Held by a pending checkout; see `SeatHold`.
    Reserved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatType {
    Regular,
    Vip,
    Handicap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub id: SeatId,
    pub row: char,
    pub number: u32,
    pub status: SeatStatus,
    #[serde(rename = "type")]
    pub seat_type: SeatType,
}

impl Seat {
    pub fn is_available(&self) -> bool {
        self.status == SeatStatus::Available
    }

    /// Label printed on the ticket, e.g. `E7`.
    pub fn label(&self) -> String {
        format!("{}{}", self.row, self.number)
    }
}
