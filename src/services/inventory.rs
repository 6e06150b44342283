//! Seat map generation for a showtime.
//!
//! The auditorium shape is fixed: rows `A`–`K` without `I`, twelve seats per
//! row, and an aisle gap that removes the outer seats of rows `E` and `F`.
//! Only the initial booked/available status is random.

use std::sync::Arc;
use tracing::debug;

use crate::models::{Seat, SeatId, SeatStatus, SeatType, ShowtimeId};
use crate::services::random::RandomSource;

pub const ROWS: [char; 10] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K'];
pub const SEATS_PER_ROW: u32 = 12;
/// Rows whose first and last seat are removed to form the side aisles.
pub const AISLE_ROWS: [char; 2] = ['E', 'F'];
pub const VIP_ROWS: [char; 2] = ['J', 'K'];
pub const DEFAULT_BOOKED_PROBABILITY: f64 = 0.2;

/// Number of seats in every generated map.
pub const SEATS_PER_MAP: usize = ROWS.len() * SEATS_PER_ROW as usize - AISLE_ROWS.len() * 2;

pub fn is_aisle_gap(row: char, number: u32) -> bool {
    AISLE_ROWS.contains(&row) && (number == 1 || number == SEATS_PER_ROW)
}

pub fn seat_type_at(row: char, number: u32) -> SeatType {
    if VIP_ROWS.contains(&row) {
        SeatType::Vip
    } else if row == 'A' && (number == 1 || number == 2) {
        SeatType::Handicap
    } else {
        SeatType::Regular
    }
}

#[derive(Clone)]
pub struct SeatMapGenerator {
    random: Arc<dyn RandomSource>,
    booked_probability: f64,
}

impl SeatMapGenerator {
    pub fn new(random: Arc<dyn RandomSource>, booked_probability: f64) -> Self {
        Self {
            random,
            booked_probability: booked_probability.clamp(0.0, 1.0),
        }
    }

    /// Builds a fresh seat map in row-major order. Draws exactly one random
    /// value per generated seat.
    pub fn generate(&self, showtime_id: ShowtimeId) -> Vec<Seat> {
        let mut seats = Vec::with_capacity(SEATS_PER_MAP);

        for row in ROWS {
            for number in 1..=SEATS_PER_ROW {
                if is_aisle_gap(row, number) {
                    continue;
                }

                let status = if self.random.next_f64() < self.booked_probability {
                    SeatStatus::Booked
                } else {
                    SeatStatus::Available
                };

                seats.push(Seat {
                    id: SeatId::new(),
                    row,
                    number,
                    status,
                    seat_type: seat_type_at(row, number),
                });
            }
        }

        debug!(
            "Generated {} seats for showtime {} ({} pre-booked)",
            seats.len(),
            showtime_id,
            seats.iter().filter(|s| s.status == SeatStatus::Booked).count()
        );
        seats
    }
}
