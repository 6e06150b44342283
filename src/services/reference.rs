//! Booking reference codes.
//!
//! References are short codes read aloud at the box office, so the alphabet
//! leaves out `0`, `1`, `I` and `O`.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::{BookingError, BookingResult};
use crate::models::Booking;
use crate::services::random::RandomSource;
use crate::store::{Repository, StoreError};

pub const DEFAULT_ALPHABET: &str = "ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
pub const DEFAULT_LENGTH: usize = 8;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 32;

#[derive(Debug, Error)]
enum ReferenceError {
    #[error("reference {0} is already in use")]
    Collision(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct ReferenceGenerator {
    alphabet: Vec<char>,
    length: usize,
    max_attempts: u32,
    random: Arc<dyn RandomSource>,
    // Codes handed out by this process, including ones not persisted yet.
    claimed: Mutex<HashSet<String>>,
}

impl ReferenceGenerator {
    pub fn new(
        alphabet: &str,
        length: usize,
        max_attempts: u32,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        let mut chars: Vec<char> = Vec::new();
        for c in alphabet.chars() {
            if !chars.contains(&c) {
                chars.push(c);
            }
        }
        if chars.is_empty() {
            chars = DEFAULT_ALPHABET.chars().collect();
        }

        Self {
            alphabet: chars,
            length: length.max(1),
            max_attempts: max_attempts.max(1),
            random,
            claimed: Mutex::new(HashSet::new()),
        }
    }

    pub fn with_defaults(random: Arc<dyn RandomSource>) -> Self {
        Self::new(DEFAULT_ALPHABET, DEFAULT_LENGTH, DEFAULT_MAX_ATTEMPTS, random)
    }

    /// A candidate code, not checked for uniqueness.
    pub fn generate(&self) -> String {
        (0..self.length)
            .map(|_| self.alphabet[self.random.next_below(self.alphabet.len())])
            .collect()
    }

    /// Issues a code used by no stored booking and no in-flight claim,
    /// regenerating on collision.
    pub async fn issue(&self, bookings: &dyn Repository<Booking>) -> BookingResult<String> {
        for attempt in 1..=self.max_attempts {
            let candidate = self.generate();
            match self.try_claim(&candidate, bookings).await {
                Ok(()) => {
                    debug!("Issued booking reference {} on attempt {}", candidate, attempt);
                    return Ok(candidate);
                }
                Err(ReferenceError::Collision(code)) => {
                    debug!("Reference {} collided, regenerating", code);
                }
                Err(ReferenceError::Store(e)) => return Err(e.into()),
            }
        }

        warn!("Reference space exhausted after {} attempts", self.max_attempts);
        Err(BookingError::ReferenceExhausted(self.max_attempts))
    }

    /// Drops the in-flight claim on a code, once its booking is stored or
    /// abandoned.
    pub fn release(&self, reference: &str) {
        self.claims().remove(reference);
    }

    #[cfg(test)]
    pub(crate) fn in_flight(&self) -> usize {
        self.claims().len()
    }

    async fn try_claim(
        &self,
        candidate: &str,
        bookings: &dyn Repository<Booking>,
    ) -> Result<(), ReferenceError> {
        let needle = candidate.to_string();
        let stored = bookings
            .query(&move |b: &Booking| b.reference == needle)
            .await?;

        if !stored.is_empty() || !self.claims().insert(candidate.to_string()) {
            return Err(ReferenceError::Collision(candidate.to_string()));
        }
        Ok(())
    }

    fn claims(&self) -> MutexGuard<'_, HashSet<String>> {
        self.claimed.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
