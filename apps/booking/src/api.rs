//! Contracts for the two hosted booking services, plus local stand-ins.
//!
//! The booking page never talks to a network directly. It is handed a
//! [`TimeLookup`] and a [`BookingSubmitter`] through its environment, so
//! production, the demo binary and tests can each plug in their own.

use crate::types::{BookingRequest, TimeSlot};
use chrono::{Datelike, NaiveDate};
use futures::FutureExt;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Failure of the time-lookup service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The service could not produce times
    #[error("Time lookup unavailable: {0}")]
    Unavailable(String),
}

/// Failure to reach the booking service at all
///
/// An explicit "not accepted" answer is `Ok(false)`, not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// Transport-level failure
    #[error("Booking service unreachable: {0}")]
    Transport(String),

    /// The service did not answer in time
    #[error("Booking service timed out")]
    Timeout,
}

/// Result of a submission call
pub type SubmissionResult = Result<bool, SubmissionError>;

/// Boxed future returned by [`BookingSubmitter::submit`]
pub type SubmissionFuture = BoxFuture<'static, SubmissionResult>;

/// Looks up bookable times for a date
///
/// Called synchronously from the reducer; implementations must not block
/// for long.
pub trait TimeLookup: Send + Sync {
    /// Ordered `"HH:MM"` slots offered on `date`
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the service cannot answer.
    fn available_times(&self, date: NaiveDate) -> Result<Vec<TimeSlot>, LookupError>;
}

/// Hands a completed booking to the restaurant
pub trait BookingSubmitter: Send + Sync {
    /// Submit a booking
    ///
    /// Resolves to `Ok(true)` when accepted, `Ok(false)` when the service
    /// declines it, and `Err` when the call itself fails.
    fn submit(&self, request: BookingRequest) -> SubmissionFuture;
}

/// Deterministic local stand-in for the hosted time lookup
///
/// Seeds a Park-Miller style generator with the day of the month and offers
/// each half hour between 17:00 and 23:30 with probability one half, so a
/// given date always yields the same slots.
#[derive(Clone, Copy, Debug, Default)]
pub struct SeededTimeLookup;

impl SeededTimeLookup {
    /// Creates a new seeded lookup
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared() -> Arc<dyn TimeLookup> {
        Arc::new(Self::new())
    }
}

const SEED_MODULUS: u64 = (1 << 35) - 31;
const SEED_MULTIPLIER: u64 = 185_852;
const FIRST_SEATING_HOUR: u32 = 17;
const LAST_SEATING_HOUR: u32 = 23;

#[allow(clippy::cast_precision_loss)] // both operands are below 2^36
fn seeded_random(seed: u64) -> impl FnMut() -> f64 {
    let mut state = seed % SEED_MODULUS;
    move || {
        state = state * SEED_MULTIPLIER % SEED_MODULUS;
        state as f64 / SEED_MODULUS as f64
    }
}

impl TimeLookup for SeededTimeLookup {
    fn available_times(&self, date: NaiveDate) -> Result<Vec<TimeSlot>, LookupError> {
        let mut random = seeded_random(u64::from(date.day()));
        let mut slots = Vec::new();

        for hour in FIRST_SEATING_HOUR..=LAST_SEATING_HOUR {
            for minute in [0, 30] {
                if random() < 0.5 {
                    slots.extend(TimeSlot::from_hm(hour, minute));
                }
            }
        }

        tracing::debug!(%date, slots = slots.len(), "Seeded time lookup");
        Ok(slots)
    }
}

/// Local stand-in for the booking service that accepts every request
#[derive(Clone, Debug, Default)]
pub struct AcceptingSubmitter {
    latency: Duration,
}

impl AcceptingSubmitter {
    /// Accepts immediately
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latency: Duration::ZERO,
        }
    }

    /// Accepts after a simulated network delay
    #[must_use]
    pub const fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared(latency: Duration) -> Arc<dyn BookingSubmitter> {
        Arc::new(Self::with_latency(latency))
    }
}

impl BookingSubmitter for AcceptingSubmitter {
    fn submit(&self, request: BookingRequest) -> SubmissionFuture {
        let latency = self.latency;
        async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }

            tracing::info!(
                date = %request.date,
                time = %request.time,
                guests = request.guests,
                "Booking accepted by local service"
            );

            Ok(true)
        }
        .boxed()
    }
}
