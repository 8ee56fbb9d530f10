//! # Little Lemon Testing
//!
//! Testing utilities and helpers for the Little Lemon reducer architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A Given-When-Then harness for reducers
//! - Assertion helpers for effects
//! - Tracing setup for tests
//!
//! ## Example
//!
//! ```ignore
//! use little_lemon_testing::{ReducerTest, assertions, test_clock};
//!
//! ReducerTest::new(BookingReducer::new())
//!     .with_env(test_environment())
//!     .given_state(BookingPageState::default())
//!     .when_action(BookingAction::GuestsChanged { raw: "4".into() })
//!     .then_state(|state| assert!(state.form.guests.is_in_range()))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use little_lemon_core::environment::Clock;


pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use little_lemon_testing::mocks::FixedClock;
    /// use little_lemon_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }

        /// Create a fixed clock from an RFC 3339 timestamp
        ///
        /// Returns `None` when the timestamp does not parse.
        #[must_use]
        pub fn at(timestamp: &str) -> Option<Self> {
            DateTime::parse_from_rfc3339(timestamp)
                .ok()
                .map(|time| Self::new(time.with_timezone(&Utc)))
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 12:00:00 UTC)
    ///
    /// Noon keeps "today" on the same calendar day for any offset within
    /// twelve hours of UTC.
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::from_timestamp(1_735_732_800, 0).unwrap_or_default())
    }
}

/// Install a `tracing` subscriber for tests
///
/// Honors `RUST_LOG` and writes through the test harness' capture. Safe to
/// call from every test; only the first call installs the subscriber.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
