//! Availability store: the times currently offered for the selected date.
//!
//! The list is only ever replaced wholesale by a fresh lookup. A failed
//! lookup leaves the previous list in place and records the error so the
//! page can show a notice while the form stays usable.

use crate::api::{LookupError, TimeLookup};
use crate::types::TimeSlot;
use chrono::NaiveDate;
use little_lemon_core::{SmallVec, effect::Effect, reducer::Reducer};
use std::sync::Arc;

/// Times offered for one date
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AvailabilityState {
    /// Ordered slots from the most recent successful lookup
    pub times: Vec<TimeSlot>,
    /// Date the slots belong to; `None` before the first lookup succeeds
    pub date: Option<NaiveDate>,
    /// Error from the most recent lookup, cleared by the next success
    pub last_error: Option<LookupError>,
}

impl AvailabilityState {
    /// Whether `slot` is currently offered
    #[must_use]
    pub fn offers(&self, slot: &TimeSlot) -> bool {
        self.times.contains(slot)
    }

    /// Replaces the list with a fresh lookup for `date`
    ///
    /// # Errors
    ///
    /// Returns the lookup error; the previous list is kept untouched.
    pub fn refresh(&mut self, lookup: &dyn TimeLookup, date: NaiveDate) -> Result<(), LookupError> {
        match lookup.available_times(date) {
            Ok(times) => {
                tracing::debug!(%date, slots = times.len(), "Available times replaced");
                self.times = times;
                self.date = Some(date);
                self.last_error = None;
                Ok(())
            },
            Err(error) => {
                tracing::warn!(%date, %error, "Time lookup failed, keeping previous times");
                self.last_error = Some(error.clone());
                Err(error)
            },
        }
    }
}

/// Inputs to the availability store
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AvailabilityAction {
    /// Page mounted: load today's times
    Initialize {
        /// Today in the restaurant's time zone
        today: NaiveDate,
    },
    /// Selected date changed: replace the list with that date's times
    Refresh {
        /// Newly selected date
        date: NaiveDate,
    },
}

/// Dependencies of the availability store
#[derive(Clone)]
pub struct AvailabilityEnvironment {
    /// Time-lookup service
    pub lookup: Arc<dyn TimeLookup>,
}

impl AvailabilityEnvironment {
    /// Creates a new `AvailabilityEnvironment`
    #[must_use]
    pub fn new(lookup: Arc<dyn TimeLookup>) -> Self {
        Self { lookup }
    }
}

/// Reducer for the availability store
#[derive(Clone, Copy, Debug, Default)]
pub struct AvailabilityReducer;

impl Reducer for AvailabilityReducer {
    type State = AvailabilityState;
    type Action = AvailabilityAction;
    type Environment = AvailabilityEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let date = match action {
            AvailabilityAction::Initialize { today } => today,
            AvailabilityAction::Refresh { date } => date,
        };

        // Failure is recorded on the state for the caller to surface
        let _ = state.refresh(env.lookup.as_ref(), date);

        SmallVec::new()
    }
}
