//! Shared fixtures for booking integration tests

#![allow(dead_code, clippy::unwrap_used)]

use booking::{
    BookingConfig, BookingEnvironment, BookingPageState, BookingReducer, BookingRequest,
    BookingSubmitter, LookupError, SubmissionFuture, SubmissionResult, TimeLookup, TimeSlot,
};
use chrono::NaiveDate;
use futures::FutureExt;
use little_lemon_runtime::Store;
use little_lemon_testing::mocks::FixedClock;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub type BookingStore = Store<BookingPageState, booking::BookingAction, BookingEnvironment, BookingReducer>;

/// Today for every fixture environment
pub fn today() -> NaiveDate {
    date(2025, 10, 1)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn slot(token: &str) -> TimeSlot {
    TimeSlot::parse(token).unwrap()
}

/// UTC restaurant, notices that stay until dismissed
pub fn config() -> BookingConfig {
    BookingConfig {
        utc_offset_minutes: 0,
        notice_ttl_secs: 0,
        ..BookingConfig::default()
    }
}

/// Lookup that offers the same evening slots every day and records each call
#[derive(Default)]
pub struct RecordingLookup {
    calls: Mutex<Vec<NaiveDate>>,
    outage: Mutex<bool>,
}

impl RecordingLookup {
    pub const SLOTS: [&'static str; 4] = ["17:00", "18:00", "19:00", "20:00"];

    pub fn calls(&self) -> Vec<NaiveDate> {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_outage(&self, outage: bool) {
        *self.outage.lock().unwrap() = outage;
    }

    /// Slots offered on `date`; late slots only on even days so lists differ
    pub fn slots_for(date: NaiveDate) -> Vec<TimeSlot> {
        let mut slots: Vec<TimeSlot> = Self::SLOTS.iter().map(|t| slot(t)).collect();
        if chrono::Datelike::day(&date) % 2 == 0 {
            slots.push(slot("21:30"));
        }
        slots
    }
}

impl TimeLookup for RecordingLookup {
    fn available_times(&self, date: NaiveDate) -> Result<Vec<TimeSlot>, LookupError> {
        self.calls.lock().unwrap().push(date);
        if *self.outage.lock().unwrap() {
            return Err(LookupError::Unavailable("lookup offline".to_string()));
        }
        Ok(Self::slots_for(date))
    }
}

/// Submitter that records requests and answers from a script
///
/// Answers `Ok(true)` once the script runs out. With a gate, every call
/// waits for the gate to be opened before answering.
#[derive(Default)]
pub struct ScriptedSubmitter {
    calls: Mutex<Vec<BookingRequest>>,
    answers: Mutex<VecDeque<SubmissionResult>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedSubmitter {
    pub fn answering(answers: impl IntoIterator<Item = SubmissionResult>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<BookingRequest> {
        self.calls.lock().unwrap().clone()
    }
}

impl BookingSubmitter for ScriptedSubmitter {
    fn submit(&self, request: BookingRequest) -> SubmissionFuture {
        self.calls.lock().unwrap().push(request);
        let answer = self.answers.lock().unwrap().pop_front().unwrap_or(Ok(true));
        let gate = self.gate.clone();

        async move {
            if let Some(gate) = gate {
                gate.notified().await;
            }
            answer
        }
        .boxed()
    }
}

/// Environment over the given fakes with today fixed at 2025-10-01
pub fn environment(
    lookup: Arc<RecordingLookup>,
    submitter: Arc<ScriptedSubmitter>,
) -> BookingEnvironment {
    environment_with(lookup, submitter, config())
}

pub fn environment_with(
    lookup: Arc<RecordingLookup>,
    submitter: Arc<ScriptedSubmitter>,
    config: BookingConfig,
) -> BookingEnvironment {
    BookingEnvironment::new(
        Arc::new(FixedClock::at("2025-10-01T12:00:00Z").unwrap()),
        lookup,
        submitter,
        config,
    )
}

/// Store over the given fakes, page not yet loaded
pub fn store(lookup: Arc<RecordingLookup>, submitter: Arc<ScriptedSubmitter>) -> BookingStore {
    store_with(lookup, submitter, config())
}

pub fn store_with(
    lookup: Arc<RecordingLookup>,
    submitter: Arc<ScriptedSubmitter>,
    config: BookingConfig,
) -> BookingStore {
    Store::new(
        BookingPageState::new(today()),
        BookingReducer::new(),
        environment_with(lookup, submitter, config),
    )
}

/// The booking from the worked example: Christmas, 18:00, four guests, a birthday
pub fn christmas_request() -> BookingRequest {
    BookingRequest {
        date: date(2025, 12, 25),
        time: slot("18:00"),
        guests: 4,
        occasion: Some(booking::Occasion::Birthday),
    }
}
