//! Booking page controller.
//!
//! Owns the availability list and the reservation draft for one page visit
//! and is the only place either is mutated. Host events arrive as
//! [`BookingAction`]s; the one slow operation, handing the booking to the
//! booking service, is returned as an effect whose outcome is fed back in.

use crate::api::{BookingSubmitter, SubmissionError, TimeLookup};
use crate::availability::{
    AvailabilityAction, AvailabilityEnvironment, AvailabilityReducer, AvailabilityState,
};
use crate::confirmation::ConfirmationView;
use crate::config::BookingConfig;
use crate::form::{BookingFormState, DateChange, TIME_HINT};
use crate::routes::Route;
use crate::types::{
    BookingRequest, ConfirmationNumber, ConfirmationRecord, Field, Occasion, TimeSlot,
};
use chrono::{DateTime, NaiveDate, Utc};
use little_lemon_core::{
    SmallVec, effect::Effect, environment::Clock, reducer::Reducer, smallvec,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Notice text when times for the chosen date could not be fetched
pub const TIMES_UNAVAILABLE: &str =
    "We couldn't load available times for that date. The times shown may be out of date.";

/// Non-fatal message shown above the form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// Time lookup failed; the list shown is the last one that loaded
    TimesUnavailable,
    /// The booking was not confirmed and can be sent again
    SubmissionRetry,
}

impl Notice {
    /// Text shown to the guest
    #[must_use]
    pub fn text(self, phone: &str) -> String {
        match self {
            Self::TimesUnavailable => TIMES_UNAVAILABLE.to_string(),
            Self::SubmissionRetry => format!(
                "Unable to confirm your reservation. Please try again or call us at {phone}."
            ),
        }
    }
}

/// State of the booking page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingPageState {
    /// Times offered for the selected date
    pub availability: AvailabilityState,
    /// The reservation draft
    pub form: BookingFormState,
    /// Page currently shown
    pub route: Route,
    /// Notice above the form, if any
    pub notice: Option<Notice>,
    /// Bookings confirmed during this session
    pub confirmations_issued: u64,
    notice_id: u64,
    last_confirmation_millis: Option<i64>,
}

impl BookingPageState {
    /// Creates a page showing the booking form for `today`
    ///
    /// Times are empty until [`BookingAction::PageLoaded`] is reduced.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            availability: AvailabilityState::default(),
            form: BookingFormState::new(today),
            route: Route::Booking,
            notice: None,
            confirmations_issued: 0,
            notice_id: 0,
            last_confirmation_millis: None,
        }
    }

    /// Snapshot of everything the booking form displays
    #[must_use]
    pub fn render(&self, config: &BookingConfig) -> BookingView {
        let form = &self.form;
        BookingView {
            date: form.date,
            time: form.time.clone(),
            guests: form.guests.as_str().to_string(),
            occasion: form.occasion,
            min_date: form.today(),
            max_date: form.max_date(),
            available_times: self.availability.times.clone(),
            is_valid: form.is_valid(),
            can_submit: form.can_submit(),
            is_submitting: form.is_submitting,
            submit_label: form.submit_label(),
            date_error: form.error_message(Field::Date),
            time_error: form.error_message(Field::Time),
            guests_error: form.error_message(Field::Guests),
            form_message: form.form_message(),
            date_hint: form.date_hint(),
            time_hint: TIME_HINT,
            guests_hint: BookingFormState::guests_hint(&config.phone),
            notice: self.notice.map(|notice| notice.text(&config.phone)),
        }
    }

    /// The confirmation page, when that is the current route
    #[must_use]
    pub fn confirmation_view(&self, config: &BookingConfig) -> Option<ConfirmationView> {
        match &self.route {
            Route::Confirmed(record) => {
                Some(ConfirmationView::with_phone(record.as_ref(), &config.phone))
            },
            _ => None,
        }
    }
}

/// Rendered booking form
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BookingView {
    /// Selected date
    pub date: Option<NaiveDate>,
    /// Selected time
    pub time: Option<TimeSlot>,
    /// Party size as typed
    pub guests: String,
    /// Selected occasion
    pub occasion: Option<Occasion>,
    /// Earliest selectable date
    pub min_date: NaiveDate,
    /// Latest selectable date
    pub max_date: NaiveDate,
    /// Times to offer in the time picker
    pub available_times: Vec<TimeSlot>,
    /// Draft is complete and in range
    pub is_valid: bool,
    /// Submit button enabled
    pub can_submit: bool,
    /// A submission is in flight
    pub is_submitting: bool,
    /// Submit button caption
    pub submit_label: &'static str,
    /// Error under the date field
    pub date_error: Option<&'static str>,
    /// Error under the time field
    pub time_error: Option<&'static str>,
    /// Error under the guests field
    pub guests_error: Option<&'static str>,
    /// Form-level hint
    pub form_message: Option<&'static str>,
    /// Hint under the date field
    pub date_hint: String,
    /// Hint under the time field
    pub time_hint: &'static str,
    /// Hint under the guests field
    pub guests_hint: String,
    /// Notice text above the form
    pub notice: Option<String>,
}

/// Host events and internal outcomes of the booking page
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BookingAction {
    // Host events
    /// The booking page was mounted
    PageLoaded,
    /// The guest picked a date
    DateChanged {
        /// Picked date
        date: NaiveDate,
    },
    /// The guest picked or cleared a time
    TimeChanged {
        /// Picked time
        time: Option<TimeSlot>,
    },
    /// The guest edited the party size
    GuestsChanged {
        /// Text as typed
        raw: String,
    },
    /// The guest picked or cleared an occasion
    OccasionChanged {
        /// Picked occasion
        occasion: Option<Occasion>,
    },
    /// The guest left a field
    FieldBlurred {
        /// Field left
        field: Field,
    },
    /// The guest pressed the submit button
    SubmitPressed,
    /// The guest closed the notice
    NoticeDismissed,

    // Outcomes
    /// The booking service accepted the booking
    SubmissionAccepted {
        /// Booking that was sent
        request: BookingRequest,
    },
    /// The booking service declined the booking
    SubmissionRejected {
        /// Booking that was sent
        request: BookingRequest,
    },
    /// The booking service could not be reached
    SubmissionFailed {
        /// What went wrong
        error: SubmissionError,
    },
    /// A notice's display time ran out
    NoticeExpired {
        /// Which posting of the notice expired
        id: u64,
    },
    /// Move to another page; observers see the confirmation record here
    Navigate {
        /// Destination
        route: Route,
    },
    /// Follow-up action emitted by the availability store
    Availability(AvailabilityAction),
}

/// Dependencies of the booking page
#[derive(Clone)]
pub struct BookingEnvironment {
    /// Clock for "today" and confirmation numbers
    pub clock: Arc<dyn Clock>,
    /// Time-lookup service
    pub lookup: Arc<dyn TimeLookup>,
    /// Booking service
    pub submitter: Arc<dyn BookingSubmitter>,
    /// Page configuration
    pub config: BookingConfig,
}

impl BookingEnvironment {
    /// Creates a new `BookingEnvironment`
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        lookup: Arc<dyn TimeLookup>,
        submitter: Arc<dyn BookingSubmitter>,
        config: BookingConfig,
    ) -> Self {
        Self {
            clock,
            lookup,
            submitter,
            config,
        }
    }

    /// Today at the restaurant
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.config.local_date(self.clock.now())
    }

    fn availability(&self) -> AvailabilityEnvironment {
        AvailabilityEnvironment::new(Arc::clone(&self.lookup))
    }
}

/// Reducer for the booking page
#[derive(Clone, Copy, Debug, Default)]
pub struct BookingReducer {
    availability: AvailabilityReducer,
}

type Effects = SmallVec<[Effect<BookingAction>; 4]>;

impl BookingReducer {
    /// Creates a new `BookingReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            availability: AvailabilityReducer,
        }
    }

    /// Runs an availability action and reconciles the page with its result
    fn update_times(
        &self,
        state: &mut BookingPageState,
        action: AvailabilityAction,
        env: &BookingEnvironment,
    ) -> Effects {
        let mut effects = Self::lift_availability(self.availability.reduce(
            &mut state.availability,
            action,
            &env.availability(),
        ));

        if state.availability.last_error.is_some() {
            effects.extend(Self::post_notice(state, Notice::TimesUnavailable, env));
            return effects;
        }

        if state.notice == Some(Notice::TimesUnavailable) {
            state.notice = None;
        }
        state.form.retain_offered_time(&state.availability);
        effects
    }

    /// Routes the availability store's effects back through the page
    fn lift_availability(effects: SmallVec<[Effect<AvailabilityAction>; 4]>) -> Effects {
        effects
            .into_iter()
            .filter(|effect| !effect.is_none())
            .map(|effect| effect.map(BookingAction::Availability))
            .collect()
    }

    /// Shows a notice, scheduling its expiry when notices are timed
    ///
    /// The expiry is a delayed effect, so handles tracking the action that
    /// posted the notice settle only once it fires.
    fn post_notice(state: &mut BookingPageState, notice: Notice, env: &BookingEnvironment) -> Effects {
        state.notice_id += 1;
        state.notice = Some(notice);

        env.config
            .notice_ttl()
            .map(|duration| Effect::Delay {
                duration,
                action: Box::new(BookingAction::NoticeExpired {
                    id: state.notice_id,
                }),
            })
            .into_iter()
            .collect()
    }

    /// Derives a confirmation number that never repeats within a session
    fn issue_confirmation(
        state: &mut BookingPageState,
        request: BookingRequest,
        now: DateTime<Utc>,
    ) -> ConfirmationRecord {
        let mut millis = now.timestamp_millis();
        if let Some(last) = state.last_confirmation_millis {
            millis = millis.max(last.saturating_add(1));
        }
        state.last_confirmation_millis = Some(millis);
        state.confirmations_issued += 1;

        ConfirmationRecord {
            booking_details: request,
            confirmation_number: ConfirmationNumber::from_millis(millis),
        }
    }

    fn submit(state: &mut BookingPageState, env: &BookingEnvironment) -> Effects {
        if !state.route.is_booking_page() {
            tracing::debug!(route = %state.route, "Submit ignored off the booking page");
            return SmallVec::new();
        }
        if state.form.is_submitting {
            tracing::debug!("Submission already in flight");
            return SmallVec::new();
        }
        let Some(request) = state.form.begin_submission() else {
            tracing::debug!("Draft incomplete, nothing submitted");
            return SmallVec::new();
        };

        if state.notice == Some(Notice::SubmissionRetry) {
            state.notice = None;
        }

        tracing::info!(
            date = %request.date,
            time = %request.time,
            guests = request.guests,
            "Submitting booking"
        );

        let submitter = Arc::clone(&env.submitter);
        smallvec![Effect::Future(Box::pin(async move {
            Some(match submitter.submit(request.clone()).await {
                Ok(true) => BookingAction::SubmissionAccepted { request },
                Ok(false) => BookingAction::SubmissionRejected { request },
                Err(error) => BookingAction::SubmissionFailed { error },
            })
        }))]
    }
}

impl Reducer for BookingReducer {
    type State = BookingPageState;
    type Action = BookingAction;
    type Environment = BookingEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Host events ==========
            BookingAction::PageLoaded => {
                let today = env.today();
                state.form = BookingFormState::new(today);
                state.notice = None;
                if !state.route.is_booking_page() {
                    state.route = Route::Booking;
                }

                tracing::info!(%today, max_date = %state.form.max_date(), "Booking page loaded");
                self.update_times(state, AvailabilityAction::Initialize { today }, env)
            },

            BookingAction::DateChanged { date } => {
                if state.form.set_date(date) == DateChange::Rejected {
                    tracing::debug!(%date, "Date outside bookable window");
                    return SmallVec::new();
                }
                self.update_times(state, AvailabilityAction::Refresh { date }, env)
            },

            BookingAction::TimeChanged { time } => {
                state.form.set_time(time);
                SmallVec::new()
            },

            BookingAction::GuestsChanged { raw } => {
                state.form.set_guests(raw);
                SmallVec::new()
            },

            BookingAction::OccasionChanged { occasion } => {
                state.form.set_occasion(occasion);
                SmallVec::new()
            },

            BookingAction::FieldBlurred { field } => {
                state.form.blur(field);
                SmallVec::new()
            },

            BookingAction::SubmitPressed => Self::submit(state, env),

            BookingAction::NoticeDismissed => {
                state.notice = None;
                SmallVec::new()
            },

            // ========== Outcomes ==========
            BookingAction::SubmissionAccepted { request } => {
                state.form.finish_submission();
                metrics::counter!("booking.submissions.total", "outcome" => "accepted")
                    .increment(1);

                let record = Self::issue_confirmation(state, request, env.clock.now());
                tracing::info!(
                    confirmation = %record.confirmation_number,
                    date = %record.booking_details.date,
                    "Booking confirmed"
                );

                let route = Route::Confirmed(Some(record));
                state.route = route.clone();
                smallvec![Effect::send(BookingAction::Navigate { route })]
            },

            BookingAction::SubmissionRejected { request } => {
                state.form.finish_submission();
                metrics::counter!("booking.submissions.total", "outcome" => "rejected")
                    .increment(1);
                tracing::warn!(
                    date = %request.date,
                    time = %request.time,
                    guests = request.guests,
                    "Booking declined by booking service"
                );
                Self::post_notice(state, Notice::SubmissionRetry, env)
            },

            BookingAction::SubmissionFailed { error } => {
                state.form.finish_submission();
                metrics::counter!("booking.submissions.total", "outcome" => "failed").increment(1);
                tracing::error!(%error, "Booking submission failed");
                Self::post_notice(state, Notice::SubmissionRetry, env)
            },

            BookingAction::Availability(action) => self.update_times(state, action, env),

            BookingAction::NoticeExpired { id } => {
                if id == state.notice_id {
                    state.notice = None;
                }
                SmallVec::new()
            },

            BookingAction::Navigate { route } => {
                if route == state.route {
                    return SmallVec::new();
                }

                let entering_booking = route.is_booking_page() && !state.route.is_booking_page();
                tracing::debug!(from = %state.route, to = %route, "Navigating");
                state.route = route;

                if entering_booking {
                    smallvec![Effect::send(BookingAction::PageLoaded)]
                } else {
                    SmallVec::new()
                }
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::api::{AcceptingSubmitter, LookupError, SeededTimeLookup};
    use crate::form::{DATE_ERROR, FORM_INCOMPLETE, GUESTS_ERROR};
    use little_lemon_testing::{ReducerTest, assertions, mocks::FixedClock};

    struct OutageLookup;

    impl TimeLookup for OutageLookup {
        fn available_times(&self, _date: NaiveDate) -> Result<Vec<TimeSlot>, LookupError> {
            Err(LookupError::Unavailable("maintenance".to_string()))
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn slot(token: &str) -> TimeSlot {
        TimeSlot::parse(token).unwrap()
    }

    fn config() -> BookingConfig {
        BookingConfig {
            utc_offset_minutes: 0,
            notice_ttl_secs: 0,
            ..BookingConfig::default()
        }
    }

    fn env_with(lookup: Arc<dyn TimeLookup>, config: BookingConfig) -> BookingEnvironment {
        BookingEnvironment::new(
            Arc::new(FixedClock::at("2025-10-01T12:00:00Z").unwrap()),
            lookup,
            AcceptingSubmitter::shared(std::time::Duration::ZERO),
            config,
        )
    }

    fn env() -> BookingEnvironment {
        env_with(SeededTimeLookup::shared(), config())
    }

    fn loaded() -> BookingPageState {
        let mut state = BookingPageState::new(date(2025, 10, 1));
        let _ = BookingReducer::new().reduce(&mut state, BookingAction::PageLoaded, &env());
        state
    }

    fn filled() -> BookingPageState {
        let mut state = loaded();
        let reducer = BookingReducer::new();
        for action in [
            BookingAction::DateChanged {
                date: date(2025, 12, 25),
            },
            BookingAction::TimeChanged {
                time: Some(slot("18:30")),
            },
            BookingAction::GuestsChanged {
                raw: "4".to_string(),
            },
            BookingAction::OccasionChanged {
                occasion: Some(Occasion::Birthday),
            },
        ] {
            let _ = reducer.reduce(&mut state, action, &env());
        }
        state
    }

    fn request() -> BookingRequest {
        BookingRequest {
            date: date(2025, 12, 25),
            time: slot("18:30"),
            guests: 4,
            occasion: Some(Occasion::Birthday),
        }
    }

    #[test]
    fn page_load_fetches_todays_times() {
        ReducerTest::new(BookingReducer::new())
            .with_env(env())
            .given_state(BookingPageState::new(date(2024, 1, 1)))
            .when_action(BookingAction::PageLoaded)
            .then_state(|state| {
                assert_eq!(state.form.today(), date(2025, 10, 1));
                assert_eq!(state.form.max_date(), date(2026, 1, 1));
                assert_eq!(state.availability.date, Some(date(2025, 10, 1)));
                assert_eq!(
                    state.availability.times,
                    ["17:00", "17:30", "18:00", "20:00", "21:00", "23:30"].map(slot)
                );
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn valid_date_replaces_times() {
        ReducerTest::new(BookingReducer::new())
            .with_env(env())
            .given_state(loaded())
            .when_action(BookingAction::DateChanged {
                date: date(2025, 12, 25),
            })
            .then_state(|state| {
                assert_eq!(state.form.date, Some(date(2025, 12, 25)));
                assert_eq!(
                    state.availability.times,
                    ["17:00", "17:30", "18:30", "19:00", "20:00", "22:00", "22:30"].map(slot)
                );
            })
            .run();
    }

    #[test]
    fn availability_follow_ups_run_through_the_page() {
        ReducerTest::new(BookingReducer::new())
            .with_env(env())
            .given_state(loaded())
            .when_action(BookingAction::Availability(AvailabilityAction::Refresh {
                date: date(2025, 12, 25),
            }))
            .then_state(|state| {
                assert_eq!(state.availability.date, Some(date(2025, 12, 25)));
                assert_eq!(state.form.date, None);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn availability_effects_are_lifted_into_page_actions() {
        let refresh = AvailabilityAction::Refresh {
            date: date(2025, 10, 2),
        };
        let lifted = BookingReducer::lift_availability(smallvec![
            Effect::None,
            Effect::Delay {
                duration: std::time::Duration::from_secs(1),
                action: Box::new(refresh.clone()),
            },
        ]);

        assert_eq!(lifted.len(), 1);
        let Effect::Delay { duration, action } = &lifted[0] else {
            panic!("expected the delayed refresh to survive lifting");
        };
        assert_eq!(*duration, std::time::Duration::from_secs(1));
        assert_eq!(**action, BookingAction::Availability(refresh));
    }

    #[test]
    fn past_date_leaves_times_alone() {
        let before = loaded();
        let times = before.availability.clone();

        ReducerTest::new(BookingReducer::new())
            .with_env(env())
            .given_state(before)
            .when_action(BookingAction::DateChanged {
                date: date(2025, 9, 30),
            })
            .then_state(move |state| {
                assert_eq!(state.form.date, None);
                assert!(state.form.touched.date);
                assert_eq!(state.availability, times);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn selected_time_missing_from_new_date_is_cleared() {
        // 18:00 is offered on the 1st but not on the 25th
        ReducerTest::new(BookingReducer::new())
            .with_env(env())
            .given_state(loaded())
            .when_actions([
                BookingAction::TimeChanged {
                    time: Some(slot("18:00")),
                },
                BookingAction::DateChanged {
                    date: date(2025, 12, 25),
                },
            ])
            .then_state(|state| {
                assert_eq!(state.form.time, None);
                assert!(!state.form.is_valid());
            })
            .run();
    }

    #[test]
    fn lookup_outage_keeps_stale_times_and_posts_timed_notice() {
        let stale = loaded();
        let times = stale.availability.times.clone();
        let env = env_with(
            Arc::new(OutageLookup),
            BookingConfig {
                utc_offset_minutes: 0,
                ..BookingConfig::default()
            },
        );

        ReducerTest::new(BookingReducer::new())
            .with_env(env)
            .given_state(stale)
            .when_action(BookingAction::DateChanged {
                date: date(2025, 10, 5),
            })
            .then_state(move |state| {
                assert_eq!(state.availability.times, times);
                assert_eq!(state.form.date, Some(date(2025, 10, 5)));
                assert_eq!(state.notice, Some(Notice::TimesUnavailable));
            })
            .then_effects(assertions::assert_has_delay_effect)
            .run();
    }

    #[test]
    fn stale_expiry_does_not_clear_newer_notice() {
        let env = env_with(Arc::new(OutageLookup), config());

        ReducerTest::new(BookingReducer::new())
            .with_env(env)
            .given_state(loaded())
            .when_actions([
                BookingAction::DateChanged {
                    date: date(2025, 10, 5),
                },
                BookingAction::DateChanged {
                    date: date(2025, 10, 6),
                },
                BookingAction::NoticeExpired { id: 1 },
            ])
            .then_state(|state| assert_eq!(state.notice, Some(Notice::TimesUnavailable)))
            .run();
    }

    #[test]
    fn submit_sends_one_request_while_in_flight() {
        ReducerTest::new(BookingReducer::new())
            .with_env(env())
            .given_state(filled())
            .when_actions([BookingAction::SubmitPressed, BookingAction::SubmitPressed])
            .then_state(|state| {
                assert!(state.form.is_submitting);
                assert!(!state.form.can_submit());
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn incomplete_draft_is_not_submitted() {
        ReducerTest::new(BookingReducer::new())
            .with_env(env())
            .given_state(loaded())
            .when_action(BookingAction::SubmitPressed)
            .then_state(|state| assert!(!state.form.is_submitting))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn acceptance_navigates_with_record() {
        let mut state = filled();
        let _ = state.form.begin_submission();

        ReducerTest::new(BookingReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(BookingAction::SubmissionAccepted { request: request() })
            .then_state(|state| {
                assert!(!state.form.is_submitting);
                assert_eq!(state.confirmations_issued, 1);
                let Route::Confirmed(Some(record)) = &state.route else {
                    panic!("expected confirmation route, got {:?}", state.route);
                };
                assert_eq!(record.booking_details, request());
                assert_eq!(record.confirmation_number.as_str(), "LL20000000");
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn confirmation_numbers_stay_unique_on_a_frozen_clock() {
        ReducerTest::new(BookingReducer::new())
            .with_env(env())
            .given_state(filled())
            .when_actions([
                BookingAction::SubmissionAccepted { request: request() },
                BookingAction::Navigate {
                    route: Route::Booking,
                },
                BookingAction::SubmissionAccepted { request: request() },
            ])
            .then_state(|state| {
                assert_eq!(state.confirmations_issued, 2);
                let Route::Confirmed(Some(record)) = &state.route else {
                    panic!("expected confirmation route");
                };
                assert_eq!(record.confirmation_number.as_str(), "LL20000001");
            })
            .run();
    }

    #[test]
    fn rejection_and_failure_keep_the_draft() {
        for outcome in [
            BookingAction::SubmissionRejected { request: request() },
            BookingAction::SubmissionFailed {
                error: SubmissionError::Transport("connection reset".to_string()),
            },
        ] {
            let mut state = filled();
            let _ = state.form.begin_submission();

            ReducerTest::new(BookingReducer::new())
                .with_env(env())
                .given_state(state)
                .when_action(outcome)
                .then_state(|state| {
                    assert!(!state.form.is_submitting);
                    assert!(state.form.can_submit());
                    assert_eq!(state.form.to_request(), Some(request()));
                    assert_eq!(state.notice, Some(Notice::SubmissionRetry));
                    assert!(state.route.is_booking_page());
                })
                .then_effects(assertions::assert_no_effects)
                .run();
        }
    }

    #[test]
    fn returning_to_booking_reloads_the_page() {
        let mut state = filled();
        state.route = Route::Home;

        ReducerTest::new(BookingReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(BookingAction::Navigate {
                route: Route::Reservations,
            })
            .then_state(|state| assert_eq!(state.route, Route::Reservations))
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn switching_between_booking_aliases_keeps_draft() {
        ReducerTest::new(BookingReducer::new())
            .with_env(env())
            .given_state(filled())
            .when_action(BookingAction::Navigate {
                route: Route::Reservations,
            })
            .then_state(|state| assert!(state.form.is_valid()))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn render_gates_errors_on_touch() {
        let config = config();
        let mut state = loaded();

        let view = state.render(&config);
        assert_eq!(view.date_error, None);
        assert_eq!(view.guests_error, None);
        assert_eq!(view.form_message, None);
        assert!(!view.can_submit);
        assert_eq!(view.submit_label, "Make Your Reservation");
        assert_eq!(view.time_hint, "Restaurant hours: 5:00 PM - 11:00 PM daily");

        let reducer = BookingReducer::new();
        for action in [
            BookingAction::DateChanged {
                date: date(2025, 9, 1),
            },
            BookingAction::GuestsChanged {
                raw: "12".to_string(),
            },
            BookingAction::FieldBlurred {
                field: Field::Guests,
            },
        ] {
            let _ = reducer.reduce(&mut state, action, &env());
        }

        let view = state.render(&config);
        assert_eq!(view.date_error, Some(DATE_ERROR));
        assert_eq!(view.guests_error, Some(GUESTS_ERROR));
        assert_eq!(view.time_error, None);
        assert_eq!(view.form_message, Some(FORM_INCOMPLETE));
        assert_eq!(view.guests, "12");
    }

    #[test]
    fn retry_notice_names_the_phone_line() {
        let mut state = loaded();
        state.notice = Some(Notice::SubmissionRetry);

        let view = state.render(&config());
        assert_eq!(
            view.notice.as_deref(),
            Some("Unable to confirm your reservation. Please try again or call us at (312) 555-0123.")
        );
        assert!(state.confirmation_view(&config()).is_none());
    }
}
