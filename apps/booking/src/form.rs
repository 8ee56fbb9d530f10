//! Booking form controller: the reservation draft and its validation rules.
//!
//! Validity is never stored. Every query derives it from the current field
//! values, so it cannot drift out of sync with what the guest entered.

use crate::availability::AvailabilityState;
use crate::types::{
    BOOKING_HORIZON_MONTHS, BookingRequest, Field, GuestInput, MAX_GUESTS, Occasion, TimeSlot,
    Touched,
};
use chrono::{Months, NaiveDate};

/// Shown under the date field once touched while no valid date is set
pub const DATE_ERROR: &str = "Please select a date for your reservation";

/// Shown under the time field once touched while no time is set
pub const TIME_ERROR: &str = "Please select a time for your reservation";

/// Shown under the guests field once touched while the party size is out of range
pub const GUESTS_ERROR: &str = "Party size must be between 1 and 10 guests";

/// Hint under the time field with the hours tables are served
pub const TIME_HINT: &str = "Restaurant hours: 5:00 PM - 11:00 PM daily";

/// Shown under the form while it cannot be submitted and the guest has started on it
pub const FORM_INCOMPLETE: &str =
    "Please fill in all required fields correctly to submit your reservation.";

/// Outcome of a date change
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateChange {
    /// Date stored; availability must be refreshed for it
    Accepted,
    /// Date outside the bookable window; draft unchanged
    Rejected,
}

/// The in-progress reservation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingFormState {
    /// Selected date
    pub date: Option<NaiveDate>,
    /// Selected time
    pub time: Option<TimeSlot>,
    /// Party size as typed
    pub guests: GuestInput,
    /// Optional occasion
    pub occasion: Option<Occasion>,
    /// Fields the guest has left at least once
    pub touched: Touched,
    /// A submission is waiting on the booking service
    pub is_submitting: bool,
    today: NaiveDate,
    max_date: NaiveDate,
}

impl BookingFormState {
    /// Creates an empty draft; the bookable window is fixed from `today`
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        let max_date = today
            .checked_add_months(Months::new(BOOKING_HORIZON_MONTHS))
            .unwrap_or(NaiveDate::MAX);

        Self {
            date: None,
            time: None,
            guests: GuestInput::default(),
            occasion: None,
            touched: Touched::default(),
            is_submitting: false,
            today,
            max_date,
        }
    }

    /// First bookable date
    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    /// Last bookable date
    #[must_use]
    pub const fn max_date(&self) -> NaiveDate {
        self.max_date
    }

    /// Clears the draft, keeping the bookable window
    pub fn reset_draft(&mut self) {
        let (today, max_date) = (self.today, self.max_date);
        *self = Self {
            max_date,
            ..Self::new(today)
        };
    }

    /// Whether `date` lies in the bookable window
    #[must_use]
    pub fn accepts_date(&self, date: NaiveDate) -> bool {
        (self.today..=self.max_date).contains(&date)
    }

    /// Applies a date change
    ///
    /// Dates outside the window leave the draft as it was and mark the
    /// field touched so its error can show.
    pub fn set_date(&mut self, date: NaiveDate) -> DateChange {
        if !self.accepts_date(date) {
            self.touched.mark(Field::Date);
            return DateChange::Rejected;
        }

        self.date = Some(date);
        DateChange::Accepted
    }

    /// Sets or clears the time
    pub fn set_time(&mut self, time: Option<TimeSlot>) {
        self.time = time;
    }

    /// Stores the party size exactly as typed
    pub fn set_guests(&mut self, raw: impl Into<String>) {
        self.guests = GuestInput::new(raw);
    }

    /// Sets or clears the occasion
    pub fn set_occasion(&mut self, occasion: Option<Occasion>) {
        self.occasion = occasion;
    }

    /// Records that the guest left a field
    pub fn blur(&mut self, field: Field) {
        self.touched.mark(field);
    }

    /// Drops the selected time if the new list no longer offers it
    ///
    /// Returns `true` when the time was cleared.
    pub fn retain_offered_time(&mut self, availability: &AvailabilityState) -> bool {
        match &self.time {
            Some(time) if !availability.offers(time) => {
                tracing::debug!(%time, "Selected time no longer offered");
                self.time = None;
                true
            },
            _ => false,
        }
    }

    /// Whether one field satisfies its own constraint
    #[must_use]
    pub fn field_is_valid(&self, field: Field) -> bool {
        match field {
            Field::Date => self.date.is_some_and(|date| self.accepts_date(date)),
            Field::Time => self.time.as_ref().is_some_and(|time| !time.as_str().is_empty()),
            Field::Guests => self.guests.is_in_range(),
        }
    }

    /// Whether the draft can be booked
    #[must_use]
    pub fn is_valid(&self) -> bool {
        Field::ALL.into_iter().all(|field| self.field_is_valid(field))
    }

    /// Whether the submit button is enabled
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.is_valid() && !self.is_submitting
    }

    /// Error to show under `field`, only once the guest has left it
    #[must_use]
    pub fn error_message(&self, field: Field) -> Option<&'static str> {
        if !self.touched.is(field) || self.field_is_valid(field) {
            return None;
        }

        Some(match field {
            Field::Date => DATE_ERROR,
            Field::Time => TIME_ERROR,
            Field::Guests => GUESTS_ERROR,
        })
    }

    /// Form-level hint, shown while invalid once date or time has been started
    #[must_use]
    pub fn form_message(&self) -> Option<&'static str> {
        let started = self.date.is_some()
            || self.time.is_some()
            || self.touched.is(Field::Date)
            || self.touched.is(Field::Time);

        (started && !self.is_valid()).then_some(FORM_INCOMPLETE)
    }

    /// Submit button caption
    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        if self.is_submitting {
            "Submitting Your Reservation..."
        } else {
            "Make Your Reservation"
        }
    }

    /// Hint under the date field naming the last bookable date
    #[must_use]
    pub fn date_hint(&self) -> String {
        format!(
            "Select a date between today and {}",
            self.max_date.format("%b %-d, %Y")
        )
    }

    /// Hint under the guests field pointing large parties to the phone line
    #[must_use]
    pub fn guests_hint(phone: &str) -> String {
        format!(
            "Maximum {MAX_GUESTS} guests per online reservation. For larger parties, please call {phone}"
        )
    }

    /// Packages the draft for the booking service, `None` while invalid
    #[must_use]
    pub fn to_request(&self) -> Option<BookingRequest> {
        if !self.is_valid() {
            return None;
        }

        Some(BookingRequest {
            date: self.date?,
            time: self.time.clone()?,
            guests: self.guests.count()?,
            occasion: self.occasion,
        })
    }

    /// Enters the in-flight state and returns the request to send
    ///
    /// `None` (and no state change) while invalid or already submitting.
    pub fn begin_submission(&mut self) -> Option<BookingRequest> {
        if self.is_submitting {
            return None;
        }

        let request = self.to_request()?;
        self.is_submitting = true;
        Some(request)
    }

    /// Leaves the in-flight state; the draft is kept for another attempt
    pub fn finish_submission(&mut self) {
        self.is_submitting = false;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::availability::AvailabilityState;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn slot(token: &str) -> TimeSlot {
        TimeSlot::parse(token).unwrap()
    }

    fn filled_form() -> BookingFormState {
        let mut form = BookingFormState::new(date(2025, 10, 1));
        assert_eq!(form.set_date(date(2025, 12, 25)), DateChange::Accepted);
        form.set_time(Some(slot("18:00")));
        form.set_guests("4");
        form.set_occasion(Some(Occasion::Birthday));
        form
    }

    #[test]
    fn empty_form_is_invalid_without_visible_errors() {
        let form = BookingFormState::new(date(2025, 10, 1));

        assert!(!form.is_valid());
        assert!(!form.can_submit());
        for field in Field::ALL {
            assert_eq!(form.error_message(field), None);
        }
        assert_eq!(form.form_message(), None);
        assert_eq!(form.guests.as_str(), "1");
    }

    #[test]
    fn horizon_is_three_months() {
        let form = BookingFormState::new(date(2025, 10, 1));
        assert_eq!(form.max_date(), date(2026, 1, 1));

        // Month-end clamps rather than rolling over
        let form = BookingFormState::new(date(2025, 11, 30));
        assert_eq!(form.max_date(), date(2026, 2, 28));
    }

    #[test]
    fn filled_form_is_valid() {
        let form = filled_form();
        assert!(form.is_valid());
        assert!(form.can_submit());
        assert_eq!(form.form_message(), None);
    }

    #[test]
    fn past_date_is_rejected_and_touched() {
        let mut form = BookingFormState::new(date(2025, 10, 1));

        assert_eq!(form.set_date(date(2025, 9, 30)), DateChange::Rejected);
        assert_eq!(form.date, None);
        assert!(form.touched.date);
        assert_eq!(form.error_message(Field::Date), Some(DATE_ERROR));
    }

    #[test]
    fn date_beyond_horizon_is_rejected() {
        let mut form = BookingFormState::new(date(2025, 10, 1));
        form.set_date(date(2025, 10, 10));

        assert_eq!(form.set_date(date(2026, 1, 2)), DateChange::Rejected);
        assert_eq!(form.date, Some(date(2025, 10, 10)));
        assert_eq!(form.set_date(date(2026, 1, 1)), DateChange::Accepted);
    }

    #[test]
    fn today_is_bookable() {
        let mut form = BookingFormState::new(date(2025, 10, 1));
        assert_eq!(form.set_date(date(2025, 10, 1)), DateChange::Accepted);
        assert!(form.field_is_valid(Field::Date));
    }

    #[test]
    fn out_of_range_guests_are_kept_but_invalid() {
        let mut form = filled_form();
        form.set_guests("11");

        assert_eq!(form.guests.as_str(), "11");
        assert!(!form.is_valid());
        assert_eq!(form.error_message(Field::Guests), None);

        form.blur(Field::Guests);
        assert_eq!(form.error_message(Field::Guests), Some(GUESTS_ERROR));

        form.set_guests("10");
        assert_eq!(form.error_message(Field::Guests), None);
        assert!(form.is_valid());
    }

    #[test]
    fn blur_never_changes_validity() {
        let mut form = filled_form();
        for field in Field::ALL {
            form.blur(field);
        }
        assert!(form.is_valid());
        for field in Field::ALL {
            assert_eq!(form.error_message(field), None);
        }
    }

    #[test]
    fn time_error_needs_touch() {
        let mut form = BookingFormState::new(date(2025, 10, 1));
        form.set_date(date(2025, 10, 2));
        assert_eq!(form.error_message(Field::Time), None);
        assert_eq!(form.form_message(), Some(FORM_INCOMPLETE));

        form.blur(Field::Time);
        assert_eq!(form.error_message(Field::Time), Some(TIME_ERROR));
    }

    #[test]
    fn request_carries_integer_guests() {
        let form = filled_form();
        let request = form.to_request().unwrap();

        assert_eq!(request.date, date(2025, 12, 25));
        assert_eq!(request.time, slot("18:00"));
        assert_eq!(request.guests, 4);
        assert_eq!(request.occasion, Some(Occasion::Birthday));
    }

    #[test]
    fn begin_submission_is_single_flight() {
        let mut form = filled_form();

        assert!(form.begin_submission().is_some());
        assert!(form.is_submitting);
        assert!(!form.can_submit());
        assert_eq!(form.submit_label(), "Submitting Your Reservation...");
        assert!(form.begin_submission().is_none());

        form.finish_submission();
        assert!(form.can_submit());
        assert_eq!(form.date, Some(date(2025, 12, 25)));
    }

    #[test]
    fn begin_submission_refuses_invalid_draft() {
        let mut form = BookingFormState::new(date(2025, 10, 1));
        assert!(form.begin_submission().is_none());
        assert!(!form.is_submitting);
    }

    #[test]
    fn time_not_offered_after_refresh_is_cleared() {
        let mut form = filled_form();
        let availability = AvailabilityState {
            times: vec![slot("17:00"), slot("19:30")],
            date: Some(date(2025, 12, 25)),
            last_error: None,
        };

        assert!(form.retain_offered_time(&availability));
        assert_eq!(form.time, None);
        assert!(!form.is_valid());

        form.set_time(Some(slot("19:30")));
        assert!(!form.retain_offered_time(&availability));
        assert_eq!(form.time, Some(slot("19:30")));
    }

    #[test]
    fn reset_keeps_window() {
        let mut form = filled_form();
        form.blur(Field::Date);
        form.reset_draft();

        assert_eq!(form, BookingFormState::new(date(2025, 10, 1)));
    }

    #[test]
    fn hints() {
        let form = BookingFormState::new(date(2025, 10, 1));
        assert_eq!(form.date_hint(), "Select a date between today and Jan 1, 2026");
        assert_eq!(
            BookingFormState::guests_hint("(312) 555-0123"),
            "Maximum 10 guests per online reservation. For larger parties, please call (312) 555-0123"
        );
    }
}
