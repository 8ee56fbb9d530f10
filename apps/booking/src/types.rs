//! Domain types for the booking page.
//!
//! Field values for the reservation draft, the request handed to the
//! booking service, and the record produced once a booking is accepted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Smallest party the online form accepts
pub const MIN_GUESTS: u32 = 1;

/// Largest party the online form accepts; larger parties are sent to the phone line
pub const MAX_GUESTS: u32 = 10;

/// How far ahead a table can be booked, in calendar months
pub const BOOKING_HORIZON_MONTHS: u32 = 3;

/// Fallback contact for large parties and failed bookings
pub const DEFAULT_PHONE: &str = "(312) 555-0123";

/// Error raised when parsing booking values from text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Not a 24-hour `HH:MM` token
    #[error("Invalid time slot: {0:?} (expected HH:MM)")]
    InvalidTime(String),

    /// Not one of the offered occasions
    #[error("Unknown occasion: {0:?}")]
    UnknownOccasion(String),
}

/// Occasions offered in the booking form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occasion {
    /// Birthday
    Birthday,
    /// Anniversary
    Anniversary,
    /// Date night
    #[serde(rename = "Date Night")]
    DateNight,
    /// Business meeting
    #[serde(rename = "Business Meeting")]
    BusinessMeeting,
    /// Generic celebration
    Celebration,
    /// Family gathering
    #[serde(rename = "Family Gathering")]
    FamilyGathering,
    /// No particular reason
    #[serde(rename = "Just Because")]
    JustBecause,
}

impl Occasion {
    /// Every occasion, in the order the form lists them
    pub const ALL: [Self; 7] = [
        Self::Birthday,
        Self::Anniversary,
        Self::DateNight,
        Self::BusinessMeeting,
        Self::Celebration,
        Self::FamilyGathering,
        Self::JustBecause,
    ];

    /// Human readable label, also used on the wire
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Birthday => "Birthday",
            Self::Anniversary => "Anniversary",
            Self::DateNight => "Date Night",
            Self::BusinessMeeting => "Business Meeting",
            Self::Celebration => "Celebration",
            Self::FamilyGathering => "Family Gathering",
            Self::JustBecause => "Just Because",
        }
    }
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Occasion {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|occasion| occasion.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseError::UnknownOccasion(s.to_string()))
    }
}

/// A bookable time of day, `"HH:MM"` in 24-hour form
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot(String);

impl TimeSlot {
    /// Parses a `"HH:MM"` token
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidTime`] unless the token is a zero-padded
    /// 24-hour time.
    pub fn parse(token: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidTime(token.to_string());

        let (hours, minutes) = token.split_once(':').ok_or_else(invalid)?;
        if hours.len() != 2 || minutes.len() != 2 {
            return Err(invalid());
        }

        let hours: u32 = hours.parse().map_err(|_| invalid())?;
        let minutes: u32 = minutes.parse().map_err(|_| invalid())?;

        Self::from_hm(hours, minutes).ok_or_else(invalid)
    }

    /// Builds a slot from hour and minute, `None` when out of range
    #[must_use]
    pub fn from_hm(hours: u32, minutes: u32) -> Option<Self> {
        (hours < 24 && minutes < 60).then(|| Self(format!("{hours:02}:{minutes:02}")))
    }

    /// The `"HH:MM"` token
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.0
    }
}

/// Party size exactly as the guest typed it
///
/// Out-of-range or non-numeric input is kept verbatim so the form can echo
/// it back; it simply makes the draft invalid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestInput(String);

impl GuestInput {
    /// Wraps raw input
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The text as entered
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The entered number, if it is one
    #[must_use]
    pub fn count(&self) -> Option<u32> {
        self.0.trim().parse().ok()
    }

    /// Whether the party size is one the online form can take
    #[must_use]
    pub fn is_in_range(&self) -> bool {
        self.count()
            .is_some_and(|n| (MIN_GUESTS..=MAX_GUESTS).contains(&n))
    }
}

impl Default for GuestInput {
    fn default() -> Self {
        Self(MIN_GUESTS.to_string())
    }
}

/// Required fields whose errors are gated on interaction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    /// Reservation date
    Date,
    /// Reservation time
    Time,
    /// Party size
    Guests,
}

impl Field {
    /// Every gated field
    pub const ALL: [Self; 3] = [Self::Date, Self::Time, Self::Guests];
}

/// Which fields the guest has focused and left
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Touched {
    /// Date field was left at least once
    pub date: bool,
    /// Time field was left at least once
    pub time: bool,
    /// Guests field was left at least once
    pub guests: bool,
}

impl Touched {
    /// Marks a field as touched
    pub fn mark(&mut self, field: Field) {
        match field {
            Field::Date => self.date = true,
            Field::Time => self.time = true,
            Field::Guests => self.guests = true,
        }
    }

    /// Whether a field has been touched
    #[must_use]
    pub const fn is(&self, field: Field) -> bool {
        match field {
            Field::Date => self.date,
            Field::Time => self.time,
            Field::Guests => self.guests,
        }
    }
}

/// Payload handed to the booking service
///
/// Serializes as `{"date":"YYYY-MM-DD","time":"HH:MM","guests":4,"occasion":""}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// Reservation date
    pub date: NaiveDate,
    /// Reservation time
    pub time: TimeSlot,
    /// Party size
    pub guests: u32,
    /// Optional occasion, empty string on the wire when unset
    #[serde(with = "occasion_or_empty")]
    pub occasion: Option<Occasion>,
}

mod occasion_or_empty {
    use super::Occasion;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)] // serde's `with` hands us `&Option<T>`
    pub fn serialize<S: Serializer>(value: &Option<Occasion>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.map_or("", Occasion::label))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Occasion>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.trim().is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some).map_err(serde::de::Error::custom)
    }
}

/// Short reference handed to the guest, `"LL"` followed by eight digits
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfirmationNumber(String);

impl ConfirmationNumber {
    /// Derives a number from a millisecond timestamp (last eight digits)
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        Self(format!("LL{:08}", millis.rem_euclid(100_000_000)))
    }

    /// The confirmation number text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfirmationNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable summary of an accepted booking
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationRecord {
    /// What was booked
    pub booking_details: BookingRequest,
    /// Reference for the guest
    pub confirmation_number: ConfirmationNumber,
}
