//! Confirmation view shown after a booking is accepted.
//!
//! Formatting only. The view is built from whatever record arrived with
//! the navigation; direct visits arrive with none and get a generic message.

use crate::types::{ConfirmationRecord, DEFAULT_PHONE};
use serde::Serialize;
use std::fmt::Write as _;

/// Page heading
pub const HEADING: &str = "Booking Confirmed!";

/// Body text when no booking record came with the navigation
pub const GENERIC_MESSAGE: &str = "Your table reservation has been successfully confirmed.";

/// Closing line
pub const CLOSING_MESSAGE: &str = "We look forward to serving you at Little Lemon!";

/// Follow-up note about the confirmation email
pub const EMAIL_NOTE: &str =
    "You will receive a confirmation email shortly with your reservation details.";

/// One labelled line of the reservation summary
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    /// Row label, e.g. `"Date"`
    pub label: &'static str,
    /// Formatted value
    pub value: String,
}

/// Display model of the confirmation page
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConfirmationView {
    /// Page heading
    pub heading: &'static str,
    /// Confirmation number, when known
    pub confirmation_number: Option<String>,
    /// Reservation summary; empty when no record arrived
    pub details: Vec<DetailRow>,
    /// Generic confirmation text shown instead of details
    pub generic_message: Option<&'static str>,
    /// Phone number for changes to the reservation
    pub contact_phone: String,
}

impl ConfirmationView {
    /// Builds the view from the navigation payload
    #[must_use]
    pub fn from_payload(record: Option<&ConfirmationRecord>) -> Self {
        Self::with_phone(record, DEFAULT_PHONE)
    }

    /// Builds the view with a specific contact number
    #[must_use]
    pub fn with_phone(record: Option<&ConfirmationRecord>, phone: &str) -> Self {
        let Some(record) = record else {
            return Self {
                heading: HEADING,
                confirmation_number: None,
                details: Vec::new(),
                generic_message: Some(GENERIC_MESSAGE),
                contact_phone: phone.to_string(),
            };
        };

        let booking = &record.booking_details;
        let mut details = vec![
            DetailRow {
                label: "Date",
                value: booking.date.format("%A, %B %-d, %Y").to_string(),
            },
            DetailRow {
                label: "Time",
                value: format!("{} (Central Time)", booking.time),
            },
            DetailRow {
                label: "Number of Guests",
                value: booking.guests.to_string(),
            },
        ];
        if let Some(occasion) = booking.occasion {
            details.push(DetailRow {
                label: "Occasion",
                value: occasion.label().to_string(),
            });
        }

        Self {
            heading: HEADING,
            confirmation_number: Some(record.confirmation_number.to_string()),
            details,
            generic_message: None,
            contact_phone: phone.to_string(),
        }
    }

    /// Whether a reservation summary is shown
    #[must_use]
    pub fn has_details(&self) -> bool {
        !self.details.is_empty()
    }

    /// Plain-text rendering for terminals and logs
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "✓ {}", self.heading);

        if let Some(number) = &self.confirmation_number {
            let _ = writeln!(out, "Confirmation Number: {number}");
        }

        if self.has_details() {
            let _ = writeln!(out, "\nReservation Details");
            for row in &self.details {
                let _ = writeln!(out, "  {}: {}", row.label, row.value);
            }
        } else if let Some(message) = self.generic_message {
            let _ = writeln!(out, "{message}");
        }

        let _ = writeln!(out, "\n{CLOSING_MESSAGE}");
        let _ = writeln!(out, "{EMAIL_NOTE}");
        let _ = writeln!(
            out,
            "\nNeed to modify your reservation? Please call us at {}",
            self.contact_phone
        );
        out
    }
}
