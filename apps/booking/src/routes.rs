//! Site routes the booking flow moves between.

use crate::types::ConfirmationRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A page of the site
///
/// Only the confirmation route carries data, and only when it was reached
/// through a successful booking.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// Landing page
    #[default]
    Home,
    /// Booking page
    Booking,
    /// Alias of the booking page linked from the footer
    Reservations,
    /// Confirmation page, with the accepted booking when there is one
    Confirmed(Option<ConfirmationRecord>),
    /// Menu page
    Menu,
    /// About page
    About,
    /// Login page
    Login,
    /// Online ordering page
    OrderOnline,
}

impl Route {
    /// URL path of the route
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Booking => "/booking",
            Self::Reservations => "/reservations",
            Self::Confirmed(_) => "/confirmed",
            Self::Menu => "/menu",
            Self::About => "/about",
            Self::Login => "/login",
            Self::OrderOnline => "/order-online",
        }
    }

    /// Resolves a URL path, ignoring a trailing slash
    ///
    /// Typing `/confirmed` directly yields a confirmation route without a
    /// record; the record only travels with an in-app navigation.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            other => other,
        };

        Some(match normalized {
            "/" => Self::Home,
            "/booking" => Self::Booking,
            "/reservations" => Self::Reservations,
            "/confirmed" => Self::Confirmed(None),
            "/menu" => Self::Menu,
            "/about" => Self::About,
            "/login" => Self::Login,
            "/order-online" => Self::OrderOnline,
            _ => return None,
        })
    }

    /// Whether the route shows the booking form
    #[must_use]
    pub const fn is_booking_page(&self) -> bool {
        matches!(self, Self::Booking | Self::Reservations)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
