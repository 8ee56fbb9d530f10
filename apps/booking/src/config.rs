//! Configuration for the booking page.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::types::DEFAULT_PHONE;
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Largest UTC offset any time zone uses, in minutes
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Invalid configuration value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("{key} has invalid value {value:?}: {reason}")]
    Invalid {
        /// Variable name
        key: &'static str,
        /// Raw value
        value: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Booking page configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Restaurant's offset from UTC in minutes; decides what "today" is.
    /// Default: -360 (Central Standard Time)
    pub utc_offset_minutes: i32,
    /// Phone number offered for large parties and failed bookings
    pub phone: String,
    /// Simulated latency of the local booking service, in milliseconds
    pub submit_latency_ms: u64,
    /// Seconds before a notice dismisses itself (0 = stays until dismissed)
    pub notice_ttl_secs: u64,
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: -360,
            phone: DEFAULT_PHONE.to_string(),
            submit_latency_ms: 0,
            notice_ttl_secs: 8,
            log_level: "booking=debug,little_lemon_runtime=info".to_string(),
        }
    }
}

impl BookingConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `LITTLE_LEMON_UTC_OFFSET_MINUTES` | `-360` |
    /// | `LITTLE_LEMON_PHONE` | `(312) 555-0123` |
    /// | `LITTLE_LEMON_SUBMIT_LATENCY_MS` | `0` |
    /// | `LITTLE_LEMON_NOTICE_TTL_SECS` | `8` |
    /// | `LITTLE_LEMON_LOG_LEVEL` | `booking=debug,little_lemon_runtime=info` |
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a numeric variable does not parse
    /// or the offset is outside ±14 hours.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key/value source
    ///
    /// # Errors
    ///
    /// Same as [`BookingConfig::from_env`].
    pub fn from_source<F>(source: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let utc_offset_minutes =
            parse_or(&source, "LITTLE_LEMON_UTC_OFFSET_MINUTES", defaults.utc_offset_minutes)?;
        if utc_offset_minutes.unsigned_abs() > MAX_OFFSET_MINUTES.unsigned_abs() {
            return Err(ConfigError::Invalid {
                key: "LITTLE_LEMON_UTC_OFFSET_MINUTES",
                value: utc_offset_minutes.to_string(),
                reason: format!("must be within ±{MAX_OFFSET_MINUTES} minutes"),
            });
        }

        Ok(Self {
            utc_offset_minutes,
            phone: source("LITTLE_LEMON_PHONE")
                .filter(|phone| !phone.trim().is_empty())
                .unwrap_or(defaults.phone),
            submit_latency_ms: parse_or(
                &source,
                "LITTLE_LEMON_SUBMIT_LATENCY_MS",
                defaults.submit_latency_ms,
            )?,
            notice_ttl_secs: parse_or(&source, "LITTLE_LEMON_NOTICE_TTL_SECS", defaults.notice_ttl_secs)?,
            log_level: source("LITTLE_LEMON_LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    /// The restaurant's time zone as a fixed offset
    #[must_use]
    pub fn utc_offset(&self) -> FixedOffset {
        // Out-of-range offsets are rejected at load time; fall back to UTC
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }

    /// Calendar date at the restaurant for a given instant
    #[must_use]
    pub fn local_date(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.utc_offset()).date_naive()
    }

    /// Simulated booking service latency
    #[must_use]
    pub const fn submit_latency(&self) -> Duration {
        Duration::from_millis(self.submit_latency_ms)
    }

    /// How long a notice stays up, `None` when notices persist
    #[must_use]
    pub const fn notice_ttl(&self) -> Option<Duration> {
        if self.notice_ttl_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.notice_ttl_secs))
        }
    }
}

fn parse_or<F, T>(source: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match source(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|error: T::Err| ConfigError::Invalid {
            key,
            reason: error.to_string(),
            value,
        }),
    }
}
