//! Little Lemon table booking: availability lookup and reservation form.
//!
//! The booking page keeps two pieces of state for a visit: the times offered
//! for the selected date, and the guest's reservation draft. Changing the
//! date replaces the offered times; submitting hands a valid draft to the
//! booking service and, once accepted, navigates to a confirmation page
//! carrying the booking and a confirmation number.
//!
//! Both services are injected through [`BookingEnvironment`], so hosts and
//! tests swap in their own [`TimeLookup`] and [`BookingSubmitter`].
//!
//! # Quick Start
//!
//! ```no_run
//! use booking::{
//!     AcceptingSubmitter, BookingAction, BookingConfig, BookingEnvironment, BookingPageState,
//!     BookingReducer, SeededTimeLookup,
//! };
//! use little_lemon_core::environment::SystemClock;
//! use little_lemon_runtime::Store;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BookingConfig::from_env()?;
//! let env = BookingEnvironment::new(
//!     Arc::new(SystemClock),
//!     SeededTimeLookup::shared(),
//!     AcceptingSubmitter::shared(config.submit_latency()),
//!     config,
//! );
//! let today = env.today();
//! let store = Store::new(BookingPageState::new(today), BookingReducer::new(), env);
//!
//! store.send(BookingAction::PageLoaded).await?;
//! let times = store.state(|s| s.availability.times.clone()).await;
//! println!("{} times offered today", times.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod availability;
pub mod config;
pub mod confirmation;
pub mod form;
pub mod page;
pub mod routes;
pub mod types;

// Re-export commonly used types
pub use api::{
    AcceptingSubmitter, BookingSubmitter, LookupError, SeededTimeLookup, SubmissionError,
    SubmissionFuture, SubmissionResult, TimeLookup,
};
pub use availability::{AvailabilityAction, AvailabilityReducer, AvailabilityState};
pub use config::{BookingConfig, ConfigError};
pub use confirmation::ConfirmationView;
pub use form::{BookingFormState, DateChange};
pub use page::{
    BookingAction, BookingEnvironment, BookingPageState, BookingReducer, BookingView, Notice,
};
pub use routes::Route;
pub use types::{
    BookingRequest, ConfirmationNumber, ConfirmationRecord, Field, GuestInput, Occasion,
    TimeSlot,
};
