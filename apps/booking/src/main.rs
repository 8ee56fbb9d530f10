//! Booking demo binary
//!
//! Walks one guest through the booking page against the local services and
//! prints what the page shows at each step.

use anyhow::Context;
use booking::{
    AcceptingSubmitter, BookingAction, BookingConfig, BookingEnvironment, BookingPageState,
    BookingReducer, Field, Occasion, Route, SeededTimeLookup, TimeSlot,
};
use chrono::Days;
use little_lemon_core::environment::SystemClock;
use little_lemon_runtime::Store;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn slots(times: &[TimeSlot]) -> String {
    times.iter().map(TimeSlot::as_str).collect::<Vec<_>>().join(", ")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = BookingConfig::from_env().context("loading booking configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Little Lemon: Reserve a Table ===\n");

    let env = BookingEnvironment::new(
        Arc::new(SystemClock),
        SeededTimeLookup::shared(),
        AcceptingSubmitter::shared(config.submit_latency()),
        config.clone(),
    );
    let today = env.today();
    let store = Store::new(BookingPageState::new(today), BookingReducer::new(), env);

    let _ = store.send(BookingAction::PageLoaded).await?;
    let view = store.state(|s| s.render(&config)).await;
    println!("Today is {today}. {}", view.date_hint);
    println!("Times offered today: {}\n", slots(&view.available_times));

    // Try a date in the past first; the form refuses it
    let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);
    println!(">>> Picking {yesterday}");
    let _ = store.send(BookingAction::DateChanged { date: yesterday }).await?;
    let view = store.state(|s| s.render(&config)).await;
    println!("Date error: {}\n", view.date_error.unwrap_or("none"));

    let date = today.checked_add_days(Days::new(14)).unwrap_or(today);
    println!(">>> Picking {date}");
    let _ = store.send(BookingAction::DateChanged { date }).await?;
    let view = store.state(|s| s.render(&config)).await;
    println!("Times offered: {}", slots(&view.available_times));

    let Some(time) = view.available_times.first().cloned() else {
        println!("No tables left on {date}. Please call {}.", config.phone);
        return Ok(());
    };

    println!(">>> Picking {time}, 12 guests");
    let _ = store.send(BookingAction::TimeChanged { time: Some(time) }).await?;
    let _ = store
        .send(BookingAction::GuestsChanged {
            raw: "12".to_string(),
        })
        .await?;
    let _ = store
        .send(BookingAction::FieldBlurred {
            field: Field::Guests,
        })
        .await?;
    let view = store.state(|s| s.render(&config)).await;
    println!("Guests error: {}", view.guests_error.unwrap_or("none"));
    println!("{}\n", view.guests_hint);

    println!(">>> Changing to 4 guests for a birthday");
    let _ = store
        .send(BookingAction::GuestsChanged {
            raw: "4".to_string(),
        })
        .await?;
    let _ = store
        .send(BookingAction::OccasionChanged {
            occasion: Some(Occasion::Birthday),
        })
        .await?;
    let view = store.state(|s| s.render(&config)).await;
    println!("Ready to submit: {}", view.can_submit);
    println!(
        "Page snapshot:\n{}\n",
        serde_json::to_string_pretty(&view).context("rendering page snapshot")?
    );

    println!(">>> {}", view.submit_label);
    // The handle would also wait out the retry notice's expiry timer
    let outcome = store
        .send_and_wait_for(
            BookingAction::SubmitPressed,
            |action| {
                matches!(
                    action,
                    BookingAction::Navigate { .. }
                        | BookingAction::SubmissionRejected { .. }
                        | BookingAction::SubmissionFailed { .. }
                )
            },
            config.submit_latency() + Duration::from_secs(5),
        )
        .await
        .context("waiting for the booking service")?;

    if let BookingAction::Navigate { route } = outcome {
        println!("Navigated to {route}\n");
    }

    let confirmation = store.state(|s| s.confirmation_view(&config)).await;
    match confirmation {
        Some(view) => print!("{}", view.render_text()),
        None => {
            let notice = store.state(|s| s.render(&config).notice).await;
            println!("{}", notice.unwrap_or_else(|| "Booking not confirmed".to_string()));
        },
    }

    println!("\n>>> Opening {} directly", Route::Confirmed(None));
    let _ = store
        .send(BookingAction::Navigate {
            route: Route::Confirmed(None),
        })
        .await?;
    if let Some(view) = store.state(|s| s.confirmation_view(&config)).await {
        print!("{}", view.render_text());
    }

    store
        .shutdown(Duration::from_secs(1))
        .await
        .context("shutting down store")?;
    Ok(())
}
