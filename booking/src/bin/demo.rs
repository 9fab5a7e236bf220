//! Scripted end-to-end run of the booking client against a live
//! reservations API.
//!
//! Signs in, searches rooms for a stay next week, drafts a booking for the
//! first available room, walks the wizard, submits, and pays before the
//! countdown runs out.

use anyhow::{bail, Context};
use chrono::{Duration as ChronoDuration, Utc};
use stayflow_booking::api::rest::RestApi;
use stayflow_booking::confirmation::ConfirmationAction;
use stayflow_booking::flow::{DraftPatch, FlowAction};
use stayflow_booking::rooms::RoomsAction;
use stayflow_booking::types::Credentials;
use stayflow_booking::{BookingApp, Config};
use std::sync::Arc;
use std::time::Duration;
use stayflow_core::environment::SystemClock;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(base_url = %config.api.base_url, "Starting booking demo");

    let api = RestApi::new(&config.api).context("building API client")?;
    let app = BookingApp::new(Arc::new(SystemClock), Arc::new(api));

    let email = std::env::var("STAYFLOW_DEMO_EMAIL")
        .unwrap_or_else(|_| "guest@example.com".to_string());
    let password =
        std::env::var("STAYFLOW_DEMO_PASSWORD").unwrap_or_else(|_| "password".to_string());

    let user = app
        .login(Credentials { email, password })
        .await
        .context("login")?;
    info!(username = %user.username, "Signed in");

    // Search rooms for a one-night stay next week.
    let check_in = (Utc::now() + ChronoDuration::days(7)).date_naive();
    let check_out = check_in + ChronoDuration::days(1);
    let mut handle = app
        .rooms
        .send(RoomsAction::FetchRooms {
            stay: Some((check_in, check_out)),
        })
        .await?;
    handle.wait().await;

    let Some(room) = app.rooms.state(|s| s.rooms.first().cloned()).await else {
        bail!("no rooms available for {check_in}..{check_out}");
    };
    info!(room = %room.room_type.name, available = ?room.available_count, "Picked a room");

    let room_type_id = room.room_type.room_type_id;
    let mut handle = app
        .rooms
        .send(RoomsAction::FetchRatePlans(room_type_id))
        .await?;
    handle.wait().await;
    let Some(rate_plan) = app.rooms.state(|s| s.rate_plans.first().cloned()).await else {
        bail!("no rate plans for room type {room_type_id}");
    };

    // Draft the booking and confirm availability for the stay.
    app.flow
        .send(FlowAction::UpdateDetails(DraftPatch::room_selection(
            room_type_id,
            room.room_type.name.clone(),
            rate_plan.rate_plan_id,
            rate_plan.name.clone(),
            rate_plan.price,
        )))
        .await?;
    app.flow
        .send(FlowAction::UpdateDetails(DraftPatch::stay(
            check_in, check_out,
        )))
        .await?;

    let mut handle = app
        .flow
        .send(FlowAction::CheckAvailability { count: 1 })
        .await?;
    handle.wait().await;
    let availability = app.flow.state(|s| s.availability).await;
    info!(?availability, "Availability checked");

    // Walk the wizard: enhance stay, guest details, payment.
    app.enter_flow().await?;
    app.flow.send(FlowAction::Advance).await?;
    app.flow.send(FlowAction::Advance).await?;

    let totals = app.totals().await;
    info!(
        room = totals.room_subtotal,
        addons = totals.addon_subtotal,
        total = totals.grand_total,
        "Draft totals"
    );

    let booking = app.submit().await.context("submitting booking")?;
    info!(
        booking_id = %booking.booking_id,
        total = booking.total_price,
        expires = %booking.expired_at,
        "Booking received, paying before the countdown runs out"
    );

    let mut handle = app.confirmation.send(ConfirmationAction::Pay).await?;
    handle.wait().await;

    let (status, countdown) = app
        .confirmation
        .state(|s| (s.booking.as_ref().map(|b| b.status), s.countdown))
        .await;
    info!(?status, ?countdown, "Payment finished");

    app.leave_confirmation().await?;
    app.shutdown(Duration::from_secs(5)).await?;
    info!("Demo complete");
    Ok(())
}
