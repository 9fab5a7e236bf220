//! Unit tests for the confirmation reducer, driven by simulated time.

#![allow(clippy::unwrap_used)] // Test code

use super::actions::ConfirmationAction;
use super::reducer::ConfirmationReducer;
use super::state::{ConfirmationState, Countdown, PaymentStatus};
use crate::api::mock::{pending_booking, MockHotelApi};
use crate::env::AppEnvironment;
use crate::types::BookingStatus;
use chrono::Duration;
use stayflow_core::effect::{Effect, Effects};
use stayflow_core::environment::Clock;
use stayflow_core::reducer::Reducer;
use stayflow_testing::reducer_test::assertions::{assert_has_future, assert_no_effects};
use stayflow_testing::{test_clock, AdvancingClock};
use std::sync::Arc;

struct Harness {
    clock: AdvancingClock,
    env: AppEnvironment,
    state: ConfirmationState,
}

impl Harness {
    fn new() -> Self {
        let clock = AdvancingClock::new(test_clock().now());
        let env = AppEnvironment::new(Arc::new(clock.clone()), Arc::new(MockHotelApi::new()));
        Self {
            clock,
            env,
            state: ConfirmationState::default(),
        }
    }

    fn dispatch(&mut self, action: ConfirmationAction) -> Effects<ConfirmationAction> {
        ConfirmationReducer::new().reduce(&mut self.state, action, &self.env)
    }

    /// Enter with a booking expiring the given seconds from now.
    fn enter_with_expiry(&mut self, seconds: i64) -> Effects<ConfirmationAction> {
        let booking = pending_booking(self.clock.now() + Duration::seconds(seconds));
        self.dispatch(ConfirmationAction::Entered {
            booking: Box::new(booking),
        })
    }
}

fn has_tick(effects: &[Effect<ConfirmationAction>]) -> bool {
    effects.iter().any(|e| matches!(e, Effect::Delay { .. }))
}

#[test]
fn entering_starts_a_running_countdown() {
    let mut harness = Harness::new();
    let effects = harness.enter_with_expiry(90);

    assert_eq!(
        harness.state.countdown,
        Countdown::Running {
            remaining_seconds: 90
        }
    );
    assert!(has_tick(&effects));
}

#[test]
fn ticks_track_the_clock_while_the_deadline_is_ahead() {
    let mut harness = Harness::new();
    harness.enter_with_expiry(90);

    harness.clock.advance(Duration::seconds(45));
    let effects = harness.dispatch(ConfirmationAction::Tick);

    assert_eq!(
        harness.state.countdown,
        Countdown::Running {
            remaining_seconds: 45
        }
    );
    assert!(has_tick(&effects));
}

#[test]
fn expiry_is_monotonic_and_stops_the_cadence() {
    let mut harness = Harness::new();
    harness.enter_with_expiry(90);

    // 91 seconds of simulated time: past the deadline.
    harness.clock.advance(Duration::seconds(91));
    let effects = harness.dispatch(ConfirmationAction::Tick);
    assert_eq!(harness.state.countdown, Countdown::Expired);
    assert!(!has_tick(&effects), "an expired countdown must not reschedule");

    // Further ticks and further time never bring it back.
    harness.clock.advance(Duration::seconds(3600));
    let effects = harness.dispatch(ConfirmationAction::Tick);
    assert_eq!(harness.state.countdown, Countdown::Expired);
    assert_no_effects(&effects);
}

#[test]
fn entering_with_a_past_deadline_expires_immediately() {
    let mut harness = Harness::new();
    let effects = harness.enter_with_expiry(-5);

    assert_eq!(harness.state.countdown, Countdown::Expired);
    assert!(!has_tick(&effects));
}

#[test]
fn leave_stops_the_countdown_and_stale_ticks_are_ignored() {
    let mut harness = Harness::new();
    harness.enter_with_expiry(90);

    harness.dispatch(ConfirmationAction::Leave);
    assert_eq!(harness.state.countdown, Countdown::Stopped);

    // The tick that was already in flight lands after Leave.
    let effects = harness.dispatch(ConfirmationAction::Tick);
    assert_eq!(harness.state.countdown, Countdown::Stopped);
    assert_no_effects(&effects);
}

#[test]
fn pay_starts_the_payment_call_while_pending() {
    let mut harness = Harness::new();
    harness.enter_with_expiry(900);

    let effects = harness.dispatch(ConfirmationAction::Pay);

    assert_eq!(harness.state.payment, PaymentStatus::Loading);
    assert_has_future(&effects);
}

#[test]
fn successful_payment_confirms_optimistically_pending_reconciliation() {
    let mut harness = Harness::new();
    harness.enter_with_expiry(900);
    harness.dispatch(ConfirmationAction::Pay);

    harness.dispatch(ConfirmationAction::PaymentResolved(Ok(())));

    assert_eq!(harness.state.payment, PaymentStatus::Succeeded);
    assert!(harness.state.awaiting_reconciliation);
    assert_eq!(
        harness.state.booking.as_ref().unwrap().status,
        BookingStatus::Confirmed
    );
}

#[test]
fn paying_an_already_confirmed_booking_is_a_no_op() {
    let mut harness = Harness::new();
    harness.enter_with_expiry(900);
    harness.dispatch(ConfirmationAction::Pay);
    harness.dispatch(ConfirmationAction::PaymentResolved(Ok(())));

    let effects = harness.dispatch(ConfirmationAction::Pay);

    assert_no_effects(&effects);
    assert_eq!(harness.state.payment, PaymentStatus::Succeeded);
}

#[test]
fn pay_is_refused_once_expired() {
    let mut harness = Harness::new();
    harness.enter_with_expiry(90);
    harness.clock.advance(Duration::seconds(91));
    harness.dispatch(ConfirmationAction::Tick);

    let effects = harness.dispatch(ConfirmationAction::Pay);

    assert_no_effects(&effects);
    assert_eq!(harness.state.payment, PaymentStatus::Idle);
    assert!(harness.state.error.as_deref().unwrap_or("").contains("expired"));
}

#[test]
fn failed_payment_keeps_the_booking_pending_for_retry() {
    let mut harness = Harness::new();
    harness.enter_with_expiry(900);
    harness.dispatch(ConfirmationAction::Pay);

    harness.dispatch(ConfirmationAction::PaymentResolved(Err(
        "gateway unavailable".to_string(),
    )));

    assert_eq!(harness.state.payment, PaymentStatus::Failed);
    assert_eq!(harness.state.error.as_deref(), Some("gateway unavailable"));
    assert_eq!(
        harness.state.booking.as_ref().unwrap().status,
        BookingStatus::Pending
    );
    assert!(!harness.state.awaiting_reconciliation);

    // Still before the deadline, so a retry is allowed.
    let effects = harness.dispatch(ConfirmationAction::Pay);
    assert_has_future(&effects);
}

#[test]
fn reset_returns_payment_and_countdown_to_idle() {
    let mut harness = Harness::new();
    harness.enter_with_expiry(900);
    harness.dispatch(ConfirmationAction::Pay);
    harness.dispatch(ConfirmationAction::PaymentResolved(Ok(())));

    harness.dispatch(ConfirmationAction::Reset);

    assert_eq!(harness.state, ConfirmationState::default());
    assert_eq!(harness.state.payment, PaymentStatus::Idle);
    assert_eq!(harness.state.countdown, Countdown::Idle);

    // A tick from the discarded countdown lands harmlessly.
    let effects = harness.dispatch(ConfirmationAction::Tick);
    assert_no_effects(&effects);
}

#[test]
fn an_authoritative_read_overrides_the_optimistic_status() {
    let mut harness = Harness::new();
    harness.enter_with_expiry(900);
    harness.dispatch(ConfirmationAction::Pay);
    harness.dispatch(ConfirmationAction::PaymentResolved(Ok(())));
    assert!(harness.state.awaiting_reconciliation);

    // The server says the booking is actually still pending.
    let mut authoritative = pending_booking(harness.clock.now() + Duration::seconds(900));
    authoritative.status = BookingStatus::Pending;
    harness.dispatch(ConfirmationAction::Refreshed(Ok(Box::new(authoritative))));

    assert!(!harness.state.awaiting_reconciliation);
    assert_eq!(
        harness.state.booking.as_ref().unwrap().status,
        BookingStatus::Pending
    );
}
