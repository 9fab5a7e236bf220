//! Reducer for the confirmation view.

use super::actions::ConfirmationAction;
use super::state::{ConfirmationState, Countdown, PaymentStatus};
use crate::env::AppEnvironment;
use crate::types::{BookingStatus, SubmittedBooking};
use smallvec::smallvec;
use stayflow_core::effect::{Effect, Effects};
use stayflow_core::reducer::Reducer;
use std::time::Duration;

/// Cadence of the countdown.
const TICK: Duration = Duration::from_secs(1);

/// Reducer driving the confirmation view: the payment countdown and the
/// payment lifecycle with its optimistic status update.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfirmationReducer;

impl ConfirmationReducer {
    /// Create a new confirmation reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Remaining whole seconds until the booking expires; negative once the
    /// deadline has passed.
    fn remaining_seconds(booking: &SubmittedBooking, env: &AppEnvironment) -> i64 {
        booking
            .expired_at
            .signed_duration_since(env.clock().now())
            .num_seconds()
    }

    fn schedule_tick() -> Effects<ConfirmationAction> {
        smallvec![Effect::Delay {
            duration: TICK,
            action: Box::new(ConfirmationAction::Tick),
        }]
    }
}

impl Reducer for ConfirmationReducer {
    type State = ConfirmationState;
    type Action = ConfirmationAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            ConfirmationAction::Entered { booking } => {
                let remaining = Self::remaining_seconds(&booking, env);
                *state = ConfirmationState {
                    booking: Some(*booking),
                    ..ConfirmationState::default()
                };

                if remaining < 0 {
                    state.countdown = Countdown::Expired;
                    return smallvec![Effect::None];
                }
                state.countdown = Countdown::Running {
                    remaining_seconds: remaining,
                };
                Self::schedule_tick()
            },

            ConfirmationAction::Tick => {
                // Ticks landing after Leave (or after expiry) are stale; they
                // neither change state nor reschedule, which is what ends the
                // cadence.
                if !matches!(state.countdown, Countdown::Running { .. }) {
                    return smallvec![Effect::None];
                }
                let Some(booking) = &state.booking else {
                    return smallvec![Effect::None];
                };

                let remaining = Self::remaining_seconds(booking, env);
                if remaining < 0 {
                    tracing::debug!(booking_id = %booking.booking_id, "booking expired");
                    state.countdown = Countdown::Expired;
                    return smallvec![Effect::None];
                }
                state.countdown = Countdown::Running {
                    remaining_seconds: remaining,
                };
                Self::schedule_tick()
            },

            ConfirmationAction::Pay => {
                if state.countdown.is_expired() {
                    state.error =
                        Some("this booking has expired and can no longer be paid".to_string());
                    return smallvec![Effect::None];
                }
                if state.payment == PaymentStatus::Loading {
                    return smallvec![Effect::None];
                }
                let Some(booking) = &state.booking else {
                    return smallvec![Effect::None];
                };
                // Already confirmed: paying again must not re-charge.
                if booking.status == BookingStatus::Confirmed {
                    return smallvec![Effect::None];
                }

                state.payment = PaymentStatus::Loading;
                state.error = None;

                let api = env.api();
                let booking_id = booking.booking_id;
                smallvec![Effect::future(async move {
                    let result = api.pay_booking(booking_id).await;
                    Some(ConfirmationAction::PaymentResolved(
                        result.map_err(|e| e.to_string()),
                    ))
                })]
            },

            ConfirmationAction::PaymentResolved(Ok(())) => {
                state.payment = PaymentStatus::Succeeded;
                // Optimistic local update, pending the next authoritative
                // read: the server's record remains the truth.
                if let Some(booking) = &mut state.booking {
                    booking.status = BookingStatus::Confirmed;
                }
                state.awaiting_reconciliation = true;
                smallvec![Effect::None]
            },

            ConfirmationAction::PaymentResolved(Err(message)) => {
                tracing::warn!(%message, "payment failed");
                state.payment = PaymentStatus::Failed;
                state.error = Some(message);
                smallvec![Effect::None]
            },

            ConfirmationAction::Refresh => {
                let Some(booking) = &state.booking else {
                    return smallvec![Effect::None];
                };
                let api = env.api();
                let booking_id = booking.booking_id;
                smallvec![Effect::future(async move {
                    let result = api.booking(booking_id).await;
                    Some(ConfirmationAction::Refreshed(
                        result.map(Box::new).map_err(|e| e.to_string()),
                    ))
                })]
            },

            ConfirmationAction::Refreshed(Ok(booking)) => {
                // The authoritative record overrides any optimistic update.
                state.booking = Some(*booking);
                state.awaiting_reconciliation = false;
                smallvec![Effect::None]
            },

            ConfirmationAction::Refreshed(Err(message)) => {
                tracing::warn!(%message, "booking refresh failed");
                state.error = Some(message);
                smallvec![Effect::None]
            },

            ConfirmationAction::Leave => {
                state.countdown = Countdown::Stopped;
                smallvec![Effect::None]
            },

            ConfirmationAction::Reset => {
                *state = ConfirmationState::default();
                smallvec![Effect::None]
            },
        }
    }
}
