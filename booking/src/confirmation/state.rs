//! State for the confirmation view: the submitted booking, the payment
//! countdown, and the payment lifecycle.

use crate::types::SubmittedBooking;
use serde::{Deserialize, Serialize};

/// The payment countdown against the server-issued expiry deadline.
///
/// Transitions are monotonic: once `Expired`, a booking never leaves that
/// state, and a `Stopped` countdown is never restarted for the same booking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Countdown {
    /// No booking being observed yet.
    #[default]
    Idle,
    /// Ticking once a second; `remaining_seconds` drives the mm:ss display.
    Running {
        /// Whole seconds until the expiry deadline.
        remaining_seconds: i64,
    },
    /// The deadline passed; payment is permanently disallowed.
    Expired,
    /// The view left; pending ticks are ignored and none are rescheduled.
    Stopped,
}

impl Countdown {
    /// Render the remaining time as the view shows it, `"12m 30s"` style.
    ///
    /// `None` unless the countdown is running.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        match self {
            Self::Running { remaining_seconds } => {
                let minutes = remaining_seconds / 60;
                let seconds = remaining_seconds % 60;
                Some(format!("{minutes}m {seconds}s"))
            },
            _ => None,
        }
    }

    /// Whether the deadline has passed.
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        matches!(self, Self::Expired)
    }
}

/// Lifecycle of the simulated payment call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// No payment attempted.
    #[default]
    Idle,
    /// Payment call in flight.
    Loading,
    /// Payment accepted by the reservations API.
    Succeeded,
    /// Payment rejected; retry is allowed until expiry.
    Failed,
}

/// Full state of the confirmation feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationState {
    /// The booking under observation.
    pub booking: Option<SubmittedBooking>,
    /// Countdown toward the expiry deadline.
    pub countdown: Countdown,
    /// Payment lifecycle.
    pub payment: PaymentStatus,
    /// Set when the local status was optimistically flipped to confirmed
    /// after a successful payment call; cleared by the next authoritative
    /// read, which is free to overwrite the local record.
    pub awaiting_reconciliation: bool,
    /// Last surfaced message.
    pub error: Option<String>,
}
