//! Actions for the confirmation view.

use crate::types::SubmittedBooking;
use serde::{Deserialize, Serialize};

/// Actions processed by the confirmation reducer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ConfirmationAction {
    /// The view received a freshly submitted booking.
    ///
    /// Starts the once-a-second countdown against its expiry deadline.
    Entered {
        /// The booking record returned by the reservations API.
        booking: Box<SubmittedBooking>,
    },

    /// One countdown tick; recomputes the remaining time from the clock.
    Tick,

    /// Attempt to pay the pending booking.
    ///
    /// Refused permanently once expired; a no-op while a payment is in
    /// flight or after the booking is already confirmed.
    Pay,

    /// Result of the payment call.
    PaymentResolved(Result<(), String>),

    /// Re-read the booking from the reservations API.
    Refresh,

    /// Result of the authoritative re-read.
    Refreshed(Result<Box<SubmittedBooking>, String>),

    /// The view is going away; stop the countdown for good.
    Leave,

    /// Drop the view state entirely (sign-out or a new search), returning
    /// the payment lifecycle to idle.
    Reset,
}
