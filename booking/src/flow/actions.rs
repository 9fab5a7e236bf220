//! Actions for the booking flow.
//!
//! User commands and the results of async work against the reservations API
//! share one enum; results are fed back into the reducer by the store.

use super::state::{DraftPatch, GuestDetailsPatch};
use crate::types::{AddonId, AuthenticatedUser, PaymentMethod, SubmittedBooking};
use serde::{Deserialize, Serialize};

/// Actions processed by the booking flow reducer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FlowAction {
    /// Enter the wizard with the authenticated identity.
    ///
    /// Guards the flow: without a previously chosen room the flow signals
    /// `LeaveFlow`. Prefills the guest name/email from the identity exactly
    /// once, only while both fields are still empty.
    Enter {
        /// The signed-in user.
        user: AuthenticatedUser,
    },

    /// Merge a partial update into the draft.
    ///
    /// Changing the stay window or the room invalidates any prior
    /// availability result.
    UpdateDetails(DraftPatch),

    /// Flip an add-on between unselected and selected.
    ToggleAddon(AddonId),

    /// Merge a partial update into the guest details.
    UpdateGuestDetails(GuestDetailsPatch),

    /// Choose the payment method.
    SetPaymentMethod(PaymentMethod),

    /// Move to the next step; on the last step this submits.
    Advance,

    /// Move to the previous step; on the first step this signals leaving.
    Retreat,

    /// Check remaining inventory for the drafted dates and room.
    CheckAvailability {
        /// How many rooms are requested.
        count: u32,
    },

    /// Result of the availability query.
    AvailabilityResolved {
        /// Whether the requested count fits the remaining inventory.
        available: bool,
        /// Failure or shortfall message, surfaced verbatim.
        message: Option<String>,
    },

    /// Submit the draft to the reservations API.
    Submit,

    /// Result of the submission call.
    SubmissionResolved(Result<Box<SubmittedBooking>, String>),

    /// The caller consumed the pending edge signal.
    ClearSignal,

    /// Restore the flow to its defaults, clearing every status.
    Reset,
}
