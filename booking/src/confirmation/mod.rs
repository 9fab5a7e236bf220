//! The confirmation view: a submitted booking, the once-a-second payment
//! countdown against the server-issued expiry deadline, and the payment
//! lifecycle with its optimistic, reconciliation-pending status update.

pub mod actions;
pub mod reducer;
pub mod state;

#[cfg(test)]
mod tests;

pub use actions::ConfirmationAction;
pub use reducer::ConfirmationReducer;
pub use state::{ConfirmationState, Countdown, PaymentStatus};
