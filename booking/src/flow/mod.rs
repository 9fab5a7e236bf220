//! The booking flow: one in-progress draft, a three-step wizard, the
//! pre-submission availability gate, and the submission lifecycle.

pub mod actions;
pub mod reducer;
pub mod state;
pub mod steps;
pub mod totals;

#[cfg(test)]
mod tests;

pub use actions::FlowAction;
pub use reducer::BookingFlowReducer;
pub use state::{
    AvailabilityStatus, BookingDraft, BookingFlowState, DraftPatch, FlowSignal, GuestDetailsPatch,
    SubmissionStatus,
};
pub use steps::{StepAdvance, StepRetreat, WizardStep};
pub use totals::TotalsBreakdown;
