//! The three-step wizard sequencer.
//!
//! `EnhanceStay → GuestDetails → Payment`, strictly linear. Advancing past
//! the last step means "submit" and retreating before the first means "leave
//! the flow"; neither is a step of its own.

use serde::{Deserialize, Serialize};

/// A step of the booking wizard, zero-indexed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardStep {
    /// Add-on selection.
    #[default]
    EnhanceStay,
    /// Guest contact details.
    GuestDetails,
    /// Payment method selection; the terminal action here is "submit".
    Payment,
}

/// Outcome of asking the sequencer to move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAdvance {
    /// Moved to the next step.
    Moved(WizardStep),
    /// Already on the last step; the caller should submit.
    Submit,
}

/// Outcome of asking the sequencer to move backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepRetreat {
    /// Moved to the previous step.
    Moved(WizardStep),
    /// Already on the first step; the caller should leave the flow.
    Leave,
}

impl WizardStep {
    /// Number of wizard steps.
    pub const COUNT: usize = 3;

    /// Zero-based index of this step.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::EnhanceStay => 0,
            Self::GuestDetails => 1,
            Self::Payment => 2,
        }
    }

    /// Display title of this step.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::EnhanceStay => "Enhance Stay",
            Self::GuestDetails => "Guest Details",
            Self::Payment => "Payment",
        }
    }

    /// Whether this is the first step.
    #[must_use]
    pub const fn is_first(self) -> bool {
        matches!(self, Self::EnhanceStay)
    }

    /// Whether this is the last step.
    #[must_use]
    pub const fn is_last(self) -> bool {
        matches!(self, Self::Payment)
    }

    /// Move forward one step, or signal submission from the last step.
    #[must_use]
    pub const fn advance(self) -> StepAdvance {
        match self {
            Self::EnhanceStay => StepAdvance::Moved(Self::GuestDetails),
            Self::GuestDetails => StepAdvance::Moved(Self::Payment),
            Self::Payment => StepAdvance::Submit,
        }
    }

    /// Move backward one step, or signal leaving from the first step.
    #[must_use]
    pub const fn retreat(self) -> StepRetreat {
        match self {
            Self::EnhanceStay => StepRetreat::Leave,
            Self::GuestDetails => StepRetreat::Moved(Self::EnhanceStay),
            Self::Payment => StepRetreat::Moved(Self::GuestDetails),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_walks_forward_then_signals_submit() {
        assert_eq!(
            WizardStep::EnhanceStay.advance(),
            StepAdvance::Moved(WizardStep::GuestDetails)
        );
        assert_eq!(
            WizardStep::GuestDetails.advance(),
            StepAdvance::Moved(WizardStep::Payment)
        );
        assert_eq!(WizardStep::Payment.advance(), StepAdvance::Submit);
    }

    #[test]
    fn retreat_walks_backward_then_signals_leave() {
        assert_eq!(
            WizardStep::Payment.retreat(),
            StepRetreat::Moved(WizardStep::GuestDetails)
        );
        assert_eq!(
            WizardStep::GuestDetails.retreat(),
            StepRetreat::Moved(WizardStep::EnhanceStay)
        );
        assert_eq!(WizardStep::EnhanceStay.retreat(), StepRetreat::Leave);
    }

    #[test]
    fn indices_stay_within_bounds() {
        for step in [
            WizardStep::EnhanceStay,
            WizardStep::GuestDetails,
            WizardStep::Payment,
        ] {
            assert!(step.index() < WizardStep::COUNT);
        }
        assert!(WizardStep::EnhanceStay.is_first());
        assert!(WizardStep::Payment.is_last());
    }
}
