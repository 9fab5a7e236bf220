//! State for the booking flow: the single in-progress draft plus the
//! availability and submission lifecycles around it.

use super::steps::WizardStep;
use crate::types::{
    AddonId, AuthenticatedUser, GuestDetails, PaymentMethod, RatePlanId, RoomTypeId,
    SubmittedBooking,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lifecycle of the pre-submission availability check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvailabilityStatus {
    /// Not checked for the current dates/room.
    #[default]
    Idle,
    /// Query in flight.
    Loading,
    /// Requested count fits the remaining inventory.
    Available,
    /// Requested count exceeds the remaining inventory (or the check failed).
    Unavailable,
}

/// Lifecycle of the booking submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionStatus {
    /// Nothing submitted.
    #[default]
    Idle,
    /// Submission in flight; further submits are refused while here.
    Loading,
    /// The reservations API accepted the booking.
    Succeeded,
    /// The reservations API rejected the booking; the draft is preserved.
    Failed,
}

/// Edge signals for the surrounding application.
///
/// The flow does not navigate; it records that the caller should.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowSignal {
    /// Leave the wizard (retreat from the first step, or entry guard failed).
    LeaveFlow,
    /// Submission succeeded; hand the returned booking to the confirmation
    /// view.
    Submitted,
}

/// The in-progress booking draft.
///
/// There is exactly one live draft per session. It is created with defaults,
/// updated by partial merges from every wizard step, and only ever replaced
/// wholesale by a reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingDraft {
    /// Selected room type, set when a room/rate pair is chosen.
    pub room_id: Option<RoomTypeId>,
    /// Display name of the selected room.
    pub room_name: Option<String>,
    /// Selected rate plan.
    pub rate_plan_id: Option<RatePlanId>,
    /// Display name of the selected rate plan.
    pub rate_plan_name: Option<String>,
    /// Quoted nightly price for the selected room/rate pair.
    pub price_per_night: Option<f64>,
    /// Picture reference for the summary panel.
    pub room_image: Option<String>,
    /// Stay start (date-only).
    pub check_in: Option<NaiveDate>,
    /// Stay end (date-only); must be strictly after `check_in`.
    pub check_out: Option<NaiveDate>,
    /// Number of adults, at least 1.
    pub adults: u32,
    /// Number of children.
    pub children: u32,
    /// Number of rooms, at least 1.
    pub room_count: u32,
    /// Selected add-ons by id; a quantity of 0 is equivalent to absence.
    pub selected_addons: HashMap<AddonId, u32>,
    /// Guest contact details.
    pub guest_details: GuestDetails,
    /// Chosen payment method.
    pub payment_method: PaymentMethod,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self {
            room_id: None,
            room_name: None,
            rate_plan_id: None,
            rate_plan_name: None,
            price_per_night: None,
            room_image: None,
            check_in: None,
            check_out: None,
            adults: 1,
            children: 0,
            room_count: 1,
            selected_addons: HashMap::new(),
            guest_details: GuestDetails::default(),
            payment_method: PaymentMethod::default(),
        }
    }
}

impl BookingDraft {
    /// Nights between check-in and check-out, when both are set.
    #[must_use]
    pub fn nights(&self) -> Option<i64> {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => {
                Some(check_out.signed_duration_since(check_in).num_days())
            },
            _ => None,
        }
    }

    /// Selected add-on quantity; zero when never toggled.
    #[must_use]
    pub fn addon_quantity(&self, addon_id: AddonId) -> u32 {
        self.selected_addons.get(&addon_id).copied().unwrap_or(0)
    }
}

/// Partial update merged into the draft by `UpdateDetails`.
///
/// `None` fields are left untouched; present fields overwrite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftPatch {
    /// New room type selection.
    pub room_id: Option<RoomTypeId>,
    /// New room display name.
    pub room_name: Option<String>,
    /// New rate plan selection.
    pub rate_plan_id: Option<RatePlanId>,
    /// New rate plan display name.
    pub rate_plan_name: Option<String>,
    /// New nightly price quote.
    pub price_per_night: Option<f64>,
    /// New picture reference.
    pub room_image: Option<String>,
    /// New stay start.
    pub check_in: Option<NaiveDate>,
    /// New stay end.
    pub check_out: Option<NaiveDate>,
    /// New adult count.
    pub adults: Option<u32>,
    /// New child count.
    pub children: Option<u32>,
    /// New room count.
    pub room_count: Option<u32>,
}

impl DraftPatch {
    /// Patch selecting a room/rate pair, as the search page does.
    #[must_use]
    pub fn room_selection(
        room_id: RoomTypeId,
        room_name: impl Into<String>,
        rate_plan_id: RatePlanId,
        rate_plan_name: impl Into<String>,
        price_per_night: f64,
    ) -> Self {
        Self {
            room_id: Some(room_id),
            room_name: Some(room_name.into()),
            rate_plan_id: Some(rate_plan_id),
            rate_plan_name: Some(rate_plan_name.into()),
            price_per_night: Some(price_per_night),
            ..Self::default()
        }
    }

    /// Patch setting the stay window.
    #[must_use]
    pub fn stay(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            check_in: Some(check_in),
            check_out: Some(check_out),
            ..Self::default()
        }
    }

    /// Whether applying this patch must invalidate a prior availability
    /// result (any change to the stay window or the room does).
    #[must_use]
    pub const fn invalidates_availability(&self) -> bool {
        self.check_in.is_some() || self.check_out.is_some() || self.room_id.is_some()
    }

    /// Merge this patch into a draft, shallow at the top level.
    pub fn apply(self, draft: &mut BookingDraft) {
        if let Some(room_id) = self.room_id {
            draft.room_id = Some(room_id);
        }
        if let Some(room_name) = self.room_name {
            draft.room_name = Some(room_name);
        }
        if let Some(rate_plan_id) = self.rate_plan_id {
            draft.rate_plan_id = Some(rate_plan_id);
        }
        if let Some(rate_plan_name) = self.rate_plan_name {
            draft.rate_plan_name = Some(rate_plan_name);
        }
        if let Some(price) = self.price_per_night {
            draft.price_per_night = Some(price);
        }
        if let Some(room_image) = self.room_image {
            draft.room_image = Some(room_image);
        }
        if let Some(check_in) = self.check_in {
            draft.check_in = Some(check_in);
        }
        if let Some(check_out) = self.check_out {
            draft.check_out = Some(check_out);
        }
        if let Some(adults) = self.adults {
            draft.adults = adults.max(1);
        }
        if let Some(children) = self.children {
            draft.children = children;
        }
        if let Some(room_count) = self.room_count {
            draft.room_count = room_count.max(1);
        }
    }
}

/// Partial update merged into the guest details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestDetailsPatch {
    /// New salutation.
    pub title: Option<String>,
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New phone.
    pub phone: Option<String>,
    /// New country.
    pub country: Option<String>,
}

impl GuestDetailsPatch {
    /// Merge this patch into guest details.
    pub fn apply(self, details: &mut GuestDetails) {
        if let Some(title) = self.title {
            details.title = title;
        }
        if let Some(first_name) = self.first_name {
            details.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            details.last_name = last_name;
        }
        if let Some(email) = self.email {
            details.email = email;
        }
        if let Some(phone) = self.phone {
            details.phone = phone;
        }
        if let Some(country) = self.country {
            details.country = country;
        }
    }
}

/// Full state of the booking flow feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingFlowState {
    /// The in-progress draft.
    pub draft: BookingDraft,
    /// Current wizard step.
    pub step: WizardStep,
    /// Identity the flow was entered with; required for submission.
    pub user: Option<AuthenticatedUser>,
    /// Availability check lifecycle.
    pub availability: AvailabilityStatus,
    /// Submission lifecycle.
    pub submission: SubmissionStatus,
    /// Booking record returned on successful submission.
    pub submitted: Option<SubmittedBooking>,
    /// Pending edge signal for the caller.
    pub signal: Option<FlowSignal>,
    /// Last surfaced validation or server message.
    pub error: Option<String>,
}
