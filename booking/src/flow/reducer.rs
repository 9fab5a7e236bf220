//! Reducer for the booking flow.

use super::actions::FlowAction;
use super::state::{
    AvailabilityStatus, BookingFlowState, FlowSignal, SubmissionStatus,
};
use super::steps::{StepAdvance, StepRetreat};
use crate::env::AppEnvironment;
use crate::types::{BookingAddonItem, CreateBookingRequest};
use smallvec::smallvec;
use stayflow_core::effect::{Effect, Effects};
use stayflow_core::reducer::Reducer;

/// Wire format for date-only fields.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reducer driving the booking wizard: draft edits, step sequencing, the
/// availability gate, and submission.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingFlowReducer;

impl BookingFlowReducer {
    /// Create a new booking flow reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validate the draft and start the submission call.
    ///
    /// Refused while a submission is already in flight, so rapid repeated
    /// submits cannot double-book.
    fn submit(state: &mut BookingFlowState, env: &AppEnvironment) -> Effects<FlowAction> {
        if state.submission == SubmissionStatus::Loading {
            tracing::debug!("submission already in flight, ignoring");
            return smallvec![Effect::None];
        }

        let request = match build_submission_request(state) {
            Ok(request) => request,
            Err(message) => {
                tracing::debug!(%message, "submission blocked locally");
                state.error = Some(message);
                return smallvec![Effect::None];
            },
        };

        state.submission = SubmissionStatus::Loading;
        state.error = None;

        let api = env.api();
        smallvec![Effect::future(async move {
            let result = api.create_booking(request).await;
            Some(FlowAction::SubmissionResolved(
                result.map(Box::new).map_err(|e| e.to_string()),
            ))
        })]
    }
}

/// Build the submission payload from the current draft.
///
/// Local validation only: the reservations API re-validates everything.
/// Selected add-ons are reduced to `{addonId, quantity}` pairs and entries
/// with quantity zero are dropped.
pub(crate) fn build_submission_request(
    state: &BookingFlowState,
) -> Result<CreateBookingRequest, String> {
    let user = state
        .user
        .as_ref()
        .ok_or_else(|| "sign in to complete your booking".to_string())?;
    let room_type_id = state
        .draft
        .room_id
        .ok_or_else(|| "select a room before booking".to_string())?;
    let rate_plan_id = state
        .draft
        .rate_plan_id
        .ok_or_else(|| "select a rate plan before booking".to_string())?;
    let (check_in, check_out) = match (state.draft.check_in, state.draft.check_out) {
        (Some(check_in), Some(check_out)) => (check_in, check_out),
        _ => return Err("select your stay dates before booking".to_string()),
    };
    if check_out <= check_in {
        return Err("stay must be at least one night".to_string());
    }
    if state.availability != AvailabilityStatus::Available {
        return Err("room availability has not been confirmed for these dates".to_string());
    }

    let mut booking_addon: Vec<BookingAddonItem> = state
        .draft
        .selected_addons
        .iter()
        .filter(|(_, quantity)| **quantity > 0)
        .map(|(addon_id, quantity)| BookingAddonItem {
            addon_id: *addon_id,
            quantity: *quantity,
        })
        .collect();
    booking_addon.sort_by_key(|item| item.addon_id);

    Ok(CreateBookingRequest {
        user_id: user.id,
        rate_plan_id,
        room_type_id,
        check_in_date: check_in.format(DATE_FORMAT).to_string(),
        check_out_date: check_out.format(DATE_FORMAT).to_string(),
        num_adults: state.draft.adults,
        email: state.draft.guest_details.email.clone(),
        booking_addon,
    })
}

impl Reducer for BookingFlowReducer {
    type State = BookingFlowState;
    type Action = FlowAction;
    type Environment = AppEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per operation of the flow
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            FlowAction::Enter { user } => {
                if state.draft.room_id.is_none() {
                    tracing::debug!("entered without a chosen room, leaving flow");
                    state.signal = Some(FlowSignal::LeaveFlow);
                    return smallvec![Effect::None];
                }

                // Prefill once; never clobber edits on re-entry.
                let details = &mut state.draft.guest_details;
                if details.first_name.is_empty() && details.email.is_empty() {
                    details.first_name = user.username.clone();
                    details.email = user.email.clone();
                }
                state.user = Some(user);
                smallvec![Effect::None]
            },

            FlowAction::UpdateDetails(patch) => {
                if state.submission == SubmissionStatus::Loading {
                    tracing::debug!("draft is frozen while submission is in flight");
                    return smallvec![Effect::None];
                }
                if patch.invalidates_availability() {
                    state.availability = AvailabilityStatus::Idle;
                }
                patch.apply(&mut state.draft);
                smallvec![Effect::None]
            },

            FlowAction::ToggleAddon(addon_id) => {
                let quantity = state.draft.addon_quantity(addon_id);
                let next = u32::from(quantity == 0);
                state.draft.selected_addons.insert(addon_id, next);
                smallvec![Effect::None]
            },

            FlowAction::UpdateGuestDetails(patch) => {
                patch.apply(&mut state.draft.guest_details);
                smallvec![Effect::None]
            },

            FlowAction::SetPaymentMethod(method) => {
                state.draft.payment_method = method;
                smallvec![Effect::None]
            },

            FlowAction::Advance => match state.step.advance() {
                StepAdvance::Moved(next) => {
                    state.step = next;
                    smallvec![Effect::None]
                },
                StepAdvance::Submit => Self::submit(state, env),
            },

            FlowAction::Retreat => match state.step.retreat() {
                StepRetreat::Moved(previous) => {
                    state.step = previous;
                    smallvec![Effect::None]
                },
                StepRetreat::Leave => {
                    state.signal = Some(FlowSignal::LeaveFlow);
                    smallvec![Effect::None]
                },
            },

            FlowAction::CheckAvailability { count } => {
                let (Some(check_in), Some(check_out), Some(room_id)) =
                    (state.draft.check_in, state.draft.check_out, state.draft.room_id)
                else {
                    state.error =
                        Some("select dates and a room before checking availability".to_string());
                    return smallvec![Effect::None];
                };
                if check_out <= check_in {
                    state.error = Some("stay must be at least one night".to_string());
                    return smallvec![Effect::None];
                }

                state.availability = AvailabilityStatus::Loading;
                state.error = None;

                let api = env.api();
                let requested = count.max(1);
                smallvec![Effect::future(async move {
                    let action = match api.availability_counts(check_in, check_out).await {
                        Ok(counts) => {
                            let remaining = counts.for_room(room_id);
                            if remaining >= requested {
                                FlowAction::AvailabilityResolved {
                                    available: true,
                                    message: None,
                                }
                            } else {
                                FlowAction::AvailabilityResolved {
                                    available: false,
                                    message: Some(
                                        "Room not available for selected dates".to_string(),
                                    ),
                                }
                            }
                        },
                        Err(e) => FlowAction::AvailabilityResolved {
                            available: false,
                            message: Some(e.to_string()),
                        },
                    };
                    Some(action)
                })]
            },

            FlowAction::AvailabilityResolved { available, message } => {
                // A result for an outdated query must not resurrect a check
                // that a later date/room change already invalidated.
                if state.availability != AvailabilityStatus::Loading {
                    tracing::debug!("discarding stale availability result");
                    return smallvec![Effect::None];
                }
                state.availability = if available {
                    AvailabilityStatus::Available
                } else {
                    AvailabilityStatus::Unavailable
                };
                state.error = message;
                smallvec![Effect::None]
            },

            FlowAction::Submit => Self::submit(state, env),

            FlowAction::SubmissionResolved(Ok(booking)) => {
                state.submission = SubmissionStatus::Succeeded;
                state.submitted = Some(*booking);
                state.signal = Some(FlowSignal::Submitted);
                smallvec![Effect::None]
            },

            FlowAction::SubmissionResolved(Err(message)) => {
                tracing::warn!(%message, "booking submission failed");
                state.submission = SubmissionStatus::Failed;
                state.error = Some(message);
                smallvec![Effect::None]
            },

            FlowAction::ClearSignal => {
                state.signal = None;
                smallvec![Effect::None]
            },

            FlowAction::Reset => {
                *state = BookingFlowState::default();
                smallvec![Effect::None]
            },
        }
    }
}
