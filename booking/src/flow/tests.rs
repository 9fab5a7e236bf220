//! Unit tests for the booking flow reducer.

#![allow(clippy::unwrap_used)] // Test code

use super::actions::FlowAction;
use super::reducer::{build_submission_request, BookingFlowReducer};
use super::state::{
    AvailabilityStatus, BookingFlowState, DraftPatch, FlowSignal, GuestDetailsPatch,
    SubmissionStatus,
};
use super::steps::WizardStep;
use crate::api::mock::{pending_booking, MockHotelApi};
use crate::env::AppEnvironment;
use crate::types::{AddonId, AuthenticatedUser, PaymentMethod, RatePlanId, RoomTypeId, UserId};
use chrono::NaiveDate;
use proptest::prelude::*;
use stayflow_core::effect::Effects;
use stayflow_core::environment::Clock;
use stayflow_core::reducer::Reducer;
use stayflow_testing::reducer_test::assertions::{assert_has_future, assert_no_effects};
use stayflow_testing::{test_clock, ReducerTest};
use std::sync::Arc;

fn test_env() -> AppEnvironment {
    AppEnvironment::new(Arc::new(test_clock()), Arc::new(MockHotelApi::new()))
}

fn guest() -> AuthenticatedUser {
    AuthenticatedUser {
        id: UserId::new(1),
        username: "somsak".to_string(),
        email: "somsak@example.com".to_string(),
        role: "guest".to_string(),
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A draft ready to submit: room, rate, dates, identity, availability.
fn submittable_state() -> BookingFlowState {
    let mut state = BookingFlowState::default();
    let env = test_env();
    let reducer = BookingFlowReducer::new();

    reducer.reduce(
        &mut state,
        FlowAction::UpdateDetails(DraftPatch::room_selection(
            RoomTypeId::new(5),
            "Deluxe King",
            RatePlanId::new(2),
            "Flexible",
            3000.0,
        )),
        &env,
    );
    reducer.reduce(
        &mut state,
        FlowAction::UpdateDetails(DraftPatch::stay(date(2026, 9, 1), date(2026, 9, 2))),
        &env,
    );
    reducer.reduce(&mut state, FlowAction::Enter { user: guest() }, &env);
    state.availability = AvailabilityStatus::Available;
    state
}

fn dispatch(state: &mut BookingFlowState, action: FlowAction) -> Effects<FlowAction> {
    BookingFlowReducer::new().reduce(state, action, &test_env())
}

#[test]
fn changing_dates_resets_a_confirmed_availability() {
    let mut state = submittable_state();
    assert_eq!(state.availability, AvailabilityStatus::Available);

    dispatch(
        &mut state,
        FlowAction::UpdateDetails(DraftPatch {
            check_in: Some(date(2026, 9, 3)),
            ..DraftPatch::default()
        }),
    );

    assert_eq!(state.availability, AvailabilityStatus::Idle);
}

#[test]
fn changing_the_room_resets_availability_regardless_of_prior_state() {
    for prior in [
        AvailabilityStatus::Loading,
        AvailabilityStatus::Available,
        AvailabilityStatus::Unavailable,
    ] {
        let mut state = submittable_state();
        state.availability = prior;

        dispatch(
            &mut state,
            FlowAction::UpdateDetails(DraftPatch {
                room_id: Some(RoomTypeId::new(8)),
                ..DraftPatch::default()
            }),
        );

        assert_eq!(state.availability, AvailabilityStatus::Idle);
    }
}

#[test]
fn unrelated_updates_preserve_availability() {
    let mut state = submittable_state();

    dispatch(
        &mut state,
        FlowAction::UpdateDetails(DraftPatch {
            adults: Some(2),
            children: Some(1),
            ..DraftPatch::default()
        }),
    );

    assert_eq!(state.availability, AvailabilityStatus::Available);
    assert_eq!(state.draft.adults, 2);
    assert_eq!(state.draft.children, 1);
}

#[test]
fn toggling_an_addon_twice_restores_the_original_quantity() {
    let mut state = BookingFlowState::default();
    let addon = AddonId::new(9);

    dispatch(&mut state, FlowAction::ToggleAddon(addon));
    assert_eq!(state.draft.addon_quantity(addon), 1);

    dispatch(&mut state, FlowAction::ToggleAddon(addon));
    assert_eq!(state.draft.addon_quantity(addon), 0);
}

#[test]
fn guest_detail_patches_merge_shallowly() {
    ReducerTest::new(BookingFlowReducer::new())
        .with_env(test_env())
        .given_state(BookingFlowState::default())
        .when_action(FlowAction::UpdateGuestDetails(GuestDetailsPatch {
            first_name: Some("Ada".to_string()),
            country: Some("Thailand".to_string()),
            ..GuestDetailsPatch::default()
        }))
        .then_state(|state| {
            assert_eq!(state.draft.guest_details.first_name, "Ada");
            assert_eq!(state.draft.guest_details.country, "Thailand");
            assert!(state.draft.guest_details.email.is_empty());
        })
        .then_effects(assert_no_effects)
        .run();
}

#[test]
fn payment_method_is_constrained_to_the_closed_set() {
    let mut state = BookingFlowState::default();
    assert_eq!(state.draft.payment_method, PaymentMethod::Qr);

    dispatch(&mut state, FlowAction::SetPaymentMethod(PaymentMethod::Card));
    assert_eq!(state.draft.payment_method, PaymentMethod::Card);
}

#[test]
fn entering_without_a_room_signals_leaving() {
    let mut state = BookingFlowState::default();
    dispatch(&mut state, FlowAction::Enter { user: guest() });
    assert_eq!(state.signal, Some(FlowSignal::LeaveFlow));
}

#[test]
fn entry_prefills_guest_details_exactly_once() {
    let mut state = BookingFlowState::default();
    dispatch(
        &mut state,
        FlowAction::UpdateDetails(DraftPatch::room_selection(
            RoomTypeId::new(5),
            "Deluxe King",
            RatePlanId::new(2),
            "Flexible",
            3000.0,
        )),
    );

    dispatch(&mut state, FlowAction::Enter { user: guest() });
    assert_eq!(state.draft.guest_details.first_name, "somsak");
    assert_eq!(state.draft.guest_details.email, "somsak@example.com");

    // The guest edits the fields; re-entering must not clobber them.
    dispatch(
        &mut state,
        FlowAction::UpdateGuestDetails(GuestDetailsPatch {
            first_name: Some("Somsak J.".to_string()),
            ..GuestDetailsPatch::default()
        }),
    );
    dispatch(&mut state, FlowAction::Enter { user: guest() });
    assert_eq!(state.draft.guest_details.first_name, "Somsak J.");
}

#[test]
fn sequencer_never_leaves_the_step_range() {
    let mut state = BookingFlowState::default();
    assert_eq!(state.step, WizardStep::EnhanceStay);

    dispatch(&mut state, FlowAction::Advance);
    assert_eq!(state.step, WizardStep::GuestDetails);
    dispatch(&mut state, FlowAction::Advance);
    assert_eq!(state.step, WizardStep::Payment);

    dispatch(&mut state, FlowAction::Retreat);
    dispatch(&mut state, FlowAction::Retreat);
    assert_eq!(state.step, WizardStep::EnhanceStay);
    assert_eq!(state.signal, None);

    // Retreating from the first step signals leaving instead of moving.
    dispatch(&mut state, FlowAction::Retreat);
    assert_eq!(state.step, WizardStep::EnhanceStay);
    assert_eq!(state.signal, Some(FlowSignal::LeaveFlow));
}

#[test]
fn advancing_from_the_last_step_submits() {
    let mut state = submittable_state();
    state.step = WizardStep::Payment;

    let effects = dispatch(&mut state, FlowAction::Advance);

    assert_eq!(state.submission, SubmissionStatus::Loading);
    assert_has_future(&effects);
}

#[test]
fn check_availability_requires_dates_and_room() {
    let mut state = BookingFlowState::default();

    let effects = dispatch(&mut state, FlowAction::CheckAvailability { count: 1 });

    assert_eq!(state.availability, AvailabilityStatus::Idle);
    assert!(state.error.is_some());
    assert_no_effects(&effects);
}

#[test]
fn check_availability_rejects_a_zero_night_stay_locally() {
    let mut state = submittable_state();
    state.draft.check_out = state.draft.check_in;

    let effects = dispatch(&mut state, FlowAction::CheckAvailability { count: 1 });

    assert_eq!(state.error.as_deref(), Some("stay must be at least one night"));
    assert_no_effects(&effects);
}

#[test]
fn availability_result_applies_only_while_loading() {
    let mut state = submittable_state();
    state.availability = AvailabilityStatus::Loading;

    dispatch(
        &mut state,
        FlowAction::AvailabilityResolved {
            available: false,
            message: Some("Room not available for selected dates".to_string()),
        },
    );
    assert_eq!(state.availability, AvailabilityStatus::Unavailable);
    assert_eq!(
        state.error.as_deref(),
        Some("Room not available for selected dates")
    );

    // A stale confirmation must not resurrect an invalidated check.
    state.availability = AvailabilityStatus::Idle;
    dispatch(
        &mut state,
        FlowAction::AvailabilityResolved {
            available: true,
            message: None,
        },
    );
    assert_eq!(state.availability, AvailabilityStatus::Idle);
}

#[test]
fn submit_refuses_unconfirmed_availability() {
    let mut state = submittable_state();
    state.availability = AvailabilityStatus::Idle;

    let effects = dispatch(&mut state, FlowAction::Submit);

    assert_eq!(state.submission, SubmissionStatus::Idle);
    assert!(state.error.is_some());
    assert_no_effects(&effects);
}

#[test]
fn submit_is_refused_while_one_is_in_flight() {
    let mut state = submittable_state();

    let first = dispatch(&mut state, FlowAction::Submit);
    assert_has_future(&first);
    assert_eq!(state.submission, SubmissionStatus::Loading);

    let second = dispatch(&mut state, FlowAction::Submit);
    assert_no_effects(&second);
}

#[test]
fn the_draft_is_frozen_while_submission_is_in_flight() {
    let mut state = submittable_state();
    dispatch(&mut state, FlowAction::Submit);

    dispatch(
        &mut state,
        FlowAction::UpdateDetails(DraftPatch {
            room_id: Some(RoomTypeId::new(99)),
            ..DraftPatch::default()
        }),
    );

    assert_eq!(state.draft.room_id, Some(RoomTypeId::new(5)));
}

#[test]
fn submission_payload_selects_the_draft_fields() {
    let mut state = submittable_state();
    dispatch(&mut state, FlowAction::ToggleAddon(AddonId::new(9)));
    dispatch(&mut state, FlowAction::ToggleAddon(AddonId::new(4)));
    // Toggled off again: must not appear in the payload.
    dispatch(&mut state, FlowAction::ToggleAddon(AddonId::new(4)));

    let request = build_submission_request(&state).unwrap();

    assert_eq!(request.user_id, UserId::new(1));
    assert_eq!(request.room_type_id, RoomTypeId::new(5));
    assert_eq!(request.rate_plan_id, RatePlanId::new(2));
    assert_eq!(request.check_in_date, "2026-09-01");
    assert_eq!(request.check_out_date, "2026-09-02");
    assert_eq!(request.num_adults, 1);
    assert_eq!(request.email, "somsak@example.com");
    assert_eq!(request.booking_addon.len(), 1);
    assert_eq!(request.booking_addon[0].addon_id, AddonId::new(9));
    assert_eq!(request.booking_addon[0].quantity, 1);
}

#[test]
fn failed_submission_preserves_the_draft_for_retry() {
    let mut state = submittable_state();
    dispatch(&mut state, FlowAction::Submit);

    dispatch(
        &mut state,
        FlowAction::SubmissionResolved(Err("room just sold out".to_string())),
    );

    assert_eq!(state.submission, SubmissionStatus::Failed);
    assert_eq!(state.error.as_deref(), Some("room just sold out"));
    assert_eq!(state.draft.room_id, Some(RoomTypeId::new(5)));
    assert!(state.submitted.is_none());
}

#[test]
fn successful_submission_stores_the_record_and_signals() {
    let mut state = submittable_state();
    dispatch(&mut state, FlowAction::Submit);

    let booking = pending_booking(test_clock().now() + chrono::Duration::minutes(30));
    dispatch(
        &mut state,
        FlowAction::SubmissionResolved(Ok(Box::new(booking.clone()))),
    );

    assert_eq!(state.submission, SubmissionStatus::Succeeded);
    assert_eq!(state.submitted, Some(booking));
    assert_eq!(state.signal, Some(FlowSignal::Submitted));
}

#[test]
fn reset_restores_defaults_and_clears_statuses() {
    let mut state = submittable_state();
    dispatch(&mut state, FlowAction::ToggleAddon(AddonId::new(9)));
    dispatch(
        &mut state,
        FlowAction::UpdateGuestDetails(GuestDetailsPatch {
            phone: Some("+66 81 234 5678".to_string()),
            ..GuestDetailsPatch::default()
        }),
    );
    state.submission = SubmissionStatus::Failed;
    state.error = Some("room just sold out".to_string());

    dispatch(&mut state, FlowAction::Reset);

    assert_eq!(state, BookingFlowState::default());
    assert!(state.draft.selected_addons.is_empty());
    assert_eq!(state.draft.guest_details, crate::types::GuestDetails::default());
    assert_eq!(state.availability, AvailabilityStatus::Idle);
    assert_eq!(state.submission, SubmissionStatus::Idle);
}

proptest! {
    /// Toggling any add-on twice always returns its quantity to the start.
    #[test]
    fn toggle_is_an_involution(id in 1i64..10_000, initially_selected in any::<bool>()) {
        let mut state = BookingFlowState::default();
        let addon = AddonId::new(id);
        if initially_selected {
            state.draft.selected_addons.insert(addon, 1);
        }
        let before = state.draft.addon_quantity(addon);

        dispatch(&mut state, FlowAction::ToggleAddon(addon));
        dispatch(&mut state, FlowAction::ToggleAddon(addon));

        prop_assert_eq!(state.draft.addon_quantity(addon), before);
    }

    /// Guest-detail edits never affect the computed totals.
    #[test]
    fn totals_ignore_guest_detail_edits(phone in "[0-9+ ]{0,16}") {
        use super::totals::grand_total;
        use crate::types::{Addon, CategoryId};

        let mut state = submittable_state();
        state.draft.selected_addons.insert(AddonId::new(9), 1);
        let catalog = [Addon {
            addon_id: AddonId::new(9),
            category_id: CategoryId::new(1),
            name: "Airport transfer".to_string(),
            description: String::new(),
            price: 500.0,
            unit_name: "per stay".to_string(),
        }];

        let before = grand_total(&state.draft, &catalog);
        dispatch(&mut state, FlowAction::UpdateGuestDetails(GuestDetailsPatch {
            phone: Some(phone),
            ..GuestDetailsPatch::default()
        }));
        let after = grand_total(&state.draft, &catalog);

        prop_assert!((before - after).abs() < f64::EPSILON);
    }
}
