//! Programmable in-memory implementation of the reservations API.
//!
//! Used by reducer and store tests: program the responses up front, drive
//! the flow, then inspect which calls were actually issued (the local
//! validation rules promise that some actions never reach the network).

use super::{ApiError, HotelApi};
use crate::types::{
    Addon, AddonCategory, AuthenticatedUser, AvailabilityCounts, BookingId, BookingStatus,
    CategoryId, CreateBookingRequest, Credentials, RatePlan, RatePlanId, Registration, RoomType,
    RoomTypeDetail, RoomTypeId, SubmittedBooking, UserId,
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory API double with programmable responses and call recording.
#[derive(Default)]
pub struct MockHotelApi {
    calls: Mutex<Vec<String>>,
    room_types: Mutex<Vec<RoomType>>,
    rate_plans: Mutex<Vec<RatePlan>>,
    categories: Mutex<Vec<AddonCategory>>,
    addons: Mutex<HashMap<CategoryId, Vec<Addon>>>,
    availability: Mutex<AvailabilityCounts>,
    booking: Mutex<Option<SubmittedBooking>>,
    user: Mutex<Option<AuthenticatedUser>>,
    failure: Mutex<Option<String>>,
}

#[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable in test doubles
impl MockHotelApi {
    /// Create an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Program the availability counts returned by every query.
    #[must_use]
    pub fn with_availability<I>(self, counts: I) -> Self
    where
        I: IntoIterator<Item = (RoomTypeId, u32)>,
    {
        *self.availability.lock().unwrap() = AvailabilityCounts::from_counts(counts);
        self
    }

    /// Program the booking record returned by `create_booking`/`booking`.
    #[must_use]
    pub fn with_booking(self, booking: SubmittedBooking) -> Self {
        *self.booking.lock().unwrap() = Some(booking);
        self
    }

    /// Program the signed-in user returned by `login`.
    #[must_use]
    pub fn with_user(self, user: AuthenticatedUser) -> Self {
        *self.user.lock().unwrap() = Some(user);
        self
    }

    /// Program room type listings.
    #[must_use]
    pub fn with_room_types(self, room_types: Vec<RoomType>) -> Self {
        *self.room_types.lock().unwrap() = room_types;
        self
    }

    /// Program rate plan listings.
    #[must_use]
    pub fn with_rate_plans(self, rate_plans: Vec<RatePlan>) -> Self {
        *self.rate_plans.lock().unwrap() = rate_plans;
        self
    }

    /// Program add-on categories.
    #[must_use]
    pub fn with_categories(self, categories: Vec<AddonCategory>) -> Self {
        *self.categories.lock().unwrap() = categories;
        self
    }

    /// Program the add-ons of one category.
    #[must_use]
    pub fn with_addons(self, category_id: CategoryId, addons: Vec<Addon>) -> Self {
        self.addons.lock().unwrap().insert(category_id, addons);
        self
    }

    /// Make every subsequent call fail with the given message until cleared.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock().unwrap() = Some(message.into());
    }

    /// Stop failing calls.
    pub fn clear_failure(&self) {
        *self.failure.lock().unwrap() = None;
    }

    /// Names of every method invoked so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// How many times the named method was invoked.
    #[must_use]
    pub fn call_count(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == name)
            .count()
    }

    fn record(&self, name: &str) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(name.to_string());
        match self.failure.lock().unwrap().clone() {
            Some(message) => Err(ApiError::Rejected {
                status: 422,
                message,
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
#[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable in test doubles
impl HotelApi for MockHotelApi {
    async fn room_types(&self) -> Result<Vec<RoomType>, ApiError> {
        self.record("room_types")?;
        Ok(self.room_types.lock().unwrap().clone())
    }

    async fn room_type(&self, id: RoomTypeId) -> Result<RoomTypeDetail, ApiError> {
        self.record("room_type")?;
        self.room_types
            .lock()
            .unwrap()
            .iter()
            .find(|rt| rt.room_type_id == id)
            .map(|rt| RoomTypeDetail {
                room_type_id: rt.room_type_id,
                name: rt.name.clone(),
                description: rt.description.clone(),
                size_sqm: rt.size_sqm,
                bed_type: rt.bed_type.clone(),
                capacity: rt.capacity,
                picture_url: rt.picture_url.clone(),
                amenities: Vec::new(),
            })
            .ok_or(ApiError::Rejected {
                status: 404,
                message: "room type not found".to_string(),
            })
    }

    async fn rate_plans(&self, _room_type_id: RoomTypeId) -> Result<Vec<RatePlan>, ApiError> {
        self.record("rate_plans")?;
        Ok(self.rate_plans.lock().unwrap().clone())
    }

    async fn addon_categories(&self) -> Result<Vec<AddonCategory>, ApiError> {
        self.record("addon_categories")?;
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn addons_by_category(&self, category_id: CategoryId) -> Result<Vec<Addon>, ApiError> {
        self.record("addons_by_category")?;
        Ok(self
            .addons
            .lock()
            .unwrap()
            .get(&category_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn availability_counts(
        &self,
        _check_in: chrono::NaiveDate,
        _check_out: chrono::NaiveDate,
    ) -> Result<AvailabilityCounts, ApiError> {
        self.record("availability_counts")?;
        Ok(self.availability.lock().unwrap().clone())
    }

    async fn create_booking(
        &self,
        _request: CreateBookingRequest,
    ) -> Result<SubmittedBooking, ApiError> {
        self.record("create_booking")?;
        self.booking
            .lock()
            .unwrap()
            .clone()
            .ok_or(ApiError::Rejected {
                status: 500,
                message: "no booking programmed".to_string(),
            })
    }

    async fn booking(&self, _id: BookingId) -> Result<SubmittedBooking, ApiError> {
        self.record("booking")?;
        self.booking
            .lock()
            .unwrap()
            .clone()
            .ok_or(ApiError::Rejected {
                status: 404,
                message: "booking not found".to_string(),
            })
    }

    async fn pay_booking(&self, _id: BookingId) -> Result<(), ApiError> {
        self.record("pay_booking")?;
        Ok(())
    }

    async fn login(&self, _credentials: Credentials) -> Result<AuthenticatedUser, ApiError> {
        self.record("login")?;
        self.user.lock().unwrap().clone().ok_or(ApiError::Rejected {
            status: 401,
            message: "invalid credentials".to_string(),
        })
    }

    async fn register(&self, _registration: Registration) -> Result<(), ApiError> {
        self.record("register")?;
        Ok(())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.record("logout")?;
        Ok(())
    }
}

/// A pending booking record for tests, expiring at the given deadline.
#[must_use]
pub fn pending_booking(expired_at: DateTime<Utc>) -> SubmittedBooking {
    let created_at = expired_at - Duration::minutes(30);
    SubmittedBooking {
        booking_id: BookingId::new(101),
        user_id: UserId::new(1),
        rate_plan_id: RatePlanId::new(2),
        room_id: 12,
        check_in_date: created_at,
        check_out_date: created_at + Duration::days(1),
        num_adults: 2,
        status: BookingStatus::Pending,
        room_sub_total: 3000.0,
        addon_sub_total: 500.0,
        taxes_amount: 245.0,
        total_price: 3745.0,
        created_at,
        updated_at: created_at,
        expired_at,
        rate_plan_name: "Flexible".to_string(),
        room_number: "204".to_string(),
        room_type_name: "Deluxe King".to_string(),
        booking_addon: Vec::new(),
    }
}
