//! Boundary to the reservations REST API.
//!
//! The client consumes a handful of JSON endpoints; everything behind them
//! (pricing, availability enforcement, booking expiry, payment processing,
//! sessions) is owned by the server. Errors arrive as a structured payload
//! with a human-readable message that is surfaced to the guest verbatim.

pub mod mock;
pub mod rest;

use crate::types::{
    Addon, AddonCategory, AuthenticatedUser, AvailabilityCounts, BookingId, CategoryId,
    CreateBookingRequest, Credentials, RatePlan, Registration, RoomType, RoomTypeDetail,
    RoomTypeId, SubmittedBooking,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by the reservations API boundary.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The HTTP request itself failed (connection, timeout, ...).
    #[error("request failed: {0}")]
    Request(String),

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The server rejected the call with a structured error payload.
    ///
    /// `Display` renders the server message alone so it can be shown to the
    /// guest unchanged.
    #[error("{message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Human-readable message from the server.
        message: String,
    },
}

/// The reservations API as consumed by the booking client.
#[async_trait]
pub trait HotelApi: Send + Sync {
    /// List all room types.
    async fn room_types(&self) -> Result<Vec<RoomType>, ApiError>;

    /// Fetch one room type with its amenities.
    async fn room_type(&self, id: RoomTypeId) -> Result<RoomTypeDetail, ApiError>;

    /// List rate plans priced for a room type.
    async fn rate_plans(&self, room_type_id: RoomTypeId) -> Result<Vec<RatePlan>, ApiError>;

    /// List add-on categories.
    async fn addon_categories(&self) -> Result<Vec<AddonCategory>, ApiError>;

    /// List add-ons belonging to a category.
    async fn addons_by_category(&self, category_id: CategoryId) -> Result<Vec<Addon>, ApiError>;

    /// Per-room-type availability counts over a date range.
    async fn availability_counts(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<AvailabilityCounts, ApiError>;

    /// Create a booking; the returned record carries the expiry deadline.
    async fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> Result<SubmittedBooking, ApiError>;

    /// Authoritative read of a booking record.
    async fn booking(&self, id: BookingId) -> Result<SubmittedBooking, ApiError>;

    /// Pay a pending booking (simulated gateway on the server side).
    async fn pay_booking(&self, id: BookingId) -> Result<(), ApiError>;

    /// Sign in; the session lives in a cookie managed by the HTTP layer.
    async fn login(&self, credentials: Credentials) -> Result<AuthenticatedUser, ApiError>;

    /// Create an account. Success does not sign the user in.
    async fn register(&self, registration: Registration) -> Result<(), ApiError>;

    /// Sign out, dropping the server-side session.
    async fn logout(&self) -> Result<(), ApiError>;
}
