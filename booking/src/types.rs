//! Core domain and wire types for the booking client.
//!
//! The reservations API is the source of truth for every record here; these
//! types mirror its JSON shapes exactly (camelCase booking fields,
//! snake_case room and add-on fields) so nothing is lost in translation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Declares an integer-backed id newtype with the accessors every feature
/// expects (`new`, `get`, `Display`).
macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw id.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the raw id.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Identifier of a room type (the bookable inventory unit).
    RoomTypeId
);
id_type!(
    /// Identifier of a rate plan attached to a room type.
    RatePlanId
);
id_type!(
    /// Identifier of an optional add-on service.
    AddonId
);
id_type!(
    /// Identifier of an add-on category.
    CategoryId
);
id_type!(
    /// Identifier of a booking record issued by the reservations API.
    BookingId
);
id_type!(
    /// Identifier of a registered user.
    UserId
);

/// A bookable room type as listed by the reservations API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomType {
    /// Room type id.
    pub room_type_id: RoomTypeId,
    /// Display name.
    pub name: String,
    /// Marketing description.
    pub description: String,
    /// Room size in square meters.
    pub size_sqm: f64,
    /// Bed configuration label.
    pub bed_type: String,
    /// Maximum number of guests.
    pub capacity: u32,
    /// Picture references.
    #[serde(default)]
    pub picture_url: Vec<String>,
    /// Number of physical rooms of this type. Types with zero rooms are
    /// listing ghosts and are filtered out of search results.
    #[serde(default)]
    pub total_rooms: u32,
}

/// A room type with its amenity list, as returned by the details endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomTypeDetail {
    /// Room type id.
    pub room_type_id: RoomTypeId,
    /// Display name.
    pub name: String,
    /// Marketing description.
    pub description: String,
    /// Room size in square meters.
    pub size_sqm: f64,
    /// Bed configuration label.
    pub bed_type: String,
    /// Maximum number of guests.
    pub capacity: u32,
    /// Picture references.
    #[serde(default)]
    pub picture_url: Vec<String>,
    /// Amenity labels.
    #[serde(default)]
    pub amenities: Vec<String>,
}

/// A named pricing/policy bundle attachable to a room type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatePlan {
    /// Rate plan id.
    pub rate_plan_id: RatePlanId,
    /// Display name.
    pub name: String,
    /// Terms description.
    pub description: String,
    /// Whether the plan is a special package.
    pub is_special_package: bool,
    /// Whether free cancellation is included.
    pub allow_free_cancel: bool,
    /// Whether payment can be deferred.
    pub allow_pay_later: bool,
    /// Nightly price quoted for the room type this plan was fetched for.
    pub price: f64,
}

/// A category grouping add-ons (spa, dining, transport, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonCategory {
    /// Category id.
    pub category_id: CategoryId,
    /// Display name.
    pub name: String,
}

/// An optional extra service/item with its own price and unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Addon {
    /// Add-on id.
    pub addon_id: AddonId,
    /// Owning category.
    pub category_id: CategoryId,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Price per selection; never negative.
    pub price: f64,
    /// Unit label ("per person", "per stay", ...).
    pub unit_name: String,
}

/// Guest contact details collected by the wizard.
///
/// All fields are free text until submission; the reservations API performs
/// the authoritative validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestDetails {
    /// Salutation.
    pub title: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Contact email; also sent with the booking payload.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Country of residence.
    pub country: String,
}

/// Closed set of supported payment methods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Card payment.
    Card,
    /// QR / bank transfer payment.
    #[default]
    Qr,
}

/// Booking record status as reported by the reservations API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    /// Created, awaiting payment before the expiry deadline.
    Pending,
    /// Paid and confirmed.
    Confirmed,
    /// Guest has checked in.
    CheckedIn,
    /// Cancelled (by the guest, an operator, or expiry cleanup).
    Cancelled,
}

/// A booking record returned by the reservations API.
///
/// Read-only to the client: `status` and `expired_at` are observed, never
/// computed here. The one exception is the optimistic local `Confirmed`
/// after a successful payment call, which stays flagged as unreconciled
/// until the next authoritative read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedBooking {
    /// Booking id.
    pub booking_id: BookingId,
    /// Owning user.
    pub user_id: UserId,
    /// Booked rate plan.
    pub rate_plan_id: RatePlanId,
    /// Assigned physical room.
    pub room_id: i64,
    /// Stay start.
    pub check_in_date: DateTime<Utc>,
    /// Stay end.
    pub check_out_date: DateTime<Utc>,
    /// Number of adults.
    pub num_adults: u32,
    /// Current status.
    pub status: BookingStatus,
    /// Room portion of the total.
    pub room_sub_total: f64,
    /// Add-on portion of the total.
    pub addon_sub_total: f64,
    /// Taxes applied by the server.
    pub taxes_amount: f64,
    /// Authoritative total price.
    pub total_price: f64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Deadline after which a pending booking can no longer be paid.
    pub expired_at: DateTime<Utc>,
    /// Rate plan display name.
    #[serde(default)]
    pub rate_plan_name: String,
    /// Assigned room number.
    #[serde(default)]
    pub room_number: String,
    /// Room type display name.
    #[serde(default)]
    pub room_type_name: String,
    /// Booked add-ons with their price at booking time.
    #[serde(default)]
    pub booking_addon: Vec<BookedAddon>,
}

/// An add-on line item on a submitted booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedAddon {
    /// Line item id.
    pub booking_addon_id: i64,
    /// Owning booking.
    pub booking_id: BookingId,
    /// Add-on id.
    pub addon_id: AddonId,
    /// Add-on display name.
    #[serde(default)]
    pub addon_name: String,
    /// Selected quantity.
    pub quantity: u32,
    /// Price captured at booking time.
    pub price_at_booking: f64,
}

/// Payload for creating a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    /// Submitting user.
    pub user_id: UserId,
    /// Chosen rate plan.
    pub rate_plan_id: RatePlanId,
    /// Chosen room type.
    pub room_type_id: RoomTypeId,
    /// Stay start, `YYYY-MM-DD`.
    pub check_in_date: String,
    /// Stay end, `YYYY-MM-DD`.
    pub check_out_date: String,
    /// Number of adults.
    pub num_adults: u32,
    /// Guest contact email.
    pub email: String,
    /// Selected add-ons; only entries with quantity > 0 are included.
    pub booking_addon: Vec<BookingAddonItem>,
}

/// One selected add-on in a booking payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingAddonItem {
    /// Add-on id.
    pub addon_id: AddonId,
    /// Selected quantity.
    pub quantity: u32,
}

/// Availability query sent to the reservations API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    /// Stay start, `YYYY-MM-DD`.
    pub check_in: String,
    /// Stay end, `YYYY-MM-DD`.
    pub check_out: String,
}

/// Per-room-type availability counts over a date range.
///
/// The wire format is a JSON object keyed by room type id; JSON object keys
/// are strings, so the map is kept string-keyed and looked up through
/// [`AvailabilityCounts::for_room`]. A missing key means zero rooms left.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailabilityCounts(HashMap<String, u32>);

impl AvailabilityCounts {
    /// Remaining rooms of the given type; zero when the type is absent.
    #[must_use]
    pub fn for_room(&self, room_type_id: RoomTypeId) -> u32 {
        self.0
            .get(&room_type_id.to_string())
            .copied()
            .unwrap_or(0)
    }

    /// Build counts from typed pairs (test and fixture convenience).
    #[must_use]
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (RoomTypeId, u32)>,
    {
        Self(
            counts
                .into_iter()
                .map(|(id, count)| (id.to_string(), count))
                .collect(),
        )
    }
}

/// The signed-in identity as reported by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    /// User id.
    pub id: UserId,
    /// Username; prefills the guest first-name field on flow entry.
    pub username: String,
    /// Account email; prefills the guest email field on flow entry.
    pub email: String,
    /// Role label ("guest", "admin").
    #[serde(default)]
    pub role: String,
}

/// Login payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Registration payload.
///
/// `confirm_password` exists for the local mismatch check only and is never
/// serialized to the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Desired username.
    pub username: String,
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
    /// Password repetition, checked locally before any request is issued.
    #[serde(skip_serializing, default)]
    pub confirm_password: String,
}

impl Registration {
    /// Whether the two password fields agree.
    #[must_use]
    pub fn passwords_match(&self) -> bool {
        self.password == self.confirm_password
    }
}
