//! `reqwest`-based implementation of the reservations API.

use super::{ApiError, HotelApi};
use crate::config::ApiConfig;
use crate::types::{
    Addon, AddonCategory, AuthenticatedUser, AvailabilityCounts, AvailabilityQuery, BookingId,
    CategoryId, CreateBookingRequest, Credentials, RatePlan, Registration, RoomType,
    RoomTypeDetail, RoomTypeId, SubmittedBooking,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Wire format for date-only fields.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Error payload shape used by the server.
///
/// Depending on the handler the message travels under `message` or `error`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// REST client for the reservations API.
///
/// Holds a cookie store so the login session survives across calls, the way
/// a browser client would.
#[derive(Clone)]
pub struct RestApi {
    client: Client,
    base_url: String,
}

impl RestApi {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()));
        }
        Err(Self::rejection(status, response).await)
    }

    async fn rejection(status: StatusCode, response: Response) -> ApiError {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|e| e.error.or(e.message))
            .unwrap_or(body);
        tracing::debug!(status = status.as_u16(), %message, "API call rejected");
        ApiError::Rejected {
            status: status.as_u16(),
            message,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        tracing::debug!(path, "GET");
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        Self::decode(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        tracing::debug!(path, "POST");
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        Self::decode(response).await
    }

    /// POST with an empty body, discarding any success payload.
    async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        tracing::debug!(path, "POST");
        let response = self
            .client
            .post(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::rejection(status, response).await)
    }
}

#[async_trait]
impl HotelApi for RestApi {
    async fn room_types(&self) -> Result<Vec<RoomType>, ApiError> {
        self.get_json("/room_types").await
    }

    async fn room_type(&self, id: RoomTypeId) -> Result<RoomTypeDetail, ApiError> {
        self.get_json(&format!("/room_types/{id}")).await
    }

    async fn rate_plans(&self, room_type_id: RoomTypeId) -> Result<Vec<RatePlan>, ApiError> {
        self.get_json(&format!("/rate_plans/room-types/{room_type_id}"))
            .await
    }

    async fn addon_categories(&self) -> Result<Vec<AddonCategory>, ApiError> {
        self.get_json("/addon-categories").await
    }

    async fn addons_by_category(&self, category_id: CategoryId) -> Result<Vec<Addon>, ApiError> {
        self.get_json(&format!("/addons/category/{category_id}"))
            .await
    }

    async fn availability_counts(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<AvailabilityCounts, ApiError> {
        let query = AvailabilityQuery {
            check_in: check_in.format(DATE_FORMAT).to_string(),
            check_out: check_out.format(DATE_FORMAT).to_string(),
        };
        self.post_json("/rooms/availability/count", &query).await
    }

    async fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> Result<SubmittedBooking, ApiError> {
        self.post_json("/bookings", &request).await
    }

    async fn booking(&self, id: BookingId) -> Result<SubmittedBooking, ApiError> {
        self.get_json(&format!("/bookings/{id}")).await
    }

    async fn pay_booking(&self, id: BookingId) -> Result<(), ApiError> {
        self.post_empty(&format!("/bookings/{id}/pay")).await
    }

    async fn login(&self, credentials: Credentials) -> Result<AuthenticatedUser, ApiError> {
        self.post_json("/auth/login", &credentials).await
    }

    async fn register(&self, registration: Registration) -> Result<(), ApiError> {
        let _: serde_json::Value = self.post_json("/auth/register", &registration).await?;
        Ok(())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.post_empty("/auth/logout").await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;
    use crate::types::RoomTypeId;
    use wiremock::matchers::{body_json_string, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api(server: &MockServer) -> RestApi {
        RestApi::new(&ApiConfig {
            base_url: server.uri(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn availability_counts_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rooms/availability/count"))
            .and(body_json_string(
                r#"{"checkIn":"2026-09-01","checkOut":"2026-09-03"}"#,
            ))
            .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"5":2}"#, "application/json"))
            .mount(&server)
            .await;

        let counts = api(&server)
            .availability_counts(
                NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 9, 3).unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(counts.for_room(RoomTypeId::new(5)), 2);
        assert_eq!(counts.for_room(RoomTypeId::new(6)), 0);
    }

    #[tokio::test]
    async fn server_message_is_surfaced_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/room_types"))
            .respond_with(
                ResponseTemplate::new(422)
                    .set_body_raw(r#"{"message":"invalid stay duration"}"#, "application/json"),
            )
            .mount(&server)
            .await;

        let error = api(&server).room_types().await.unwrap_err();
        assert_eq!(error.to_string(), "invalid stay duration");
    }

    #[tokio::test]
    async fn error_field_takes_precedence_when_present() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bookings/9/pay"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_raw(r#"{"error":"booking already expired"}"#, "application/json"),
            )
            .mount(&server)
            .await;

        let error = api(&server)
            .pay_booking(BookingId::new(9))
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "booking already expired");
    }
}
