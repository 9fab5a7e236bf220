//! Room catalog feature: room type listings, detail views, rate plans, and
//! the availability-filtered search that feeds the booking flow.

use crate::api::{ApiError, HotelApi};
use crate::env::AppEnvironment;
use crate::types::{RatePlan, RoomType, RoomTypeDetail, RoomTypeId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smallvec::smallvec;
use std::sync::Arc;
use stayflow_core::effect::{Effect, Effects};
use stayflow_core::reducer::Reducer;

/// A room type joined with its remaining availability for a searched stay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableRoomType {
    /// The room type.
    pub room_type: RoomType,
    /// Rooms left for the searched dates; `None` when no dates were given.
    pub available_count: Option<u32>,
}

/// State of the room catalog feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomsState {
    /// Search results.
    pub rooms: Vec<AvailableRoomType>,
    /// Room type opened in the details view.
    pub current: Option<RoomTypeDetail>,
    /// Rate plans priced for the current room type.
    pub rate_plans: Vec<RatePlan>,
    /// Whether a catalog request is in flight.
    pub loading: bool,
    /// Last surfaced message.
    pub error: Option<String>,
}

/// Actions processed by the room catalog reducer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RoomsAction {
    /// List room types; with a stay window, join availability counts and
    /// keep only types that still have rooms left.
    FetchRooms {
        /// Optional stay window `(check_in, check_out)`.
        stay: Option<(NaiveDate, NaiveDate)>,
    },
    /// Result of the room search.
    RoomsLoaded(Result<Vec<AvailableRoomType>, String>),
    /// Open a room type in the details view.
    FetchRoomDetails(RoomTypeId),
    /// Result of the details fetch.
    RoomDetailsLoaded(Result<Box<RoomTypeDetail>, String>),
    /// Fetch the rate plans priced for a room type.
    FetchRatePlans(RoomTypeId),
    /// Result of the rate plan fetch.
    RatePlansLoaded(Result<Vec<RatePlan>, String>),
    /// Close the details view.
    ClearCurrent,
}

/// List room types, joining availability when a stay window is given.
///
/// Types with no physical rooms are listing ghosts and are always dropped;
/// with dates, types with nothing left for the window are dropped too.
async fn search_rooms(
    api: Arc<dyn HotelApi>,
    stay: Option<(NaiveDate, NaiveDate)>,
) -> Result<Vec<AvailableRoomType>, ApiError> {
    let room_types = api.room_types().await?;

    let Some((check_in, check_out)) = stay else {
        return Ok(room_types
            .into_iter()
            .filter(|rt| rt.total_rooms > 0)
            .map(|room_type| AvailableRoomType {
                room_type,
                available_count: None,
            })
            .collect());
    };

    let counts = api.availability_counts(check_in, check_out).await?;
    Ok(room_types
        .into_iter()
        .filter(|rt| rt.total_rooms > 0)
        .map(|room_type| {
            let available = counts.for_room(room_type.room_type_id);
            AvailableRoomType {
                room_type,
                available_count: Some(available),
            }
        })
        .filter(|room| room.available_count.unwrap_or(0) > 0)
        .collect())
}

/// Reducer for the room catalog feature.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoomsReducer;

impl RoomsReducer {
    /// Create a new room catalog reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for RoomsReducer {
    type State = RoomsState;
    type Action = RoomsAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            RoomsAction::FetchRooms { stay } => {
                state.loading = true;
                state.error = None;
                let api = env.api();
                smallvec![Effect::future(async move {
                    let result = search_rooms(api, stay).await.map_err(|e| e.to_string());
                    Some(RoomsAction::RoomsLoaded(result))
                })]
            },

            RoomsAction::RoomsLoaded(Ok(rooms)) => {
                state.loading = false;
                state.rooms = rooms;
                smallvec![Effect::None]
            },

            RoomsAction::RoomsLoaded(Err(message)) => {
                tracing::warn!(%message, "room search failed");
                state.loading = false;
                state.error = Some(message);
                smallvec![Effect::None]
            },

            RoomsAction::FetchRoomDetails(room_type_id) => {
                state.loading = true;
                state.error = None;
                let api = env.api();
                smallvec![Effect::future(async move {
                    let result = api
                        .room_type(room_type_id)
                        .await
                        .map(Box::new)
                        .map_err(|e| e.to_string());
                    Some(RoomsAction::RoomDetailsLoaded(result))
                })]
            },

            RoomsAction::RoomDetailsLoaded(Ok(detail)) => {
                state.loading = false;
                state.current = Some(*detail);
                smallvec![Effect::None]
            },

            RoomsAction::RoomDetailsLoaded(Err(message)) => {
                tracing::warn!(%message, "room details fetch failed");
                state.loading = false;
                state.error = Some(message);
                smallvec![Effect::None]
            },

            RoomsAction::FetchRatePlans(room_type_id) => {
                let api = env.api();
                smallvec![Effect::future(async move {
                    let result = api
                        .rate_plans(room_type_id)
                        .await
                        .map_err(|e| e.to_string());
                    Some(RoomsAction::RatePlansLoaded(result))
                })]
            },

            RoomsAction::RatePlansLoaded(Ok(rate_plans)) => {
                state.rate_plans = rate_plans;
                smallvec![Effect::None]
            },

            RoomsAction::RatePlansLoaded(Err(message)) => {
                tracing::warn!(%message, "rate plan fetch failed");
                state.error = Some(message);
                smallvec![Effect::None]
            },

            RoomsAction::ClearCurrent => {
                state.current = None;
                smallvec![Effect::None]
            },
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;
    use crate::api::mock::MockHotelApi;
    use stayflow_testing::test_clock;

    fn room_type(id: i64, total_rooms: u32) -> RoomType {
        RoomType {
            room_type_id: RoomTypeId::new(id),
            name: format!("room-{id}"),
            description: String::new(),
            size_sqm: 32.0,
            bed_type: "king".to_string(),
            capacity: 2,
            picture_url: Vec::new(),
            total_rooms,
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[tokio::test]
    async fn search_with_dates_filters_unavailable_and_ghost_rooms() {
        let api = Arc::new(
            MockHotelApi::new()
                .with_room_types(vec![room_type(5, 10), room_type(6, 10), room_type(7, 0)])
                .with_availability([
                    (RoomTypeId::new(5), 2),
                    (RoomTypeId::new(6), 0),
                    (RoomTypeId::new(7), 4),
                ]),
        );

        let rooms = search_rooms(api, Some((date(2026, 9, 1), date(2026, 9, 3))))
            .await
            .unwrap();

        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].room_type.room_type_id, RoomTypeId::new(5));
        assert_eq!(rooms[0].available_count, Some(2));
    }

    #[tokio::test]
    async fn search_without_dates_only_drops_ghost_rooms() {
        let api = Arc::new(
            MockHotelApi::new().with_room_types(vec![room_type(5, 10), room_type(7, 0)]),
        );

        let rooms = search_rooms(api, None).await.unwrap();

        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].available_count, None);
    }

    #[tokio::test]
    async fn rooms_loaded_failure_surfaces_the_message() {
        let env = AppEnvironment::new(Arc::new(test_clock()), Arc::new(MockHotelApi::new()));
        let mut state = RoomsState::default();

        RoomsReducer::new().reduce(
            &mut state,
            RoomsAction::RoomsLoaded(Err("search backend down".to_string())),
            &env,
        );

        assert_eq!(state.error.as_deref(), Some("search backend down"));
        assert!(!state.loading);
    }
}
