//! Shared environment for every feature reducer.
//!
//! All external dependencies sit behind traits and are injected here, so
//! production wires a system clock and the REST client while tests hand in
//! fixed clocks and a programmable API double.

use crate::api::HotelApi;
use std::sync::Arc;
use stayflow_core::environment::Clock;

/// Injected dependencies shared by the booking features.
#[derive(Clone)]
pub struct AppEnvironment {
    clock: Arc<dyn Clock>,
    api: Arc<dyn HotelApi>,
}

impl AppEnvironment {
    /// Create a new environment from a clock and an API client.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, api: Arc<dyn HotelApi>) -> Self {
        Self { clock, api }
    }

    /// Clock for reading the current time.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Handle to the reservations API, cloned for moving into effects.
    #[must_use]
    pub fn api(&self) -> Arc<dyn HotelApi> {
        Arc::clone(&self.api)
    }
}

impl std::fmt::Debug for AppEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppEnvironment").finish_non_exhaustive()
    }
}
