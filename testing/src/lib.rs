//! # Stayflow Testing
//!
//! Testing utilities and helpers for the Stayflow booking-flow architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits (clocks)
//! - A fluent Given/When/Then harness for reducer tests
//!
//! ## Example
//!
//! ```ignore
//! use stayflow_testing::{test_clock, AdvancingClock};
//!
//! #[tokio::test]
//! async fn test_countdown() {
//!     let clock = AdvancingClock::new(test_clock().now());
//!     let env = test_environment(clock.clone());
//!     // ... dispatch, then:
//!     clock.advance(chrono::Duration::seconds(91));
//!     // ... dispatch a tick and assert the expired state
//! }
//! ```

use chrono::{DateTime, Utc};
use stayflow_core::environment::Clock;

/// Mock implementations of Environment traits.
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use std::sync::{Arc, Mutex};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use stayflow_testing::mocks::FixedClock;
    /// use stayflow_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Advancing clock for simulated-time tests
    ///
    /// Starts at a given instant and only moves when the test tells it to.
    /// Clones share the same underlying instant, so the copy handed to an
    /// environment observes every `advance`/`set` issued by the test.
    ///
    /// # Example
    ///
    /// ```
    /// use stayflow_testing::mocks::AdvancingClock;
    /// use stayflow_core::environment::Clock;
    /// use chrono::{Duration, Utc};
    ///
    /// let clock = AdvancingClock::new(Utc::now());
    /// let start = clock.now();
    /// clock.advance(Duration::seconds(91));
    /// assert_eq!(clock.now() - start, Duration::seconds(91));
    /// ```
    #[derive(Debug, Clone)]
    pub struct AdvancingClock {
        time: Arc<Mutex<DateTime<Utc>>>,
    }

    impl AdvancingClock {
        /// Create a new advancing clock starting at the given instant
        #[must_use]
        pub fn new(start: DateTime<Utc>) -> Self {
            Self {
                time: Arc::new(Mutex::new(start)),
            }
        }

        /// Move the clock forward by the given duration
        ///
        /// # Panics
        ///
        /// Panics if the mutex protecting the instant is poisoned, which only
        /// happens if another test thread panicked while holding it.
        #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable in tests
        pub fn advance(&self, by: chrono::Duration) {
            let mut time = self.time.lock().unwrap();
            *time += by;
        }

        /// Set the clock to an absolute instant
        ///
        /// # Panics
        ///
        /// Panics if the mutex protecting the instant is poisoned.
        #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable in tests
        pub fn set(&self, to: DateTime<Utc>) {
            let mut time = self.time.lock().unwrap();
            *time = to;
        }
    }

    impl Clock for AdvancingClock {
        #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable in tests
        fn now(&self) -> DateTime<Utc> {
            *self.time.lock().unwrap()
        }
    }
}


pub use mocks::{test_clock, AdvancingClock, FixedClock};
pub use reducer_test::ReducerTest;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_never_moves() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn advancing_clock_clones_share_time() {
        let clock = AdvancingClock::new(test_clock().now());
        let held_by_env = clock.clone();

        clock.advance(chrono::Duration::seconds(30));

        assert_eq!(held_by_env.now(), clock.now());
    }
}
