//! # Stayflow Booking
//!
//! The hotel booking client: a guest configures a reservation through a
//! three-step wizard (add-ons, guest details, payment), the flow checks
//! remaining inventory before submission, and a confirmation view races a
//! once-a-second countdown against the server-issued payment deadline.
//!
//! Every feature is a reducer over owned state with explicit effects,
//! running on a [`stayflow_runtime::Store`]; the reservations REST API and
//! the clock are injected through [`env::AppEnvironment`], so tests drive
//! the same reducers with fixed clocks and a programmable API double.
//!
//! ## Features
//!
//! - [`flow`]: the single in-progress draft, wizard sequencing, the
//!   availability gate, derived totals, and submission
//! - [`confirmation`]: the payment countdown and the payment lifecycle with
//!   its optimistic, reconciliation-pending status update
//! - [`addons`]: add-on categories with a per-category catalog cache
//! - [`rooms`]: room listings, details, rate plans, availability-filtered
//!   search
//! - [`auth`]: client-side session state over the auth endpoints
//! - [`app`]: the assembled stores plus cross-feature wiring

pub mod addons;
pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod confirmation;
pub mod env;
pub mod flow;
pub mod rooms;
pub mod types;

pub use app::{AppError, BookingApp};
pub use config::Config;
pub use env::AppEnvironment;
