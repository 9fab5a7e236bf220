//! Application assembly: one store per feature over a shared environment,
//! plus the cross-feature flows the pages relied on (logout resetting the
//! draft, a successful submission handing its booking to the confirmation
//! view).

use crate::addons::{AddonsAction, AddonsReducer, AddonsState};
use crate::api::HotelApi;
use crate::auth::{AuthAction, AuthReducer, AuthState};
use crate::confirmation::{ConfirmationAction, ConfirmationReducer, ConfirmationState};
use crate::env::AppEnvironment;
use crate::flow::{
    totals, BookingFlowReducer, BookingFlowState, FlowAction, FlowSignal, SubmissionStatus,
};
use crate::types::{AuthenticatedUser, Credentials, SubmittedBooking};
use crate::rooms::{RoomsReducer, RoomsState, RoomsAction};
use std::sync::Arc;
use std::time::Duration;
use stayflow_core::environment::Clock;
use stayflow_runtime::error::StoreError;
use stayflow_runtime::Store;
use thiserror::Error;

/// How long the app waits for a request/response flow before giving up.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors surfaced by the application layer.
#[derive(Debug, Error)]
pub enum AppError {
    /// A store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The reservations API rejected an operation; the message is the
    /// server's, verbatim.
    #[error("{0}")]
    Rejected(String),

    /// An operation that needs an authenticated identity ran without one.
    #[error("not signed in")]
    NotSignedIn,
}

/// The assembled booking client: five stores over one shared environment.
pub struct BookingApp {
    /// Auth session store.
    pub auth: Store<AuthState, AuthAction, AppEnvironment, AuthReducer>,
    /// Room catalog store.
    pub rooms: Store<RoomsState, RoomsAction, AppEnvironment, RoomsReducer>,
    /// Add-on catalog store.
    pub addons: Store<AddonsState, AddonsAction, AppEnvironment, AddonsReducer>,
    /// Booking flow store.
    pub flow: Store<BookingFlowState, FlowAction, AppEnvironment, BookingFlowReducer>,
    /// Confirmation store.
    pub confirmation:
        Store<ConfirmationState, ConfirmationAction, AppEnvironment, ConfirmationReducer>,
}

impl BookingApp {
    /// Assemble the app over a clock and an API client.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, api: Arc<dyn HotelApi>) -> Self {
        let env = AppEnvironment::new(clock, api);
        Self {
            auth: Store::new(AuthState::default(), AuthReducer::new(), env.clone()),
            rooms: Store::new(RoomsState::default(), RoomsReducer::new(), env.clone()),
            addons: Store::new(AddonsState::default(), AddonsReducer::new(), env.clone()),
            flow: Store::new(
                BookingFlowState::default(),
                BookingFlowReducer::new(),
                env.clone(),
            ),
            confirmation: Store::new(ConfirmationState::default(), ConfirmationReducer::new(), env),
        }
    }

    /// Sign in and return the authenticated identity.
    ///
    /// # Errors
    ///
    /// [`AppError::Rejected`] with the server's message when the login is
    /// refused; [`AppError::Store`] on store/timeout failures.
    pub async fn login(&self, credentials: Credentials) -> Result<AuthenticatedUser, AppError> {
        let outcome = self
            .auth
            .send_and_wait_for(
                AuthAction::Login(credentials),
                |a| matches!(a, AuthAction::LoginResolved(_)),
                REQUEST_TIMEOUT,
            )
            .await?;

        match outcome {
            AuthAction::LoginResolved(Ok(user)) => Ok(*user),
            AuthAction::LoginResolved(Err(message)) => Err(AppError::Rejected(message)),
            _ => Err(AppError::Store(StoreError::ChannelClosed)),
        }
    }

    /// Sign out and reset the booking flow, discarding the draft.
    ///
    /// # Errors
    ///
    /// [`AppError::Store`] if either store is already shutting down.
    pub async fn logout(&self) -> Result<(), AppError> {
        let mut handle = self.auth.send(AuthAction::Logout).await?;
        handle.wait().await;
        // Leaving the session behind also abandons the draft and any
        // confirmation in progress.
        self.flow.send(FlowAction::Reset).await?;
        self.confirmation.send(ConfirmationAction::Reset).await?;
        Ok(())
    }

    /// Enter the booking wizard with the signed-in identity.
    ///
    /// # Errors
    ///
    /// [`AppError::NotSignedIn`] when nobody is signed in (the caller should
    /// route to the login page); [`AppError::Store`] on store failures.
    pub async fn enter_flow(&self) -> Result<(), AppError> {
        let user = self.auth.state(|s| s.user.clone()).await;
        let Some(user) = user else {
            return Err(AppError::NotSignedIn);
        };
        self.flow.send(FlowAction::Enter { user }).await?;
        Ok(())
    }

    /// Submit the draft and, on success, hand the returned booking to the
    /// confirmation store (which starts the payment countdown).
    ///
    /// Local validation failures (missing room, unconfirmed availability,
    /// a zero-night stay) never reach the network and are surfaced with
    /// their recorded message.
    ///
    /// # Errors
    ///
    /// [`AppError::Rejected`] with the server's message when the booking is
    /// refused or blocked by local validation; [`AppError::Store`] on
    /// store/timeout failures.
    pub async fn submit(&self) -> Result<SubmittedBooking, AppError> {
        let mut handle = self.flow.send(FlowAction::Submit).await?;
        handle.wait_with_timeout(REQUEST_TIMEOUT).await?;

        let (submission, submitted, error) = self
            .flow
            .state(|s| (s.submission, s.submitted.clone(), s.error.clone()))
            .await;

        match submission {
            SubmissionStatus::Succeeded => {
                let booking = submitted
                    .ok_or_else(|| AppError::Rejected("booking record missing".to_string()))?;
                self.flow.send(FlowAction::ClearSignal).await?;
                self.confirmation
                    .send(ConfirmationAction::Entered {
                        booking: Box::new(booking.clone()),
                    })
                    .await?;
                Ok(booking)
            },
            SubmissionStatus::Loading => {
                Err(AppError::Rejected("a submission is already in flight".to_string()))
            },
            SubmissionStatus::Idle | SubmissionStatus::Failed => Err(AppError::Rejected(
                error.unwrap_or_else(|| "booking submission failed".to_string()),
            )),
        }
    }

    /// Displayed totals: the current draft priced against every cached
    /// add-on. Recomputed on every call, never cached.
    pub async fn totals(&self) -> totals::TotalsBreakdown {
        let draft = self.flow.state(|s| s.draft.clone()).await;
        self.addons
            .state(|addons| totals::breakdown(&draft, addons.catalog()))
            .await
    }

    /// Consume the flow's pending edge signal, if any.
    ///
    /// # Errors
    ///
    /// [`AppError::Store`] if the flow store is shutting down.
    pub async fn take_flow_signal(&self) -> Result<Option<FlowSignal>, AppError> {
        let signal = self.flow.state(|s| s.signal).await;
        if signal.is_some() {
            self.flow.send(FlowAction::ClearSignal).await?;
        }
        Ok(signal)
    }

    /// Leave the confirmation view, stopping its countdown for good.
    ///
    /// # Errors
    ///
    /// [`AppError::Store`] if the confirmation store is shutting down.
    pub async fn leave_confirmation(&self) -> Result<(), AppError> {
        self.confirmation.send(ConfirmationAction::Leave).await?;
        Ok(())
    }

    /// Shut every store down, draining pending effects (including any
    /// countdown tick still in flight).
    ///
    /// # Errors
    ///
    /// The first [`StoreError::ShutdownTimeout`] encountered, if any store
    /// fails to drain in time.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), AppError> {
        self.confirmation.shutdown(timeout).await?;
        self.flow.shutdown(timeout).await?;
        self.addons.shutdown(timeout).await?;
        self.rooms.shutdown(timeout).await?;
        self.auth.shutdown(timeout).await?;
        Ok(())
    }
}
